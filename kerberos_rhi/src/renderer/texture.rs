//! 2D texture handle consumed by render passes

/// Pixel format of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    None,
    R8,
    RGB8,
    #[default]
    RGBA8,
    RGBA32F,
}

impl ImageFormat {
    /// Bytes per pixel (0 for `None`)
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            ImageFormat::None => 0,
            ImageFormat::R8 => 1,
            ImageFormat::RGB8 => 3,
            ImageFormat::RGBA8 => 4,
            ImageFormat::RGBA32F => 16,
        }
    }
}

/// Description of a 2D texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSpecification {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub generate_mips: bool,
}

impl Default for TextureSpecification {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            format: ImageFormat::RGBA8,
            generate_mips: true,
        }
    }
}

/// 2D texture resource
pub trait Texture2D: Send + Sync {
    fn specification(&self) -> &TextureSpecification;

    fn width(&self) -> u32 {
        self.specification().width
    }

    fn height(&self) -> u32 {
        self.specification().height
    }

    /// Backend object name
    fn renderer_id(&self) -> u64;

    /// Bind to texture unit `slot`
    fn bind(&self, slot: u32);
}
