//! Vertex attribute schema
//!
//! A [`BufferLayout`] lists the attributes of one interleaved vertex stream.
//! Offsets and the stride are computed once, from declaration order, when
//! the layout is built.

/// Data type of one shader input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderDataType {
    #[default]
    None,
    Float,
    Float2,
    Float3,
    Float4,
    Mat3,
    Mat4,
    Int,
    Int2,
    Int3,
    Int4,
    Bool,
}

impl ShaderDataType {
    /// Size in bytes
    pub fn size(&self) -> u32 {
        match self {
            ShaderDataType::None => 0,
            ShaderDataType::Float => 4,
            ShaderDataType::Float2 => 4 * 2,
            ShaderDataType::Float3 => 4 * 3,
            ShaderDataType::Float4 => 4 * 4,
            ShaderDataType::Mat3 => 4 * 3 * 3,
            ShaderDataType::Mat4 => 4 * 4 * 4,
            ShaderDataType::Int => 4,
            ShaderDataType::Int2 => 4 * 2,
            ShaderDataType::Int3 => 4 * 3,
            ShaderDataType::Int4 => 4 * 4,
            ShaderDataType::Bool => 1,
        }
    }

    /// Components per attribute location
    ///
    /// Matrices report the width of one column; see [`location_count`](Self::location_count).
    pub fn component_count(&self) -> u32 {
        match self {
            ShaderDataType::None => 0,
            ShaderDataType::Float | ShaderDataType::Int | ShaderDataType::Bool => 1,
            ShaderDataType::Float2 | ShaderDataType::Int2 => 2,
            ShaderDataType::Float3 | ShaderDataType::Int3 | ShaderDataType::Mat3 => 3,
            ShaderDataType::Float4 | ShaderDataType::Int4 | ShaderDataType::Mat4 => 4,
        }
    }

    /// Attribute locations consumed (one per matrix column)
    pub fn location_count(&self) -> u32 {
        match self {
            ShaderDataType::Mat3 => 3,
            ShaderDataType::Mat4 => 4,
            ShaderDataType::None => 0,
            _ => 1,
        }
    }

    /// `true` for types fed to the shader as integers
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ShaderDataType::Int
                | ShaderDataType::Int2
                | ShaderDataType::Int3
                | ShaderDataType::Int4
                | ShaderDataType::Bool
        )
    }
}

/// One attribute of a [`BufferLayout`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferElement {
    pub name: String,
    pub data_type: ShaderDataType,
    /// Size in bytes (derived from `data_type`)
    pub size: u32,
    /// Byte offset inside one vertex (assigned by the layout)
    pub offset: u32,
    pub normalized: bool,
}

impl BufferElement {
    pub fn new(data_type: ShaderDataType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type,
            size: data_type.size(),
            offset: 0,
            normalized: false,
        }
    }

    /// Mark the attribute as normalized fixed-point data
    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }
}

/// Ordered, immutable list of vertex attributes
///
/// # Example
///
/// ```
/// use kerberos_rhi::kerberos::render::{BufferElement, BufferLayout, ShaderDataType};
///
/// let layout = BufferLayout::new(vec![
///     BufferElement::new(ShaderDataType::Float3, "a_Position"),
///     BufferElement::new(ShaderDataType::Float2, "a_TexCoord"),
/// ]);
/// assert_eq!(layout.stride(), 20);
/// assert_eq!(layout.elements()[1].offset, 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
}

impl BufferLayout {
    pub fn new(mut elements: Vec<BufferElement>) -> Self {
        let mut offset = 0;
        for element in &mut elements {
            element.offset = offset;
            offset += element.size;
        }
        Self {
            elements,
            stride: offset,
        }
    }

    pub fn elements(&self) -> &[BufferElement] {
        &self.elements
    }

    /// Bytes per vertex
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BufferElement> {
        self.elements.iter()
    }

    /// Attribute locations consumed by the whole layout
    pub fn location_count(&self) -> u32 {
        self.elements.iter().map(|e| e.data_type.location_count()).sum()
    }
}

impl FromIterator<BufferElement> for BufferLayout {
    fn from_iter<I: IntoIterator<Item = BufferElement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BufferLayout {
    type Item = &'a BufferElement;
    type IntoIter = std::slice::Iter<'a, BufferElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
#[path = "buffer_layout_tests.rs"]
mod tests;
