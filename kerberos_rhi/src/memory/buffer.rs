//! Owned host byte block
//!
//! [`Buffer`] is the staging memory handed to GPU uploads (vertex data,
//! uniform blocks, texture pixels). It owns its allocation exclusively;
//! `Clone` and [`Buffer::copy`] produce an independent deep copy.

const SOURCE: &str = "kerberos::Buffer";

/// Owned, heap-allocated byte block
///
/// Invariant: the backing store is absent exactly when `size() == 0`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Buffer {
    data: Option<Box<[u8]>>,
}

impl Buffer {
    /// Allocate `size` bytes (zero-filled)
    pub fn new(size: u64) -> Self {
        let mut buffer = Self::default();
        buffer.allocate(size);
        buffer
    }

    /// Take a copy of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::default();
        }
        Self {
            data: Some(bytes.into()),
        }
    }

    /// Deep copy of `other` with its own allocation
    pub fn copy(other: &Buffer) -> Self {
        other.clone()
    }

    /// Release any previous allocation, then allocate `size` bytes
    ///
    /// The new content is zero-filled; callers must not rely on it. A size the
    /// host cannot allocate is logged and leaves the buffer empty.
    pub fn allocate(&mut self, size: u64) {
        self.release();
        if size == 0 {
            return;
        }
        let Ok(len) = usize::try_from(size) else {
            crate::engine_error!(SOURCE, "Cannot allocate {} bytes: exceeds the host address space", size);
            return;
        };
        let mut data: Vec<u8> = Vec::new();
        if let Err(error) = data.try_reserve_exact(len) {
            crate::engine_error!(SOURCE, "Cannot allocate {} bytes: {}", size, error);
            return;
        }
        data.resize(len, 0);
        self.data = Some(data.into_boxed_slice());
    }

    /// Free the allocation (no-op when empty)
    pub fn release(&mut self) {
        self.data = None;
    }

    pub fn size(&self) -> u64 {
        self.data.as_ref().map_or(0, |data| data.len() as u64)
    }

    /// `true` while a backing store is present
    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_deref().unwrap_or(&[])
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.data.as_deref_mut().unwrap_or(&mut [])
    }

    /// Reinterpret the block as a pointer to `T` without copying
    ///
    /// Null when the buffer is empty. Alignment and size are not checked;
    /// prefer [`Buffer::try_as_slice`] for plain-old-data types.
    pub fn as_ptr<T>(&self) -> *const T {
        match &self.data {
            Some(data) => data.as_ptr().cast(),
            None => std::ptr::null(),
        }
    }

    /// Mutable counterpart of [`Buffer::as_ptr`]
    pub fn as_mut_ptr<T>(&mut self) -> *mut T {
        match &mut self.data {
            Some(data) => data.as_mut_ptr().cast(),
            None => std::ptr::null_mut(),
        }
    }

    /// Checked view of the block as a slice of `T`
    ///
    /// `None` when the size is not a multiple of `size_of::<T>()` or the
    /// allocation is misaligned for `T`.
    pub fn try_as_slice<T: bytemuck::Pod>(&self) -> Option<&[T]> {
        bytemuck::try_cast_slice(self.as_bytes()).ok()
    }

    pub fn try_as_slice_mut<T: bytemuck::Pod>(&mut self) -> Option<&mut [T]> {
        bytemuck::try_cast_slice_mut(self.as_bytes_mut()).ok()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            Self::default()
        } else {
            Self {
                data: Some(bytes.into_boxed_slice()),
            }
        }
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
