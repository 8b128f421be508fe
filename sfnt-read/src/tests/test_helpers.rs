//! small utilities used in tests

use crate::FontData;
use std::collections::HashMap;
use types::Scalar;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
    tagged_locations: HashMap<String, usize>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    pub fn push_with_tag(mut self, item: impl Scalar, tag: &str) -> Self {
        self.tagged_locations
            .insert(tag.to_string(), self.data.len());
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    /// Append raw bytes, such as encoded strings.
    pub fn extend_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Pad with zeros up to `len` bytes.
    pub fn pad_to(mut self, len: usize) -> Self {
        if self.data.len() < len {
            self.data.resize(len, 0);
        }
        self
    }

    pub fn offset_for(&self, tag: &str) -> usize {
        // panic on unrecognized tags
        self.tagged_locations.get(tag).copied().unwrap()
    }

    fn data_for(&mut self, tag: &str) -> &mut [u8] {
        let offset = self.offset_for(tag);
        &mut self.data[offset..]
    }

    pub fn write_at(&mut self, tag: &str, item: impl Scalar) {
        let data = self.data_for(tag);
        let raw = item.to_raw();
        let new_data: &[u8] = raw.as_ref();

        if data.len() < new_data.len() {
            panic!("not enough room left in buffer for the requested write.");
        }

        for (left, right) in data.iter_mut().zip(new_data) {
            *left = *right
        }
    }

    pub fn font_data(&self) -> FontData<'_> {
        FontData::new(&self.data)
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// UTF-16BE bytes for `s`.
pub fn utf16_be(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// Build a [`BeBuffer`] from a list of items.
///
/// Each item is a scalar literal or identifier, a parenthesized expression,
/// a bracketed list of scalars of one type, or `{value: "label"}` to record
/// the position of a value for a later [`BeBuffer::write_at`].
#[macro_export]
macro_rules! be_buffer {
    ( $( $item:tt ),* $(,)? ) => {{
        let buf = $crate::test_helpers::BeBuffer::new();
        $( let buf = $crate::be_buffer_add!(buf, $item); )*
        buf
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! be_buffer_add {
    ($buf:ident, [$($item:expr),* $(,)?]) => {
        $buf.extend([$($item),*])
    };
    ($buf:ident, {$item:tt : $tag:literal}) => {
        $buf.push_with_tag($item, $tag)
    };
    ($buf:ident, ($item:expr)) => {
        $buf.push($item)
    };
    ($buf:ident, $item:tt) => {
        $buf.push($item)
    };
}
