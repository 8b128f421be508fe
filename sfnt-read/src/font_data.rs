//! raw font bytes

use std::ops::{Range, RangeBounds};

use types::{FixedSize, Scalar};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data. Every read takes an explicit
/// offset and is bounds checked; nothing is read past the end of the slice.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A cursor for validating bytes during parsing.
///
/// The position is local to whichever function is decoding; the underlying
/// [`FontData`] is never modified.
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the data starting at `pos`, or `None` if `pos` is past the end.
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(FontData::new)
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(FontData::new)
    }

    /// Read a scalar at `offset`.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Return the bytes in `range`.
    pub fn read_bytes(&self, range: Range<usize>) -> Result<&'a [u8], ReadError> {
        self.bytes.get(range).ok_or(ReadError::OutOfBounds)
    }

    /// Interpret the bytes in `range` as a slice of fixed-size records.
    pub fn read_array<T: bytemuck::AnyBitPattern>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self.read_bytes(range)?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::InvalidArrayLen)
    }

    pub(crate) fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// The end of a range of `count` items of `item_len` bytes starting at
/// `start`, or `OutOfBounds` on overflow.
pub(crate) fn array_end(start: usize, count: usize, item_len: usize) -> Result<usize, ReadError> {
    count
        .checked_mul(item_len)
        .and_then(|len| start.checked_add(len))
        .ok_or(ReadError::OutOfBounds)
}

impl<'a> Cursor<'a> {
    pub(crate) fn advance<T: Scalar>(&mut self) {
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
    }

    pub(crate) fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    pub(crate) fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.advance::<T>();
        temp
    }

    pub(crate) fn read_array<T: bytemuck::AnyBitPattern>(
        &mut self,
        len: usize,
    ) -> Result<&'a [T], ReadError> {
        let end = array_end(self.pos, len, std::mem::size_of::<T>())?;
        let temp = self.data.read_array(self.pos..end);
        self.pos = end;
        temp
    }

    /// return the current position, or an error if we are out of bounds
    pub(crate) fn position(&self) -> Result<usize, ReadError> {
        if self.pos <= self.data.len() {
            Ok(self.pos)
        } else {
            Err(ReadError::OutOfBounds)
        }
    }

    pub(crate) fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{BigEndian, Tag};

    #[test]
    fn reads_are_bounds_checked() {
        let data = FontData::new(&[0x00, 0x01, 0x00, 0x00, 0xFF]);
        assert_eq!(data.read_at::<u32>(0), Ok(0x0001_0000));
        assert_eq!(data.read_at::<u8>(4), Ok(0xFF));
        assert_eq!(data.read_at::<u16>(4), Err(ReadError::OutOfBounds));
        assert_eq!(data.read_at::<u16>(usize::MAX), Err(ReadError::OutOfBounds));
        assert_eq!(data.read_at::<i16>(3), Ok(0x00FF));
        assert!(data.read_bytes(2..6).is_err());
        assert!(data.split_off(6).is_none());
    }

    #[test]
    fn signed_and_wide_reads() {
        let data = FontData::new(&[0xFF, 0x9C, 0, 0, 0, 0, 0, 0, 0, 0x65]);
        assert_eq!(data.read_at::<i16>(0), Ok(-100));
        assert_eq!(data.read_at::<u64>(2), Ok(0x65));
        assert_eq!(data.read_at::<i64>(2), Ok(0x65));
        assert_eq!(data.read_at::<u64>(3), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn tag_reads() {
        let data = FontData::new(b"\0ttcf");
        assert_eq!(data.read_at::<Tag>(1), Ok(Tag::new(b"ttcf")));
        assert!(data.read_at::<Tag>(2).is_err());
    }

    #[test]
    fn cursor_arrays() {
        let bytes = [0u8, 1, 0, 2, 0, 3, 9];
        let data = FontData::new(&bytes);
        let mut cursor = data.cursor();
        let arr: &[BigEndian<u16>] = cursor.read_array(3).unwrap();
        assert_eq!(arr.iter().map(|x| x.get()).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(cursor.remaining_bytes(), 1);
        assert!(cursor.read_array::<BigEndian<u16>>(1).is_err());
        assert!(cursor.position().is_err());
    }
}
