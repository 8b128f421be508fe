//! Text codecs for Windows platform name records.

use std::fmt::{Display, Formatter};

/// The codec used to decode a Windows platform (3) name string.
///
/// Selected by the record's encoding id; see [`Codec::for_windows_encoding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Codec {
    Utf16Be,
    /// Simplified Chinese (PRC), encoding id 4.
    Gbk,
    /// Traditional Chinese, encoding id 5.
    Big5,
    /// Korean Wansung, encoding id 6.
    EucKr,
    /// Korean Johab, encoding id 7.
    Johab,
}

/// A name string could not be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecodeTextError {
    #[error("malformed {0} text")]
    Malformed(Codec),
    #[error("unsupported codec {0}")]
    Unsupported(Codec),
}

impl Codec {
    /// Choose the codec for a Windows platform encoding id.
    ///
    /// Every encoding id without a legacy codec is treated as UTF-16BE, which
    /// covers Symbol (0), Unicode BMP (1) and Unicode full repertoire (10).
    pub fn for_windows_encoding(encoding_id: u16) -> Codec {
        match encoding_id {
            4 => Codec::Gbk,
            5 => Codec::Big5,
            6 => Codec::EucKr,
            7 => Codec::Johab,
            _ => Codec::Utf16Be,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Codec::Utf16Be => "UTF-16BE",
            Codec::Gbk => "GBK",
            Codec::Big5 => "Big5",
            Codec::EucKr => "EUC-KR",
            Codec::Johab => "Johab",
        }
    }

    /// Decode `bytes`, failing on any malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeTextError> {
        match self {
            Codec::Utf16Be => decode_utf16_be(bytes).ok_or(DecodeTextError::Malformed(self)),
            _ => self.decode_legacy(bytes),
        }
    }

    #[cfg(feature = "legacy-codecs")]
    fn decode_legacy(self, bytes: &[u8]) -> Result<String, DecodeTextError> {
        let bytes = unpad_units(bytes);
        let decoded = match self {
            Codec::Gbk => decode_without_replacement(encoding_rs::GBK, &bytes),
            Codec::Big5 => decode_without_replacement(encoding_rs::BIG5, &bytes),
            Codec::EucKr => decode_without_replacement(encoding_rs::EUC_KR, &bytes),
            Codec::Johab => super::johab::decode(&bytes),
            Codec::Utf16Be => decode_utf16_be(&bytes),
        };
        decoded.ok_or(DecodeTextError::Malformed(self))
    }

    #[cfg(not(feature = "legacy-codecs"))]
    fn decode_legacy(self, _bytes: &[u8]) -> Result<String, DecodeTextError> {
        Err(DecodeTextError::Unsupported(self))
    }
}

impl Display for Codec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Some fonts store legacy strings as 16-bit units, with a zero high byte
/// before each single-byte character; drop those high bytes.
///
/// Data of odd length cannot be in units and is returned unchanged.
#[cfg(feature = "legacy-codecs")]
fn unpad_units(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() % 2 != 0 {
        return bytes.to_vec();
    }
    let mut out = Vec::with_capacity(bytes.len());
    for unit in bytes.chunks_exact(2) {
        if unit[0] != 0 {
            out.push(unit[0]);
        }
        out.push(unit[1]);
    }
    out
}

/// Decode big-endian UTF-16, rejecting odd lengths and unpaired surrogates.
pub(crate) fn decode_utf16_be(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

#[cfg(feature = "legacy-codecs")]
pub(crate) fn decode_without_replacement(
    encoding: &'static encoding_rs::Encoding,
    bytes: &[u8],
) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|cow| cow.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_selection() {
        assert_eq!(Codec::for_windows_encoding(1), Codec::Utf16Be);
        assert_eq!(Codec::for_windows_encoding(0), Codec::Utf16Be);
        assert_eq!(Codec::for_windows_encoding(10), Codec::Utf16Be);
        assert_eq!(Codec::for_windows_encoding(3), Codec::Utf16Be);
        assert_eq!(Codec::for_windows_encoding(4), Codec::Gbk);
        assert_eq!(Codec::for_windows_encoding(5), Codec::Big5);
        assert_eq!(Codec::for_windows_encoding(6), Codec::EucKr);
        assert_eq!(Codec::for_windows_encoding(7), Codec::Johab);
    }

    #[test]
    fn utf16_be() {
        let bytes = [0x00, 0x41, 0xD8, 0x3D, 0xDE, 0x00];
        assert_eq!(Codec::Utf16Be.decode(&bytes).as_deref(), Ok("A\u{1F600}"));
        assert_eq!(Codec::Utf16Be.decode(&[]).as_deref(), Ok(""));
    }

    #[test]
    fn utf16_be_errors() {
        let err = Err(DecodeTextError::Malformed(Codec::Utf16Be));
        // odd length
        assert_eq!(Codec::Utf16Be.decode(&[0x00, 0x41, 0x00]), err);
        // lone high surrogate
        assert_eq!(Codec::Utf16Be.decode(&[0x09, 0x04, 0xD8, 0x00]), err);
        // lone low surrogate
        assert_eq!(Codec::Utf16Be.decode(&[0xDC, 0x00]), err);
    }

    #[test]
    #[cfg(feature = "legacy-codecs")]
    fn legacy_codecs() {
        assert_eq!(
            Codec::Gbk.decode(&[0xD6, 0xD0, 0xCE, 0xC4]).as_deref(),
            Ok("中文")
        );
        assert_eq!(
            Codec::Big5.decode(&[0xA4, 0xA4, 0xA4, 0xE5]).as_deref(),
            Ok("中文")
        );
        assert_eq!(Codec::EucKr.decode(&[0xC7, 0xD1]).as_deref(), Ok("한"));
        // zero-padded single byte characters
        assert_eq!(
            Codec::Gbk.decode(&[0x00, 0x41, 0xD6, 0xD0]).as_deref(),
            Ok("A中")
        );
    }

    #[test]
    #[cfg(feature = "legacy-codecs")]
    fn padded_units_keep_nul() {
        assert_eq!(
            unpad_units(&[0x00, 0x41, 0x00, 0x00, 0xD6, 0xD0]),
            [0x41, 0x00, 0xD6, 0xD0]
        );
        // unpadded double byte text is untouched
        assert_eq!(
            unpad_units(&[0xC7, 0xD1, 0xC7, 0xD1]),
            [0xC7, 0xD1, 0xC7, 0xD1]
        );
        // odd length
        assert_eq!(unpad_units(&[0x41, 0x00, 0x42]), [0x41, 0x00, 0x42]);
        assert_eq!(
            Codec::Gbk.decode(&[0x00, 0x41, 0x00, 0x00, 0xD6, 0xD0]).as_deref(),
            Ok("A\0中")
        );
    }

    #[test]
    #[cfg(feature = "legacy-codecs")]
    fn legacy_malformed() {
        // truncated double-byte sequence
        assert_eq!(
            Codec::Gbk.decode(&[0xD6]),
            Err(DecodeTextError::Malformed(Codec::Gbk))
        );
        assert_eq!(
            Codec::EucKr.decode(&[0xC7]),
            Err(DecodeTextError::Malformed(Codec::EucKr))
        );
    }

    #[test]
    #[cfg(not(feature = "legacy-codecs"))]
    fn legacy_unsupported() {
        assert_eq!(
            Codec::Big5.decode(&[0xA4, 0xA4]),
            Err(DecodeTextError::Unsupported(Codec::Big5))
        );
    }
}
