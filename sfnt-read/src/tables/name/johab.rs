//! Decoding for the Korean Johab (KS X 1001 annex 3) encoding.
//!
//! Hangul is composed arithmetically from the three 5-bit jamo fields of each
//! code. Symbols and hanja occupy the same rows as in Wansung (EUC-KR) and are
//! decoded by moving them to their Wansung position.

use super::encoding::decode_without_replacement;

const FILL_INITIAL: u8 = 1;
const FILL_MEDIAL: u8 = 2;
const FILL_FINAL: u8 = 1;

/// Compatibility jamo for each initial consonant index.
#[rustfmt::skip]
static INITIAL_JAMO: [u16; 19] = [
    0x3131, 0x3132, 0x3134, 0x3137, 0x3138, 0x3139, 0x3141, 0x3142, 0x3143,
    0x3145, 0x3146, 0x3147, 0x3148, 0x3149, 0x314A, 0x314B, 0x314C, 0x314D,
    0x314E,
];

/// Compatibility jamo for each final consonant index, starting at 1.
#[rustfmt::skip]
static FINAL_JAMO: [u16; 27] = [
    0x3131, 0x3132, 0x3133, 0x3134, 0x3135, 0x3136, 0x3137, 0x3139, 0x313A,
    0x313B, 0x313C, 0x313D, 0x313E, 0x313F, 0x3140, 0x3141, 0x3142, 0x3144,
    0x3145, 0x3146, 0x3147, 0x3148, 0x314A, 0x314B, 0x314C, 0x314D, 0x314E,
];

/// Decode a Johab byte string, or `None` if it is malformed.
pub(crate) fn decode(bytes: &[u8]) -> Option<String> {
    let mut out = String::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied();
    while let Some(lead) = iter.next() {
        if lead < 0x80 {
            out.push(lead as char);
            continue;
        }
        let trail = iter.next()?;
        match lead {
            0x84..=0xD3 => out.push(hangul(u16::from_be_bytes([lead, trail]))?),
            _ => out.push_str(&symbol_or_hanja(lead, trail)?),
        }
    }
    Some(out)
}

fn initial_index(bits: u8) -> Option<Option<u16>> {
    match bits {
        FILL_INITIAL => Some(None),
        2..=20 => Some(Some((bits - 2) as u16)),
        _ => None,
    }
}

fn medial_index(bits: u8) -> Option<Option<u16>> {
    let index = match bits {
        FILL_MEDIAL => return Some(None),
        3..=7 => bits - 3,
        10..=15 => bits - 5,
        18..=23 => bits - 7,
        26..=29 => bits - 9,
        _ => return None,
    };
    Some(Some(index as u16))
}

fn final_index(bits: u8) -> Option<Option<u16>> {
    let index = match bits {
        FILL_FINAL => return Some(None),
        2..=17 => bits - 1,
        19..=29 => bits - 2,
        _ => return None,
    };
    Some(Some(index as u16))
}

fn hangul(code: u16) -> Option<char> {
    let initial = initial_index(((code >> 10) & 0x1F) as u8)?;
    let medial = medial_index(((code >> 5) & 0x1F) as u8)?;
    let final_ = final_index((code & 0x1F) as u8)?;
    let scalar = match (initial, medial, final_) {
        (Some(l), Some(v), t) => 0xAC00 + (l * 21 + v) * 28 + t.unwrap_or(0),
        // a lone jamo maps to its compatibility form
        (Some(l), None, None) => INITIAL_JAMO[l as usize],
        (None, Some(v), None) => 0x314F + v,
        (None, None, Some(t)) => FINAL_JAMO[t as usize - 1],
        _ => return None,
    };
    char::from_u32(scalar as u32)
}

fn symbol_or_hanja(lead: u8, trail: u8) -> Option<String> {
    let valid_lead = matches!(lead, 0xD9..=0xDE | 0xE0..=0xF9);
    let valid_trail = matches!(trail, 0x31..=0x7E | 0x91..=0xFE);
    // these are the Hangul jamo in Wansung, which Johab encodes as Hangul
    let jamo_row = lead == 0xDA && (0xA1..=0xD3).contains(&trail);
    if !valid_lead || !valid_trail || jamo_row {
        return None;
    }
    let t1 = if lead < 0xE0 {
        2 * (lead - 0xD9)
    } else {
        (2 * lead as u16 - 0x197) as u8
    };
    let t2 = if trail < 0x91 {
        trail - 0x31
    } else {
        trail - 0x43
    };
    let row = t1 + u8::from(t2 >= 0x5E) + 0x21;
    let cell = (t2 % 0x5E) + 0x21;
    decode_without_replacement(encoding_rs::EUC_KR, &[row | 0x80, cell | 0x80])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangul_syllables() {
        assert_eq!(decode(&[0x88, 0x61]).as_deref(), Some("가"));
        assert_eq!(decode(&[0xD0, 0x65]).as_deref(), Some("한"));
        assert_eq!(decode(&[0x41, 0x88, 0x61, 0x42]).as_deref(), Some("A가B"));
    }

    #[test]
    fn lone_jamo() {
        // initial ㄱ with medial and final fill
        assert_eq!(decode(&[0x88, 0x41]).as_deref(), Some("\u{3131}"));
        // medial ㅏ alone
        assert_eq!(decode(&[0x84, 0x61]).as_deref(), Some("\u{314F}"));
    }

    #[test]
    fn malformed() {
        // truncated
        assert_eq!(decode(&[0x88]), None);
        // final index 18 is unassigned
        assert_eq!(decode(&[0x88, 0x72]), None);
        // lead byte outside every range
        assert_eq!(decode(&[0xDF, 0x31]), None);
        // Wansung jamo row
        assert_eq!(decode(&[0xDA, 0xA1]), None);
    }

    #[test]
    fn symbols() {
        // the first Wansung symbol, U+3000 IDEOGRAPHIC SPACE
        assert_eq!(decode(&[0xD9, 0x31]).as_deref(), Some("\u{3000}"));
    }
}
