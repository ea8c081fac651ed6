// Characteristic value decoding: integers, short floats and strings.
//
// Every entry point comes in two shapes:
//   - `try_decode_*` returns `Result<_, DecodeError>` naming why no value
//     could be produced;
//   - `decode_*` returns `Option<_>`, treating every failure as "value
//     unavailable for this read".
//
// Nothing here panics, allocates beyond the returned value, or keeps state.

use super::bits::{
    unsigned_byte_to_int, unsigned_bytes_to_int16, unsigned_bytes_to_int24,
    unsigned_bytes_to_int32, unsigned_to_signed,
};
use super::format::{FormatCategory, FormatType};

// ---------------------------------------------------------------------------
// Decode error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The value would extend past the end of the buffer.
    #[error("truncated buffer: need {needed} byte(s) at offset {offset}, buffer has {len}")]
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        len: usize,
    },
    /// The format tag is unknown, or not valid for the requested decode.
    #[error("unsupported format tag {0:#04X}")]
    UnsupportedFormat(u8),
    /// No buffer was supplied.
    #[error("missing buffer")]
    MissingBuffer,
}

/// Borrow `needed` bytes at `offset`, or report truncation.
#[inline]
fn window(buf: &[u8], offset: usize, needed: usize) -> Result<&[u8], DecodeError> {
    offset
        .checked_add(needed)
        .and_then(|end| buf.get(offset..end))
        .ok_or(DecodeError::TruncatedBuffer {
            offset,
            needed,
            len: buf.len(),
        })
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

/// Decode an integer of `format` starting at `offset`.
///
/// Unsigned formats yield the plain little-endian value (`UINT32` may exceed
/// `i32::MAX`); signed formats are reinterpreted as two's complement over
/// their bit width. Float formats are rejected with `UnsupportedFormat`.
pub fn try_decode_int(buf: &[u8], format: FormatType, offset: usize) -> Result<i64, DecodeError> {
    if !format.is_integer() {
        return Err(DecodeError::UnsupportedFormat(format.tag()));
    }
    let b = window(buf, offset, format.byte_len())?;

    let unsigned = match *b {
        [b0] => unsigned_byte_to_int(b0),
        [b0, b1] => unsigned_bytes_to_int16(b0, b1),
        [b0, b1, b2, b3] => unsigned_bytes_to_int32(b0, b1, b2, b3),
        _ => return Err(DecodeError::UnsupportedFormat(format.tag())),
    };

    Ok(match format.category() {
        FormatCategory::Signed => i64::from(unsigned_to_signed(unsigned, format.bit_width())),
        _ => i64::from(unsigned),
    })
}

/// [`try_decode_int`] with failures collapsed to `None`.
#[inline]
pub fn decode_int(buf: &[u8], format: FormatType, offset: usize) -> Option<i64> {
    try_decode_int(buf, format, offset).ok()
}

/// Decode an integer given a raw tag byte.
pub fn decode_int_tag(buf: &[u8], tag: u8, offset: usize) -> Option<i64> {
    FormatType::from_tag(tag).and_then(|format| decode_int(buf, format, offset))
}

// ---------------------------------------------------------------------------
// Floats
// ---------------------------------------------------------------------------

/// Decode an `SFLOAT` or `FLOAT` value starting at `offset`.
///
/// Both formats are `mantissa * 10^exponent`, but they read the exponent
/// differently:
/// - `SFLOAT`: 12-bit mantissa (byte 0 + low nibble of byte 1), exponent is
///   the high nibble of byte 1 sign-extended over 4 bits.
/// - `FLOAT`: 24-bit mantissa (bytes 0..3), exponent is byte 3 taken as a
///   plain `i8`.
pub fn try_decode_float(buf: &[u8], format: FormatType, offset: usize) -> Result<f32, DecodeError> {
    match format {
        FormatType::Sfloat => {
            let b = window(buf, offset, format.byte_len())?;
            Ok(sfloat_from_bytes(b[0], b[1]))
        }
        FormatType::Float => {
            let b = window(buf, offset, format.byte_len())?;
            Ok(float_from_bytes(b[0], b[1], b[2], b[3]))
        }
        _ => Err(DecodeError::UnsupportedFormat(format.tag())),
    }
}

/// [`try_decode_float`] with failures collapsed to `None`.
#[inline]
pub fn decode_float(buf: &[u8], format: FormatType, offset: usize) -> Option<f32> {
    try_decode_float(buf, format, offset).ok()
}

/// Decode a float given a raw tag byte.
pub fn decode_float_tag(buf: &[u8], tag: u8, offset: usize) -> Option<f32> {
    FormatType::from_tag(tag).and_then(|format| decode_float(buf, format, offset))
}

fn sfloat_from_bytes(b0: u8, b1: u8) -> f32 {
    let mantissa = unsigned_to_signed(
        unsigned_byte_to_int(b0) + ((unsigned_byte_to_int(b1) & 0x0F) << 8),
        12,
    );
    let exponent = unsigned_to_signed(unsigned_byte_to_int(b1) >> 4, 4);
    scale(mantissa, exponent)
}

fn float_from_bytes(b0: u8, b1: u8, b2: u8, b3: u8) -> f32 {
    let mantissa = unsigned_to_signed(unsigned_bytes_to_int24(b0, b1, b2), 24);
    // Exponent byte is a raw i8, not sign-extended through the helper.
    let exponent = i32::from(b3 as i8);
    scale(mantissa, exponent)
}

#[inline]
fn scale(mantissa: i32, exponent: i32) -> f32 {
    (f64::from(mantissa) * 10f64.powi(exponent)) as f32
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Decode the bytes from `offset` to the end of the buffer as UTF-8.
///
/// `offset == buf.len()` yields an empty string; only `offset > buf.len()`
/// is truncation. Malformed sequences are replaced with U+FFFD.
pub fn try_decode_string(buf: Option<&[u8]>, offset: usize) -> Result<String, DecodeError> {
    let buf = buf.ok_or(DecodeError::MissingBuffer)?;
    let tail = buf.get(offset..).ok_or(DecodeError::TruncatedBuffer {
        offset,
        needed: 0,
        len: buf.len(),
    })?;
    Ok(String::from_utf8_lossy(tail).into_owned())
}

/// [`try_decode_string`] on a present buffer, failures collapsed to `None`.
#[inline]
pub fn decode_string(buf: &[u8], offset: usize) -> Option<String> {
    try_decode_string(Some(buf), offset).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= f32::EPSILON * b.abs().max(1.0)
    }

    #[test]
    fn signed_bytes() {
        assert_eq!(decode_int(&[0xFF], FormatType::Sint8, 0), Some(-1));
        assert_eq!(decode_int(&[0x80], FormatType::Sint8, 0), Some(-128));
        assert_eq!(decode_int(&[0x7F], FormatType::Sint8, 0), Some(127));
        assert_eq!(decode_int(&[0x00, 0x80], FormatType::Sint16, 0), Some(-32768));
        assert_eq!(
            decode_int(&[0x00, 0x00, 0x00, 0x80], FormatType::Sint32, 0),
            Some(i64::from(i32::MIN))
        );
    }

    #[test]
    fn unsigned_values() {
        assert_eq!(decode_int(&[0x01, 0x00], FormatType::Uint16, 0), Some(1));
        assert_eq!(decode_int(&[0xFF, 0xFF], FormatType::Uint16, 0), Some(65535));
        assert_eq!(
            decode_int(&[0x01, 0x00, 0x00, 0x00], FormatType::Uint32, 0),
            Some(1)
        );
        assert_eq!(
            decode_int(&[0xFF, 0xFF, 0xFF, 0xFF], FormatType::Uint32, 0),
            Some(i64::from(u32::MAX))
        );
    }

    #[test]
    fn offset_boundary() {
        let buf = [0xAA, 0x34, 0x12];
        assert_eq!(decode_int(&buf, FormatType::Uint16, 1), Some(0x1234));
        assert_eq!(
            try_decode_int(&buf, FormatType::Uint16, 2),
            Err(DecodeError::TruncatedBuffer {
                offset: 2,
                needed: 2,
                len: 3
            })
        );
        assert_eq!(decode_int(&buf, FormatType::Uint8, usize::MAX), None);
    }

    #[test]
    fn int_rejects_float_formats() {
        assert_eq!(
            try_decode_int(&[0; 4], FormatType::Float, 0),
            Err(DecodeError::UnsupportedFormat(0x34))
        );
        assert_eq!(decode_int_tag(&[0; 4], 0x13, 0), None);
        assert_eq!(decode_int_tag(&[0x05], 0x11, 0), Some(5));
    }

    #[test]
    fn sfloat_values() {
        assert_eq!(decode_float(&[0x00, 0x00], FormatType::Sfloat, 0), Some(0.0));
        // mantissa 0x072, exponent -1 -> 11.4
        let v = decode_float(&[0x72, 0xF0], FormatType::Sfloat, 0).unwrap();
        assert!(approx(v, 11.4), "{v}");
        // mantissa -1 (0xFFF), exponent 2 -> -100
        let v = decode_float(&[0xFF, 0x2F], FormatType::Sfloat, 0).unwrap();
        assert!(approx(v, -100.0), "{v}");
    }

    #[test]
    fn float_values() {
        let v = decode_float(&[0x01, 0x00, 0x00, 0x00], FormatType::Float, 0).unwrap();
        assert_eq!(v, 1.0);
        let v = decode_float(&[0x01, 0x00, 0x00, 0xFF], FormatType::Float, 0).unwrap();
        assert!(approx(v, 0.1), "{v}");
        // mantissa -1 (0xFFFFFF), exponent 3 -> -1000
        let v = decode_float(&[0xFF, 0xFF, 0xFF, 0x03], FormatType::Float, 0).unwrap();
        assert!(approx(v, -1000.0), "{v}");
    }

    #[test]
    fn float_exponent_byte_is_raw_i8() {
        // 0x08 is +8 as an i8 but would be -8 if sign-extended over 4 bits.
        let v = decode_float(&[0x01, 0x00, 0x00, 0x08], FormatType::Float, 0).unwrap();
        assert!(approx(v, 1e8), "{v}");
        // 0x80 is -128 as an i8: underflows to zero in single precision.
        let v = decode_float(&[0x01, 0x00, 0x00, 0x80], FormatType::Float, 0).unwrap();
        assert_eq!(v, 0.0);
    }

    #[test]
    fn float_rejects_integer_formats() {
        assert_eq!(
            try_decode_float(&[0; 4], FormatType::Uint32, 0),
            Err(DecodeError::UnsupportedFormat(0x14))
        );
        assert_eq!(decode_float_tag(&[0; 2], 0x33, 0), None);
        assert_eq!(decode_float(&[0x00], FormatType::Sfloat, 0), None);
        assert_eq!(decode_float(&[0; 4], FormatType::Float, 1), None);
    }

    #[test]
    fn strings() {
        let abc = [0x41, 0x42, 0x43];
        assert_eq!(decode_string(&abc, 0).as_deref(), Some("ABC"));
        assert_eq!(decode_string(&abc, 1).as_deref(), Some("BC"));
        assert_eq!(decode_string(&abc, 3).as_deref(), Some(""));
        assert_eq!(decode_string(&[0x41], 2), None);
        assert_eq!(try_decode_string(None, 0), Err(DecodeError::MissingBuffer));
    }

    #[test]
    fn strings_replace_invalid_utf8() {
        assert_eq!(
            decode_string(&[0x61, 0xFF, 0x62], 0).as_deref(),
            Some("a\u{FFFD}b")
        );
        assert_eq!(
            decode_string("héllo".as_bytes(), 0).as_deref(),
            Some("héllo")
        );
    }

    #[test]
    fn error_messages() {
        let e = DecodeError::TruncatedBuffer {
            offset: 3,
            needed: 4,
            len: 5,
        };
        assert_eq!(
            e.to_string(),
            "truncated buffer: need 4 byte(s) at offset 3, buffer has 5"
        );
        assert_eq!(
            DecodeError::UnsupportedFormat(0x13).to_string(),
            "unsupported format tag 0x13"
        );
    }
}
