// Characteristic Presentation Format descriptor (GATT descriptor 0x2904).
//
// The descriptor tells a client how to render a characteristic value:
// its format code, a decimal exponent, a unit, and an optional
// description within a namespace.
//
// # Modules
//
// - `format`       — Presentation format codes
// - `units`        — SIG unit symbols
// - `descriptions` — SIG namespace descriptions

pub mod descriptions;
pub mod format;
pub mod units;

pub use format::{CharacteristicFormat, FormatShape};

use crate::codec::DecodeError;

/// 128-bit UUID of the presentation format descriptor.
pub const PRESENTATION_FORMAT_UUID: &str = "00002904-0000-1000-8000-00805F9B34FB";

/// Encoded size of the descriptor value.
pub const DESCRIPTOR_LEN: usize = 7;

/// Parsed presentation format descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationFormat {
    pub format: CharacteristicFormat,
    /// Decimal exponent: rendered value = raw * 10^exponent.
    pub exponent: i8,
    /// SIG unit UUID (16-bit).
    pub unit: u16,
    pub namespace: u8,
    pub description: u16,
}

impl PresentationFormat {
    /// Parse the 7-byte little-endian descriptor value.
    ///
    /// Layout: format (u8), exponent (i8), unit (u16), namespace (u8),
    /// description (u16). Trailing bytes are ignored.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        let [format, exponent, u0, u1, namespace, d0, d1] = *bytes
            .first_chunk::<DESCRIPTOR_LEN>()
            .ok_or(DecodeError::TruncatedBuffer {
                offset: 0,
                needed: DESCRIPTOR_LEN,
                len: bytes.len(),
            })?;

        let parsed = Self {
            format: CharacteristicFormat::from_code(format),
            exponent: exponent as i8,
            unit: u16::from_le_bytes([u0, u1]),
            namespace,
            description: u16::from_le_bytes([d0, d1]),
        };
        if !parsed.is_valid() {
            log::debug!("presentation format: unassigned format code {format:#04X}");
        }
        log::trace!("presentation format: {parsed:?}");
        Ok(parsed)
    }

    /// `false` when the format code is unassigned.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.format != CharacteristicFormat::Unknown
    }

    pub fn unit_symbol(&self) -> Option<&'static str> {
        units::unit_symbol(self.unit)
    }

    /// Description text; only SIG-namespace descriptions are resolved.
    pub fn description_text(&self) -> Option<String> {
        if self.namespace == descriptions::SIG_NAMESPACE {
            descriptions::description_text(self.description)
        } else {
            None
        }
    }

    /// Render a characteristic value according to this descriptor.
    ///
    /// Numbers are scaled by the exponent and printed as plain decimals.
    /// A unit symbol and a description are appended when known, e.g.
    /// `"21.5 °C (inside)"`. Returns `None` for formats without a renderer
    /// or when `value` is shorter than the format's width.
    pub fn format_value(&self, value: &[u8]) -> Option<String> {
        let mut out = self.render(value)?;
        if let Some(unit) = self.unit_symbol() {
            out.push(' ');
            out.push_str(unit);
        }
        if let Some(description) = self.description_text() {
            out.push_str(" (");
            out.push_str(&description);
            out.push(')');
        }
        Some(out)
    }

    fn render(&self, value: &[u8]) -> Option<String> {
        let fixed = match self.format.byte_len() {
            Some(len) => Some(value.get(..len)?),
            None => None,
        };

        match (self.format.shape(), fixed) {
            (FormatShape::Bool, Some(b)) => Some((b[0] == 1).to_string()),
            (FormatShape::Unsigned(bits), Some(b)) => {
                let raw = le_bits(b, bits);
                Some(scaled_decimal(false, raw, self.exponent))
            }
            (FormatShape::Signed(bits), Some(b)) => {
                let signed = sign_extend_wide(le_bits(b, bits), bits);
                Some(scaled_decimal(signed < 0, signed.unsigned_abs(), self.exponent))
            }
            (FormatShape::Ieee32, Some(b)) => {
                Some(f32::from_le_bytes(b.try_into().ok()?).to_string())
            }
            (FormatShape::Ieee64, Some(b)) => {
                Some(f64::from_le_bytes(b.try_into().ok()?).to_string())
            }
            (FormatShape::Utf8, _) => Some(String::from_utf8_lossy(value).into_owned()),
            (FormatShape::Utf16, _) => Some(decode_utf16_bom(value)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Display fallback
// ---------------------------------------------------------------------------

/// Text shown for a characteristic value.
///
/// Uses the presentation descriptor when there is one and it can render
/// `value`. Otherwise the value is shown as text if it is valid UTF-8, and
/// as lowercase hex if it is not.
pub fn display_value(descriptor: Option<&PresentationFormat>, value: &[u8]) -> String {
    if let Some(text) = descriptor.and_then(|pf| pf.format_value(value)) {
        return text;
    }
    match std::str::from_utf8(value) {
        Ok(text) => text.to_owned(),
        Err(e) => {
            log::debug!("value is not UTF-8 ({e}), showing hex");
            hex_string(value)
        }
    }
}

fn hex_string(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

/// Little-endian assembly of up to 16 bytes, masked to `bits`.
fn le_bits(bytes: &[u8], bits: u32) -> u128 {
    let raw = bytes
        .iter()
        .rev()
        .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
    if bits >= 128 {
        raw
    } else {
        raw & ((1u128 << bits) - 1)
    }
}

/// Two's-complement view of the low `bits` bits of `raw`.
fn sign_extend_wide(raw: u128, bits: u32) -> i128 {
    let shift = 128 - bits;
    ((raw << shift) as i128) >> shift
}

/// Render `±magnitude * 10^exponent` as a plain decimal string.
///
/// Negative exponents keep their trailing zeros (`150` with exponent `-2`
/// is `"1.50"`), since they carry the declared precision. The exponent is
/// a power of ten, not a decimal scale: `2150` with exponent `-2` is `"21.50"`.
fn scaled_decimal(negative: bool, magnitude: u128, exponent: i8) -> String {
    let mut digits = magnitude.to_string();
    let exp = i32::from(exponent);

    if exp > 0 && magnitude != 0 {
        digits.extend(std::iter::repeat_n('0', exp as usize));
    } else if exp < 0 {
        let frac = exp.unsigned_abs() as usize;
        if digits.len() <= frac {
            let pad = frac + 1 - digits.len();
            digits.insert_str(0, &"0".repeat(pad));
        }
        digits.insert(digits.len() - frac, '.');
    }

    if negative && magnitude != 0 {
        digits.insert(0, '-');
    }
    digits
}

/// UTF-16 with optional byte-order mark; big-endian when no BOM is present.
fn decode_utf16_bom(bytes: &[u8]) -> String {
    let (little_endian, body) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };

    let chunks = body.chunks_exact(2);
    let odd_tail = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| {
        let pair = [pair[0], pair[1]];
        if little_endian {
            u16::from_le_bytes(pair)
        } else {
            u16::from_be_bytes(pair)
        }
    });

    let mut out: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if odd_tail {
        out.push(char::REPLACEMENT_CHARACTER);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(format: CharacteristicFormat, exponent: i8, unit: u16) -> PresentationFormat {
        PresentationFormat {
            format,
            exponent,
            unit,
            namespace: 0,
            description: 0,
        }
    }

    #[test]
    fn parse_layout() {
        // sint16, exponent -2, degrees Celsius, SIG namespace, "inside"
        let bytes = [0x0E, 0xFE, 0x2F, 0x27, 0x01, 0x0B, 0x01];
        let pf = PresentationFormat::parse(&bytes).unwrap();
        assert_eq!(pf.format, CharacteristicFormat::Int16);
        assert_eq!(pf.exponent, -2);
        assert_eq!(pf.unit, 0x272F);
        assert_eq!(pf.namespace, 0x01);
        assert_eq!(pf.description, 0x010B);
        assert!(pf.is_valid());

        let value = 2150i16.to_le_bytes();
        assert_eq!(pf.format_value(&value).as_deref(), Some("21.50 °C (inside)"));
    }

    #[test]
    fn parse_short_descriptor() {
        assert_eq!(
            PresentationFormat::parse(&[0x04, 0x00, 0x00]),
            Err(DecodeError::TruncatedBuffer {
                offset: 0,
                needed: 7,
                len: 3
            })
        );
    }

    #[test]
    fn unknown_format_renders_nothing() {
        let pf = PresentationFormat::parse(&[0xF0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(!pf.is_valid());
        assert_eq!(pf.format_value(&[1, 2, 3]), None);
    }

    #[test]
    fn description_requires_sig_namespace() {
        let mut pf = descriptor(CharacteristicFormat::Uint8, 0, 0);
        pf.description = 0x0001;
        pf.namespace = 0x02;
        assert_eq!(pf.format_value(&[7]).as_deref(), Some("7"));
        pf.namespace = 0x01;
        assert_eq!(pf.format_value(&[7]).as_deref(), Some("7 (first)"));
    }

    #[test]
    fn booleans() {
        let pf = descriptor(CharacteristicFormat::Bool, 0, 0);
        assert_eq!(pf.format_value(&[1]).as_deref(), Some("true"));
        assert_eq!(pf.format_value(&[2]).as_deref(), Some("false"));
        assert_eq!(pf.format_value(&[]), None);
    }

    #[test]
    fn unsigned_scaling() {
        let pf = descriptor(CharacteristicFormat::Uint16, 2, 0x2701);
        assert_eq!(pf.format_value(&[0x0C, 0x00]).as_deref(), Some("1200 m"));
        let pf = descriptor(CharacteristicFormat::Uint8, -3, 0);
        assert_eq!(pf.format_value(&[5]).as_deref(), Some("0.005"));
        let pf = descriptor(CharacteristicFormat::Uint32, 0, 0x27AD);
        assert_eq!(
            pf.format_value(&[0xFF, 0xFF, 0xFF, 0xFF]).as_deref(),
            Some("4294967295 %")
        );
        let pf = descriptor(CharacteristicFormat::Uint64, 0, 0);
        assert_eq!(
            pf.format_value(&[0xFF; 8]).as_deref(),
            Some("18446744073709551615")
        );
    }

    #[test]
    fn narrow_formats_are_masked() {
        let pf = descriptor(CharacteristicFormat::Uint4, 0, 0);
        assert_eq!(pf.format_value(&[0xF3]).as_deref(), Some("3"));
        let pf = descriptor(CharacteristicFormat::Int12, 0, 0);
        assert_eq!(pf.format_value(&[0x00, 0xF8]).as_deref(), Some("-2048"));
        let pf = descriptor(CharacteristicFormat::Uint24, 0, 0);
        assert_eq!(pf.format_value(&[0x01, 0x00, 0x01]).as_deref(), Some("65537"));
    }

    #[test]
    fn signed_scaling() {
        let pf = descriptor(CharacteristicFormat::Int8, -1, 0);
        assert_eq!(pf.format_value(&[0xFB]).as_deref(), Some("-0.5"));
        let pf = descriptor(CharacteristicFormat::Int64, 0, 0);
        assert_eq!(
            pf.format_value(&i64::MIN.to_le_bytes()).as_deref(),
            Some("-9223372036854775808")
        );
        let pf = descriptor(CharacteristicFormat::Int48, 0, 0);
        assert_eq!(pf.format_value(&[0xFF; 6]).as_deref(), Some("-1"));
        let pf = descriptor(CharacteristicFormat::Int16, 3, 0);
        assert_eq!(pf.format_value(&[0, 0]).as_deref(), Some("0"));
    }

    #[test]
    fn short_value_is_rejected() {
        let pf = descriptor(CharacteristicFormat::Uint32, 0, 0);
        assert_eq!(pf.format_value(&[1, 2, 3]), None);
        // Longer values use the leading bytes.
        assert_eq!(pf.format_value(&[1, 0, 0, 0, 9]).as_deref(), Some("1"));
    }

    #[test]
    fn ieee_floats() {
        let pf = descriptor(CharacteristicFormat::Float32, 0, 0);
        assert_eq!(pf.format_value(&1.5f32.to_le_bytes()).as_deref(), Some("1.5"));
        let pf = descriptor(CharacteristicFormat::Float64, 0, 0x2728);
        assert_eq!(
            pf.format_value(&(-0.25f64).to_le_bytes()).as_deref(),
            Some("-0.25 V")
        );
    }

    #[test]
    fn text_formats() {
        let pf = descriptor(CharacteristicFormat::Utf8, 0, 0);
        assert_eq!(pf.format_value(b"hello").as_deref(), Some("hello"));
        assert_eq!(pf.format_value(b"").as_deref(), Some(""));

        let pf = descriptor(CharacteristicFormat::Utf16, 0, 0);
        assert_eq!(pf.format_value(&[0x00, 0x41, 0x00, 0x42]).as_deref(), Some("AB"));
        assert_eq!(pf.format_value(&[0xFF, 0xFE, 0x41, 0x00]).as_deref(), Some("A"));
        assert_eq!(pf.format_value(&[0xFE, 0xFF, 0x00, 0x41]).as_deref(), Some("A"));
        assert_eq!(
            pf.format_value(&[0x00, 0x41, 0x00]).as_deref(),
            Some("A\u{FFFD}")
        );
    }

    #[test]
    fn opaque_formats() {
        for format in [
            CharacteristicFormat::Uint128,
            CharacteristicFormat::Int128,
            CharacteristicFormat::MedFloat16,
            CharacteristicFormat::Struct,
        ] {
            assert_eq!(descriptor(format, 0, 0).format_value(&[0; 16]), None);
        }
    }

    #[test]
    fn display_prefers_descriptor() {
        let pf = descriptor(CharacteristicFormat::Uint8, 0, 0x27AD);
        assert_eq!(display_value(Some(&pf), &[42]), "42 %");
    }

    #[test]
    fn display_falls_back_to_text_then_hex() {
        assert_eq!(display_value(None, b"Reach"), "Reach");
        assert_eq!(display_value(None, &[]), "");
        assert_eq!(display_value(None, &[0xFF, 0x01, 0xAB]), "ff01ab");
        // Truncated multi-byte sequence is not text.
        assert_eq!(display_value(None, &[0x41, 0xC3]), "41c3");
    }

    #[test]
    fn unrenderable_descriptor_falls_through() {
        let pf = descriptor(CharacteristicFormat::Struct, 0, 0);
        assert_eq!(display_value(Some(&pf), b"ok"), "ok");
        let pf = descriptor(CharacteristicFormat::Uint32, 0, 0);
        assert_eq!(display_value(Some(&pf), &[0x00, 0x80]), "0080");
    }

    #[test]
    fn decimal_rendering() {
        assert_eq!(scaled_decimal(false, 150, -2), "1.50");
        assert_eq!(scaled_decimal(false, 2150, -2), "21.50");
        assert_eq!(scaled_decimal(true, 5, -3), "-0.005");
        assert_eq!(scaled_decimal(false, 0, -2), "0.00");
        assert_eq!(scaled_decimal(false, 7, 3), "7000");
        assert_eq!(scaled_decimal(true, 0, 0), "0");
    }
}
