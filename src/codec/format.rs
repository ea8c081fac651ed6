// Characteristic value format tags.
//
// A tag byte packs two nibbles: the low nibble is the value's byte length,
// the high nibble is its category (1 = unsigned, 2 = signed, 3 = float).

use std::fmt;

use super::bits;
use super::decoder::DecodeError;

/// Numeric category carried in the high nibble of a format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCategory {
    Unsigned,
    Signed,
    Float,
}

/// Format of a characteristic value, as declared by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FormatType {
    Uint8 = 0x11,
    Uint16 = 0x12,
    Uint32 = 0x14,
    Sint8 = 0x21,
    Sint16 = 0x22,
    Sint32 = 0x24,
    /// 16-bit short float: 12-bit mantissa, 4-bit decimal exponent.
    Sfloat = 0x32,
    /// 32-bit float: 24-bit mantissa, 8-bit decimal exponent.
    Float = 0x34,
}

impl FormatType {
    /// Every supported format, in tag order.
    pub const ALL: [FormatType; 8] = [
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Sint8,
        Self::Sint16,
        Self::Sint32,
        Self::Sfloat,
        Self::Float,
    ];

    /// Look up a raw tag byte. Returns `None` for unrecognized tags.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x11 => Some(Self::Uint8),
            0x12 => Some(Self::Uint16),
            0x14 => Some(Self::Uint32),
            0x21 => Some(Self::Sint8),
            0x22 => Some(Self::Sint16),
            0x24 => Some(Self::Sint32),
            0x32 => Some(Self::Sfloat),
            0x34 => Some(Self::Float),
            _ => None,
        }
    }

    /// Raw tag byte.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Number of bytes a value of this format occupies.
    #[inline]
    pub const fn byte_len(self) -> usize {
        bits::type_len(self.tag())
    }

    /// Width in bits.
    #[inline]
    pub const fn bit_width(self) -> u32 {
        (self.byte_len() * 8) as u32
    }

    pub const fn category(self) -> FormatCategory {
        match self {
            Self::Uint8 | Self::Uint16 | Self::Uint32 => FormatCategory::Unsigned,
            Self::Sint8 | Self::Sint16 | Self::Sint32 => FormatCategory::Signed,
            Self::Sfloat | Self::Float => FormatCategory::Float,
        }
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        !matches!(self.category(), FormatCategory::Float)
    }

    /// Lower-case name, as used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Sint8 => "sint8",
            Self::Sint16 => "sint16",
            Self::Sint32 => "sint32",
            Self::Sfloat => "sfloat",
            Self::Float => "float",
        }
    }
}

impl TryFrom<u8> for FormatType {
    type Error = DecodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or(DecodeError::UnsupportedFormat(tag))
    }
}

impl From<FormatType> for u8 {
    fn from(format: FormatType) -> u8 {
        format.tag()
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
