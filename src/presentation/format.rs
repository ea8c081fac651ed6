// GATT presentation format codes (Characteristic Presentation Format,
// "Format" field).

use std::fmt;

/// Shape of a presentation format, used to pick a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatShape {
    Bool,
    /// Unsigned integer of the given bit width.
    Unsigned(u32),
    /// Two's-complement integer of the given bit width.
    Signed(u32),
    Ieee32,
    Ieee64,
    Utf8,
    Utf16,
    /// Known code without a renderer.
    Opaque,
}

macro_rules! characteristic_formats {
    ($($variant:ident = $code:literal => $name:literal, $shape:expr;)+) => {
        /// Format code carried by a presentation format descriptor.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum CharacteristicFormat {
            $($variant = $code,)+
        }

        impl CharacteristicFormat {
            /// Map a raw code; unassigned codes become `Unknown`.
            pub const fn from_code(code: u8) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    _ => Self::Unknown,
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            pub const fn shape(self) -> FormatShape {
                match self {
                    $(Self::$variant => $shape,)+
                }
            }
        }
    };
}

characteristic_formats! {
    Unknown = 0 => "unknown", FormatShape::Opaque;
    Bool = 1 => "boolean", FormatShape::Bool;
    Uint2 = 2 => "uint2", FormatShape::Unsigned(2);
    Uint4 = 3 => "uint4", FormatShape::Unsigned(4);
    Uint8 = 4 => "uint8", FormatShape::Unsigned(8);
    Uint12 = 5 => "uint12", FormatShape::Unsigned(12);
    Uint16 = 6 => "uint16", FormatShape::Unsigned(16);
    Uint24 = 7 => "uint24", FormatShape::Unsigned(24);
    Uint32 = 8 => "uint32", FormatShape::Unsigned(32);
    Uint48 = 9 => "uint48", FormatShape::Unsigned(48);
    Uint64 = 10 => "uint64", FormatShape::Unsigned(64);
    Uint128 = 11 => "uint128", FormatShape::Opaque;
    Int8 = 12 => "sint8", FormatShape::Signed(8);
    Int12 = 13 => "sint12", FormatShape::Signed(12);
    Int16 = 14 => "sint16", FormatShape::Signed(16);
    Int24 = 15 => "sint24", FormatShape::Signed(24);
    Int32 = 16 => "sint32", FormatShape::Signed(32);
    Int48 = 17 => "sint48", FormatShape::Signed(48);
    Int64 = 18 => "sint64", FormatShape::Signed(64);
    Int128 = 19 => "sint128", FormatShape::Opaque;
    Float32 = 20 => "float32", FormatShape::Ieee32;
    Float64 = 21 => "float64", FormatShape::Ieee64;
    MedFloat16 = 22 => "medfloat16", FormatShape::Opaque;
    MedFloat32 = 23 => "medfloat32", FormatShape::Opaque;
    MedNomCode = 24 => "uint16 [IEEE-11073-20601]", FormatShape::Opaque;
    Utf8 = 25 => "utf8s", FormatShape::Utf8;
    Utf16 = 26 => "utf16s", FormatShape::Utf16;
    Struct = 27 => "struct", FormatShape::Opaque;
}

impl CharacteristicFormat {
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Bytes a fixed-width value occupies; `None` for variable-length or
    /// unrendered formats.
    pub const fn byte_len(self) -> Option<usize> {
        match self.shape() {
            FormatShape::Bool => Some(1),
            FormatShape::Unsigned(bits) | FormatShape::Signed(bits) => {
                Some(bits.div_ceil(8) as usize)
            }
            FormatShape::Ieee32 => Some(4),
            FormatShape::Ieee64 => Some(8),
            FormatShape::Utf8 | FormatShape::Utf16 | FormatShape::Opaque => None,
        }
    }
}

impl From<u8> for CharacteristicFormat {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for CharacteristicFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
