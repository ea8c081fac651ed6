// GATT characteristic value codec.
//
// # Modules
//
// - `bits`    — Little-endian assembly and two's-complement helpers
// - `format`  — Format tags (width + category)
// - `decoder` — Integer, SFLOAT/FLOAT and string decoding
// - `value`   — Typed values, multi-field records and batches

pub mod bits;
pub mod decoder;
pub mod format;
pub mod value;

// Re-export key types for convenience.
pub use decoder::{
    DecodeError, decode_float, decode_float_tag, decode_int, decode_int_tag, decode_string,
    try_decode_float, try_decode_int, try_decode_string,
};
pub use format::{FormatCategory, FormatType};
pub use value::{Field, FieldKind, Value, decode_batch, decode_field, decode_record, decode_value};
