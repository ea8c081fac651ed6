// Typed values and multi-field records.
//
// Many characteristics pack several fields into one read (e.g. a flags
// byte followed by an SFLOAT measurement). A record is described as a list
// of `Field`s, each decoded independently so a short buffer only blanks
// the fields it cannot cover.

use std::fmt;

use super::decoder::{decode_float, decode_int, decode_string};
use super::format::{FormatCategory, FormatType};

/// A decoded characteristic value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f32),
    Text(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// What a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer or float of the given format.
    Number(FormatType),
    /// Text running from the field offset to the end of the buffer.
    Text,
}

/// One field of a multi-field characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    pub offset: usize,
}

impl Field {
    pub const fn number(format: FormatType, offset: usize) -> Self {
        Self {
            kind: FieldKind::Number(format),
            offset,
        }
    }

    pub const fn text(offset: usize) -> Self {
        Self {
            kind: FieldKind::Text,
            offset,
        }
    }
}

/// Decode a number of `format`, choosing integer or float by its category.
pub fn decode_value(buf: &[u8], format: FormatType, offset: usize) -> Option<Value> {
    match format.category() {
        FormatCategory::Unsigned | FormatCategory::Signed => {
            decode_int(buf, format, offset).map(Value::Int)
        }
        FormatCategory::Float => decode_float(buf, format, offset).map(Value::Float),
    }
}

pub fn decode_field(buf: &[u8], field: &Field) -> Option<Value> {
    match field.kind {
        FieldKind::Number(format) => decode_value(buf, format, field.offset),
        FieldKind::Text => decode_string(buf, field.offset).map(Value::Text),
    }
}

/// Decode every field of `fields` from one buffer, in order.
pub fn decode_record(buf: &[u8], fields: &[Field]) -> Vec<Option<Value>> {
    fields.iter().map(|field| decode_field(buf, field)).collect()
}

/// Decode the same record layout from many buffers.
///
/// Output order follows `buffers`. With the `parallel` feature the buffers
/// are spread over the rayon thread pool.
pub fn decode_batch<B>(buffers: &[B], fields: &[Field]) -> Vec<Vec<Option<Value>>>
where
    B: AsRef<[u8]> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        buffers
            .par_iter()
            .map(|buf| decode_record(buf.as_ref(), fields))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        buffers
            .iter()
            .map(|buf| decode_record(buf.as_ref(), fields))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
