//! Gattcodec: Bluetooth LE GATT characteristic value decoding in Rust.
//!
//! The crate provides:
//! - A pure, stateless value codec (`codec`): little-endian integers,
//!   the SFLOAT/FLOAT decimal short floats, and strings
//! - Characteristic Presentation Format descriptors (`presentation`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use gattcodec::codec::{self, FormatType};
//!
//! let temperature = [0x72, 0xF0]; // SFLOAT: 114 * 10^-1
//! let value = codec::decode_float(&temperature, FormatType::Sfloat, 0).unwrap();
//! assert!((value - 11.4).abs() < 1e-5);
//!
//! assert_eq!(codec::decode_int(&[0xFF], FormatType::Sint8, 0), Some(-1));
//! assert_eq!(codec::decode_int(&[0xFF], FormatType::Uint16, 0), None);
//! ```

pub mod codec;
pub mod presentation;

#[cfg(feature = "cli")]
pub mod cli;
