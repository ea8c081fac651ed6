// Bit-level primitives shared by the integer and float decoders.
//
// Multi-byte values are little-endian: the first byte is least significant.
// Signed values use two's complement over an arbitrary bit width (1..=32),
// which covers the 8/16/32-bit integers as well as the 12-bit and 24-bit
// mantissas and the 4-bit exponent of the short float formats.

// ---------------------------------------------------------------------------
// Tag helpers
// ---------------------------------------------------------------------------

/// Byte length encoded in the low nibble of a raw format tag.
#[inline]
pub const fn type_len(tag: u8) -> usize {
    (tag & 0x0F) as usize
}

// ---------------------------------------------------------------------------
// Little-endian assembly
// ---------------------------------------------------------------------------

/// Widen one byte to an unsigned value in `0..=255`.
#[inline]
pub const fn unsigned_byte_to_int(b: u8) -> u32 {
    b as u32
}

/// Assemble two bytes into a 16-bit unsigned value.
#[inline]
pub const fn unsigned_bytes_to_int16(b0: u8, b1: u8) -> u32 {
    unsigned_byte_to_int(b0) + (unsigned_byte_to_int(b1) << 8)
}

/// Assemble three bytes into a 24-bit unsigned value.
#[inline]
pub const fn unsigned_bytes_to_int24(b0: u8, b1: u8, b2: u8) -> u32 {
    unsigned_bytes_to_int16(b0, b1) + (unsigned_byte_to_int(b2) << 16)
}

/// Assemble four bytes into a 32-bit unsigned value.
///
/// The result covers the full `0..=u32::MAX` range; callers that need a
/// signed view go through [`unsigned_to_signed`].
#[inline]
pub const fn unsigned_bytes_to_int32(b0: u8, b1: u8, b2: u8, b3: u8) -> u32 {
    unsigned_bytes_to_int24(b0, b1, b2) + (unsigned_byte_to_int(b3) << 24)
}

// ---------------------------------------------------------------------------
// Two's complement
// ---------------------------------------------------------------------------

/// Reinterpret the low `size` bits of `unsigned` as a two's-complement value.
///
/// If bit `size - 1` is set the result is
/// `-((1 << (size - 1)) - (unsigned & ((1 << (size - 1)) - 1)))`,
/// otherwise `unsigned` is returned unchanged. `size` must be in `1..=32`.
///
/// Arithmetic runs in `i64` so `size == 32` cannot overflow, including the
/// minimum value `0x8000_0000 -> i32::MIN`.
#[inline]
pub const fn unsigned_to_signed(unsigned: u32, size: u32) -> i32 {
    debug_assert!(matches!(size, 1..=32));
    let half = 1i64 << (size - 1);
    let value = unsigned as i64;
    if value & half != 0 {
        (-(half - (value & (half - 1)))) as i32
    } else {
        unsigned as i32
    }
}

/// Encode a signed value back into its raw bit pattern of width `size`.
///
/// Inverse of [`unsigned_to_signed`] for every pattern in `0..(1 << size)`.
#[inline]
pub const fn signed_to_unsigned_bits(value: i32, size: u32) -> u32 {
    debug_assert!(matches!(size, 1..=32));
    if value < 0 {
        let half = 1i64 << (size - 1);
        (half + (value as i64 & (half - 1))) as u32
    } else {
        value as u32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
