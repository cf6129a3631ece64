//! Uniform hash primitives the per-datatype hashers forward to.
//!
//! Two primitives, each in a plain 32-bit form and a seeded 64-bit form: one
//! over arbitrary byte spans and one specialized for values that reduce to a
//! single 32-bit word. Both are deterministic within one build of the crate,
//! effectively uniform over their output range, and order-sensitive over
//! their input bytes. The plain form of each equals the low 32 bits of its
//! seeded form at seed 0, so a caller holding only the seeded variant can
//! reproduce plain codes.
//!
//! Every bit of the 32-bit result should be as random as every other;
//! anything less degrades bucket distribution in hash joins.

/// Hash an arbitrary byte span to a 32-bit code.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    hash_bytes_extended(data, 0) as u32
}

/// Seeded 64-bit variant of [`hash_bytes`].
#[inline]
pub fn hash_bytes_extended(data: &[u8], seed: u64) -> u64 {
    wyhash::wyhash(data, seed)
}

/// Hash a 32-bit word to a 32-bit code.
///
/// Cheaper than routing four bytes through [`hash_bytes`]. Datatypes that
/// normalize to a single word (integers, oids, booleans) take this path.
#[inline]
pub fn hash_uint32(value: u32) -> u32 {
    hash_uint32_extended(value, 0) as u32
}

/// Seeded 64-bit variant of [`hash_uint32`].
#[inline]
pub fn hash_uint32_extended(value: u32, seed: u64) -> u64 {
    splitmix64(u64::from(value) ^ seed)
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
