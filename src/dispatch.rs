//! The type hash dispatch table.
//!
//! One `(plain, seeded)` hash pair per supported datatype. Each hasher
//! normalizes its value to a canonical form (sign-extend, fold, widen, or
//! strip down to the logical bytes) and forwards to the primitives in
//! [`crate::primitive`], so that values the type system's equality considers
//! equal always produce the same code:
//!
//! - 16- and 32-bit integers sign-extend to one 32-bit word; 64-bit values
//!   fold to the same word whenever they are representable in 32 bits
//! - both signs of floating-point zero take a reserved code without touching
//!   the primitive, and `f32` widens to `f64` before hashing
//! - variable-length values hash their logical bytes only, independent of
//!   storage layout
//!
//! The set of types is closed on purpose: a new entry needs a review of
//! these equivalences, because a type that compares equal to an existing one
//! but hashes differently corrupts joins and index probes silently.

use crate::datum::{Datum, Name, Oid, TypeTag, TYPE_COUNT};
use crate::primitive;
use crate::varlena::{self, VarlenaError};

/// Hash a boolean.
#[inline]
pub fn hash_bool(value: bool) -> u32 {
    primitive::hash_uint32(u32::from(value))
}

/// Seeded variant of [`hash_bool`].
#[inline]
pub fn hash_bool_extended(value: bool, seed: u64) -> u64 {
    primitive::hash_uint32_extended(u32::from(value), seed)
}

/// Hash a single-byte character.
#[inline]
pub fn hash_char(value: u8) -> u32 {
    primitive::hash_uint32(u32::from(value))
}

/// Seeded variant of [`hash_char`].
#[inline]
pub fn hash_char_extended(value: u8, seed: u64) -> u64 {
    primitive::hash_uint32_extended(u32::from(value), seed)
}

/// Hash a 16-bit integer. Agrees with [`hash_int4`] and [`hash_int8`] for
/// equal values, which cross-width joins rely on.
#[inline]
pub fn hash_int2(value: i16) -> u32 {
    primitive::hash_uint32(i32::from(value) as u32)
}

/// Seeded variant of [`hash_int2`].
#[inline]
pub fn hash_int2_extended(value: i16, seed: u64) -> u64 {
    primitive::hash_uint32_extended(i32::from(value) as u32, seed)
}

/// Hash a 32-bit integer.
#[inline]
pub fn hash_int4(value: i32) -> u32 {
    primitive::hash_uint32(value as u32)
}

/// Seeded variant of [`hash_int4`].
#[inline]
pub fn hash_int4_extended(value: i32, seed: u64) -> u64 {
    primitive::hash_uint32_extended(value as u32, seed)
}

/// Fold a 64-bit integer to the 32-bit word the narrower paths hash.
///
/// Xor the halves, complementing the high half for negative values. A value
/// in 32-bit range then has an all-zero contribution from its high half
/// (all-one before the complement when negative), so the fold is exactly the
/// low word and matches [`hash_int2`]/[`hash_int4`] on equal values.
#[inline]
fn fold_int8(value: i64) -> u32 {
    let lo = value as u32;
    let hi = (value >> 32) as u32;
    lo ^ if value >= 0 { hi } else { !hi }
}

/// Hash a 64-bit integer.
#[inline]
pub fn hash_int8(value: i64) -> u32 {
    primitive::hash_uint32(fold_int8(value))
}

/// Seeded variant of [`hash_int8`].
#[inline]
pub fn hash_int8_extended(value: i64, seed: u64) -> u64 {
    primitive::hash_uint32_extended(fold_int8(value), seed)
}

/// Hash an object identifier.
#[inline]
pub fn hash_oid(value: Oid) -> u32 {
    primitive::hash_uint32(value)
}

/// Seeded variant of [`hash_oid`].
#[inline]
pub fn hash_oid_extended(value: Oid, seed: u64) -> u64 {
    primitive::hash_uint32_extended(value, seed)
}

/// Hash an enumeration label (stored as its oid).
#[inline]
pub fn hash_enum(value: Oid) -> u32 {
    primitive::hash_uint32(value)
}

/// Seeded variant of [`hash_enum`].
#[inline]
pub fn hash_enum_extended(value: Oid, seed: u64) -> u64 {
    primitive::hash_uint32_extended(value, seed)
}

/// Hash a single-precision float.
///
/// Zero of either sign returns the reserved code 0 before the primitive is
/// consulted; +0.0 and -0.0 compare equal but differ in bit pattern, and
/// this is the one reliable way to make them hash equal. Every other value
/// widens to `f64` so that an `f32` hashes identically to the `f64` it
/// compares equal to. Widening, never narrowing: narrowing the `f64` side
/// could overflow or lose precision.
#[inline]
pub fn hash_float4(value: f32) -> u32 {
    if value == 0.0 {
        return 0;
    }
    primitive::hash_bytes(&f64::from(value).to_ne_bytes())
}

/// Seeded variant of [`hash_float4`]; zero of either sign returns the seed
/// unchanged.
#[inline]
pub fn hash_float4_extended(value: f32, seed: u64) -> u64 {
    if value == 0.0 {
        return seed;
    }
    primitive::hash_bytes_extended(&f64::from(value).to_ne_bytes(), seed)
}

/// Hash a double-precision float. Same zero handling as [`hash_float4`].
#[inline]
pub fn hash_float8(value: f64) -> u32 {
    if value == 0.0 {
        return 0;
    }
    primitive::hash_bytes(&value.to_ne_bytes())
}

/// Seeded variant of [`hash_float8`].
#[inline]
pub fn hash_float8_extended(value: f64, seed: u64) -> u64 {
    if value == 0.0 {
        return seed;
    }
    primitive::hash_bytes_extended(&value.to_ne_bytes(), seed)
}

/// Hash a fixed-length name: logical content only, padding excluded.
#[inline]
pub fn hash_name(value: &Name) -> u32 {
    primitive::hash_bytes(value.content())
}

/// Seeded variant of [`hash_name`].
#[inline]
pub fn hash_name_extended(value: &Name, seed: u64) -> u64 {
    primitive::hash_bytes_extended(value.content(), seed)
}

/// Hash text from its materialized logical bytes.
///
/// Currently identical to [`hash_bytea`]; kept separate so a locale-aware
/// text hash can diverge without touching binary callers.
#[inline]
pub fn hash_text(value: &[u8]) -> u32 {
    primitive::hash_bytes(value)
}

/// Seeded variant of [`hash_text`].
#[inline]
pub fn hash_text_extended(value: &[u8], seed: u64) -> u64 {
    primitive::hash_bytes_extended(value, seed)
}

/// Hash a binary blob from its materialized logical bytes. Valid for any
/// variable-length type in which distinct bit patterns never compare equal.
#[inline]
pub fn hash_bytea(value: &[u8]) -> u32 {
    primitive::hash_bytes(value)
}

/// Seeded variant of [`hash_bytea`].
#[inline]
pub fn hash_bytea_extended(value: &[u8], seed: u64) -> u64 {
    primitive::hash_bytes_extended(value, seed)
}

/// Hash a stored varlena datum: parse the header, hash the logical bytes.
///
/// Errors instead of hashing when the payload is compressed or out-of-line;
/// a code computed over the stored image rather than the logical bytes would
/// corrupt index and join correctness.
#[inline]
pub fn hash_varlena(datum: &[u8]) -> Result<u32, VarlenaError> {
    Ok(primitive::hash_bytes(varlena::body(datum)?))
}

/// Seeded variant of [`hash_varlena`].
#[inline]
pub fn hash_varlena_extended(datum: &[u8], seed: u64) -> Result<u64, VarlenaError> {
    Ok(primitive::hash_bytes_extended(varlena::body(datum)?, seed))
}

/// Hash an oid vector as one contiguous span of
/// `len * size_of::<Oid>()` bytes; order-sensitive, as vector equality is.
#[inline]
pub fn hash_oidvector(values: &[Oid]) -> u32 {
    primitive::hash_bytes(oid_bytes(values))
}

/// Seeded variant of [`hash_oidvector`].
#[inline]
pub fn hash_oidvector_extended(values: &[Oid], seed: u64) -> u64 {
    primitive::hash_bytes_extended(oid_bytes(values), seed)
}

#[inline]
fn oid_bytes(values: &[Oid]) -> &[u8] {
    // SAFETY: Oid is u32, which has no padding and no invalid bit patterns;
    // the span covers exactly the slice's initialized bytes.
    unsafe {
        std::slice::from_raw_parts(values.as_ptr().cast::<u8>(), std::mem::size_of_val(values))
    }
}

/// Hash a datum with the hasher registered for its type.
#[inline]
pub fn hash_datum(datum: &Datum<'_>) -> u32 {
    match *datum {
        Datum::Bool(v) => hash_bool(v),
        Datum::Char(v) => hash_char(v),
        Datum::Int2(v) => hash_int2(v),
        Datum::Int4(v) => hash_int4(v),
        Datum::Int8(v) => hash_int8(v),
        Datum::Oid(v) => hash_oid(v),
        Datum::Enum(v) => hash_enum(v),
        Datum::Float4(v) => hash_float4(v),
        Datum::Float8(v) => hash_float8(v),
        Datum::Name(v) => hash_name(v),
        Datum::Text(v) => hash_text(v),
        Datum::Bytea(v) => hash_bytea(v),
        Datum::OidVector(v) => hash_oidvector(v),
    }
}

/// Seeded variant of [`hash_datum`].
#[inline]
pub fn hash_datum_extended(datum: &Datum<'_>, seed: u64) -> u64 {
    match *datum {
        Datum::Bool(v) => hash_bool_extended(v, seed),
        Datum::Char(v) => hash_char_extended(v, seed),
        Datum::Int2(v) => hash_int2_extended(v, seed),
        Datum::Int4(v) => hash_int4_extended(v, seed),
        Datum::Int8(v) => hash_int8_extended(v, seed),
        Datum::Oid(v) => hash_oid_extended(v, seed),
        Datum::Enum(v) => hash_enum_extended(v, seed),
        Datum::Float4(v) => hash_float4_extended(v, seed),
        Datum::Float8(v) => hash_float8_extended(v, seed),
        Datum::Name(v) => hash_name_extended(v, seed),
        Datum::Text(v) => hash_text_extended(v, seed),
        Datum::Bytea(v) => hash_bytea_extended(v, seed),
        Datum::OidVector(v) => hash_oidvector_extended(v, seed),
    }
}

/// The `(plain, seeded)` function pair registered for one datatype.
///
/// Index build and join setup resolve the pair once per key column and call
/// it per row. Both entries expect a datum of exactly the registered type;
/// anything else is a caller bug and panics, since inputs are pre-validated
/// by the type system before they reach this layer.
#[derive(Clone, Copy)]
pub struct HashProcs {
    pub plain: fn(&Datum<'_>) -> u32,
    pub extended: fn(&Datum<'_>, u64) -> u64,
}

/// Look up the hash pair registered for a datatype.
#[inline]
pub fn hash_procs(tag: TypeTag) -> &'static HashProcs {
    &PROC_TABLE[tag as usize]
}

#[cold]
fn proc_mismatch(expected: TypeTag, got: TypeTag) -> ! {
    panic!("hash proc for {expected:?} called with a {got:?} datum")
}

macro_rules! hash_proc {
    ($plain_name:ident, $ext_name:ident, $variant:ident, $plain:expr, $ext:expr) => {
        fn $plain_name(datum: &Datum<'_>) -> u32 {
            match *datum {
                Datum::$variant(v) => $plain(v),
                ref other => proc_mismatch(TypeTag::$variant, other.tag()),
            }
        }
        fn $ext_name(datum: &Datum<'_>, seed: u64) -> u64 {
            match *datum {
                Datum::$variant(v) => $ext(v, seed),
                ref other => proc_mismatch(TypeTag::$variant, other.tag()),
            }
        }
    };
}

hash_proc!(bool_proc, bool_proc_ext, Bool, hash_bool, hash_bool_extended);
hash_proc!(char_proc, char_proc_ext, Char, hash_char, hash_char_extended);
hash_proc!(int2_proc, int2_proc_ext, Int2, hash_int2, hash_int2_extended);
hash_proc!(int4_proc, int4_proc_ext, Int4, hash_int4, hash_int4_extended);
hash_proc!(int8_proc, int8_proc_ext, Int8, hash_int8, hash_int8_extended);
hash_proc!(oid_proc, oid_proc_ext, Oid, hash_oid, hash_oid_extended);
hash_proc!(enum_proc, enum_proc_ext, Enum, hash_enum, hash_enum_extended);
hash_proc!(float4_proc, float4_proc_ext, Float4, hash_float4, hash_float4_extended);
hash_proc!(float8_proc, float8_proc_ext, Float8, hash_float8, hash_float8_extended);
hash_proc!(name_proc, name_proc_ext, Name, hash_name, hash_name_extended);
hash_proc!(text_proc, text_proc_ext, Text, hash_text, hash_text_extended);
hash_proc!(bytea_proc, bytea_proc_ext, Bytea, hash_bytea, hash_bytea_extended);
hash_proc!(
    oidvector_proc,
    oidvector_proc_ext,
    OidVector,
    hash_oidvector,
    hash_oidvector_extended
);

// Indexed by TypeTag discriminant; keep in step with datum::TypeTag.
static PROC_TABLE: [HashProcs; TYPE_COUNT] = [
    HashProcs { plain: bool_proc, extended: bool_proc_ext },
    HashProcs { plain: char_proc, extended: char_proc_ext },
    HashProcs { plain: int2_proc, extended: int2_proc_ext },
    HashProcs { plain: int4_proc, extended: int4_proc_ext },
    HashProcs { plain: int8_proc, extended: int8_proc_ext },
    HashProcs { plain: oid_proc, extended: oid_proc_ext },
    HashProcs { plain: enum_proc, extended: enum_proc_ext },
    HashProcs { plain: float4_proc, extended: float4_proc_ext },
    HashProcs { plain: float8_proc, extended: float8_proc_ext },
    HashProcs { plain: name_proc, extended: name_proc_ext },
    HashProcs { plain: text_proc, extended: text_proc_ext },
    HashProcs { plain: bytea_proc, extended: bytea_proc_ext },
    HashProcs { plain: oidvector_proc, extended: oidvector_proc_ext },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::varlena::{encode_full, encode_short};

    const SEEDS: [u64; 4] = [0, 1, 0xDEAD_BEEF, u64::MAX];

    #[test]
    fn integer_widths_agree() {
        for v in [0i16, 1, -1, 42, i16::MAX, i16::MIN] {
            assert_eq!(hash_int2(v), hash_int4(i32::from(v)));
            assert_eq!(hash_int2(v), hash_int8(i64::from(v)));
            for s in SEEDS {
                assert_eq!(hash_int2_extended(v, s), hash_int4_extended(i32::from(v), s));
                assert_eq!(hash_int2_extended(v, s), hash_int8_extended(i64::from(v), s));
            }
        }
        for v in [i32::MAX, i32::MIN, 100_000, -100_000] {
            assert_eq!(hash_int4(v), hash_int8(i64::from(v)));
            for s in SEEDS {
                assert_eq!(hash_int4_extended(v, s), hash_int8_extended(i64::from(v), s));
            }
        }
    }

    #[test]
    fn int8_fold_reduces_to_low_word_in_32bit_range() {
        // -1 folds to 0xFFFFFFFF: low word all-one, complemented high word zero.
        assert_eq!(hash_int8(-1), hash_int4(-1));
        assert_ne!(hash_int8(-1), 0);
        // Outside 32-bit range the high half participates.
        assert_ne!(hash_int8(1i64 << 32), hash_int4(0));
    }

    #[test]
    fn float_zero_takes_reserved_code() {
        assert_eq!(hash_float4(0.0), 0);
        assert_eq!(hash_float4(-0.0), 0);
        assert_eq!(hash_float8(0.0), 0);
        assert_eq!(hash_float8(-0.0), 0);
        for s in SEEDS {
            assert_eq!(hash_float4_extended(0.0, s), s);
            assert_eq!(hash_float4_extended(-0.0, s), s);
            assert_eq!(hash_float8_extended(0.0, s), s);
            assert_eq!(hash_float8_extended(-0.0, s), s);
        }
    }

    #[test]
    fn float4_hashes_as_its_widening() {
        for v in [1.5f32, -1.5, 0.25, 3.0e20, f32::MIN_POSITIVE, -123.456] {
            assert_eq!(hash_float4(v), hash_float8(f64::from(v)));
            for s in SEEDS {
                assert_eq!(hash_float4_extended(v, s), hash_float8_extended(f64::from(v), s));
            }
        }
    }

    #[test]
    fn nonzero_floats_do_not_collide_with_reserved_zero() {
        assert_ne!(hash_float8(1.0), 0);
        assert_ne!(hash_float4(1.0), 0);
    }

    #[test]
    fn text_and_bytea_agree_on_identical_bytes() {
        assert_eq!(hash_text(b"abc"), hash_bytea(b"abc"));
        for s in SEEDS {
            assert_eq!(hash_text_extended(b"abc", s), hash_bytea_extended(b"abc", s));
        }
    }

    #[test]
    fn varlena_layouts_hash_identically() {
        let short = encode_short(b"abc").unwrap();
        let full = encode_full(b"abc");
        assert_eq!(hash_varlena(&short).unwrap(), hash_varlena(&full).unwrap());
        assert_eq!(hash_varlena(&short).unwrap(), hash_text(b"abc"));
        for s in SEEDS {
            assert_eq!(
                hash_varlena_extended(&short, s).unwrap(),
                hash_varlena_extended(&full, s).unwrap()
            );
            assert_eq!(
                hash_varlena_extended(&full, s).unwrap(),
                hash_text_extended(b"abc", s)
            );
        }
    }

    #[test]
    fn varlena_rejects_unmaterialized_forms() {
        let word: u32 = (8u32 << 2) | 0x02;
        let mut compressed = word.to_le_bytes().to_vec();
        compressed.extend_from_slice(b"zzzz");
        assert_eq!(hash_varlena(&compressed), Err(VarlenaError::Compressed));
        assert_eq!(
            hash_varlena_extended(&[0x01, 0, 0, 0], 7),
            Err(VarlenaError::OutOfLine)
        );
    }

    #[test]
    fn name_hashes_content_without_padding() {
        let name = Name::from("pg_class");
        assert_eq!(hash_name(&name), hash_text(b"pg_class"));
        let mut raw = *name.as_raw();
        raw[crate::datum::NAMEDATALEN - 1] = b'x'; // garbage past the terminator
        assert_eq!(hash_name(&Name::from_raw(raw)), hash_name(&name));
    }

    #[test]
    fn oidvector_is_order_sensitive() {
        assert_eq!(hash_oidvector(&[1, 2, 3]), hash_oidvector(&[1, 2, 3]));
        assert_ne!(hash_oidvector(&[1, 2, 3]), hash_oidvector(&[3, 2, 1]));
        assert_ne!(hash_oidvector(&[]), hash_oidvector(&[0]));
        for s in SEEDS {
            assert_ne!(
                hash_oidvector_extended(&[1, 2, 3], s),
                hash_oidvector_extended(&[3, 2, 1], s)
            );
        }
    }

    #[test]
    fn bool_and_char_hash_their_word() {
        assert_eq!(hash_bool(false), hash_int4(0));
        assert_eq!(hash_bool(true), hash_int4(1));
        assert_eq!(hash_char(b'A'), hash_oid(u32::from(b'A')));
        for s in SEEDS {
            assert_eq!(hash_bool_extended(true, s), hash_oid_extended(1, s));
            assert_eq!(hash_char_extended(0, s), hash_bool_extended(false, s));
        }
    }

    #[test]
    fn datum_dispatch_matches_direct_calls() {
        let name = Name::from("idx");
        let oids = [10u32, 20, 30];
        let datums = [
            Datum::Bool(true),
            Datum::Char(b'q'),
            Datum::Int2(-7),
            Datum::Int4(-7),
            Datum::Int8(-7),
            Datum::Oid(7),
            Datum::Enum(7),
            Datum::Float4(2.5),
            Datum::Float8(2.5),
            Datum::Name(&name),
            Datum::Text(b"abc"),
            Datum::Bytea(b"abc"),
            Datum::OidVector(&oids),
        ];
        let direct = [
            hash_bool(true),
            hash_char(b'q'),
            hash_int2(-7),
            hash_int4(-7),
            hash_int8(-7),
            hash_oid(7),
            hash_enum(7),
            hash_float4(2.5),
            hash_float8(2.5),
            hash_name(&name),
            hash_text(b"abc"),
            hash_bytea(b"abc"),
            hash_oidvector(&oids),
        ];
        for (datum, expect) in datums.iter().zip(direct) {
            assert_eq!(hash_datum(datum), expect);
            let procs = hash_procs(datum.tag());
            for s in SEEDS {
                assert_eq!(hash_datum_extended(datum, s), (procs.extended)(datum, s));
            }
            assert_eq!((procs.plain)(datum), expect);
        }
    }

    #[test]
    #[should_panic(expected = "hash proc for Int4")]
    fn proc_table_rejects_mismatched_datum() {
        (hash_procs(TypeTag::Int4).plain)(&Datum::Text(b"not an int"));
    }

    #[test]
    fn seeded_codes_are_deterministic() {
        let datums = [Datum::Int8(-42), Datum::Text(b"spill partition key")];
        for datum in &datums {
            for s in SEEDS {
                assert_eq!(hash_datum_extended(datum, s), hash_datum_extended(datum, s));
            }
        }
    }
}
