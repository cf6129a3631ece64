//! Logical values the dispatch layer hashes, paired with their datatype
//! identity.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Object identifier: a 32-bit unsigned catalog key.
pub type Oid = u32;

/// Width of the fixed-length [`Name`] buffer, terminator included.
pub const NAMEDATALEN: usize = 64;

/// Fixed-length identifier string: a NUL-terminated, NUL-padded 64-byte
/// buffer. The logical content is everything before the first NUL; padding
/// bytes never reach the hasher.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Name([u8; NAMEDATALEN]);

// Serialized as the logical content; padding carries no information.
#[cfg(feature = "serde")]
impl Serialize for Name {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.content())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Ok(Name::new(&bytes))
    }
}

impl Name {
    /// Build from an identifier, truncating to `NAMEDATALEN - 1` bytes.
    pub fn new(ident: &[u8]) -> Self {
        let mut buf = [0u8; NAMEDATALEN];
        let n = ident.len().min(NAMEDATALEN - 1);
        buf[..n].copy_from_slice(&ident[..n]);
        Self(buf)
    }

    /// Wrap a raw stored buffer as-is. Anything after the first NUL is
    /// treated as padding.
    pub fn from_raw(buf: [u8; NAMEDATALEN]) -> Self {
        Self(buf)
    }

    /// Logical content: the bytes before the first NUL.
    pub fn content(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(NAMEDATALEN);
        &self.0[..end]
    }

    /// The full stored buffer, padding included.
    pub fn as_raw(&self) -> &[u8; NAMEDATALEN] {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(ident: &str) -> Self {
        Self::new(ident.as_bytes())
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Name")
            .field(&String::from_utf8_lossy(self.content()))
            .finish()
    }
}

/// Identity of a supported datatype.
///
/// A closed set: adding an entry means reviewing the cross-type equivalences
/// in [`crate::dispatch`], since a new type that compares equal to an
/// existing one must also hash equal to it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool,
    Char,
    Int2,
    Int4,
    Int8,
    Oid,
    Enum,
    Float4,
    Float8,
    Name,
    Text,
    Bytea,
    OidVector,
}

/// Number of entries in [`TypeTag`]; sizes the dispatch table.
pub(crate) const TYPE_COUNT: usize = 13;

/// A single value tagged with its datatype, borrowed from the caller.
///
/// Variable-length variants carry already-materialized logical bytes; the
/// storage layer resolves compressed or out-of-line forms before building a
/// `Datum` (see [`crate::varlena`]). Nothing here is retained past the
/// hashing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Datum<'a> {
    Bool(bool),
    Char(u8),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Oid(Oid),
    Enum(Oid),
    Float4(f32),
    Float8(f64),
    Name(&'a Name),
    Text(&'a [u8]),
    Bytea(&'a [u8]),
    OidVector(&'a [Oid]),
}

impl Datum<'_> {
    /// The datatype this value carries.
    pub fn tag(&self) -> TypeTag {
        match self {
            Datum::Bool(_) => TypeTag::Bool,
            Datum::Char(_) => TypeTag::Char,
            Datum::Int2(_) => TypeTag::Int2,
            Datum::Int4(_) => TypeTag::Int4,
            Datum::Int8(_) => TypeTag::Int8,
            Datum::Oid(_) => TypeTag::Oid,
            Datum::Enum(_) => TypeTag::Enum,
            Datum::Float4(_) => TypeTag::Float4,
            Datum::Float8(_) => TypeTag::Float8,
            Datum::Name(_) => TypeTag::Name,
            Datum::Text(_) => TypeTag::Text,
            Datum::Bytea(_) => TypeTag::Bytea,
            Datum::OidVector(_) => TypeTag::OidVector,
        }
    }
}
