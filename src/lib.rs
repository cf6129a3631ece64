//! datum_hash — datatype-aware hash dispatch for hash indexes and hash joins.
//!
//! - One `(plain, seeded)` hash function pair per supported datatype.
//! - Cross-type agreement: numerically equal 16/32/64-bit integers hash
//!   identically, an `f32` hashes as its exact `f64` widening, and both signs
//!   of floating-point zero collapse to one reserved code.
//! - Stateless and allocation-free: every hasher is a pure function, safe to
//!   call from any number of threads, per indexed value or per tuple key.

mod build_hasher;
pub mod datum;
pub mod dispatch;
pub mod primitive;
pub mod varlena;

pub use build_hasher::{DatumBuildHasher, DatumHasher};
pub use datum::{Datum, Name, Oid, TypeTag, NAMEDATALEN};
pub use dispatch::{hash_datum, hash_datum_extended, hash_procs, HashProcs};
pub use varlena::VarlenaError;
