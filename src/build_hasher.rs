use std::hash::{BuildHasher, Hasher};

use crate::primitive;

/// `std::hash` bridge over the crate's byte primitive, so executor-side
/// tables (`HashMap`, `HashSet`) bucket by the same function the index and
/// join hashers use. Seeding it gives each hash-table round an independent
/// function, the same way the extended datum hashers do.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatumBuildHasher {
    seed: u64,
}

impl DatumBuildHasher {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl BuildHasher for DatumBuildHasher {
    type Hasher = DatumHasher;

    #[inline]
    fn build_hasher(&self) -> DatumHasher {
        DatumHasher { state: self.seed }
    }
}

/// Folds each written span into the running state with the seeded byte
/// primitive. A single-span key hashes to exactly
/// [`primitive::hash_bytes_extended`] of its bytes at the builder's seed.
#[derive(Debug, Default)]
pub struct DatumHasher {
    state: u64,
}

impl Hasher for DatumHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.state = primitive::hash_bytes_extended(bytes, self.state);
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}
