//! core::ids
//!
//! Identifier allocation for new graph nodes.
//!
//! # Allocation
//!
//! Identifiers are 96-bit values rendered as 24 uppercase hex digits, the
//! width Xcode writes. Each one is the truncated SHA-256 digest of
//! `(seed, hint, counter)`, where the seed is derived from the project
//! being edited and the hint from the kind and label of the new object.
//! The same edit applied to the same file therefore produces the same
//! identifiers, which keeps diffs reproducible.
//!
//! # Invariants
//!
//! - The allocator never returns an identifier the caller reports as taken
//! - The counter only moves forward, so one allocator never repeats itself

use sha2::{Digest, Sha256};

use super::types::ObjectId;

/// Deterministic identifier generator.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    seed: [u8; 32],
    counter: u64,
}

impl IdAllocator {
    /// Create an allocator seeded from `seed` (typically the root id).
    pub fn new(seed: &str) -> Self {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(seed.as_bytes()));
        Self {
            seed: digest,
            counter: 0,
        }
    }

    /// Produce an identifier for which `taken` returns false.
    ///
    /// `hint` only influences the value; it need not be unique.
    pub fn allocate(&mut self, hint: &str, taken: impl Fn(&ObjectId) -> bool) -> ObjectId {
        loop {
            let mut hasher = Sha256::new();
            hasher.update(self.seed);
            hasher.update(hint.as_bytes());
            hasher.update(self.counter.to_be_bytes());
            self.counter += 1;

            let digest = hasher.finalize();
            let mut bytes = [0u8; ObjectId::BYTES];
            bytes.copy_from_slice(&digest[..ObjectId::BYTES]);
            let id = ObjectId::from_bytes(bytes);
            if !taken(&id) {
                return id;
            }
            tracing::trace!(%id, "identifier collision, retrying");
        }
    }
}
