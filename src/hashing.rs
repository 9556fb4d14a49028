//! Key hashing for trie placement.

use std::hash::{Hash, Hasher};

/// Computes the 32-bit trie hash of a value.
///
/// The hasher is monomorphised and built via `Default`, so every map
/// sharing the same `H` sees the same hash for the same key — which the
/// structural-equality walk relies on. The trie consumes the low 32 bits
/// of the 64-bit hasher output.
pub(crate) fn hash_of<T: Hash + ?Sized, H: Hasher + Default>(value: &T) -> u32 {
    let mut hasher = H::default();
    value.hash(&mut hasher);
    hasher.finish() as u32
}
