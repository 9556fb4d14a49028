//! Records stored at trie leaves.

use std::hash::Hash;

/// A record from which a lookup key can be extracted.
///
/// The trie operations are generic over this trait, so the same engine
/// can back record layouts other than a key-value pair (a key-only
/// record turns the map into a set).
pub(crate) trait Keyed {
    /// The key the trie is indexed by.
    type Key: Hash + Eq;

    /// Returns the lookup key of this record.
    fn key(&self) -> &Self::Key;
}

/// Key-value entry of a [`ChampMap`](crate::ChampMap).
#[derive(Clone, Debug)]
pub(crate) struct MapEntry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K: Hash + Eq, V> Keyed for MapEntry<K, V> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }
}
