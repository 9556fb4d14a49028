//! Test suite, one file per concern. Shared helpers live here.

use std::hash::{Hash, Hasher};

use crate::node::{fragment, Inner, Node, BITS_PER_LEVEL};
use crate::record::{Keyed, MapEntry};
use crate::ChampMap;


/// Hasher that echoes back the bytes written, so a key's trie hash is the
/// key's own low 32 bits and tests control placement exactly.
#[derive(Default)]
pub(crate) struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        let mut buf = [0_u8; 8];
        let n = bytes.len().min(8);
        buf[..n].copy_from_slice(&bytes[..n]);
        self.0 = u64::from_ne_bytes(buf);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Map over `u64` keys whose trie hash is the key's low 32 bits.
pub(crate) type PlacedMap<V> = ChampMap<u64, V, IdentityHasher>;

/// Walks the whole trie asserting its structural invariants:
///
/// - entry and child bitmaps of every node are disjoint;
/// - bitmap popcount matches payload length;
/// - no non-root node holds a lone record and no children;
/// - every record sits at the slot its hash fragment selects;
/// - collision leaves hold at least two records, all hashing to the
///   stored value, with pairwise distinct keys;
/// - the stored length matches the number of reachable records.
pub(crate) fn check_invariants<K, V, H>(map: &ChampMap<K, V, H>)
where
    K: Hash + Eq,
    H: Hasher + Default,
{
    let counted = walk_node::<K, V, H>(map.root(), 0, 0, true);
    assert_eq!(counted, map.len(), "stored length out of sync");
}

fn walk_node<K, V, H>(inner: &Inner<MapEntry<K, V>>, shift: u32, prefix: u32, is_root: bool) -> usize
where
    K: Hash + Eq,
    H: Hasher + Default,
{
    let children = &inner.children;
    let entries = &inner.entries;

    assert_eq!(
        children.bitmap() & entries.bitmap(),
        0,
        "a slot is occupied by both an entry and a child"
    );
    assert_eq!(children.bitmap().count_ones() as usize, children.len());
    assert_eq!(entries.bitmap().count_ones() as usize, entries.len());
    if !is_root {
        assert!(
            !(children.is_empty() && entries.len() <= 1),
            "non-root node is contractible"
        );
    }

    let mut counted = 0;
    for idx in 0..32 {
        if let Some(record) = entries.get(idx) {
            let hash = crate::hashing::hash_of::<K, H>(record.key());
            assert_eq!(fragment(hash, shift), idx, "record stored at wrong slot");
            assert_eq!(hash & low_bits(shift), prefix, "record reached wrong subtree");
            counted += 1;
        }
        if let Some(child) = children.get(idx) {
            let child_prefix = prefix | (idx << shift);
            counted += match child.as_ref() {
                Node::Inner(node) => {
                    walk_node::<K, V, H>(node, shift + BITS_PER_LEVEL, child_prefix, false)
                }
                Node::Collision { hash, records } => {
                    assert!(records.len() >= 2, "collision leaf below two records");
                    assert_eq!(hash & low_bits(shift + BITS_PER_LEVEL), child_prefix);
                    for (i, record) in records.iter().enumerate() {
                        assert_eq!(
                            crate::hashing::hash_of::<K, H>(record.key()),
                            *hash,
                            "collision record hash mismatch"
                        );
                        for other in &records[i + 1..] {
                            assert!(record.key() != other.key(), "duplicate key in leaf");
                        }
                    }
                    records.len()
                }
            };
        }
    }
    counted
}

/// Mask of the hash bits consumed above depth `shift`.
fn low_bits(shift: u32) -> u32 {
    if shift >= 32 {
        u32::MAX
    } else {
        (1 << shift) - 1
    }
}
