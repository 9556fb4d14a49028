//! Insertion operation — path-copy insert with structural sharing.

use std::hash::Hasher;
use std::sync::Arc;

use crate::hashing;
use crate::node::{self, Inner, Node};
use crate::record::Keyed;
use crate::sparse::SparseArray;

/// Inserts `record` into the subtree rooted at `node` via path copy.
///
/// Returns the rebuilt subtree and `true` if a new key was introduced
/// (`false` when an existing key's record was replaced).
pub(crate) fn insert_recursive<R, H>(
    node: &Node<R>,
    record: R,
    hash: u32,
    shift: u32,
) -> (Node<R>, bool)
where
    R: Keyed + Clone,
    H: Hasher + Default,
{
    match node {
        Node::Inner(inner) => {
            let (new_inner, added) = insert_into_inner::<R, H>(inner, record, hash, shift);
            (Node::Inner(new_inner), added)
        }
        Node::Collision {
            hash: node_hash,
            records,
        } => insert_into_collision(*node_hash, records, record, hash, shift),
    }
}

/// Inserts into an interior node at depth `shift`.
pub(crate) fn insert_into_inner<R, H>(
    inner: &Inner<R>,
    record: R,
    hash: u32,
    shift: u32,
) -> (Inner<R>, bool)
where
    R: Keyed + Clone,
    H: Hasher + Default,
{
    let idx = node::fragment(hash, shift);

    if let Some(existing) = inner.entries.get(idx) {
        if existing.key() == record.key() {
            // Same key → replace the record, bitmaps unchanged.
            let entries = inner.entries.set(idx, record);
            return (
                Inner {
                    children: inner.children.clone(),
                    entries,
                },
                false,
            );
        }
        // Two distinct keys at one slot → push both one level down.
        let existing_hash = hashing::hash_of::<_, H>(existing.key());
        let subtree = join_records(
            existing.clone(),
            existing_hash,
            record,
            hash,
            shift + node::BITS_PER_LEVEL,
        );
        let children = inner.children.set(idx, Arc::new(subtree));
        let entries = inner.entries.unset(idx);
        return (Inner { children, entries }, true);
    }

    if let Some(child) = inner.children.get(idx) {
        // Slot has a subtree → recurse, then splice the new child in.
        let (new_child, added) =
            insert_recursive::<R, H>(child, record, hash, shift + node::BITS_PER_LEVEL);
        let children = inner.children.set(idx, Arc::new(new_child));
        return (
            Inner {
                children,
                entries: inner.entries.clone(),
            },
            added,
        );
    }

    // Free slot → store the record inline.
    let entries = inner.entries.set(idx, record);
    (
        Inner {
            children: inner.children.clone(),
            entries,
        },
        true,
    )
}

/// Builds the minimal subtree holding two records that collided at the
/// level above `shift`.
///
/// Descends until the hash fragments diverge; when the hash is exhausted
/// before they do, the two records share all 32 bits and end up in a
/// collision leaf. The leaf is returned bare — it is never wrapped in a
/// single-child interior node, so a leaf always hangs directly off the
/// deepest discriminating node.
pub(crate) fn join_records<R: Keyed>(
    existing: R,
    existing_hash: u32,
    new: R,
    new_hash: u32,
    shift: u32,
) -> Node<R> {
    if shift >= node::MAX_SHIFT {
        debug_assert_eq!(existing_hash, new_hash);
        return Node::Collision {
            hash: existing_hash,
            records: vec![existing, new],
        };
    }

    let f1 = node::fragment(existing_hash, shift);
    let f2 = node::fragment(new_hash, shift);

    if f1 != f2 {
        return Node::Inner(Inner {
            children: SparseArray::new(),
            entries: SparseArray::pair(f1, existing, f2, new),
        });
    }
    if shift + node::BITS_PER_LEVEL >= node::MAX_SHIFT {
        // Identical fragments on the last level mean identical hashes.
        debug_assert_eq!(existing_hash, new_hash);
        return Node::Collision {
            hash: existing_hash,
            records: vec![existing, new],
        };
    }
    let child = join_records(existing, existing_hash, new, new_hash, shift + node::BITS_PER_LEVEL);
    Node::Inner(Inner {
        children: SparseArray::single(f1, Arc::new(child)),
        entries: SparseArray::new(),
    })
}

/// Inserts into a collision leaf reached at depth `shift`.
pub(crate) fn insert_into_collision<R: Keyed + Clone>(
    node_hash: u32,
    records: &[R],
    record: R,
    hash: u32,
    shift: u32,
) -> (Node<R>, bool) {
    debug_assert!(records.len() >= 2, "published collision leaf holds >= 2 records");

    if hash != node_hash {
        // The new key shares only a hash prefix with the colliding keys.
        // Grow a spine of interior nodes down to the first diverging
        // fragment, with the leaf on one side and the record on the other.
        let leaf = Node::Collision {
            hash: node_hash,
            records: records.to_vec(),
        };
        return (split_leaf(leaf, node_hash, record, hash, shift), true);
    }

    for (i, existing) in records.iter().enumerate() {
        if existing.key() == record.key() {
            let mut out = records.to_vec();
            out[i] = record;
            return (
                Node::Collision {
                    hash: node_hash,
                    records: out,
                },
                false,
            );
        }
    }

    // New colliding key → prepend.
    let mut out = Vec::with_capacity(records.len() + 1);
    out.push(record);
    out.extend_from_slice(records);
    (
        Node::Collision {
            hash: node_hash,
            records: out,
        },
        true,
    )
}

/// Separates a collision leaf from a record whose hash differs.
fn split_leaf<R>(leaf: Node<R>, leaf_hash: u32, record: R, hash: u32, shift: u32) -> Node<R> {
    // The hashes differ, so some fragment below MAX_SHIFT must diverge.
    debug_assert!(shift < node::MAX_SHIFT);

    let f_leaf = node::fragment(leaf_hash, shift);
    let f_new = node::fragment(hash, shift);

    if f_leaf == f_new {
        let child = split_leaf(leaf, leaf_hash, record, hash, shift + node::BITS_PER_LEVEL);
        return Node::Inner(Inner {
            children: SparseArray::single(f_leaf, Arc::new(child)),
            entries: SparseArray::new(),
        });
    }
    Node::Inner(Inner {
        children: SparseArray::single(f_leaf, Arc::new(leaf)),
        entries: SparseArray::single(f_new, record),
    })
}
