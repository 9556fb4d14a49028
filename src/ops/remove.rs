//! Removal operation — path-copy delete with minimality contraction.
//!
//! No interior node below the root may hold exactly one record and no
//! children: removal contracts such nodes by promoting the surviving
//! record into the parent. The contraction keeps the trie shape a pure
//! function of the key set, which the structural-equality walk relies on.

use std::sync::Arc;

use crate::node::{self, Inner, Node};
use crate::record::Keyed;

/// What the parent must do after a removal below one of its slots.
pub(crate) enum Removal<R> {
    /// Key absent; the trie is unchanged.
    NotFound,
    /// Swap in the rebuilt subtree.
    Replaced(Node<R>),
    /// The subtree shrank to a single record; the parent unsets its child
    /// bit and stores the record inline at the same slot.
    Collapsed(R),
    /// No records remain. Only the root ever reports this.
    Emptied,
}

/// Removes `key` from the subtree rooted at `node`.
pub(crate) fn remove_recursive<R: Keyed + Clone>(
    node: &Node<R>,
    hash: u32,
    key: &R::Key,
    shift: u32,
) -> Removal<R> {
    match node {
        Node::Inner(inner) => remove_from_inner(inner, hash, key, shift, false),
        Node::Collision {
            hash: node_hash,
            records,
        } => remove_from_collision(*node_hash, records, hash, key),
    }
}

/// Removes `key` from an interior node at depth `shift`.
///
/// `is_root` suppresses contraction: the root is allowed to hold a single
/// record, or nothing at all.
pub(crate) fn remove_from_inner<R: Keyed + Clone>(
    inner: &Inner<R>,
    hash: u32,
    key: &R::Key,
    shift: u32,
    is_root: bool,
) -> Removal<R> {
    let idx = node::fragment(hash, shift);

    if let Some(record) = inner.entries.get(idx) {
        if record.key() != key {
            return Removal::NotFound;
        }
        let entries = inner.entries.unset(idx);
        if inner.children.is_empty() {
            if entries.is_empty() {
                debug_assert!(is_root, "interior node held a lone record");
                return Removal::Emptied;
            }
            if !is_root && entries.len() == 1 {
                // Contraction: hand the survivor to the parent.
                return Removal::Collapsed(entries.as_slice()[0].clone());
            }
        }
        return Removal::Replaced(Node::Inner(Inner {
            children: inner.children.clone(),
            entries,
        }));
    }

    if let Some(child) = inner.children.get(idx) {
        return match remove_recursive(child, hash, key, shift + node::BITS_PER_LEVEL) {
            Removal::NotFound => Removal::NotFound,
            Removal::Replaced(new_child) => {
                let children = inner.children.set(idx, Arc::new(new_child));
                Removal::Replaced(Node::Inner(Inner {
                    children,
                    entries: inner.entries.clone(),
                }))
            }
            Removal::Collapsed(record) => {
                if !is_root && inner.entries.is_empty() && inner.children.len() == 1 {
                    // A bare single-child spine dissolves with its child.
                    Removal::Collapsed(record)
                } else {
                    let children = inner.children.unset(idx);
                    let entries = inner.entries.set(idx, record);
                    Removal::Replaced(Node::Inner(Inner { children, entries }))
                }
            }
            Removal::Emptied => unreachable!("child subtree drained to zero records"),
        };
    }

    Removal::NotFound
}

/// Removes `key` from a collision leaf.
fn remove_from_collision<R: Keyed + Clone>(
    node_hash: u32,
    records: &[R],
    hash: u32,
    key: &R::Key,
) -> Removal<R> {
    debug_assert!(records.len() >= 2, "published collision leaf holds >= 2 records");

    if hash != node_hash {
        return Removal::NotFound;
    }
    let Some(pos) = records.iter().position(|r| r.key() == key) else {
        return Removal::NotFound;
    };

    if records.len() == 2 {
        // The collision is resolved; the survivor moves into the parent.
        return Removal::Collapsed(records[1 - pos].clone());
    }

    let mut out = Vec::with_capacity(records.len() - 1);
    out.extend_from_slice(&records[..pos]);
    out.extend_from_slice(&records[pos + 1..]);
    Removal::Replaced(Node::Collision {
        hash: node_hash,
        records: out,
    })
}
