//! Lookup operation — traverses the trie to find a key.

use crate::node::{self, Inner, Node};
use crate::record::Keyed;

/// Searches for `key` in the subtree rooted at `node`.
pub(crate) fn get_recursive<'a, R: Keyed>(
    node: &'a Node<R>,
    hash: u32,
    key: &R::Key,
    shift: u32,
) -> Option<&'a R> {
    match node {
        Node::Inner(inner) => get_in_inner(inner, hash, key, shift),
        Node::Collision {
            hash: node_hash,
            records,
        } => {
            if hash != *node_hash {
                return None;
            }
            // Linear search through colliding records.
            records.iter().find(|r| r.key() == key)
        }
    }
}

/// Searches for `key` in an interior node at depth `shift`.
pub(crate) fn get_in_inner<'a, R: Keyed>(
    inner: &'a Inner<R>,
    hash: u32,
    key: &R::Key,
    shift: u32,
) -> Option<&'a R> {
    let idx = node::fragment(hash, shift);

    if let Some(record) = inner.entries.get(idx) {
        if record.key() == key {
            return Some(record);
        }
        return None;
    }
    if let Some(child) = inner.children.get(idx) {
        return get_recursive(child, hash, key, shift + node::BITS_PER_LEVEL);
    }
    None
}
