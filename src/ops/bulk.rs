//! Bulk building — in-place insertion into not-yet-shared subtrees.
//!
//! Building a map from a sequence with pure path copies reallocates the
//! whole spine once per element. Nodes freshly allocated by the running
//! build are not reachable from any published map, so they may be patched
//! in place instead. `Arc::get_mut` is the gate: it succeeds exactly when
//! this build holds the sole reference, and anything shared falls back to
//! the regular copy-on-write insert. The observable result is identical
//! to folding [`insert_recursive`](super::insert::insert_recursive).

use std::hash::Hasher;
use std::sync::Arc;

use crate::hashing;
use crate::node::{self, Inner, Node};
use crate::record::Keyed;

use super::insert;

/// Inserts `record` under the root, mutating in place where the root and
/// the touched path are uniquely owned.
///
/// Returns `true` if a new key was introduced.
pub(crate) fn insert_root_in_place<R, H>(root: &mut Arc<Inner<R>>, record: R, hash: u32) -> bool
where
    R: Keyed + Clone,
    H: Hasher + Default,
{
    if let Some(inner) = Arc::get_mut(root) {
        return insert_mut_inner::<R, H>(inner, record, hash, 0);
    }
    let (new_root, added) = insert::insert_into_inner::<R, H>(root.as_ref(), record, hash, 0);
    *root = Arc::new(new_root);
    added
}

/// Inserts below `node`, mutating in place while ownership allows.
fn insert_in_place<R, H>(node: &mut Arc<Node<R>>, record: R, hash: u32, shift: u32) -> bool
where
    R: Keyed + Clone,
    H: Hasher + Default,
{
    if let Some(owned) = Arc::get_mut(node) {
        return insert_mut::<R, H>(owned, record, hash, shift);
    }
    let (new_node, added) = insert::insert_recursive::<R, H>(node.as_ref(), record, hash, shift);
    *node = Arc::new(new_node);
    added
}

fn insert_mut<R, H>(node: &mut Node<R>, record: R, hash: u32, shift: u32) -> bool
where
    R: Keyed + Clone,
    H: Hasher + Default,
{
    match node {
        Node::Inner(inner) => insert_mut_inner::<R, H>(inner, record, hash, shift),
        Node::Collision {
            hash: node_hash,
            records,
        } => {
            // Collision lists are short; rebuilding beats patching.
            let (new_node, added) =
                insert::insert_into_collision(*node_hash, records, record, hash, shift);
            *node = new_node;
            added
        }
    }
}

fn insert_mut_inner<R, H>(inner: &mut Inner<R>, record: R, hash: u32, shift: u32) -> bool
where
    R: Keyed + Clone,
    H: Hasher + Default,
{
    let idx = node::fragment(hash, shift);

    if let Some(pos) = inner.entries.position(idx) {
        if inner.entries.as_slice()[pos].key() == record.key() {
            // Same-size overwrite: reuse the payload array when unshared.
            if let Some(returned) = inner.entries.replace_at_mut(pos, record) {
                inner.entries = inner.entries.replace_at(pos, returned);
            }
            return false;
        }
        let existing = inner.entries.as_slice()[pos].clone();
        let existing_hash = hashing::hash_of::<_, H>(existing.key());
        let subtree = insert::join_records(
            existing,
            existing_hash,
            record,
            hash,
            shift + node::BITS_PER_LEVEL,
        );
        inner.children = inner.children.set(idx, Arc::new(subtree));
        inner.entries = inner.entries.unset(idx);
        return true;
    }

    if let Some(pos) = inner.children.position(idx) {
        if let Some(children) = inner.children.content_mut() {
            return insert_in_place::<R, H>(
                &mut children[pos],
                record,
                hash,
                shift + node::BITS_PER_LEVEL,
            );
        }
        // Payload array is shared → splice a rebuilt child into a copy.
        let (new_child, added) = insert::insert_recursive::<R, H>(
            inner.children.as_slice()[pos].as_ref(),
            record,
            hash,
            shift + node::BITS_PER_LEVEL,
        );
        inner.children = inner.children.replace_at(pos, Arc::new(new_child));
        return added;
    }

    inner.entries = inner.entries.set(idx, record);
    true
}
