//! Iterator types for [`ChampMap`](crate::ChampMap).
//!
//! Iteration is a lazy depth-first walk over an explicit stack of at most
//! one frame per trie level, so it costs O(depth) state rather than an
//! up-front O(n) collection. Per interior node, inline records are
//! yielded in physical order before any child subtree is entered;
//! collision leaves yield their records in list order. Beyond "every live
//! record exactly once", the order is unspecified.

use crate::node::{Inner, Node, MAX_DEPTH};
use crate::record::MapEntry;

/// One level of the walk.
enum Frame<'a, R> {
    Inner { node: &'a Inner<R>, pos: usize },
    Leaf { records: &'a [R], pos: usize },
}

/// What a frame produced when advanced.
enum Advance<'a, R> {
    Yield(&'a R),
    Descend(&'a Node<R>),
    Pop,
}

/// Depth-first record producer over one trie.
pub(crate) struct RecordWalk<'a, R> {
    stack: Vec<Frame<'a, R>>,
}

impl<'a, R> RecordWalk<'a, R> {
    pub(crate) fn new(root: &'a Inner<R>) -> Self {
        let mut stack = Vec::with_capacity(MAX_DEPTH);
        stack.push(Frame::Inner { node: root, pos: 0 });
        Self { stack }
    }

    pub(crate) fn next(&mut self) -> Option<&'a R> {
        loop {
            let advance = {
                let frame = self.stack.last_mut()?;
                match frame {
                    Frame::Inner { node, pos } => {
                        let node: &'a Inner<R> = *node;
                        let cur = *pos;
                        *pos += 1;
                        let entries = node.entries.as_slice();
                        if cur < entries.len() {
                            Advance::Yield(&entries[cur])
                        } else {
                            let children = node.children.as_slice();
                            let ci = cur - entries.len();
                            if ci < children.len() {
                                Advance::Descend(children[ci].as_ref())
                            } else {
                                Advance::Pop
                            }
                        }
                    }
                    Frame::Leaf { records, pos } => {
                        let records: &'a [R] = *records;
                        let cur = *pos;
                        *pos += 1;
                        if cur < records.len() {
                            Advance::Yield(&records[cur])
                        } else {
                            Advance::Pop
                        }
                    }
                }
            };
            match advance {
                Advance::Yield(record) => return Some(record),
                Advance::Descend(node) => match node {
                    Node::Inner(child) => {
                        self.stack.push(Frame::Inner { node: child, pos: 0 });
                    }
                    Node::Collision { records, .. } => {
                        self.stack.push(Frame::Leaf { records, pos: 0 });
                    }
                },
                Advance::Pop => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Iterator over `(&K, &V)` pairs of a [`ChampMap`](crate::ChampMap).
pub struct Iter<'a, K, V> {
    walk: RecordWalk<'a, MapEntry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Inner<MapEntry<K, V>>, len: usize) -> Self {
        Self {
            walk: RecordWalk::new(root),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let record = self.walk.next()?;
        self.remaining -= 1;
        Some((&record.key, &record.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
