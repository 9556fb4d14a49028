//! Structural equality between two tries.
//!
//! Because removal keeps the trie minimal, two maps holding the same key
//! set produce aligned iteration sequences: walking both in lock-step
//! pairs up identical steps, where a step is either a single record or a
//! whole collision list. Record steps must match outright; collision
//! lists carry no internal order and compare as sets.

use crate::node::{Inner, Node};

/// One step of the lock-step walk.
enum Step<'a, R> {
    Record(&'a R),
    Leaf(&'a [R]),
}

/// Depth-first step producer over one trie.
struct Walk<'a, R> {
    stack: Vec<(&'a Inner<R>, usize)>,
}

impl<'a, R> Walk<'a, R> {
    fn new(root: &'a Inner<R>) -> Self {
        let mut stack = Vec::with_capacity(crate::node::MAX_DEPTH);
        stack.push((root, 0));
        Self { stack }
    }

    fn next(&mut self) -> Option<Step<'a, R>> {
        loop {
            let (inner, pos) = self.stack.last_mut()?;
            let inner: &'a Inner<R> = *inner;
            let cur = *pos;
            *pos += 1;

            let entries = inner.entries.as_slice();
            if cur < entries.len() {
                return Some(Step::Record(&entries[cur]));
            }
            let children = inner.children.as_slice();
            let ci = cur - entries.len();
            if ci < children.len() {
                match children[ci].as_ref() {
                    Node::Inner(child) => {
                        self.stack.push((child, 0));
                        continue;
                    }
                    Node::Collision { records, .. } => return Some(Step::Leaf(records)),
                }
            } else {
                self.stack.pop();
            }
        }
    }
}

/// Compares two tries step-for-step.
///
/// The caller has already checked the record counts; `record_eq` combines
/// the key equality with the value check.
pub(crate) fn tries_equal<R>(
    a: &Inner<R>,
    b: &Inner<R>,
    record_eq: impl Fn(&R, &R) -> bool,
) -> bool {
    let mut wa = Walk::new(a);
    let mut wb = Walk::new(b);
    loop {
        match (wa.next(), wb.next()) {
            (None, None) => return true,
            (Some(Step::Record(x)), Some(Step::Record(y))) => {
                if !record_eq(x, y) {
                    return false;
                }
            }
            (Some(Step::Leaf(xs)), Some(Step::Leaf(ys))) => {
                if !leaves_equal(xs, ys, &record_eq) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// Order-insensitive comparison of two collision lists.
///
/// Keys within a list are pairwise distinct, so equal lengths plus
/// one-sided containment make the symmetric difference empty.
fn leaves_equal<R>(xs: &[R], ys: &[R], record_eq: &impl Fn(&R, &R) -> bool) -> bool {
    xs.len() == ys.len() && xs.iter().all(|x| ys.iter().any(|y| record_eq(x, y)))
}
