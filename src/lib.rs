//! Persistent hash map based on CHAMP.
//!
//! CHAMP (Compressed Hash-Array Mapped Prefix-tree) is a refined HAMT that
//! keeps single-key paths inline: an interior node stores key-value entries
//! directly next to child pointers, and deletion contracts the trie back to
//! its minimal shape. Every update returns a **new map value**; the old one
//! stays valid and the two share all unchanged subtrees.
//!
//! # Key properties
//!
//! - **Value semantics**: `insert`/`remove` return a new map via an
//!   O(log₃₂ n) path copy; `clone` is O(1)
//! - **Structural sharing**: unchanged subtrees are aliased through
//!   [`Arc`](std::sync::Arc), so published maps are freely readable from
//!   any number of threads
//! - **Minimal shape**: removal contracts one-entry subtrees, so equal
//!   key sets iterate in lock-step regardless of update history
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod iter;
pub mod sparse;

mod hashing;
mod map;
mod node;
mod ops;
mod record;

#[cfg(test)]
mod tests;

pub use map::ChampMap;
