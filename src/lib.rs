//! This crate exposes the classic trie family of data structures
//! mostly for educational purposes.
//!
//! ## Trie
//!
//! A trie (or prefix tree) stores string keys as paths from a root node,
//! one symbol per edge. Keys that share a prefix share the nodes spelling
//! that prefix, so membership tests, prefix queries, and autocompletion
//! all run in `O(key length)` regardless of how many keys are stored.
//! Each node carries an "end of word" marker; the marked nodes correspond
//! exactly to the inserted keys. The most important invariants are:
//!
//! 1. Every node except the root is reachable from the root by exactly
//!    one edge per symbol of some inserted key's prefix.
//! 2. A node with no children that does not end a word must not exist —
//!    deletion prunes such nodes on its way back up.
//!
//! ## Radix trie
//!
//! A radix trie compresses chains of single-child nodes into one node
//! holding a multi-character edge label. Insertion splits a label when a
//! new key diverges in the middle of an edge, and deletion merges a
//! non-word node with its only child, so the structure stays maximally
//! compressed:
//!
//! 1. No two sibling edges start with the same character.
//! 2. No non-root node has exactly one child while not ending a word.
//!
//! ## Suffix trie
//!
//! A suffix trie indexes every suffix of one word in a radix trie. Once
//! built it answers substring membership, counts pattern occurrences, and
//! finds the longest repeated substring — a substring shared by two or
//! more suffixes shows up as a branching node, and the deepest such node
//! spells the longest one.

#![deny(missing_docs)]

mod arena;

pub mod error;
pub mod radix;
pub mod suffix;
pub mod trie;

#[cfg(test)]
mod test;
