//! Errors returned by the trie family.
//!
//! Only mutating entry points can fail: inserting a key and building a
//! [`SuffixTrie`](crate::suffix::SuffixTrie). Arguments are validated
//! before any node is touched, so a returned error means the structure is
//! exactly as it was. Read-only operations accept any string and answer
//! consistently instead of failing (the empty prefix matches everything,
//! the empty key is never contained), and removal of an absent key is a
//! documented no-op.

use thiserror::Error;

/// Returned when inserting an empty key.
///
/// Keys are paths through the trie, one node per character, so the empty
/// string has no node to mark as a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("keys must be non-empty")]
pub struct InvalidKey;

/// Returned when building a suffix trie from an unusable word.
///
/// The word must be non-empty once terminator characters (`'$'`) have
/// been stripped from it; otherwise there are no suffixes to index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a suffix trie needs a non-empty word to index")]
pub struct InvalidWord;
