//! A suffix trie over a single word, built on the
//! [`RadixTrie`](crate::radix::RadixTrie).
//!
//! Construction inserts every suffix of the word, so any substring of the
//! word is a prefix of exactly one of the stored suffixes. That one idea
//! turns prefix queries into substring queries: membership, occurrence
//! counting, and longest-repeated-substring all fall out of the trie's
//! shape. Each suffix is terminated with `'$'` and tagged with its start
//! index, so suffixes with equal content still end on distinct leaves.
//!
//! This is the quadratic reference construction (one compressed insert
//! per suffix), not a linear-time suffix automaton; it favors clarity
//! over asymptotics.
//!
//! # Examples
//!
//! ```
//! use tries::suffix::SuffixTrie;
//!
//! let trie = SuffixTrie::new("banana")?;
//!
//! assert!(trie.has_substr("nan"));
//! assert!(!trie.has_substr("nab"));
//! assert_eq!(trie.count_pattern_occurrences("ana"), 2);
//!
//! let repeated = trie.get_longest_repeated_substring();
//! assert!(repeated.contains("ana"));
//! # Ok::<(), tries::error::InvalidWord>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::arena::NodeId;
use crate::error::InvalidWord;
use crate::radix::RadixTrie;

/// Appended to every suffix before its index tag. Stripped from the
/// input word, so it can never collide with stored content.
const TERMINATOR: char = '$';

/// An index of every suffix of one word, immutable once built.
#[derive(Clone)]
pub struct SuffixTrie {
    word: String,
    trie: RadixTrie,
    /// Suffix start position (in characters) → the leaf recorded for it
    /// at construction time.
    leaves: BTreeMap<usize, NodeId>,
}

impl SuffixTrie {
    /// Builds the index for `word` by inserting each of its suffixes,
    /// terminator and index tag appended, into a fresh backing trie.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWord`] if `word` is empty, or empty once every
    /// terminator character has been stripped from it.
    pub fn new(word: &str) -> Result<Self, InvalidWord> {
        let word: String = word.chars().filter(|&c| c != TERMINATOR).collect();
        if word.is_empty() {
            return Err(InvalidWord);
        }

        let mut trie = RadixTrie::new();
        let mut leaves = BTreeMap::new();
        for (index, (start, _)) in word.char_indices().enumerate() {
            // The index tag keeps equal suffix content on distinct
            // leaves, e.g. the two "a" tails of "banana".
            let tagged = format!("{}{}{}", &word[start..], TERMINATOR, index);
            let leaf = trie.insert_suffix(&tagged);
            leaves.insert(index, leaf);
        }

        Ok(Self { word, trie, leaves })
    }

    /// The indexed word, terminator characters stripped.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Number of nodes in the backing trie, its root included.
    pub fn node_count(&self) -> usize {
        self.trie.len()
    }

    /// Whether `substr` occurs anywhere in the word. Every substring of
    /// the word is a prefix of one of the stored suffixes, so this is a
    /// prefix query on the backing trie. The empty string trivially
    /// occurs; strings containing the terminator never do.
    pub fn has_substr(&self, substr: &str) -> bool {
        if substr.contains(TERMINATOR) {
            return false;
        }
        self.trie.has_prefix(substr)
    }

    /// Whether the word ends with `suffix`, answered through the trie:
    /// `suffix` ends the word iff some stored entry continues it with
    /// the terminator.
    pub fn has_suffix(&self, suffix: &str) -> bool {
        if suffix.is_empty() {
            return true;
        }
        if suffix.contains(TERMINATOR) {
            return false;
        }
        let mut probe = suffix.to_string();
        probe.push(TERMINATOR);
        self.trie.has_prefix(&probe)
    }

    /// How many times `pattern` occurs in the word, overlaps included.
    ///
    /// Follows the pattern through the backing trie; each suffix
    /// starting with the pattern marks one occurrence, and those
    /// suffixes are exactly the word nodes below the landing point. A
    /// pattern that ends inside an edge label must genuinely be a
    /// prefix of that label, otherwise it does not occur at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use tries::suffix::SuffixTrie;
    ///
    /// let trie = SuffixTrie::new("banana")?;
    /// assert_eq!(trie.count_pattern_occurrences("a"), 3);
    /// assert_eq!(trie.count_pattern_occurrences("ana"), 2);
    /// assert_eq!(trie.count_pattern_occurrences("and"), 0);
    /// # Ok::<(), tries::error::InvalidWord>(())
    /// ```
    pub fn count_pattern_occurrences(&self, pattern: &str) -> usize {
        if pattern.is_empty() || pattern.contains(TERMINATOR) {
            return 0;
        }
        let (node, rest) = self.trie.follow_path(pattern);
        let node = if rest.is_empty() {
            node
        } else {
            match self.trie.descend_partial(node, rest) {
                Some(child) => child,
                None => return 0,
            }
        };
        self.trie.count_word_nodes(node)
    }

    /// The longest substring(s) shared by at least two suffixes of the
    /// word — equivalently, the longest substring(s) occurring at least
    /// twice.
    ///
    /// Two suffixes diverge at a branching node, so the deepest
    /// branching nodes spell the answer; the path to each is rebuilt by
    /// walking parent references back to the root. All strings of the
    /// maximal length are returned. A word with no repeated substring
    /// yields an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use tries::suffix::SuffixTrie;
    ///
    /// let trie = SuffixTrie::new("PAPERSFORPAPERS")?;
    /// let longest = trie.get_longest_common_substring();
    /// assert!(longest.contains("PAPERS"));
    /// # Ok::<(), tries::error::InvalidWord>(())
    /// ```
    pub fn get_longest_common_substring(&self) -> BTreeSet<String> {
        let mut best = BTreeSet::new();
        let mut best_len = 0;
        let mut path = String::new();
        self.collect_branching(self.trie.root_id(), &mut path, &mut best_len, &mut best);
        best
    }

    /// Alias for [`get_longest_common_substring`]: a substring common to
    /// two or more suffixes is by definition repeated within the word.
    ///
    /// [`get_longest_common_substring`]: Self::get_longest_common_substring
    pub fn get_longest_repeated_substring(&self) -> BTreeSet<String> {
        self.get_longest_common_substring()
    }

    /// Every suffix of the word in start order, each reconstructed from
    /// its recorded leaf by walking parent references and trimming the
    /// terminator tag.
    pub fn suffixes(&self) -> Vec<String> {
        self.leaves
            .values()
            .map(|&leaf| {
                let tagged = self.ancestor_path(leaf);
                match tagged.find(TERMINATOR) {
                    Some(end) => tagged[..end].to_string(),
                    None => tagged,
                }
            })
            .collect()
    }

    /// The root-to-`node` string, rebuilt bottom-up through parent
    /// references.
    fn ancestor_path(&self, node: NodeId) -> String {
        let mut labels = Vec::new();
        let mut current = node;
        while current != self.trie.root_id() {
            labels.push(self.trie.label(current));
            current = self
                .trie
                .parent(current)
                .expect("only the root has no parent");
        }
        labels.into_iter().rev().collect()
    }

    /// Depth-first search for branching nodes (two or more children).
    /// `path` spells the root-to-`node` string; the deepest hits, by
    /// character count, accumulate in `best`.
    fn collect_branching(
        &self,
        node: NodeId,
        path: &mut String,
        best_len: &mut usize,
        best: &mut BTreeSet<String>,
    ) {
        if node != self.trie.root_id() && self.trie.child_count(node) >= 2 {
            // Suffix tags are unique, so a shared path never reaches a
            // terminator.
            debug_assert!(!path.contains(TERMINATOR));
            let length = path.chars().count();
            if length > 0 {
                if length > *best_len {
                    *best_len = length;
                    best.clear();
                }
                if length == *best_len {
                    best.insert(path.clone());
                }
            }
        }
        for child in self.trie.child_ids(node) {
            let label_len = self.trie.label(child).len();
            path.push_str(self.trie.label(child));
            self.collect_branching(child, path, best_len, best);
            path.truncate(path.len() - label_len);
        }
    }
}

impl fmt::Debug for SuffixTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixTrie")
            .field("word", &self.word)
            .field("trie", &self.trie)
            .finish()
    }
}
