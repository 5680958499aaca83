//! A compressed (radix) trie. Where the plain [`Trie`](crate::trie::Trie)
//! spends one node per character, a radix trie stores a whole string on
//! each edge and only keeps nodes where keys actually diverge or end.
//! Insertion splits an edge label at the point of divergence; removal
//! merges a node back into its only child, so after any sequence of
//! operations the structure stays maximally compressed: no two sibling
//! edges share a first character, and no non-root node has exactly one
//! child without being a word itself.
//!
//! # Examples
//!
//! ```
//! use tries::radix::RadixTrie;
//!
//! let mut trie = RadixTrie::new();
//! trie.insert("test")?;
//! trie.insert("team")?;
//!
//! // Two keys, but only four nodes: root, "te", "st", "am".
//! assert_eq!(trie.len(), 4);
//!
//! // A prefix may end in the middle of an edge label.
//! assert!(trie.has_prefix("tes"));
//! assert_eq!(trie.auto_complete("te"), vec!["team", "test"]);
//! # Ok::<(), tries::error::InvalidKey>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::arena::{Arena, NodeId};
use crate::error::InvalidKey;

#[derive(Clone)]
struct Node {
    /// Compressed edge label; empty only on the root sentinel.
    label: String,
    /// Children keyed by the first character of their label, so sibling
    /// edges can never share one. `BTreeMap` order makes traversal
    /// deterministic and lexicographic.
    children: BTreeMap<char, NodeId>,
    /// True iff some inserted key ends at this node.
    is_word: bool,
    /// Non-owning back-reference; `None` only for the root.
    parent: Option<NodeId>,
}

impl Node {
    fn new(label: String, parent: NodeId) -> Self {
        Self {
            label,
            children: BTreeMap::new(),
            is_word: false,
            parent: Some(parent),
        }
    }

    fn root() -> Self {
        Self {
            label: String::new(),
            children: BTreeMap::new(),
            is_word: false,
            parent: None,
        }
    }
}

/// A prefix tree with compressed multi-character edge labels.
#[derive(Clone)]
pub struct RadixTrie {
    arena: Arena<Node>,
    root: NodeId,
}

impl Default for RadixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixTrie {
    /// Generates a new, empty `RadixTrie`.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::root());
        Self { arena, root }
    }

    /// Inserts a key. Inserting a key that is already present is a no-op.
    ///
    /// The walk down matches the longest common prefix against one
    /// candidate edge per step (the one sharing the key's next
    /// character). A full label match descends, a partial match splits
    /// the edge at the point of divergence, and no match hangs the whole
    /// remaining key off the current node as a single new edge.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidKey`] for the empty key, before touching the tree.
    pub fn insert(&mut self, key: &str) -> Result<(), InvalidKey> {
        if key.is_empty() {
            return Err(InvalidKey);
        }
        self.insert_suffix(key);
        Ok(())
    }

    /// Removes a key. Removing a key that was never inserted (the empty
    /// key included) is a silent no-op.
    ///
    /// After unmarking the node, compression is restored: a node left
    /// childless is pruned (repeating the check at its parent), and a
    /// non-word node left with exactly one child is merged with it into
    /// a single edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use tries::radix::RadixTrie;
    ///
    /// let mut trie = RadixTrie::new();
    /// trie.insert("test")?;
    /// trie.insert("team")?;
    ///
    /// trie.remove("test");
    ///
    /// // "te" and "am" merged back into one "team" edge.
    /// assert_eq!(trie.len(), 2);
    /// assert!(trie.contains("team"));
    /// # Ok::<(), tries::error::InvalidKey>(())
    /// ```
    pub fn remove(&mut self, key: &str) {
        let (node, rest) = self.follow_path(key);
        if !rest.is_empty() || !self.arena.get(node).is_word {
            return;
        }
        self.arena.get_mut(node).is_word = false;
        self.restore_compression(node);

        if cfg!(debug_assertions) {
            self.assert_compressed();
        }
    }

    /// Whether the exact key was inserted. The empty key is never
    /// contained.
    pub fn contains(&self, key: &str) -> bool {
        let (node, rest) = self.follow_path(key);
        rest.is_empty() && self.arena.get(node).is_word
    }

    /// Whether some inserted key starts with `prefix`. The empty prefix
    /// matches trivially. The prefix may end inside an edge label: with
    /// "team" stored, `has_prefix("te")` is true even though no node
    /// boundary falls after the "te".
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let (node, rest) = self.follow_path(prefix);
        rest.is_empty() || self.descend_partial(node, rest).is_some()
    }

    /// Every inserted key starting with `prefix`, in lexicographic
    /// order. Each produced string is the concatenation of edge labels
    /// from the root down to a word node.
    pub fn auto_complete(&self, prefix: &str) -> Vec<String> {
        let mut completions = Vec::new();
        let (node, rest) = self.follow_path(prefix);
        if rest.is_empty() {
            let mut path = prefix.to_string();
            self.collect_words(node, &mut path, &mut completions);
        } else if let Some(child) = self.descend_partial(node, rest) {
            let mut path = prefix.to_string();
            path.push_str(&self.arena.get(child).label[rest.len()..]);
            self.collect_words(child, &mut path, &mut completions);
        }
        completions
    }

    /// Total number of live nodes, the root sentinel included: an empty
    /// trie has length 1.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.arena.get(self.root).children.is_empty()
    }

    /// Removes every key, resetting the trie to its freshly-built state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Inserts `key` and returns the node it ends at, so a caller
    /// building a derived structure can keep a handle to the leaf.
    pub(crate) fn insert_suffix(&mut self, key: &str) -> NodeId {
        debug_assert!(!key.is_empty());
        let mut current = self.root;
        let mut rest = key;
        loop {
            let Some(first) = rest.chars().next() else {
                break;
            };
            match self.arena.get(current).children.get(&first).copied() {
                None => {
                    let child = self.arena.alloc(Node::new(rest.to_string(), current));
                    self.arena.get_mut(current).children.insert(first, child);
                    current = child;
                    break;
                }
                Some(child) => {
                    let label = &self.arena.get(child).label;
                    let matched = longest_common_prefix(rest, label);
                    if matched == label.len() {
                        // The whole edge matches; continue below it.
                        current = child;
                    } else {
                        // The key diverges inside this edge.
                        current = self.split(child, matched);
                    }
                    rest = &rest[matched..];
                }
            }
        }
        self.arena.get_mut(current).is_word = true;

        if cfg!(debug_assertions) {
            self.assert_compressed();
        }
        current
    }

    /// Follows `s` from the root across whole edge labels only. Returns
    /// the last node reached and whatever part of `s` could not be
    /// matched; the remainder is empty iff `s` ends exactly on a node
    /// boundary.
    pub(crate) fn follow_path<'a>(&self, s: &'a str) -> (NodeId, &'a str) {
        let mut current = self.root;
        let mut rest = s;
        while let Some(first) = rest.chars().next() {
            let Some(&child) = self.arena.get(current).children.get(&first) else {
                break;
            };
            match rest.strip_prefix(self.arena.get(child).label.as_str()) {
                Some(remainder) => {
                    current = child;
                    rest = remainder;
                }
                None => break,
            }
        }
        (current, rest)
    }

    /// Resolves a query that ends inside an edge: the child of `node`
    /// whose label starts with `rest`, if any.
    pub(crate) fn descend_partial(&self, node: NodeId, rest: &str) -> Option<NodeId> {
        let first = rest.chars().next()?;
        let &child = self.arena.get(node).children.get(&first)?;
        if self.arena.get(child).label.starts_with(rest) {
            Some(child)
        } else {
            None
        }
    }

    /// Number of word nodes in the subtree rooted at `node`, the node
    /// itself included.
    pub(crate) fn count_word_nodes(&self, node: NodeId) -> usize {
        let n = self.arena.get(node);
        let own = if n.is_word { 1 } else { 0 };
        n.children
            .values()
            .map(|&child| self.count_word_nodes(child))
            .sum::<usize>()
            + own
    }

    pub(crate) fn root_id(&self) -> NodeId {
        self.root
    }

    pub(crate) fn label(&self, node: NodeId) -> &str {
        &self.arena.get(node).label
    }

    pub(crate) fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).parent
    }

    pub(crate) fn child_ids(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.arena.get(node).children.values().copied()
    }

    pub(crate) fn child_count(&self, node: NodeId) -> usize {
        self.arena.get(node).children.len()
    }

    /// Splits `child`'s label at byte offset `at`: a new intermediate
    /// node takes over the first `at` bytes, and `child` keeps the
    /// remainder as the intermediate's only child. Returns the
    /// intermediate node.
    fn split(&mut self, child: NodeId, at: usize) -> NodeId {
        let parent = self
            .arena
            .get(child)
            .parent
            .expect("the root has no label to split");
        let label = std::mem::take(&mut self.arena.get_mut(child).label);
        let head = label[..at].to_string();
        let tail = label[at..].to_string();
        let head_first = head.chars().next().expect("split point is inside the label");
        let tail_first = tail.chars().next().expect("split point is inside the label");

        let mid = self.arena.alloc(Node::new(head, parent));
        let replaced = self.arena.get_mut(parent).children.insert(head_first, mid);
        debug_assert_eq!(replaced, Some(child));

        let child_node = self.arena.get_mut(child);
        child_node.label = tail;
        child_node.parent = Some(mid);
        self.arena.get_mut(mid).children.insert(tail_first, child);
        mid
    }

    /// Re-establishes maximal compression at `id` after a removal: a
    /// childless non-word node is pruned and the check repeats at its
    /// parent; a non-word node with exactly one child is merged with it.
    fn restore_compression(&mut self, id: NodeId) {
        if id == self.root || self.arena.get(id).is_word {
            return;
        }
        match self.arena.get(id).children.len() {
            0 => {
                let node = self.arena.free(id);
                let parent = node.parent.expect("only the root has no parent");
                let first = node
                    .label
                    .chars()
                    .next()
                    .expect("non-root labels are non-empty");
                let removed = self.arena.get_mut(parent).children.remove(&first);
                debug_assert_eq!(removed, Some(id));
                self.restore_compression(parent);
            }
            1 => self.merge_with_only_child(id),
            _ => {}
        }
    }

    /// Replaces `id` and its only child with one node spelling both
    /// labels. The parent's structure is untouched beyond the swapped
    /// child entry, so no further checks are needed above.
    fn merge_with_only_child(&mut self, id: NodeId) {
        let &child = self
            .arena
            .get(id)
            .children
            .values()
            .next()
            .expect("caller checked for a single child");

        let node = self.arena.free(id);
        let parent = node.parent.expect("only the root has no parent");
        let first = node
            .label
            .chars()
            .next()
            .expect("non-root labels are non-empty");

        let child_node = self.arena.get_mut(child);
        let mut label = node.label;
        label.push_str(&child_node.label);
        child_node.label = label;
        child_node.parent = Some(parent);
        self.arena.get_mut(parent).children.insert(first, child);
    }

    /// Depth-first collection of every word in the subtree at `node`.
    /// `path` spells the root-to-`node` string and is restored before
    /// returning.
    fn collect_words(&self, node: NodeId, path: &mut String, out: &mut Vec<String>) {
        let n = self.arena.get(node);
        if n.is_word {
            out.push(path.clone());
        }
        for &child in n.children.values() {
            let label_len = self.arena.get(child).label.len();
            path.push_str(&self.arena.get(child).label);
            self.collect_words(child, path, out);
            path.truncate(path.len() - label_len);
        }
    }

    /// Walks the whole trie re-checking the compression invariants:
    /// labels are non-empty, child keys match label first characters,
    /// parent references match the traversal, and removals left behind
    /// neither childless nor single-child non-word nodes.
    fn assert_compressed(&self) {
        self.assert_node(self.root);
    }

    fn assert_node(&self, id: NodeId) {
        let node = self.arena.get(id);
        if id != self.root {
            assert!(!node.label.is_empty(), "non-root node with an empty label");
            assert!(
                node.is_word || !node.children.is_empty(),
                "childless non-word node survived a removal"
            );
            assert!(
                node.is_word || node.children.len() != 1,
                "uncompressed chain: single-child non-word node"
            );
        }
        for (&first, &child) in &node.children {
            let child_node = self.arena.get(child);
            assert_eq!(child_node.label.chars().next(), Some(first));
            assert_eq!(child_node.parent, Some(id));
            self.assert_node(child);
        }
    }
}

/// Byte length of the longest common prefix of `a` and `b`. The offset
/// always falls on a character boundary in both strings.
fn longest_common_prefix(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|&((_, ca), cb)| ca != cb)
        .map(|((at, _), _)| at)
        .unwrap_or_else(|| a.len().min(b.len()))
}

impl fmt::Debug for RadixTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadixTrie")
            .field(
                "root",
                &DebugNode {
                    trie: self,
                    id: self.root,
                },
            )
            .finish()
    }
}

struct DebugNode<'a> {
    trie: &'a RadixTrie,
    id: NodeId,
}

impl fmt::Debug for DebugNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.trie.arena.get(self.id);
        f.debug_struct("Node")
            .field("label", &node.label)
            .field("is_word", &node.is_word)
            .field("children", &DebugChildren { trie: self.trie, node })
            .finish()
    }
}

struct DebugChildren<'a> {
    trie: &'a RadixTrie,
    node: &'a Node,
}

impl fmt::Debug for DebugChildren<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.node.children.iter().map(|(&first, &id)| {
                (
                    first,
                    DebugNode {
                        trie: self.trie,
                        id,
                    },
                )
            }))
            .finish()
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::{Key, Op};

    fn do_ops(ops: &[Op], trie: &mut RadixTrie, model: &mut BTreeSet<String>) {
        for op in ops {
            match op {
                Op::Insert(Key(key)) => {
                    trie.insert(key).expect("generated keys are non-empty");
                    model.insert(key.clone());
                }
                Op::Remove(Key(key)) => {
                    trie.remove(key);
                    model.remove(key.as_str());
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations(ops: Vec<Op>) -> bool {
            let mut trie = RadixTrie::new();
            let mut model = BTreeSet::new();
            do_ops(&ops, &mut trie, &mut model);

            // The walk also re-checks every compression invariant.
            trie.assert_compressed();

            let words: Vec<String> = model.iter().cloned().collect();
            trie.auto_complete("") == words && model.iter().all(|key| trie.contains(key))
        }
    }

    quickcheck::quickcheck! {
        fn agrees_with_the_plain_trie(ops: Vec<Op>) -> bool {
            let mut plain = crate::trie::Trie::new();
            let mut radix = RadixTrie::new();
            for op in &ops {
                match op {
                    Op::Insert(Key(key)) => {
                        plain.insert(key).expect("generated keys are non-empty");
                        radix.insert(key).expect("generated keys are non-empty");
                    }
                    Op::Remove(Key(key)) => {
                        plain.remove(key);
                        radix.remove(key);
                    }
                }
            }

            ["", "a", "b", "ab", "abc"].iter().all(|prefix| {
                plain.auto_complete(prefix) == radix.auto_complete(prefix)
                    && plain.has_prefix(prefix) == radix.has_prefix(prefix)
            })
        }
    }

    quickcheck::quickcheck! {
        fn prefix_monotonicity(keys: Vec<Key>, probe: Key, extension: Key) -> bool {
            let mut trie = RadixTrie::new();
            for Key(key) in &keys {
                trie.insert(key).expect("generated keys are non-empty");
            }

            let Key(probe) = probe;
            let Key(extension) = extension;
            // Once a prefix is absent, no extension of it can be present.
            trie.has_prefix(&probe) || !trie.has_prefix(&format!("{}{}", probe, extension))
        }
    }
}
