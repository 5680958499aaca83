//! An uncompressed trie. Every node holds a single character, so a key is
//! spelled out one node per character along a path from the root, and keys
//! sharing a prefix share that path.
//!
//! # Examples
//!
//! ```
//! use tries::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("car")?;
//! trie.insert("card")?;
//!
//! // Exact membership only counts whole inserted keys.
//! assert!(trie.contains("car"));
//! assert!(!trie.contains("ca"));
//!
//! // But every step along the way is a known prefix.
//! assert!(trie.has_prefix("ca"));
//! assert_eq!(trie.auto_complete("ca"), vec!["car", "card"]);
//!
//! // Removing a key prunes the nodes nothing else needs.
//! trie.remove("card");
//! assert_eq!(trie.auto_complete("ca"), vec!["car"]);
//! # Ok::<(), tries::error::InvalidKey>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::arena::{Arena, NodeId};
use crate::error::InvalidKey;

#[derive(Clone)]
struct Node {
    /// `None` only for the root sentinel.
    character: Option<char>,
    /// Children keyed by their character. A `BTreeMap` keeps traversal
    /// order deterministic, so autocompletion comes out lexicographic.
    children: BTreeMap<char, NodeId>,
    /// True iff some inserted key ends at this node.
    is_word: bool,
    /// Non-owning back-reference; `None` only for the root.
    parent: Option<NodeId>,
}

impl Node {
    fn new(character: char, parent: NodeId) -> Self {
        Self {
            character: Some(character),
            children: BTreeMap::new(),
            is_word: false,
            parent: Some(parent),
        }
    }

    fn root() -> Self {
        Self {
            character: None,
            children: BTreeMap::new(),
            is_word: false,
            parent: None,
        }
    }
}

/// A prefix tree over string keys, one character per node.
#[derive(Clone)]
pub struct Trie {
    arena: Arena<Node>,
    root: NodeId,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Generates a new, empty `Trie`.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::root());
        Self { arena, root }
    }

    /// Inserts a key, creating one node per character that isn't already
    /// on the path. Inserting a key that is already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidKey`] for the empty key, before touching the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use tries::trie::Trie;
    ///
    /// let mut trie = Trie::new();
    /// assert!(trie.insert("tree").is_ok());
    /// assert!(trie.insert("").is_err());
    /// assert!(trie.contains("tree"));
    /// ```
    pub fn insert(&mut self, key: &str) -> Result<(), InvalidKey> {
        if key.is_empty() {
            return Err(InvalidKey);
        }
        let mut current = self.root;
        for character in key.chars() {
            let next = self.arena.get(current).children.get(&character).copied();
            current = match next {
                Some(child) => child,
                None => {
                    let child = self.arena.alloc(Node::new(character, current));
                    self.arena.get_mut(current).children.insert(character, child);
                    child
                }
            };
        }
        self.arena.get_mut(current).is_word = true;

        if cfg!(debug_assertions) {
            self.assert_pruned();
        }
        Ok(())
    }

    /// Removes a key. Removing a key that was never inserted (the empty
    /// key included) is a silent no-op.
    ///
    /// After unmarking the key's terminal node, every ancestor that ends
    /// up childless without being a word itself is pruned, walking parent
    /// references back up until a word node, a branching node, or the
    /// root stops the walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use tries::trie::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("tree")?;
    /// trie.insert("trees")?;
    ///
    /// trie.remove("trees");
    /// assert!(trie.contains("tree"));
    /// assert!(!trie.has_prefix("trees"));
    /// # Ok::<(), tries::error::InvalidKey>(())
    /// ```
    pub fn remove(&mut self, key: &str) {
        let Some(found) = self.walk(key) else {
            return;
        };
        if !self.arena.get(found).is_word {
            return;
        }
        self.arena.get_mut(found).is_word = false;

        let mut current = found;
        while current != self.root {
            let node = self.arena.get(current);
            if node.is_word || !node.children.is_empty() {
                break;
            }
            let parent = node.parent.expect("non-root node has a parent");
            let character = node.character.expect("non-root node has a character");
            self.arena.get_mut(parent).children.remove(&character);
            self.arena.free(current);
            current = parent;
        }

        if cfg!(debug_assertions) {
            self.assert_pruned();
        }
    }

    /// Whether the exact key was inserted. The empty key is never
    /// contained.
    pub fn contains(&self, key: &str) -> bool {
        self.walk(key)
            .map_or(false, |node| self.arena.get(node).is_word)
    }

    /// Whether some inserted key starts with `prefix`. The empty prefix
    /// matches trivially, even in an empty trie.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// Every inserted key starting with `prefix`, in lexicographic order.
    /// The same trie always yields the same sequence. An absent prefix
    /// yields an empty vector; the empty prefix yields every key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tries::trie::Trie;
    ///
    /// let mut trie = Trie::new();
    /// for word in ["trie", "tried", "try"] {
    ///     trie.insert(word)?;
    /// }
    ///
    /// assert_eq!(trie.auto_complete("tri"), vec!["trie", "tried"]);
    /// assert_eq!(trie.auto_complete(""), vec!["trie", "tried", "try"]);
    /// assert!(trie.auto_complete("tree").is_empty());
    /// # Ok::<(), tries::error::InvalidKey>(())
    /// ```
    pub fn auto_complete(&self, prefix: &str) -> Vec<String> {
        let mut completions = Vec::new();
        if let Some(start) = self.walk(prefix) {
            let mut path = prefix.to_string();
            self.collect_words(start, &mut path, &mut completions);
        }
        completions
    }

    /// Total number of live nodes, the root sentinel included: an empty
    /// trie has length 1, and internal nodes count even when no key ends
    /// at them.
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

    /// Follows `key` character by character from the root. `None` as soon
    /// as an edge is missing; `Some(root)` for the empty string.
    fn walk(&self, key: &str) -> Option<NodeId> {
        let mut current = self.root;
        for character in key.chars() {
            current = *self.arena.get(current).children.get(&character)?;
        }
        Some(current)
    }

    /// Depth-first collection of every word in the subtree at `node`.
    /// `path` spells the root-to-`node` string and is restored before
    /// returning.
    fn collect_words(&self, node: NodeId, path: &mut String, out: &mut Vec<String>) {
        let node = self.arena.get(node);
        if node.is_word {
            out.push(path.clone());
        }
        for (&character, &child) in &node.children {
            path.push(character);
            self.collect_words(child, path, out);
            path.pop();
        }
    }

    /// Walks the whole trie re-checking its structural invariants: edge
    /// characters match node characters, parent references match the
    /// traversal, and no childless non-word node survived a removal.
    fn assert_pruned(&self) {
        self.assert_node(self.root);
    }

    fn assert_node(&self, id: NodeId) {
        let node = self.arena.get(id);
        if id != self.root {
            assert!(
                node.is_word || !node.children.is_empty(),
                "childless non-word node survived pruning"
            );
        }
        for (&character, &child) in &node.children {
            let child_node = self.arena.get(child);
            assert_eq!(child_node.character, Some(character));
            assert_eq!(child_node.parent, Some(id));
            self.assert_node(child);
        }
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
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
    trie: &'a Trie,
    id: NodeId,
}

impl fmt::Debug for DebugNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.trie.arena.get(self.id);
        f.debug_struct("Node")
            .field("character", &node.character)
            .field("is_word", &node.is_word)
            .field("children", &DebugChildren { trie: self.trie, node })
            .finish()
    }
}

struct DebugChildren<'a> {
    trie: &'a Trie,
    node: &'a Node,
}

impl fmt::Debug for DebugChildren<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.node.children.iter().map(|(&character, &id)| {
                (
                    character,
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
mod tests {
    use super::*;

    #[test]
    fn empty_trie() {
        let trie = Trie::new();
        assert_eq!(trie.len(), 1); // the root sentinel
        assert!(trie.is_empty());
        assert!(!trie.contains(""));
        assert!(trie.has_prefix(""));
        assert_eq!(trie.auto_complete(""), Vec::<String>::new());
    }

    #[test]
    fn insert_rejects_the_empty_key() {
        let mut trie = Trie::new();
        assert_eq!(trie.insert(""), Err(InvalidKey));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn similar_words() {
        let mut trie = Trie::new();
        trie.insert("tre").unwrap();
        trie.insert("trees").unwrap();
        trie.insert("treed").unwrap();
        trie.remove("trees");
        trie.remove("tre");
        assert_eq!(trie.len(), 6);
        assert_eq!(trie.auto_complete("t"), vec!["treed"]);
    }

    #[test]
    fn many_words() {
        let mut trie = Trie::new();
        for word in [
            "car", "card", "cards", "cot", "cots", "trie", "tried", "tries", "try",
        ] {
            trie.insert(word).unwrap();
        }

        // Shared prefixes share nodes: 9 words, 15 characters of paths.
        assert_eq!(trie.len(), 16);
        assert!(trie.has_prefix("ca"));
        assert!(trie.contains("cards"));
        assert!(!trie.contains("c"));

        assert_eq!(
            trie.auto_complete(""),
            vec!["car", "card", "cards", "cot", "cots", "trie", "tried", "tries", "try"]
        );
        assert_eq!(
            trie.auto_complete("c"),
            vec!["car", "card", "cards", "cot", "cots"]
        );
        assert_eq!(trie.auto_complete("tri"), vec!["trie", "tried", "tries"]);
        assert_eq!(trie.auto_complete("caa"), Vec::<String>::new());
    }

    #[test]
    fn reinsert_is_idempotent() {
        let mut trie = Trie::new();
        trie.insert("tree").unwrap();
        let len = trie.len();
        let completions = trie.auto_complete("");

        trie.insert("tree").unwrap();
        assert_eq!(trie.len(), len);
        assert_eq!(trie.auto_complete(""), completions);
    }

    #[test]
    fn remove_absent_key_is_a_noop() {
        let mut trie = Trie::new();
        trie.insert("tree").unwrap();

        trie.remove("trees");
        trie.remove("tr"); // a prefix of a word, but not a word
        trie.remove("");

        assert!(trie.contains("tree"));
        assert_eq!(trie.len(), 5);
    }

    #[test]
    fn remove_restores_the_previous_state() {
        let mut trie = Trie::new();
        trie.insert("car").unwrap();
        let len = trie.len();
        let completions = trie.auto_complete("");

        trie.insert("card").unwrap();
        trie.remove("card");

        assert_eq!(trie.len(), len);
        assert_eq!(trie.auto_complete(""), completions);
    }

    #[test]
    fn pruning_stops_at_branching_nodes() {
        let mut trie = Trie::new();
        trie.insert("cot").unwrap();
        trie.insert("cots").unwrap();
        trie.remove("cots");

        // "cot" still needs c-o-t; only the "s" node goes away.
        assert_eq!(trie.len(), 4);
        assert!(trie.contains("cot"));
    }

    #[test]
    fn clear_resets_the_trie() {
        let mut trie = Trie::new();
        trie.insert("car").unwrap();
        trie.insert("cot").unwrap();

        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.auto_complete(""), Vec::<String>::new());
    }

    #[test]
    fn prefix_monotonicity() {
        let mut trie = Trie::new();
        trie.insert("car").unwrap();
        assert!(!trie.has_prefix("co"));
        assert!(!trie.has_prefix("cot"));
        assert!(!trie.has_prefix("cots"));
    }
}
