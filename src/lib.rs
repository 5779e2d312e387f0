//! # keyed-trie
//!
//! A character-indexed trie map from strings to values, with in-place
//! update-or-insert and self-pruning deletion.
//!
//! Every node optionally holds a value and owns a table from the next character
//! to a child node. Shared prefixes share nodes. Deleting a key removes every
//! node that no longer leads to a value, so the tree never keeps dead leaves.
//!
//! ## Example
//!
//! ```rust
//! use keyed_trie::KeyedTrie;
//!
//! let mut trie: KeyedTrie<u32> = KeyedTrie::new();
//! trie.insert("cat", 1)?;
//! trie.compute_or_insert("cat", 1, |n| n + 1)?;
//! trie.compute_or_insert("car", 1, |n| n + 1)?;
//!
//! assert_eq!(trie.find("cat"), Some(&2));
//! assert_eq!(trie.find("car"), Some(&1));
//! assert_eq!(trie.find("ca"), None);
//!
//! assert!(trie.delete("cat"));
//! assert!(!trie.contains_value("cat"));
//! # Ok::<(), keyed_trie::TrieError>(())
//! ```

#![forbid(unsafe_code)]

mod table;

pub use table::{CharMap, ChildTable, LetterTable, Node};

use std::fmt;

use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Rejection of a key by a mutating operation.
///
/// Lookups never fail: a key that could not have been stored is simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrieError {
    /// The empty key would address the root, which never holds a value.
    #[error("empty keys are not supported")]
    EmptyKey,
    /// The child table has no slot for this character.
    #[error("character {ch:?} at position {position} is outside the table's alphabet")]
    InvalidCharacter { ch: char, position: usize },
}

// =============================================================================
// KeyedTrie
// =============================================================================

/// A trie map keyed by strings.
///
/// `C` selects the per-node child table: [`CharMap`] (any `char`, the default)
/// or [`LetterTable`] (lowercase ASCII only, see [`LetterTrie`]).
///
/// The structure is single-writer: mutation takes `&mut self` and there is no
/// internal locking. Callers sharing it across threads wrap it themselves.
pub struct KeyedTrie<V, C = CharMap<V>> {
    /// Represents the empty prefix. Never holds a value and is never pruned.
    root: Node<V, C>,
    len: usize,
}

/// A [`KeyedTrie`] over a fixed `'a'..='z'` alphabet.
pub type LetterTrie<V> = KeyedTrie<V, LetterTable<V>>;

impl<V, C: ChildTable<V>> KeyedTrie<V, C> {
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Number of keys holding a value.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.len = 0;
    }

    /// Rejects keys the trie cannot store, before anything is touched.
    fn check_key(key: &str) -> Result<(), TrieError> {
        if key.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        match key.chars().enumerate().find(|&(_, ch)| !C::admits(ch)) {
            Some((position, ch)) => Err(TrieError::InvalidCharacter { ch, position }),
            None => Ok(()),
        }
    }

    fn node_at_mut<'a>(root: &'a mut Node<V, C>, path: &[char]) -> Option<&'a mut Node<V, C>> {
        let mut current = root;
        for &ch in path {
            current = current.children.get_mut(ch)?;
        }
        Some(current)
    }

    fn node(&self, key: &str) -> Option<&Node<V, C>> {
        let mut current = &self.root;
        for ch in key.chars() {
            current = current.children.get(ch)?;
        }
        Some(current)
    }

    /// Walks to the terminal node for `key`, creating missing nodes on the way.
    ///
    /// Takes the root rather than `self` so callers can still update `len`.
    fn descend_or_create<'a>(
        root: &'a mut Node<V, C>,
        key: &str,
    ) -> Result<&'a mut Node<V, C>, TrieError> {
        Self::check_key(key)?;
        let mut current = root;
        for (position, ch) in key.chars().enumerate() {
            current = current
                .children
                .get_or_insert(ch)
                .ok_or(TrieError::InvalidCharacter { ch, position })?;
        }
        Ok(current)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// Creates at most one node per character of `key`; intermediate nodes are
    /// created without values.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, TrieError> {
        let node = Self::descend_or_create(&mut self.root, key)?;
        let old = node.value.replace(value);
        if old.is_none() {
            self.len += 1;
        }
        Ok(old)
    }

    /// Looks up the value stored under `key`.
    ///
    /// Stops at the first character with no child. A key that only exists as a
    /// prefix of other keys has no value.
    pub fn find(&self, key: &str) -> Option<&V> {
        self.node(key)?.value.as_ref()
    }

    /// Whether `key` was explicitly stored, as opposed to merely being a prefix
    /// of stored keys.
    pub fn contains_value(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Replaces the value under `key` with `remap(current)` if there is one,
    /// otherwise stores `initial`. Returns the value now stored.
    ///
    /// Exactly one of the two happens. A key that currently exists only as a
    /// path node gains a value without disturbing its children. Nodes are only
    /// created when the key turns out to be absent, which is the insert branch.
    ///
    /// The current value stays in place while `remap` runs, so a panicking
    /// `remap` leaves the key and its old value intact.
    pub fn compute_or_insert<F>(&mut self, key: &str, initial: V, remap: F) -> Result<&V, TrieError>
    where
        F: FnOnce(&V) -> V,
    {
        let node = Self::descend_or_create(&mut self.root, key)?;
        let stored = match node.value {
            Some(ref mut current) => {
                *current = remap(current);
                current
            }
            None => {
                self.len += 1;
                node.value.insert(initial)
            }
        };
        Ok(&*stored)
    }

    /// Deletes `key`, returning whether it held a value.
    ///
    /// See [`KeyedTrie::remove`].
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    /// Deletes `key` and returns its value.
    ///
    /// Nodes left with neither a value nor children are unlinked bottom-up.
    /// Pruning stops at the first ancestor that still holds a value or has
    /// other children. The root is never removed. A key with no value leaves
    /// the tree untouched.
    ///
    /// Runs in two passes with no recursion, so key length is unbounded. The
    /// read-only descent records the path and the depth of the deepest
    /// ancestor that survives the delete. The second pass either clears the
    /// value in place (the terminal still has children) or unlinks the whole
    /// dead branch hanging below that ancestor.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut path: Vec<char> = Vec::new();
        let mut keep = 0;
        let mut current = &self.root;
        for ch in key.chars() {
            // `current` sits at depth `path.len()`; it survives if it holds a
            // value or branches away from the path. The root always survives.
            if current.value.is_some() || current.children.len() > 1 {
                keep = path.len();
            }
            path.push(ch);
            current = current.children.get(ch)?;
        }
        current.value.as_ref()?;

        let value = if !current.children.is_empty() {
            Self::node_at_mut(&mut self.root, &path)?.value.take()
        } else {
            let survivor = Self::node_at_mut(&mut self.root, &path[..keep])?;
            let mut branch = survivor.children.remove(path[keep])?;
            let terminal = Self::node_at_mut(&mut branch, &path[keep + 1..])?;
            terminal.value.take()
        }?;
        self.len -= 1;
        Some(value)
    }

    /// Number of child entries under the node spelling `prefix`, or `None` if
    /// no node spells it.
    pub fn branch_width(&self, prefix: &str) -> Option<usize> {
        self.node(prefix).map(|node| node.children.len())
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += 1;
            node.children.for_each(|_, child| stack.push(child));
        }
        count
    }

    /// Iterates over `(key, value)` pairs, depth first.
    ///
    /// Keys come out in child-table order: arbitrary for [`CharMap`],
    /// lexicographic for [`LetterTable`].
    pub fn iter(&self) -> Iter<'_, V, C> {
        Iter {
            stack: vec![(String::new(), &self.root)],
        }
    }
}

impl<V, C: ChildTable<V>> Default for KeyedTrie<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, C: ChildTable<V>> Clone for KeyedTrie<V, C> {
    fn clone(&self) -> Self {
        Self {
            root: clone_tree(&self.root),
            len: self.len,
        }
    }
}

/// Post-order copy with an explicit frame stack. A frame is finished once all
/// of its children have been copied into `children`, and is then attached to
/// its parent's frame.
fn clone_tree<V: Clone, C: ChildTable<V>>(root: &Node<V, C>) -> Node<V, C> {
    struct Frame<'a, V, C> {
        ch: char,
        src: &'a Node<V, C>,
        pending: Vec<(char, &'a Node<V, C>)>,
        children: C,
    }

    fn open<'a, V, C: ChildTable<V>>(ch: char, src: &'a Node<V, C>) -> Frame<'a, V, C> {
        let mut pending = Vec::with_capacity(src.children.len());
        src.children.for_each(|ch, child| pending.push((ch, child)));
        Frame {
            ch,
            src,
            pending,
            children: C::default(),
        }
    }

    let mut stack = vec![open('\0', root)];
    while let Some(top) = stack.last_mut() {
        if let Some((ch, child)) = top.pending.pop() {
            stack.push(open(ch, child));
            continue;
        }
        let Some(frame) = stack.pop() else { break };
        let node = Node {
            value: frame.src.value.clone(),
            children: frame.children,
        };
        match stack.last_mut() {
            Some(parent) => {
                if let Some(slot) = parent.children.get_or_insert(frame.ch) {
                    *slot = node;
                }
            }
            None => return node,
        }
    }
    // The root frame is always the last one finished and returns above.
    Node::new()
}

impl<V: fmt::Debug, C: ChildTable<V>> fmt::Debug for KeyedTrie<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, C: ChildTable<V>> IntoIterator for &'a KeyedTrie<V, C> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`KeyedTrie`].
pub struct Iter<'a, V, C> {
    stack: Vec<(String, &'a Node<V, C>)>,
}

impl<'a, V, C: ChildTable<V>> Iterator for Iter<'a, V, C> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((key, node)) = self.stack.pop() {
            // Push in reverse so children pop in table order.
            let start = self.stack.len();
            node.children.for_each(|ch, child| {
                let mut child_key = String::with_capacity(key.len() + ch.len_utf8());
                child_key.push_str(&key);
                child_key.push(ch);
                self.stack.push((child_key, child));
            });
            self.stack[start..].reverse();

            if let Some(value) = node.value.as_ref() {
                return Some((key, value));
            }
        }
        None
    }
}


#[cfg(test)]
mod proptests;
