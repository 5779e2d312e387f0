//! Child tables: the per-node mapping from the next character to a child node.
//!
//! Two layouts are provided:
//!
//! - [`CharMap`]: a `HashMap<char, Node>`. Accepts any `char`.
//! - [`LetterTable`]: 26 boxed slots indexed by `'a'..='z'`. Trades memory for
//!   branch-free indexing on a bounded alphabet and rejects everything else.

use std::collections::HashMap;

/// A single trie node.
///
/// `value` is `Some` only when a key terminating here was explicitly assigned.
/// A node without a value is a pure path node and exists only because one of
/// its descendants holds a value.
///
/// Not `Clone`; [`KeyedTrie`](crate::KeyedTrie) clones a whole tree with an
/// explicit stack.
pub struct Node<V, C> {
    pub(crate) value: Option<V>,
    pub(crate) children: C,
}

impl<V, C: ChildTable<V>> Node<V, C> {
    pub(crate) fn new() -> Self {
        Self {
            value: None,
            children: C::default(),
        }
    }

    /// The value stored at this node, if any.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// This node's children.
    #[inline]
    pub fn children(&self) -> &C {
        &self.children
    }

    /// True for a node that holds nothing and leads nowhere. Such a node must
    /// not outlive the delete that produced it.
    #[cfg(test)]
    pub(crate) fn is_dead(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}

/// Mapping from a character to the child node reached through it.
///
/// Each child is exclusively owned by its table; nodes are never shared.
pub trait ChildTable<V>: Default + Sized {
    /// Whether this table has a slot for `ch`.
    fn admits(ch: char) -> bool;

    fn get(&self, ch: char) -> Option<&Node<V, Self>>;

    fn get_mut(&mut self, ch: char) -> Option<&mut Node<V, Self>>;

    /// Returns the child for `ch`, creating an empty one if needed.
    ///
    /// Returns `None` only when `ch` is not admitted.
    fn get_or_insert(&mut self, ch: char) -> Option<&mut Node<V, Self>>;

    fn remove(&mut self, ch: char) -> Option<Node<V, Self>>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `f` with every `(char, child)` pair. Order is table-defined.
    fn for_each<'a, F>(&'a self, f: F)
    where
        V: 'a,
        F: FnMut(char, &'a Node<V, Self>);
}

// =============================================================================
// CharMap
// =============================================================================

/// General child table backed by a `HashMap`. Iteration order is arbitrary.
pub struct CharMap<V> {
    map: HashMap<char, Node<V, CharMap<V>>>,
}

impl<V> Default for CharMap<V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

// Teardown is iterative: descendants move onto a heap stack and are emptied
// before they drop, so no nested drop ever sees a non-empty table.
impl<V> Drop for CharMap<V> {
    fn drop(&mut self) {
        let mut stack: Vec<Node<V, CharMap<V>>> = self.map.drain().map(|(_, n)| n).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.map.drain().map(|(_, n)| n));
        }
    }
}

impl<V> ChildTable<V> for CharMap<V> {
    #[inline]
    fn admits(_ch: char) -> bool {
        true
    }

    #[inline]
    fn get(&self, ch: char) -> Option<&Node<V, Self>> {
        self.map.get(&ch)
    }

    #[inline]
    fn get_mut(&mut self, ch: char) -> Option<&mut Node<V, Self>> {
        self.map.get_mut(&ch)
    }

    #[inline]
    fn get_or_insert(&mut self, ch: char) -> Option<&mut Node<V, Self>> {
        Some(self.map.entry(ch).or_insert_with(Node::new))
    }

    #[inline]
    fn remove(&mut self, ch: char) -> Option<Node<V, Self>> {
        self.map.remove(&ch)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    fn for_each<'a, F>(&'a self, mut f: F)
    where
        V: 'a,
        F: FnMut(char, &'a Node<V, Self>),
    {
        for (&ch, child) in &self.map {
            f(ch, child);
        }
    }
}

// =============================================================================
// LetterTable
// =============================================================================

const LETTERS: usize = 26;

/// Fixed 26-slot child table for lowercase ASCII letters.
///
/// Any other character maps to no slot at all, so a bad key can never alias a
/// sibling's slot. Iteration is alphabetical.
pub struct LetterTable<V> {
    slots: [Option<Box<Node<V, LetterTable<V>>>>; LETTERS],
    len: u8,
}

impl<V> LetterTable<V> {
    #[inline]
    fn slot(ch: char) -> Option<usize> {
        ch.is_ascii_lowercase()
            .then(|| (ch as u32 - 'a' as u32) as usize)
    }

    #[inline]
    fn letter(slot: usize) -> char {
        debug_assert!(slot < LETTERS);
        char::from(b'a' + slot as u8)
    }
}

impl<V> Default for LetterTable<V> {
    fn default() -> Self {
        Self {
            slots: Default::default(),
            len: 0,
        }
    }
}

impl<V> Drop for LetterTable<V> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<V, LetterTable<V>>>> =
            self.slots.iter_mut().filter_map(Option::take).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.slots.iter_mut().filter_map(Option::take));
        }
    }
}

impl<V> ChildTable<V> for LetterTable<V> {
    #[inline]
    fn admits(ch: char) -> bool {
        Self::slot(ch).is_some()
    }

    #[inline]
    fn get(&self, ch: char) -> Option<&Node<V, Self>> {
        self.slots[Self::slot(ch)?].as_deref()
    }

    #[inline]
    fn get_mut(&mut self, ch: char) -> Option<&mut Node<V, Self>> {
        self.slots[Self::slot(ch)?].as_deref_mut()
    }

    fn get_or_insert(&mut self, ch: char) -> Option<&mut Node<V, Self>> {
        let slot = &mut self.slots[Self::slot(ch)?];
        if slot.is_none() {
            self.len += 1;
        }
        Some(slot.get_or_insert_with(|| Box::new(Node::new())))
    }

    fn remove(&mut self, ch: char) -> Option<Node<V, Self>> {
        let removed = self.slots[Self::slot(ch)?].take()?;
        self.len -= 1;
        Some(*removed)
    }

    #[inline]
    fn len(&self) -> usize {
        usize::from(self.len)
    }

    fn for_each<'a, F>(&'a self, mut f: F)
    where
        V: 'a,
        F: FnMut(char, &'a Node<V, Self>),
    {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(child) = slot {
                f(Self::letter(i), child);
            }
        }
    }
}
