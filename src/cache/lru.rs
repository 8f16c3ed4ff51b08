//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::HashMap;
use std::hash::Hash;

// == Node ==
#[derive(Debug)]
struct Node<K> {
    key: K,
    /// Neighbor towards the most recently used end
    newer: Option<usize>,
    /// Neighbor towards the least recently used end
    older: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a doubly linked list stored in a slab, indexed by key, so
/// touch, remove and eviction are all O(1):
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug)]
pub struct LruTracker<K> {
    index: HashMap<K, usize>,
    nodes: Vec<Option<Node<K>>>,
    /// Vacant slab slots available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }
}

impl<K> LruTracker<K>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as recently used (moves to head).
    ///
    /// Unknown keys are inserted at the head.
    pub fn touch(&mut self, key: &K) {
        if let Some(&slot) = self.index.get(key) {
            self.unlink(slot);
            self.push_front(slot);
            return;
        }

        let node = Node {
            key: key.clone(),
            newer: None,
            older: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.index.insert(key.clone(), slot);
        self.push_front(slot);
    }

    // == Remove ==
    /// Removes a key from the tracker. Returns whether it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(slot) => {
                self.release(slot);
                true
            }
            None => false,
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let slot = self.tail?;
        let node = self.release(slot)?;
        self.index.remove(&node.key);
        Some(node.key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.tail
            .and_then(|slot| self.nodes[slot].as_ref())
            .map(|node| &node.key)
    }

    // == Iterate ==
    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tracker: self,
            cursor: self.tail,
        }
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == List Plumbing ==
    /// Unlinks a slot and returns its node to the free list.
    fn release(&mut self, slot: usize) -> Option<Node<K>> {
        self.unlink(slot);
        let node = self.nodes[slot].take()?;
        self.free.push(slot);
        Some(node)
    }

    fn unlink(&mut self, slot: usize) {
        let (newer, older) = match self.nodes[slot].as_mut() {
            Some(node) => (node.newer.take(), node.older.take()),
            None => return,
        };

        match newer.and_then(|n| self.nodes[n].as_mut()) {
            Some(node) => node.older = older,
            None => self.head = older,
        }
        match older.and_then(|o| self.nodes[o].as_mut()) {
            Some(node) => node.newer = newer,
            None => self.tail = newer,
        }
    }

    fn push_front(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(node) = self.nodes[slot].as_mut() {
            node.newer = None;
            node.older = old_head;
        }
        match old_head.and_then(|h| self.nodes[h].as_mut()) {
            Some(node) => node.newer = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }
}

// == Iterator ==
/// Iterator over tracked keys, least recently used first.
pub struct Iter<'a, K> {
    tracker: &'a LruTracker<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tracker = self.tracker;
        let node = tracker.nodes[self.cursor?].as_ref()?;
        self.cursor = node.newer;
        Some(&node.key)
    }
}
