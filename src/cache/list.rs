//! Ordered List Module
//!
//! Recency-ordered doubly linked list of cache nodes, stored in an arena and
//! addressed by generational handles.
//!
//! - Head = most recently touched
//! - Tail = least recently touched

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::cache::{Clock, EntryOptions, Node, NodeRef, SystemClock, DEFAULT_CAPACITY};

/// Source of per-list owner ids, so handles from one list are foreign to another.
static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

// == Removal Records ==
/// Why the list removed a node on its own initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalCause {
    /// Tail dropped to make room for an insert
    Evicted,
    /// Idle or live timeout observed
    Expired,
}

/// A node the list removed by itself (eviction, sweep, expired read).
///
/// The list knows nothing about keys. Records are kept only once an owner
/// opts in with [`OrderedList::with_removal_records`]; the owner then drains
/// them with [`OrderedList::take_reclaimed`] and maps the handles back.
#[derive(Debug, Clone, PartialEq)]
pub struct Reclaimed<V> {
    pub node: NodeRef,
    pub value: Option<V>,
    pub cause: RemovalCause,
}

#[derive(Debug)]
struct Slot<V> {
    generation: u64,
    node: Option<Node<V>>,
}

// == Ordered List ==
/// Arena-backed doubly linked list with a soft capacity and lazy expiry.
#[derive(Debug)]
pub struct OrderedList<V, C = SystemClock> {
    id: u64,
    slots: Vec<Slot<V>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    capacity: usize,
    clock: C,
    record_removals: bool,
    reclaimed: Vec<Reclaimed<V>>,
}

impl<V> OrderedList<V, SystemClock> {
    /// Creates an empty list on the wall clock.
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, SystemClock)
    }
}

impl<V> Default for OrderedList<V, SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V, C: Clock> OrderedList<V, C> {
    // == Constructor ==
    /// Creates an empty list reading time from `clock`.
    ///
    /// A zero capacity falls back to [`DEFAULT_CAPACITY`].
    pub fn with_clock(capacity: usize, clock: C) -> Self {
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            capacity: if capacity == 0 { DEFAULT_CAPACITY } else { capacity },
            clock,
            record_removals: false,
            reclaimed: Vec::new(),
        }
    }

    /// Keeps a [`Reclaimed`] record for every removal the list makes on its
    /// own. The owner must drain them with [`OrderedList::take_reclaimed`].
    pub fn with_removal_records(mut self) -> Self {
        self.record_removals = true;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Member count without sweeping. See [`OrderedList::length`].
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Inspection ==
    pub fn head(&self) -> Option<NodeRef> {
        self.head.map(|index| self.handle(index))
    }

    pub fn tail(&self) -> Option<NodeRef> {
        self.tail.map(|index| self.handle(index))
    }

    /// True iff `node` is the most recently touched member.
    pub fn is_head(&self, node: NodeRef) -> bool {
        self.contains(node) && self.head == Some(node.index)
    }

    /// True iff `node` is the least recently touched member.
    pub fn is_tail(&self, node: NodeRef) -> bool {
        self.contains(node) && self.tail == Some(node.index)
    }

    /// True iff `node` is a live member of this list.
    pub fn contains(&self, node: NodeRef) -> bool {
        node.owner == self.id
            && self
                .slots
                .get(node.index)
                .map(|slot| slot.generation == node.generation && slot.node.is_some())
                .unwrap_or(false)
    }

    pub fn node(&self, node: NodeRef) -> Option<&Node<V>> {
        if !self.contains(node) {
            return None;
        }
        self.slots[node.index].node.as_ref()
    }

    /// The member's value as visible right now, without side effects.
    pub fn value_of(&self, node: NodeRef) -> Option<&V> {
        let now = self.clock.now_ms();
        self.node(node)?.value_at(now)
    }

    /// Members from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (NodeRef, &Node<V>)> + '_ {
        std::iter::successors(self.head, move |&index| {
            self.slots[index].node.as_ref().and_then(|node| node.next)
        })
        .filter_map(move |index| {
            self.slots[index]
                .node
                .as_ref()
                .map(|node| (self.handle(index), node))
        })
    }

    // == Enqueue ==
    /// Inserts `value` as the new head.
    ///
    /// At capacity, expired members are purged first; if the list is still
    /// full the tail is evicted.
    pub fn enqueue(&mut self, value: V, options: EntryOptions) -> NodeRef {
        if self.len >= self.capacity {
            self.walk(true);
        }

        if self.len >= self.capacity {
            if let Some(tail) = self.tail {
                if let Some((node, value)) = self.remove_at(tail) {
                    debug!(index = node.index, "evicted least recently used node");
                    self.reclaim(node, value, RemovalCause::Evicted);
                }
            }
        }

        let now = self.clock.now_ms();
        self.link_front(Node::new(value, options, now))
    }

    // == Dequeue ==
    /// Removes and resets the tail. Returns false on an empty list.
    pub fn dequeue(&mut self) -> bool {
        match self.tail {
            Some(tail) => self.remove_at(tail).is_some(),
            None => false,
        }
    }

    // == Delete ==
    /// Unlinks and resets `node`.
    ///
    /// Stale, foreign or already-reset handles are ignored and return false.
    pub fn delete(&mut self, node: NodeRef) -> bool {
        if !self.contains(node) {
            return false;
        }
        self.remove_at(node.index).is_some()
    }

    // == Flush ==
    /// Resets every member and empties the list.
    pub fn flush(&mut self) {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let slot = &mut self.slots[index];
            cursor = slot.node.as_ref().and_then(|node| node.next);
            if let Some(mut node) = slot.node.take() {
                node.reset();
                slot.generation += 1;
                self.free.push(index);
            }
        }

        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Sweep ==
    /// Deletes every member whose live timeout has elapsed.
    ///
    /// Returns the number of members removed.
    pub fn sweep(&mut self) -> usize {
        self.walk(false)
    }

    // == Limit ==
    /// Raises or lowers the capacity to `n`.
    ///
    /// Ignored for zero, and whenever `n` would not exceed the current member
    /// count. Returns whether the new capacity was applied.
    pub fn limit(&mut self, n: usize) -> bool {
        if n == 0 || self.len >= n {
            debug!(requested = n, len = self.len, "capacity change rejected");
            return false;
        }
        self.capacity = n;
        debug!(capacity = n, "capacity updated");
        true
    }

    // == Length ==
    /// Sweeps dead members, then returns the member count.
    pub fn length(&mut self) -> usize {
        self.sweep();
        self.len
    }

    // == Promote ==
    /// Moves a member to the head as a fresh node.
    ///
    /// The member is read first with expiry evaluated. An expired member is
    /// removed and `None` is returned. Otherwise it is replaced by its renewed
    /// copy at the head and the new handle is returned.
    pub fn promote(&mut self, node: NodeRef) -> Option<NodeRef> {
        if !self.contains(node) {
            return None;
        }

        let now = self.clock.now_ms();
        let visible = self.slots[node.index]
            .node
            .as_mut()
            .map(|member| member.value(now).is_some())
            .unwrap_or(false);

        if !visible {
            if let Some((node, value)) = self.remove_at(node.index) {
                self.reclaim(node, value, RemovalCause::Expired);
            }
            return None;
        }

        let (_, detached) = self.take_at(node.index)?;
        Some(self.link_front(detached.renew(now)))
    }

    // == Reclaimed ==
    /// Drains the removals the list performed on its own since the last call.
    pub fn take_reclaimed(&mut self) -> Vec<Reclaimed<V>> {
        std::mem::take(&mut self.reclaimed)
    }

    // == Internals ==
    fn handle(&self, index: usize) -> NodeRef {
        NodeRef {
            owner: self.id,
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Walks head to tail removing dead members, and idle-expired ones too
    /// when `include_idle` is set.
    fn walk(&mut self, include_idle: bool) -> usize {
        let now = self.clock.now_ms();
        let mut cursor = self.head;
        let mut removed = 0;

        while let Some(index) = cursor {
            let (next, expired) = match self.slots[index].node.as_ref() {
                Some(node) => (
                    node.next,
                    node.is_dead(now) || (include_idle && node.is_idle_expired(now)),
                ),
                None => break,
            };

            if expired {
                if let Some((node, value)) = self.remove_at(index) {
                    self.reclaim(node, value, RemovalCause::Expired);
                    removed += 1;
                }
            }

            cursor = next;
        }

        if removed > 0 {
            debug!(removed, include_idle, "swept expired nodes");
        }
        removed
    }

    fn reclaim(&mut self, node: NodeRef, value: Option<V>, cause: RemovalCause) {
        if self.record_removals {
            self.reclaimed.push(Reclaimed { node, value, cause });
        }
    }

    fn remove_at(&mut self, index: usize) -> Option<(NodeRef, Option<V>)> {
        let (node, mut detached) = self.take_at(index)?;
        Some((node, detached.reset()))
    }

    /// Unlinks the node at `index` and frees its slot, handing the node back.
    fn take_at(&mut self, index: usize) -> Option<(NodeRef, Node<V>)> {
        let (prev, next) = {
            let node = self.slots.get(index)?.node.as_ref()?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => {
                if let Some(prev_node) = self.slots[prev].node.as_mut() {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(next_node) = self.slots[next].node.as_mut() {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        let handle = self.handle(index);
        let slot = &mut self.slots[index];
        let mut node = slot.node.take()?;
        slot.generation += 1;
        node.prev = None;
        node.next = None;

        self.free.push(index);
        self.len -= 1;
        Some((handle, node))
    }

    fn link_front(&mut self, mut node: Node<V>) -> NodeRef {
        node.prev = None;
        node.next = self.head;

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(head) => {
                if let Some(head_node) = self.slots[head].node.as_mut() {
                    head_node.prev = Some(index);
                }
            }
            None => self.tail = Some(index),
        }

        self.head = Some(index);
        self.len += 1;
        self.handle(index)
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let node = self.slots[index].node.as_ref().expect("member slot empty");
            assert_eq!(node.prev, prev);
            if node.next.is_none() {
                assert_eq!(self.tail, Some(index));
            }
            prev = Some(index);
            cursor = node.next;
            count += 1;
            assert!(count <= self.len);
        }

        assert_eq!(count, self.len);
    }
}
