//! Intrusive circular doubly-linked list over index links.
//!
//! The list does not own anything. Callers keep their nodes in a slot table
//! (`&mut [N]`) and embed a [`ListLinks`] field in each slot; every function
//! here only rewires `prev`/`next` indexes of that table. A list is named by
//! its head slot: an empty list is a head whose links point at itself.
//!
//! Nothing in this module allocates, frees or fails. Out-of-range indexes are
//! a caller bug and panic via slice indexing.

/// Link field embedded in every slot that can be on a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLinks {
    pub prev: usize,
    pub next: usize,
}

impl ListLinks {
    /// Links of a slot that is on no list (points at itself).
    #[inline]
    pub const fn detached(at: usize) -> Self {
        Self { prev: at, next: at }
    }
}

/// Access to the embedded link field of a slot.
pub trait Linked {
    fn links(&self) -> &ListLinks;
    fn links_mut(&mut self) -> &mut ListLinks;
}

/// Make `head` an empty list.
#[inline]
pub fn list_init<N: Linked>(slots: &mut [N], head: usize) {
    *slots[head].links_mut() = ListLinks::detached(head);
}

#[inline]
pub fn list_is_empty<N: Linked>(slots: &[N], head: usize) -> bool {
    slots[head].links().next == head
}

#[inline]
fn link_between<N: Linked>(slots: &mut [N], node: usize, prev: usize, next: usize) {
    slots[next].links_mut().prev = node;
    *slots[node].links_mut() = ListLinks { prev, next };
    slots[prev].links_mut().next = node;
}

/// Link `node` right after `anchor`.
#[inline]
pub fn list_insert_after<N: Linked>(slots: &mut [N], node: usize, anchor: usize) {
    let next = slots[anchor].links().next;
    link_between(slots, node, anchor, next);
}

/// Link `node` right before `anchor`.
#[inline]
pub fn list_insert_before<N: Linked>(slots: &mut [N], node: usize, anchor: usize) {
    let prev = slots[anchor].links().prev;
    link_between(slots, node, prev, anchor);
}

/// Head insertion.
#[inline]
pub fn list_add<N: Linked>(slots: &mut [N], node: usize, head: usize) {
    list_insert_after(slots, node, head);
}

/// Tail insertion (before the head of a circular list).
#[inline]
pub fn list_add_tail<N: Linked>(slots: &mut [N], node: usize, head: usize) {
    list_insert_before(slots, node, head);
}

/// Remove `node` from whatever list it is on. The node is left detached.
#[inline]
pub fn list_unlink<N: Linked>(slots: &mut [N], node: usize) {
    let ListLinks { prev, next } = *slots[node].links();
    slots[prev].links_mut().next = next;
    slots[next].links_mut().prev = prev;
    *slots[node].links_mut() = ListLinks::detached(node);
}

/// Forward walk that survives unlinking of the node it just returned.
///
/// The cursor holds no borrow of the slot table: the successor is captured
/// on every [`SafeCursor::advance`], so between two calls the caller may
/// unlink (and recycle) the current node.
#[derive(Debug, Clone, Copy)]
pub struct SafeCursor {
    head: usize,
    next: usize,
}

impl SafeCursor {
    pub fn advance<N: Linked>(&mut self, slots: &[N]) -> Option<usize> {
        if self.next == self.head {
            return None;
        }
        let cur = self.next;
        self.next = slots[cur].links().next;
        Some(cur)
    }
}

pub fn list_for_each_safe<N: Linked>(slots: &[N], head: usize) -> SafeCursor {
    SafeCursor {
        head,
        next: slots[head].links().next,
    }
}
