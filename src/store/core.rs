//! store/core — UserList, node arena, lock handling, allocation errors.
//!
//! Nodes live in a slot arena (`Vec<UserNode>`). Slot 0 is the sentinel that
//! names the list; every other slot is either linked on the list and holds a
//! record, or sits on the free chain (threaded through `links.next`, a slot
//! pointing at itself ends the chain) and holds nothing.

use log::{debug, info, warn};
use std::collections::TryReserveError;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{StoreBuilder, StoreConfig};
use crate::consts::SENTINEL;
use crate::list::{list_init, Linked, ListLinks};
use crate::metrics;
use crate::record::Record;

/// Node storage could not be obtained. The store is left unchanged.
#[derive(Debug)]
pub enum AllocationError {
    /// `max_records` from the config is reached.
    CapacityReached { max: usize },
    /// Growing the node arena failed.
    OutOfMemory(TryReserveError),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::CapacityReached { max } => {
                write!(f, "node allocation failed: store capacity of {} records reached", max)
            }
            AllocationError::OutOfMemory(e) => write!(f, "node allocation failed: {}", e),
        }
    }
}

impl std::error::Error for AllocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AllocationError::OutOfMemory(e) => Some(e),
            AllocationError::CapacityReached { .. } => None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UserNode {
    pub(crate) links: ListLinks,
    pub(crate) data: Option<Record>,
}

impl Linked for UserNode {
    #[inline]
    fn links(&self) -> &ListLinks {
        &self.links
    }
    #[inline]
    fn links_mut(&mut self) -> &mut ListLinks {
        &mut self.links
    }
}

/// Everything behind the store's mutex.
#[derive(Debug)]
pub(crate) struct ListState {
    pub(crate) nodes: Vec<UserNode>,
    free_head: Option<usize>,
    /// Number of nodes reachable from the sentinel.
    pub(crate) len: usize,
}

impl ListState {
    fn new(initial_capacity: usize) -> Self {
        let mut nodes = Vec::new();
        if let Err(e) = nodes.try_reserve(initial_capacity.saturating_add(1)) {
            warn!("store: could not pre-reserve {} slots: {}", initial_capacity, e);
        }
        nodes.push(UserNode {
            links: ListLinks::detached(SENTINEL),
            data: None,
        });
        list_init(&mut nodes, SENTINEL);
        Self {
            nodes,
            free_head: None,
            len: 0,
        }
    }

    /// Take a slot for `rec`, recycling a freed one first. The slot comes back detached.
    pub(crate) fn alloc_slot(
        &mut self,
        rec: Record,
        max_records: Option<usize>,
    ) -> Result<usize, AllocationError> {
        if let Some(max) = max_records {
            if self.len >= max {
                return Err(AllocationError::CapacityReached { max });
            }
        }

        if let Some(slot) = self.free_head {
            let next = self.nodes[slot].links.next;
            self.free_head = if next == slot { None } else { Some(next) };
            self.nodes[slot] = UserNode {
                links: ListLinks::detached(slot),
                data: Some(rec),
            };
            return Ok(slot);
        }

        self.nodes.try_reserve(1).map_err(AllocationError::OutOfMemory)?;
        let slot = self.nodes.len();
        self.nodes.push(UserNode {
            links: ListLinks::detached(slot),
            data: Some(rec),
        });
        Ok(slot)
    }

    /// Return an already unlinked slot to the free chain.
    pub(crate) fn release_slot(&mut self, slot: usize) {
        debug_assert_ne!(slot, SENTINEL);
        let next = self.free_head.unwrap_or(slot);
        self.nodes[slot] = UserNode {
            links: ListLinks { prev: slot, next },
            data: None,
        };
        self.free_head = Some(slot);
    }

    /// Drop every slot but the sentinel. Only valid once the list is empty.
    pub(crate) fn compact_empty(&mut self) {
        debug_assert_eq!(self.len, 0);
        self.nodes.truncate(1);
        self.free_head = None;
        list_init(&mut self.nodes, SENTINEL);
    }
}

/// Thread-safe doubly-linked store of [`Record`]s.
///
/// Duplicates are allowed. All operations are synchronous and take `&self`;
/// share the store between threads with `Arc<UserList>` or scoped borrows.
#[derive(Debug)]
pub struct UserList {
    pub(crate) cfg: StoreConfig,
    inner: Mutex<ListState>,
}

impl Default for UserList {
    fn default() -> Self {
        Self::new()
    }
}

impl UserList {
    /// Empty store with the default config (env is not consulted).
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Empty store configured from `UL_*` environment variables.
    pub fn from_env() -> Self {
        Self::with_config(StoreConfig::from_env())
    }

    pub fn with_config(cfg: StoreConfig) -> Self {
        debug!("store: init with {}", cfg);
        let state = ListState::new(cfg.initial_capacity);
        Self {
            cfg,
            inner: Mutex::new(state),
        }
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.cfg
    }

    /// Back to empty. All node storage is released.
    pub fn reset(&self) {
        let mut st = self.state();
        let dropped = st.len;
        *st = ListState::new(self.cfg.initial_capacity);
        drop(st);
        metrics::record_reset();
        info!("store: reset, {} record(s) released", dropped);
    }

    /// Acquire the store lock.
    ///
    /// Structural edits never run caller code, so a guard poisoned by a
    /// panicking traversal callback still holds a consistent list.
    pub(crate) fn state(&self) -> MutexGuard<'_, ListState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{list_add_tail, list_unlink};

    #[test]
    fn freed_slots_are_recycled_lifo() {
        let mut st = ListState::new(0);
        let a = st.alloc_slot(Record::new("a", 1), None).unwrap();
        let b = st.alloc_slot(Record::new("b", 2), None).unwrap();
        assert_eq!((a, b), (1, 2));

        st.release_slot(a);
        st.release_slot(b);
        assert!(st.nodes[a].data.is_none());

        let c = st.alloc_slot(Record::new("c", 3), None).unwrap();
        let d = st.alloc_slot(Record::new("d", 4), None).unwrap();
        let e = st.alloc_slot(Record::new("e", 5), None).unwrap();
        assert_eq!((c, d, e), (b, a, 3));
        assert_eq!(st.nodes[c].links, ListLinks::detached(c));
        assert_eq!(st.nodes.len(), 4);
    }

    #[test]
    fn capacity_limit_counts_linked_nodes() {
        let mut st = ListState::new(4);
        let a = st.alloc_slot(Record::new("a", 1), Some(1)).unwrap();
        list_add_tail(&mut st.nodes, a, SENTINEL);
        st.len += 1;

        let err = st.alloc_slot(Record::new("b", 2), Some(1)).unwrap_err();
        assert!(matches!(err, AllocationError::CapacityReached { max: 1 }));
        assert!(err.to_string().contains("capacity of 1"));

        list_unlink(&mut st.nodes, a);
        st.release_slot(a);
        st.len -= 1;
        assert!(st.alloc_slot(Record::new("b", 2), Some(1)).is_ok());
    }

    #[test]
    fn compact_keeps_only_sentinel() {
        let mut st = ListState::new(2);
        let a = st.alloc_slot(Record::new("a", 1), None).unwrap();
        st.release_slot(a);
        st.compact_empty();
        assert_eq!(st.nodes.len(), 1);
        assert_eq!(st.alloc_slot(Record::new("b", 2), None).unwrap(), 1);
    }
}
