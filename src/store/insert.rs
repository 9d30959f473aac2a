//! store/insert — head/tail insertion.

use anyhow::Result;
use log::{debug, warn};

use super::core::{ListState, UserList};
use crate::consts::SENTINEL;
use crate::list::{list_add, list_add_tail};
use crate::metrics;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum End {
    Head,
    Tail,
}

impl UserList {
    /// Insert a copy of `rec` at the head.
    ///
    /// Fails with [`AllocationError`](super::AllocationError) when no node can
    /// be obtained; the store is then unchanged.
    pub fn add_head(&self, rec: Record) -> Result<()> {
        let mut st = self.state();
        self.insert_locked(&mut st, rec, End::Head)
    }

    /// Insert a copy of `rec` at the tail.
    pub fn add_tail(&self, rec: Record) -> Result<()> {
        let mut st = self.state();
        self.insert_locked(&mut st, rec, End::Tail)
    }

    /// Caller holds the lock.
    pub(crate) fn insert_locked(&self, st: &mut ListState, rec: Record, end: End) -> Result<()> {
        let slot = match st.alloc_slot(rec, self.cfg.max_records) {
            Ok(slot) => slot,
            Err(e) => {
                metrics::record_alloc_failure();
                warn!("store: insert {:?} at {:?} rejected: {}", rec, end, e);
                return Err(e.into());
            }
        };

        match end {
            End::Head => {
                list_add(&mut st.nodes, slot, SENTINEL);
                metrics::record_insert_head();
            }
            End::Tail => {
                list_add_tail(&mut st.nodes, slot, SENTINEL);
                metrics::record_insert_tail();
            }
        }
        st.len += 1;

        debug!("store: inserted {:?} at {:?} (slot={}, len={})", rec, end, slot, st.len);
        Ok(())
    }
}
