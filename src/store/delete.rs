//! store/delete — removal by full value and bulk removal.

use log::{debug, info};

use super::core::UserList;
use crate::consts::SENTINEL;
use crate::list::{list_for_each_safe, list_unlink};
use crate::metrics;
use crate::record::Record;

impl UserList {
    /// Remove every node whose whole record equals `rec` (name buffer and age).
    /// Returns how many were removed; no match is a silent no-op.
    pub fn delete(&self, rec: &Record) -> usize {
        let mut st = self.state();
        let mut removed = 0usize;

        let mut cur = list_for_each_safe(&st.nodes, SENTINEL);
        while let Some(i) = cur.advance(&st.nodes) {
            if st.nodes[i].data.as_ref() == Some(rec) {
                list_unlink(&mut st.nodes, i);
                st.release_slot(i);
                st.len = st.len.saturating_sub(1);
                removed += 1;
            }
        }
        drop(st);

        metrics::record_deleted(removed);
        debug!("store: delete {:?} removed {} node(s)", rec, removed);
        removed
    }

    /// Remove every node. Safe on an empty store.
    pub fn delete_all(&self) -> usize {
        let mut st = self.state();
        let mut removed = 0usize;

        let mut cur = list_for_each_safe(&st.nodes, SENTINEL);
        while let Some(i) = cur.advance(&st.nodes) {
            list_unlink(&mut st.nodes, i);
            st.release_slot(i);
            st.len = st.len.saturating_sub(1);
            removed += 1;
        }
        st.compact_empty();
        drop(st);

        metrics::record_deleted(removed);
        metrics::record_delete_all();
        info!("store: delete_all removed {} node(s)", removed);
        removed
    }
}
