//! store/query — traversal, lookup by name, length and emptiness.

use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use super::core::{ListState, UserList};
use crate::config::MatchMode;
use crate::consts::SENTINEL;
use crate::list::{list_for_each_safe, list_is_empty};
use crate::metrics;
use crate::record::Record;

impl ListState {
    /// Last record (in link order) whose name matches `key`.
    fn last_match(&self, key: &[u8], mode: MatchMode) -> Option<Record> {
        let mut found = None;
        let mut cur = list_for_each_safe(&self.nodes, SENTINEL);
        // без short-circuit: последнее совпадение перекрывает предыдущие
        while let Some(i) = cur.advance(&self.nodes) {
            if let Some(rec) = self.nodes[i].data {
                if rec.matches_key(key, mode) {
                    found = Some(rec);
                }
            }
        }
        found
    }
}

impl UserList {
    /// Walk head to tail under the lock, handing every record to `f`.
    ///
    /// `f` runs while the lock is held and must not call back into this store.
    pub fn traverse<F>(&self, mut f: F)
    where
        F: FnMut(&Record),
    {
        // Infallible closure, the Err arm cannot happen.
        let _ = self.try_traverse(|rec| {
            f(rec);
            Ok(())
        });
    }

    /// Like [`traverse`](Self::traverse), stopping at the first error from `f`.
    pub fn try_traverse<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&Record) -> Result<()>,
    {
        metrics::record_traversal();
        let st = self.state();
        let mut cur = list_for_each_safe(&st.nodes, SENTINEL);
        while let Some(i) = cur.advance(&st.nodes) {
            if let Some(rec) = &st.nodes[i].data {
                f(rec)?;
            }
        }
        Ok(())
    }

    /// One `user list data, name: [..], age = ..` line per record.
    pub fn traverse_to<W: Write>(&self, out: &mut W) -> Result<()> {
        self.try_traverse(|rec| {
            writeln!(out, "user list data, {}", rec).context("write traversal line")
        })
    }

    /// Copy of every record in link order.
    pub fn records(&self) -> Vec<Record> {
        let mut out = Vec::new();
        self.traverse(|rec| out.push(*rec));
        out
    }

    /// Look a record up by name.
    ///
    /// In the default prefix mode a node matches when the first `name.len()`
    /// bytes of its stored name equal `name`, so `"name_0"` also finds
    /// `"name_0extra"` and an empty name finds anything. Every node is
    /// scanned and the last match in link order is returned.
    pub fn find<K: AsRef<[u8]>>(&self, name: K) -> Option<Record> {
        let key = name.as_ref();
        let found = self.state().last_match(key, self.cfg.match_mode);
        metrics::record_find(found.is_some());
        debug!(
            "store: find {:?} -> {:?}",
            String::from_utf8_lossy(key),
            found
        );
        found
    }

    /// Presence check with the same matching rules as [`find`](Self::find).
    pub fn contains<K: AsRef<[u8]>>(&self, name: K) -> bool {
        self.find(name).is_some()
    }

    /// Number of stored records. Read under the lock.
    pub fn len(&self) -> usize {
        self.state().len
    }

    /// Structural check on the sentinel, independent of the length counter.
    pub fn is_empty(&self) -> bool {
        let st = self.state();
        list_is_empty(&st.nodes, SENTINEL)
    }
}
