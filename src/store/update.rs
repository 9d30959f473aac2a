//! store/update — update-or-insert.
//!
//! Phase 1 (locked): overwrite every node whose name matches the record's
//! name. Phase 2, only when nothing matched: append the record at the tail.
//! By default phase 2 takes the lock again on its own, so two concurrent
//! upserts of an absent name can both append. `atomic_upsert` keeps the lock
//! across both phases.

use anyhow::Result;
use log::debug;

use super::core::UserList;
use super::insert::End;
use crate::consts::SENTINEL;
use crate::list::list_for_each_safe;
use crate::metrics;
use crate::record::Record;

/// What [`UserList::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// This many existing nodes were overwritten.
    Updated(usize),
    /// No node matched; the record was appended at the tail.
    Inserted,
}

impl UserList {
    /// Overwrite all name matches with `rec`, or append it when there are none.
    ///
    /// Matching follows [`find`](UserList::find) with `rec`'s name text as the
    /// key, so several nodes may receive identical copies of `rec`. Fails only
    /// when the fallback insert cannot allocate.
    pub fn update(&self, rec: Record) -> Result<Upsert> {
        let mode = self.cfg.match_mode;
        let mut st = self.state();

        let mut hits = 0usize;
        let mut cur = list_for_each_safe(&st.nodes, SENTINEL);
        while let Some(i) = cur.advance(&st.nodes) {
            if let Some(data) = st.nodes[i].data.as_mut() {
                if data.matches_key(rec.name_bytes(), mode) {
                    *data = rec;
                    hits += 1;
                }
            }
        }

        if hits > 0 {
            drop(st);
            metrics::record_update(hits);
            debug!("store: update {:?} overwrote {} node(s)", rec, hits);
            return Ok(Upsert::Updated(hits));
        }

        if self.cfg.atomic_upsert {
            self.insert_locked(&mut st, rec, End::Tail)?;
        } else {
            drop(st);
            self.add_tail(rec)?;
        }
        metrics::record_update(0);
        metrics::record_upsert_insert();
        debug!("store: update {:?} found no match, appended", rec);
        Ok(Upsert::Inserted)
    }
}
