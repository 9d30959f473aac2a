//! store — record-typed API over the intrusive list (one mutex, one counter).
//!
//! Разделение по подмодулям:
//! - core.rs   — UserList, арена узлов со свободным списком, lock, AllocationError
//! - insert.rs — add_head / add_tail
//! - query.rs  — traverse / records / find / contains / len / is_empty
//! - update.rs — update-or-insert (Upsert)
//! - delete.rs — delete по полному значению и delete_all
//!
//! Locking: every operation holds the lock for its whole body and never calls
//! another locking operation while holding it. The one exception is update's
//! insert fallback, which releases and re-acquires unless `atomic_upsert` is on.

pub mod core;
mod delete;
mod insert;
mod query;
mod update;

pub use self::core::{AllocationError, UserList};
pub use update::Upsert;
