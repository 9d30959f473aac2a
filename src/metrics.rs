//! Lightweight global metrics for the record store.
//!
//! Process-wide relaxed atomic counters:
//! - Insertion (head/tail, allocation failures)
//! - Lookup
//! - Update-or-insert
//! - Deletion / reset
//! - Traversal

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

// ----- Insertion -----
static INSERTS_HEAD: AtomicU64 = AtomicU64::new(0);
static INSERTS_TAIL: AtomicU64 = AtomicU64::new(0);
static ALLOC_FAILURES: AtomicU64 = AtomicU64::new(0);

// ----- Lookup -----
static FINDS_TOTAL: AtomicU64 = AtomicU64::new(0);
static FINDS_HIT: AtomicU64 = AtomicU64::new(0);

// ----- Update-or-insert -----
static UPDATES_TOTAL: AtomicU64 = AtomicU64::new(0);
static UPDATED_NODES: AtomicU64 = AtomicU64::new(0);
static UPSERT_INSERTS: AtomicU64 = AtomicU64::new(0);

// ----- Deletion -----
static DELETED_NODES: AtomicU64 = AtomicU64::new(0);
static DELETE_ALL_RUNS: AtomicU64 = AtomicU64::new(0);
static RESETS: AtomicU64 = AtomicU64::new(0);

// ----- Traversal -----
static TRAVERSALS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub inserts_head: u64,
    pub inserts_tail: u64,
    pub alloc_failures: u64,

    pub finds_total: u64,
    pub finds_hit: u64,

    pub updates_total: u64,
    pub updated_nodes: u64,
    pub upsert_inserts: u64,

    pub deleted_nodes: u64,
    pub delete_all_runs: u64,
    pub resets: u64,

    pub traversals: u64,
}

impl MetricsSnapshot {
    pub fn inserts_total(&self) -> u64 {
        self.inserts_head + self.inserts_tail
    }

    pub fn find_hit_ratio(&self) -> f64 {
        if self.finds_total == 0 {
            0.0
        } else {
            self.finds_hit as f64 / self.finds_total as f64
        }
    }
}

// ----- Recorders (Insertion) -----
pub fn record_insert_head() {
    INSERTS_HEAD.fetch_add(1, Ordering::Relaxed);
}
pub fn record_insert_tail() {
    INSERTS_TAIL.fetch_add(1, Ordering::Relaxed);
}
pub fn record_alloc_failure() {
    ALLOC_FAILURES.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Lookup) -----
pub fn record_find(hit: bool) {
    FINDS_TOTAL.fetch_add(1, Ordering::Relaxed);
    if hit {
        FINDS_HIT.fetch_add(1, Ordering::Relaxed);
    }
}

// ----- Recorders (Update) -----
pub fn record_update(nodes: usize) {
    UPDATES_TOTAL.fetch_add(1, Ordering::Relaxed);
    UPDATED_NODES.fetch_add(nodes as u64, Ordering::Relaxed);
}
pub fn record_upsert_insert() {
    UPSERT_INSERTS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Deletion) -----
pub fn record_deleted(nodes: usize) {
    DELETED_NODES.fetch_add(nodes as u64, Ordering::Relaxed);
}
pub fn record_delete_all() {
    DELETE_ALL_RUNS.fetch_add(1, Ordering::Relaxed);
}
pub fn record_reset() {
    RESETS.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Traversal) -----
pub fn record_traversal() {
    TRAVERSALS.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        inserts_head: INSERTS_HEAD.load(Ordering::Relaxed),
        inserts_tail: INSERTS_TAIL.load(Ordering::Relaxed),
        alloc_failures: ALLOC_FAILURES.load(Ordering::Relaxed),

        finds_total: FINDS_TOTAL.load(Ordering::Relaxed),
        finds_hit: FINDS_HIT.load(Ordering::Relaxed),

        updates_total: UPDATES_TOTAL.load(Ordering::Relaxed),
        updated_nodes: UPDATED_NODES.load(Ordering::Relaxed),
        upsert_inserts: UPSERT_INSERTS.load(Ordering::Relaxed),

        deleted_nodes: DELETED_NODES.load(Ordering::Relaxed),
        delete_all_runs: DELETE_ALL_RUNS.load(Ordering::Relaxed),
        resets: RESETS.load(Ordering::Relaxed),

        traversals: TRAVERSALS.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    INSERTS_HEAD.store(0, Ordering::Relaxed);
    INSERTS_TAIL.store(0, Ordering::Relaxed);
    ALLOC_FAILURES.store(0, Ordering::Relaxed);

    FINDS_TOTAL.store(0, Ordering::Relaxed);
    FINDS_HIT.store(0, Ordering::Relaxed);

    UPDATES_TOTAL.store(0, Ordering::Relaxed);
    UPDATED_NODES.store(0, Ordering::Relaxed);
    UPSERT_INSERTS.store(0, Ordering::Relaxed);

    DELETED_NODES.store(0, Ordering::Relaxed);
    DELETE_ALL_RUNS.store(0, Ordering::Relaxed);
    RESETS.store(0, Ordering::Relaxed);

    TRAVERSALS.store(0, Ordering::Relaxed);
}
