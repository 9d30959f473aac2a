// Базовые модули
pub mod consts;
pub mod config;
pub mod metrics;
pub mod record;

// Ядро: интрузивный список + хранилище записей
pub mod list;  // src/list/mod.rs
pub mod store; // src/store/{mod,core,insert,query,update,delete}.rs

// Удобные реэкспорты
pub use config::{MatchMode, StoreBuilder, StoreConfig};
pub use metrics::{reset as metrics_reset, snapshot as metrics_snapshot, MetricsSnapshot};
pub use record::Record;
pub use store::{AllocationError, Upsert, UserList};
