//! Общие константы: формат записи, слоты арены, ENV-ключи конфигурации.

// -------- Record --------
/// Name buffer capacity in bytes, NUL terminator included.
pub const NAME_CAP: usize = 20;
/// Longest name text that fits (capacity minus terminator).
pub const NAME_MAX_LEN: usize = NAME_CAP - 1;
/// Full-record byte width: name buffer + age byte.
pub const RECORD_SIZE: usize = NAME_CAP + 1;

// -------- Arena --------
/// Slot index of the list sentinel. Never holds a record, never freed.
pub const SENTINEL: usize = 0;
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

// -------- Config env --------
pub const ENV_MAX_RECORDS: &str = "UL_MAX_RECORDS";
pub const ENV_MATCH_MODE: &str = "UL_MATCH_MODE";
pub const ENV_ATOMIC_UPSERT: &str = "UL_ATOMIC_UPSERT";
pub const ENV_INITIAL_CAPACITY: &str = "UL_INITIAL_CAPACITY";
