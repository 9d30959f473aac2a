//! Record — fixed-shape user payload: a 20-byte NUL-terminated name buffer and
//! a one-byte age.
//!
//! Equality is full-value: all name bytes (terminator and zero padding
//! included) plus the age. Name lookups go through [`Record::matches_key`].

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

use crate::config::MatchMode;
use crate::consts::{NAME_CAP, NAME_MAX_LEN};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Record {
    name: [u8; NAME_CAP],
    age: u8,
}

impl Record {
    /// Build a record. Names longer than [`NAME_MAX_LEN`] bytes are truncated
    /// (on a char boundary), never rejected.
    pub fn new(name: &str, age: u8) -> Self {
        let mut end = name.len().min(NAME_MAX_LEN);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        let mut buf = [0u8; NAME_CAP];
        buf[..end].copy_from_slice(&name.as_bytes()[..end]);
        Self { name: buf, age }
    }

    /// Same name, different age.
    pub fn with_age(mut self, age: u8) -> Self {
        self.age = age;
        self
    }

    /// Name text up to (not including) the first NUL.
    pub fn name_bytes(&self) -> &[u8] {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_CAP);
        &self.name[..end]
    }

    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.name_bytes())
    }

    #[inline]
    pub fn age(&self) -> u8 {
        self.age
    }

    /// Name comparison used by lookup and update.
    ///
    /// Prefix: the first `key.len()` bytes of the stored buffer must equal
    /// `key`. An empty key matches every record; a key longer than the buffer
    /// matches none.
    /// Exact: the stored name text equals `key`.
    pub fn matches_key(&self, key: &[u8], mode: MatchMode) -> bool {
        match mode {
            MatchMode::Prefix => key.len() <= NAME_CAP && self.name[..key.len()] == *key,
            MatchMode::Exact => self.name_bytes() == key,
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name())
            .field("age", &self.age)
            .finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name: [{}], age = {}", self.name(), self.age)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Record", 2)?;
        st.serialize_field("name", &self.name())?;
        st.serialize_field("age", &self.age)?;
        st.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr {
            name: String,
            age: u8,
        }
        let r = Repr::deserialize(deserializer)?;
        Ok(Record::new(&r.name, r.age))
    }
}
