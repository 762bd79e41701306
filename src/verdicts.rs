//! Canned verdict table.
//!
//! Maps an exact content URL to the literal comma-separated verdict codes
//! returned for a successful callback. The table is built once and only read
//! afterwards.

use std::collections::HashMap;

/// Immutable URL to verdict-code lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerdictTable {
    entries: HashMap<String, String>,
}

impl VerdictTable {
    /// The table compiled into the service.
    pub fn builtin() -> Self {
        Self::from_entries([
            (
                "https://www.wattpad.com/story/5095707-after",
                "80023001,80312001,80013001",
            ),
            (
                "https://www.wattpad.com/amp/248297765",
                "883032002,83032003,83032004",
            ),
        ])
    }

    /// Build a table from `(url, codes)` pairs. Later duplicates win.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Verdict codes for `url`, exact string match.
    pub fn lookup(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
