use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Identifier of a source panel, as handed out by the layout system.
///
/// Layouts written by older hosts store the id as a number, newer ones as a
/// string. Both forms compare equal when their textual form matches, so a
/// restored `"1"` binds to a live source with id `1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceId {
    Number(u64),
    Name(String),
}

impl SourceId {
    fn key(&self) -> Cow<'_, str> {
        match self {
            SourceId::Number(n) => Cow::Owned(n.to_string()),
            SourceId::Name(name) => Cow::Borrowed(name.as_str()),
        }
    }
}

impl Default for SourceId {
    fn default() -> Self {
        SourceId::Number(1)
    }
}

impl PartialEq for SourceId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for SourceId {}

impl Hash for SourceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for SourceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<u64> for SourceId {
    fn from(value: u64) -> Self {
        SourceId::Number(value)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        SourceId::Name(value.to_string())
    }
}

impl From<String> for SourceId {
    fn from(value: String) -> Self {
        SourceId::Name(value)
    }
}
