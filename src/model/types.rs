//! Canonical identifiers for people and titles
//!
//! Both wrap the dataset's stable string keys (`nconst` for people, `tconst` for
//! titles). Equality is exact string equality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier for a person (an IMDb `nconst`, e.g. `nm0000102`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        ActorId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        ActorId(s)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        ActorId(s.to_string())
    }
}

/// Canonical identifier for a film or show (an IMDb `tconst`, e.g. `tt0095016`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TitleId(String);

impl TitleId {
    pub fn new(id: impl Into<String>) -> Self {
        TitleId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TitleId {
    fn from(s: String) -> Self {
        TitleId(s)
    }
}

impl From<&str> for TitleId {
    fn from(s: &str) -> Self {
        TitleId(s.to_string())
    }
}
