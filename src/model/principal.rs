//! Resolved people
//!
//! A `Principal` is the immutable record of one person in the dataset
//! (a `name_basics` row).

use super::types::ActorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Canonical identifier
    pub id: ActorId,

    /// Display name, matched exactly by the name resolver
    pub name: String,

    pub birth_year: Option<i32>,

    pub death_year: Option<i32>,

    /// Profession tags, e.g. `actor`, `producer`
    pub professions: Vec<String>,
}

impl Principal {
    /// Create a principal with no optional metadata
    pub fn new(id: impl Into<ActorId>, name: impl Into<String>) -> Self {
        Principal {
            id: id.into(),
            name: name.into(),
            birth_year: None,
            death_year: None,
            professions: Vec::new(),
        }
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn with_death_year(mut self, year: i32) -> Self {
        self.death_year = Some(year);
        self
    }

    pub fn with_professions<I, P>(mut self, professions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.professions = professions.into_iter().map(Into::into).collect();
        self
    }

    /// Check if the person carries a given profession tag
    pub fn has_profession(&self, profession: &str) -> bool {
        self.professions.iter().any(|p| p == profession)
    }

    /// Whether the person is tagged as an actor or actress
    pub fn is_performer(&self) -> bool {
        self.has_profession("actor") || self.has_profession("actress")
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.birth_year, self.death_year) {
            (Some(born), Some(died)) => write!(f, "{} ({}-{})", self.name, born, died),
            (Some(born), None) => write!(f, "{} (b. {})", self.name, born),
            _ => write!(f, "{}", self.name),
        }
    }
}
