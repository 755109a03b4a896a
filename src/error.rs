//! Errors surfaced by the search core

use crate::model::{ActorId, TitleId};
use crate::store::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while resolving names or searching
///
/// A search that exhausts the graph without reaching the goal is not an error; it
/// yields `SearchOutcome::NoConnection`.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid name: actor name must not be empty")]
    InvalidName,

    #[error("Unknown actor: no principal named {0:?}")]
    NotFound(String),

    #[error("{name:?} is an ambiguous name ({count} principals share it)")]
    AmbiguousName { name: String, count: usize },

    #[error("Unknown actor id {0}")]
    UnknownActor(ActorId),

    #[error("Unknown title id {0}")]
    UnknownTitle(TitleId),

    /// Terminal for the search that hit it
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Search timed out after {0:?}")]
    Timeout(Duration),

    #[error("Corrupt traversal state: {0}")]
    Corrupt(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

impl SearchError {
    /// Errors caused by the caller's input rather than the store or the engine
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SearchError::InvalidName
                | SearchError::NotFound(_)
                | SearchError::AmbiguousName { .. }
                | SearchError::UnknownActor(_)
        )
    }
}
