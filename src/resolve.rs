//! Name resolution
//!
//! Turns a display name into a canonical actor id before traversal. Matching is exact
//! and case-sensitive. Ambiguity is reported, never guessed: callers that want to offer
//! a choice use `candidates` or `lookup`.

use crate::error::{SearchError, SearchResult};
use crate::model::{ActorId, Principal};
use crate::store::PrincipalStore;
use std::sync::Arc;
use tracing::debug;

/// Outcome of looking a name up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unique(Principal),
    Ambiguous(Vec<Principal>),
    Unknown,
}

pub struct NameResolver<S: ?Sized> {
    store: Arc<S>,
}

impl<S: PrincipalStore + ?Sized> NameResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every principal whose display name is exactly `name`
    pub async fn candidates(&self, name: &str) -> SearchResult<Vec<Principal>> {
        if name.trim().is_empty() {
            return Err(SearchError::InvalidName);
        }
        let matches = self.store.principals_named(name).await?;
        debug!("{} principals named {:?}", matches.len(), name);
        Ok(matches)
    }

    pub async fn lookup(&self, name: &str) -> SearchResult<Resolution> {
        let mut matches = self.candidates(name).await?;
        Ok(match matches.len() {
            0 => Resolution::Unknown,
            1 => Resolution::Unique(matches.remove(0)),
            _ => Resolution::Ambiguous(matches),
        })
    }

    /// The single principal named `name`
    pub async fn resolve_principal(&self, name: &str) -> SearchResult<Principal> {
        match self.lookup(name).await? {
            Resolution::Unique(principal) => Ok(principal),
            Resolution::Unknown => Err(SearchError::NotFound(name.to_string())),
            Resolution::Ambiguous(matches) => Err(SearchError::AmbiguousName {
                name: name.to_string(),
                count: matches.len(),
            }),
        }
    }

    pub async fn resolve(&self, name: &str) -> SearchResult<ActorId> {
        Ok(self.resolve_principal(name).await?.id)
    }

    /// Resolve both ends of a query, failing on the first name that does not resolve
    pub async fn resolve_pair(&self, a: &str, b: &str) -> SearchResult<(Principal, Principal)> {
        let first = self.resolve_principal(a).await?;
        let second = self.resolve_principal(b).await?;
        Ok((first, second))
    }
}
