//! Store contracts consumed by the search core
//!
//! The actor/title relation lives in an external store that is too large to load. The
//! core depends only on the two minimal traits below:
//! - `AdjacencyStore`: the two lookups the traversal needs
//! - `PrincipalStore`: name resolution and metadata for presenting a chain
//!
//! Implementations:
//! - `MemoryStore`: in-process relation, used for tests and demos
//! - `PgStore`: Postgres over the IMDb tables (feature `postgres`)
//! - `CountingStore`: wrapper that counts round trips

pub mod counting;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use counting::CountingStore;
pub use memory::{CreditCategory, MemoryStore};
#[cfg(feature = "postgres")]
pub use postgres::PgStore;

use crate::model::{ActorId, Principal, Title, TitleId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors reaching or reading the external store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query failed
    #[error("Query error: {0}")]
    Query(String),

    /// Row could not be decoded into a model type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Postgres driver error
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Adjacency over the bipartite actor/title relation
///
/// Enumeration order is store-defined. Restricting credits to movie titles and to
/// acting categories is the store's responsibility.
#[async_trait]
pub trait AdjacencyStore: Send + Sync {
    /// All movie titles the actor is credited in
    async fn titles_for(&self, actor: &ActorId) -> StoreResult<Vec<TitleId>>;

    /// All acting credits on `title`, minus `exclude`
    async fn co_stars_for(&self, title: &TitleId, exclude: &ActorId) -> StoreResult<Vec<ActorId>>;
}

/// Lookups over the people and title records
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// All principals whose display name equals `name` exactly
    async fn principals_named(&self, name: &str) -> StoreResult<Vec<Principal>>;

    async fn principal(&self, id: &ActorId) -> StoreResult<Option<Principal>>;

    async fn title(&self, id: &TitleId) -> StoreResult<Option<Title>>;
}

#[async_trait]
impl<T: AdjacencyStore + ?Sized> AdjacencyStore for Arc<T> {
    async fn titles_for(&self, actor: &ActorId) -> StoreResult<Vec<TitleId>> {
        (**self).titles_for(actor).await
    }

    async fn co_stars_for(&self, title: &TitleId, exclude: &ActorId) -> StoreResult<Vec<ActorId>> {
        (**self).co_stars_for(title, exclude).await
    }
}

#[async_trait]
impl<T: PrincipalStore + ?Sized> PrincipalStore for Arc<T> {
    async fn principals_named(&self, name: &str) -> StoreResult<Vec<Principal>> {
        (**self).principals_named(name).await
    }

    async fn principal(&self, id: &ActorId) -> StoreResult<Option<Principal>> {
        (**self).principal(id).await
    }

    async fn title(&self, id: &TitleId) -> StoreResult<Option<Title>> {
        (**self).title(id).await
    }
}
