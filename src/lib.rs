//! Six Degrees
//!
//! Finds the shortest chain of shared film credits between two actors over an
//! actor/title relation held in an external store, expanding only the part of the graph
//! the search actually visits.
//!
//! # Architecture
//!
//! - `model`: identifiers, `Principal`/`Title` records, `Path` and `Chain` results
//! - `store`: the `AdjacencyStore`/`PrincipalStore` contracts and their adapters
//! - `resolve`: exact display-name to actor id resolution with ambiguity detection
//! - `search`: traversal-scoped `GraphIndex`, the BFS state machine, path reconstruction
//! - `service`: `SixDegrees`, the by-name and by-id entry points
//! - `config`: YAML + environment configuration
//!
//! Nothing is cached between searches; every search rediscovers the graph it needs.
//!
//! ## Example Usage
//!
//! ```rust
//! use sixdegrees::{MemoryStore, Principal, SearchConfig, SixDegrees, Title};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut store = MemoryStore::new();
//! store
//!     .add_principal(Principal::new("nm0000246", "Bruce Willis"))
//!     .add_principal(Principal::new("nm0000158", "Tom Hanks"))
//!     .add_title(Title::movie("tt0099165", "The Bonfire of the Vanities"))
//!     .cast("tt0099165", &["nm0000246", "nm0000158"]);
//!
//! let service = SixDegrees::new(Arc::new(store), SearchConfig::default());
//! let outcome = service.search_by_name("Bruce Willis", "Tom Hanks").await.unwrap();
//! assert_eq!(outcome.degrees(), Some(1));
//! # }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod model;
pub mod resolve;
pub mod search;
pub mod service;
pub mod store;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, ConfigResult, DatabaseConfig, SearchConfig, TieBreak};

pub use error::{SearchError, SearchResult};

pub use model::{ActorId, Chain, Hop, Link, Path, PathElement, Principal, Title, TitleId};

pub use resolve::{NameResolver, Resolution};

pub use search::{
    BfsEngine, Edge, GraphIndex, Node, Search, SearchReport, SearchState, SearchStats, Traversal,
};

pub use service::{SearchOutcome, SixDegrees};

pub use store::{
    AdjacencyStore, CountingStore, CreditCategory, MemoryStore, PrincipalStore, StoreError,
    StoreResult,
};

#[cfg(feature = "postgres")]
pub use store::PgStore;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
