//! Public search surface
//!
//! `SixDegrees` wires the name resolver and the BFS engine to one injected store and
//! hydrates the resulting id path into a `Chain` of `Principal`/`Title` records.

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::model::{ActorId, Chain, Path, Principal};
use crate::resolve::NameResolver;
use crate::search::{BfsEngine, Traversal};
use crate::store::{AdjacencyStore, PrincipalStore};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of a search that did not fail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "chain", rename_all = "snake_case")]
pub enum SearchOutcome {
    Connected(Chain),
    /// No chain of shared credits links the two actors
    NoConnection,
}

impl SearchOutcome {
    pub fn chain(&self) -> Option<&Chain> {
        match self {
            SearchOutcome::Connected(chain) => Some(chain),
            SearchOutcome::NoConnection => None,
        }
    }

    pub fn degrees(&self) -> Option<usize> {
        self.chain().map(Chain::degrees)
    }
}

pub struct SixDegrees<S: ?Sized> {
    store: Arc<S>,
    resolver: NameResolver<S>,
    engine: BfsEngine<S>,
}

impl<S> SixDegrees<S>
where
    S: AdjacencyStore + PrincipalStore + ?Sized,
{
    pub fn new(store: Arc<S>, config: SearchConfig) -> Self {
        Self {
            resolver: NameResolver::new(Arc::clone(&store)),
            engine: BfsEngine::new(Arc::clone(&store), config),
            store,
        }
    }

    pub fn resolver(&self) -> &NameResolver<S> {
        &self.resolver
    }

    pub fn engine(&self) -> &BfsEngine<S> {
        &self.engine
    }

    /// Search between two display names
    ///
    /// The configured timeout covers resolution, traversal and hydration together.
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, name1: &str, name2: &str) -> SearchResult<SearchOutcome> {
        self.bounded(async {
            let (start, end) = self.resolver.resolve_pair(name1, name2).await?;
            self.connect(start, end).await
        })
        .await
    }

    /// Search between two canonical ids
    #[instrument(skip_all, fields(id1 = %id1, id2 = %id2))]
    pub async fn search_by_id(&self, id1: &ActorId, id2: &ActorId) -> SearchResult<SearchOutcome> {
        self.bounded(async {
            let start = self.principal(id1).await?;
            let end = self.principal(id2).await?;
            self.connect(start, end).await
        })
        .await
    }

    async fn bounded<F>(&self, search: F) -> SearchResult<SearchOutcome>
    where
        F: Future<Output = SearchResult<SearchOutcome>>,
    {
        match self.engine.config().timeout() {
            Some(limit) => tokio::time::timeout(limit, search).await.unwrap_or_else(|_| {
                warn!("Search timed out after {:?}", limit);
                Err(SearchError::Timeout(limit))
            }),
            None => search.await,
        }
    }

    async fn principal(&self, id: &ActorId) -> SearchResult<Principal> {
        self.store
            .principal(id)
            .await?
            .ok_or_else(|| SearchError::UnknownActor(id.clone()))
    }

    async fn connect(&self, start: Principal, end: Principal) -> SearchResult<SearchOutcome> {
        info!("Searching for a chain between {} and {}", start.name, end.name);

        let report = self.engine.search(&start.id, &end.id).await?;
        match report.traversal {
            Traversal::Found(path) => Ok(SearchOutcome::Connected(
                self.hydrate(start, end, &path).await?,
            )),
            Traversal::Exhausted => Ok(SearchOutcome::NoConnection),
        }
    }

    /// Load the title and principal records for every hop of `path`
    pub async fn hydrate(
        &self,
        start: Principal,
        end: Principal,
        path: &Path,
    ) -> SearchResult<Chain> {
        let mut chain = Chain::new(start, end);
        for hop in &path.hops {
            let title = self
                .store
                .title(&hop.title)
                .await?
                .ok_or_else(|| SearchError::UnknownTitle(hop.title.clone()))?;
            let principal = if hop.actor == chain.end.id {
                chain.end.clone()
            } else {
                self.principal(&hop.actor).await?
            };
            chain.push(title, principal);
        }
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Title;
    use crate::store::MemoryStore;

    fn service() -> SixDegrees<MemoryStore> {
        let mut store = MemoryStore::new();
        store
            .add_principal(Principal::new("a", "Actor A"))
            .add_principal(Principal::new("b", "Actor B"))
            .add_principal(Principal::new("c", "Actor C"))
            .add_title(Title::movie("t1", "First").with_start_year(2001))
            .add_title(Title::movie("t2", "Second").with_start_year(2002))
            .cast("t1", &["a", "b"])
            .cast("t2", &["b", "c"]);
        SixDegrees::new(Arc::new(store), SearchConfig::default())
    }

    #[tokio::test]
    async fn test_hydrated_chain() {
        let outcome = service()
            .search_by_id(&ActorId::new("a"), &ActorId::new("c"))
            .await
            .unwrap();

        let chain = outcome.chain().unwrap();
        assert_eq!(chain.degrees(), 2);
        assert_eq!(
            chain.to_string(),
            "Actor A -[First (2001)]-> Actor B -[Second (2002)]-> Actor C"
        );
        assert_eq!(chain.links.last().unwrap().principal, chain.end);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let err = service()
            .search_by_id(&ActorId::new("a"), &ActorId::new("zz"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::UnknownActor(id) if id.as_str() == "zz"));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SearchOutcome::NoConnection).unwrap();
        assert_eq!(json["outcome"], "no_connection");
    }
}
