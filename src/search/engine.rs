//! Lazy breadth-first search over an `AdjacencyStore`
//!
//! Only the part of the graph that is actually visited is ever fetched. Each expanded
//! actor costs one `titles_for` call plus one `co_stars_for` call per title; the
//! co-star calls for one actor are issued concurrently (up to `fetch_concurrency`) and
//! merged in title order before the visited check, so concurrency never changes the
//! result.
//!
//! Among equally short paths the one returned is the first discovered, which depends on
//! the store's enumeration order unless `TieBreak::Lexicographic` is configured.

use super::index::{Edge, GraphIndex};
use super::reconstruct::reconstruct;
use crate::config::{SearchConfig, TieBreak};
use crate::error::{SearchError, SearchResult};
use crate::model::{ActorId, Path, TitleId};
use crate::store::{AdjacencyStore, StoreResult};
use futures::future::try_join_all;
use indexmap::IndexSet;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Lifecycle of one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchState {
    Idle,
    Running,
    Found,
    Exhausted,
    Failed,
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchState::Found | SearchState::Exhausted | SearchState::Failed
        )
    }
}

/// Result of a finished traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Traversal {
    Found(Path),
    /// The reachable component (or depth bound) was exhausted without meeting the goal
    Exhausted,
}

impl Traversal {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Traversal::Found(path) => Some(path),
            Traversal::Exhausted => None,
        }
    }
}

/// Counters for one search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped from the frontier and expanded
    pub expanded: usize,
    /// Nodes in the index, start included
    pub discovered: usize,
    /// Adjacency store round trips
    pub store_calls: usize,
    /// Deepest expanded node
    pub depth: usize,
    pub elapsed: Duration,
}

/// A finished search
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub traversal: Traversal,
    pub stats: SearchStats,
}

/// Breadth-first search engine
///
/// Holds the injected store and the tuning; every call to `search` or `begin` works on
/// its own fresh `GraphIndex`.
pub struct BfsEngine<S: ?Sized> {
    store: Arc<S>,
    config: SearchConfig,
}

impl<S: AdjacencyStore + ?Sized> BfsEngine<S> {
    pub fn new(store: Arc<S>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Prepare a search without running it
    pub fn begin(&self, start: ActorId, goal: ActorId) -> Search<'_, S> {
        Search::new(&self.store, &self.config, start, goal)
    }

    /// Run a search to completion, bounded by the configured timeout
    #[instrument(skip_all, fields(start = %start, goal = %goal))]
    pub async fn search(&self, start: &ActorId, goal: &ActorId) -> SearchResult<SearchReport> {
        let run = self.begin(start.clone(), goal.clone()).run();

        let report = match self.config.timeout() {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Search {} -> {} timed out after {:?}", start, goal, limit);
                    return Err(SearchError::Timeout(limit));
                }
            },
            None => run.await,
        }?;

        match &report.traversal {
            Traversal::Found(path) => info!(
                "Found {} hop path after expanding {} nodes ({} store calls, {:?})",
                path.len(),
                report.stats.expanded,
                report.stats.store_calls,
                report.stats.elapsed
            ),
            Traversal::Exhausted => info!(
                "No path after expanding {} nodes ({} store calls, {:?})",
                report.stats.expanded, report.stats.store_calls, report.stats.elapsed
            ),
        }

        Ok(report)
    }
}

/// One in-flight search
///
/// Drive it one expansion at a time with `step`, or to completion with `run`. Once a
/// terminal state is reached further steps are no-ops and make no store calls.
pub struct Search<'a, S: ?Sized> {
    store: &'a S,
    config: &'a SearchConfig,
    goal: ActorId,
    index: GraphIndex,
    state: SearchState,
    matched: Option<ActorId>,
    stats: SearchStats,
    started: Instant,
}

impl<'a, S: AdjacencyStore + ?Sized> Search<'a, S> {
    fn new(store: &'a S, config: &'a SearchConfig, start: ActorId, goal: ActorId) -> Self {
        Self {
            store,
            config,
            goal,
            index: GraphIndex::new(start),
            state: SearchState::Idle,
            matched: None,
            stats: SearchStats::default(),
            started: Instant::now(),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Advance by at most one node expansion
    pub async fn step(&mut self) -> SearchResult<SearchState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        if self.state == SearchState::Idle {
            if self.index.start() == &self.goal {
                self.matched = Some(self.goal.clone());
                self.state = SearchState::Found;
                return Ok(self.state);
            }
            self.state = SearchState::Running;
        }

        let Some(current) = self.index.pop_front() else {
            self.state = SearchState::Exhausted;
            return Ok(self.state);
        };

        if current == self.goal {
            self.matched = Some(current);
            self.state = SearchState::Found;
            return Ok(self.state);
        }

        let depth = self.index.get(&current).map(|n| n.depth).unwrap_or(0);
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            return Ok(self.state);
        }

        match self.expand(&current).await {
            Ok(Some(hit)) => {
                self.matched = Some(hit);
                self.state = SearchState::Found;
            }
            Ok(None) => {
                if self.index.frontier_len() == 0 {
                    self.state = SearchState::Exhausted;
                }
            }
            Err(e) => {
                warn!("Store failure while expanding {}: {}", current, e);
                self.state = SearchState::Failed;
                return Err(e.into());
            }
        }

        self.stats.expanded += 1;
        self.stats.depth = self.stats.depth.max(depth);
        Ok(self.state)
    }

    /// Step until a terminal state and produce the report
    pub async fn run(mut self) -> SearchResult<SearchReport> {
        while !self.state.is_terminal() {
            self.step().await?;
        }
        self.finish()
    }

    /// Build the report of a terminal search
    pub fn finish(mut self) -> SearchResult<SearchReport> {
        let traversal = match (self.state, &self.matched) {
            (SearchState::Found, Some(matched)) => {
                Traversal::Found(reconstruct(&self.index, matched)?)
            }
            (SearchState::Exhausted, _) => Traversal::Exhausted,
            (state, _) => {
                return Err(SearchError::Corrupt(format!(
                    "cannot finish a search in state {:?}",
                    state
                )))
            }
        };

        self.stats.discovered = self.index.len();
        self.stats.elapsed = self.started.elapsed();
        Ok(SearchReport {
            traversal,
            stats: self.stats,
        })
    }

    /// Discover the unvisited co-stars of `current`
    ///
    /// Returns the goal id as soon as it is discovered; remaining titles are not
    /// fetched since no shorter path can exist.
    async fn expand(&mut self, current: &ActorId) -> StoreResult<Option<ActorId>> {
        let fetched = self.store.titles_for(current).await?;
        self.stats.store_calls += 1;

        // A person can hold several credits on one title; fetch its cast once
        let unique: IndexSet<TitleId> = fetched.into_iter().collect();
        let mut titles: Vec<TitleId> = unique.into_iter().collect();
        if self.config.tie_break == TieBreak::Lexicographic {
            titles.sort();
        }

        debug!("Expanding {}: {} titles", current, titles.len());

        let store = self.store;
        for chunk in titles.chunks(self.config.fetch_concurrency.max(1)) {
            self.stats.store_calls += chunk.len();
            let fetches = chunk.iter().map(|title| async move {
                store
                    .co_stars_for(title, current)
                    .await
                    .map(|actors| (title.clone(), actors))
            });
            let fetched: Vec<(TitleId, Vec<ActorId>)> = try_join_all(fetches).await?;

            for (title, mut co_stars) in fetched {
                if self.config.tie_break == TieBreak::Lexicographic {
                    co_stars.sort();
                }
                for actor in co_stars {
                    let via = Edge {
                        title: title.clone(),
                        predecessor: current.clone(),
                    };
                    if self.index.discover(actor.clone(), via) && actor == self.goal {
                        return Ok(Some(actor));
                    }
                }
            }
        }

        Ok(None)
    }
}
