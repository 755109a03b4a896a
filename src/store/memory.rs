//! In-memory actor/title relation
//!
//! Mirrors the three dataset tables: people, titles and the credit rows linking them.
//! Credits are kept in insertion order with per-actor and per-title adjacency lists of
//! credit indices, so enumeration order is deterministic and equals insertion order.

use super::{AdjacencyStore, PrincipalStore, StoreResult};
use crate::model::{ActorId, Principal, Title, TitleId};
use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use std::fmt;

/// Credit category of a `title_principals` row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CreditCategory {
    Actor,
    Actress,
    Other(String),
}

impl CreditCategory {
    pub fn parse(s: &str) -> Self {
        match s {
            "actor" => CreditCategory::Actor,
            "actress" => CreditCategory::Actress,
            other => CreditCategory::Other(other.to_string()),
        }
    }

    /// Only acting credits connect co-stars
    pub fn is_acting(&self) -> bool {
        matches!(self, CreditCategory::Actor | CreditCategory::Actress)
    }
}

impl fmt::Display for CreditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditCategory::Actor => write!(f, "actor"),
            CreditCategory::Actress => write!(f, "actress"),
            CreditCategory::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone)]
struct Credit {
    title: TitleId,
    actor: ActorId,
    category: CreditCategory,
}

/// In-memory store implementing both store contracts
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    principals: IndexMap<ActorId, Principal>,
    titles: IndexMap<TitleId, Title>,
    credits: Vec<Credit>,
    by_actor: HashMap<ActorId, Vec<usize>>,
    by_title: HashMap<TitleId, Vec<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a principal
    pub fn add_principal(&mut self, principal: Principal) -> &mut Self {
        self.principals.insert(principal.id.clone(), principal);
        self
    }

    /// Insert or replace a title
    pub fn add_title(&mut self, title: Title) -> &mut Self {
        self.titles.insert(title.id.clone(), title);
        self
    }

    /// Record that `actor` is credited on `title`
    pub fn add_credit(
        &mut self,
        title: impl Into<TitleId>,
        actor: impl Into<ActorId>,
        category: CreditCategory,
    ) -> &mut Self {
        let credit = Credit {
            title: title.into(),
            actor: actor.into(),
            category,
        };
        let idx = self.credits.len();
        self.by_actor.entry(credit.actor.clone()).or_default().push(idx);
        self.by_title.entry(credit.title.clone()).or_default().push(idx);
        self.credits.push(credit);
        self
    }

    /// Credit every listed actor on `title` with the `actor` category
    pub fn cast<A>(&mut self, title: impl Into<TitleId>, actors: &[A]) -> &mut Self
    where
        A: Clone + Into<ActorId>,
    {
        let title = title.into();
        for actor in actors {
            self.add_credit(title.clone(), actor.clone(), CreditCategory::Actor);
        }
        self
    }

    pub fn principal_count(&self) -> usize {
        self.principals.len()
    }

    pub fn title_count(&self) -> usize {
        self.titles.len()
    }

    pub fn credit_count(&self) -> usize {
        self.credits.len()
    }
}

#[async_trait]
impl AdjacencyStore for MemoryStore {
    async fn titles_for(&self, actor: &ActorId) -> StoreResult<Vec<TitleId>> {
        let Some(indices) = self.by_actor.get(actor) else {
            return Ok(Vec::new());
        };

        // Inner join on the title table: credits on unknown titles are dropped
        let titles: IndexSet<&TitleId> = indices
            .iter()
            .map(|&i| &self.credits[i].title)
            .filter(|t| self.titles.get(*t).is_some_and(Title::is_movie))
            .collect();

        Ok(titles.into_iter().cloned().collect())
    }

    async fn co_stars_for(&self, title: &TitleId, exclude: &ActorId) -> StoreResult<Vec<ActorId>> {
        let Some(indices) = self.by_title.get(title) else {
            return Ok(Vec::new());
        };

        let actors: IndexSet<&ActorId> = indices
            .iter()
            .map(|&i| &self.credits[i])
            .filter(|c| c.category.is_acting() && &c.actor != exclude)
            .map(|c| &c.actor)
            .collect();

        Ok(actors.into_iter().cloned().collect())
    }
}

#[async_trait]
impl PrincipalStore for MemoryStore {
    async fn principals_named(&self, name: &str) -> StoreResult<Vec<Principal>> {
        Ok(self
            .principals
            .values()
            .filter(|p| p.name == name)
            .cloned()
            .collect())
    }

    async fn principal(&self, id: &ActorId) -> StoreResult<Option<Principal>> {
        Ok(self.principals.get(id).cloned())
    }

    async fn title(&self, id: &TitleId) -> StoreResult<Option<Title>> {
        Ok(self.titles.get(id).cloned())
    }
}
