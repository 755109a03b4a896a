//! Search results
//!
//! A `Path` is the identifier-only route produced by the traversal. A `Chain` is the
//! same route hydrated with `Principal` and `Title` records for presentation.

use super::principal::Principal;
use super::title::Title;
use super::types::{ActorId, TitleId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a path: `actor` appeared in `title` with the previous actor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hop {
    pub title: TitleId,
    pub actor: ActorId,
}

/// Element of the flattened actor/title sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PathElement {
    Actor(ActorId),
    Title(TitleId),
}

/// Identifier-level route from a start actor to a goal actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub start: ActorId,
    pub hops: Vec<Hop>,
}

impl Path {
    /// Zero-hop path (start equals goal)
    pub fn trivial(start: ActorId) -> Self {
        Path { start, hops: Vec::new() }
    }

    /// Number of actor-to-actor hops
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Final actor of the path
    pub fn end(&self) -> &ActorId {
        self.hops.last().map(|h| &h.actor).unwrap_or(&self.start)
    }

    /// Actors visited in order, start and end included
    pub fn actors(&self) -> impl Iterator<Item = &ActorId> {
        std::iter::once(&self.start).chain(self.hops.iter().map(|h| &h.actor))
    }

    /// Flatten into `actor, title, actor, ..., title, actor`
    pub fn elements(&self) -> Vec<PathElement> {
        let mut out = Vec::with_capacity(1 + 2 * self.hops.len());
        out.push(PathElement::Actor(self.start.clone()));
        for hop in &self.hops {
            out.push(PathElement::Title(hop.title.clone()));
            out.push(PathElement::Actor(hop.actor.clone()));
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        for hop in &self.hops {
            write!(f, " -[{}]-> {}", hop.title, hop.actor)?;
        }
        Ok(())
    }
}

/// One (title, principal) step within a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub title: Title,
    pub principal: Principal,
}

/// The result of a connected search
///
/// `links` alternate title/actor starting after `start`; the last link's principal is
/// `end`. `links.len()` is the number of degrees of separation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub start: Principal,
    pub end: Principal,
    pub links: Vec<Link>,
}

impl Chain {
    pub fn new(start: Principal, end: Principal) -> Self {
        Chain {
            start,
            end,
            links: Vec::new(),
        }
    }

    /// Degrees of separation
    pub fn degrees(&self) -> usize {
        self.links.len()
    }

    pub fn push(&mut self, title: Title, principal: Principal) {
        self.links.push(Link { title, principal });
    }

    /// Drop the metadata, keeping only identifiers
    pub fn to_path(&self) -> Path {
        Path {
            start: self.start.id.clone(),
            hops: self
                .links
                .iter()
                .map(|l| Hop {
                    title: l.title.id.clone(),
                    actor: l.principal.id.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.name)?;
        for link in &self.links {
            write!(f, " -[{}]-> {}", link.title, link.principal.name)?;
        }
        Ok(())
    }
}
