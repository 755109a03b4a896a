//! Data model
//!
//! Identifiers, the immutable `Principal`/`Title` records loaded from the store, and the
//! `Path`/`Chain` result types.

pub mod chain;
pub mod principal;
pub mod title;
pub mod types;

pub use chain::{Chain, Hop, Link, Path, PathElement};
pub use principal::Principal;
pub use title::{Title, MOVIE};
pub use types::{ActorId, TitleId};

/// Split a comma-separated dataset field into tags, treating `\N` as empty
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        None | Some("\\N") | Some("") => Vec::new(),
        Some(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
