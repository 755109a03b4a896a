//! Resolved titles (a `title_basics` row)

use super::types::TitleId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title type the adjacency relation is restricted to
pub const MOVIE: &str = "movie";

/// A resolved film or show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,

    /// Dataset title type: `movie`, `short`, `tvEpisode`, ...
    pub title_type: String,

    /// Display title
    pub primary_title: String,

    pub start_year: Option<i32>,

    /// Only set for series
    pub end_year: Option<i32>,

    pub runtime_minutes: Option<i32>,

    pub genres: Vec<String>,
}

impl Title {
    pub fn new(
        id: impl Into<TitleId>,
        title_type: impl Into<String>,
        primary_title: impl Into<String>,
    ) -> Self {
        Title {
            id: id.into(),
            title_type: title_type.into(),
            primary_title: primary_title.into(),
            start_year: None,
            end_year: None,
            runtime_minutes: None,
            genres: Vec::new(),
        }
    }

    /// Shorthand for a `movie` title
    pub fn movie(id: impl Into<TitleId>, primary_title: impl Into<String>) -> Self {
        Self::new(id, MOVIE, primary_title)
    }

    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    pub fn with_end_year(mut self, year: i32) -> Self {
        self.end_year = Some(year);
        self
    }

    pub fn with_runtime(mut self, minutes: i32) -> Self {
        self.runtime_minutes = Some(minutes);
        self
    }

    pub fn with_genres<I, G>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_movie(&self) -> bool {
        self.title_type == MOVIE
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start_year {
            Some(year) => write!(f, "{} ({})", self.primary_title, year),
            None => write!(f, "{}", self.primary_title),
        }
    }
}
