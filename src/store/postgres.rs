//! Postgres adapter over the IMDb dataset tables
//!
//! Expects the `name_basics`, `title_basics` and `title_principals` tables with the
//! dataset's column names lower-cased. Year and runtime columns may be integers or the
//! raw text with `\N` for null; both read as `Option<i32>`. Any other non-numeric text
//! in those columns fails the query.

use super::{AdjacencyStore, PrincipalStore, StoreError, StoreResult};
use crate::config::DatabaseConfig;
use crate::model::{parse_tags, ActorId, Principal, Title, TitleId};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

const TITLES_FOR_ACTOR: &str = "SELECT DISTINCT title_principals.tconst \
     FROM title_principals \
     INNER JOIN title_basics ON title_principals.tconst = title_basics.tconst \
     WHERE title_principals.nconst = $1 AND title_basics.titletype = 'movie'";

const CO_STARS_FOR_TITLE: &str = "SELECT DISTINCT nconst FROM title_principals \
     WHERE tconst = $1 AND (category = 'actor' OR category = 'actress') AND nconst <> $2";

const PRINCIPAL_COLUMNS: &str = "SELECT nconst, primaryname, \
     NULLIF(birthyear::text, '\\N')::int4, NULLIF(deathyear::text, '\\N')::int4, \
     primaryprofession FROM name_basics";

const TITLE_COLUMNS: &str = "SELECT tconst, titletype, primarytitle, \
     NULLIF(startyear::text, '\\N')::int4, NULLIF(endyear::text, '\\N')::int4, \
     NULLIF(runtimeminutes::text, '\\N')::int4, genres FROM title_basics";

type PrincipalRow = (String, String, Option<i32>, Option<i32>, Option<String>);

type TitleRow = (
    String,
    String,
    String,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<String>,
);

/// Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a connection pool and verify the store is reachable
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        info!("Connecting to store (max_connections={})", config.max_connections);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!("Store connection established");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn principal_from_row(row: PrincipalRow) -> Principal {
    let (id, name, birth_year, death_year, professions) = row;
    Principal {
        id: ActorId::new(id),
        name,
        birth_year,
        death_year,
        professions: parse_tags(professions.as_deref()),
    }
}

fn title_from_row(row: TitleRow) -> Title {
    let (id, title_type, primary_title, start_year, end_year, runtime_minutes, genres) = row;
    Title {
        id: TitleId::new(id),
        title_type,
        primary_title,
        start_year,
        end_year,
        runtime_minutes,
        genres: parse_tags(genres.as_deref()),
    }
}

#[async_trait]
impl AdjacencyStore for PgStore {
    async fn titles_for(&self, actor: &ActorId) -> StoreResult<Vec<TitleId>> {
        let rows: Vec<String> = sqlx::query_scalar(TITLES_FOR_ACTOR)
            .bind(actor.as_str())
            .fetch_all(&self.pool)
            .await?;

        debug!("{} movie titles for {}", rows.len(), actor);
        Ok(rows.into_iter().map(TitleId::new).collect())
    }

    async fn co_stars_for(&self, title: &TitleId, exclude: &ActorId) -> StoreResult<Vec<ActorId>> {
        let rows: Vec<String> = sqlx::query_scalar(CO_STARS_FOR_TITLE)
            .bind(title.as_str())
            .bind(exclude.as_str())
            .fetch_all(&self.pool)
            .await?;

        debug!("{} co-stars on {}", rows.len(), title);
        Ok(rows.into_iter().map(ActorId::new).collect())
    }
}

#[async_trait]
impl PrincipalStore for PgStore {
    async fn principals_named(&self, name: &str) -> StoreResult<Vec<Principal>> {
        let sql = format!("{} WHERE primaryname = $1", PRINCIPAL_COLUMNS);
        let rows: Vec<PrincipalRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(principal_from_row).collect())
    }

    async fn principal(&self, id: &ActorId) -> StoreResult<Option<Principal>> {
        let sql = format!("{} WHERE nconst = $1", PRINCIPAL_COLUMNS);
        let row: Option<PrincipalRow> = sqlx::query_as(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(principal_from_row))
    }

    async fn title(&self, id: &TitleId) -> StoreResult<Option<Title>> {
        let sql = format!("{} WHERE tconst = $1", TITLE_COLUMNS);
        let row: Option<TitleRow> = sqlx::query_as(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(title_from_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_from_row() {
        let p = principal_from_row((
            "nm0000246".to_string(),
            "Bruce Willis".to_string(),
            Some(1955),
            None,
            Some("actor,producer,music_department".to_string()),
        ));

        assert_eq!(p.id, ActorId::new("nm0000246"));
        assert_eq!(p.birth_year, Some(1955));
        assert_eq!(p.professions, vec!["actor", "producer", "music_department"]);
    }

    #[test]
    fn test_title_from_row_null_genres() {
        let t = title_from_row((
            "tt0095016".to_string(),
            "movie".to_string(),
            "Die Hard".to_string(),
            Some(1988),
            None,
            Some(132),
            Some("\\N".to_string()),
        ));

        assert!(t.is_movie());
        assert_eq!(t.runtime_minutes, Some(132));
        assert!(t.genres.is_empty());
    }

    #[test]
    fn test_co_star_query_filters_acting_credits() {
        assert!(CO_STARS_FOR_TITLE.contains("category = 'actor'"));
        assert!(CO_STARS_FOR_TITLE.contains("nconst <> $2"));
        assert!(TITLES_FOR_ACTOR.contains("titletype = 'movie'"));
    }

    #[test]
    fn test_titles_query_is_distinct() {
        assert!(TITLES_FOR_ACTOR.starts_with("SELECT DISTINCT title_principals.tconst"));
    }

    #[test]
    fn test_numeric_columns_tolerate_null_markers() {
        assert!(PRINCIPAL_COLUMNS.contains("NULLIF(birthyear::text, '\\N')::int4"));
        assert!(TITLE_COLUMNS.contains("NULLIF(runtimeminutes::text, '\\N')::int4"));
        assert!(!TITLE_COLUMNS.contains(" startyear::int4"));
    }
}
