//! Shared fixture for the integration tests

#![allow(dead_code)]

use sixdegrees::{CreditCategory, MemoryStore, Principal, Title};

pub const WILLIS: &str = "nm0000246";
pub const BACON: &str = "nm0000102";
pub const HANKS: &str = "nm0000158";
pub const RICKMAN: &str = "nm0000614";
pub const MCTIERNAN: &str = "nm0001104";
pub const LONER: &str = "nm0000999";

pub const DIE_HARD: &str = "tt0095016";
pub const BONFIRE: &str = "tt0099165";
pub const APOLLO_13: &str = "tt0112384";
pub const TALK_SHOW: &str = "tt9000001";

/// A small slice of the credits relation
///
/// Willis and Bacon share a tvEpisode credit, which must not count as a connection,
/// and McTiernan only has a director credit.
pub fn fixture() -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .add_principal(
            Principal::new(WILLIS, "Bruce Willis")
                .with_birth_year(1955)
                .with_professions(["actor", "producer"]),
        )
        .add_principal(Principal::new(BACON, "Kevin Bacon").with_birth_year(1958))
        .add_principal(Principal::new(HANKS, "Tom Hanks").with_birth_year(1956))
        .add_principal(
            Principal::new(RICKMAN, "Alan Rickman")
                .with_birth_year(1946)
                .with_death_year(2016),
        )
        .add_principal(
            Principal::new(MCTIERNAN, "John McTiernan").with_professions(["director"]),
        )
        .add_principal(Principal::new(LONER, "Nobody Famous"))
        .add_principal(Principal::new("nm9000001", "Chris Evans").with_birth_year(1981))
        .add_principal(Principal::new("nm9000002", "Chris Evans").with_birth_year(1963))
        .add_title(Title::movie(DIE_HARD, "Die Hard").with_start_year(1988))
        .add_title(Title::movie(BONFIRE, "The Bonfire of the Vanities").with_start_year(1990))
        .add_title(Title::movie(APOLLO_13, "Apollo 13").with_start_year(1995))
        .add_title(Title::new(TALK_SHOW, "tvEpisode", "Late Night Special").with_start_year(1996));

    store
        .cast(DIE_HARD, &[WILLIS, RICKMAN])
        .add_credit(DIE_HARD, MCTIERNAN, CreditCategory::parse("director"))
        .cast(BONFIRE, &[HANKS, WILLIS])
        .cast(APOLLO_13, &[HANKS])
        .add_credit(APOLLO_13, BACON, CreditCategory::Actor)
        .cast(TALK_SHOW, &[WILLIS, BACON]);
    store
}
