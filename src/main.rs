use sixdegrees::{
    ActorId, MemoryStore, Principal, SearchConfig, SearchOutcome, SixDegrees, Title, TieBreak,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Six Degrees v{}", sixdegrees::version());
    println!("==========================================");
    println!();

    let store = Arc::new(demo_store());
    println!(
        "Loaded demo relation: {} people, {} titles, {} credits",
        store.principal_count(),
        store.title_count(),
        store.credit_count()
    );

    // Demo 1: search by name
    println!("\n=== Demo 1: Search by name ===");
    let service = SixDegrees::new(Arc::clone(&store), SearchConfig::default());
    report(service.search_by_name("Bruce Willis", "Kevin Bacon").await);

    // Demo 2: search by id with lexicographic tie-breaking
    println!("\n=== Demo 2: Search by id (lexicographic tie-break) ===");
    let config = SearchConfig::default().with_tie_break(TieBreak::Lexicographic);
    let service = SixDegrees::new(Arc::clone(&store), config);
    report(
        service
            .search_by_id(&ActorId::new("nm0000614"), &ActorId::new("nm0000102"))
            .await,
    );

    // Demo 3: failures are typed
    println!("\n=== Demo 3: Unresolvable names ===");
    report(service.search_by_name("Bruce Willis", "Nobody In Particular").await);
}

fn report(result: sixdegrees::SearchResult<SearchOutcome>) {
    match result {
        Ok(SearchOutcome::Connected(chain)) => {
            println!("✓ {} degree(s) of separation", chain.degrees());
            println!("  {}", chain);
        }
        Ok(SearchOutcome::NoConnection) => println!("✗ No connection"),
        Err(e) => println!("✗ {}", e),
    }
}

fn demo_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .add_principal(Principal::new("nm0000246", "Bruce Willis").with_birth_year(1955))
        .add_principal(Principal::new("nm0000102", "Kevin Bacon").with_birth_year(1958))
        .add_principal(Principal::new("nm0000158", "Tom Hanks").with_birth_year(1956))
        .add_principal(
            Principal::new("nm0000614", "Alan Rickman")
                .with_birth_year(1946)
                .with_death_year(2016),
        )
        .add_title(Title::movie("tt0095016", "Die Hard").with_start_year(1988))
        .add_title(Title::movie("tt0099165", "The Bonfire of the Vanities").with_start_year(1990))
        .add_title(Title::movie("tt0112384", "Apollo 13").with_start_year(1995))
        .cast("tt0095016", &["nm0000246", "nm0000614"])
        .cast("tt0099165", &["nm0000158", "nm0000246"])
        .cast("tt0112384", &["nm0000158", "nm0000102"]);
    store
}
