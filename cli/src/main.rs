//! Six Degrees CLI: shortest co-star chains from the command line
//!
//! Connects to the IMDb Postgres store and runs searches through `SixDegrees`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use sixdegrees::{
    ActorId, AppConfig, Chain, PgStore, Principal, Resolution, SearchOutcome, SixDegrees, TieBreak,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sixdegrees",
    version,
    about = "Shortest chain of shared film credits between two actors"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "SIXDEGREES_CONFIG")]
    config: Option<PathBuf>,

    /// Postgres connection URL (overrides the config file)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Abort a search after this many milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Maximum degrees of separation to explore
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Tie-break between equally short chains: store_order or lexicographic
    #[arg(long, global = true)]
    tie_break: Option<TieBreak>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the chain between two actors by display name
    Path {
        /// First actor's exact display name
        from: String,
        /// Second actor's exact display name
        to: String,
    },
    /// Find the chain between two actors by id (nconst)
    PathIds {
        from: String,
        to: String,
    },
    /// List the people sharing a display name
    Resolve {
        name: String,
    },
    /// Interactive mode: one `Actor A | Actor B` query per line
    Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let store = PgStore::connect(&config.database)
        .await
        .context("connecting to the store")?;
    let service = SixDegrees::new(Arc::new(store), config.search);

    match &cli.command {
        Commands::Path { from, to } => {
            let outcome = service.search_by_name(from, to).await?;
            print_outcome(&outcome, &cli.format)
        }
        Commands::PathIds { from, to } => {
            let outcome = service
                .search_by_id(&ActorId::new(from.as_str()), &ActorId::new(to.as_str()))
                .await?;
            print_outcome(&outcome, &cli.format)
        }
        Commands::Resolve { name } => run_resolve(&service, name, &cli.format).await,
        Commands::Shell => run_shell(&service, &cli.format).await,
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }
    if let Some(ms) = cli.timeout_ms {
        config.search.timeout_ms = Some(ms);
    }
    if let Some(depth) = cli.max_depth {
        config.search.max_depth = Some(depth);
    }
    if let Some(tie_break) = cli.tie_break {
        config.search.tie_break = tie_break;
    }
    config.validate()?;
    Ok(config)
}

async fn run_resolve(
    service: &SixDegrees<PgStore>,
    name: &str,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let candidates = match service.resolver().lookup(name).await? {
        Resolution::Unique(p) => vec![p],
        Resolution::Ambiguous(ps) => ps,
        Resolution::Unknown => Vec::new(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&candidates)?),
        OutputFormat::Csv => {
            println!("nconst,name,birth_year,death_year,professions");
            for p in &candidates {
                println!(
                    "{},{},{},{},{}",
                    p.id,
                    csv_field(&p.name),
                    year(p.birth_year),
                    year(p.death_year),
                    csv_field(&p.professions.join(","))
                );
            }
        }
        OutputFormat::Table => {
            if candidates.is_empty() {
                println!("(no one named {:?})", name);
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["nconst", "name", "born", "died", "professions"]);
            for p in &candidates {
                table.add_row(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    year(p.birth_year),
                    year(p.death_year),
                    p.professions.join(", "),
                ]);
            }
            println!("{}", table);
            if candidates.len() > 1 {
                println!(
                    "{} people share this name; search with path-ids instead",
                    candidates.len()
                );
            }
        }
    }
    Ok(())
}

async fn run_shell(service: &SixDegrees<PgStore>, format: &OutputFormat) -> anyhow::Result<()> {
    println!("Six Degrees Interactive Shell");
    println!("Enter `Actor A | Actor B`, or :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("sixdegrees> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            ":quit" | ":exit" | ":q" => break,
            query => {
                let Some((from, to)) = query.split_once('|') else {
                    eprintln!("Error: expected `Actor A | Actor B`");
                    continue;
                };
                match service.search_by_name(from.trim(), to.trim()).await {
                    Ok(outcome) => print_outcome(&outcome, format)?,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }
    }

    println!("Bye!");
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => {
            println!("step,nconst,name,tconst,title");
            if let Some(chain) = outcome.chain() {
                for (i, (title, principal)) in steps(chain).enumerate() {
                    println!(
                        "{},{},{},{},{}",
                        i,
                        principal.id,
                        csv_field(&principal.name),
                        title.map(|t| t.id.to_string()).unwrap_or_default(),
                        csv_field(&title.map(|t| t.to_string()).unwrap_or_default())
                    );
                }
            }
        }
        OutputFormat::Table => match outcome.chain() {
            None => println!("No connection"),
            Some(chain) => {
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["#", "actor", "via"]);
                for (i, (title, principal)) in steps(chain).enumerate() {
                    table.add_row(vec![
                        i.to_string(),
                        format!("{} ({})", principal.name, principal.id),
                        title.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string()),
                    ]);
                }
                println!("{}", table);
                println!("{} degree(s) of separation", chain.degrees());
            }
        },
    }
    Ok(())
}

/// Chain as (title that led here, actor) rows, starting with the start actor
fn steps(chain: &Chain) -> impl Iterator<Item = (Option<&sixdegrees::Title>, &Principal)> {
    std::iter::once((None, &chain.start))
        .chain(chain.links.iter().map(|l| (Some(&l.title), &l.principal)))
}

fn year(y: Option<i32>) -> String {
    y.map(|y| y.to_string()).unwrap_or_default()
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
