use std::error::Error as StdError;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use swiss_tournament::{
    config::{self, Config},
    store::PgStore,
    PlayerId, Tournament,
};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, author, about)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database schema
    Migrate,
    /// Register a new player
    Register { name: String },
    /// Record the outcome of a match
    Report { winner: PlayerId, loser: PlayerId },
    /// List registered players
    Players,
    /// Count registered players
    Count,
    /// Show current standings
    Standings,
    /// Compute pairings for the next round
    Pairings,
    /// Delete all matches, and all players unless told otherwise
    Reset {
        #[arg(long)]
        matches_only: bool,
    },
}

fn install_tracing(config: &Config) -> Result<bool, Box<dyn StdError>> {
    let tracing_config = config.tracing_config.as_ref();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(tracing_config.and_then(|t| t.filter.as_deref()).unwrap_or("warn"))
    });

    // Jaeger sink, only when an agent is configured
    let telemetry = match tracing_config.and_then(|t| t.jaeger.as_deref()) {
        Some(endpoint) => {
            let tracer = opentelemetry_jaeger::new_agent_pipeline()
                .with_endpoint(endpoint)
                .with_service_name("swiss-tournament")
                .install_simple()?;
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };
    let jaeger = telemetry.is_some();

    let subscriber = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .with(telemetry);
    tracing::subscriber::set_global_default(subscriber)?;
    if jaeger {
        tracing::info!("Installed jaeger tracing");
    }

    Ok(jaeger)
}

async fn run(command: Command, config: &Config) -> Result<(), Box<dyn StdError>> {
    let store = Arc::new(PgStore::connect(&config.db_config)?);
    let tournament = Tournament::new(store.clone());

    match command {
        Command::Migrate => store.migrate().await?,
        Command::Register { name } => {
            let player = tournament.register_player(&name).await?;
            println!("Registered {} with id {}", player.name, player.id);
        }
        Command::Report { winner, loser } => {
            let m = tournament.report_match(winner, loser).await?;
            println!("Recorded match {}: {} beat {}", m.id, m.winner, m.loser);
        }
        Command::Players => {
            for p in tournament.players().await? {
                println!("{:>5}  {}", p.id, p.name);
            }
        }
        Command::Count => println!("{}", tournament.count_players().await?),
        Command::Standings => {
            println!("{:>4}  {:>5}  {:<24} {:>4} {:>7}", "rank", "id", "name", "wins", "matches");
            for (i, row) in tournament.player_standings().await?.into_iter().enumerate() {
                println!(
                    "{:>4}  {:>5}  {:<24} {:>4} {:>7}",
                    i + 1,
                    row.id,
                    row.name,
                    row.wins,
                    row.matches
                );
            }
        }
        Command::Pairings => {
            for (i, p) in tournament.swiss_pairings().await?.into_iter().enumerate() {
                println!(
                    "{:>3}. {} ({}) vs {} ({})",
                    i + 1,
                    p.first.name,
                    p.first.id,
                    p.second.name,
                    p.second.id
                );
            }
        }
        Command::Reset { matches_only } => {
            tournament.delete_matches().await?;
            if !matches_only {
                tournament.delete_players().await?;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = config::load_config(&cli.config)
        .map_err(|e| format!("Failed to load {}: {}", cli.config, e))
        .unwrap();

    let jaeger = install_tracing(&config).expect("Failed to install tracing");

    let res = run(cli.command, &config).await;

    if jaeger {
        opentelemetry::global::shutdown_tracer_provider();
    }
    if let Err(e) = res {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
