use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use importer::{
    CompetitionImporter, FootballDataClient, FootballDataImporter, ImportContext, ImportOutcome,
    RetryPolicy,
    retry::{DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS},
    sources::football_data::DEFAULT_BASE_URL,
};
use storage::{
    Database, LeagueStore, dto::league::normalize_code, error::StorageError,
    repository::competition::CompetitionRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "league-import")]
#[command(about = "Football league importer for football-data.org", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a competition with its teams and players
    League {
        code: String,

        #[arg(long, env = "FOOTBALL_DATA_TOKEN")]
        token: Option<String>,

        #[arg(long, env = "FOOTBALL_DATA_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        #[arg(long, env = "FOOTBALL_DATA_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: u32,

        #[arg(long, env = "FOOTBALL_DATA_BACKOFF_SECS", default_value_t = DEFAULT_BACKOFF.as_secs())]
        backoff_secs: u64,
    },
    /// Count the stored players of a competition
    TotalPlayers { code: String },
    /// Delete a stored competition with its teams and players
    Forget { code: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::new(&cli.database_url).await?;
    db.run_migrations().await?;

    match cli.command {
        Commands::League {
            code,
            token,
            base_url,
            max_attempts,
            backoff_secs,
        } => {
            let retry = RetryPolicy::new(max_attempts, Duration::from_secs(backoff_secs));
            handle_league_import(db, &code, token, &base_url, retry).await?;
        }
        Commands::TotalPlayers { code } => {
            handle_total_players(&db, &code).await?;
        }
        Commands::Forget { code } => {
            CompetitionRepository::new(db.pool())
                .delete_by_code(&normalize_code(&code))
                .await?;
            tracing::info!("✓ Deleted league '{}'", code);
        }
    }

    Ok(())
}

async fn handle_league_import(
    db: Database,
    code: &str,
    token: Option<String>,
    base_url: &str,
    retry: RetryPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = FootballDataClient::with_base_url(base_url)?.with_retry_policy(retry);
    let importer = FootballDataImporter::new(client);
    let context = ImportContext {
        store: Arc::new(db),
        auth_token: token,
    };

    match importer.import(code, &context).await {
        ImportOutcome::Imported => {
            tracing::info!("✓ {}", ImportOutcome::Imported);
            Ok(())
        }
        outcome => Err(format!("League '{}': {}", code, outcome).into()),
    }
}

async fn handle_total_players(db: &Database, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    match db.count_players(&normalize_code(code)).await {
        Ok(total) => {
            tracing::info!("League '{}' has {} players", code, total);
            Ok(())
        }
        Err(StorageError::NotFound) => Err(format!("League '{}' is not imported", code).into()),
        Err(e) => Err(e.into()),
    }
}
