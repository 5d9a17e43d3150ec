//! Batch orchestrator for the playlist ETL pipeline.
//!
//! Exposes each stage as its own subcommand so a scheduler can run and
//! retry them independently. Every stage is idempotent: re-running
//! extract or transform overwrites its artifact, and the load merge can
//! be replayed safely.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pulse_db::repositories::QaRepo;
use pulse_db::DbPool;
use pulse_etl::stages;
use pulse_spotify::client::parse_playlist_ref;
use pulse_spotify::SpotifyClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pulse-worker", about = "Playlist ETL batch orchestrator")]
struct Cli {
    /// Directory holding the raw and cleaned stage artifacts.
    #[arg(long, env = "PULSE_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Fixed delay between artist genre lookups, in milliseconds.
    #[arg(long, env = "GENRE_LOOKUP_DELAY_MS", default_value_t = 100)]
    genre_lookup_delay_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a playlist from the upstream API and overwrite its raw artifact.
    Extract {
        /// Playlist id or open.spotify.com URL.
        #[arg(long)]
        playlist: String,
    },
    /// Clean a raw artifact into the load-ready artifact.
    Transform {
        /// Playlist id.
        #[arg(long)]
        playlist: String,
    },
    /// Merge a cleaned artifact into the warehouse store.
    Load {
        /// Playlist id.
        #[arg(long)]
        playlist: String,
    },
    /// Run extract, transform, and load in order.
    Run {
        /// Playlist id or open.spotify.com URL.
        #[arg(long)]
        playlist: String,
    },
    /// Print the warehouse data-quality report as JSON.
    Qa,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_worker=info,pulse_etl=info,pulse_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let lookup_delay = Duration::from_millis(cli.genre_lookup_delay_ms);

    match cli.command {
        Command::Extract { playlist } => {
            let client = SpotifyClient::from_env()?;
            let playlist_id = parse_playlist_ref(&playlist);
            let summary =
                stages::extract_stage(&client, &playlist_id, &cli.data_dir, lookup_delay).await?;
            tracing::info!(
                playlist_id,
                tracks = summary.records,
                artifact = %summary.artifact.display(),
                "Extract finished"
            );
        }
        Command::Transform { playlist } => {
            let playlist_id = parse_playlist_ref(&playlist);
            let summary = stages::transform_stage(&playlist_id, &cli.data_dir)?;
            tracing::info!(
                playlist_id,
                rows = summary.rows,
                rejected = summary.rejected,
                duplicates = summary.duplicates,
                artifact = %summary.artifact.display(),
                "Transform finished"
            );
        }
        Command::Load { playlist } => {
            let pool = connect().await?;
            let playlist_id = parse_playlist_ref(&playlist);
            let summary = stages::load_stage(&pool, &playlist_id, &cli.data_dir).await?;
            tracing::info!(playlist_id, rows = summary.rows_written, "Load finished");
        }
        Command::Run { playlist } => {
            let client = SpotifyClient::from_env()?;
            let pool = connect().await?;
            let playlist_id = parse_playlist_ref(&playlist);
            let summary =
                stages::run_all(&pool, &client, &playlist_id, &cli.data_dir, lookup_delay).await?;
            tracing::info!(playlist_id, rows = summary.rows_written, "Pipeline finished");
        }
        Command::Qa => {
            let pool = connect().await?;
            let report = QaRepo::report(&pool).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Connect to the database and bring the schema up to date.
async fn connect() -> anyhow::Result<DbPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = pulse_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    pulse_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}
