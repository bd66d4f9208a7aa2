use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use belasting_data::DeductionRuleLoader;
use belasting_db_sqlite::SqliteRepository;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Load deduction rules from a CSV file into the database.
///
/// The CSV file must have the columns
/// `category,item,description,conditions,percentage,business_type,sector`.
/// Leave `percentage` empty for fully deductible items and `sector` empty
/// for rules that apply to every sector.
#[derive(Parser, Debug)]
#[command(name = "belasting-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing deduction rules
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g., sqlite:belasting.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:belasting.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database).await?;

    if args.migrate {
        info!("running migrations");
        repo.run_migrations().await?;
    }

    if let Some(seeds_dir) = &args.seeds {
        info!(seeds = %seeds_dir.display(), "running seeds");
        repo.run_seeds(seeds_dir).await?;
    }

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = DeductionRuleLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;
    info!(file = %args.file.display(), records = records.len(), "parsed deduction rules");

    let inserted = DeductionRuleLoader::load(&repo, &records)
        .await
        .context("Failed to load deduction rules into database")?;

    info!("Successfully loaded {} deduction rules into the database.", inserted);

    Ok(())
}
