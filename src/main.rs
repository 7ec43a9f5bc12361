// src/main.rs
mod config;
mod documents;
mod extractors;
mod pipeline;
mod report;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use config::{ImportConfig, StoreConfig};
use documents::FileTextExtractor;
use pipeline::ImportPipeline;
use storage::{LedgerStore, LedgerWriter, Owner};
use utils::AppError;

/// Import futures round trips from monthly brokerage statements into the ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Owner id to write records under (defaults to the owner of an existing item)
    #[arg(long)]
    user_id: Option<String>,

    /// Directory containing the statement PDFs
    #[arg(long, env = "FUTURES_PDF_DIR", default_value = config::DEFAULT_SOURCE_DIR)]
    pdf_dir: PathBuf,

    /// Ledger table name
    #[arg(long, default_value = config::DEFAULT_TABLE)]
    table: String,

    /// AWS region of the ledger table
    #[arg(long, default_value = config::DEFAULT_REGION)]
    region: String,

    /// AWS CLI profile name
    #[arg(long)]
    profile: Option<String>,

    /// Directory for the local JSON ledger
    #[arg(long, env = "FUTURES_LEDGER_DIR", default_value = config::DEFAULT_LEDGER_DIR)]
    ledger_dir: PathBuf,

    /// Preview parsed records without writing to the ledger
    #[arg(long)]
    dry_run: bool,
}

impl From<Args> for ImportConfig {
    fn from(args: Args) -> Self {
        Self {
            source_dir: args.pdf_dir,
            owner: args.user_id,
            store: StoreConfig {
                table: args.table,
                region: args.region,
                profile: args.profile,
                ledger_dir: args.ledger_dir,
            },
            dry_run: args.dry_run,
        }
    }
}

#[cfg(not(feature = "dynamodb"))]
async fn open_store(config: &StoreConfig) -> Result<Box<dyn LedgerStore>, AppError> {
    tracing::debug!(
        "Local ledger ignores region {} and profile {:?}",
        config.region,
        config.profile
    );
    let ledger = storage::JsonLedger::new(&config.ledger_dir, &config.table);
    tracing::info!("Using local ledger at {}", ledger.path().display());
    Ok(Box::new(ledger))
}

#[cfg(feature = "dynamodb")]
async fn open_store(config: &StoreConfig) -> Result<Box<dyn LedgerStore>, AppError> {
    Ok(Box::new(storage::dynamo::DynamoLedger::connect(config).await))
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting import for args: {:?}", args);
    let config = ImportConfig::from(args);

    // 3. Resolve the owner before touching any statement
    let store = open_store(&config.store).await?;
    let owner = storage::resolve_owner(config.owner.as_deref(), store.as_ref(), &config.store.table).await?;
    if let Owner::Detected(id) = &owner {
        println!("Auto-detected userId: {}", id);
    }

    // 4. Parse every statement; any bad row aborts here with nothing written
    let pipeline = ImportPipeline::new(&config, FileTextExtractor);
    let summary = pipeline.run()?;
    report::print_summary(&summary);

    if config.dry_run {
        report::print_dry_run();
        return Ok(());
    }

    // 5. Persist
    let written = LedgerWriter::new(store.as_ref())
        .write_all(&summary.records, owner.id())
        .await?;
    report::print_written(written, &config.store.table);

    tracing::info!("Import finished. Documents: {}, records written: {}", summary.documents.len(), written);
    Ok(())
}
