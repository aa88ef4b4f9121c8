use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use bricklink_price_core::models::item::{Condition, GuideType, ItemIdentifier};
use bricklink_price_core::services::sync_service::SyncService;
use bricklink_price_core::storage::export;
use bricklink_price_core::storage::store::JsonDocumentStore;
use bricklink_price_core::PriceTracker;

#[derive(Debug, Parser)]
#[command(name = "bricklink-price")]
#[command(about = "Fetch, export and synchronize BrickLink price-guide data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GuideTypeArg {
    /// Current stock price guide
    Stock,
    /// Sold-lot price guide
    Sold,
}

impl From<GuideTypeArg> for GuideType {
    fn from(value: GuideTypeArg) -> Self {
        match value {
            GuideTypeArg::Stock => GuideType::Stock,
            GuideTypeArg::Sold => GuideType::Sold,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "UPPER")]
enum ConditionArg {
    /// New items
    N,
    /// Used items
    U,
}

impl From<ConditionArg> for Condition {
    fn from(value: ConditionArg) -> Self {
        match value {
            ConditionArg::N => Condition::New,
            ConditionArg::U => Condition::Used,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the average price for one catalog item
    Price {
        /// Item type, e.g. PART, MINIFIG, SET, BOOK, GEAR
        item_type: String,
        /// Item number, e.g. 3001 or 75257-1
        item_no: String,
        /// Which price guide to use
        #[arg(long, value_enum, default_value = "sold")]
        guide_type: GuideTypeArg,
        /// Filter by condition
        #[arg(long, value_enum, default_value = "N")]
        new_or_used: ConditionArg,
        /// Optional currency code (e.g. EUR, USD); defaults to the store currency
        #[arg(long)]
        currency_code: Option<String>,
    },
    /// Collect all four guide/condition combinations into a JSON export file
    Collect {
        item_type: String,
        item_no: String,
        #[arg(long)]
        currency_code: Option<String>,
        /// Directory the export file is written to
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Merge all JSON export files in a directory into the document store
    Sync {
        /// Directory containing the export files
        #[arg(default_value = ".")]
        directory: PathBuf,
        /// Document store directory
        #[arg(long, default_value = "price_history")]
        store: PathBuf,
    },
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Price {
            item_type,
            item_no,
            guide_type,
            new_or_used,
            currency_code,
        } => {
            let tracker = PriceTracker::from_env()?;
            let item = ItemIdentifier::new(&item_type, &item_no);
            let guide_type = GuideType::from(guide_type);
            let condition = Condition::from(new_or_used);
            let price = tracker
                .average_price(&item, guide_type, condition, currency_code.as_deref())
                .await?;
            println!(
                "Average {} price for {} ({}): {:.2}",
                guide_type, item, condition, price
            );
        }
        Commands::Collect {
            item_type,
            item_no,
            currency_code,
            output,
        } => {
            let tracker = PriceTracker::from_env()?;
            let item = ItemIdentifier::new(&item_type, &item_no);
            let export_doc = tracker.collect(&item, currency_code.as_deref()).await?;
            let path = export::write_export(&output, &export_doc)?;
            println!("Wrote {}", path.display());
        }
        Commands::Sync { directory, store } => {
            let store = JsonDocumentStore::new(store)?;
            let synced = SyncService::sync_directory(&store, &directory).await?;
            println!("Synchronized {synced} export file(s).");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
