use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tally::cli::{
    handle_category_command, handle_estimate_command, handle_history_command,
    handle_report_command, handle_transaction_command, CategoryCommands, EstimateCommands,
    ReportCommands, TransactionCommands,
};
use tally::config::{paths::DATA_DIR_ENV, Settings, TallyPaths};
use tally::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Track income, expenses and monthly spending estimates",
    long_about = "Tally records income and expense transactions, monthly spending \
                  estimates and categories, and reports balances, monthly trends, \
                  spending by category and estimated versus actual spending."
)]
struct Cli {
    /// Directory holding settings and data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data files and default categories
    Init,

    /// Show configuration, or change one setting
    Config {
        /// Setting to change (currency_symbol, date_format, audit_log)
        key: Option<String>,
        /// New value
        value: Option<String>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Monthly estimate commands
    #[command(subcommand)]
    Estimate(EstimateCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Aggregated reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => TallyPaths::with_base_dir(dir),
        None => TallyPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("Tally - income, expense and estimate tracker");
        println!();
        println!("Run 'tally --help' for usage information.");
        return Ok(());
    };

    if let Commands::Config { key, value } = &command {
        match (key, value) {
            (Some(key), Some(value)) => {
                settings.set(key, value)?;
                settings.save(&paths)?;
                println!("Set {} = {}", key, value);
            }
            (Some(key), None) => anyhow::bail!("Missing value for setting '{}'", key),
            _ => print_config(&paths, &settings),
        }
        return Ok(());
    }

    let storage = Storage::new(paths.clone()).with_audit(settings.audit_log);
    let init = storage
        .initialize()
        .with_context(|| format!("Failed to initialize storage at {}", paths.base_dir().display()))?;

    match command {
        Commands::Init => {
            if !paths.is_initialized() {
                settings.save(&paths)?;
            }
            println!("Tally data directory: {}", paths.data_dir().display());
            if init.seeded_categories.is_empty() {
                println!("Already initialized.");
            } else {
                let names: Vec<&str> = init
                    .seeded_categories
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect();
                println!("Created default categories: {}", names.join(", "));
            }
        }
        Commands::Transaction(cmd) => handle_transaction_command(&storage, &settings, cmd)?,
        Commands::Estimate(cmd) => handle_estimate_command(&storage, &settings, cmd)?,
        Commands::Category(cmd) => handle_category_command(&storage, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::History { limit } => handle_history_command(&storage, limit)?,
        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Diagnostics go to stderr, filtered by TALLY_LOG (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_config(paths: &TallyPaths, settings: &Settings) {
    println!("Tally Configuration");
    println!("===================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  currency_symbol: {}", settings.currency_symbol);
    println!("  date_format:     {}", settings.date_format);
    println!("  audit_log:       {}", if settings.audit_log { "on" } else { "off" });
}
