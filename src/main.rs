use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use fintrack::audit::AuditLogger;
use fintrack::backup::BackupManager;
use fintrack::cli::{
    handle_backups_command, handle_budget_command, handle_categories_command,
    handle_currency_command, handle_export_command, handle_history_command,
    handle_import_command, handle_summary_command, handle_transaction_command, BudgetCommands,
    CurrencyCommands, TransactionCommands,
};
use fintrack::config::{paths::FinancePaths, settings::Config};
use fintrack::storage::{StoreCommand, TransactionStore};

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "FINTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker for the terminal",
    long_about = "fintrack records income and expenses, compares monthly spending \
                  against a budget, breaks expenses down by category and keeps \
                  JSON backups of everything."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Currency symbol commands
    #[command(subcommand)]
    Currency(CurrencyCommands),

    /// Income, expenses and balance for a month
    Summary {
        #[arg(short, long)]
        month: Option<u32>,
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Expense totals by category
    Categories {
        #[arg(short, long)]
        month: Option<u32>,
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Export all data to a timestamped backup file
    Export,

    /// Replace all data with a backup (the most recent one by default)
    Import {
        /// Backup file to import instead of the most recent one
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// List available backups
    Backups,

    /// Show recent changes from the audit log
    History {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Erase all transactions and settings
    Reset {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let config = Config::load_or_create(&paths)?;
    let audit = AuditLogger::new(paths.audit_log());

    let mut store = TransactionStore::open(&paths)?;
    if config.audit_enabled {
        store = store.with_audit(audit.clone());
    }
    let backups = BackupManager::new(&paths);

    match cli.command {
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&store, &config, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&store, cmd)?,
        Some(Commands::Currency(cmd)) => handle_currency_command(&store, cmd)?,
        Some(Commands::Summary { month, year }) => handle_summary_command(&store, month, year)?,
        Some(Commands::Categories { month, year }) => {
            handle_categories_command(&store, month, year)?
        }
        Some(Commands::Export) => handle_export_command(&backups, &store)?,
        Some(Commands::Import { file, force }) => {
            handle_import_command(&backups, &store, file, force)?
        }
        Some(Commands::Backups) => handle_backups_command(&backups)?,
        Some(Commands::History { limit }) => handle_history_command(&audit, limit)?,
        Some(Commands::Reset { force }) => {
            if !force {
                println!("WARNING: This will erase ALL transactions, the budget and the currency!");
                println!("To proceed, run again with --force flag:");
                println!("  fintrack reset --force");
            } else {
                store.dispatch(StoreCommand::ClearAll)?;
                println!("All data erased.");
            }
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data file:        {}", paths.preferences_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Schema version: {}", config.schema_version);
            println!("  Date format:    {}", config.date_format);
            println!("  Audit enabled:  {}", config.audit_enabled);
            println!("  List limit:     {}", config.list_limit);
        }
        None => {
            println!("fintrack - personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `FINTRACK_LOG` (default `warn`)
fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}
