//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Config;
use crate::display::{format_transaction_details, format_transaction_table, sort_for_display, CurrencyFormat};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Transaction, TransactionDraft, TransactionType};
use crate::storage::{CommandOutcome, KeyValueBackend, StoreCommand, TransactionStore};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// What the money was for
        title: String,
        /// Amount in major units (e.g., "12.50")
        amount: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: TransactionType,
        /// Category label
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD); defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List transactions, newest first
    List {
        /// Maximum rows to show (defaults to the configured list limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one transaction
    Show {
        /// Transaction id or unique id prefix
        id: String,
    },

    /// Change fields of an existing transaction
    Edit {
        /// Transaction id or unique id prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction id or unique id prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command<B: KeyValueBackend>(
    store: &TransactionStore<B>,
    config: &Config,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let currency = CurrencyFormat::new(store.currency()?);

    match cmd {
        TransactionCommands::Add {
            title,
            amount,
            kind,
            category,
            date,
            note,
        } => {
            let txn = TransactionDraft {
                title,
                amount,
                category,
                kind,
                date,
                note,
            }
            .build()?;
            let summary = format!(
                "{} {} ({})",
                txn.title,
                currency.format_signed(txn.amount, txn.kind),
                txn.category
            );

            if let CommandOutcome::Added(id) = store.dispatch(StoreCommand::Add(txn))? {
                println!("Added transaction: {}", summary);
                println!("  ID: {}", id);
            }
        }

        TransactionCommands::List { limit } => {
            let mut transactions = store.list_all()?;
            sort_for_display(&mut transactions);

            let total = transactions.len();
            let limit = limit.unwrap_or(config.list_limit);
            transactions.truncate(limit);

            println!(
                "{}",
                format_transaction_table(&transactions, &currency, &config.date_format)
            );
            if total > transactions.len() {
                println!("Showing {} of {} transactions", transactions.len(), total);
            }
        }

        TransactionCommands::Show { id } => {
            let txn = resolve_transaction(store, &id)?;
            print!(
                "{}",
                format_transaction_details(&txn, &currency, &config.date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            title,
            amount,
            kind,
            category,
            date,
            note,
        } => {
            let existing = resolve_transaction(store, &id)?;

            // Unchanged fields go through the same checks as fresh input
            let draft = TransactionDraft {
                title: title.unwrap_or_else(|| existing.title.clone()),
                amount: amount.unwrap_or_else(|| existing.amount.to_string()),
                category: category.unwrap_or_else(|| existing.category.clone()),
                kind: kind.unwrap_or(existing.kind),
                date,
                note: note.unwrap_or_else(|| existing.note.clone()),
            };
            let keep_date = draft.date.is_none();
            let mut updated = draft.build_with_id(existing.id.clone())?;
            if keep_date {
                updated.date = existing.date;
            }

            store.dispatch(StoreCommand::Update(updated.clone()))?;
            println!("Updated transaction: {}", updated.title);
            print!(
                "{}",
                format_transaction_details(&updated, &currency, &config.date_format)
            );
        }

        TransactionCommands::Delete { id, force } => {
            let txn = resolve_transaction(store, &id)?;

            if !force {
                println!(
                    "About to delete '{}' ({}).",
                    txn.title,
                    currency.format_signed(txn.amount, txn.kind)
                );
                println!("To proceed, run again with --force flag:");
                println!("  fintrack txn delete {} --force", id);
                return Ok(());
            }

            if let CommandOutcome::Removed(count) = store.dispatch(StoreCommand::Remove(txn.id))? {
                println!("Deleted {} transaction(s): {}", count, txn.title);
            }
        }
    }

    Ok(())
}

/// Find a transaction by full id, or by a prefix matching exactly one id
pub fn resolve_transaction<B: KeyValueBackend>(
    store: &TransactionStore<B>,
    query: &str,
) -> FinanceResult<Transaction> {
    let query = query.trim();
    let transactions = store.list_all()?;

    if let Some(txn) = transactions.iter().find(|t| t.id.as_str() == query) {
        return Ok(txn.clone());
    }

    let mut matches = transactions
        .into_iter()
        .filter(|t| !query.is_empty() && t.id.as_str().starts_with(query));

    match (matches.next(), matches.next()) {
        (Some(txn), None) => Ok(txn),
        (Some(_), Some(_)) => Err(FinanceError::Validation(format!(
            "Id prefix '{}' matches more than one transaction",
            query
        ))),
        (None, _) => Err(FinanceError::transaction_not_found(query)),
    }
}
