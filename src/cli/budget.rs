//! Budget and currency CLI commands

use clap::Subcommand;

use crate::display::{format_budget_progress, CurrencyFormat};
use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::reports::{budget_progress, monthly_expenses};
use crate::storage::{CommandOutcome, KeyValueBackend, StoreCommand, TransactionStore};

use super::report::resolve_month;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget (0 clears it)
    Set {
        /// Amount in major units (e.g., "1500" or "1,500.00")
        amount: String,
    },

    /// Show how much of the budget a month has used
    Show {
        /// Month number (1-12); defaults to the current month
        #[arg(short, long)]
        month: Option<u32>,
        /// Year; defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Currency subcommands
#[derive(Subcommand)]
pub enum CurrencyCommands {
    /// Set the currency symbol (e.g., "$", "€", "£")
    Set { symbol: String },

    /// Show the current currency symbol
    Show,
}

/// Handle a budget command
pub fn handle_budget_command<B: KeyValueBackend>(
    store: &TransactionStore<B>,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    let currency = CurrencyFormat::new(store.currency()?);

    match cmd {
        BudgetCommands::Set { amount } => {
            let budget = Money::parse(&amount)
                .map_err(|e| FinanceError::Validation(e.to_string()))?;

            if let CommandOutcome::BudgetSet(budget) =
                store.dispatch(StoreCommand::SetBudget(budget))?
            {
                if budget.is_zero() {
                    println!("Monthly budget cleared");
                } else {
                    println!("Monthly budget set to {}", currency.format(budget));
                }
            }
        }

        BudgetCommands::Show { month, year } => {
            let month = resolve_month(month, year)?;
            let budget = store.budget()?;
            let expenses = monthly_expenses(&store.list_all()?, month);
            let progress = budget_progress(expenses, budget);

            println!("Budget for {}", month);
            print!(
                "{}",
                format_budget_progress(expenses, budget, &progress, &currency)
            );
        }
    }

    Ok(())
}

/// Handle a currency command
pub fn handle_currency_command<B: KeyValueBackend>(
    store: &TransactionStore<B>,
    cmd: CurrencyCommands,
) -> FinanceResult<()> {
    match cmd {
        CurrencyCommands::Set { symbol } => {
            if let CommandOutcome::CurrencySet(symbol) =
                store.dispatch(StoreCommand::SetCurrency(symbol))?
            {
                let example = CurrencyFormat::new(symbol.as_str()).format(Money::from_cents(123456));
                println!("Currency set to {} (e.g. {})", symbol, example);
            }
        }
        CurrencyCommands::Show => {
            println!("{}", store.currency()?);
        }
    }

    Ok(())
}
