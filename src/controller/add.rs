use anyhow::Context;
use log::info;
use crate::config::Config;
use crate::prompt::{InputValidator, LineSource, parse_amount, parse_date};
use crate::store::RecordStore;
use crate::transaction::{Category, Transaction, format_amount};

/// Field values given up front, e.g. as command line flags. Missing ones are prompted for.
#[derive(Debug, Default)]
pub(crate) struct AddArgs {
    pub(crate) date: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) category: Option<Category>,
    pub(crate) description: Option<String>,
}

/// Collect and validate one transaction, then append it to the store
pub(crate) fn execute_add<S: LineSource>(store: &RecordStore, config: &Config, source: &mut S, args: AddArgs) -> anyhow::Result<Transaction> {
    let mut validator = InputValidator::new(source, config.max_attempts);

    let date = match args.date {
        Some(s) => parse_date(&s)?,
        None => validator.get_date("Enter the date of the transaction (dd-mm-yyyy) or press enter for today's date: ", true)?,
    };
    let amount = match args.amount {
        Some(s) => parse_amount(&s)?,
        None => validator.get_amount()?,
    };
    let category = match args.category {
        Some(c) => c,
        None => validator.get_category()?,
    };
    let description = match args.description {
        Some(d) => d,
        None => validator.get_description()?,
    };

    let transaction = Transaction::new(date, amount, category, &description);
    store.add(&transaction)
        .with_context(|| format!("Unable to save transaction to {}", store.path().display()))?;

    info!("Added {} {} on {}", transaction.category, format_amount(transaction.amount), transaction.date_display());
    println!("Transaction added successfully!");
    Ok(transaction)
}
