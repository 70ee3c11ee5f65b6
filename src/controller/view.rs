use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment, Color, Table, TableComponent};
use crate::chart;
use crate::config::Config;
use crate::prompt::{InputValidator, LineSource, parse_date};
use crate::report::Summary;
use crate::store::RecordStore;
use crate::transaction::{Category, Transaction, format_amount};

/// List transactions in `[start, end]` with their totals, optionally followed by the chart.
/// Dates not given are prompted for, an empty answer meaning today.
pub(crate) fn execute_view<S: LineSource>(store: &RecordStore, config: &Config, source: &mut S, start: Option<&str>, end: Option<&str>, plot: bool) -> anyhow::Result<Vec<Transaction>> {
    let mut validator = InputValidator::new(source, config.max_attempts);
    let start_date = resolve_date(&mut validator, start, "Enter the start date (dd-mm-yyyy) or press enter for today: ")?;
    let end_date = resolve_date(&mut validator, end, "Enter the end date (dd-mm-yyyy) or press enter for today: ")?;

    store.initialize_csv()?;
    let transactions = store.get_transactions(start_date, end_date)?;
    if transactions.is_empty() {
        println!("No transactions found in the given date range.");
        return Ok(transactions);
    }

    println!("{}", transactions_table(&transactions));
    let summary = Summary::from_transactions(&transactions);
    for line in summary_lines(&summary, &config.currency) {
        println!("{line}");
    }

    if plot {
        chart::plot_transactions(&transactions)?;
    }

    Ok(transactions)
}

fn resolve_date<S: LineSource>(validator: &mut InputValidator<S>, given: Option<&str>, prompt: &str) -> anyhow::Result<NaiveDate> {
    match given {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(validator.get_date(prompt, true)?),
    }
}

pub(crate) fn transactions_table(transactions: &[Transaction]) -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table.set_header(vec!["Date", "Amount", "Category", "Description"]);

    for t in transactions {
        let color = match t.category {
            Category::Income => Color::Green,
            Category::Expense => Color::Red,
        };
        table.add_row(vec![
            Cell::new(t.date_display().as_str()),
            Cell::new(format_amount(t.amount).as_str()).set_alignment(CellAlignment::Right),
            Cell::new(t.category.as_str()).fg(color),
            Cell::new(t.description.as_str()),
        ]);
    }

    table
}

pub(crate) fn summary_lines(summary: &Summary, currency: &str) -> Vec<String> {
    vec![
        "Summary".to_string(),
        format!("Total Income: {currency}{}", format_amount(summary.total_income)),
        format!("Total Expense: {currency}{}", format_amount(summary.total_expense)),
        format!("Net Savings: {currency}{}", format_amount(summary.net())),
    ]
}
