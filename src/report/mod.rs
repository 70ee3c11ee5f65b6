use std::collections::BTreeMap;
use chrono::NaiveDate;
use crate::transaction::{Category, Transaction};

/// Totals of a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Summary {
    pub(crate) total_income: f64,
    pub(crate) total_expense: f64,
}

impl Summary {
    pub(crate) fn from_transactions(transactions: &[Transaction]) -> Summary {
        transactions.iter().fold(Summary::default(), |mut summary, t| {
            match t.category {
                Category::Income => summary.total_income += t.amount,
                Category::Expense => summary.total_expense += t.amount,
            }
            summary
        })
    }

    /// Income minus expense
    pub(crate) fn net(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

/// Income and expense of a single day
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DailyTotal {
    pub(crate) date: NaiveDate,
    pub(crate) income: f64,
    pub(crate) expense: f64,
}

/// Resample to one entry per day, from the earliest to the latest transaction date.
/// Days without transactions are zero.
pub(crate) fn daily_series(transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for t in transactions {
        let entry = by_day.entry(t.date).or_insert((0.0, 0.0));
        match t.category {
            Category::Income => entry.0 += t.amount,
            Category::Expense => entry.1 += t.amount,
        }
    }

    let (first, last) = match (by_day.keys().next(), by_day.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return vec![],
    };

    first.iter_days()
        .take_while(|day| *day <= last)
        .map(|day| {
            let (income, expense) = by_day.get(&day).copied().unwrap_or((0.0, 0.0));
            DailyTotal { date: day, income, expense }
        })
        .collect()
}
