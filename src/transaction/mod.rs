use std::fmt;
use std::str::FromStr;
use chrono::NaiveDate;
use clap::ValueEnum;

/// Date format used both for user input and for the `date` column of the data file, e.g. `31-01-2024`.
pub(crate) const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub(crate) enum Category {
    Income,
    Expense,
}

impl Category {
    /// Name stored in the `category` column
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the stored form only. Single letter codes typed at the prompt are handled by the prompt module.
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(Category::Income),
            "Expense" => Ok(Category::Expense),
            _ => Err(format!("unknown category '{s}'")),
        }
    }
}

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub(crate) date: NaiveDate,
    /// Always positive, the direction is given by `category`
    pub(crate) amount: f64,
    pub(crate) category: Category,
    pub(crate) description: String,
}

impl Transaction {
    pub(crate) fn new(date: NaiveDate, amount: f64, category: Category, description: &str) -> Transaction {
        let description = description.replace('\n', " ");
        Transaction {
            date,
            amount,
            category,
            description,
        }
    }

    pub(crate) fn date_display(&self) -> String {
        format_date(self.date)
    }
}

/// Parse a `dd-mm-yyyy` date. The year must be exactly four digits, chrono's `%Y` alone
/// would take `24` as year 24 and accept a leading `+`.
pub(crate) fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let year = s.rsplit('-').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format $ amount
pub(crate) fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_stored_form() {
        assert_eq!("Income".parse::<Category>(), Ok(Category::Income));
        assert_eq!("Expense".parse::<Category>(), Ok(Category::Expense));
        assert!("income".parse::<Category>().is_err());
        assert!("I".parse::<Category>().is_err());
        assert_eq!(Category::Expense.to_string(), "Expense");
    }

    #[test]
    fn test_description_newlines_flattened() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let t = Transaction::new(date, 12.5, Category::Expense, "lunch\nwith team");
        assert_eq!(t.description, "lunch with team");
        assert_eq!(t.date_display(), "09-03-2024");
    }

    #[test]
    fn test_parse_date_str_needs_four_digit_year() {
        assert_eq!(parse_date_str("31-01-2024"), NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(parse_date_str("1-2-2024"), NaiveDate::from_ymd_opt(2024, 2, 1));
        for s in ["01-01-24", "01-01-0", "01-01-+2024", "01-01-99999", "01-01-20a4", "", "2024"] {
            assert_eq!(parse_date_str(s), None, "{s}");
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(60.0), "60.00");
        assert_eq!(format_amount(1234.5), "1234.50");
    }
}
