#[cfg(test)]
pub(crate) mod scripted;

use std::fmt;
use chrono::{Local, NaiveDate};
use crate::transaction::{Category, parse_date_str};

/// Where the validator reads user input from. The interactive shell reads from a line editor.
pub(crate) trait LineSource {
    /// Show `prompt` and read one line. Returns `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, InputError>;
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InputError {
    InvalidDate(String),
    InvalidAmount(String),
    NonPositiveAmount(f64),
    InvalidCategory(String),
    /// Gave up after this many invalid answers
    TooManyAttempts(usize),
    /// Input ended (Ctrl-D or end of piped stdin)
    Closed,
    /// Ctrl-C at a prompt
    Interrupted,
    Readline(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::InvalidDate(_) => write!(f, "Invalid date format. Please use 'dd-mm-yyyy'."),
            InputError::InvalidAmount(s) => write!(f, "'{s}' is not a valid amount."),
            InputError::NonPositiveAmount(_) => write!(f, "Amount must be greater than zero."),
            InputError::InvalidCategory(_) => write!(f, "Invalid category. Please enter 'I' for Income or 'E' for Expense."),
            InputError::TooManyAttempts(n) => write!(f, "No valid input after {n} attempts, giving up."),
            InputError::Closed => write!(f, "Input closed."),
            InputError::Interrupted => write!(f, "Input interrupted."),
            InputError::Readline(s) => write!(f, "Unable to read input: {s}"),
        }
    }
}

impl std::error::Error for InputError {}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, InputError> {
    parse_date_str(s.trim()).ok_or_else(|| InputError::InvalidDate(s.to_string()))
}

pub(crate) fn parse_amount(s: &str) -> Result<f64, InputError> {
    let s = s.trim();
    let amount = s.parse::<f64>().map_err(|_| InputError::InvalidAmount(s.to_string()))?;
    // f64 parsing accepts "inf" and "NaN"
    if !amount.is_finite() {
        return Err(InputError::InvalidAmount(s.to_string()));
    }
    if amount <= 0.0 {
        return Err(InputError::NonPositiveAmount(amount));
    }
    Ok(amount)
}

/// Maps the single letter codes `I` and `E`, case-insensitive.
pub(crate) fn parse_category_code(s: &str) -> Result<Category, InputError> {
    match s.trim().to_uppercase().as_str() {
        "I" => Ok(Category::Income),
        "E" => Ok(Category::Expense),
        _ => Err(InputError::InvalidCategory(s.to_string())),
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prompts for transaction fields, asking again on invalid input up to `max_attempts` times.
pub(crate) struct InputValidator<'s, S: LineSource> {
    source: &'s mut S,
    max_attempts: usize,
}

impl<'s, S: LineSource> InputValidator<'s, S> {
    pub(crate) fn new(source: &'s mut S, max_attempts: usize) -> InputValidator<'s, S> {
        InputValidator {
            source,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Read a `dd-mm-yyyy` date. Empty input means today when `allow_default` is set.
    pub(crate) fn get_date(&mut self, prompt: &str, allow_default: bool) -> Result<NaiveDate, InputError> {
        self.prompt_until(prompt, |s| {
            if s.is_empty() && allow_default {
                Ok(today())
            } else {
                parse_date(s)
            }
        })
    }

    pub(crate) fn get_amount(&mut self) -> Result<f64, InputError> {
        self.prompt_until("Enter the amount: ", parse_amount)
    }

    pub(crate) fn get_category(&mut self) -> Result<Category, InputError> {
        self.prompt_until("Enter the category ('I' for Income or 'E' for Expense): ", parse_category_code)
    }

    /// Free text, may be empty
    pub(crate) fn get_description(&mut self) -> Result<String, InputError> {
        self.source.read_line("Enter a description (optional): ")?.ok_or(InputError::Closed)
    }

    fn prompt_until<T, F>(&mut self, prompt: &str, parse: F) -> Result<T, InputError>
    where
        F: Fn(&str) -> Result<T, InputError>,
    {
        for _ in 0..self.max_attempts {
            let line = self.source.read_line(prompt)?.ok_or(InputError::Closed)?;
            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => println!("{e}"),
            }
        }

        Err(InputError::TooManyAttempts(self.max_attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::scripted::ScriptedInput;
    use crate::transaction::format_date;

    #[test]
    fn test_get_date_keeps_valid_dates() {
        for s in ["01-01-2024", "31-01-2024", "29-02-2024", "15-08-1999", "31-12-2030"] {
            let mut input = ScriptedInput::new(&[s]);
            let mut validator = InputValidator::new(&mut input, 5);
            let date = validator.get_date("Date: ", false).unwrap();
            assert_eq!(format_date(date), s);
        }
    }

    #[test]
    fn test_get_date_default_is_today() {
        let mut input = ScriptedInput::new(&[""]);
        let mut validator = InputValidator::new(&mut input, 5);
        assert_eq!(validator.get_date("Date: ", true).unwrap(), today());
    }

    #[test]
    fn test_get_date_empty_without_default_reprompts() {
        let mut input = ScriptedInput::new(&["", "2024-01-31", "31-04-2024", "29-02-2023", "05-06-2024"]);
        let mut validator = InputValidator::new(&mut input, 5);
        let date = validator.get_date("Date: ", false).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        assert_eq!(input.prompts_shown(), 5);
    }

    #[test]
    fn test_get_amount_never_returns_non_positive() {
        let mut input = ScriptedInput::new(&["0", "-12.5", "abc", "NaN", "42.75"]);
        let mut validator = InputValidator::new(&mut input, 5);
        assert_eq!(validator.get_amount().unwrap(), 42.75);
    }

    #[test]
    fn test_get_amount_gives_up_after_max_attempts() {
        let mut input = ScriptedInput::new(&["-1", "0", "-0", "100"]);
        let mut validator = InputValidator::new(&mut input, 3);
        assert_eq!(validator.get_amount(), Err(InputError::TooManyAttempts(3)));
        assert_eq!(input.prompts_shown(), 3);
    }

    #[test]
    fn test_get_category_codes() {
        for (code, expected) in [("i", Category::Income), ("I", Category::Income), ("e", Category::Expense), ("E", Category::Expense)] {
            let mut input = ScriptedInput::new(&[code]);
            let mut validator = InputValidator::new(&mut input, 5);
            assert_eq!(validator.get_category().unwrap(), expected);
        }
    }

    #[test]
    fn test_get_category_rejects_other_input() {
        for s in ["Income", "expense", "x", "", "IE"] {
            assert_eq!(parse_category_code(s), Err(InputError::InvalidCategory(s.to_string())));
        }

        let mut input = ScriptedInput::new(&["income", "x", "e"]);
        let mut validator = InputValidator::new(&mut input, 5);
        assert_eq!(validator.get_category().unwrap(), Category::Expense);
    }

    #[test]
    fn test_description_passthrough() {
        let mut input = ScriptedInput::new(&["", "  rent, March  "]);
        let mut validator = InputValidator::new(&mut input, 5);
        assert_eq!(validator.get_description().unwrap(), "");
        assert_eq!(validator.get_description().unwrap(), "  rent, March  ");
    }

    #[test]
    fn test_get_date_rejects_short_years() {
        for s in ["01-01-24", "01-01-0", "01-01-+2024"] {
            assert_eq!(parse_date(s), Err(InputError::InvalidDate(s.to_string())));
        }

        let mut input = ScriptedInput::new(&["01-01-24", "01-01-0", "01-01-+2024", "01-01-2024"]);
        let mut validator = InputValidator::new(&mut input, 5);
        let date = validator.get_date("Date: ", false).unwrap();
        assert_eq!(format_date(date), "01-01-2024");
        assert_eq!(input.prompts_shown(), 4);
    }

    #[test]
    fn test_end_of_input_stops_prompting() {
        let mut input = ScriptedInput::new(&["not a date"]);
        let mut validator = InputValidator::new(&mut input, 5);
        assert_eq!(validator.get_date("Date: ", false), Err(InputError::Closed));
    }

    #[test]
    fn test_zero_max_attempts_still_asks_once() {
        let mut input = ScriptedInput::new(&["7"]);
        let mut validator = InputValidator::new(&mut input, 0);
        assert_eq!(validator.get_amount().unwrap(), 7.0);
    }
}
