
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use csv::StringRecord;
use log::{debug, info};
use crate::transaction::{Category, Transaction, format_date, parse_date_str};

/// Header row of the data file, in write order
pub(crate) const COLUMNS: [&str; 4] = ["date", "amount", "category", "description"];

#[derive(Debug)]
pub(crate) enum StoreError {
    Io(io::Error),
    Csv(csv::Error),
    /// The header row lacks one of [`COLUMNS`]
    MissingColumn(&'static str),
    /// A data row could not be parsed. `line` is 1-based and counts the header.
    InvalidRow { line: u64, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "data file error: {e}"),
            StoreError::Csv(e) => write!(f, "data file error: {e}"),
            StoreError::MissingColumn(c) => write!(f, "data file error: unable to locate '{c}' column"),
            StoreError::InvalidRow { line, reason } => write!(f, "data file error: line {line}: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e)
    }
}

struct CsvHeaderIndex {
    date: usize,
    amount: usize,
    category: usize,
    description: usize,
}

/// Append-only CSV table of transactions.
/// There is no locking, two processes appending at the same time may interleave rows.
pub(crate) struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> RecordStore {
        RecordStore { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Write the header row if the file does not exist yet or is empty.
    /// Returns whether a header was written. Existing content is never touched.
    pub(crate) fn initialize_csv(&self) -> Result<bool, StoreError> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(metadata) => metadata.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };
        if !needs_header {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        writer.flush()?;
        info!("Created data file {}", self.path.display());
        Ok(true)
    }

    /// Append one row. No duplicate detection.
    pub(crate) fn add_entry(&self, date: NaiveDate, amount: f64, category: Category, description: &str) -> Result<(), StoreError> {
        self.initialize_csv()?;

        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        // A hand edited file may lack the trailing newline, don't glue our row onto its last line.
        if file.seek(SeekFrom::End(0))? > 0 {
            file.seek(SeekFrom::End(-1))?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record([
            format_date(date),
            amount.to_string(),
            category.as_str().to_string(),
            description.to_string(),
        ])?;
        writer.flush()?;
        debug!("Appended {category} {amount} on {} to {}", format_date(date), self.path.display());
        Ok(())
    }

    pub(crate) fn add(&self, t: &Transaction) -> Result<(), StoreError> {
        self.add_entry(t.date, t.amount, t.category, &t.description)
    }

    /// Read and validate every row, in file order
    pub(crate) fn load_all(&self) -> Result<Vec<Transaction>, StoreError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(&self.path)?;
        let header_index = parse_header_index(rdr.headers()?)?;

        let mut transactions = vec![];
        for record in rdr.records() {
            let row = record?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            transactions.push(parse_row(&row, &header_index, line)?);
        }

        debug!("Loaded {} transactions from {}", transactions.len(), self.path.display());
        Ok(transactions)
    }

    /// All transactions dated within `[start_date, end_date]`, both ends inclusive.
    pub(crate) fn get_transactions(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Vec<Transaction>, StoreError> {
        let range = start_date..=end_date;
        Ok(self.load_all()?.into_iter().filter(|t| range.contains(&t.date)).collect())
    }
}

fn parse_header_index(headers: &StringRecord) -> Result<CsvHeaderIndex, StoreError> {
    let find = |name: &'static str| {
        headers.iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or(StoreError::MissingColumn(name))
    };

    Ok(CsvHeaderIndex {
        date: find("date")?,
        amount: find("amount")?,
        category: find("category")?,
        description: find("description")?,
    })
}

fn parse_row(row: &StringRecord, index: &CsvHeaderIndex, line: u64) -> Result<Transaction, StoreError> {
    let invalid = |reason: String| StoreError::InvalidRow { line, reason };

    let date_str = row.get(index.date).unwrap_or("").trim();
    let date = parse_date_str(date_str)
        .ok_or_else(|| invalid(format!("date '{date_str}' is not in dd-mm-yyyy format")))?;

    let amount_str = row.get(index.amount).unwrap_or("").trim();
    let amount = amount_str.parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| invalid(format!("amount '{amount_str}' is not a positive number")))?;

    let category_str = row.get(index.category).unwrap_or("").trim();
    let category = category_str.parse::<Category>().map_err(invalid)?;

    let description = row.get(index.description).unwrap_or("");

    Ok(Transaction::new(date, amount, category, description))
}
