use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::Transaction;

/// Possible errors to occur while loading transactions
///
/// Loading is all or nothing: any of these means no transaction is available.
#[derive(Debug, thiserror::Error)]
pub enum DataFetchError {
    #[error("Failed to read transactions: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse transactions: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse transactions: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid response format")]
    InvalidFormat,
    #[error("Invalid transaction record at index {index}: {source}")]
    Record {
        index: usize,
        source: serde_json::Error,
    },
}

/// A supplier of the transaction list
///
/// A fetch is a single attempt, without retries.
pub trait TransactionSource {
    fn fetch(&self) -> Result<Vec<Transaction>, DataFetchError>;
}

/// Reads transactions from a JSON array payload
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Transaction>, DataFetchError> {
    let payload: serde_json::Value = serde_json::from_reader(reader)?;
    let records = match payload {
        serde_json::Value::Array(records) => records,
        _ => return Err(DataFetchError::InvalidFormat),
    };

    let transactions = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record)
                .map_err(|source| DataFetchError::Record { index, source })
        })
        .collect::<Result<Vec<Transaction>, _>>()?;

    log::debug!("Parsed a total of {} transactions", transactions.len());
    Ok(transactions)
}

/// Reads transactions from CSV with a `transactionId,customerId,date,amount` header
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Transaction>, DataFetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let transactions = reader
        .deserialize()
        .collect::<Result<Vec<Transaction>, _>>()?;

    log::debug!("Parsed a total of {} transactions", transactions.len());
    Ok(transactions)
}

/// The payload format of a transaction file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    /// Guesses the format from the file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceFormat::Csv,
            _ => SourceFormat::Json,
        }
    }

    fn read<R: Read>(self, reader: R) -> Result<Vec<Transaction>, DataFetchError> {
        match self {
            SourceFormat::Json => read_json(reader),
            SourceFormat::Csv => read_csv(reader),
        }
    }
}

/// Transactions stored in a file, or `-` for stdin
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
    format: SourceFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SourceFormat::from_path(&path);
        Self { path, format }
    }

    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

impl TransactionSource for FileSource {
    fn fetch(&self) -> Result<Vec<Transaction>, DataFetchError> {
        log::debug!("Loading {:?} transactions from {}", self.format, self.path.display());

        if self.path == Path::new("-") {
            return self.format.read(std::io::stdin().lock());
        }

        let file = File::open(&self.path)?;
        self.format.read(BufReader::new(file))
    }
}
