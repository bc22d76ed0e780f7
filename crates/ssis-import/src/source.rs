//! Header-driven import sources
//!
//! Columns are matched by name, so their order in the source does not
//! matter and extra columns are ignored.

use crate::error::{ImportError, ImportResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One source row: column name → raw value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    values: HashMap<String, String>,
}

impl ImportRow {
    /// Empty row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a column value
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Trimmed value of `column`; missing columns read as empty
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map_or("", |value| value.trim())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ImportRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Rows read from a CSV source with a header line
#[derive(Debug)]
pub struct ImportSource<R> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    row: usize,
}

impl ImportSource<File> {
    /// Open a CSV file
    ///
    /// # Errors
    /// [`ImportError::Io`] if the file cannot be opened, or
    /// [`ImportError::Malformed`] if its header cannot be read.
    pub fn open(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ImportError::io_error(path, e))?;
        Self::from_reader(file)
    }
}

impl<R: Read> ImportSource<R> {
    /// Read CSV from any reader
    ///
    /// # Errors
    /// [`ImportError::Malformed`] if the header line cannot be read.
    pub fn from_reader(reader: R) -> ImportResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|source| ImportError::Malformed { row: 0, source })?
            .iter()
            .map(str::to_string)
            .collect();
        Ok(Self {
            reader,
            headers,
            row: 0,
        })
    }

    /// Column names from the header line
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for ImportSource<R> {
    type Item = ImportResult<ImportRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = csv::StringRecord::new();
        self.row += 1;
        match self.reader.read_record(&mut record) {
            Ok(false) => None,
            Ok(true) => Some(Ok(self
                .headers
                .iter()
                .zip(record.iter())
                .map(|(column, value)| (column.as_str(), value))
                .collect())),
            Err(source) => Some(Err(ImportError::Malformed {
                row: self.row,
                source,
            })),
        }
    }
}
