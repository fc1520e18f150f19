use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use crate::error::{ClassifierError, Result};
use crate::types::Record;

/// One data record from a CSV source, addressable by header name
#[derive(Debug, Clone)]
pub struct CsvRecord {
    headers: Arc<StringRecord>,
    values: StringRecord,
}

impl Record for CsvRecord {
    fn field(&self, name: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h == name)?;
        self.values.get(index)
    }
}

/// Comma-separated, double-quoted rows with a header line.
///
/// The header is consumed when the source is opened. Structural problems
/// (ragged rows, invalid UTF-8) surface as `MalformedRow` items.
pub struct CsvRowSource<R: Read> {
    headers: Arc<StringRecord>,
    records: StringRecordsIntoIter<R>,
    record: usize,
}

impl CsvRowSource<File> {
    /// Open a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open '{}': {}", path.display(), e),
            )
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvRowSource<R> {
    /// Read CSV rows from any reader
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .has_headers(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| malformed(0, &e))?
            .clone();

        Ok(Self {
            headers: Arc::new(headers),
            records: reader.into_records(),
            record: 0,
        })
    }

    /// Column names from the header line
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }
}

impl<R: Read> Iterator for CsvRowSource<R> {
    type Item = Result<CsvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.records.next()?;
        self.record += 1;
        Some(
            next.map(|values| CsvRecord {
                headers: Arc::clone(&self.headers),
                values,
            })
            .map_err(|e| malformed(self.record, &e)),
        )
    }
}

fn malformed(record: usize, err: &csv::Error) -> ClassifierError {
    ClassifierError::MalformedRow {
        record,
        message: err.to_string(),
    }
}
