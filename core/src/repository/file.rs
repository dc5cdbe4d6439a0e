use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::Result;
use crate::repository::traits::{Row, RowSource};

/// Delimited file with a header row, read in one go.
#[derive(Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    label: String,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

impl RowSource for CsvFileSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn read_rows(&self) -> Result<Vec<Row>> {
        let file = File::open(&self.path)?;
        let rows = read_csv(BufReader::new(file))?;
        debug!(source = %self.label, rows = rows.len(), "read csv file");
        Ok(rows)
    }
}

/// CSV content already held in memory.
#[derive(Clone)]
pub struct CsvTextSource {
    label: String,
    text: String,
}

impl CsvTextSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl RowSource for CsvTextSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn read_rows(&self) -> Result<Vec<Row>> {
        read_csv(self.text.as_bytes())
    }
}

fn read_csv<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        let fields = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(Row { line, fields });
    }
    Ok(rows)
}
