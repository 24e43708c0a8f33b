// file: src/exporter/table.rs
// description: two-column result table and its CSV byte-stream encoding
// reference: https://docs.rs/csv

use crate::error::{PipelineError, Result};
use crate::models::QaPair;

pub const HEADER: [&str; 2] = ["question", "answer"];

/// Fixed name and MIME type the CSV stream is offered under.
pub const CSV_FILE_NAME: &str = "reddit_qa.csv";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Snapshot of the accumulated Q&A collection. Row order is append order;
/// both serializations derive from the same snapshot.
#[derive(Debug, Clone)]
pub struct ResultTable {
    rows: Vec<QaPair>,
}

impl ResultTable {
    pub fn from_pairs(rows: Vec<QaPair>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[QaPair] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// UTF-8 CSV encoding of the table: one header record, one record per
    /// row. In-memory only; nothing is persisted here.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(HEADER)?;
        for row in &self.rows {
            writer.write_record([row.question.as_str(), row.answer.as_str()])?;
        }

        writer
            .into_inner()
            .map_err(|e| PipelineError::Io(e.into_error()))
    }
}
