// file: src/exporter/xlsx.rs
// description: spreadsheet file export via rust_xlsxwriter
// reference: https://docs.rs/rust_xlsxwriter

use crate::error::Result;
use crate::exporter::table::{HEADER, ResultTable};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct XlsxExporter {
    path: PathBuf,
}

impl XlsxExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the table as one worksheet with a bold header row, overwriting
    /// any existing file at the target path.
    pub fn write(&self, table: &ResultTable) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold();
        for (col, name) in HEADER.iter().enumerate() {
            worksheet.write_with_format(0, col as u16, *name, &header_format)?;
        }

        for (row, pair) in table.rows().iter().enumerate() {
            let row = (row + 1) as u32;
            worksheet.write(row, 0, pair.question.as_str())?;
            worksheet.write(row, 1, pair.answer.as_str())?;
        }

        workbook.save(&self.path)?;

        info!(
            "Wrote {} rows to spreadsheet {}",
            table.len(),
            self.path.display()
        );
        Ok(())
    }
}
