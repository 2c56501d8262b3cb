//! Timestamped CSV report files

use crate::error::Result;
use crate::models::report::ReportTable;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// File name for a report generated at the given time:
/// `Report - <yyyy-mm-dd HH-MM>.csv`
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("Report - {}.csv", at.format("%Y-%m-%d %H-%M"))
}

/// Writes report tables into a fixed output directory
#[derive(Debug, Clone)]
pub struct CsvWriter {
    output_dir: PathBuf,
}

impl CsvWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Serialize the table and write it under the output directory,
    /// timestamped with the current local time. Returns the written path.
    pub fn write(&self, table: &ReportTable) -> Result<PathBuf> {
        self.write_at(table, Local::now())
    }

    /// Write with an explicit timestamp; split out for testability
    pub fn write_at(&self, table: &ReportTable, at: DateTime<Local>) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(report_file_name(at));
        fs::write(&path, table.to_csv())?;

        Ok(path)
    }
}
