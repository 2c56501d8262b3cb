//! Output formatting: CSV report files and console reporting

pub mod console;
pub mod csv;

pub use console::ConsoleReporter;
pub use csv::{report_file_name, CsvWriter};
