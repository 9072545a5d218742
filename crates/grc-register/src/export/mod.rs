//! Register export formats.

pub mod csv;

pub use self::csv::{export_filename, CsvExporter};

/// A rendered export ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}
