// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV tokenizing, encoding handling, and file-backed sources

mod csv_parser;
mod file_csv;

pub use csv_parser::{CsvParser, MEMORY_ORIGIN};
pub use file_csv::FileCsv;
