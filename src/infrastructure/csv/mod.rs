// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Header inspection and row-to-page mapping

mod csv_parser;

pub use csv_parser::{CsvPages, CsvParser};
