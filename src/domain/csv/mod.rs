// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and contracts for mapping csv records
// No I/O, no async

mod column;
mod csv_format;
mod csv_record;
mod record_mapper;
mod source;

pub use column::{normalize_name, normalize_setter_name, Column};
pub use csv_format::CsvFormat;
pub use csv_record::CsvRecord;
pub use record_mapper::{from_fn, FnMapper, IdentityMapper, RecordMapper};
pub use source::{Csv, RecordSource};
