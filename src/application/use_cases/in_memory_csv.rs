// ============================================================
// IN-MEMORY CSV SOURCE
// ============================================================
// Pre-parsed records, checked by a validation hook before mapping

use crate::domain::csv::{CsvFormat, CsvRecord, RecordSource};
use crate::domain::error::{CsvError, Result};
use crate::infrastructure::csv::CsvParser;

/// Per-record check run before a record reaches the mapper
pub trait RecordValidator {
    fn validate(&self, record: &CsvRecord) -> Result<()>;
}

/// Lets every record through
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl RecordValidator for AcceptAll {
    fn validate(&self, _record: &CsvRecord) -> Result<()> {
        Ok(())
    }
}

/// Rejects headed records whose width differs from their header
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsistentWidth;

impl RecordValidator for ConsistentWidth {
    fn validate(&self, record: &CsvRecord) -> Result<()> {
        if record.is_consistent() {
            return Ok(());
        }
        Err(CsvError::FieldCountMismatch {
            position: record.position(),
            expected: record.headers().map_or(0, |headers| headers.len()),
            found: record.len(),
        })
    }
}

/// Records already held in memory; every pass replays the same rows
#[derive(Debug, Clone)]
pub struct InMemoryCsv<V = AcceptAll> {
    records: Vec<CsvRecord>,
    validator: V,
}

impl InMemoryCsv<AcceptAll> {
    pub fn new(records: Vec<CsvRecord>) -> Self {
        Self::with_validator(records, AcceptAll)
    }

    /// Tokenize `content` up front with the given format
    pub fn parse_str(content: &str, format: &CsvFormat) -> Result<Self> {
        let records = CsvParser::with_format(format.clone()).parse_content(content)?;
        Ok(Self::new(records))
    }
}

impl<V: RecordValidator> InMemoryCsv<V> {
    pub fn with_validator(records: Vec<CsvRecord>, validator: V) -> Self {
        Self { records, validator }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<V: RecordValidator> RecordSource for InMemoryCsv<V> {
    fn for_each_record(&self, sink: &mut dyn FnMut(CsvRecord) -> Result<()>) -> Result<()> {
        for record in &self.records {
            self.validator.validate(record)?;
            sink(record.clone())?;
        }
        Ok(())
    }
}

impl FromIterator<CsvRecord> for InMemoryCsv<AcceptAll> {
    fn from_iter<I: IntoIterator<Item = CsvRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
