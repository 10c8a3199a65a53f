// ============================================================
// RECORD MAPPER
// ============================================================
// Strategy turning one csv record into one output value

use super::CsvRecord;
use crate::domain::error::Result;

/// Maps a csv record to an instance of `T`
pub trait RecordMapper<T> {
    fn map(&self, record: &CsvRecord) -> Result<T>;
}

impl<T, M> RecordMapper<T> for &M
where
    M: RecordMapper<T> + ?Sized,
{
    fn map(&self, record: &CsvRecord) -> Result<T> {
        (**self).map(record)
    }
}

impl<T, M> RecordMapper<T> for Box<M>
where
    M: RecordMapper<T> + ?Sized,
{
    fn map(&self, record: &CsvRecord) -> Result<T> {
        (**self).map(record)
    }
}

/// Mapper backed by a caller supplied function
pub struct FnMapper<F> {
    f: F,
}

impl<F> FnMapper<F> {
    pub fn new<T>(f: F) -> Self
    where
        F: Fn(&CsvRecord) -> Result<T>,
    {
        Self { f }
    }
}

impl<T, F> RecordMapper<T> for FnMapper<F>
where
    F: Fn(&CsvRecord) -> Result<T>,
{
    fn map(&self, record: &CsvRecord) -> Result<T> {
        (self.f)(record)
    }
}

/// Shorthand for [`FnMapper::new`]
pub fn from_fn<T, F>(f: F) -> FnMapper<F>
where
    F: Fn(&CsvRecord) -> Result<T>,
{
    FnMapper::new(f)
}

/// Hands back the record itself
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl RecordMapper<CsvRecord> for IdentityMapper {
    fn map(&self, record: &CsvRecord) -> Result<CsvRecord> {
        Ok(record.clone())
    }
}
