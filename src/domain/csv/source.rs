// ============================================================
// CSV SOURCES
// ============================================================
// Row providers and the mapped-collection capability

use super::{CsvRecord, IdentityMapper, RecordMapper};
use crate::domain::error::Result;

/// Something that yields csv records in row order
pub trait RecordSource {
    /// Feed every record to `sink` in row order, stopping at the first error.
    /// Any resource opened for the pass is released before returning.
    fn for_each_record(&self, sink: &mut dyn FnMut(CsvRecord) -> Result<()>) -> Result<()>;

    /// Map every record; the first failure aborts the whole batch
    fn map<T, M>(&self, mapper: &M) -> Result<Vec<T>>
    where
        M: RecordMapper<T> + ?Sized,
        Self: Sized,
    {
        let mut mapped = Vec::new();
        self.for_each_record(&mut |record| {
            mapped.push(mapper.map(&record)?);
            Ok(())
        })?;
        Ok(mapped)
    }

    /// All records, unmapped
    fn records(&self) -> Result<Vec<CsvRecord>>
    where
        Self: Sized,
    {
        self.map(&IdentityMapper)
    }
}

/// A fully materialized, ordered collection of mapped rows
pub trait Csv<T> {
    fn map(&self) -> Result<Vec<T>>;
}

impl<T, C> Csv<T> for &C
where
    C: Csv<T> + ?Sized,
{
    fn map(&self) -> Result<Vec<T>> {
        (**self).map()
    }
}

impl<T, C> Csv<T> for Box<C>
where
    C: Csv<T> + ?Sized,
{
    fn map(&self) -> Result<Vec<T>> {
        (**self).map()
    }
}
