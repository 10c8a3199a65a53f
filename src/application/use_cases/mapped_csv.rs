// ============================================================
// MAPPED CSV
// ============================================================
// A record source bound to the mapper that turns its rows into T

use std::path::PathBuf;

use super::reflective_mapper::{CsvTarget, ReflectiveMapper};
use crate::domain::csv::{Csv, CsvFormat, RecordMapper, RecordSource};
use crate::domain::error::Result;
use crate::infrastructure::csv::FileCsv;

#[derive(Debug, Clone)]
pub struct MappedCsv<S, M> {
    source: S,
    mapper: M,
}

impl<S, M> MappedCsv<S, M> {
    pub fn new(source: S, mapper: M) -> Self {
        Self { source, mapper }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn into_parts(self) -> (S, M) {
        (self.source, self.mapper)
    }
}

impl<T: CsvTarget> MappedCsv<FileCsv, ReflectiveMapper<T>> {
    /// Comma separated file with a header row, mapped onto `T` by column name
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(FileCsv::new(path), ReflectiveMapper::for_target()?))
    }
}

impl<M> MappedCsv<FileCsv, M> {
    pub fn from_file_with(path: impl Into<PathBuf>, mapper: M, format: CsvFormat) -> Self {
        Self::new(FileCsv::with_format(path, format), mapper)
    }
}

impl<T, S, M> Csv<T> for MappedCsv<S, M>
where
    S: RecordSource,
    M: RecordMapper<T>,
{
    fn map(&self) -> Result<Vec<T>> {
        RecordSource::map(&self.source, &self.mapper)
    }
}

/// Bind a mapper to any record source
pub trait BindMapper: RecordSource + Sized {
    fn bind<M>(self, mapper: M) -> MappedCsv<Self, M> {
        MappedCsv::new(self, mapper)
    }
}

impl<S: RecordSource> BindMapper for S {}
