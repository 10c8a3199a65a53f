// ============================================================
// CSV RECORD
// ============================================================
// One parsed row: raw values keyed by header name or position

use std::collections::HashMap;
use std::sync::Arc;

use super::Column;
use crate::domain::error::{CsvError, Result};

/// A single immutable csv row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    /// Data row index (0-based, header excluded)
    position: usize,

    /// Header shared by every record of the same source
    headers: Option<Arc<[String]>>,

    /// Raw field values in column order
    values: Vec<String>,
}

impl CsvRecord {
    /// Create a headerless record, addressable by position only
    pub fn new(values: Vec<String>) -> Self {
        Self {
            position: 0,
            headers: None,
            values,
        }
    }

    /// Create a record that shares a header with its siblings
    pub fn with_headers(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self {
            position: 0,
            headers: Some(headers),
            values,
        }
    }

    /// Build a headed record from `(name, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (headers, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::with_headers(headers.into(), values)
    }

    /// Set the row position reported in errors
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    pub fn has_headers(&self) -> bool {
        self.headers.as_ref().is_some_and(|h| !h.is_empty())
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the row has exactly as many values as its header has names.
    /// Headerless records are always consistent.
    pub fn is_consistent(&self) -> bool {
        match &self.headers {
            Some(headers) => headers.len() == self.values.len(),
            None => true,
        }
    }

    /// Look up a raw value. An absent column is an error, never an empty string.
    pub fn get(&self, column: impl Into<Column>) -> Result<&str> {
        let column = column.into();
        let index = match &column {
            Column::Index(index) => Some(*index),
            Column::Name(name) => self
                .headers
                .as_ref()
                .and_then(|headers| headers.iter().position(|h| h == name)),
        };

        index
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
            .ok_or_else(|| CsvError::ColumnNotFound {
                column: column.to_string(),
                position: self.position,
            })
    }

    /// Named `(column, value)` pairs in column order.
    /// Empty for headerless records; a short row yields only the columns it has.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .flat_map(|headers| headers.iter())
            .zip(self.values.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Owned copy of the named columns
    pub fn to_map(&self) -> HashMap<String, String> {
        self.fields()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}
