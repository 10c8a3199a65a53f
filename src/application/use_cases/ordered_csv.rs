// ============================================================
// ORDERED CSV
// ============================================================
// Decorator re-sorting the mapped rows of another csv

use std::cmp::Ordering;

use crate::domain::csv::Csv;
use crate::domain::error::Result;

/// Sorts what `inner` produces. The sort is stable: rows comparing equal
/// keep their original relative order.
#[derive(Debug, Clone)]
pub struct OrderedCsv<C, F> {
    inner: C,
    compare: F,
}

impl<C, F> OrderedCsv<C, F> {
    pub fn new<T>(inner: C, compare: F) -> Self
    where
        C: Csv<T>,
        F: Fn(&T, &T) -> Ordering,
    {
        Self { inner, compare }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> OrderedCsv<C, ()> {
    /// Order by a key extracted from each row
    pub fn by_key<T, K, G>(inner: C, key: G) -> OrderedCsv<C, impl Fn(&T, &T) -> Ordering>
    where
        C: Csv<T>,
        K: Ord,
        G: Fn(&T) -> K,
    {
        OrderedCsv::new(inner, move |a: &T, b: &T| key(a).cmp(&key(b)))
    }
}

impl<T, C, F> Csv<T> for OrderedCsv<C, F>
where
    C: Csv<T>,
    F: Fn(&T, &T) -> Ordering,
{
    fn map(&self) -> Result<Vec<T>> {
        let mut rows = self.inner.map()?;
        rows.sort_by(&self.compare);
        Ok(rows)
    }
}
