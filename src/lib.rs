//! Map delimited text records onto typed values.
//!
//! A [`RecordSource`] yields [`CsvRecord`]s, a [`RecordMapper`] turns each one
//! into an output value, and [`OrderedCsv`] can re-sort the mapped rows.
//!
//! ```no_run
//! use csvmapper::{Csv, CsvTarget, MappedCsv, OrderedCsv, ReflectiveMapper, ReflectiveMapperBuilder};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: String,
//!     y: String,
//! }
//!
//! impl CsvTarget for Point {
//!     fn construct() -> Result<Self, String> {
//!         Ok(Point::default())
//!     }
//!
//!     fn setters(builder: ReflectiveMapperBuilder<Self>) -> ReflectiveMapperBuilder<Self> {
//!         builder
//!             .setter("setX", |p, v| p.x = v.to_string())
//!             .setter("setY", |p, v| p.y = v.to_string())
//!     }
//! }
//!
//! # fn main() -> csvmapper::Result<()> {
//! let points = MappedCsv::<_, ReflectiveMapper<Point>>::from_file("points.csv")?;
//! let ordered = OrderedCsv::by_key(points, |p: &Point| p.x.clone());
//! for point in ordered.map()? {
//!     println!("{} {}", point.x, point.y);
//! }
//! # Ok(())
//! # }
//! ```

mod application;
mod domain;
mod infrastructure;
mod shared;

pub use application::{
    AcceptAll, BindMapper, ConsistentWidth, CsvTarget, InMemoryCsv, MappedCsv, OrderedCsv,
    RecordValidator, ReflectiveMapper, ReflectiveMapperBuilder,
};
pub use domain::csv::{
    from_fn, normalize_name, normalize_setter_name, Column, Csv, CsvFormat, CsvRecord, FnMapper,
    IdentityMapper, RecordMapper, RecordSource,
};
pub use domain::error::{CsvError, Result};
pub use infrastructure::config::{FormatLoader, ENV_PREFIX};
pub use infrastructure::csv::{CsvParser, FileCsv, MEMORY_ORIGIN};
pub use shared::logging::{init_test_tracing, init_tracing};
