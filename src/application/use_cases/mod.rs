pub mod in_memory_csv;
pub mod mapped_csv;
pub mod ordered_csv;
pub mod reflective_mapper;

pub use in_memory_csv::{AcceptAll, ConsistentWidth, InMemoryCsv, RecordValidator};
pub use mapped_csv::{BindMapper, MappedCsv};
pub use ordered_csv::OrderedCsv;
pub use reflective_mapper::{CsvTarget, ReflectiveMapper, ReflectiveMapperBuilder};
