pub mod use_cases;

pub use use_cases::{
    AcceptAll, BindMapper, ConsistentWidth, CsvTarget, InMemoryCsv, MappedCsv, OrderedCsv,
    RecordValidator, ReflectiveMapper, ReflectiveMapperBuilder,
};
