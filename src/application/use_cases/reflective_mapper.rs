// ============================================================
// REFLECTIVE MAPPER
// ============================================================
// Populate a fresh output value by matching normalized column
// names against a setter table registered once per type

use std::collections::HashMap;
use std::fmt;

use crate::domain::csv::{normalize_name, normalize_setter_name, CsvRecord, RecordMapper};
use crate::domain::error::{CsvError, Result};

type Constructor<T> = Box<dyn Fn() -> std::result::Result<T, String> + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, &str) -> std::result::Result<(), String> + Send + Sync>;

/// A type that can be filled from a headed csv record
///
/// ```ignore
/// impl CsvTarget for Person {
///     fn construct() -> Result<Self, String> {
///         Ok(Person::default())
///     }
///
///     fn setters(builder: ReflectiveMapperBuilder<Self>) -> ReflectiveMapperBuilder<Self> {
///         builder
///             .setter("setFirstName", |p, v| p.first_name = v.to_string())
///             .try_setter("age", |p, v| v.parse().map(|age| p.age = age))
///     }
/// }
/// ```
pub trait CsvTarget: Sized + 'static {
    /// Zero-argument construction of an empty instance
    fn construct() -> std::result::Result<Self, String>;

    /// Register one setter per consumable column
    fn setters(builder: ReflectiveMapperBuilder<Self>) -> ReflectiveMapperBuilder<Self>;
}

/// Collects the constructor and setters of `T`
pub struct ReflectiveMapperBuilder<T> {
    constructor: Constructor<T>,
    setters: Vec<(String, Setter<T>)>,
}

impl<T: 'static> ReflectiveMapperBuilder<T> {
    /// Register an infallible setter under its declared name
    pub fn setter<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut T, &str) + Send + Sync + 'static,
    {
        self.push(
            name.into(),
            Box::new(move |target, value| {
                f(target, value);
                Ok(())
            }),
        )
    }

    /// Register a setter that may reject the raw value
    pub fn try_setter<F, E>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut T, &str) -> std::result::Result<(), E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.push(
            name.into(),
            Box::new(move |target, value| f(target, value).map_err(|e| e.to_string())),
        )
    }

    fn push(mut self, name: String, setter: Setter<T>) -> Self {
        self.setters.push((name, setter));
        self
    }

    /// Resolve the setter table. Two setters sharing a normalized name
    /// are rejected here instead of per record.
    pub fn build(self) -> Result<ReflectiveMapper<T>> {
        let target = std::any::type_name::<T>();
        let mut index: HashMap<String, usize> = HashMap::with_capacity(self.setters.len());
        let mut names = Vec::with_capacity(self.setters.len());
        let mut setters = Vec::with_capacity(self.setters.len());

        for (name, setter) in self.setters {
            let key = normalize_setter_name(&name);
            if let Some(&existing) = index.get(&key) {
                let first: &String = &names[existing];
                return Err(CsvError::AmbiguousMutator {
                    key,
                    first: first.clone(),
                    second: name,
                    target,
                });
            }
            index.insert(key, setters.len());
            names.push(name);
            setters.push(setter);
        }

        Ok(ReflectiveMapper {
            target,
            constructor: self.constructor,
            index,
            names,
            setters,
        })
    }
}

/// Maps headed records onto `T` through its registered setters
pub struct ReflectiveMapper<T> {
    target: &'static str,
    constructor: Constructor<T>,
    /// normalized setter name -> slot in `setters`
    index: HashMap<String, usize>,
    names: Vec<String>,
    setters: Vec<Setter<T>>,
}

impl<T: Default + 'static> ReflectiveMapper<T> {
    /// Builder constructing `T` through `Default`
    pub fn builder() -> ReflectiveMapperBuilder<T> {
        Self::builder_with(|| Ok(T::default()))
    }
}

impl<T: 'static> ReflectiveMapper<T> {
    /// Builder with a fallible zero-argument constructor
    pub fn builder_with<F>(constructor: F) -> ReflectiveMapperBuilder<T>
    where
        F: Fn() -> std::result::Result<T, String> + Send + Sync + 'static,
    {
        ReflectiveMapperBuilder {
            constructor: Box::new(constructor),
            setters: Vec::new(),
        }
    }

    /// Declared setter names, in registration order
    pub fn setter_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    fn resolve(&self, column: &str) -> Result<&Setter<T>> {
        self.index
            .get(&normalize_name(column))
            .map(|&slot| &self.setters[slot])
            .ok_or_else(|| CsvError::NoMutatorFound {
                column: column.to_string(),
                target: self.target,
            })
    }
}

impl<T: CsvTarget> ReflectiveMapper<T> {
    /// Mapper described by the [`CsvTarget`] impl of `T`
    pub fn for_target() -> Result<Self> {
        T::setters(Self::builder_with(T::construct)).build()
    }
}

impl<T: 'static> RecordMapper<T> for ReflectiveMapper<T> {
    fn map(&self, record: &CsvRecord) -> Result<T> {
        if !record.has_headers() || record.is_empty() {
            return Err(CsvError::HeaderlessMapping {
                target: self.target,
            });
        }

        // Every column must be consumable before anything is constructed
        let plan = record
            .fields()
            .map(|(column, value)| -> Result<_> { Ok((column, value, self.resolve(column)?)) })
            .collect::<Result<Vec<_>>>()?;

        let mut output = (self.constructor)().map_err(|reason| CsvError::Construction {
            target: self.target,
            reason,
        })?;

        for (column, value, setter) in plan {
            setter(&mut output, value).map_err(|reason| CsvError::MutatorFailed {
                column: column.to_string(),
                target: self.target,
                reason,
            })?;
        }

        Ok(output)
    }
}

impl<T> fmt::Debug for ReflectiveMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectiveMapper")
            .field("target", &self.target)
            .field("setters", &self.names)
            .finish()
    }
}
