use std::fmt;
use std::path::PathBuf;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug)]
pub enum CsvError {
    FileNotFound {
        path: PathBuf,
    },
    CsvRead {
        path: PathBuf,
        source: BoxError,
    },
    HeaderlessMapping {
        target: &'static str,
    },
    NoMutatorFound {
        column: String,
        target: &'static str,
    },
    AmbiguousMutator {
        key: String,
        first: String,
        second: String,
        target: &'static str,
    },
    MutatorFailed {
        column: String,
        target: &'static str,
        reason: String,
    },
    Construction {
        target: &'static str,
        reason: String,
    },
    ColumnNotFound {
        column: String,
        position: usize,
    },
    FieldCountMismatch {
        position: usize,
        expected: usize,
        found: usize,
    },
    InvalidFormat(String),
    Config(String),
}

impl CsvError {
    /// Wrap a low-level read failure together with the file it came from.
    pub fn read<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        CsvError::CsvRead {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::FileNotFound { path } => {
                write!(f, "File {} not found", path.display())
            }
            CsvError::CsvRead { path, source } => {
                write!(f, "Failed to read CSV file {}: {}", path.display(), source)
            }
            CsvError::HeaderlessMapping { target } => write!(
                f,
                "Cannot map a headerless csv record to {} by column name",
                target
            ),
            CsvError::NoMutatorFound { column, target } => write!(
                f,
                "No setter found for csv column '{}' in {}",
                column, target
            ),
            CsvError::AmbiguousMutator {
                key,
                first,
                second,
                target,
            } => write!(
                f,
                "Setters '{}' and '{}' of {} both resolve to column key '{}'",
                first, second, target, key
            ),
            CsvError::MutatorFailed {
                column,
                target,
                reason,
            } => write!(
                f,
                "Could not set column '{}' on {}: {}",
                column, target, reason
            ),
            CsvError::Construction { target, reason } => {
                write!(f, "Could not construct an empty {}: {}", target, reason)
            }
            CsvError::ColumnNotFound { column, position } => write!(
                f,
                "Column {} is not present in csv record {}",
                column, position
            ),
            CsvError::FieldCountMismatch {
                position,
                expected,
                found,
            } => write!(
                f,
                "Csv record {} has {} fields, header declares {}",
                position, found, expected
            ),
            CsvError::InvalidFormat(msg) => write!(f, "Invalid csv format: {}", msg),
            CsvError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvError::CsvRead { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_read_error_keeps_cause_and_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CsvError::read("data/people.csv", io);

        let message = err.to_string();
        assert!(message.contains("data/people.csv"));
        assert!(message.contains("denied"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_no_mutator_message_names_column_and_target() {
        let err = CsvError::NoMutatorFound {
            column: "age".to_string(),
            target: "Person",
        };
        assert_eq!(err.to_string(), "No setter found for csv column 'age' in Person");
        assert!(err.source().is_none());
    }
}
