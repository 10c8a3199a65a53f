use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::debug;

use crate::domain::csv::CsvFormat;
use crate::domain::error::{CsvError, Result};

pub const ENV_PREFIX: &str = "CSVMAPPER_";

/// Layered [`CsvFormat`] loading: defaults, then an optional TOML file,
/// then prefixed environment variables (`CSVMAPPER_DELIMITER=";"`).
pub struct FormatLoader {
    file: Option<PathBuf>,
    env_prefix: String,
    dotenv: bool,
}

impl Default for FormatLoader {
    fn default() -> Self {
        Self {
            file: None,
            env_prefix: ENV_PREFIX.to_string(),
            dotenv: true,
        }
    }
}

impl FormatLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A missing file contributes nothing
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skip reading `.env` from the working directory
    pub fn without_dotenv(mut self) -> Self {
        self.dotenv = false;
        self
    }

    pub fn figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(CsvFormat::default()));
        if let Some(file) = &self.file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(&self.env_prefix))
    }

    pub fn load(&self) -> Result<CsvFormat> {
        if self.dotenv {
            if let Ok(path) = dotenvy::dotenv() {
                debug!(path = %path.display(), "Loaded .env");
            }
        }

        let format: CsvFormat = self
            .figment()
            .extract()
            .map_err(|e| CsvError::Config(e.to_string()))?;
        format.validate().map_err(CsvError::InvalidFormat)?;

        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_| {
            let format = FormatLoader::new().without_dotenv().load().expect("load");
            assert_eq!(format, CsvFormat::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "csv.toml",
                r#"
                    delimiter = ";"
                    flexible = true
                    has_headers = true
                "#,
            )?;
            jail.set_env("CSVMAPPER_HAS_HEADERS", "false");

            let format = FormatLoader::new()
                .with_file("csv.toml")
                .without_dotenv()
                .load()
                .expect("load");

            assert_eq!(format.delimiter, ';');
            assert!(format.flexible);
            assert!(!format.has_headers);
            assert_eq!(format.encoding, "utf-8");
            Ok(())
        });
    }

    #[test]
    fn test_custom_prefix() {
        Jail::expect_with(|jail| {
            jail.set_env("PEOPLE_CSV_ENCODING", "windows-1252");
            let format = FormatLoader::new()
                .with_env_prefix("PEOPLE_CSV_")
                .without_dotenv()
                .load()
                .expect("load");
            assert_eq!(format.encoding, "windows-1252");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("csv.toml", r#"encoding = "klingon""#)?;
            let result = FormatLoader::new()
                .with_file("csv.toml")
                .without_dotenv()
                .load();
            assert!(matches!(result, Err(CsvError::InvalidFormat(_))));

            jail.create_file("bad.toml", r#"delimiter = 7"#)?;
            let result = FormatLoader::new()
                .with_file("bad.toml")
                .without_dotenv()
                .load();
            assert!(matches!(result, Err(CsvError::Config(_))));
            Ok(())
        });
    }
}
