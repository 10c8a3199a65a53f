// ============================================================
// CSV FORMAT
// ============================================================
// Dialect settings handed to the tokenizer

use serde::{Deserialize, Serialize};

/// Delimited text dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvFormat {
    /// Field delimiter, must be ASCII (default: ',')
    pub delimiter: char,

    /// Quote character, must be ASCII (default: '"')
    pub quote: char,

    /// Treat the first row as column names (default: true)
    pub has_headers: bool,

    /// Accept rows whose field count differs from the first row (default: false)
    pub flexible: bool,

    /// Trim surrounding whitespace from headers and values (default: false)
    pub trim: bool,

    /// Lines starting with this ASCII character are skipped (default: none)
    pub comment: Option<char>,

    /// WHATWG encoding label of the input (default: "utf-8")
    pub encoding: String,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            has_headers: true,
            flexible: false,
            trim: false,
            comment: None,
            encoding: "utf-8".to_string(),
        }
    }
}

impl CsvFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma separated, no header row; records are addressed by position
    pub fn headerless() -> Self {
        Self {
            has_headers: false,
            ..Default::default()
        }
    }

    /// Semicolon separated, common in locales using ',' as decimal mark
    pub fn semicolon() -> Self {
        Self {
            delimiter: ';',
            ..Default::default()
        }
    }

    pub fn tab() -> Self {
        Self {
            delimiter: '\t',
            ..Default::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.delimiter.is_ascii() {
            return Err(format!("delimiter {:?} must be an ASCII character", self.delimiter));
        }
        if !self.quote.is_ascii() {
            return Err(format!("quote {:?} must be an ASCII character", self.quote));
        }
        if self.delimiter == self.quote {
            return Err("delimiter and quote must differ".to_string());
        }
        if let Some(comment) = self.comment {
            if !comment.is_ascii() {
                return Err(format!("comment {:?} must be an ASCII character", comment));
            }
        }
        if encoding_rs::Encoding::for_label(self.encoding.as_bytes()).is_none() {
            return Err(format!("unknown encoding label '{}'", self.encoding));
        }
        Ok(())
    }
}
