// ============================================================
// CSV PARSER
// ============================================================
// Tokenize csv input into records, decoding non UTF-8 files

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::Encoding;
use tracing::warn;

use crate::domain::csv::{CsvFormat, CsvRecord};
use crate::domain::error::{CsvError, Result};

/// Lines inspected when guessing a delimiter
const SNIFF_LINES: usize = 10;

/// Origin reported for content that did not come from a file
pub const MEMORY_ORIGIN: &str = "<memory>";

/// CSV parser driven by a [`CsvFormat`]
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    format: CsvFormat,
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: CsvFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &CsvFormat {
        &self.format
    }

    /// Parse a CSV file, feeding each record to `sink`.
    /// Returns the number of records read.
    pub fn parse_file(
        &self,
        path: &Path,
        sink: &mut dyn FnMut(CsvRecord) -> Result<()>,
    ) -> Result<usize> {
        let encoding = self.encoding()?;
        let file = File::open(path).map_err(|e| CsvError::read(path, e))?;

        if encoding == encoding_rs::UTF_8 {
            return self.parse_reader(BufReader::new(file), path, sink);
        }

        let mut buffer = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut buffer)
            .map_err(|e| CsvError::read(path, e))?;

        let (content, _, had_errors) = encoding.decode(&buffer);
        if had_errors {
            warn!(
                path = %path.display(),
                encoding = encoding.name(),
                "Malformed sequences replaced while decoding csv file"
            );
        }

        self.parse_reader(content.as_bytes(), path, sink)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Vec<CsvRecord>> {
        let mut records = Vec::new();
        self.parse_reader(content.as_bytes(), Path::new(MEMORY_ORIGIN), &mut |record| {
            records.push(record);
            Ok(())
        })?;
        Ok(records)
    }

    /// Parse any reader. `origin` only labels errors.
    pub fn parse_reader<R: Read>(
        &self,
        input: R,
        origin: &Path,
        sink: &mut dyn FnMut(CsvRecord) -> Result<()>,
    ) -> Result<usize> {
        self.format.validate().map_err(CsvError::InvalidFormat)?;

        let mut reader = self.reader_builder().from_reader(input);

        let headers: Option<Arc<[String]>> = if self.format.has_headers {
            let headers = reader.headers().map_err(|e| CsvError::read(origin, e))?;
            Some(headers.iter().map(str::to_string).collect())
        } else {
            None
        };

        let mut raw = StringRecord::new();
        let mut position = 0;

        while reader
            .read_record(&mut raw)
            .map_err(|e| CsvError::read(origin, e))?
        {
            let values: Vec<String> = raw.iter().map(str::to_string).collect();
            let record = match &headers {
                Some(headers) => CsvRecord::with_headers(Arc::clone(headers), values),
                None => CsvRecord::new(values),
            };
            sink(record.at_position(position))?;
            position += 1;
        }

        Ok(position)
    }

    fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.format.delimiter as u8)
            .quote(self.format.quote as u8)
            .has_headers(self.format.has_headers)
            .flexible(self.format.flexible)
            .trim(if self.format.trim { Trim::All } else { Trim::None })
            .comment(self.format.comment.map(|c| c as u8));
        builder
    }

    fn encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.format.encoding.as_bytes()).ok_or_else(|| {
            CsvError::InvalidFormat(format!("unknown encoding label '{}'", self.format.encoding))
        })
    }

    /// Decode a byte sample with the configured encoding. Malformed or
    /// truncated sequences become replacement characters.
    pub fn decode_sample<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        let (content, _, _) = self.encoding()?.decode(bytes);
        Ok(content)
    }

    /// Guess the delimiter of `content` from its first lines.
    /// Picks the candidate that occurs often and evenly per line; comma when nothing does.
    pub fn detect_delimiter(content: &str) -> char {
        const CANDIDATES: [char; 4] = [',', ';', '\t', '|'];

        let counts: Vec<[usize; 4]> = content
            .lines()
            .take(SNIFF_LINES)
            .map(|line| {
                let mut per_line = [0usize; 4];
                for c in line.chars() {
                    if let Some(slot) = CANDIDATES.iter().position(|&d| d == c) {
                        per_line[slot] += 1;
                    }
                }
                per_line
            })
            .collect();

        if counts.is_empty() {
            return ',';
        }

        let lines = counts.len() as f32;
        let mut best = (',', 0.0f32);
        for (slot, &candidate) in CANDIDATES.iter().enumerate() {
            let mean = counts.iter().map(|c| c[slot] as f32).sum::<f32>() / lines;
            let variance = counts
                .iter()
                .map(|c| (c[slot] as f32 - mean).powi(2))
                .sum::<f32>()
                / lines;

            let score = mean / (1.0 + variance.sqrt());
            if score > best.1 {
                best = (candidate, score);
            }
        }

        best.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let rows = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0].get("name").unwrap(), "Alice");
        assert_eq!(rows[1].get("city").unwrap(), "LA");
        assert_eq!(rows[1].position(), 1);
    }

    #[test]
    fn test_records_share_one_header() {
        let rows = CsvParser::new().parse_content("a,b\n1,2\n3,4").unwrap();
        let first = rows[0].headers().unwrap().as_ptr();
        let second = rows[1].headers().unwrap().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_headerless_rows_are_positional() {
        let parser = CsvParser::with_format(CsvFormat::headerless());
        let rows = parser.parse_content("foo,bar\nbaz,buf").unwrap();

        assert_eq!(rows.len(), 2);
        assert!(!rows[0].has_headers());
        assert_eq!(rows[0].get(0).unwrap(), "foo");
        assert_eq!(rows[1].get(1).unwrap(), "buf");
    }

    #[test]
    fn test_quoted_fields_keep_delimiters() {
        let rows = CsvParser::new()
            .parse_content("name,note\n\"Doe, Jane\",\"said \"\"hi\"\"\"")
            .unwrap();
        assert_eq!(rows[0].get("name").unwrap(), "Doe, Jane");
        assert_eq!(rows[0].get("note").unwrap(), "said \"hi\"");
    }

    #[test]
    fn test_ragged_rows_fail_unless_flexible() {
        let content = "a,b\n1,2\n3";

        let strict = CsvParser::new().parse_content(content);
        assert!(matches!(strict, Err(CsvError::CsvRead { .. })));

        let flexible = CsvParser::with_format(CsvFormat::default().with_flexible(true));
        let rows = flexible.parse_content(content).unwrap();
        assert_eq!(rows[1].get("a").unwrap(), "3");
        assert!(matches!(rows[1].get("b"), Err(CsvError::ColumnNotFound { .. })));
    }

    #[test]
    fn test_sink_error_stops_parsing() {
        let mut seen = 0;
        let result = CsvParser::new().parse_reader(
            "x\n1\n2\n3".as_bytes(),
            Path::new(MEMORY_ORIGIN),
            &mut |_| {
                seen += 1;
                Err(CsvError::InvalidFormat("stop".to_string()))
            },
        );
        assert!(result.is_err());
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_invalid_format_is_rejected_before_reading() {
        let parser = CsvParser::with_format(CsvFormat::default().with_delimiter('→'));
        assert!(matches!(
            parser.parse_content("a,b"),
            Err(CsvError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), ',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), ';');
        assert_eq!(CsvParser::detect_delimiter("a\tb\nc\td"), '\t');
        assert_eq!(CsvParser::detect_delimiter(""), ',');
    }

    #[test]
    fn test_detect_delimiter_prefers_even_counts() {
        // commas only inside some values, semicolons on every line
        let content = "name;note\nA;x, y, z\nB;plain\nC;w\n";
        assert_eq!(CsvParser::detect_delimiter(content), ';');
    }

    #[test]
    fn test_decode_sample_uses_format_encoding() {
        let parser = CsvParser::with_format(CsvFormat::default().with_encoding("windows-1252"));
        assert_eq!(parser.decode_sample(b"caf\xe9").unwrap(), "café");

        let unknown = CsvParser::with_format(CsvFormat::default().with_encoding("klingon"));
        assert!(matches!(
            unknown.decode_sample(b"a"),
            Err(CsvError::InvalidFormat(_))
        ));
    }
}
