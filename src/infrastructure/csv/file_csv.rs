// ============================================================
// FILE CSV SOURCE
// ============================================================
// Record source reading a csv file from disk on every pass

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::CsvParser;
use crate::domain::csv::{CsvFormat, CsvRecord, RecordSource};
use crate::domain::error::{CsvError, Result};

/// Bytes sampled when sniffing the delimiter of a file
const SNIFF_LEN: u64 = 4096;

/// Csv file on disk. The file is opened anew for every pass.
#[derive(Debug, Clone)]
pub struct FileCsv {
    path: PathBuf,
    parser: CsvParser,
}

impl FileCsv {
    /// Comma separated file with a header row
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_format(path, CsvFormat::default())
    }

    pub fn with_format(path: impl Into<PathBuf>, format: CsvFormat) -> Self {
        Self {
            path: path.into(),
            parser: CsvParser::with_format(format),
        }
    }

    /// Open the file with a delimiter sniffed from its first lines
    pub fn detect(path: impl Into<PathBuf>) -> Result<Self> {
        Self::detect_with(path, CsvFormat::default())
    }

    /// Like [`FileCsv::detect`], keeping every setting of `format` but the delimiter
    pub fn detect_with(path: impl Into<PathBuf>, format: CsvFormat) -> Result<Self> {
        let path = path.into();
        let format = Self::detect_format(&path, format)?;
        Ok(Self::with_format(path, format))
    }

    /// `format` with its delimiter replaced by one guessed from the head of the
    /// file. The sample is decoded with the encoding of `format`.
    pub fn detect_format(path: &Path, format: CsvFormat) -> Result<CsvFormat> {
        assert_file_exists(path)?;

        let file = File::open(path).map_err(|e| CsvError::read(path, e))?;
        let mut sample = Vec::new();
        file.take(SNIFF_LEN)
            .read_to_end(&mut sample)
            .map_err(|e| CsvError::read(path, e))?;

        let parser = CsvParser::with_format(format);
        let delimiter = CsvParser::detect_delimiter(&parser.decode_sample(&sample)?);
        debug!(path = %path.display(), ?delimiter, "Detected csv delimiter");

        Ok(parser.format().clone().with_delimiter(delimiter))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> &CsvFormat {
        self.parser.format()
    }
}

impl RecordSource for FileCsv {
    fn for_each_record(&self, sink: &mut dyn FnMut(CsvRecord) -> Result<()>) -> Result<()> {
        assert_file_exists(&self.path)?;

        debug!(path = %self.path.display(), "Reading csv file");
        let rows = self.parser.parse_file(&self.path, sink)?;
        debug!(path = %self.path.display(), rows, "Finished reading csv file");

        Ok(())
    }
}

fn assert_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CsvError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::from_fn;
    use crate::shared::logging::init_test_tracing;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    fn temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_fails_before_mapping() {
        init_test_tracing();
        let source = FileCsv::new("inexisting/path.csv");
        let mapper = from_fn(|_| -> Result<()> { panic!("mapper must not run") });

        match source.map(&mapper) {
            Err(CsvError::FileNotFound { path }) => {
                assert_eq!(path, PathBuf::from("inexisting/path.csv"));
            }
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_reads_fixture_in_row_order() {
        init_test_tracing();
        let source = FileCsv::new(fixture("headed_two_rows.csv"));
        let pairs = source
            .map(&from_fn(|r| Ok((r.get("x")?.to_string(), r.get("y")?.to_string()))))
            .unwrap();

        assert_eq!(
            pairs,
            vec![
                ("foo".to_string(), "bar".to_string()),
                ("baz".to_string(), "buf".to_string()),
            ]
        );
    }

    #[test]
    fn test_headerless_semicolon_file() {
        let file = temp_csv(b"1;one\n2;two\n3;three\n");
        let format = CsvFormat::semicolon().with_headers(false);
        let source = FileCsv::with_format(file.path(), format);

        let records = source.records().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].get(1).unwrap(), "three");
        assert!(records[0].to_map().is_empty());
    }

    #[test]
    fn test_mapping_error_aborts_batch() {
        let file = temp_csv(b"n\n1\nx\n3\n");
        let source = FileCsv::new(file.path());
        let mapper = from_fn(|r| {
            r.get("n")?
                .parse::<u32>()
                .map_err(|e| CsvError::MutatorFailed {
                    column: "n".to_string(),
                    target: "u32",
                    reason: e.to_string(),
                })
        });

        assert!(matches!(
            source.map(&mapper),
            Err(CsvError::MutatorFailed { .. })
        ));
    }

    #[test]
    fn test_ragged_file_is_a_read_error() {
        let file = temp_csv(b"a,b\n1,2\n3\n");
        let source = FileCsv::new(file.path());

        match source.records() {
            Err(CsvError::CsvRead { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected CsvRead, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_a_read_error() {
        let file = temp_csv(b"name\ncaf\xe9\n");
        let source = FileCsv::new(file.path());
        assert!(matches!(source.records(), Err(CsvError::CsvRead { .. })));
    }

    #[test]
    fn test_decodes_configured_encoding() {
        let file = temp_csv(b"name\ncaf\xe9\n");
        let format = CsvFormat::default().with_encoding("windows-1252");
        let source = FileCsv::with_format(file.path(), format);

        let records = source.records().unwrap();
        assert_eq!(records[0].get("name").unwrap(), "café");
    }

    #[test]
    fn test_file_is_reread_on_every_call() {
        let mut file = temp_csv(b"v\n1\n");
        let source = FileCsv::new(file.path());
        assert_eq!(source.records().unwrap().len(), 1);

        file.write_all(b"2\n").unwrap();
        file.flush().unwrap();
        assert_eq!(source.records().unwrap().len(), 2);
    }

    #[test]
    fn test_detect_format_sniffs_delimiter() {
        let file = temp_csv(b"a|b|c\n1|2|3\n4|5|6\n");
        let source = FileCsv::detect(file.path()).unwrap();

        assert_eq!(source.format().delimiter, '|');
        assert_eq!(source.records().unwrap()[1].get("c").unwrap(), "6");
    }

    #[test]
    fn test_detect_decodes_sample_with_format_encoding() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "a;b\n1;2\n3;4\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = temp_csv(&bytes);

        let format = CsvFormat::default().with_encoding("utf-16le");
        let source = FileCsv::detect_with(file.path(), format).unwrap();

        assert_eq!(source.format().delimiter, ';');
        assert_eq!(source.format().encoding, "utf-16le");
        assert_eq!(source.records().unwrap()[0].get("b").unwrap(), "2");
    }

    #[test]
    fn test_detect_format_on_missing_file() {
        assert!(matches!(
            FileCsv::detect_format(Path::new("nope/nothing.csv"), CsvFormat::default()),
            Err(CsvError::FileNotFound { .. })
        ));
    }
}
