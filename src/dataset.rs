//! Turns reviewer-corrected text into aligned (input, expected) training lines.
//!
//! Reading happens in full before anything is written, so an unreadable source
//! never leaves partial output behind. Both files are staged next to their
//! destinations and only renamed into place once both are complete.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::DatasetError;
use crate::nikud::{canonicalize, strip};

pub const CORRECTED_TEXT_COLUMN: &str = "corrected_text";

/// Where to read reviewed records from and where to put the two line files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareConfig {
    pub source: PathBuf,
    pub out_dir: PathBuf,
    pub input_name: String,
    pub expected_name: String,
    pub column: String,
}

impl PrepareConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            out_dir: PathBuf::from("data/training"),
            input_name: "input.txt".to_string(),
            expected_name: "expected.txt".to_string(),
            column: CORRECTED_TEXT_COLUMN.to_string(),
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.out_dir.join(&self.input_name)
    }

    pub fn expected_path(&self) -> PathBuf {
        self.out_dir.join(&self.expected_name)
    }
}

/// Two line lists of equal length. `inputs[i]` is `expected[i]` stripped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrainingPairs {
    pub inputs: Vec<String>,
    pub expected: Vec<String>,
    pub skipped: usize,
}

impl TrainingPairs {
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Canonicalizes `field` and records the pair. Blank fields are skipped.
    /// Line breaks inside a field become single spaces so one record is always
    /// one line. Returns whether a pair was added.
    pub fn push(&mut self, field: &str) -> bool {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            self.skipped += 1;
            return false;
        }

        let canonical = canonicalize(&single_line(trimmed));
        self.inputs.push(strip(&canonical));
        self.expected.push(canonical);
        true
    }

    pub fn input_text(&self) -> String {
        self.inputs.join("\n")
    }

    pub fn expected_text(&self) -> String {
        self.expected.join("\n")
    }

    /// Writes both files or neither.
    pub fn write(&self, input_path: &Path, expected_path: &Path) -> Result<(), DatasetError> {
        let input = stage_lines(input_path, &self.input_text())?;
        let expected = stage_lines(expected_path, &self.expected_text())?;

        input
            .persist(input_path)
            .map_err(|err| unwritable(input_path, err.error))?;
        if let Err(err) = expected.persist(expected_path) {
            if let Err(cleanup) = fs::remove_file(input_path) {
                warn!(path = %input_path.display(), error = %cleanup, "failed to remove input file");
            }
            return Err(unwritable(expected_path, err.error));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareReport {
    pub records: usize,
    pub pairs: usize,
    pub skipped: usize,
    pub input_path: PathBuf,
    pub expected_path: PathBuf,
}

/// Builds pairs from corrected-text fields, in iteration order.
pub fn build_pairs<I, S>(fields: I) -> TrainingPairs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pairs = TrainingPairs::default();
    for (row, field) in fields.into_iter().enumerate() {
        if !pairs.push(field.as_ref()) {
            debug!(row = row + 1, "skipping record with empty corrected text");
        }
    }
    pairs
}

/// Reads the `column` field of every data row of a headed CSV file.
pub fn read_corrected_texts(path: &Path, column: &str) -> Result<Vec<String>, DatasetError> {
    let unreadable = |source| DatasetError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(unreadable)?;

    let index = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}') == column)
        .ok_or_else(|| DatasetError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })?;

    let mut fields = Vec::new();
    for record in reader.records() {
        let record = record.map_err(unreadable)?;
        fields.push(record.get(index).unwrap_or_default().to_string());
    }
    Ok(fields)
}

/// Reads the source, builds the pairs and writes both line files.
pub fn prepare_dataset(config: &PrepareConfig) -> Result<PrepareReport, DatasetError> {
    info!(source = %config.source.display(), column = %config.column, "reading reviewed records");
    let fields = read_corrected_texts(&config.source, &config.column)?;
    let pairs = build_pairs(&fields);

    let input_path = config.input_path();
    let expected_path = config.expected_path();
    pairs.write(&input_path, &expected_path)?;

    let report = PrepareReport {
        records: fields.len(),
        pairs: pairs.len(),
        skipped: pairs.skipped,
        input_path,
        expected_path,
    };
    info!(
        records = report.records,
        pairs = report.pairs,
        skipped = report.skipped,
        "wrote training pairs"
    );
    Ok(report)
}

fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn unwritable(path: &Path, source: std::io::Error) -> DatasetError {
    DatasetError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes `text` to a temporary file in the destination's directory.
fn stage_lines(path: &Path, text: &str) -> Result<NamedTempFile, DatasetError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|source| unwritable(parent, source))?;

    let mut staged = NamedTempFile::new_in(parent).map_err(|source| unwritable(path, source))?;
    staged
        .write_all(text.as_bytes())
        .map_err(|source| unwritable(path, source))?;
    staged.flush().map_err(|source| unwritable(path, source))?;
    Ok(staged)
}
