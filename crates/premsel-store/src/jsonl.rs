//! JSONL result files: one record per line.
//!
//! Whole-file writes go through a temporary sibling and a rename so readers
//! never see a half-written dataset. Streaming writes use [`JsonlAppender`],
//! which flushes after every record so an interrupted batch keeps every
//! finished line.

use crate::record::ResultRecord;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Read records from a JSONL reader. Blank lines and `#` lines are skipped.
pub fn read_records(reader: impl BufRead) -> Result<Vec<ResultRecord>, JsonlError> {
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| JsonlError::Io(line_no + 1, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: ResultRecord = serde_json::from_str(trimmed)
            .map_err(|e| JsonlError::Parse(line_no + 1, e.to_string()))?;
        records.push(record);
    }
    Ok(records)
}

/// Write records to a JSONL writer.
pub fn write_records(writer: &mut impl Write, records: &[ResultRecord]) -> Result<(), JsonlError> {
    for record in records {
        write_line(writer, record)?;
    }
    Ok(())
}

fn write_line(writer: &mut impl Write, record: &ResultRecord) -> Result<(), JsonlError> {
    let line = serde_json::to_string(record).map_err(|e| JsonlError::Serialize(e.to_string()))?;
    writeln!(writer, "{line}").map_err(|e| JsonlError::Io(0, e.to_string()))
}

/// Read records from a JSONL file, rejecting NUL bytes and invalid UTF-8.
pub fn read_records_from_path(path: impl AsRef<Path>) -> Result<Vec<ResultRecord>, JsonlError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| JsonlError::Io(0, format!("{}: {e}", path.display())))?;
    validate_dataset_bytes(path, &bytes)?;
    read_records(BufReader::new(bytes.as_slice()))
}

/// Replace the file at `path` with `records`.
pub fn write_records_to_path(
    path: impl AsRef<Path>,
    records: &[ResultRecord],
) -> Result<(), JsonlError> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), JsonlError> {
        let file = File::create(&tmp_path)
            .map_err(|e| JsonlError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        let mut writer = BufWriter::new(file);
        write_records(&mut writer, records)?;
        let file = writer
            .into_inner()
            .map_err(|e| JsonlError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        file.sync_all()
            .map_err(|e| JsonlError::Io(0, format!("{}: {e}", tmp_path.display())))
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        JsonlError::Io(
            0,
            format!("{} -> {}: {e}", tmp_path.display(), path.display()),
        )
    })
}

fn ensure_parent(path: &Path) -> Result<(), JsonlError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| JsonlError::Io(0, format!("{}: {e}", parent.display())))?;
    }
    Ok(())
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

fn validate_dataset_bytes(path: &Path, bytes: &[u8]) -> Result<(), JsonlError> {
    if bytes.contains(&0) {
        return Err(JsonlError::Corrupt(format!(
            "{}: contains NUL byte(s)",
            path.display()
        )));
    }
    if std::str::from_utf8(bytes).is_err() {
        return Err(JsonlError::Corrupt(format!(
            "{}: contains non-UTF-8 byte sequence(s)",
            path.display()
        )));
    }
    Ok(())
}

/// The single writer of a batch's output file.
///
/// Each [`append`](Self::append) writes one full line and flushes.
#[derive(Debug)]
pub struct JsonlAppender {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlAppender {
    /// Create (truncating) the output file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(path.as_ref(), false)
    }

    /// Open the output file for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open(path.as_ref(), true)
    }

    fn open(path: &Path, append: bool) -> Result<Self, StoreError> {
        ensure_parent(path)?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), append, "opened result store");
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn append(&mut self, record: &ResultRecord) -> Result<(), StoreError> {
        write_line(&mut self.writer, record)?;
        self.writer.flush().map_err(|e| {
            JsonlError::Io(0, format!("{}: {e}", self.path.display()))
        })?;
        self.written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended through this handle.
    pub fn written(&self) -> usize {
        self.written
    }
}

/// Errors from JSONL encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum JsonlError {
    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("line {0}: parse error: {1}")]
    Parse(usize, String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("corrupted dataset: {0}")]
    Corrupt(String),
}

/// Errors from the streaming result sink.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Jsonl(#[from] JsonlError),
}
