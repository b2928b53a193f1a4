//! Input sources: line files, directories of line files, record databases.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use toposcan_core::Configuration;
use tracing::{debug, info, warn};

use crate::db::RecordDb;
use crate::error::{Result, StoreError};
use crate::line::parse_line;

/// How an input path is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// Directories and `.txt` files are line input; other files are tried
    /// as a database first and read as lines when that fails.
    #[default]
    Auto,
    Db,
    Line,
}

impl FromStr for InputFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(InputFormat::Auto),
            "db" => Ok(InputFormat::Db),
            "line" => Ok(InputFormat::Line),
            other => Err(StoreError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputFormat::Auto => "auto",
            InputFormat::Db => "db",
            InputFormat::Line => "line",
        })
    }
}

/// A configuration with the identity used in error reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// `file:line` for line input, the record name for databases.
    pub origin: String,
    pub configuration: Configuration,
}

/// What a read pass saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    pub files: u64,
    pub records: u64,
    pub malformed: u64,
    pub unreadable: u64,
}

/// Streams every record under `path` into `sink`.
///
/// Unreadable files and malformed lines are logged and skipped.
///
/// # Errors
///
/// Only an explicit [`InputFormat::Db`] whose database cannot be loaded is
/// an error.
pub fn read_records<F>(path: &Path, format: InputFormat, mut sink: F) -> Result<ReadSummary>
where
    F: FnMut(InputRecord),
{
    let mut summary = ReadSummary::default();
    match format {
        InputFormat::Db => {
            let db = RecordDb::load(path)?;
            read_db(path, db, &mut summary, &mut sink);
        }
        InputFormat::Line => read_line_path(path, &mut summary, &mut sink),
        InputFormat::Auto => {
            let is_txt = path.extension().is_some_and(|e| e == "txt");
            if path.is_dir() || is_txt {
                read_line_path(path, &mut summary, &mut sink);
            } else {
                match RecordDb::load(path) {
                    Ok(db) => read_db(path, db, &mut summary, &mut sink),
                    Err(e) => {
                        debug!(
                            event = "db_fallback",
                            path = %path.display(),
                            error = %e,
                        );
                        read_line_path(path, &mut summary, &mut sink);
                    }
                }
            }
        }
    }
    info!(
        event = "input_read",
        path = %path.display(),
        files = summary.files,
        records = summary.records,
        malformed = summary.malformed,
        unreadable = summary.unreadable,
    );
    Ok(summary)
}

fn read_db<F: FnMut(InputRecord)>(path: &Path, db: RecordDb, summary: &mut ReadSummary, sink: &mut F) {
    summary.files += 1;
    for (i, record) in db.into_records().into_iter().enumerate() {
        let origin = if record.name.is_empty() {
            format!("{}#{}", path.display(), i)
        } else {
            record.name
        };
        summary.records += 1;
        sink(InputRecord {
            origin,
            configuration: record.configuration,
        });
    }
}

fn read_line_path<F: FnMut(InputRecord)>(path: &Path, summary: &mut ReadSummary, sink: &mut F) {
    if path.is_dir() {
        let mut files = Vec::new();
        collect_txt_files(path, &mut files, summary);
        files.sort();
        for file in files {
            debug!(event = "input_file", path = %file.display());
            read_line_file(&file, summary, sink);
        }
    } else {
        read_line_file(path, summary, sink);
    }
}

fn collect_txt_files(dir: &Path, out: &mut Vec<PathBuf>, summary: &mut ReadSummary) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(event = "skip_dir", path = %dir.display(), error = %e);
            summary.unreadable += 1;
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_txt_files(&path, out, summary);
        } else if path.extension().is_some_and(|e| e == "txt") {
            out.push(path);
        }
    }
}

fn read_line_file<F: FnMut(InputRecord)>(path: &Path, summary: &mut ReadSummary, sink: &mut F) {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(event = "skip_file", path = %path.display(), error = %e);
            summary.unreadable += 1;
            return;
        }
    };
    summary.files += 1;
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(event = "read_error", path = %path.display(), line = i + 1, error = %e);
                summary.unreadable += 1;
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(configuration) => {
                summary.records += 1;
                sink(InputRecord {
                    origin: format!("{}:{}", path.display(), i + 1),
                    configuration,
                });
            }
            Err(e) => {
                warn!(event = "malformed_line", path = %path.display(), line = i + 1, error = %e);
                summary.malformed += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(path: &Path, format: InputFormat) -> (Vec<InputRecord>, ReadSummary) {
        let mut records = Vec::new();
        let summary = read_records(path, format, |r| records.push(r)).unwrap();
        (records, summary)
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("auto".parse::<InputFormat>().unwrap(), InputFormat::Auto);
        assert_eq!("db".parse::<InputFormat>().unwrap(), InputFormat::Db);
        assert_eq!("line".parse::<InputFormat>().unwrap(), InputFormat::Line);
        assert!("csv".parse::<InputFormat>().is_err());
        assert_eq!(InputFormat::Line.to_string(), "line");
    }

    #[test]
    fn test_line_file_skips_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "g4 L22 g6\n\nnot a line\ng6 S882@0\n").unwrap();

        let (records, summary) = collect(&path, InputFormat::Line);
        assert_eq!(records.len(), 2);
        assert_eq!(summary.malformed, 1);
        assert!(records[0].origin.ends_with("in.txt:1"));
        assert!(records[1].origin.ends_with("in.txt:4"));
    }

    #[test]
    fn test_directory_is_scanned_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("SCFT").join("len-3");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a.txt"), "g4\n").unwrap();
        std::fs::write(nested.join("gLg.txt"), "g4 L22 g6\ng6 L22 g4\n").unwrap();
        std::fs::write(nested.join("notes.md"), "g4\n").unwrap();

        let (records, summary) = collect(dir.path(), InputFormat::Auto);
        assert_eq!(records.len(), 3);
        assert_eq!(summary.files, 2);
    }

    #[test]
    fn test_auto_reads_db_then_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("records.json");
        let mut db = RecordDb::new();
        db.push("first", parse_line("g4 L11 g4").unwrap());
        db.save(&db_path).unwrap();

        let (records, _) = collect(&db_path, InputFormat::Auto);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].origin, "first");

        let lines = dir.path().join("records.lst");
        std::fs::write(&lines, "g6 L22 g4\n").unwrap();
        let (records, _) = collect(&lines, InputFormat::Auto);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].configuration.to_string(), "g6 L22 g4");
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let (records, summary) = collect(&dir.path().join("gone.txt"), InputFormat::Line);
        assert!(records.is_empty());
        assert_eq!(summary.unreadable, 1);
    }

    #[test]
    fn test_explicit_db_must_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        assert!(read_records(&path, InputFormat::Db, |_| {}).is_err());
    }
}
