use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;

use crate::constants::get_prediction_log_dir;

use super::record::PredictionLogEntry;
use super::{PredictionSink, SinkError};

const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

/// Files written by this sink: `predictions-YYYY-MM-DD-HHMMSS[-n].jsonl`
const FILE_PREFIX: &str = "predictions-";

/// Append-only JSONL prediction log with size-based rotation
pub struct PredictionLogWriter {
    file: Mutex<Option<File>>,
    base_dir: PathBuf,
    max_file_size: u64,
}

/// Files, total size and newest file name of a log directory
#[derive(Debug, Clone, PartialEq)]
pub struct LogStats {
    pub files: usize,
    pub total_bytes: u64,
    pub current_file: Option<String>,
}

impl PredictionLogWriter {
    /// `$PHISHGUARD_LOG_DIR` or the per-user data directory
    pub fn new() -> io::Result<Self> {
        Self::from_path(get_prediction_log_dir())
    }

    pub fn from_path(base_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            file: Mutex::new(None),
            base_dir,
            max_file_size: MAX_FILE_SIZE,
        })
    }

    /// Rotate at `bytes` instead of 10 MB
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes.max(1);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Append one entry, rotating when the current file is full
    pub fn append(&self, entry: &PredictionLogEntry) -> io::Result<()> {
        let line = serde_json::to_string(entry)?;
        let mut file_guard = self.file.lock();

        // First write: continue the newest file if it still has room
        if file_guard.is_none() {
            let reopened = match self.find_latest_log_file()? {
                Some(path) => {
                    let f = OpenOptions::new().create(true).append(true).open(&path)?;
                    (f.metadata()?.len() < self.max_file_size).then_some(f)
                }
                None => None,
            };
            *file_guard = Some(match reopened {
                Some(f) => f,
                None => self.create_new_file()?,
            });
        }

        let should_rotate = match file_guard.as_ref() {
            Some(f) => f.metadata()?.len() >= self.max_file_size,
            None => false,
        };
        if should_rotate {
            *file_guard = Some(self.create_new_file()?);
        }

        if let Some(file) = file_guard.as_mut() {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn stats(&self) -> io::Result<LogStats> {
        let mut files = 0;
        let mut total_bytes = 0u64;
        for path in self.log_files()? {
            files += 1;
            total_bytes += fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        }
        let current_file = self
            .find_latest_log_file()?
            .and_then(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string));
        Ok(LogStats {
            files,
            total_bytes,
            current_file,
        })
    }

    fn create_new_file(&self) -> io::Result<File> {
        let stamp = Utc::now().format("%Y-%m-%d-%H%M%S").to_string();
        let mut path = self.base_dir.join(format!("{}{}.jsonl", FILE_PREFIX, stamp));

        // Several rotations within one second get a counter suffix
        let mut n = 1;
        while path.exists() {
            path = self.base_dir.join(format!("{}{}-{}.jsonl", FILE_PREFIX, stamp, n));
            n += 1;
        }

        log::debug!("Opening prediction log {}", path.display());
        OpenOptions::new().create(true).append(true).open(path)
    }

    fn log_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(&self.base_dir)?
            .filter_map(|res| res.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "jsonl"))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(FILE_PREFIX))
            })
            .collect::<Vec<_>>();

        // Most recently written last
        entries.sort_by_key(|p| {
            let mtime = fs::metadata(p).and_then(|m| m.modified()).ok();
            (mtime, p.clone())
        });
        Ok(entries)
    }

    fn find_latest_log_file(&self) -> io::Result<Option<PathBuf>> {
        Ok(self.log_files()?.pop())
    }
}

impl PredictionSink for PredictionLogWriter {
    fn record(&self, entry: &PredictionLogEntry) -> Result<(), SinkError> {
        self.append(entry).map_err(SinkError::from)
    }
}
