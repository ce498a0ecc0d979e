//! Logging service - structured event logging to a JSON lines file
//!
//! Provides a privacy-safe logging system that appends events to
//! logs.jsonl in the data directory. No user data (passwords, balances,
//! amounts) is ever logged.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

const LOG_FILENAME: &str = "logs.jsonl";

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    let timestamp = now_ms() as u64;

    // Use lower 16 bits for counter (65536 unique IDs per millisecond)
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

/// Get current unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Detect the current platform
fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// How the application was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    /// One-shot subcommand
    Cli,
    /// Menu-driven session
    Interactive,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Interactive => "interactive",
        }
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    /// Create a new log event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            command: None,
            error_message: None,
            error_details: None,
        }
    }

    /// Set the command context
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Set error details (error kind, additional context)
    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A log entry as stored in the log file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub command: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

/// Service for structured event logging
///
/// Each event is one JSON object per line. Writers take an exclusive
/// advisory lock so concurrent processes never interleave partial lines.
pub struct LoggingService {
    log_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Create a new logging service
    ///
    /// Creates logs.jsonl in the data directory if it doesn't exist.
    pub fn new(
        data_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        let log_path = data_dir.join(LOG_FILENAME);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {:?}", log_path))?;

        Ok(Self {
            log_path,
            entry_point,
            app_version: app_version.into(),
            platform: detect_platform(),
        })
    }

    /// Log an event
    ///
    /// The entry_point, app_version, and platform are automatically added
    /// from the service configuration.
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let entry = LogEntry {
            id: generate_id(),
            timestamp: now_ms(),
            entry_point: self.entry_point.as_str().to_string(),
            app_version: self.app_version.clone(),
            platform: self.platform.to_string(),
            event: event.event,
            command: event.command,
            error_message: event.error_message,
            error_details: event.error_details,
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        file.lock_exclusive()?;
        let written = file.write_all(line.as_bytes());
        file.unlock()?;
        written?;

        Ok(())
    }

    /// Read all entries, skipping lines that do not parse
    fn read_entries(&self) -> Result<Vec<LogEntry>> {
        let file = File::open(&self.log_path)?;
        file.lock_shared()?;
        let entries = BufReader::new(&file)
            .lines()
            .map_while(|line| line.ok())
            .filter_map(|line| serde_json::from_str::<LogEntry>(&line).ok())
            .collect();
        file.unlock()?;
        Ok(entries)
    }

    /// Query recent log entries
    ///
    /// Returns the most recent entries, up to the specified limit.
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let mut entries = self.read_entries()?;
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Query log entries with errors
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self
            .read_entries()?
            .into_iter()
            .filter(|e| e.error_message.is_some())
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Get the total number of log entries
    pub fn count(&self) -> Result<u64> {
        Ok(self.read_entries()?.len() as u64)
    }

    /// Most recent entries for one event name
    pub fn get_by_event(&self, event: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let mut entries = self.get_recent(usize::MAX)?;
        entries.retain(|e| e.event == event);
        entries.truncate(limit);
        Ok(entries)
    }

    /// Number of entries per event name
    pub fn event_counts(&self) -> Result<BTreeMap<String, u64>> {
        let mut counts = BTreeMap::new();
        for entry in self.read_entries()? {
            *counts.entry(entry.event).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Delete logs older than the specified timestamp (unix ms)
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.log_path)?;
        file.lock_exclusive()?;

        let result = (|| -> Result<u64> {
            let mut kept = Vec::new();
            let mut deleted = 0u64;
            for line in BufReader::new(&file).lines() {
                let line = line?;
                match serde_json::from_str::<LogEntry>(&line) {
                    Ok(entry) if entry.timestamp < timestamp_ms => deleted += 1,
                    Ok(_) => kept.push(line),
                    // Unparsable lines are dropped along with old ones
                    Err(_) => {}
                }
            }

            file.set_len(0)?;
            file.seek(SeekFrom::Start(0))?;
            for line in kept {
                writeln!(file, "{}", line)?;
            }
            Ok(deleted)
        })();

        file.unlock()?;
        result
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Size of the log file in bytes
    pub fn size_bytes(&self) -> u64 {
        fs::metadata(&self.log_path).map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logging_service_creation() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        assert!(service.log_path().exists());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_log_plain_event() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("test_event")).unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "test_event");
        assert_eq!(entries[0].entry_point, "cli");
        assert_eq!(entries[0].app_version, "1.0.0");
    }

    #[test]
    fn test_log_with_context() {
        let dir = tempdir().unwrap();
        let service =
            LoggingService::new(dir.path(), EntryPoint::Interactive, "2.0.0").unwrap();

        service
            .log(LogEvent::new("transfer_completed").with_command("transfer"))
            .unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "transfer_completed");
        assert_eq!(entries[0].command, Some("transfer".to_string()));
        assert_eq!(entries[0].entry_point, "interactive");
    }

    #[test]
    fn test_log_rejection() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service
            .log(
                LogEvent::new("transfer_rejected")
                    .with_command("transfer")
                    .with_error("Insufficient balance")
                    .with_error_details("insufficient_balance"),
            )
            .unwrap();
        service.log(LogEvent::new("login_succeeded")).unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "transfer_rejected");
        assert_eq!(errors[0].error_details, Some("insufficient_balance".to_string()));
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("first")).unwrap();
        service.log(LogEvent::new("second")).unwrap();
        service.log(LogEvent::new("third")).unwrap();

        let entries = service.get_recent(2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, "third");
        assert_eq!(entries[1].event, "second");
    }

    #[test]
    fn test_count_and_delete() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("event1")).unwrap();
        service.log(LogEvent::new("event2")).unwrap();
        service.log(LogEvent::new("event3")).unwrap();

        assert_eq!(service.count().unwrap(), 3);

        // Delete all logs (using future timestamp)
        let deleted = service.delete_before(now_ms() + 1000).unwrap();
        assert_eq!(deleted, 3);
        assert_eq!(service.count().unwrap(), 0);

        service.log(LogEvent::new("event4")).unwrap();
        assert_eq!(service.delete_before(0).unwrap(), 0);
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_event_filter_and_counts() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("login_succeeded")).unwrap();
        service.log(LogEvent::new("transfer_completed")).unwrap();
        service.log(LogEvent::new("login_succeeded")).unwrap();

        assert_eq!(service.get_by_event("login_succeeded", 10).unwrap().len(), 2);
        assert_eq!(service.get_by_event("login_succeeded", 1).unwrap().len(), 1);
        assert!(service.get_by_event("store_reset", 10).unwrap().is_empty());

        let counts = service.event_counts().unwrap();
        assert_eq!(counts.get("login_succeeded"), Some(&2));
        assert_eq!(counts.get("transfer_completed"), Some(&1));
    }

    #[test]
    fn test_garbage_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("good")).unwrap();
        let mut file = OpenOptions::new().append(true).open(service.log_path()).unwrap();
        writeln!(file, "not json").unwrap();

        assert_eq!(service.count().unwrap(), 1);
    }
}
