//! Inbound frame decoding.
//!
//! The transport collaborator delivers validation events as JSONL frames,
//! one JSON object per line. This reader sits at that boundary: frames
//! that decode into a [`ValidationEvent`] pass through, malformed lines
//! are collected and logged but never reach a session log. The core
//! itself has no error path for bad input - rejection happens here.

use pulse_proto::ValidationEvent;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A line that failed to decode into a frame.
#[derive(Debug, Clone)]
pub struct MalformedFrame {
    /// 1-based line number in the feed file.
    pub line_number: usize,
    /// The decode error, as text.
    pub error: String,
    /// The raw line content.
    pub content: String,
}

/// Result of one read pass over the feed.
#[derive(Debug, Default)]
pub struct FrameBatch {
    /// Successfully decoded events, in feed order.
    pub events: Vec<ValidationEvent>,
    /// Lines rejected at this boundary.
    pub malformed: Vec<MalformedFrame>,
}

/// Reads validation event frames from a JSONL feed file.
///
/// Tracks how many lines it has consumed so repeated calls only yield
/// frames appended since the last read - the polling idiom a tailing
/// consumer needs.
#[derive(Debug)]
pub struct FrameReader {
    path: PathBuf,
    consumed_lines: usize,
}

impl FrameReader {
    /// Creates a reader for the given feed file. The file does not need
    /// to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            consumed_lines: 0,
        }
    }

    /// Returns the feed path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads frames appended since the previous call.
    ///
    /// A missing feed file reads as empty - the connection may simply not
    /// have produced anything yet. Blank lines are skipped but still
    /// advance the cursor.
    pub fn read_new_frames(&mut self) -> io::Result<FrameBatch> {
        if !self.path.exists() {
            return Ok(FrameBatch::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut batch = FrameBatch::default();

        for (idx, line) in content.lines().enumerate() {
            if idx < self.consumed_lines {
                continue;
            }
            self.consumed_lines = idx + 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ValidationEvent>(line) {
                Ok(event) => batch.events.push(event),
                Err(e) => {
                    warn!(line = idx + 1, error = %e, "Rejected malformed frame");
                    batch.malformed.push(MalformedFrame {
                        line_number: idx + 1,
                        error: e.to_string(),
                        content: line.to_string(),
                    });
                }
            }
        }

        Ok(batch)
    }

    /// Reads the entire feed from the start, ignoring the cursor.
    pub fn read_all(path: impl AsRef<Path>) -> io::Result<FrameBatch> {
        let mut reader = Self::new(path.as_ref());
        reader.read_new_frames()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_proto::{ActorKind, EventStatus};
    use std::fs::OpenOptions;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_frame(path: &Path, event: &ValidationEvent) {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        let mut json = serde_json::to_string(event).unwrap();
        json.push('\n');
        file.write_all(json.as_bytes()).unwrap();
    }

    fn write_line(path: &Path, line: &str) {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        writeln!(file, "{line}").unwrap();
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let mut reader = FrameReader::new(tmp.path().join("feed.jsonl"));

        let batch = reader.read_new_frames().unwrap();
        assert!(batch.events.is_empty());
        assert!(batch.malformed.is_empty());
    }

    #[test]
    fn test_reads_frames_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("feed.jsonl");
        write_frame(
            &path,
            &ValidationEvent::new("User Request", EventStatus::Passed, ActorKind::User),
        );
        write_frame(
            &path,
            &ValidationEvent::new("AI Validation", EventStatus::Running, ActorKind::Ai),
        );

        let batch = FrameReader::read_all(&path).unwrap();
        assert_eq!(batch.events.len(), 2);
        assert_eq!(batch.events[0].step, "User Request");
        assert_eq!(batch.events[1].step, "AI Validation");
    }

    #[test]
    fn test_incremental_reads_only_new_frames() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("feed.jsonl");
        let mut reader = FrameReader::new(&path);

        write_frame(
            &path,
            &ValidationEvent::new("User Request", EventStatus::Passed, ActorKind::User),
        );
        assert_eq!(reader.read_new_frames().unwrap().events.len(), 1);

        // Nothing new yet.
        assert!(reader.read_new_frames().unwrap().events.is_empty());

        write_frame(
            &path,
            &ValidationEvent::new("Code Delivery", EventStatus::Passed, ActorKind::Ai),
        );
        let batch = reader.read_new_frames().unwrap();
        assert_eq!(batch.events.len(), 1);
        assert_eq!(batch.events[0].step, "Code Delivery");
    }

    #[test]
    fn test_malformed_frames_are_rejected_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("feed.jsonl");
        write_line(&path, r#"{"step":"AI Validation""#); // truncated JSON
        write_line(&path, r#"{"status":"passed","who":"ai","timestamp":"2026-01-15T10:00:00Z"}"#); // missing step
        write_frame(
            &path,
            &ValidationEvent::new("AI Validation", EventStatus::Passed, ActorKind::Ai),
        );

        let batch = FrameReader::read_all(&path).unwrap();
        assert_eq!(batch.events.len(), 1);
        assert_eq!(batch.malformed.len(), 2);
        assert_eq!(batch.malformed[0].line_number, 1);
        assert_eq!(batch.malformed[1].line_number, 2);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("feed.jsonl");
        write_line(&path, "");
        write_frame(
            &path,
            &ValidationEvent::new("AI Validation", EventStatus::Passed, ActorKind::Ai),
        );

        let batch = FrameReader::read_all(&path).unwrap();
        assert_eq!(batch.events.len(), 1);
        assert!(batch.malformed.is_empty());
    }
}
