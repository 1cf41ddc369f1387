//! Canned demo feed.
//!
//! Writes the event sequence the dashboard's demo trigger injects, so the
//! replay and watch commands can be exercised without a live producer.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use pulse_proto::{ActorKind, EventStatus, ValidationEvent};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// The demo session: a request flowing through validation, a security
/// failure corrected and re-validated, review, and delivery.
fn demo_events() -> Vec<ValidationEvent> {
    use ActorKind::{Ai, User};
    use EventStatus::{Failed, Passed, Pending, Running};

    let start = Utc::now();
    let events = vec![
        ValidationEvent::new("User Request", Passed, User)
            .with_details("add rate limiting to the login endpoint"),
        ValidationEvent::new("Syntax Validation", Running, Ai),
        ValidationEvent::new("Syntax Validation", Passed, Ai),
        ValidationEvent::new("Logic Validation", Running, Ai),
        ValidationEvent::new("Logic Validation", Passed, Ai),
        ValidationEvent::new("Security Validation", Running, Ai),
        ValidationEvent::new("Security Validation", Failed, Ai)
            .with_details("rate limit key derived from spoofable header"),
        ValidationEvent::new("AI Correction", Running, Ai),
        ValidationEvent::new("Security Validation", Passed, Ai)
            .with_details("clean after correction"),
        ValidationEvent::new("User Review", Pending, User),
        ValidationEvent::new("User Review", Passed, User),
        ValidationEvent::new("Code Delivery", Passed, Ai),
    ];

    events
        .into_iter()
        .enumerate()
        .map(|(i, e)| e.with_timestamp(start + Duration::seconds(i as i64 * 2)))
        .collect()
}

/// Writes the demo feed as JSONL to `out`.
pub fn write_demo_feed(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut file =
        fs::File::create(out).with_context(|| format!("failed to create {}", out.display()))?;
    let events = demo_events();
    for event in &events {
        let json = serde_json::to_string(event)?;
        writeln!(file, "{json}")?;
    }

    info!(path = %out.display(), count = events.len(), "Demo feed written");
    println!("wrote {} events to {}", events.len(), out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::{FrameReader, SessionState, track_issues};
    use tempfile::TempDir;

    #[test]
    fn test_demo_feed_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("demo.jsonl");
        write_demo_feed(&path).unwrap();

        let batch = FrameReader::read_all(&path).unwrap();
        assert!(batch.malformed.is_empty());
        assert_eq!(batch.events.len(), demo_events().len());
    }

    #[test]
    fn test_demo_feed_exercises_full_lifecycle() {
        let events = demo_events();
        let report = track_issues(&events);

        // The security failure is created critical and ends resolved.
        assert_eq!(report.stats.resolved, 1);
        assert_eq!(report.stats.critical, 0);

        let mut session = SessionState::new();
        for event in events {
            session.apply(event);
        }
        assert_eq!(session.turn().actor, ActorKind::User);
    }
}
