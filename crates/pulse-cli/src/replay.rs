//! Feed replay and tailing.

use crate::display;
use anyhow::{Context, Result};
use pulse_core::{FrameReader, PulseConfig, SessionState};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Replays a recorded feed through a fresh session and prints the final
/// derived view.
pub fn run_replay(feed: &Path, config: &PulseConfig) -> Result<()> {
    let batch = FrameReader::read_all(feed)
        .with_context(|| format!("failed to read feed {}", feed.display()))?;

    report_malformed(&batch.malformed);

    let mut session = SessionState::with_config(config.summarize);
    for event in batch.events {
        session.apply(event);
    }

    println!("{}", display::render_session(&session));
    Ok(())
}

/// Tails a growing feed, re-rendering whenever new frames arrive.
/// Stops on Ctrl-C.
pub async fn run_watch(feed: &Path, config: &PulseConfig, interval_ms: u64) -> Result<()> {
    let mut reader = FrameReader::new(feed);
    let mut session = SessionState::with_config(config.summarize);
    let interval = Duration::from_millis(interval_ms.max(50));

    info!(feed = %feed.display(), "Watching feed");
    println!("{}", display::render_session(&session));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, closing session");
                return Ok(());
            }
            () = tokio::time::sleep(interval) => {}
        }

        let batch = reader
            .read_new_frames()
            .with_context(|| format!("failed to read feed {}", feed.display()))?;
        report_malformed(&batch.malformed);

        if batch.events.is_empty() {
            continue;
        }

        for event in batch.events {
            session.apply(event);
        }
        println!("{}", display::render_session(&session));
    }
}

fn report_malformed(malformed: &[pulse_core::MalformedFrame]) {
    for frame in malformed {
        warn!(
            line = frame.line_number,
            error = %frame.error,
            "Skipping malformed frame"
        );
    }
}
