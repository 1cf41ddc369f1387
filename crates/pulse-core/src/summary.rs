//! Summarization windowing.
//!
//! Keeps a bounded tail of raw events visible and collapses everything
//! older into count-only summary sections, so consumers never hold
//! unbounded render state. No event is ever dropped, only reclassified:
//! `recent_events.len() + sum(section.count)` always equals the total
//! number of events appended to the session.

use chrono::{DateTime, Utc};
use pulse_proto::ValidationEvent;
use serde::{Deserialize, Serialize};

fn default_max_events() -> usize {
    30
}

fn default_keep_recent() -> usize {
    15
}

/// Windowing thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeConfig {
    /// Total event count above which the prefix starts collapsing.
    #[serde(default = "default_max_events")]
    pub max_events_before_summarize: usize,

    /// How many raw events stay visible once summarization kicks in.
    #[serde(default = "default_keep_recent")]
    pub keep_recent_events: usize,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            max_events_before_summarize: default_max_events(),
            keep_recent_events: default_keep_recent(),
        }
    }
}

/// A collapsed run of older events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySection {
    /// Stable identifier within the session ("section-N").
    pub id: String,

    /// Number of events collapsed into this section.
    pub count: usize,

    /// Timestamp of the oldest collapsed event.
    pub start: DateTime<Utc>,

    /// Timestamp of the newest collapsed event.
    pub end: DateTime<Utc>,

    /// Display-only expansion flag - the sole mutable field in the whole
    /// data model. Toggling never changes `count` or membership.
    pub expanded: bool,
}

/// The bounded view of a session log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SummaryWindow {
    /// The raw tail, in append order.
    pub recent_events: Vec<ValidationEvent>,

    /// Collapsed prefix, oldest section first.
    pub summarized_sections: Vec<SummarySection>,
}

impl SummaryWindow {
    /// Total events represented: raw tail plus everything collapsed.
    pub fn total_events(&self) -> usize {
        self.recent_events.len() + self.summarized_sections.iter().map(|s| s.count).sum::<usize>()
    }

    /// Toggles a section's display expansion. Returns false if no section
    /// has the given id.
    pub fn toggle_section(&mut self, id: &str) -> bool {
        match self.summarized_sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.expanded = !section.expanded;
                true
            }
            None => false,
        }
    }
}

/// Incremental windower for one session.
///
/// Carries the window forward event by event instead of repartitioning the
/// full log on every append. Section expansion state survives updates; it
/// is only lost on a config change, which rebuilds from the log.
#[derive(Debug, Clone)]
pub struct Windower {
    window: SummaryWindow,
    config: SummarizeConfig,
    total: usize,
}

impl Windower {
    /// Creates an empty windower.
    pub fn new(config: SummarizeConfig) -> Self {
        Self {
            window: SummaryWindow::default(),
            config,
            total: 0,
        }
    }

    /// Rebuilds a windower from a full log (used on config changes).
    pub fn from_log(log: &[ValidationEvent], config: SummarizeConfig) -> Self {
        let mut windower = Self::new(config);
        for event in log {
            windower.apply(event.clone());
        }
        windower
    }

    /// Returns the active config.
    pub fn config(&self) -> SummarizeConfig {
        self.config
    }

    /// Returns the current window.
    pub fn window(&self) -> &SummaryWindow {
        &self.window
    }

    /// Returns the window for display mutation (section toggling).
    pub fn window_mut(&mut self) -> &mut SummaryWindow {
        &mut self.window
    }

    /// Folds one event into the window.
    ///
    /// The new event joins the raw tail; once the session is past the
    /// summarization threshold, overflow beyond `keep_recent_events` rolls
    /// off the front of the tail into the prefix section.
    pub fn apply(&mut self, event: ValidationEvent) {
        self.window.recent_events.push(event);
        self.total += 1;

        if self.total <= self.config.max_events_before_summarize {
            return;
        }

        let keep = self.config.keep_recent_events;
        if self.window.recent_events.len() <= keep {
            return;
        }

        let overflow: Vec<ValidationEvent> = self
            .window
            .recent_events
            .drain(..self.window.recent_events.len() - keep)
            .collect();
        self.collapse(&overflow);

        debug_assert_eq!(self.window.total_events(), self.total);
    }

    /// Folds rolled-off events into the contiguous prefix section,
    /// creating it on first overflow. A single section per contiguous
    /// prefix is the default granularity; the coverage invariant is what
    /// matters, not the chunking.
    fn collapse(&mut self, overflow: &[ValidationEvent]) {
        let (Some(first), Some(last)) = (overflow.first(), overflow.last()) else {
            return;
        };

        match self.window.summarized_sections.last_mut() {
            Some(section) => {
                section.count += overflow.len();
                section.end = last.timestamp;
            }
            None => {
                self.window.summarized_sections.push(SummarySection {
                    id: format!("section-{}", self.window.summarized_sections.len() + 1),
                    count: overflow.len(),
                    start: first.timestamp,
                    end: last.timestamp,
                    expanded: false,
                });
            }
        }
    }
}

/// Partitions a full log into its bounded view.
///
/// Pure pull-based query, memoizable on `(log.len(), config)`: logs at or
/// under the threshold come back raw with no sections; longer logs keep
/// the last `keep_recent_events` raw and collapse the prefix into one
/// contiguous section.
pub fn summarize(log: &[ValidationEvent], config: SummarizeConfig) -> SummaryWindow {
    Windower::from_log(log, config).window.clone()
}
