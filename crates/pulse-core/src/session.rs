//! Incremental per-session state.
//!
//! [`SessionState`] owns a session's append-only log and carries the
//! issue list and summary window forward one event at a time, instead of
//! re-deriving them from the full log on every append (the naive design
//! does O(n) work per event, O(n^2) per session). Stage and turn stay
//! O(1) reads of the latest event and are computed on demand.
//!
//! Everything runs synchronously on the consuming thread: one producer
//! appends, all derivations complete before the next event is processed,
//! so every query observes a consistent snapshot.

use crate::event_log::EventLog;
use crate::issues::{IssueReport, IssueTracker};
use crate::stage::{StepState, classify};
use crate::summary::{SummarizeConfig, SummaryWindow, Windower};
use crate::turn::{ActorTurn, resolve_turn};
use pulse_proto::ValidationEvent;
use tracing::debug;

/// Live state for one session: the log plus incrementally maintained
/// derivations.
#[derive(Debug, Clone)]
pub struct SessionState {
    log: EventLog,
    issues: IssueTracker,
    windower: Windower,
}

impl SessionState {
    /// Creates an empty session with default windowing thresholds.
    pub fn new() -> Self {
        Self::with_config(SummarizeConfig::default())
    }

    /// Creates an empty session with explicit windowing thresholds.
    pub fn with_config(config: SummarizeConfig) -> Self {
        Self {
            log: EventLog::new(),
            issues: IssueTracker::new(),
            windower: Windower::new(config),
        }
    }

    /// Appends one event and folds it into the cached derivations.
    pub fn apply(&mut self, event: ValidationEvent) {
        debug!(step = %event.step, status = %event.status, "Applying event");
        self.issues.apply(&event);
        self.windower.apply(event.clone());
        self.log.append(event);
    }

    /// Replaces the windowing config, rebuilding the window from the log.
    ///
    /// This is the one case where incremental state is discarded for a
    /// full recomputation; section expansion flags reset with it.
    pub fn set_summarize_config(&mut self, config: SummarizeConfig) {
        if config == self.windower.config() {
            return;
        }
        debug!(
            max = config.max_events_before_summarize,
            keep = config.keep_recent_events,
            "Windowing config changed, rebuilding window"
        );
        self.windower = Windower::from_log(self.log.as_slice(), config);
    }

    /// The underlying append-only log.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Current stage progress (inspects the latest event only).
    pub fn step_state(&self) -> StepState {
        classify(self.log.as_slice())
    }

    /// Who acts next (inspects the latest event only).
    pub fn turn(&self) -> ActorTurn {
        resolve_turn(self.log.as_slice())
    }

    /// Current issue report from the incrementally maintained tracker.
    pub fn issue_report(&self) -> IssueReport {
        self.issues.report()
    }

    /// The bounded view of the log.
    pub fn window(&self) -> &SummaryWindow {
        self.windower.window()
    }

    /// Toggles a summary section's display expansion.
    pub fn toggle_section(&mut self, id: &str) -> bool {
        self.windower.window_mut().toggle_section(id)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::track_issues;
    use crate::stage::PipelineStage;
    use crate::summary::summarize;
    use pulse_proto::{ActorKind, EventStatus};

    fn event(step: &str, status: EventStatus, who: ActorKind) -> ValidationEvent {
        ValidationEvent::new(step, status, who)
    }

    fn demo_sequence() -> Vec<ValidationEvent> {
        vec![
            event("User Request", EventStatus::Passed, ActorKind::User),
            event("Syntax Validation", EventStatus::Passed, ActorKind::Ai),
            event("Security Validation", EventStatus::Failed, ActorKind::Ai),
            event("AI Correction", EventStatus::Running, ActorKind::Ai),
            event("Security Validation", EventStatus::Passed, ActorKind::Ai)
                .with_details("clean after correction"),
            event("User Review", EventStatus::Pending, ActorKind::User),
            event("Code Delivery", EventStatus::Passed, ActorKind::Ai),
        ]
    }

    #[test]
    fn test_apply_tracks_log_and_derivations() {
        let mut session = SessionState::new();
        for e in demo_sequence() {
            session.apply(e);
        }

        assert_eq!(session.log().len(), 7);
        assert_eq!(session.step_state().current_stage, PipelineStage::FinalDelivery);
        assert_eq!(session.turn().actor, ActorKind::User);
        assert_eq!(session.issue_report().stats.resolved, 1);
    }

    #[test]
    fn test_incremental_matches_full_recomputation() {
        let mut session = SessionState::new();
        for e in demo_sequence() {
            session.apply(e);

            let log = session.log().as_slice();
            let full = track_issues(log);
            let cached = session.issue_report();
            assert_eq!(cached.issues, full.issues);
            assert_eq!(cached.stats, full.stats);

            let window = summarize(log, SummarizeConfig::default());
            assert_eq!(session.window().recent_events, window.recent_events);
        }
    }

    #[test]
    fn test_config_change_rebuilds_window() {
        let mut session = SessionState::new();
        for i in 0..40 {
            session.apply(event(&format!("Step {i}"), EventStatus::Running, ActorKind::Ai));
        }
        // Default 30/15: prefix collapsed.
        assert_eq!(session.window().recent_events.len(), 15);

        session.set_summarize_config(SummarizeConfig {
            max_events_before_summarize: 100,
            keep_recent_events: 50,
        });
        // Rebuilt from the full log: everything fits raw again.
        assert_eq!(session.window().recent_events.len(), 40);
        assert!(session.window().summarized_sections.is_empty());
    }

    #[test]
    fn test_set_same_config_is_noop() {
        let mut session = SessionState::new();
        for i in 0..40 {
            session.apply(event(&format!("Step {i}"), EventStatus::Running, ActorKind::Ai));
        }
        let id = session.window().summarized_sections[0].id.clone();
        session.toggle_section(&id);

        session.set_summarize_config(SummarizeConfig::default());
        // Unchanged config must not rebuild (expansion state survives).
        assert!(session.window().summarized_sections[0].expanded);
    }

    #[test]
    fn test_empty_session_defaults() {
        let session = SessionState::new();
        assert_eq!(session.step_state().current_stage, PipelineStage::UserRequest);
        assert_eq!(session.turn().message, "processing");
        assert_eq!(session.issue_report().stats.total, 0);
        assert_eq!(session.window().total_events(), 0);
    }
}
