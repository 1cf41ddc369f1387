//! # pulse-core
//!
//! Live validation event processing for coding-assistant sessions.
//!
//! This crate provides:
//! - The append-only per-session event log (single source of truth)
//! - Pipeline stage classification from the latest event
//! - Actor turn resolution via an ordered decision table
//! - Issue lifecycle tracking (active -> fixing -> resolved)
//! - Summarization windowing for a bounded view of unbounded logs
//! - A session registry with explicit creation and teardown
//! - Frame decoding at the transport boundary
//!
//! All derivations are pure functions of the log; [`SessionState`]
//! additionally maintains them incrementally so per-event work stays O(1).

mod config;
mod event_log;
mod frame_reader;
mod issues;
mod session;
mod session_registry;
mod stage;
mod summary;
mod turn;

pub use config::{ConfigError, PulseConfig};
pub use event_log::EventLog;
pub use frame_reader::{FrameBatch, FrameReader, MalformedFrame};
pub use issues::{Issue, IssueReport, IssueStats, IssueStatus, IssueTracker, Severity, track_issues};
pub use session::SessionState;
pub use session_registry::{SessionError, SessionRegistry};
pub use stage::{PipelineStage, StepState, classify, stage_for_step};
pub use summary::{SummarizeConfig, SummarySection, SummaryWindow, Windower, summarize};
pub use turn::{ActorTurn, resolve_turn};
