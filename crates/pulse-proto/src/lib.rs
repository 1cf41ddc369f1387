//! # pulse-proto
//!
//! Wire-level data contracts for the Pulse validation feed.
//!
//! This crate defines the inbound frame format shared between the transport
//! collaborator (socket or polling connection) and the processing core:
//! the [`ValidationEvent`] frame, its [`EventStatus`] and [`ActorKind`]
//! vocabularies, and the [`SessionId`] key that scopes a feed to one
//! coding-assistant session. No derivation logic lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one coding-assistant session.
///
/// Each session has exactly one ordered event producer; all per-session
/// state in the core is keyed by this identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Producer-reported status of a pipeline activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// The activity is in progress.
    Running,
    /// The activity finished successfully.
    Passed,
    /// The activity detected a problem.
    Failed,
    /// A previously failed activity was corrected.
    Corrected,
    /// The activity is waiting on someone to act.
    Pending,
}

impl EventStatus {
    /// Returns the wire representation (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Running => "running",
            EventStatus::Passed => "passed",
            EventStatus::Failed => "failed",
            EventStatus::Corrected => "corrected",
            EventStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The party a producer claims is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// The human driving the session.
    User,
    /// The coding assistant.
    Ai,
}

impl ActorKind {
    /// Returns the wire representation (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::User => "user",
            ActorKind::Ai => "ai",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pipeline-status event for a session - the atomic unit of the feed.
///
/// Events are immutable once appended to a session log. The transport is
/// responsible for rejecting structurally malformed frames (missing `step`
/// or `status`); a `ValidationEvent` that decodes successfully is always
/// accepted downstream.
///
/// Wire format (JSON):
/// `{"step":"Security Validation","status":"failed","who":"ai","details":"...","timestamp":"2026-01-15T10:23:45Z"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationEvent {
    /// Free-text label identifying a pipeline activity
    /// (e.g. "Security Validation", "AI Correction", "Code Delivery").
    pub step: String,

    /// Producer-reported status of the activity.
    pub status: EventStatus,

    /// Producer's claim of the acting party.
    pub who: ActorKind,

    /// Optional free-text annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Producer-assigned creation instant, assumed monotonically
    /// non-decreasing within a session.
    pub timestamp: DateTime<Utc>,
}

impl ValidationEvent {
    /// Creates an event stamped with the current instant.
    pub fn new(step: impl Into<String>, status: EventStatus, who: ActorKind) -> Self {
        Self {
            step: step.into(),
            status,
            who,
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Attaches a details annotation.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Overrides the producer timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns true if the details annotation contains `needle`.
    pub fn details_contain(&self, needle: &str) -> bool {
        self.details.as_deref().is_some_and(|d| d.contains(needle))
    }
}
