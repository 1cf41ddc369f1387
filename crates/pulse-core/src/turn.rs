//! Actor turn resolution.
//!
//! Decides whether the human or the assistant should act next, with a
//! human-readable reason. This is a decision table over the latest event
//! only, not a state machine: rules are evaluated top to bottom and the
//! first match wins, so precedence is auditable in one place. It is
//! recomputed fresh on every query and never persisted.

use pulse_proto::{ActorKind, EventStatus, ValidationEvent};
use serde::Serialize;

/// The party expected to act next, with a display reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorTurn {
    /// Who acts next.
    pub actor: ActorKind,
    /// Human-readable reason for the handoff.
    pub message: String,
}

impl ActorTurn {
    fn new(actor: ActorKind, message: impl Into<String>) -> Self {
        Self {
            actor,
            message: message.into(),
        }
    }
}

/// One entry of the ordered decision table.
struct TurnRule {
    /// Rule name, for audit and test output.
    name: &'static str,
    matches: fn(&ValidationEvent) -> bool,
    build: fn(&ValidationEvent) -> ActorTurn,
}

/// The decision table, in precedence order. First match wins.
const TURN_RULES: &[TurnRule] = &[
    TurnRule {
        name: "delivery-complete",
        matches: |e| e.step == "Code Delivery" && e.status == EventStatus::Passed,
        build: |_| ActorTurn::new(ActorKind::User, "ready for next request"),
    },
    TurnRule {
        name: "review-pending",
        matches: |e| e.step == "User Review" && e.status == EventStatus::Pending,
        build: |_| ActorTurn::new(ActorKind::User, "waiting for review"),
    },
    TurnRule {
        name: "user-step-passed",
        matches: |e| e.who == ActorKind::User && e.status == EventStatus::Passed,
        build: |e| {
            ActorTurn::new(
                ActorKind::Ai,
                format!("continuing processing after {}...", e.step.to_lowercase()),
            )
        },
    },
    TurnRule {
        name: "ai-working",
        matches: |e| matches!(e.status, EventStatus::Running | EventStatus::Corrected),
        build: |e| {
            let verb = if e.status == EventStatus::Corrected {
                "correcting"
            } else {
                "working on"
            };
            ActorTurn::new(
                ActorKind::Ai,
                format!("{} {}...", verb, e.step.to_lowercase()),
            )
        },
    },
    TurnRule {
        name: "ai-proceeding",
        matches: |e| matches!(e.status, EventStatus::Passed | EventStatus::Failed),
        build: |e| {
            ActorTurn::new(
                ActorKind::Ai,
                format!("proceeding after {}...", e.step.to_lowercase()),
            )
        },
    },
];

/// Resolves whose turn it is to act, from the latest event of the log.
///
/// An empty log, or an event no rule claims (a `pending` status outside
/// review), resolves to the assistant with a generic "processing" message.
pub fn resolve_turn(log: &[ValidationEvent]) -> ActorTurn {
    let Some(last) = log.last() else {
        return ActorTurn::new(ActorKind::Ai, "processing");
    };

    for rule in TURN_RULES {
        if (rule.matches)(last) {
            tracing::debug!(rule = rule.name, step = %last.step, "Turn rule matched");
            return (rule.build)(last);
        }
    }

    ActorTurn::new(ActorKind::Ai, "processing")
}
