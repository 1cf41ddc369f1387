//! Pipeline stage classification.
//!
//! Maps the most recent event of a session log onto one of the five
//! canonical pipeline stages and accumulates the completed-stage set.
//! Stage selection inspects only the latest event; history matters only
//! for the bookkeeping rule that reaching stage N implies stages 0..N-1
//! were progressed past.

use pulse_proto::{EventStatus, ValidationEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the five canonical phases of the coding-assistant workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// The human states what they want built.
    UserRequest,
    /// The assistant validates the produced code.
    AiValidation,
    /// The human reviews intermediate results.
    UserReview,
    /// The assistant corrects detected problems.
    AiCorrection,
    /// The finished code is delivered.
    FinalDelivery,
}

impl PipelineStage {
    /// All stages in pipeline order.
    pub const ALL: [PipelineStage; 5] = [
        PipelineStage::UserRequest,
        PipelineStage::AiValidation,
        PipelineStage::UserReview,
        PipelineStage::AiCorrection,
        PipelineStage::FinalDelivery,
    ];

    /// Returns the fixed ordinal (0-4) of this stage.
    pub fn ordinal(self) -> usize {
        match self {
            PipelineStage::UserRequest => 0,
            PipelineStage::AiValidation => 1,
            PipelineStage::UserReview => 2,
            PipelineStage::AiCorrection => 3,
            PipelineStage::FinalDelivery => 4,
        }
    }

    /// Short display label for the stage.
    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::UserRequest => "request",
            PipelineStage::AiValidation => "validation",
            PipelineStage::UserReview => "review",
            PipelineStage::AiCorrection => "correction",
            PipelineStage::FinalDelivery => "delivery",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Known step labels and the stage each belongs to.
///
/// Labels not in this table map to `UserRequest` (ordinal 0). That is a
/// documented limitation carried over from the observed feed: a renamed
/// producer step silently reads as "request" until the table is updated.
const STAGE_TABLE: &[(&str, PipelineStage)] = &[
    ("User Request", PipelineStage::UserRequest),
    ("AI Validation", PipelineStage::AiValidation),
    ("Syntax Validation", PipelineStage::AiValidation),
    ("Logic Validation", PipelineStage::AiValidation),
    ("Security Validation", PipelineStage::AiValidation),
    ("Test Execution", PipelineStage::AiValidation),
    ("User Review", PipelineStage::UserReview),
    ("AI Correction", PipelineStage::AiCorrection),
    ("Code Delivery", PipelineStage::FinalDelivery),
];

/// Maps a step label to its pipeline stage.
pub fn stage_for_step(step: &str) -> PipelineStage {
    STAGE_TABLE
        .iter()
        .find(|(label, _)| *label == step)
        .map(|(_, stage)| *stage)
        .unwrap_or(PipelineStage::UserRequest)
}

/// Derived stage progress for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepState {
    /// The stage the latest event belongs to.
    pub current_stage: PipelineStage,

    /// Stages progressed past, plus the current stage once its own
    /// completion condition is met. "Completed" means "progressed past",
    /// not "verified successful".
    pub completed_stages: BTreeSet<PipelineStage>,
}

impl StepState {
    /// Returns true if the given stage counts as completed.
    pub fn is_completed(&self, stage: PipelineStage) -> bool {
        self.completed_stages.contains(&stage)
    }
}

impl Default for StepState {
    fn default() -> Self {
        Self {
            current_stage: PipelineStage::UserRequest,
            completed_stages: BTreeSet::new(),
        }
    }
}

/// Classifies a session log into its current stage progress.
///
/// Only the last event selects `current_stage`; an empty log yields
/// `UserRequest` with nothing completed. Total over any well-formed log -
/// unknown step labels classify silently, nothing errors.
///
/// The current stage joins the completed set when its event reports
/// `passed`; the terminal Code Delivery event is exactly that stage's
/// passed event, so the one rule covers both completion conditions.
pub fn classify(log: &[ValidationEvent]) -> StepState {
    let Some(last) = log.last() else {
        return StepState::default();
    };

    let current_stage = stage_for_step(&last.step);

    let mut completed_stages: BTreeSet<PipelineStage> = PipelineStage::ALL
        .iter()
        .copied()
        .filter(|s| s.ordinal() < current_stage.ordinal())
        .collect();

    if last.status == EventStatus::Passed {
        completed_stages.insert(current_stage);
    }

    StepState {
        current_stage,
        completed_stages,
    }
}
