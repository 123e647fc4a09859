//! Five-step pitch wizard.
//!
//! The server keeps no wizard state: every field travels in the form on each
//! request and the wizard is rebuilt from it. `next` is guarded by the current
//! step's required fields; `back` never is.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use ezra_common::Category;

pub const SUBMITTED_MESSAGE: &str =
    "Pitch submitted successfully! The GreenLight team will review within 2 weeks.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PitchStep {
    ProjectContext,
    ResearchQuestion,
    Methodology,
    PartnersResources,
    SuccessMetrics,
}

impl PitchStep {
    pub const ALL: [PitchStep; 5] = [
        PitchStep::ProjectContext,
        PitchStep::ResearchQuestion,
        PitchStep::Methodology,
        PitchStep::PartnersResources,
        PitchStep::SuccessMetrics,
    ];

    /// 1-based step number as shown in the progress bar.
    pub fn number(self) -> u8 {
        match self {
            PitchStep::ProjectContext => 1,
            PitchStep::ResearchQuestion => 2,
            PitchStep::Methodology => 3,
            PitchStep::PartnersResources => 4,
            PitchStep::SuccessMetrics => 5,
        }
    }

    /// Out-of-range numbers clamp to the nearest step.
    pub fn from_number(n: u8) -> Self {
        match n {
            0 | 1 => PitchStep::ProjectContext,
            2 => PitchStep::ResearchQuestion,
            3 => PitchStep::Methodology,
            4 => PitchStep::PartnersResources,
            _ => PitchStep::SuccessMetrics,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PitchStep::ProjectContext => "Project Context",
            PitchStep::ResearchQuestion => "Research Question",
            PitchStep::Methodology => "Methodology",
            PitchStep::PartnersResources => "Partners & Resources",
            PitchStep::SuccessMetrics => "Success Metrics",
        }
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(usize::from(self.number())).copied()
    }

    fn previous(self) -> Option<Self> {
        match self.number() {
            1 => None,
            n => Some(Self::from_number(n - 1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    Simple,
    Medium,
    Complex,
}

impl Timeline {
    pub const ALL: [Timeline; 3] = [Timeline::Simple, Timeline::Medium, Timeline::Complex];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "simple" => Some(Timeline::Simple),
            "medium" => Some(Timeline::Medium),
            "complex" => Some(Timeline::Complex),
            _ => None,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Timeline::Simple => "simple",
            Timeline::Medium => "medium",
            Timeline::Complex => "complex",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeline::Simple => "Simple & Quick (20-60 hours)",
            Timeline::Medium => "Medium Intensity (60-120 hours)",
            Timeline::Complex => "Complex & Long-term (120+ hours)",
        }
    }
}

/// Every wizard field, as posted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PitchDraft {
    pub project_identification: String,
    /// One of the category labels, e.g. `Health & Safety`.
    pub category: String,
    pub research_question: String,
    pub exploration_plan: String,
    pub timeline: String,
    pub resources: String,
    pub partners: String,
    pub success_measurement: String,
}

impl PitchDraft {
    /// Required fields on `step` that are blank or invalid, by form name.
    pub fn missing_fields(&self, step: PitchStep) -> Vec<&'static str> {
        let blank = |s: &str| s.trim().is_empty();
        let mut missing = Vec::new();
        match step {
            PitchStep::ProjectContext => {
                if blank(&self.project_identification) {
                    missing.push("project_identification");
                }
                if Category::from_label(&self.category).is_none() {
                    missing.push("category");
                }
            }
            PitchStep::ResearchQuestion => {
                if blank(&self.research_question) {
                    missing.push("research_question");
                }
            }
            PitchStep::Methodology => {
                if blank(&self.exploration_plan) {
                    missing.push("exploration_plan");
                }
                if Timeline::parse(&self.timeline).is_none() {
                    missing.push("timeline");
                }
            }
            PitchStep::PartnersResources => {
                if blank(&self.partners) {
                    missing.push("partners");
                }
            }
            PitchStep::SuccessMetrics => {
                if blank(&self.success_measurement) {
                    missing.push("success_measurement");
                }
            }
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("{} is missing: {}", step.title(), fields.join(", "))]
    MissingFields {
        step: PitchStep,
        fields: Vec<&'static str>,
    },
    #[error("pitches can only be submitted from the final step")]
    NotOnFinalStep,
}

#[derive(Debug, Clone)]
pub struct PitchReceipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PitchWizard {
    step: PitchStep,
    pub draft: PitchDraft,
}

impl Default for PitchWizard {
    fn default() -> Self {
        Self::new(PitchStep::ProjectContext, PitchDraft::default())
    }
}

impl PitchWizard {
    pub fn new(step: PitchStep, draft: PitchDraft) -> Self {
        Self { step, draft }
    }

    pub fn step(&self) -> PitchStep {
        self.step
    }

    pub fn is_final_step(&self) -> bool {
        self.step == PitchStep::SuccessMetrics
    }

    /// Advance one step when the current step's required fields are filled.
    /// A no-op on the final step.
    pub fn next(&mut self) -> Result<(), WizardError> {
        let fields = self.draft.missing_fields(self.step);
        if !fields.is_empty() {
            return Err(WizardError::MissingFields {
                step: self.step,
                fields,
            });
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(())
    }

    /// Go back one step. A no-op on the first step.
    pub fn back(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    /// Submit from the final step. Every step must validate; the first
    /// failing step is reported. The draft is neither reset nor stored.
    pub fn submit(&self) -> Result<PitchReceipt, WizardError> {
        if !self.is_final_step() {
            return Err(WizardError::NotOnFinalStep);
        }
        for step in PitchStep::ALL {
            let fields = self.draft.missing_fields(step);
            if !fields.is_empty() {
                return Err(WizardError::MissingFields { step, fields });
            }
        }

        let receipt = PitchReceipt {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            message: SUBMITTED_MESSAGE,
        };
        info!(receipt = %receipt.id, category = %self.draft.category, "Pitch submitted");
        Ok(receipt)
    }
}
