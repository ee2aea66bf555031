use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation errors for one step. Empty map = valid.
///
/// Keys are the serialized (camelCase) field names, values are the
/// human-readable messages shown inline next to the field.
pub type FieldErrors = BTreeMap<String, String>;

/// Identifier for one wizard step.
///
/// Steps form a fixed, totally-ordered sequence with no branching;
/// the order is the declaration order here and never changes after
/// wizard construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Personality,
    Knowledge,
}

impl StepId {
    /// All steps in wizard order.
    pub const ALL: [StepId; 2] = [StepId::Personality, StepId::Knowledge];

    /// Zero-based position of this step in the wizard sequence.
    pub fn ordinal(self) -> usize {
        match self {
            Self::Personality => 0,
            Self::Knowledge => 1,
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personality => write!(f, "personality"),
            Self::Knowledge => write!(f, "knowledge"),
        }
    }
}

/// How the agent phrases its replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationTone {
    Formal,
    Conversational,
    Casual,
}

impl Default for CommunicationTone {
    fn default() -> Self {
        Self::Conversational
    }
}

impl fmt::Display for CommunicationTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formal => write!(f, "formal"),
            Self::Conversational => write!(f, "conversational"),
            Self::Casual => write!(f, "casual"),
        }
    }
}

/// The agent's primary role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryFunction {
    Advisor,
    Assistant,
    Educator,
    Entertainer,
    TaskAutomator,
}

impl fmt::Display for PrimaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advisor => write!(f, "advisor"),
            Self::Assistant => write!(f, "assistant"),
            Self::Educator => write!(f, "educator"),
            Self::Entertainer => write!(f, "entertainer"),
            Self::TaskAutomator => write!(f, "task-automator"),
        }
    }
}

/// The fixed personality trait vocabulary the presentation layer renders
/// as checkboxes. `primary_traits` entries must come from this list.
pub const TRAIT_OPTIONS: [&str; 6] = [
    "Analytical",
    "Friendly",
    "Authoritative",
    "Supportive",
    "Neutral",
    "Enthusiastic",
];

/// Data for the personality step.
///
/// Slider levels (`formality_level`, `empathy_level`) are 0..=2 at the
/// input surface; the core neither clamps nor rejects out-of-range values
/// set programmatically (the input surface owns clamping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityData {
    /// Selected traits from [`TRAIT_OPTIONS`]; at least one is required.
    pub primary_traits: Vec<String>,
    pub communication_tone: CommunicationTone,
    pub formality_level: u8,
    pub empathy_level: u8,
    /// Required at validation time; `None` until the user picks one.
    pub primary_function: Option<PrimaryFunction>,
    /// Optional free text ("innovation, trust, simplicity").
    pub brand_values: Option<String>,
}

impl Default for PersonalityData {
    fn default() -> Self {
        Self {
            primary_traits: Vec::new(),
            communication_tone: CommunicationTone::Conversational,
            formality_level: 1,
            empathy_level: 1,
            primary_function: None,
            brand_values: None,
        }
    }
}

/// Data for the rules & knowledge step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeData {
    /// Behavioral rules for the agent; required non-empty.
    pub rules: String,
    /// Company background used to answer FAQs; required non-empty.
    pub company_information: String,
}

/// The aggregated payload handed to the submit collaborator.
///
/// Step namespaces are preserved so field names can never collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub personality: PersonalityData,
    pub knowledge: KnowledgeData,
}

/// Lifecycle of one website import attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    /// No import has been started.
    Idle,
    /// The background fetch is in flight.
    Running,
    /// The fetch completed and the knowledge field was written.
    Succeeded,
    /// The fetch failed; the knowledge field was left untouched.
    Failed,
    /// Cancelled by the user; a late result is discarded, never applied.
    Cancelled,
}

impl ImportStatus {
    /// Whether this status is terminal (no further transition is defined).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Visibility/lock state of the import dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    Closed,
    /// Open, no import in flight; close requests succeed.
    OpenIdle,
    /// Open with an import running; close requests are ignored.
    OpenBusy,
}

/// Overall wizard lifecycle, orthogonal to the active step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardPhase {
    /// A step is active and editable.
    Editing,
    /// The submit collaborator call is in flight.
    Submitting,
    /// The configuration was accepted. Terminal; the wizard freezes.
    Submitted,
}
