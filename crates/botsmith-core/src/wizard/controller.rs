//! The wizard state machine: step order, navigation gating, submission.

use std::future::Future;

use botsmith_types::error::{SinkError, SubmitError};
use botsmith_types::wizard::{AgentConfig, FieldErrors, StepId, WizardPhase};

use super::defaults::DEFAULT_FAQ;
use super::form::{SharedForm, StepFormState};
use super::schema::{KnowledgeSchema, PersonalitySchema};

/// External collaborator that persists the aggregated configuration.
///
/// The core treats it as opaque and all-or-nothing; it never retries.
/// Uses RPITIT consistent with all project traits.
pub trait ConfigSink: Send + Sync {
    fn submit(&self, config: AgentConfig) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Owns the ordered step sequence, the active step, and both step forms.
///
/// The step order is fixed at construction: personality, then knowledge.
/// Forms live for the wizard's lifetime -- navigating back and forward
/// never recreates them, so entered values persist. The knowledge form is
/// a `SharedForm` because a successful import writes into it out-of-band;
/// the personality form is exclusively owned.
pub struct WizardController {
    personality: StepFormState<PersonalitySchema>,
    knowledge: SharedForm<KnowledgeSchema>,
    active: usize,
    phase: WizardPhase,
}

impl WizardController {
    /// Create a wizard at the first step with default form values.
    pub fn new() -> Self {
        Self {
            personality: StepFormState::new(PersonalitySchema),
            knowledge: SharedForm::new(KnowledgeSchema),
            active: 0,
            phase: WizardPhase::Editing,
        }
    }

    pub fn active_step(&self) -> StepId {
        StepId::ALL[self.active]
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn step_count(&self) -> usize {
        StepId::ALL.len()
    }

    /// Handle to the knowledge form, for wiring up the import runner
    /// and for presentation-layer reads.
    pub fn knowledge_form(&self) -> SharedForm<KnowledgeSchema> {
        self.knowledge.clone()
    }

    /// Overwrite one field on the given step. Edits are never blocked by
    /// validation errors; after `Submitted` the wizard is frozen and
    /// edits are ignored.
    pub fn set_field(&mut self, step: StepId, field: &str, value: serde_json::Value) {
        if self.phase == WizardPhase::Submitted {
            tracing::debug!(step = %step, field, "edit ignored after submission");
            return;
        }
        match step {
            StepId::Personality => self.personality.set_field(field, value),
            StepId::Knowledge => self.knowledge.set_field(field, value),
        }
    }

    /// The given step's error map from its most recent validation run.
    pub fn errors(&self, step: StepId) -> FieldErrors {
        match step {
            StepId::Personality => self.personality.errors().clone(),
            StepId::Knowledge => self.knowledge.errors(),
        }
    }

    /// Reset `companyInformation` to the canned default FAQ.
    pub fn revert_company_information(&mut self) {
        self.set_field(
            StepId::Knowledge,
            "companyInformation",
            serde_json::Value::String(DEFAULT_FAQ.to_string()),
        );
    }

    /// Advance to the next step, gated on the active step's validation.
    ///
    /// Returns the newly active step, or `None` when navigation was
    /// blocked -- already on the final step, validation failed (the error
    /// map is now populated and visible), or the wizard is no longer
    /// editable.
    pub fn go_next(&mut self) -> Option<StepId> {
        if self.phase != WizardPhase::Editing || self.active + 1 >= StepId::ALL.len() {
            return None;
        }

        let step = self.active_step();
        let valid = match step {
            StepId::Personality => self.personality.validate(),
            StepId::Knowledge => self.knowledge.validate(),
        };
        if !valid {
            tracing::debug!(step = %step, "forward navigation blocked by validation");
            return None;
        }

        self.active += 1;
        tracing::debug!(step = %self.active_step(), "advanced to step");
        Some(self.active_step())
    }

    /// Go back one step. Never validation-gated; entered values on the
    /// step being left are preserved. Returns the newly active step, or
    /// `None` when already on the first step or no longer editable.
    pub fn go_back(&mut self) -> Option<StepId> {
        if self.phase != WizardPhase::Editing || self.active == 0 {
            return None;
        }
        self.active -= 1;
        tracing::debug!(step = %self.active_step(), "went back to step");
        Some(self.active_step())
    }

    /// Validate every step and, only if all pass, hand the aggregated
    /// payload to the sink. Legal from any step.
    ///
    /// Both steps are validated even when the first fails so that every
    /// error map is populated. On any failure the wizard stays on its
    /// current step and remains editable; on sink success it freezes in
    /// `Submitted`.
    pub async fn submit<S: ConfigSink>(&mut self, sink: &S) -> Result<(), SubmitError> {
        if self.phase == WizardPhase::Submitted {
            return Err(SubmitError::AlreadySubmitted);
        }

        let personality_ok = self.personality.validate();
        let knowledge_ok = self.knowledge.validate();
        if !personality_ok || !knowledge_ok {
            tracing::debug!(
                personality_ok,
                knowledge_ok,
                "submission blocked by validation"
            );
            return Err(SubmitError::Validation);
        }

        self.phase = WizardPhase::Submitting;
        let config = AgentConfig {
            personality: self.personality.values(),
            knowledge: self.knowledge.values(),
        };

        match sink.submit(config).await {
            Ok(()) => {
                self.phase = WizardPhase::Submitted;
                tracing::info!("configuration submitted");
                Ok(())
            }
            Err(err) => {
                self.phase = WizardPhase::Editing;
                tracing::warn!(error = %err, "submission rejected by sink");
                Err(SubmitError::Sink(err.0))
            }
        }
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}
