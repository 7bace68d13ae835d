//! Quote wizard state machine.
//!
//! Drives the four-step quote form: personal information, property details,
//! energy usage and a final review. Each step is validated before the wizard
//! moves on, previously entered data survives moving back, and the finished
//! quote is handed to the [`QuoteService`] exactly once.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::quote_dto::{
    CompleteQuoteRequest, EnergyInfoRequest, FieldError, PersonalInfoRequest, PropertyInfoRequest,
    QuoteResponse, StepRequest,
};
use crate::model::quote::{CompleteQuote, QuoteDraft, StoredQuote};
use crate::service::quote_service::QuoteService;
use crate::util::error::ServiceError;
use crate::util::quote::{
    estimate_savings_from_monthly_bill, property_type_label, roof_type_label, timeline_label,
};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Number of numbered steps; `Submitted` sits after the last one.
pub const TOTAL_STEPS: u8 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    PersonalInfo,
    PropertyInfo,
    EnergyInfo,
    Review,
    Submitted,
}

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal_info",
            Self::PropertyInfo => "property_info",
            Self::EnergyInfo => "energy_info",
            Self::Review => "review",
            Self::Submitted => "submitted",
        }
    }

    /// Convert a 1-based step number to a step.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::PersonalInfo),
            2 => Some(Self::PropertyInfo),
            3 => Some(Self::EnergyInfo),
            4 => Some(Self::Review),
            _ => None,
        }
    }

    /// 1-based step number; the terminal state has none.
    pub fn number(self) -> Option<u8> {
        match self {
            Self::PersonalInfo => Some(1),
            Self::PropertyInfo => Some(2),
            Self::EnergyInfo => Some(3),
            Self::Review => Some(4),
            Self::Submitted => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::PropertyInfo => "Property Details",
            Self::EnergyInfo => "Energy Usage",
            Self::Review => "Review & Submit",
            Self::Submitted => "Quote Submitted Successfully!",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Tell us about yourself",
            Self::PropertyInfo => "Information about your property",
            Self::EnergyInfo => "Your current energy situation",
            Self::Review => "Confirm your details",
            Self::Submitted => "We'll review your information and get back to you within 24 hours with a personalized quote.",
        }
    }

    /// The step `Advance` leads to. Review only moves on by submitting.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => Some(Self::PropertyInfo),
            Self::PropertyInfo => Some(Self::EnergyInfo),
            Self::EnergyInfo => Some(Self::Review),
            Self::Review | Self::Submitted => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::PropertyInfo => Some(Self::PersonalInfo),
            Self::EnergyInfo => Some(Self::PropertyInfo),
            Self::Review => Some(Self::EnergyInfo),
            Self::PersonalInfo | Self::Submitted => None,
        }
    }

    /// Progress bar percentage.
    pub fn progress(self) -> u8 {
        match self.number() {
            Some(n) => (u16::from(n) * 100 / u16::from(TOTAL_STEPS)) as u8,
            None => 100,
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Input and errors
// ---------------------------------------------------------------------------

/// Fields of one input step, tagged with the step they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepInput {
    PersonalInfo(PersonalInfoRequest),
    PropertyInfo(PropertyInfoRequest),
    EnergyInfo(EnergyInfoRequest),
}

impl StepInput {
    pub fn step(&self) -> WizardStep {
        match self {
            StepInput::PersonalInfo(_) => WizardStep::PersonalInfo,
            StepInput::PropertyInfo(_) => WizardStep::PropertyInfo,
            StepInput::EnergyInfo(_) => WizardStep::EnergyInfo,
        }
    }

    fn apply(&self, draft: &mut QuoteDraft) -> Result<(), Vec<FieldError>> {
        match self {
            StepInput::PersonalInfo(req) => merge(req, draft),
            StepInput::PropertyInfo(req) => merge(req, draft),
            StepInput::EnergyInfo(req) => merge(req, draft),
        }
    }
}

fn merge<R: StepRequest>(req: &R, draft: &mut QuoteDraft) -> Result<(), Vec<FieldError>> {
    req.check()?;
    req.apply_to(draft);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("Please correct the highlighted fields ({step})")]
    Validation { step: WizardStep, errors: Vec<FieldError> },
    #[error("Input for {got} does not match the current step {expected}")]
    StepMismatch { expected: WizardStep, got: WizardStep },
    #[error("Cannot {action} from {from}")]
    InvalidTransition { from: WizardStep, action: &'static str },
    #[error("Quote has already been submitted")]
    AlreadySubmitted,
    #[error("Quote submission is already in progress")]
    SubmissionInProgress,
    #[error("Failed to submit quote: {0}")]
    Persistence(String),
    #[error("Wizard session not found: {0}")]
    SessionNotFound(Uuid),
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Summary shown on the review step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReview {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub property_type: String,
    pub roof_type: String,
    pub timeline: String,
    pub monthly_bill: Option<f64>,
    pub additional_info: Option<String>,
    pub estimated_annual_savings: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub step: WizardStep,
    pub step_number: Option<u8>,
    pub total_steps: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub progress: u8,
    pub draft: QuoteDraft,
    pub submitting: bool,
    pub review: Option<QuoteReview>,
    pub submitted_quote: Option<QuoteResponse>,
    pub last_error: Option<String>,
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct QuoteWizard {
    step: WizardStep,
    draft: QuoteDraft,
    submitting: bool,
    submitted: Option<StoredQuote>,
    last_error: Option<String>,
}

impl QuoteWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &QuoteDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submitted(&self) -> Option<&StoredQuote> {
        self.submitted.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn ensure_idle(&self, action: &'static str) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if self.step == WizardStep::Submitted {
            return Err(WizardError::InvalidTransition { from: self.step, action });
        }
        Ok(())
    }

    /// Validate the current step's fields, merge them into the draft and move
    /// to the next step.
    pub fn advance(&mut self, input: StepInput) -> Result<WizardStep, WizardError> {
        self.ensure_idle("advance")?;
        let next = self
            .step
            .next()
            .ok_or(WizardError::InvalidTransition { from: self.step, action: "advance" })?;
        if input.step() != self.step {
            return Err(WizardError::StepMismatch { expected: self.step, got: input.step() });
        }

        input.apply(&mut self.draft).map_err(|errors| {
            let err = WizardError::Validation { step: self.step, errors };
            self.last_error = Some(err.to_string());
            err
        })?;
        self.step = next;
        self.last_error = None;
        Ok(next)
    }

    /// Go back one step, keeping everything entered so far.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_idle("retreat")?;
        let previous = self
            .step
            .previous()
            .ok_or(WizardError::InvalidTransition { from: self.step, action: "retreat" })?;
        self.step = previous;
        self.last_error = None;
        Ok(previous)
    }

    /// Re-validate every step and mark the wizard as submitting.
    ///
    /// Must be followed by [`QuoteWizard::complete_submission`] with the
    /// outcome of the insert.
    pub fn begin_submission(&mut self) -> Result<CompleteQuote, WizardError> {
        if self.step == WizardStep::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if self.step != WizardStep::Review {
            return Err(WizardError::InvalidTransition { from: self.step, action: "submit" });
        }

        let quote = CompleteQuoteRequest::from(&self.draft).into_complete().map_err(|errors| {
            let err = WizardError::Validation { step: self.step, errors };
            self.last_error = Some(err.to_string());
            err
        })?;
        self.submitting = true;
        self.last_error = None;
        Ok(quote)
    }

    pub fn complete_submission(
        &mut self,
        result: Result<StoredQuote, ServiceError>,
    ) -> Result<StoredQuote, WizardError> {
        self.submitting = false;
        match result {
            Ok(stored) => {
                self.step = WizardStep::Submitted;
                self.submitted = Some(stored.clone());
                Ok(stored)
            }
            Err(e) => {
                let err = WizardError::Persistence(e.message().to_string());
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn submit<S: QuoteService + ?Sized>(&mut self, service: &S) -> Result<StoredQuote, WizardError> {
        let quote = self.begin_submission()?;
        let result = service.submit_quote(quote).await;
        self.complete_submission(result)
    }

    pub fn review(&self) -> QuoteReview {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let code = |v: &Option<String>, label: fn(&str) -> &str| label(v.as_deref().unwrap_or_default()).to_string();
        QuoteReview {
            name: text(&self.draft.name),
            email: text(&self.draft.email),
            phone: text(&self.draft.phone),
            address: text(&self.draft.address),
            property_type: code(&self.draft.property_type, property_type_label),
            roof_type: code(&self.draft.roof_type, roof_type_label),
            timeline: code(&self.draft.timeline, timeline_label),
            monthly_bill: self.draft.energy_bill,
            additional_info: self.draft.additional_info.clone(),
            estimated_annual_savings: estimate_savings_from_monthly_bill(self.draft.energy_bill),
        }
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            step: self.step,
            step_number: self.step.number(),
            total_steps: TOTAL_STEPS,
            title: self.step.title(),
            description: self.step.description(),
            progress: self.step.progress(),
            draft: self.draft.clone(),
            submitting: self.submitting,
            review: (self.step == WizardStep::Review).then(|| self.review()),
            submitted_quote: self.submitted.clone().map(QuoteResponse::from),
            last_error: self.last_error.clone(),
        }
    }
}
