use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::model::quote::{CompleteQuote, PropertyType, QuoteDraft, RoofType, StoredQuote, Timeline};

const PROPERTY_TYPE_MESSAGE: &str = "Please select a property type";
const ROOF_TYPE_MESSAGE: &str = "Please select a roof type";
const TIMELINE_MESSAGE: &str = "Please select a timeline";
const ENERGY_BILL_MESSAGE: &str = "Energy bill must be a positive number";

/// Order in which field errors are reported, matching the form layout.
const FIELD_ORDER: [&str; 9] = [
    "name",
    "email",
    "phone",
    "address",
    "property_type",
    "roof_type",
    "energy_bill",
    "timeline",
    "additional_info",
];

/// One failing field of a validated step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        FieldError { field: camel_case(field), message: message.to_string() }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER.iter().position(|f| *f == field).unwrap_or(FIELD_ORDER.len())
}

/// Flatten validator output into one entry per failing rule, in form order.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by_key(|(field, _)| field_rank(field));
    fields
        .into_iter()
        .flat_map(|(field, messages)| {
            messages.into_iter().map(move |m| FieldError::new(&field, &m))
        })
        .collect()
}

fn code_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_property_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<PropertyType>()
        .map(|_| ())
        .map_err(|_| code_error("property_type", PROPERTY_TYPE_MESSAGE))
}

fn validate_roof_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<RoofType>()
        .map(|_| ())
        .map_err(|_| code_error("roof_type", ROOF_TYPE_MESSAGE))
}

fn validate_timeline(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Timeline>()
        .map(|_| ())
        .map_err(|_| code_error("timeline", TIMELINE_MESSAGE))
}

/// A validated wizard step.
pub trait StepRequest: Validate {
    /// Run every field rule of the step and report the failing fields.
    fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate().map_err(|e| field_errors(&e))
    }

    /// Merge the step's fields into the draft.
    fn apply_to(&self, draft: &mut QuoteDraft);
}

// --- Step 1: personal information ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 10, message = "Please enter a valid phone number"))]
    pub phone: String,
}

impl StepRequest for PersonalInfoRequest {
    fn apply_to(&self, draft: &mut QuoteDraft) {
        draft.name = Some(self.name.clone());
        draft.email = Some(self.email.clone());
        draft.phone = Some(self.phone.clone());
    }
}

impl From<&QuoteDraft> for PersonalInfoRequest {
    fn from(draft: &QuoteDraft) -> Self {
        PersonalInfoRequest {
            name: draft.name.clone().unwrap_or_default(),
            email: draft.email.clone().unwrap_or_default(),
            phone: draft.phone.clone().unwrap_or_default(),
        }
    }
}

// --- Step 2: property information ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyInfoRequest {
    #[validate(length(min = 5, message = "Please enter a complete address"))]
    pub address: String,

    #[validate(custom(function = "validate_property_type"))]
    pub property_type: String,

    #[validate(custom(function = "validate_roof_type"))]
    pub roof_type: String,
}

impl StepRequest for PropertyInfoRequest {
    fn apply_to(&self, draft: &mut QuoteDraft) {
        draft.address = Some(self.address.clone());
        draft.property_type = Some(self.property_type.clone());
        draft.roof_type = Some(self.roof_type.clone());
    }
}

impl From<&QuoteDraft> for PropertyInfoRequest {
    fn from(draft: &QuoteDraft) -> Self {
        PropertyInfoRequest {
            address: draft.address.clone().unwrap_or_default(),
            property_type: draft.property_type.clone().unwrap_or_default(),
            roof_type: draft.roof_type.clone().unwrap_or_default(),
        }
    }
}

// --- Step 3: energy usage ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EnergyInfoRequest {
    #[validate(range(min = 0.0, message = "Energy bill must be a positive number"))]
    pub energy_bill: Option<f64>,

    #[validate(custom(function = "validate_timeline"))]
    pub timeline: String,

    pub additional_info: Option<String>,
}

impl StepRequest for EnergyInfoRequest {
    fn check(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };
        let bill_reported = errors.iter().any(|e| e.field == "energyBill");
        let bill_ok = self.energy_bill.is_some_and(f64::is_finite);
        if !bill_ok && !bill_reported {
            errors.insert(0, FieldError::new("energy_bill", ENERGY_BILL_MESSAGE));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn apply_to(&self, draft: &mut QuoteDraft) {
        draft.energy_bill = self.energy_bill;
        draft.timeline = Some(self.timeline.clone());
        draft.additional_info = self.additional_info.clone();
    }
}

impl From<&QuoteDraft> for EnergyInfoRequest {
    fn from(draft: &QuoteDraft) -> Self {
        EnergyInfoRequest {
            energy_bill: draft.energy_bill,
            timeline: draft.timeline.clone().unwrap_or_default(),
            additional_info: draft.additional_info.clone(),
        }
    }
}

// --- All steps at once ---

/// Every field of the three input steps, as sent by a one-shot submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompleteQuoteRequest {
    #[serde(flatten)]
    pub personal: PersonalInfoRequest,
    #[serde(flatten)]
    pub property: PropertyInfoRequest,
    #[serde(flatten)]
    pub energy: EnergyInfoRequest,
}

impl From<&QuoteDraft> for CompleteQuoteRequest {
    fn from(draft: &QuoteDraft) -> Self {
        CompleteQuoteRequest {
            personal: PersonalInfoRequest::from(draft),
            property: PropertyInfoRequest::from(draft),
            energy: EnergyInfoRequest::from(draft),
        }
    }
}

impl CompleteQuoteRequest {
    /// Validate the union of all steps and promote it to a [`CompleteQuote`].
    pub fn into_complete(self) -> Result<CompleteQuote, Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Err(e) = self.personal.check() {
            errors.extend(e);
        }
        if let Err(e) = self.property.check() {
            errors.extend(e);
        }
        if let Err(e) = self.energy.check() {
            errors.extend(e);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let property_type = self
            .property
            .property_type
            .parse::<PropertyType>()
            .map_err(|_| vec![FieldError::new("property_type", PROPERTY_TYPE_MESSAGE)])?;
        let roof_type = self
            .property
            .roof_type
            .parse::<RoofType>()
            .map_err(|_| vec![FieldError::new("roof_type", ROOF_TYPE_MESSAGE)])?;
        let timeline = self
            .energy
            .timeline
            .parse::<Timeline>()
            .map_err(|_| vec![FieldError::new("timeline", TIMELINE_MESSAGE)])?;
        let energy_bill = self
            .energy
            .energy_bill
            .ok_or_else(|| vec![FieldError::new("energy_bill", ENERGY_BILL_MESSAGE)])?;

        Ok(CompleteQuote {
            name: self.personal.name,
            email: self.personal.email,
            phone: self.personal.phone,
            address: self.property.address,
            property_type,
            roof_type,
            energy_bill,
            timeline,
            additional_info: self.energy.additional_info,
        })
    }
}

// --- Responses ---

/// A stored quote as returned over HTTP, with its id as a hex string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: String,
    #[serde(flatten)]
    pub quote: CompleteQuote,
    pub created_at: String,
    pub status: String,
}

impl From<StoredQuote> for QuoteResponse {
    fn from(stored: StoredQuote) -> Self {
        QuoteResponse {
            id: stored.id.to_hex(),
            quote: stored.quote,
            created_at: stored.created_at,
            status: stored.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCheckResponse {
    pub step: u32,
    pub valid: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsQuery {
    pub monthly_bill: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEstimate {
    pub monthly_bill: f64,
    pub annual_savings: i64,
}
