//! Savings estimation, display labels and the quick per-step presence check
//! used by the quote form.

use crate::model::quote::{PropertyType, QuoteDraft, RoofType, Timeline};

/// Share of the energy bill a solar installation is assumed to save.
pub const SAVINGS_RATE: f64 = 0.7;

/// Estimated savings for a bill, rounded half-up to the nearest integer.
///
/// Defined for non-negative bills; `0` yields `0`.
pub fn estimate_annual_savings(bill: f64) -> i64 {
    (bill * SAVINGS_RATE).round() as i64
}

/// Annual savings shown on the review step: the monthly bill over a year.
pub fn estimate_savings_from_monthly_bill(monthly_bill: Option<f64>) -> i64 {
    match monthly_bill {
        Some(bill) if bill != 0.0 => estimate_annual_savings(bill * 12.0),
        _ => 0,
    }
}

/// Display label for a timeline code, or the code itself if unknown.
pub fn timeline_label(code: &str) -> &str {
    code.parse::<Timeline>().map(|t| t.label()).unwrap_or(code)
}

/// Display label for a property type code, or the code itself if unknown.
pub fn property_type_label(code: &str) -> &str {
    code.parse::<PropertyType>().map(|p| p.label()).unwrap_or(code)
}

/// Display label for a roof type code, or the code itself if unknown.
pub fn roof_type_label(code: &str) -> &str {
    code.parse::<RoofType>().map(|r| r.label()).unwrap_or(code)
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Presence check that gates the "Next" button of each step.
///
/// This is intentionally looser than the per-field validation in
/// [`crate::dto::quote_dto`]: it only checks that the step's fields are
/// filled in. A zero energy bill counts as not filled in. Step numbers
/// outside `1..=3` never pass.
pub fn validate_quote_step(step: u32, draft: &QuoteDraft) -> bool {
    match step {
        1 => filled(&draft.name) && filled(&draft.email) && filled(&draft.phone),
        2 => filled(&draft.address) && filled(&draft.property_type) && filled(&draft.roof_type),
        3 => {
            let has_bill = draft.energy_bill.is_some_and(|b| b != 0.0 && !b.is_nan());
            has_bill && filled(&draft.timeline)
        }
        _ => false,
    }
}
