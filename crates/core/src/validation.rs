//! Input validation for lead, deal, activity and call-note payloads.
//!
//! Categorical lead fields (industry, budget range, ...) are free-form and
//! are not checked here; only the invariants the store relies on are.

use crate::error::CoreError;
use crate::types::Cents;

/// Inclusive bounds for percentage fields (probability, health score).
pub const MIN_PERCENTAGE: i32 = 0;
pub const MAX_PERCENTAGE: i32 = 100;

/// Largest accepted deal value: one trillion in whole units.
pub const MAX_DEAL_VALUE_CENTS: Cents = 100_000_000_000_000;

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

/// Reject an empty or whitespace-only text field.
pub fn validate_required_text(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate a company name: must contain something other than whitespace.
pub fn validate_company_name(name: &str) -> Result<(), CoreError> {
    validate_required_text(name, "company_name")
}

/// Validate that a percentage lies in `[0, 100]`.
pub fn validate_percentage(value: i32, field: &str) -> Result<(), CoreError> {
    if !(MIN_PERCENTAGE..=MAX_PERCENTAGE).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{field} must be between {MIN_PERCENTAGE} and {MAX_PERCENTAGE}, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a deal value in cents lies in `[0, MAX_DEAL_VALUE_CENTS]`.
pub fn validate_deal_value(value: Cents) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "value must be >= 0, got {value}"
        )));
    }
    if value > MAX_DEAL_VALUE_CENTS {
        return Err(CoreError::Validation(format!(
            "value must be <= {MAX_DEAL_VALUE_CENTS}, got {value}"
        )));
    }
    Ok(())
}

/// Validate a call duration in minutes.
pub fn validate_call_duration(minutes: i32) -> Result<(), CoreError> {
    if minutes < 0 {
        return Err(CoreError::Validation(format!(
            "duration must be >= 0, got {minutes}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Payload validators
// ---------------------------------------------------------------------------

/// Validate the optional deal fields shared by create and update.
///
/// `None` means the field was not supplied and is left to the default or
/// the stored value.
pub fn validate_deal_fields(
    company_name: Option<&str>,
    value: Option<Cents>,
    probability: Option<i32>,
    health_score: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(name) = company_name {
        validate_company_name(name)?;
    }
    if let Some(value) = value {
        validate_deal_value(value)?;
    }
    if let Some(p) = probability {
        validate_percentage(p, "probability")?;
    }
    if let Some(h) = health_score {
        validate_percentage(h, "health_score")?;
    }
    Ok(())
}

/// Validate an activity: the description is required.
pub fn validate_activity(description: &str) -> Result<(), CoreError> {
    validate_required_text(description, "description")
}

/// Validate a call note: a summary is required and the duration, when
/// given, must not be negative.
pub fn validate_call_note(summary: &str, duration: Option<i32>) -> Result<(), CoreError> {
    validate_required_text(summary, "summary")?;
    if let Some(minutes) = duration {
        validate_call_duration(minutes)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- validate_company_name ----------------------------------------------

    #[test]
    fn company_name_accepts_text() {
        assert!(validate_company_name("Acme Corporation").is_ok());
    }

    #[test]
    fn company_name_rejects_blank() {
        assert_matches!(validate_company_name(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_company_name("   "), Err(CoreError::Validation(_)));
    }

    // -- validate_percentage ------------------------------------------------

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(validate_percentage(0, "probability").is_ok());
        assert!(validate_percentage(100, "probability").is_ok());
    }

    #[test]
    fn percentage_out_of_range_names_field() {
        let err = validate_percentage(101, "health_score").unwrap_err();
        assert!(err.to_string().contains("health_score"));
        assert_matches!(validate_percentage(-1, "probability"), Err(CoreError::Validation(_)));
    }

    // -- validate_deal_value ------------------------------------------------

    #[test]
    fn deal_value_zero_accepted() {
        assert!(validate_deal_value(0).is_ok());
    }

    #[test]
    fn deal_value_negative_rejected() {
        assert_matches!(validate_deal_value(-1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn deal_value_cap_is_inclusive() {
        assert!(validate_deal_value(MAX_DEAL_VALUE_CENTS).is_ok());
        let err = validate_deal_value(4_611_686_018_427_387_904).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("value must be <="));
    }

    // -- validate_deal_fields -----------------------------------------------

    #[test]
    fn deal_fields_all_absent_is_ok() {
        assert!(validate_deal_fields(None, None, None, None).is_ok());
    }

    #[test]
    fn deal_fields_reject_first_bad_field() {
        let err = validate_deal_fields(Some("Acme"), Some(100), Some(150), Some(20)).unwrap_err();
        assert!(err.to_string().contains("probability"));
    }

    // -- activity / call note -----------------------------------------------

    #[test]
    fn activity_requires_description() {
        assert!(validate_activity("Sent proposal").is_ok());
        assert_matches!(validate_activity(" "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn call_note_rejects_negative_duration() {
        assert!(validate_call_note("Discovery call", Some(30)).is_ok());
        assert!(validate_call_note("Discovery call", None).is_ok());
        assert_matches!(
            validate_call_note("Discovery call", Some(-5)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn call_note_requires_summary() {
        assert_matches!(validate_call_note("", Some(10)), Err(CoreError::Validation(_)));
    }
}
