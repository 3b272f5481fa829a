//! Request bodies accepted by the API, validated with `validator`.
//!
//! Each form turns itself into a store input only after every field checks
//! out; all problems are reported together as [`ValidationErrors`].

use std::borrow::Cow;
use std::str::FromStr;

use billy_core::labels::UnknownLabel;
use billy_core::plan::{Frequency, PlanType, DEFAULT_INTERVAL};
use billy_core::types::Guid;
use billy_db::models::plan::CreatePlan;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/plans`.
///
/// Enum fields are taken as raw strings so an unknown label becomes a field
/// error instead of a body deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PlanCreateForm {
    #[validate(required(message = "plan_type is required"))]
    pub plan_type: Option<String>,

    #[validate(
        required(message = "amount is required"),
        range(min = 1, message = "amount must be at least 1")
    )]
    pub amount: Option<i64>,

    #[validate(required(message = "frequency is required"))]
    pub frequency: Option<String>,

    #[validate(range(min = 1, message = "interval must be at least 1"))]
    pub interval: Option<i32>,
}

impl PlanCreateForm {
    /// Validate the form and build the store input for `company_guid`.
    ///
    /// A missing or null `interval` defaults to [`DEFAULT_INTERVAL`].
    pub fn into_create_plan(self, company_guid: Guid) -> Result<CreatePlan, ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_default();

        let plan_type = parse_label::<PlanType>(&mut errors, "plan_type", self.plan_type.as_deref());
        let frequency =
            parse_label::<Frequency>(&mut errors, "frequency", self.frequency.as_deref());

        match (plan_type, frequency, self.amount) {
            (Some(plan_type), Some(frequency), Some(amount)) if errors.is_empty() => {
                Ok(CreatePlan {
                    company_guid,
                    plan_type,
                    amount,
                    frequency,
                    interval: self.interval.unwrap_or(DEFAULT_INTERVAL),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Parse an optional label, recording a `choice` error on failure.
///
/// A missing value is left to the `required` rule.
fn parse_label<T>(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) -> Option<T>
where
    T: FromStr<Err = UnknownLabel>,
{
    match value?.parse() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            errors.add(field, field_error("choice", err.to_string()));
            None
        }
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

// ---------------------------------------------------------------------------
// Company
// ---------------------------------------------------------------------------

/// Body of `POST /api/v1/companies`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CompanyCreateForm {
    #[validate(
        required(message = "name is required"),
        length(max = 128, message = "name must be at most 128 characters")
    )]
    pub name: Option<String>,
}

impl CompanyCreateForm {
    /// Validate the form and return the trimmed company name.
    pub fn into_name(self) -> Result<String, ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_default();

        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        // A missing name is already reported by `required`.
        if name.is_empty() && self.name.is_some() {
            errors.add("name", field_error("required", "name is required".into()));
        }

        if errors.is_empty() {
            Ok(name.to_string())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn plan_form(plan_type: &str, amount: i64, frequency: &str) -> PlanCreateForm {
        PlanCreateForm {
            plan_type: Some(plan_type.into()),
            amount: Some(amount),
            frequency: Some(frequency.into()),
            interval: None,
        }
    }

    fn failed_fields(errors: &ValidationErrors) -> Vec<String> {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn interval_defaults_to_one() {
        let input = plan_form("charge", 1000, "monthly")
            .into_create_plan("CP1".into())
            .unwrap();
        assert_eq!(
            input,
            CreatePlan {
                company_guid: "CP1".into(),
                plan_type: PlanType::Charge,
                amount: 1000,
                frequency: Frequency::Monthly,
                interval: 1,
            }
        );
    }

    #[test]
    fn explicit_interval_is_kept() {
        let mut form = plan_form("payout", 5, "weekly");
        form.interval = Some(2);
        let input = form.into_create_plan("CP1".into()).unwrap();
        assert_eq!(input.interval, 2);
        assert_eq!(input.plan_type, PlanType::Payout);
    }

    #[test]
    fn unknown_frequency_is_a_field_error() {
        let errors = plan_form("charge", 1000, "biannual")
            .into_create_plan("CP1".into())
            .unwrap_err();
        assert_eq!(failed_fields(&errors), vec!["frequency".to_string()]);

        let message = errors.field_errors()["frequency"][0]
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap();
        assert!(message.contains("biannual"), "{message}");
        assert!(message.contains("daily, weekly, monthly, yearly"), "{message}");
    }

    #[test]
    fn every_problem_is_reported_at_once() {
        let form = PlanCreateForm {
            plan_type: Some("gift".into()),
            amount: Some(0),
            frequency: None,
            interval: Some(0),
        };
        let errors = form.into_create_plan("CP1".into()).unwrap_err();
        assert_eq!(
            failed_fields(&errors),
            vec!["amount", "frequency", "interval", "plan_type"]
        );
    }

    #[test]
    fn empty_form_requires_everything_but_interval() {
        let errors = PlanCreateForm::default()
            .into_create_plan("CP1".into())
            .unwrap_err();
        assert_eq!(
            failed_fields(&errors),
            vec!["amount", "frequency", "plan_type"]
        );
    }

    #[test]
    fn company_name_is_trimmed() {
        let form = CompanyCreateForm {
            name: Some("  Acme  ".into()),
        };
        assert_eq!(form.into_name().unwrap(), "Acme");
    }

    #[test]
    fn blank_or_long_company_name_is_rejected() {
        let blank = CompanyCreateForm {
            name: Some("   ".into()),
        };
        assert_matches!(blank.into_name(), Err(errors) if failed_fields(&errors) == vec!["name"]);

        let long = CompanyCreateForm {
            name: Some("x".repeat(129)),
        };
        assert_matches!(long.into_name(), Err(errors) if failed_fields(&errors) == vec!["name"]);
    }

    #[test]
    fn missing_company_name_is_a_field_error() {
        let errors = CompanyCreateForm::default().into_name().unwrap_err();
        assert_eq!(failed_fields(&errors), vec!["name"]);
        assert_eq!(errors.field_errors()["name"].len(), 1);
    }
}
