//! Plan enumerations and defaults.

use crate::labels::labelled_enum;

/// Billing interval multiplier used when a create request omits it.
pub const DEFAULT_INTERVAL: i32 = 1;

labelled_enum! {
    /// Direction of money movement for a plan.
    PlanType ("plan_type") {
        /// Customers are charged.
        Charge => "charge",
        /// Customers are paid out.
        Payout => "payout",
    }
}

labelled_enum! {
    /// Base period of a plan; the effective period is `frequency * interval`.
    Frequency ("frequency") {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn plan_type_parses_known_labels() {
        assert_eq!("charge".parse::<PlanType>().unwrap(), PlanType::Charge);
        assert_eq!("payout".parse::<PlanType>().unwrap(), PlanType::Payout);
    }

    #[test]
    fn frequency_round_trips_through_label() {
        for label in Frequency::LABELS {
            let parsed: Frequency = label.parse().unwrap();
            assert_eq!(parsed.as_str(), *label);
        }
    }

    #[test]
    fn unknown_frequency_reports_kind_and_choices() {
        let err = "biannual".parse::<Frequency>().unwrap_err();
        assert_eq!(err.kind, "frequency");
        assert_eq!(err.value, "biannual");
        assert_eq!(err.expected, "daily, weekly, monthly, yearly");
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_matches!("Charge".parse::<PlanType>(), Err(_));
    }

    #[test]
    fn serializes_as_lowercase_label() {
        let json = serde_json::to_string(&Frequency::Monthly).unwrap();
        assert_eq!(json, "\"monthly\"");
    }
}
