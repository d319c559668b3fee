use serde::Serialize;

use crate::profile::FinancialProfile;

/// An improvement suggestion shown under the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tip {
    pub title: String,
    pub description: String,
}

impl Tip {
    fn new(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// Build the tip list for a profile.
///
/// Conditional tips come first in a fixed order; the two general tips are
/// always appended last, so the list is never shorter than two.
pub fn improvement_tips(profile: &FinancialProfile, dti_ratio: f64) -> Vec<Tip> {
    let mut tips = Vec::new();

    if profile.credit_utilization > 30.0 {
        tips.push(Tip::new(
            "Reduce Credit Utilization",
            format!(
                "Your current utilization is {}%. Aim for below 30% by paying down credit card balances.",
                profile.credit_utilization
            ),
        ));
    }

    if profile.missed_payments > 0 {
        tips.push(Tip::new(
            "Avoid Late Payments",
            format!(
                "You have {} missed payment(s). Set up automatic payments for at least the minimum amount due.",
                profile.missed_payments
            ),
        ));
    }

    if dti_ratio > 40.0 {
        tips.push(Tip::new(
            "Improve Debt-to-Income Ratio",
            format!(
                "Your DTI ratio is {:.1}%. Consider increasing income or reducing debt to get below 36%.",
                dti_ratio
            ),
        ));
    }

    if profile.active_loans > 3 {
        tips.push(Tip::new(
            "Consolidate Loans",
            format!(
                "You have {} active loans. Consider consolidating them for better management.",
                profile.active_loans
            ),
        ));
    }

    if profile.credit_history_length < 3 {
        tips.push(Tip::new(
            "Build Credit History",
            "Keep old accounts open and consider becoming an authorized user on established accounts.",
        ));
    }

    tips.push(Tip::new(
        "Monitor Credit Reports",
        "Regularly check all three credit reports for errors and dispute inaccuracies promptly.",
    ));
    tips.push(Tip::new(
        "Limit Hard Inquiries",
        "Space out credit applications to minimize hard inquiries on your report.",
    ));

    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_profile() -> FinancialProfile {
        FinancialProfile {
            age: 35,
            monthly_income: 100_000.0,
            total_loan_amount: 600_000.0,
            loan_tenure: 60,
            credit_utilization: 20.0,
            missed_payments: 0,
            active_loans: 1,
            credit_history_length: 10,
        }
    }

    fn titles(tips: &[Tip]) -> Vec<&str> {
        tips.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_only_general_tips() {
        let tips = improvement_tips(&quiet_profile(), 10.0);
        assert_eq!(
            titles(&tips),
            vec!["Monitor Credit Reports", "Limit Hard Inquiries"]
        );
    }

    #[test]
    fn test_all_tips_in_order() {
        let profile = FinancialProfile {
            credit_utilization: 80.0,
            missed_payments: 2,
            active_loans: 4,
            credit_history_length: 1,
            ..quiet_profile()
        };
        let tips = improvement_tips(&profile, 45.25);
        assert_eq!(
            titles(&tips),
            vec![
                "Reduce Credit Utilization",
                "Avoid Late Payments",
                "Improve Debt-to-Income Ratio",
                "Consolidate Loans",
                "Build Credit History",
                "Monitor Credit Reports",
                "Limit Hard Inquiries",
            ]
        );
    }

    #[test]
    fn test_descriptions_carry_values() {
        let profile = FinancialProfile {
            credit_utilization: 35.0,
            missed_payments: 3,
            active_loans: 6,
            ..quiet_profile()
        };
        let tips = improvement_tips(&profile, 41.26);
        assert!(tips[0].description.contains("35%"));
        assert!(tips[1].description.contains("3 missed payment(s)"));
        assert!(tips[2].description.contains("41.3%"));
        assert!(tips[3].description.contains("6 active loans"));
    }

    #[test]
    fn test_trigger_edges_are_strict() {
        let profile = FinancialProfile {
            credit_utilization: 30.0,
            active_loans: 3,
            credit_history_length: 3,
            ..quiet_profile()
        };
        let tips = improvement_tips(&profile, 40.0);
        assert_eq!(tips.len(), 2);
    }
}
