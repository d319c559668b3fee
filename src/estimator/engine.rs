use serde::Serialize;

use super::bands::{CreditBand, RiskLevel};
use super::factors::{
    apply_buckets, Bucket, ACTIVE_LOAN_BUCKETS, AGE_BUCKETS, DTI_BUCKETS, HISTORY_BUCKETS,
    MISSED_PAYMENT_POINTS, UTILIZATION_BUCKETS,
};
use super::tips::{improvement_tips, Tip};
use crate::profile::FinancialProfile;

pub const BASE_SCORE: f64 = 700.0;
pub const MIN_SCORE: u32 = 300;
pub const MAX_SCORE: u32 = 900;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Age", "Debt-to-Income"
    pub points: f64,         // Signed adjustment, 0 when no bucket matched
    pub description: String, // e.g. "35 matched '30-50'"
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    pub credit_band: CreditBand,
    pub risk_level: RiskLevel,
    pub credit_utilization: f64,
    pub debt_to_income_ratio: f64,
    pub tips: Vec<Tip>,
    pub breakdown: Vec<FactorContribution>,
}

impl ScoreResult {
    /// The closing sentence of the results view.
    pub fn summary(&self) -> String {
        format!(
            "Your credit score of {} falls into the {} category, indicating a {} risk level for lenders.",
            self.score,
            self.credit_band,
            self.risk_level.as_str().to_lowercase()
        )
    }
}

/// Monthly installment over monthly income, as a percentage.
///
/// Tenure and income are floored at 1 so that a zero never divides.
pub fn debt_to_income_ratio(profile: &FinancialProfile) -> f64 {
    let monthly_debt = profile.total_loan_amount / f64::from(profile.loan_tenure.max(1));
    monthly_debt / profile.monthly_income.max(1.0) * 100.0
}

fn bucket_factor(label: &str, value: f64, shown: String, buckets: &[Bucket]) -> FactorContribution {
    let result = apply_buckets(value, buckets);
    let description = match result.matched_range {
        Some(range) => format!("{} matched '{}'", shown, range),
        None => format!("{} is neutral", shown),
    };
    FactorContribution {
        label: label.to_string(),
        points: result.points,
        description,
    }
}

fn missed_payment_factor(missed_payments: u32) -> FactorContribution {
    FactorContribution {
        label: "Missed Payments".to_string(),
        points: MISSED_PAYMENT_POINTS * f64::from(missed_payments),
        description: format!("{} missed, {} each", missed_payments, MISSED_PAYMENT_POINTS),
    }
}

/// Estimate a score from the fixed linear heuristic (base 700, clamped to 300-900).
pub fn estimate(profile: &FinancialProfile) -> ScoreResult {
    let dti_ratio = debt_to_income_ratio(profile);

    let breakdown = vec![
        bucket_factor("Age", f64::from(profile.age), profile.age.to_string(), AGE_BUCKETS),
        bucket_factor("Debt-to-Income", dti_ratio, format!("{:.1}%", dti_ratio), DTI_BUCKETS),
        bucket_factor(
            "Credit Utilization",
            profile.credit_utilization,
            format!("{}%", profile.credit_utilization),
            UTILIZATION_BUCKETS,
        ),
        missed_payment_factor(profile.missed_payments),
        bucket_factor(
            "Active Loans",
            f64::from(profile.active_loans),
            profile.active_loans.to_string(),
            ACTIVE_LOAN_BUCKETS,
        ),
        bucket_factor(
            "Credit History",
            f64::from(profile.credit_history_length),
            format!("{}y", profile.credit_history_length),
            HISTORY_BUCKETS,
        ),
    ];

    let raw = BASE_SCORE + breakdown.iter().map(|f| f.points).sum::<f64>();
    let score = raw
        .round()
        .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u32;

    ScoreResult {
        score,
        credit_band: CreditBand::from_score(score),
        risk_level: RiskLevel::from_score(score),
        credit_utilization: profile.credit_utilization,
        debt_to_income_ratio: dti_ratio,
        tips: improvement_tips(profile, dti_ratio),
        breakdown,
    }
}
