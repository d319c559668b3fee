pub mod form;
pub mod validation;

pub use form::{FieldKind, FormField, ProfileForm};
pub use validation::{validate_form, FormError};

use serde::{Deserialize, Serialize};

/// A validated financial profile, ready for scoring.
///
/// Only built through [`validate_form`], so every field is present and
/// inside its input bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub age: u32,
    pub monthly_income: f64,
    pub total_loan_amount: f64,
    pub loan_tenure: u32, // months
    pub credit_utilization: f64, // percent, 0-100
    pub missed_payments: u32,
    pub active_loans: u32,
    pub credit_history_length: u32, // years
}
