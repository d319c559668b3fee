use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a field accepts only whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Number,
}

/// The eight inputs of the loan form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Age,
    MonthlyIncome,
    TotalLoanAmount,
    LoanTenure,
    CreditUtilization,
    MissedPayments,
    ActiveLoans,
    CreditHistoryLength,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Age,
        FormField::MonthlyIncome,
        FormField::TotalLoanAmount,
        FormField::LoanTenure,
        FormField::CreditUtilization,
        FormField::MissedPayments,
        FormField::ActiveLoans,
        FormField::CreditHistoryLength,
    ];

    /// Storage key, matching the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Age => "age",
            FormField::MonthlyIncome => "monthlyIncome",
            FormField::TotalLoanAmount => "totalLoanAmount",
            FormField::LoanTenure => "loanTenure",
            FormField::CreditUtilization => "creditUtilization",
            FormField::MissedPayments => "missedPayments",
            FormField::ActiveLoans => "activeLoans",
            FormField::CreditHistoryLength => "creditHistoryLength",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::MonthlyIncome => "Monthly Income (₹)",
            FormField::TotalLoanAmount => "Total Loan Amount (₹)",
            FormField::LoanTenure => "Loan Tenure (months)",
            FormField::CreditUtilization => "Credit Utilization (%)",
            FormField::MissedPayments => "Missed Payments",
            FormField::ActiveLoans => "Active Loans",
            FormField::CreditHistoryLength => "Credit History Length (years)",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FormField::MonthlyIncome | FormField::TotalLoanAmount | FormField::CreditUtilization => {
                FieldKind::Number
            }
            _ => FieldKind::Integer,
        }
    }

    /// Inclusive input bounds. `None` as the upper bound means unbounded.
    pub fn bounds(&self) -> (f64, Option<f64>) {
        match self {
            FormField::Age => (18.0, Some(80.0)),
            FormField::MonthlyIncome => (0.0, None),
            FormField::TotalLoanAmount => (0.0, None),
            FormField::LoanTenure => (1.0, Some(360.0)),
            FormField::CreditUtilization => (0.0, Some(100.0)),
            FormField::MissedPayments => (0.0, Some(4.0)),
            FormField::ActiveLoans => (0.0, None),
            FormField::CreditHistoryLength => (0.0, Some(50.0)),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The loan form as entered: raw strings, exactly what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub age: String,
    pub monthly_income: String,
    pub total_loan_amount: String,
    pub loan_tenure: String,
    pub credit_utilization: String,
    pub missed_payments: String,
    pub active_loans: String,
    pub credit_history_length: String,
}

/// The form as first shown, pre-filled with a sample applicant.
impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            age: "35".to_string(),
            monthly_income: "75000".to_string(),
            total_loan_amount: "1500000".to_string(),
            loan_tenure: "60".to_string(),
            credit_utilization: "35".to_string(),
            missed_payments: "0".to_string(),
            active_loans: "2".to_string(),
            credit_history_length: "8".to_string(),
        }
    }
}

impl ProfileForm {
    /// The form after "Reset": every field empty except missed payments,
    /// which falls back to the first entry of its select list.
    pub fn cleared() -> Self {
        Self {
            age: String::new(),
            monthly_income: String::new(),
            total_loan_amount: String::new(),
            loan_tenure: String::new(),
            credit_utilization: String::new(),
            missed_payments: "0".to_string(),
            active_loans: String::new(),
            credit_history_length: String::new(),
        }
    }

    /// Reset this form in place.
    pub fn reset(&mut self) {
        *self = Self::cleared();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Age => &self.age,
            FormField::MonthlyIncome => &self.monthly_income,
            FormField::TotalLoanAmount => &self.total_loan_amount,
            FormField::LoanTenure => &self.loan_tenure,
            FormField::CreditUtilization => &self.credit_utilization,
            FormField::MissedPayments => &self.missed_payments,
            FormField::ActiveLoans => &self.active_loans,
            FormField::CreditHistoryLength => &self.credit_history_length,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Age => &mut self.age,
            FormField::MonthlyIncome => &mut self.monthly_income,
            FormField::TotalLoanAmount => &mut self.total_loan_amount,
            FormField::LoanTenure => &mut self.loan_tenure,
            FormField::CreditUtilization => &mut self.credit_utilization,
            FormField::MissedPayments => &mut self.missed_payments,
            FormField::ActiveLoans => &mut self.active_loans,
            FormField::CreditHistoryLength => &mut self.credit_history_length,
        };
        *slot = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_prefilled() {
        let form = ProfileForm::default();
        assert_eq!(form.age, "35");
        assert_eq!(form.total_loan_amount, "1500000");
        assert!(FormField::ALL.iter().all(|f| !form.get(*f).is_empty()));
    }

    #[test]
    fn test_reset_keeps_missed_payments_default() {
        let mut form = ProfileForm::default();
        form.set(FormField::MissedPayments, "3");
        form.reset();

        for field in FormField::ALL {
            if field == FormField::MissedPayments {
                assert_eq!(form.get(field), "0");
            } else {
                assert_eq!(form.get(field), "", "{} should be empty", field);
            }
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut form = ProfileForm::cleared();
        form.set(FormField::CreditUtilization, "42.5");
        assert_eq!(form.get(FormField::CreditUtilization), "42.5");
        assert_eq!(form.credit_utilization, "42.5");
    }

    #[test]
    fn test_serializes_with_form_keys() {
        let json = serde_json::to_value(ProfileForm::default()).unwrap();
        for field in FormField::ALL {
            assert!(json.get(field.key()).is_some(), "missing key {}", field.key());
        }
        assert_eq!(json["monthlyIncome"], "75000");
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(FormField::Age.kind(), FieldKind::Integer);
        assert_eq!(FormField::CreditUtilization.kind(), FieldKind::Number);
        assert_eq!(FormField::LoanTenure.bounds(), (1.0, Some(360.0)));
    }
}
