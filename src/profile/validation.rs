use std::fmt;

use super::form::{FieldKind, FormField, ProfileForm};
use super::FinancialProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// One or more fields were left empty. Fields are listed in form order.
    MissingFields(Vec<FormField>),
    InvalidNumber { field: FormField, value: String },
    OutOfRange { field: FormField, value: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::MissingFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|field| field.key()).collect();
                write!(
                    f,
                    "Please fill in all required fields (missing: {})",
                    names.join(", ")
                )
            }
            FormError::InvalidNumber { field, value } => {
                let expected = match field.kind() {
                    FieldKind::Integer => "a whole number",
                    FieldKind::Number => "a number",
                };
                write!(f, "{}: '{}' is not {}", field, value, expected)
            }
            FormError::OutOfRange { field, value } => match field.bounds() {
                (min, Some(max)) => {
                    write!(f, "{}: {} is outside {}-{}", field, value, min, max)
                }
                (min, None) => write!(f, "{}: {} must be at least {}", field, value, min),
            },
        }
    }
}

impl std::error::Error for FormError {}

fn in_bounds(field: FormField, value: f64) -> bool {
    let (min, max) = field.bounds();
    value >= min && max.map_or(true, |max| value <= max)
}

fn parse_integer(form: &ProfileForm, field: FormField, errors: &mut Vec<FormError>) -> Option<u32> {
    let raw = form.get(field).trim();
    match raw.parse::<u32>() {
        Ok(value) if in_bounds(field, f64::from(value)) => Some(value),
        Ok(_) => {
            errors.push(FormError::OutOfRange {
                field,
                value: raw.to_string(),
            });
            None
        }
        // "-3" parses as an integer, just not an unsigned one
        Err(_) if raw.parse::<i64>().is_ok() => {
            errors.push(FormError::OutOfRange {
                field,
                value: raw.to_string(),
            });
            None
        }
        Err(_) => {
            errors.push(FormError::InvalidNumber {
                field,
                value: raw.to_string(),
            });
            None
        }
    }
}

fn parse_number(form: &ProfileForm, field: FormField, errors: &mut Vec<FormError>) -> Option<f64> {
    let raw = form.get(field).trim();
    match raw.parse::<f64>() {
        Ok(value) if !value.is_finite() => {
            errors.push(FormError::InvalidNumber {
                field,
                value: raw.to_string(),
            });
            None
        }
        Ok(value) if in_bounds(field, value) => Some(value),
        Ok(_) => {
            errors.push(FormError::OutOfRange {
                field,
                value: raw.to_string(),
            });
            None
        }
        Err(_) => {
            errors.push(FormError::InvalidNumber {
                field,
                value: raw.to_string(),
            });
            None
        }
    }
}

/// Validate a submitted form and parse it into a [`FinancialProfile`].
///
/// Empty fields abort validation on their own, like the required-field check
/// of the form. Otherwise every parse and range problem is returned at once.
pub fn validate_form(form: &ProfileForm) -> Result<FinancialProfile, Vec<FormError>> {
    let missing: Vec<FormField> = FormField::ALL
        .into_iter()
        .filter(|field| form.get(*field).trim().is_empty())
        .collect();
    if !missing.is_empty() {
        return Err(vec![FormError::MissingFields(missing)]);
    }

    let mut errors = Vec::new();
    let age = parse_integer(form, FormField::Age, &mut errors);
    let monthly_income = parse_number(form, FormField::MonthlyIncome, &mut errors);
    let total_loan_amount = parse_number(form, FormField::TotalLoanAmount, &mut errors);
    let loan_tenure = parse_integer(form, FormField::LoanTenure, &mut errors);
    let credit_utilization = parse_number(form, FormField::CreditUtilization, &mut errors);
    let missed_payments = parse_integer(form, FormField::MissedPayments, &mut errors);
    let active_loans = parse_integer(form, FormField::ActiveLoans, &mut errors);
    let credit_history_length = parse_integer(form, FormField::CreditHistoryLength, &mut errors);

    match (
        age,
        monthly_income,
        total_loan_amount,
        loan_tenure,
        credit_utilization,
        missed_payments,
        active_loans,
        credit_history_length,
    ) {
        (
            Some(age),
            Some(monthly_income),
            Some(total_loan_amount),
            Some(loan_tenure),
            Some(credit_utilization),
            Some(missed_payments),
            Some(active_loans),
            Some(credit_history_length),
        ) if errors.is_empty() => Ok(FinancialProfile {
            age,
            monthly_income,
            total_loan_amount,
            loan_tenure,
            credit_utilization,
            missed_payments,
            active_loans,
            credit_history_length,
        }),
        _ => Err(errors),
    }
}

impl ProfileForm {
    pub fn validate(&self) -> Result<FinancialProfile, Vec<FormError>> {
        validate_form(self)
    }
}
