use std::fmt;

use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every field violation found by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts the accumulated findings into a `Result`.
    pub fn into_result(self) -> Result<(), LedgerError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(LedgerError::Validation(self))
        }
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Error type that captures every ledger failure mode.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Entries out of balance: debits {debit_total}, credits {credit_total}")]
    Imbalanced { debit_total: i64, credit_total: i64 },
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl LedgerError {
    /// Signed debit-minus-credit difference, available on imbalance errors.
    pub fn balance_difference(&self) -> Option<i64> {
        match self {
            LedgerError::Imbalanced {
                debit_total,
                credit_total,
            } => Some(debit_total - credit_total),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_field_and_message() {
        let mut errors = ValidationErrors::new();
        errors.push("date", "is required");
        errors.push("description", "must not be empty");
        assert_eq!(
            format!("{errors}"),
            "date: is required; description: must not be empty"
        );
        assert!(errors.contains_field("date"));
        assert!(!errors.contains_field("amount"));
    }

    #[test]
    fn imbalance_exposes_signed_difference() {
        let error = LedgerError::Imbalanced {
            debit_total: 1200,
            credit_total: 1000,
        };
        assert_eq!(error.balance_difference(), Some(200));
        assert!(LedgerError::InvalidInput("x".into())
            .balance_difference()
            .is_none());
    }
}
