//! Pure schema validation for registrar inputs.
//!
//! Validation is kept apart from persistence: these functions only read the
//! business unit and return field-keyed findings, so the registrar's atomic
//! append stays free of validation branching.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{BusinessUnit, EntrySide, TaxType};
use crate::errors::ValidationErrors;

pub const MAX_DESCRIPTION_LENGTH: usize = 255;

/// Raw transaction attributes as supplied by a caller.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub remarks: Option<String>,
    pub is_opening_entry: bool,
    pub is_adjusting_entry: bool,
    pub is_planned: bool,
    pub recurring_transaction_plan_id: Option<Uuid>,
}

impl TransactionInput {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// Raw journal entry attributes as supplied by a caller.
#[derive(Debug, Clone, Default)]
pub struct JournalEntryInput {
    pub sub_account_id: Option<Uuid>,
    pub side: Option<EntrySide>,
    pub amount: Option<i64>,
    pub tax_amount: Option<i64>,
    pub tax_type: Option<TaxType>,
}

impl JournalEntryInput {
    pub fn new(sub_account_id: Uuid, side: EntrySide, amount: i64) -> Self {
        Self {
            sub_account_id: Some(sub_account_id),
            side: Some(side),
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn with_tax(mut self, tax_amount: i64, tax_type: Option<TaxType>) -> Self {
        self.tax_amount = Some(tax_amount);
        self.tax_type = tax_type;
        self
    }

    /// Tax amount with the documented default: 0 when a tax type is present
    /// but no amount was supplied.
    pub fn resolved_tax_amount(&self) -> i64 {
        self.tax_amount.unwrap_or(0)
    }
}

/// Checks the transaction attribute schema against the business unit.
pub fn validate_transaction(unit: &BusinessUnit, input: &TransactionInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if input.date.is_none() {
        errors.push("date", "is required");
    }
    match input.description.as_deref() {
        None => errors.push("description", "is required"),
        Some(description) if description.trim().is_empty() => {
            errors.push("description", "is required");
        }
        Some(description) if description.chars().count() > MAX_DESCRIPTION_LENGTH => {
            errors.push("description", "must be 255 characters or fewer");
        }
        Some(_) => {}
    }
    if let Some(plan_id) = input.recurring_transaction_plan_id {
        if unit.plan(plan_id).is_none() {
            errors.push(
                "recurring_transaction_plan_id",
                "must reference an existing plan",
            );
        }
    }
    errors
}

/// Checks each journal entry's schema; fields are keyed as `entries[i].field`.
pub fn validate_entries(unit: &BusinessUnit, inputs: &[JournalEntryInput]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (index, input) in inputs.iter().enumerate() {
        let field = |name: &str| format!("entries[{index}].{name}");
        match input.sub_account_id {
            None => errors.push(field("sub_account_id"), "is required"),
            Some(id) if unit.sub_account(id).is_none() => {
                errors.push(field("sub_account_id"), "must reference an existing sub-account");
            }
            Some(_) => {}
        }
        if input.side.is_none() {
            errors.push(field("type"), "is required");
        }
        match input.amount {
            None => errors.push(field("amount"), "is required"),
            Some(amount) if amount < 1 => {
                errors.push(field("amount"), "must be a positive integer");
            }
            Some(_) => {}
        }
        if input.resolved_tax_amount() < 0 {
            errors.push(field("tax_amount"), "must not be negative");
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountType;

    fn seeded_unit() -> (BusinessUnit, Uuid) {
        let mut unit = BusinessUnit::new("Book");
        let cash = unit.create_account("現金", AccountType::Asset).unwrap();
        let sub = unit.account(cash).unwrap().sub_accounts[0].id;
        (unit, sub)
    }

    #[test]
    fn missing_date_and_description_are_both_reported() {
        let (unit, _) = seeded_unit();
        let errors = validate_transaction(&unit, &TransactionInput::default());
        assert!(errors.contains_field("date"));
        assert!(errors.contains_field("description"));
    }

    #[test]
    fn description_length_is_bounded() {
        let (unit, _) = seeded_unit();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let input = TransactionInput::new(date, "あ".repeat(256));
        let errors = validate_transaction(&unit, &input);
        assert!(errors.contains_field("description"));

        let input = TransactionInput::new(date, "あ".repeat(255));
        assert!(validate_transaction(&unit, &input).is_empty());
    }

    #[test]
    fn unknown_plan_reference_is_rejected() {
        let (unit, _) = seeded_unit();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut input = TransactionInput::new(date, "家賃");
        input.recurring_transaction_plan_id = Some(Uuid::new_v4());
        let errors = validate_transaction(&unit, &input);
        assert!(errors.contains_field("recurring_transaction_plan_id"));
    }

    #[test]
    fn entry_errors_are_keyed_by_index() {
        let (unit, sub) = seeded_unit();
        let entries = vec![
            JournalEntryInput::new(sub, EntrySide::Debit, 1000),
            JournalEntryInput {
                sub_account_id: Some(Uuid::new_v4()),
                side: None,
                amount: Some(0),
                tax_amount: None,
                tax_type: None,
            },
        ];
        let errors = validate_entries(&unit, &entries);
        assert!(errors.contains_field("entries[1].sub_account_id"));
        assert!(errors.contains_field("entries[1].type"));
        assert!(errors.contains_field("entries[1].amount"));
        assert!(!errors.contains_field("entries[0].amount"));
    }

    #[test]
    fn tax_amount_defaults_to_zero_when_tax_type_given() {
        let (unit, sub) = seeded_unit();
        let mut entry = JournalEntryInput::new(sub, EntrySide::Debit, 1000);
        entry.tax_type = Some(TaxType::Standard);
        assert_eq!(entry.resolved_tax_amount(), 0);
        assert!(validate_entries(&unit, &[entry]).is_empty());
    }
}
