use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Debit or credit side of a journal entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntrySide {
    Debit,
    Credit,
}

/// Consumption-tax category attached to a journal entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaxType {
    Standard,
    Reduced,
    Exempt,
    NonTaxable,
}

/// One debit or credit line of a balanced transaction.
///
/// The entry's accounting classification is derived through its sub-account;
/// it is never stored on the entry itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub sub_account_id: Uuid,
    pub side: EntrySide,
    pub amount: i64,
    #[serde(default)]
    pub tax_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<TaxType>,
    #[serde(default = "JournalEntry::effective_default")]
    pub is_effective: bool,
}

impl JournalEntry {
    pub fn new(sub_account_id: Uuid, side: EntrySide, amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            sub_account_id,
            side,
            amount,
            tax_amount: 0,
            tax_type: None,
            is_effective: true,
        }
    }

    pub fn with_tax(mut self, tax_amount: i64, tax_type: Option<TaxType>) -> Self {
        self.tax_amount = tax_amount;
        self.tax_type = tax_type;
        self
    }

    pub fn effective_default() -> bool {
        true
    }
}

/// A balanced group of journal entries representing one economic event,
/// numbered sequentially within its fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub fiscal_year_id: Uuid,
    pub entry_number: u32,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub is_opening_entry: bool,
    #[serde(default)]
    pub is_adjusting_entry: bool,
    #[serde(default)]
    pub is_planned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_transaction_plan_id: Option<Uuid>,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
}

impl Transaction {
    /// Human-facing number, e.g. `2025-0031` for entry 31 of fiscal year 2025.
    pub fn display_number(&self, year: i32) -> String {
        format!("{}-{:04}", year, self.entry_number)
    }

    pub fn debit_total(&self) -> i64 {
        self.side_total(EntrySide::Debit)
    }

    pub fn credit_total(&self) -> i64 {
        self.side_total(EntrySide::Credit)
    }

    fn side_total(&self, side: EntrySide) -> i64 {
        self.entries
            .iter()
            .filter(|entry| entry.side == side)
            .map(|entry| entry.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transaction() -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            fiscal_year_id: Uuid::new_v4(),
            entry_number: 31,
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            description: "消耗品の購入".into(),
            remarks: None,
            is_opening_entry: false,
            is_adjusting_entry: false,
            is_planned: false,
            recurring_transaction_plan_id: None,
            entries: vec![
                JournalEntry::new(Uuid::new_v4(), EntrySide::Debit, 3000),
                JournalEntry::new(Uuid::new_v4(), EntrySide::Credit, 3000),
            ],
        }
    }

    #[test]
    fn display_number_zero_pads_to_four_digits() {
        let transaction = sample_transaction();
        assert_eq!(transaction.display_number(2025), "2025-0031");
    }

    #[test]
    fn side_totals_exclude_the_other_side() {
        let transaction = sample_transaction();
        assert_eq!(transaction.debit_total(), 3000);
        assert_eq!(transaction.credit_total(), 3000);
    }
}
