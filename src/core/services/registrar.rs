//! The single write gateway into the ledger.
//!
//! Every transaction — manual entry, opening balance, or a recurring plan
//! occurrence — passes through [`TransactionRegistrar::register`], which is
//! what guarantees the debit/credit balance invariant for every stored
//! transaction.

use uuid::Uuid;

use crate::core::validation::{
    validate_entries, validate_transaction, JournalEntryInput, TransactionInput,
};
use crate::domain::{BusinessUnit, EntrySide, JournalEntry, Transaction};
use crate::errors::{LedgerError, ValidationErrors};

pub struct TransactionRegistrar;

impl TransactionRegistrar {
    /// Validates and atomically appends a balanced transaction with its
    /// journal entries, assigning the next entry number within the fiscal
    /// year. On any failure nothing is stored.
    pub fn register(
        unit: &mut BusinessUnit,
        fiscal_year_id: Uuid,
        transaction: TransactionInput,
        entries: &[JournalEntryInput],
    ) -> Result<Transaction, LedgerError> {
        if unit.fiscal_year(fiscal_year_id).is_none() {
            return Err(LedgerError::Validation(ValidationErrors::single(
                "fiscal_year_id",
                "must reference an existing fiscal year",
            )));
        }
        validate_transaction(unit, &transaction).into_result()?;
        validate_entries(unit, entries).into_result()?;
        if entries.is_empty() {
            return Err(LedgerError::InvalidInput("no journal entries".into()));
        }

        let debit_total = side_total(entries, EntrySide::Debit);
        let credit_total = side_total(entries, EntrySide::Credit);
        if debit_total != credit_total {
            return Err(LedgerError::Imbalanced {
                debit_total,
                credit_total,
            });
        }

        // Validation passed for every row; from here the append is a single
        // exclusive mutation, so either all rows land or none do. The entry
        // number is read and used inside this same borrow (the max+1 critical
        // section).
        let entry_number = unit.next_entry_number(fiscal_year_id);
        let journal_entries = entries
            .iter()
            .map(|input| {
                JournalEntry::new(
                    input.sub_account_id.unwrap_or_default(),
                    input.side.unwrap_or(EntrySide::Debit),
                    input.amount.unwrap_or_default(),
                )
                .with_tax(input.resolved_tax_amount(), input.tax_type)
            })
            .collect();
        let stored = Transaction {
            id: Uuid::new_v4(),
            fiscal_year_id,
            entry_number,
            date: transaction.date.unwrap_or_default(),
            description: transaction.description.unwrap_or_default(),
            remarks: transaction.remarks,
            is_opening_entry: transaction.is_opening_entry,
            is_adjusting_entry: transaction.is_adjusting_entry,
            is_planned: transaction.is_planned,
            recurring_transaction_plan_id: transaction.recurring_transaction_plan_id,
            entries: journal_entries,
        };
        let result = stored.clone();
        unit.transactions.push(stored);
        unit.touch();
        tracing::debug!(
            entry_number,
            description = %result.description,
            "transaction registered"
        );
        Ok(result)
    }
}

fn side_total(entries: &[JournalEntryInput], side: EntrySide) -> i64 {
    entries
        .iter()
        .filter(|entry| entry.side == Some(side))
        .map(|entry| entry.amount.unwrap_or_default())
        .sum()
}
