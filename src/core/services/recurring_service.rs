//! Generation and lifecycle of planned transactions from recurring plans.

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use crate::core::services::registrar::TransactionRegistrar;
use crate::core::validation::{JournalEntryInput, TransactionInput};
use crate::domain::{BusinessUnit, EntrySide, FiscalYear, RecurringTransactionPlan, Transaction};
use crate::errors::LedgerError;

pub struct RecurringService;

impl RecurringService {
    /// Occurrence dates of `plan` inside the fiscal-year window, ascending.
    /// The plan's day-of-month is clamped to the last day of short months.
    pub fn occurrence_dates(
        plan: &RecurringTransactionPlan,
        fiscal_year: &FiscalYear,
    ) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut year = fiscal_year.start_date.year();
        let mut month = fiscal_year.start_date.month();
        loop {
            let month_start = match NaiveDate::from_ymd_opt(year, month, 1) {
                Some(date) => date,
                None => break,
            };
            if month_start > fiscal_year.end_date {
                break;
            }
            if plan.fires_in_month(month) {
                let day = plan.day_of_month.min(days_in_month(year, month));
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    if fiscal_year.contains(date) {
                        dates.push(date);
                    }
                }
            }
            if month == 12 {
                month = 1;
                year += 1;
            } else {
                month += 1;
            }
        }
        dates
    }

    /// Creates one planned transaction per occurrence date that does not
    /// already have one, via the registrar. Re-running for the same plan and
    /// fiscal year never duplicates: dates with an existing planned
    /// transaction for this plan are skipped silently.
    ///
    /// Each occurrence is its own atomic registration; the loop is not
    /// wrapped in a larger atomic unit, so occurrences registered before a
    /// failing one remain stored. Callers needing all-or-nothing bulk
    /// generation must wrap the call themselves.
    pub fn generate(
        unit: &mut BusinessUnit,
        plan_id: Uuid,
        fiscal_year_id: Uuid,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let plan = unit
            .plan(plan_id)
            .cloned()
            .ok_or_else(|| LedgerError::InvalidInput("recurring plan not found".into()))?;
        let fiscal_year = unit
            .fiscal_year(fiscal_year_id)
            .cloned()
            .ok_or_else(|| LedgerError::InvalidInput("fiscal year not found".into()))?;
        if !plan.is_active {
            return Ok(Vec::new());
        }

        let mut created = Vec::new();
        for date in Self::occurrence_dates(&plan, &fiscal_year) {
            let exists = unit.transactions.iter().any(|txn| {
                txn.recurring_transaction_plan_id == Some(plan.id)
                    && txn.date == date
                    && txn.is_planned
            });
            if exists {
                continue;
            }
            let mut transaction = TransactionInput::new(date, plan.name.clone());
            transaction.is_planned = true;
            transaction.recurring_transaction_plan_id = Some(plan.id);
            let entries = [
                JournalEntryInput::new(plan.debit_sub_account_id, EntrySide::Debit, plan.amount)
                    .with_tax(plan.tax_amount, plan.tax_type),
                JournalEntryInput::new(plan.credit_sub_account_id, EntrySide::Credit, plan.amount)
                    .with_tax(plan.tax_amount, plan.tax_type),
            ];
            created.push(TransactionRegistrar::register(
                unit,
                fiscal_year_id,
                transaction,
                &entries,
            )?);
        }
        tracing::debug!(plan = %plan.name, created = created.len(), "recurring generation finished");
        Ok(created)
    }

    /// Finalizes a planned transaction with its realized figures: rewrites
    /// the two entries' amount and the credit entry's sub-account, updates
    /// the date, and clears the planned flag. Entry number and row counts are
    /// untouched. Only transactions with exactly one debit and one credit
    /// entry qualify; other shapes are rejected.
    pub fn confirm(
        unit: &mut BusinessUnit,
        transaction_id: Uuid,
        realized_date: NaiveDate,
        realized_amount: i64,
        credit_sub_account_id: Uuid,
    ) -> Result<(), LedgerError> {
        if realized_amount < 1 {
            return Err(LedgerError::InvalidInput(
                "realized amount must be a positive integer".into(),
            ));
        }
        if unit.sub_account(credit_sub_account_id).is_none() {
            return Err(LedgerError::InvalidInput(
                "credit sub-account not found".into(),
            ));
        }
        let transaction = unit
            .transaction_mut(transaction_id)
            .ok_or_else(|| LedgerError::InvalidInput("transaction not found".into()))?;
        if !transaction.is_planned {
            return Err(LedgerError::InvalidInput(
                "transaction is not awaiting confirmation".into(),
            ));
        }
        // Only the plan-generated shape can be confirmed: rewriting both
        // amounts to the realized figure keeps the transaction balanced
        // exactly when there is one entry per side.
        let debits = transaction
            .entries
            .iter()
            .filter(|entry| entry.side == EntrySide::Debit)
            .count();
        if transaction.entries.len() != 2 || debits != 1 {
            return Err(LedgerError::InvalidInput(
                "only transactions with one debit and one credit entry can be confirmed".into(),
            ));
        }
        for entry in &mut transaction.entries {
            entry.amount = realized_amount;
            if entry.side == EntrySide::Credit {
                entry.sub_account_id = credit_sub_account_id;
            }
        }
        transaction.date = realized_date;
        transaction.is_planned = false;
        unit.touch();
        Ok(())
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
