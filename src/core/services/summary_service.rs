//! Fiscal-year income/expense aggregation, split into actual and planned.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{AccountType, BusinessUnit, EntrySide};
use crate::errors::LedgerError;

/// Income, expense, and profit totals for one partition of a fiscal year.
/// Totals are tax-inclusive: each contributing entry adds amount plus
/// tax_amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub total_income: i64,
    pub total_expense: i64,
    pub profit: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FiscalYearSummary {
    pub actual: PeriodTotals,
    pub planned: PeriodTotals,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums revenue credits and expense debits over the fiscal year,
    /// partitioned by the planned flag. An entry's classification comes from
    /// its sub-account's owning account.
    pub fn calculate(
        unit: &BusinessUnit,
        fiscal_year_id: Uuid,
    ) -> Result<FiscalYearSummary, LedgerError> {
        if unit.fiscal_year(fiscal_year_id).is_none() {
            return Err(LedgerError::InvalidInput("fiscal year not found".into()));
        }
        let mut actual = PeriodTotals::default();
        let mut planned = PeriodTotals::default();
        for transaction in unit.transactions_for(fiscal_year_id) {
            let bucket = if transaction.is_planned {
                &mut planned
            } else {
                &mut actual
            };
            for entry in transaction.entries.iter().filter(|entry| entry.is_effective) {
                let Some((account, _)) = unit.sub_account(entry.sub_account_id) else {
                    continue;
                };
                match (account.account_type, entry.side) {
                    (AccountType::Revenue, EntrySide::Credit) => {
                        bucket.total_income += entry.amount + entry.tax_amount;
                    }
                    (AccountType::Expense, EntrySide::Debit) => {
                        bucket.total_expense += entry.amount + entry.tax_amount;
                    }
                    _ => {}
                }
            }
        }
        actual.profit = actual.total_income - actual.total_expense;
        planned.profit = planned.total_income - planned.total_expense;
        Ok(FiscalYearSummary { actual, planned })
    }
}
