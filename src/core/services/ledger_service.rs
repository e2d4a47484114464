//! Running-balance general ledgers per account or sub-account.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{BusinessUnit, EntrySide};
use crate::errors::LedgerError;

/// Account name whose ledger doubles as the cashbook.
pub const CASH_ACCOUNT_NAME: &str = "現金";

/// One movement line in a running-balance ledger. The side not used is None.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub description: String,
    pub debit: Option<i64>,
    pub credit: Option<i64>,
    pub balance: i64,
}

pub struct LedgerService;

impl LedgerService {
    /// Ledger over every sub-account of the account.
    pub fn generate(
        unit: &BusinessUnit,
        account_id: Uuid,
        fiscal_year_id: Uuid,
    ) -> Result<Vec<LedgerRow>, LedgerError> {
        let account = unit
            .account(account_id)
            .ok_or_else(|| LedgerError::InvalidInput("account not found".into()))?;
        let sub_ids: HashSet<Uuid> = account.sub_accounts.iter().map(|sub| sub.id).collect();
        Self::walk(unit, &sub_ids, fiscal_year_id)
    }

    /// Ledger restricted to a single sub-account.
    pub fn generate_for_sub_account(
        unit: &BusinessUnit,
        sub_account_id: Uuid,
        fiscal_year_id: Uuid,
    ) -> Result<Vec<LedgerRow>, LedgerError> {
        if unit.sub_account(sub_account_id).is_none() {
            return Err(LedgerError::InvalidInput("sub-account not found".into()));
        }
        let sub_ids: HashSet<Uuid> = [sub_account_id].into_iter().collect();
        Self::walk(unit, &sub_ids, fiscal_year_id)
    }

    /// Ledger of the cash account. A book without one yields an empty
    /// ledger rather than an error.
    pub fn generate_cashbook(
        unit: &BusinessUnit,
        fiscal_year_id: Uuid,
    ) -> Result<Vec<LedgerRow>, LedgerError> {
        match unit.account_by_name(CASH_ACCOUNT_NAME) {
            Some(account) => Self::generate(unit, account.id, fiscal_year_id),
            None => Ok(Vec::new()),
        }
    }

    fn walk(
        unit: &BusinessUnit,
        sub_ids: &HashSet<Uuid>,
        fiscal_year_id: Uuid,
    ) -> Result<Vec<LedgerRow>, LedgerError> {
        let fiscal_year = unit
            .fiscal_year(fiscal_year_id)
            .ok_or_else(|| LedgerError::InvalidInput("fiscal year not found".into()))?;

        let mut movements: Vec<(NaiveDate, u32, &str, EntrySide, i64)> = Vec::new();
        for transaction in &unit.transactions {
            if !fiscal_year.contains(transaction.date) {
                continue;
            }
            for entry in transaction.entries.iter().filter(|entry| entry.is_effective) {
                if sub_ids.contains(&entry.sub_account_id) {
                    movements.push((
                        transaction.date,
                        transaction.entry_number,
                        transaction.description.as_str(),
                        entry.side,
                        entry.amount,
                    ));
                }
            }
        }
        movements.sort_by_key(|(date, entry_number, ..)| (*date, *entry_number));

        // Tax amounts never move the ledger balance, unlike the summary.
        let mut balance = 0i64;
        let rows = movements
            .into_iter()
            .map(|(date, _, description, side, amount)| match side {
                EntrySide::Debit => {
                    balance += amount;
                    LedgerRow {
                        date,
                        description: description.to_string(),
                        debit: Some(amount),
                        credit: None,
                        balance,
                    }
                }
                EntrySide::Credit => {
                    balance -= amount;
                    LedgerRow {
                        date,
                        description: description.to_string(),
                        debit: None,
                        credit: Some(amount),
                        balance,
                    }
                }
            })
            .collect();
        Ok(rows)
    }
}
