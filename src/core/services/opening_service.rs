//! Opening-balance registration against the capital account.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::core::services::registrar::TransactionRegistrar;
use crate::core::validation::{JournalEntryInput, TransactionInput};
use crate::domain::{AccountType, BusinessUnit, EntrySide, Transaction};
use crate::errors::LedgerError;

/// Accounts allowed on the debit side of an opening entry, with the type they
/// are created under when absent from the chart.
static OPENING_DEBIT_ACCOUNTS: Lazy<HashMap<&'static str, AccountType>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("現金", AccountType::Asset);
    map.insert("定期預金", AccountType::Asset);
    map.insert("その他の預金", AccountType::Asset);
    map.insert("車両運搬具", AccountType::Asset);
    map.insert("棚卸資産", AccountType::Asset);
    map
});

const CAPITAL_ACCOUNT_NAME: &str = "資本金";
const OPENING_DESCRIPTION: &str = "開始残高";

/// One starting-balance line: a named account (and optional sub-ledger) with
/// the amount it opens at.
#[derive(Debug, Clone)]
pub struct OpeningEntryInput {
    pub account_name: String,
    pub sub_account_name: Option<String>,
    pub amount: i64,
}

pub struct OpeningService;

impl OpeningService {
    /// Posts the opening entry for a fiscal year: one debit per input against
    /// a single balancing credit on the capital sub-account, dated at the
    /// fiscal year start. Named sub-accounts are created on demand. An empty
    /// input list registers nothing and returns `None`.
    pub fn register(
        unit: &mut BusinessUnit,
        fiscal_year_id: Uuid,
        inputs: &[OpeningEntryInput],
    ) -> Result<Option<Transaction>, LedgerError> {
        if inputs.is_empty() {
            return Ok(None);
        }
        let fiscal_year = unit
            .fiscal_year(fiscal_year_id)
            .cloned()
            .ok_or_else(|| LedgerError::InvalidInput("fiscal year not found".into()))?;

        // All inputs are checked before any account is touched, so a bad
        // line leaves the chart of accounts unchanged.
        for input in inputs {
            if !OPENING_DEBIT_ACCOUNTS.contains_key(input.account_name.as_str()) {
                return Err(LedgerError::InvalidInput(format!(
                    "account `{}` cannot carry an opening balance",
                    input.account_name
                )));
            }
            if input.amount < 1 {
                return Err(LedgerError::InvalidInput(
                    "opening amount must be a positive integer".into(),
                ));
            }
            if let Some(name) = &input.sub_account_name {
                if name.trim().is_empty() {
                    return Err(LedgerError::InvalidInput(
                        "sub-account name must not be empty".into(),
                    ));
                }
            }
        }

        let mut entries = Vec::with_capacity(inputs.len() + 1);
        let mut total = 0i64;
        for input in inputs {
            let account_type = OPENING_DEBIT_ACCOUNTS[input.account_name.as_str()];
            let account_id = unit.create_account(&input.account_name, account_type)?;
            let sub_name = input
                .sub_account_name
                .as_deref()
                .unwrap_or(input.account_name.as_str());
            let sub_id = unit.ensure_sub_account(account_id, sub_name)?;
            entries.push(JournalEntryInput::new(sub_id, EntrySide::Debit, input.amount));
            total += input.amount;
        }
        let capital_id = unit.create_account(CAPITAL_ACCOUNT_NAME, AccountType::Equity)?;
        let capital_sub = unit.ensure_sub_account(capital_id, CAPITAL_ACCOUNT_NAME)?;
        entries.push(JournalEntryInput::new(capital_sub, EntrySide::Credit, total));

        let mut transaction = TransactionInput::new(fiscal_year.start_date, OPENING_DESCRIPTION);
        transaction.is_opening_entry = true;
        TransactionRegistrar::register(unit, fiscal_year_id, transaction, &entries).map(Some)
    }
}
