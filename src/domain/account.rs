use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Accounting classification carried by every account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

/// Posting-level ledger inside an account, e.g. one specific bank account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubAccount {
    pub id: Uuid,
    pub name: String,
}

impl SubAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Accounts whose initial sub-accounts differ from the account's own name.
static DEFAULT_SUB_ACCOUNTS: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        map.insert("水道光熱費", &["電気代", "水道代", "ガス代"]);
        map.insert("租税公課", &["固定資産税", "自動車税", "印紙税"]);
        map
    });

/// A chart-of-accounts account owning its posting-level sub-accounts.
///
/// Sub-account names are unique within one account; every account carries at
/// least one sub-account from the moment it is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub sub_accounts: Vec<SubAccount>,
}

impl Account {
    /// Creates an account with its default sub-accounts: the override list
    /// for well-known account names, otherwise one sub-account named after
    /// the account itself.
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        let name = name.into();
        let sub_accounts = match DEFAULT_SUB_ACCOUNTS.get(name.as_str()) {
            Some(defaults) => defaults.iter().copied().map(SubAccount::new).collect(),
            None => vec![SubAccount::new(name.clone())],
        };
        Self {
            id: Uuid::new_v4(),
            name,
            account_type,
            sub_accounts,
        }
    }

    pub fn sub_account(&self, id: Uuid) -> Option<&SubAccount> {
        self.sub_accounts.iter().find(|sub| sub.id == id)
    }

    pub fn sub_account_by_name(&self, name: &str) -> Option<&SubAccount> {
        self.sub_accounts.iter().find(|sub| sub.name == name)
    }
}
