use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, ValidationErrors};

use super::{
    account::{Account, AccountType, SubAccount},
    fiscal_year::FiscalYear,
    recurring::{PlanInput, PlanInterval, RecurringTransactionPlan},
    transaction::Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// One tenant's book of accounts: the chart of accounts, fiscal years,
/// recurring plans, and every registered transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessUnit {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub current_fiscal_year_id: Option<Uuid>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub fiscal_years: Vec<FiscalYear>,
    #[serde(default)]
    pub plans: Vec<RecurringTransactionPlan>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "BusinessUnit::schema_version_default")]
    pub schema_version: u8,
}

impl BusinessUnit {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            current_fiscal_year_id: None,
            accounts: Vec::new(),
            fiscal_years: Vec::new(),
            plans: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    // --- lookups ---

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }

    /// Resolves a sub-account together with its owning account.
    pub fn sub_account(&self, id: Uuid) -> Option<(&Account, &SubAccount)> {
        self.accounts.iter().find_map(|account| {
            account.sub_account(id).map(|sub| (account, sub))
        })
    }

    pub fn fiscal_year(&self, id: Uuid) -> Option<&FiscalYear> {
        self.fiscal_years.iter().find(|year| year.id == id)
    }

    pub fn fiscal_year_by_year(&self, year: i32) -> Option<&FiscalYear> {
        self.fiscal_years.iter().find(|fy| fy.year == year)
    }

    pub fn current_fiscal_year(&self) -> Option<&FiscalYear> {
        self.current_fiscal_year_id.and_then(|id| self.fiscal_year(id))
    }

    pub fn plan(&self, id: Uuid) -> Option<&RecurringTransactionPlan> {
        self.plans.iter().find(|plan| plan.id == id)
    }

    pub fn plan_by_name(&self, name: &str) -> Option<&RecurringTransactionPlan> {
        self.plans.iter().find(|plan| plan.name == name)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn transactions_for(&self, fiscal_year_id: Uuid) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |txn| txn.fiscal_year_id == fiscal_year_id)
    }

    // --- chart of accounts ---

    /// Returns the existing account with this name, or creates one with its
    /// default sub-accounts. An existing account must carry the same type.
    pub fn create_account(
        &mut self,
        name: &str,
        account_type: AccountType,
    ) -> Result<Uuid, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "account name must not be empty".into(),
            ));
        }
        if let Some(existing) = self.account_by_name(name) {
            if existing.account_type != account_type {
                return Err(LedgerError::InvalidInput(format!(
                    "account `{name}` already exists with a different type"
                )));
            }
            return Ok(existing.id);
        }
        let account = Account::new(name, account_type);
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        Ok(id)
    }

    /// Get-or-create for a named sub-ledger. The single place where the
    /// (account, name) uniqueness invariant is enforced.
    pub fn ensure_sub_account(
        &mut self,
        account_id: Uuid,
        name: &str,
    ) -> Result<Uuid, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "sub-account name must not be empty".into(),
            ));
        }
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or_else(|| LedgerError::InvalidInput("account not found".into()))?;
        if let Some(existing) = account.sub_accounts.iter().find(|sub| sub.name == name) {
            return Ok(existing.id);
        }
        let sub = SubAccount::new(name);
        let id = sub.id;
        account.sub_accounts.push(sub);
        self.touch();
        Ok(id)
    }

    /// Whether any journal entry posts to one of the account's sub-accounts.
    pub fn account_has_postings(&self, account_id: Uuid) -> bool {
        let Some(account) = self.account(account_id) else {
            return false;
        };
        self.transactions.iter().any(|txn| {
            txn.entries
                .iter()
                .any(|entry| account.sub_account(entry.sub_account_id).is_some())
        })
    }

    /// Reclassifies an account. Rejected once the account has been posted to,
    /// since historical summaries would silently change meaning.
    pub fn change_account_type(
        &mut self,
        account_id: Uuid,
        account_type: AccountType,
    ) -> Result<(), LedgerError> {
        if self.account_has_postings(account_id) {
            return Err(LedgerError::InvalidInput(
                "account type cannot change once journal entries reference it".into(),
            ));
        }
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or_else(|| LedgerError::InvalidInput("account not found".into()))?;
        account.account_type = account_type;
        self.touch();
        Ok(())
    }

    // --- fiscal years ---

    /// Creates a calendar fiscal year. The first fiscal year of a book is
    /// automatically marked active and current.
    pub fn create_fiscal_year(&mut self, year: i32) -> Result<Uuid, LedgerError> {
        // Keeps the year inside the four-digit display-number format and well
        // within chrono's representable range.
        if !(1..=9999).contains(&year) {
            return Err(LedgerError::InvalidInput(format!(
                "fiscal year {year} is out of range"
            )));
        }
        if self.fiscal_year_by_year(year).is_some() {
            return Err(LedgerError::InvalidInput(format!(
                "fiscal year {year} already exists"
            )));
        }
        let mut fiscal_year = FiscalYear::calendar(year);
        let first = self.fiscal_years.is_empty();
        fiscal_year.is_active = first;
        let id = fiscal_year.id;
        self.fiscal_years.push(fiscal_year);
        if first {
            self.current_fiscal_year_id = Some(id);
        }
        self.touch();
        Ok(id)
    }

    /// Moves the current-fiscal-year pointer, keeping exactly one year active.
    pub fn set_current_fiscal_year(&mut self, fiscal_year_id: Uuid) -> Result<(), LedgerError> {
        if self.fiscal_year(fiscal_year_id).is_none() {
            return Err(LedgerError::InvalidInput(
                "fiscal year does not belong to this business unit".into(),
            ));
        }
        for fiscal_year in &mut self.fiscal_years {
            fiscal_year.is_active = fiscal_year.id == fiscal_year_id;
        }
        self.current_fiscal_year_id = Some(fiscal_year_id);
        self.touch();
        Ok(())
    }

    // --- entry numbering ---

    /// Highest entry number assigned within the fiscal year, 0 when empty.
    pub fn max_entry_number(&self, fiscal_year_id: Uuid) -> u32 {
        self.transactions_for(fiscal_year_id)
            .map(|txn| txn.entry_number)
            .max()
            .unwrap_or(0)
    }

    /// Next entry number for the fiscal year. Must be called and used inside
    /// the same exclusive borrow that appends the transaction, so concurrent
    /// registrations can never observe the same maximum.
    pub fn next_entry_number(&self, fiscal_year_id: Uuid) -> u32 {
        self.max_entry_number(fiscal_year_id) + 1
    }

    // --- recurring plans ---

    /// Validates and stores a recurring transaction plan.
    pub fn create_recurring_plan(&mut self, input: PlanInput) -> Result<Uuid, LedgerError> {
        validate_plan(self, &input).into_result()?;
        let plan = RecurringTransactionPlan {
            id: Uuid::new_v4(),
            name: input.name,
            interval: input.interval,
            day_of_month: input.day_of_month,
            month_of_year: input.month_of_year,
            start_month: input.start_month,
            is_income: input.is_income,
            debit_sub_account_id: input.debit_sub_account_id,
            credit_sub_account_id: input.credit_sub_account_id,
            amount: input.amount,
            tax_amount: input.tax_amount,
            tax_type: input.tax_type,
            is_active: true,
        };
        let id = plan.id;
        self.plans.push(plan);
        self.touch();
        Ok(id)
    }
}

fn validate_plan(unit: &BusinessUnit, input: &PlanInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if input.name.trim().is_empty() {
        errors.push("name", "is required");
    } else if unit.plan_by_name(&input.name).is_some() {
        errors.push("name", "is already taken");
    }
    if !(1..=31).contains(&input.day_of_month) {
        errors.push("day_of_month", "must be between 1 and 31");
    }
    match input.interval {
        PlanInterval::Yearly => match input.month_of_year {
            Some(month) if (1..=12).contains(&month) => {}
            Some(_) => errors.push("month_of_year", "must be between 1 and 12"),
            None => errors.push("month_of_year", "is required for yearly plans"),
        },
        PlanInterval::Bimonthly => match input.start_month {
            Some(1) | Some(2) => {}
            Some(_) => errors.push("start_month", "must be 1 or 2"),
            None => errors.push("start_month", "is required for bimonthly plans"),
        },
        PlanInterval::Monthly => {}
    }
    if input.amount < 1 {
        errors.push("amount", "must be a positive integer");
    }
    if input.tax_amount < 0 {
        errors.push("tax_amount", "must not be negative");
    }
    if unit.sub_account(input.debit_sub_account_id).is_none() {
        errors.push("debit_sub_account_id", "must reference an existing sub-account");
    }
    if unit.sub_account(input.credit_sub_account_id).is_none() {
        errors.push("credit_sub_account_id", "must reference an existing sub-account");
    }
    errors
}
