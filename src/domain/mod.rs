pub mod account;
pub mod business_unit;
pub mod fiscal_year;
pub mod recurring;
pub mod transaction;

pub use account::{Account, AccountType, SubAccount};
pub use business_unit::BusinessUnit;
pub use fiscal_year::FiscalYear;
pub use recurring::{PlanInput, PlanInterval, RecurringTransactionPlan};
pub use transaction::{EntrySide, JournalEntry, TaxType, Transaction};
