pub mod ledger_service;
pub mod opening_service;
pub mod recurring_service;
pub mod registrar;
pub mod summary_service;

pub use ledger_service::{LedgerRow, LedgerService};
pub use opening_service::{OpeningEntryInput, OpeningService};
pub use recurring_service::RecurringService;
pub use registrar::TransactionRegistrar;
pub use summary_service::{FiscalYearSummary, PeriodTotals, SummaryService};
