use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::TaxType;

/// Cadence of a recurring transaction plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanInterval {
    Monthly,
    Bimonthly,
    Yearly,
}

/// Template for transactions generated on a schedule.
///
/// `day_of_month` is clamped to the last day of short months when occurrence
/// dates are computed. `month_of_year` applies to yearly plans only;
/// `start_month` (1 or 2) selects the odd or even month run of a bimonthly
/// plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringTransactionPlan {
    pub id: Uuid,
    pub name: String,
    pub interval: PlanInterval,
    pub day_of_month: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub is_income: bool,
    pub debit_sub_account_id: Uuid,
    pub credit_sub_account_id: Uuid,
    pub amount: i64,
    #[serde(default)]
    pub tax_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<TaxType>,
    pub is_active: bool,
}

impl RecurringTransactionPlan {
    /// Whether the plan fires in the given calendar month (1-12).
    pub fn fires_in_month(&self, month: u32) -> bool {
        match self.interval {
            PlanInterval::Monthly => true,
            PlanInterval::Bimonthly => {
                let parity = self.start_month.unwrap_or(1) % 2;
                month % 2 == parity
            }
            PlanInterval::Yearly => self.month_of_year == Some(month),
        }
    }
}

/// Raw attributes for creating a recurring plan, validated before use.
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub name: String,
    pub interval: PlanInterval,
    pub day_of_month: u32,
    pub month_of_year: Option<u32>,
    pub start_month: Option<u32>,
    pub is_income: bool,
    pub debit_sub_account_id: Uuid,
    pub credit_sub_account_id: Uuid,
    pub amount: i64,
    pub tax_amount: i64,
    pub tax_type: Option<TaxType>,
}
