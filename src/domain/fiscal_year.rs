use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bounded accounting period, normally one calendar year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FiscalYear {
    pub id: Uuid,
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub is_taxable: bool,
    #[serde(default)]
    pub is_tax_exclusive: bool,
}

impl FiscalYear {
    /// Creates a fiscal year spanning the given calendar year.
    pub fn calendar(year: i32) -> Self {
        let start_date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        let end_date = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();
        Self {
            id: Uuid::new_v4(),
            year,
            start_date,
            end_date,
            is_active: false,
            is_closed: false,
            is_taxable: false,
            is_tax_exclusive: false,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_year_spans_january_through_december() {
        let fiscal_year = FiscalYear::calendar(2025);
        assert!(fiscal_year.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(fiscal_year.contains(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert!(!fiscal_year.contains(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }
}
