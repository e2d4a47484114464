#![allow(dead_code)]

use chrono::NaiveDate;
use uuid::Uuid;

use ledger_core::domain::{AccountType, BusinessUnit};

/// A book seeded with one fiscal year and the accounts most tests post to.
pub struct SeededBook {
    pub unit: BusinessUnit,
    pub fiscal_year: Uuid,
    pub cash_sub: Uuid,
    pub sales_sub: Uuid,
    pub purchases_sub: Uuid,
    pub rent_sub: Uuid,
}

pub fn seeded_book(year: i32) -> SeededBook {
    let mut unit = BusinessUnit::new("テスト商店");
    let fiscal_year = unit.create_fiscal_year(year).unwrap();
    let cash = unit.create_account("現金", AccountType::Asset).unwrap();
    let sales = unit.create_account("売上高", AccountType::Revenue).unwrap();
    let purchases = unit.create_account("仕入高", AccountType::Expense).unwrap();
    let rent = unit.create_account("地代家賃", AccountType::Expense).unwrap();
    let cash_sub = unit.account(cash).unwrap().sub_accounts[0].id;
    let sales_sub = unit.account(sales).unwrap().sub_accounts[0].id;
    let purchases_sub = unit.account(purchases).unwrap().sub_accounts[0].id;
    let rent_sub = unit.account(rent).unwrap().sub_accounts[0].id;
    SeededBook {
        unit,
        fiscal_year,
        cash_sub,
        sales_sub,
        purchases_sub,
        rent_sub,
    }
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
