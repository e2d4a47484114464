mod common;

use common::{seeded_book, ymd};
use ledger_core::core::services::{
    LedgerService, OpeningEntryInput, OpeningService, SummaryService, TransactionRegistrar,
};
use ledger_core::core::validation::{JournalEntryInput, TransactionInput};
use ledger_core::domain::{EntrySide, TaxType};
use ledger_core::errors::LedgerError;

#[test]
fn summary_matches_the_worked_example() {
    let mut book = seeded_book(2025);
    TransactionRegistrar::register(
        &mut book.unit,
        book.fiscal_year,
        TransactionInput::new(ymd(2025, 4, 10), "売上"),
        &[
            JournalEntryInput::new(book.cash_sub, EntrySide::Debit, 10000)
                .with_tax(1000, Some(TaxType::Standard)),
            JournalEntryInput::new(book.sales_sub, EntrySide::Credit, 10000)
                .with_tax(1000, Some(TaxType::Standard)),
        ],
    )
    .unwrap();
    TransactionRegistrar::register(
        &mut book.unit,
        book.fiscal_year,
        TransactionInput::new(ymd(2025, 5, 2), "仕入"),
        &[
            JournalEntryInput::new(book.purchases_sub, EntrySide::Debit, 6000)
                .with_tax(600, Some(TaxType::Standard)),
            JournalEntryInput::new(book.cash_sub, EntrySide::Credit, 6000)
                .with_tax(600, Some(TaxType::Standard)),
        ],
    )
    .unwrap();
    let mut planned = TransactionInput::new(ymd(2025, 6, 1), "予定売上");
    planned.is_planned = true;
    TransactionRegistrar::register(
        &mut book.unit,
        book.fiscal_year,
        planned,
        &[
            JournalEntryInput::new(book.cash_sub, EntrySide::Debit, 20000),
            JournalEntryInput::new(book.sales_sub, EntrySide::Credit, 20000),
        ],
    )
    .unwrap();

    let summary = SummaryService::calculate(&book.unit, book.fiscal_year).unwrap();
    assert_eq!(summary.actual.total_income, 11000);
    assert_eq!(summary.actual.total_expense, 6600);
    assert_eq!(summary.actual.profit, 4400);
    assert_eq!(summary.planned.total_income, 20000);
    assert_eq!(summary.planned.total_expense, 0);
    assert_eq!(summary.planned.profit, 20000);
}

#[test]
fn ledger_walk_produces_the_expected_running_balances() {
    let mut book = seeded_book(2025);
    let postings = [
        (ymd(2025, 1, 10), EntrySide::Debit, 100000),
        (ymd(2025, 2, 5), EntrySide::Credit, 30000),
        (ymd(2025, 3, 1), EntrySide::Debit, 50000),
    ];
    for (date, side, amount) in postings {
        let counter_side = match side {
            EntrySide::Debit => EntrySide::Credit,
            EntrySide::Credit => EntrySide::Debit,
        };
        TransactionRegistrar::register(
            &mut book.unit,
            book.fiscal_year,
            TransactionInput::new(date, "現金移動"),
            &[
                JournalEntryInput::new(book.cash_sub, side, amount),
                JournalEntryInput::new(book.sales_sub, counter_side, amount),
            ],
        )
        .unwrap();
    }

    let rows =
        LedgerService::generate_for_sub_account(&book.unit, book.cash_sub, book.fiscal_year)
            .unwrap();
    let balances: Vec<i64> = rows.iter().map(|row| row.balance).collect();
    assert_eq!(balances, vec![100000, 70000, 120000]);
    assert_eq!(rows[1].debit, None);
    assert_eq!(rows[1].credit, Some(30000));
}

#[test]
fn tax_moves_the_summary_but_not_the_ledger() {
    let mut book = seeded_book(2025);
    TransactionRegistrar::register(
        &mut book.unit,
        book.fiscal_year,
        TransactionInput::new(ymd(2025, 4, 10), "売上"),
        &[
            JournalEntryInput::new(book.cash_sub, EntrySide::Debit, 10000)
                .with_tax(1000, Some(TaxType::Standard)),
            JournalEntryInput::new(book.sales_sub, EntrySide::Credit, 10000)
                .with_tax(1000, Some(TaxType::Standard)),
        ],
    )
    .unwrap();

    let summary = SummaryService::calculate(&book.unit, book.fiscal_year).unwrap();
    assert_eq!(summary.actual.total_income, 11000);

    let rows = LedgerService::generate_cashbook(&book.unit, book.fiscal_year).unwrap();
    assert_eq!(rows[0].debit, Some(10000));
    assert_eq!(rows[0].balance, 10000);
}

#[test]
fn opening_entry_feeds_the_cashbook() {
    let mut book = seeded_book(2025);
    OpeningService::register(
        &mut book.unit,
        book.fiscal_year,
        &[OpeningEntryInput {
            account_name: "現金".into(),
            sub_account_name: None,
            amount: 120000,
        }],
    )
    .unwrap();

    let rows = LedgerService::generate_cashbook(&book.unit, book.fiscal_year).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, ymd(2025, 1, 1));
    assert_eq!(rows[0].balance, 120000);
}

#[test]
fn opening_entry_with_disallowed_account_persists_nothing() {
    let mut book = seeded_book(2025);
    let before = book.unit.transactions.len();
    let err = OpeningService::register(
        &mut book.unit,
        book.fiscal_year,
        &[OpeningEntryInput {
            account_name: "売掛金".into(),
            sub_account_name: None,
            amount: 10000,
        }],
    )
    .expect_err("disallowed account must fail");
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert_eq!(book.unit.transactions.len(), before);
}
