#![allow(clippy::unwrap_used)]

use super::*;
use crate::reports::Forecast;
use chrono::Weekday;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stored(mut t: Transaction, id: i64) -> Transaction {
    t.id = Some(id);
    t
}

#[test]
fn test_suggestions_table() {
    let mut existing = Budget::new(40000, 1, 2025);
    existing.id = Some(1);
    let items = vec![
        Suggestion {
            year: 2025,
            month: 1,
            month_name: "January",
            amount: 45050,
            existing: Some(existing),
        },
        Suggestion {
            year: 2025,
            month: 2,
            month_name: "February",
            amount: 0,
            existing: None,
        },
    ];

    let out = suggestions(2025, &items);
    assert!(out.contains("Suggested Budgets (2025)"));
    let january = out.lines().find(|l| l.contains("January")).unwrap();
    assert!(january.contains("$400.00"));
    assert!(january.contains("$450.50"));
    let february = out.lines().find(|l| l.contains("February")).unwrap();
    assert!(february.contains('-'));
    assert!(february.contains("$0.00"));
}

#[test]
fn test_budget_list_marks_empty_months() {
    let slots = vec![(1, Some(Budget::new(123456, 1, 2024))), (2, None)];
    let out = budget_list(2024, &slots);
    assert!(out.contains("Budgets for 2024"));
    assert!(out.contains("$1,234.56"));
    let february = out.lines().find(|l| l.starts_with("February")).unwrap();
    assert!(february.contains('-'));
}

#[test]
fn test_year_report_totals() {
    let months = vec![
        MonthStatus {
            year: 2024,
            month_name: "January",
            budget: Some(Budget::new(10000, 1, 2024)),
            total_spent: 12500,
        },
        MonthStatus {
            year: 2024,
            month_name: "February",
            budget: None,
            total_spent: 500,
        },
    ];
    let out = year_report(2024, &months);
    assert!(out.contains("-$25.00"));
    let total = out.lines().last().unwrap();
    assert!(total.starts_with("Total"));
    assert!(total.contains("$100.00"));
    assert!(total.contains("$130.00"));
}

#[test]
fn test_month_report_with_forecast() {
    let report = MonthlyReport {
        status: MonthStatus {
            year: 2024,
            month_name: "April",
            budget: Some(Budget::new(30000, 4, 2024)),
            total_spent: 15000,
        },
        forecast: Some(Forecast {
            avg_per_day: dec!(1500),
            projected_total: dec!(45000),
            projected_overage: Some(dec!(15000)),
        }),
    };
    let out = month_report(&report);
    assert!(out.contains("April 2024"));
    assert!(out.contains("Forecast"));
    assert!(out.contains("$15.00"));
    assert!(out.contains("$450.00"));
    assert!(out.contains("$150.00"));
}

#[test]
fn test_month_report_without_budget_warns() {
    let report = MonthlyReport {
        status: MonthStatus {
            year: 2023,
            month_name: "July",
            budget: None,
            total_spent: 0,
        },
        forecast: None,
    };
    let out = month_report(&report);
    assert!(out.contains("No budget set"));
    assert!(!out.contains("Forecast"));
}

#[test]
fn test_weekday_report_full_names() {
    let days = vec![
        WeekdaySpending {
            weekday: Weekday::Mon,
            count: 2,
            total: 4000,
            average: dec!(2000),
        },
        WeekdaySpending {
            weekday: Weekday::Tue,
            count: 0,
            total: 0,
            average: Decimal::ZERO,
        },
    ];
    let out = weekday_report(&days);
    let monday = out.lines().find(|l| l.starts_with("Monday")).unwrap();
    assert!(monday.contains("$20.00"));
    assert!(monday.contains("$40.00"));
    assert!(out.contains("Tuesday"));
}

#[test]
fn test_volatility_report_lists_outliers() {
    let report = VolatilityReport {
        count: 3,
        mean: dec!(2000),
        stdev: 100.0,
        outliers: vec![Transaction::new(2100, date(2024, 3, 1)).with_receiver("Bolt")],
    };
    let out = volatility_report("2024", &report);
    assert!(out.contains("Spending Volatility (2024)"));
    assert!(out.contains("Low Volatility"));
    assert!(out.contains("$20.00"));
    assert!(out.contains("$1.00"));
    assert!(out.contains("Bolt"));
    assert!(out.contains("Mar 01, 2024"));
}

#[test]
fn test_payee_ranking_numbers_rows() {
    let payees = vec![
        PayeeSummary {
            name: "Bolt".into(),
            count: 1,
            total: 5000,
            average: 5000,
        },
        PayeeSummary {
            name: "Unknown".into(),
            count: 2,
            total: 75,
            average: 37,
        },
    ];
    let out = payee_ranking(&payees);
    assert!(out.lines().any(|l| l.starts_with("1 ") && l.contains("Bolt")));
    assert!(out.lines().any(|l| l.starts_with("2 ") && l.contains("$0.37")));
}

#[test]
fn test_transaction_list_total() {
    let txns = vec![
        Transaction::new(1000, date(2024, 1, 2)).with_description("Coffee beans"),
        Transaction::new(250, date(2024, 1, 1)),
    ];
    let out = transaction_list("Search Results", &txns);
    assert!(out.contains("Search Results"));
    assert!(out.contains("Coffee beans"));
    assert!(out.lines().last().unwrap().contains("$12.50"));
}

#[test]
fn test_daily_transactions_groups_and_names_categories() {
    let mut groceries = Category::new("Groceries".into(), "green".into());
    groceries.id = Some(3);
    let mut txn = Transaction::new(1999, date(2024, 2, 29))
        .with_receiver("Rimi")
        .with_description("Weekly shop");
    txn.category_id = Some(3);

    let days = vec![
        (date(2024, 2, 28), vec![]),
        (date(2024, 2, 29), vec![stored(txn, 42)]),
    ];
    let out = daily_transactions(&days, &[groceries]);
    let empty = out.lines().find(|l| l.contains("Feb 28")).unwrap();
    assert!(empty.contains("Nothing to show"));
    let row = out.lines().find(|l| l.contains("Feb 29")).unwrap();
    assert!(row.contains("42"));
    assert!(row.contains("Rimi · Weekly shop"));
    assert!(row.contains("Groceries"));
    assert!(row.contains("$19.99"));
    assert!(out.lines().last().unwrap().contains("$19.99"));
}

#[test]
fn test_category_and_rule_lists() {
    let mut cat = Category::new("Transport".into(), "blue".into());
    cat.id = Some(1);
    let out = category_list(&[cat]);
    assert!(out.contains("Transport"));
    assert!(out.contains("blue"));

    let mut keyword = CategoryRule::new_keyword("BOLT", 1);
    keyword.id = Some(7);
    let mut regex = CategoryRule::new_regex(r"^taxi\b".into(), 1);
    regex.id = Some(8);
    let out = rule_list(&[(keyword, "Transport".into()), (regex, "Transport".into())]);
    assert!(out.contains("bolt"));
    assert!(out.contains("keyword"));
    assert!(out.contains("regex"));
    assert!(out.contains("Transport (#1)"));
}
