#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn spend(db: &Database, cents: i64, on: NaiveDate, receiver: Option<&str>) {
    let mut txn = Transaction::new(cents, on);
    if let Some(r) = receiver {
        txn = txn.with_receiver(r);
    }
    db.insert_transaction(&txn).unwrap();
}

// ── Yearly ────────────────────────────────────────────────────

#[test]
fn test_yearly_report_covers_every_month() {
    let db = Database::open_in_memory().unwrap();
    db.insert_budget(&Budget::new(50000, 3, 2024)).unwrap();
    spend(&db, 12000, date(2024, 3, 5), None);
    spend(&db, 8000, date(2024, 3, 31), None);
    spend(&db, 999, date(2025, 3, 1), None);

    let report = yearly_report(&db, 2024).unwrap();
    assert_eq!(report.len(), 12);
    assert_eq!(report[0].month_name, "January");
    assert_eq!(report[0].total_spent, 0);
    assert!(report[0].budget.is_none());
    assert_eq!(report[0].remaining(), None);

    let march = &report[2];
    assert_eq!(march.month_name, "March");
    assert_eq!(march.total_spent, 20000);
    assert_eq!(march.budget.as_ref().unwrap().amount, 50000);
    assert_eq!(march.remaining(), Some(30000));
}

#[test]
fn test_remaining_goes_negative_when_over_budget() {
    let db = Database::open_in_memory().unwrap();
    db.insert_budget(&Budget::new(1000, 6, 2024)).unwrap();
    spend(&db, 1500, date(2024, 6, 10), None);

    let june = &yearly_report(&db, 2024).unwrap()[5];
    assert_eq!(june.remaining(), Some(-500));
}

// ── Monthly forecast ──────────────────────────────────────────

#[test]
fn test_monthly_report_forecasts_current_month() {
    let db = Database::open_in_memory().unwrap();
    db.insert_budget(&Budget::new(30000, 4, 2024)).unwrap();
    spend(&db, 10000, date(2024, 4, 2), None);
    spend(&db, 5000, date(2024, 4, 9), None);

    let report = monthly_report(&db, 2024, 4, date(2024, 4, 10)).unwrap();
    assert_eq!(report.status.total_spent, 15000);
    let forecast = report.forecast.unwrap();
    assert_eq!(forecast.avg_per_day, dec!(1500));
    assert_eq!(forecast.projected_total, dec!(45000));
    assert_eq!(forecast.projected_overage, Some(dec!(15000)));
}

#[test]
fn test_monthly_report_forecast_without_budget() {
    let db = Database::open_in_memory().unwrap();
    spend(&db, 3100, date(2024, 1, 1), None);

    let report = monthly_report(&db, 2024, 1, date(2024, 1, 1)).unwrap();
    let forecast = report.forecast.unwrap();
    assert_eq!(forecast.projected_total, dec!(96100));
    assert_eq!(forecast.projected_overage, None);
}

#[test]
fn test_monthly_report_past_month_has_no_forecast() {
    let db = Database::open_in_memory().unwrap();
    spend(&db, 100, date(2024, 2, 14), None);

    let report = monthly_report(&db, 2024, 2, date(2024, 5, 1)).unwrap();
    assert_eq!(report.status.total_spent, 100);
    assert_eq!(report.status.month_name, "February");
    assert!(report.forecast.is_none());
}

// ── Weekday ───────────────────────────────────────────────────

#[test]
fn test_weekday_report_empty_store() {
    let db = Database::open_in_memory().unwrap();
    assert!(weekday_report(&db).unwrap().is_empty());
}

#[test]
fn test_weekday_report_monday_first() {
    let db = Database::open_in_memory().unwrap();
    // 2024-01-01 is a Monday.
    spend(&db, 1000, date(2024, 1, 1), None);
    spend(&db, 3000, date(2024, 1, 8), None);
    spend(&db, 700, date(2024, 1, 7), None);

    let report = weekday_report(&db).unwrap();
    assert_eq!(report.len(), 7);
    assert_eq!(report[0].weekday, Weekday::Mon);
    assert_eq!(report[0].count, 2);
    assert_eq!(report[0].total, 4000);
    assert_eq!(report[0].average, dec!(2000));

    assert_eq!(report[1].count, 0);
    assert_eq!(report[1].average, Decimal::ZERO);

    assert_eq!(report[6].weekday, Weekday::Sun);
    assert_eq!(report[6].total, 700);
}

// ── Volatility ────────────────────────────────────────────────

#[test]
fn test_volatility_report_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(volatility_report(&db, None).unwrap().is_none());
}

#[test]
fn test_volatility_report_low_for_steady_spending() {
    let db = Database::open_in_memory().unwrap();
    for day in 1..=4 {
        spend(&db, 1000, date(2024, 1, day), None);
    }

    let report = volatility_report(&db, None).unwrap().unwrap();
    assert_eq!(report.count, 4);
    assert_eq!(report.mean, dec!(1000));
    assert_eq!(report.stdev, 0.0);
    assert_eq!(report.level(), Volatility::Low);
}

#[test]
fn test_volatility_report_high_with_outliers() {
    let db = Database::open_in_memory().unwrap();
    for day in 1..=9 {
        spend(&db, 100, date(2024, 2, day), None);
    }
    spend(&db, 100_000, date(2024, 2, 20), Some("Car Repair"));

    let report = volatility_report(&db, Some(2024)).unwrap().unwrap();
    assert_eq!(report.count, 10);
    assert_eq!(report.level(), Volatility::High);
    assert_eq!(report.outliers.len(), 5);
    assert_eq!(report.outliers[0].amount, 100_000);
    assert_eq!(report.outliers[0].receiver.as_deref(), Some("Car Repair"));
}

#[test]
fn test_volatility_report_filters_by_year() {
    let db = Database::open_in_memory().unwrap();
    spend(&db, 500, date(2023, 12, 31), None);
    spend(&db, 1500, date(2024, 1, 1), None);

    let report = volatility_report(&db, Some(2024)).unwrap().unwrap();
    assert_eq!(report.count, 1);
    assert!(volatility_report(&db, Some(2022)).unwrap().is_none());
}

#[test]
fn test_volatility_moderate_band() {
    let report = VolatilityReport {
        count: 2,
        mean: dec!(100),
        stdev: 100.0,
        outliers: Vec::new(),
    };
    assert_eq!(report.coefficient_of_variation(), 1.0);
    assert_eq!(report.level(), Volatility::Moderate);
    assert_eq!(report.level().as_str(), "Moderate Volatility");
}

// ── Payees ────────────────────────────────────────────────────

#[test]
fn test_top_payees_ranked_by_total() {
    let db = Database::open_in_memory().unwrap();
    spend(&db, 1000, date(2024, 1, 1), Some("Rimi"));
    spend(&db, 2001, date(2024, 1, 2), Some("  Rimi "));
    spend(&db, 5000, date(2024, 1, 3), Some("Bolt"));
    spend(&db, 50, date(2024, 1, 4), None);
    spend(&db, 25, date(2024, 1, 5), Some("   "));

    let payees = top_payees(&db, None, 10).unwrap();
    assert_eq!(payees.len(), 3);
    assert_eq!(payees[0].name, "Bolt");
    assert_eq!(payees[1].name, "Rimi");
    assert_eq!(payees[1].count, 2);
    assert_eq!(payees[1].total, 3001);
    assert_eq!(payees[1].average, 1500);
    assert_eq!(payees[2].name, "Unknown");
    assert_eq!(payees[2].total, 75);
}

#[test]
fn test_top_payees_limit_and_year() {
    let db = Database::open_in_memory().unwrap();
    spend(&db, 100, date(2023, 5, 1), Some("Old Shop"));
    spend(&db, 300, date(2024, 5, 1), Some("A"));
    spend(&db, 200, date(2024, 5, 2), Some("B"));

    let payees = top_payees(&db, Some(2024), 1).unwrap();
    assert_eq!(payees.len(), 1);
    assert_eq!(payees[0].name, "A");
    assert!(top_payees(&db, Some(2020), 5).unwrap().is_empty());
}
