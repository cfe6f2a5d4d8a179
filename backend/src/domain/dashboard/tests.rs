//! Tests for dashboard roll-ups.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).expect("valid date")
}

fn sale(client_id: ClientId, amount: f64, day: u32) -> Sale {
    Sale {
        id: Uuid::new_v4(),
        client_id,
        amount,
        sold_on: date(day),
        concept: None,
        recorded_at: Utc
            .with_ymd_and_hms(2026, 3, day, 18, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

struct Ledger {
    alice: ClientId,
    bruno: ClientId,
    sales: Vec<Sale>,
}

#[fixture]
fn ledger() -> Ledger {
    let alice = ClientId::from(Uuid::from_u128(1));
    let bruno = ClientId::from(Uuid::from_u128(2));
    let sales = vec![
        sale(alice, 30.0, 1),
        sale(bruno, 50.0, 2),
        sale(alice, 40.0, 4),
        sale(bruno, 10.0, 20),
    ];
    Ledger {
        alice,
        bruno,
        sales,
    }
}

#[rstest]
fn inverted_range_is_rejected() {
    let error = DateRange::new(date(10), date(9)).expect_err("range is inverted");
    assert_eq!(error.code(), ErrorCode::ValidationError);
}

#[rstest]
#[case(1, 1, 1)]
#[case(1, 10, 10)]
#[case(1, 31, 31)]
fn range_days_are_inclusive(#[case] from: u32, #[case] to: u32, #[case] expected: i64) {
    let range = DateRange::new(date(from), date(to)).expect("ordered range");
    assert_eq!(range.days(), expected);
}

#[rstest]
fn summary_covers_only_sales_inside_the_range(ledger: Ledger) {
    let range = DateRange::new(date(1), date(4)).expect("ordered range");
    let summary = DashboardSummary::compute(range, &ledger.sales, DEFAULT_TOP_CLIENTS);

    assert_eq!(summary.days, 4);
    assert_eq!(summary.total_sales, 3);
    assert!((summary.total_revenue - 120.0).abs() < f64::EPSILON);
    assert!((summary.average_revenue_per_day - 30.0).abs() < f64::EPSILON);
    assert!((summary.average_sales_per_day - 0.75).abs() < f64::EPSILON);
    assert!((summary.average_revenue_per_sale - 40.0).abs() < f64::EPSILON);
}

#[rstest]
fn top_clients_are_ranked_by_revenue_and_truncated(ledger: Ledger) {
    let range = DateRange::new(date(1), date(31)).expect("ordered range");

    let summary = DashboardSummary::compute(range, &ledger.sales, 1);
    assert_eq!(summary.top_clients.len(), 1);
    assert_eq!(summary.top_clients[0].client_id, ledger.alice);

    let summary = DashboardSummary::compute(range, &ledger.sales, 5);
    let ranked: Vec<ClientId> = summary.top_clients.iter().map(|c| c.client_id).collect();
    assert_eq!(ranked, vec![ledger.alice, ledger.bruno]);
}

#[rstest]
fn empty_range_reports_zero_averages() {
    let range = DateRange::new(date(5), date(9)).expect("ordered range");
    let summary = DashboardSummary::compute(range, &[], DEFAULT_TOP_CLIENTS);

    assert_eq!(summary.total_sales, 0);
    assert_eq!(summary.average_revenue_per_sale, 0.0);
    assert_eq!(summary.average_revenue_per_day, 0.0);
    assert!(summary.top_clients.is_empty());
}

#[rstest]
#[case(0.0, 0, 0.0)]
#[case(100.0, 4, 25.0)]
fn average_revenue_handles_zero_sales(#[case] total: f64, #[case] sales: u64, #[case] expected: f64) {
    assert!((average_revenue(total, sales) - expected).abs() < f64::EPSILON);
}
