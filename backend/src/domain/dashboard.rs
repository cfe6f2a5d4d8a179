//! Dashboard roll-ups over recorded sales.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ClientId, Error, Sale};

/// Number of top clients reported when the caller does not ask for more.
pub const DEFAULT_TOP_CLIENTS: usize = 5;

/// Inclusive calendar range.
///
/// ## Invariants
/// - `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting one that ends before it starts.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, Error> {
        if to < from {
            return Err(Error::invalid_field_with_value(
                "to",
                "to must not be before from",
                to.to_string(),
            ));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of days covered, counting both ends.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2026, 2, 1).expect("date");
    /// let range = DateRange::new(day, day).expect("ordered");
    /// assert_eq!(range.days(), 1);
    /// ```
    pub fn days(&self) -> i64 {
        self.to.signed_duration_since(self.from).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

/// Query accepted by the dashboard summary endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRevenue {
    pub client_id: ClientId,
    pub revenue: f64,
    pub sales: u64,
}

/// Derived metrics for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: i64,
    pub total_revenue: f64,
    pub total_sales: u64,
    pub average_revenue_per_day: f64,
    pub average_sales_per_day: f64,
    /// Zero when the range holds no sales.
    pub average_revenue_per_sale: f64,
    pub top_clients: Vec<ClientRevenue>,
}

impl DashboardSummary {
    /// Roll up `sales` falling inside `range`.
    ///
    /// Sales outside the range are ignored. Top clients are ordered by
    /// revenue, then by sale count, then by identifier.
    pub fn compute(range: DateRange, sales: &[Sale], top: usize) -> Self {
        let mut per_client: HashMap<ClientId, ClientRevenue> = HashMap::new();
        let mut total_revenue = 0.0;
        let mut total_sales = 0_u64;

        for sale in sales.iter().filter(|sale| range.contains(sale.sold_on)) {
            total_revenue += sale.amount;
            total_sales += 1;
            let entry = per_client
                .entry(sale.client_id)
                .or_insert_with(|| ClientRevenue {
                    client_id: sale.client_id,
                    revenue: 0.0,
                    sales: 0,
                });
            entry.revenue += sale.amount;
            entry.sales += 1;
        }

        let mut top_clients: Vec<ClientRevenue> = per_client.into_values().collect();
        top_clients.sort_by(|a, b| {
            b.revenue
                .total_cmp(&a.revenue)
                .then_with(|| b.sales.cmp(&a.sales))
                .then_with(|| a.client_id.as_uuid().cmp(b.client_id.as_uuid()))
        });
        top_clients.truncate(top);

        let days = range.days();
        Self {
            from: range.from(),
            to: range.to(),
            days,
            total_revenue,
            total_sales,
            average_revenue_per_day: average_per_day(total_revenue, days),
            average_sales_per_day: average_per_day(total_sales as f64, days),
            average_revenue_per_sale: average_revenue(total_revenue, total_sales),
            top_clients,
        }
    }
}

/// Spread `total` evenly over `days`; zero for an empty span.
pub fn average_per_day(total: f64, days: i64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    total / days as f64
}

/// Mean revenue per sale; zero when nothing was sold.
pub fn average_revenue(total_revenue: f64, sales: u64) -> f64 {
    if sales == 0 {
        return 0.0;
    }
    total_revenue / sales as f64
}

#[cfg(test)]
mod tests;
