//! Dashboard Models

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// Reporting window
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DashboardPeriod {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl DashboardPeriod {
    /// Window length in days
    pub fn days(&self) -> i64 {
        match self {
            DashboardPeriod::Day => 1,
            DashboardPeriod::Week => 7,
            DashboardPeriod::Month => 30,
            DashboardPeriod::Year => 365,
        }
    }

    pub fn millis(&self) -> i64 {
        self.days() * 24 * 60 * 60 * 1000
    }
}

/// Current vs previous window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub current: f64,
    pub previous: f64,
    /// Percent change, 2 dp
    pub growth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub period: DashboardPeriod,
    pub revenue: MetricComparison,
    pub orders: MetricComparison,
    pub new_customers: MetricComparison,
    pub products_sold: MetricComparison,
}

/// One day bucket of the revenue chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RevenuePoint {
    /// `YYYY-MM-DD` (UTC)
    pub date: String,
    pub revenue: f64,
    pub orders: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TopProduct {
    /// `None` once the product has been removed; the name then comes from
    /// the order snapshot
    pub product_id: Option<i64>,
    pub product_name: String,
    pub quantity_sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_lengths() {
        assert_eq!(DashboardPeriod::Day.days(), 1);
        assert_eq!(DashboardPeriod::Week.days(), 7);
        assert_eq!(DashboardPeriod::Month.days(), 30);
        assert_eq!(DashboardPeriod::Year.days(), 365);
        assert_eq!(DashboardPeriod::default(), DashboardPeriod::Month);
    }

    #[test]
    fn test_period_deserialize() {
        let p: DashboardPeriod = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(p, DashboardPeriod::Week);
        assert_eq!(DashboardPeriod::Day.millis(), 86_400_000);
    }
}
