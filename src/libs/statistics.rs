//! Expense and fuel consumption figures.
//!
//! The aggregates come from SQL (see [`crate::db::statistics`]); this module
//! holds the derived values so they can be tested without a database.

use super::error::CarlogError;
use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(CarlogError::InvalidInput(format!("range start {} is after its end {}", from, to)).into());
        }
        Ok(DateRange { from, to })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseTotals {
    pub fuel: f64,
    pub maintenance: f64,
    pub total: f64,
    /// Highest minus lowest refueling mileage in the range.
    pub distance_km: i64,
}

impl ExpenseTotals {
    pub fn new(fuel: f64, maintenance: f64, distance_km: i64) -> Self {
        ExpenseTotals {
            fuel,
            maintenance,
            total: fuel + maintenance,
            distance_km,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpense {
    /// `YYYY-MM`
    pub month: String,
    pub fuel: f64,
    pub maintenance: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FuelConsumption {
    pub fuel_cost: f64,
    pub refuel_count: i64,
    pub distance_km: i64,
    pub total_volume: f64,
    /// Litres per 100 km.
    pub avg_consumption: f64,
    pub cost_per_km: f64,
}

impl FuelConsumption {
    /// Both ratios are 0 when no distance was driven.
    pub fn compute(fuel_cost: f64, refuel_count: i64, distance_km: i64, total_volume: f64) -> Self {
        let (avg_consumption, cost_per_km) = if distance_km > 0 {
            let distance = distance_km as f64;
            (total_volume / distance * 100.0, fuel_cost / distance)
        } else {
            (0.0, 0.0)
        };

        FuelConsumption {
            fuel_cost,
            refuel_count,
            distance_km,
            total_volume,
            avg_consumption,
            cost_per_km,
        }
    }
}

/// Fuel and maintenance percentages of the total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub fuel_percent: f64,
    pub maintenance_percent: f64,
}

impl From<&ExpenseTotals> for ExpenseShare {
    fn from(totals: &ExpenseTotals) -> Self {
        if totals.total <= 0.0 {
            return ExpenseShare::default();
        }
        ExpenseShare {
            fuel_percent: totals.fuel / totals.total * 100.0,
            maintenance_percent: totals.maintenance / totals.total * 100.0,
        }
    }
}

/// Everything the `stats` command shows for one car and range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub range: DateRange,
    pub totals: ExpenseTotals,
    pub share: ExpenseShare,
    pub consumption: FuelConsumption,
    /// Newest month first.
    pub monthly: Vec<MonthlyExpense>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumption_per_hundred_km() {
        let consumption = FuelConsumption::compute(3_000.0, 2, 500, 40.0);
        assert_eq!(consumption.avg_consumption, 8.0);
        assert_eq!(consumption.cost_per_km, 6.0);
    }

    #[test]
    fn zero_distance_gives_zero_ratios() {
        let consumption = FuelConsumption::compute(1_500.0, 1, 0, 30.0);
        assert_eq!(consumption.avg_consumption, 0.0);
        assert_eq!(consumption.cost_per_km, 0.0);
    }

    #[test]
    fn shares_of_total() {
        let totals = ExpenseTotals::new(750.0, 250.0, 1_000);
        let share = ExpenseShare::from(&totals);
        assert_eq!(share.fuel_percent, 75.0);
        assert_eq!(share.maintenance_percent, 25.0);
        assert_eq!(ExpenseShare::from(&ExpenseTotals::default()), ExpenseShare::default());
    }

    #[test]
    fn reversed_range_is_rejected() {
        let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert!(DateRange::new(from, to).is_err());
        assert!(DateRange::new(to, from).is_ok());
    }
}
