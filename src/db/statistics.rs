//! Aggregate expense queries for one car over an inclusive date range.

use crate::libs::statistics::{DateRange, ExpenseShare, ExpenseTotals, FuelConsumption, MonthlyExpense, StatisticsReport};
use anyhow::Result;
use rusqlite::{params, Connection};

const SELECT_FUEL_SUMMARY: &str = "SELECT COALESCE(SUM(total_amount), 0), COUNT(*), COALESCE(MAX(mileage) - MIN(mileage), 0), COALESCE(SUM(volume), 0)
    FROM refuelings
    WHERE car_id = ?1 AND date BETWEEN ?2 AND ?3";

const SELECT_MAINTENANCE_TOTAL: &str = "SELECT COALESCE(SUM(total_amount), 0)
    FROM maintenance
    WHERE car_id = ?1 AND date BETWEEN ?2 AND ?3";

const SELECT_MONTHLY: &str = "SELECT month, SUM(fuel), SUM(maintenance)
    FROM (
        SELECT strftime('%Y-%m', date) AS month, total_amount AS fuel, 0.0 AS maintenance
        FROM refuelings
        WHERE car_id = ?1 AND date BETWEEN ?2 AND ?3
        UNION ALL
        SELECT strftime('%Y-%m', date) AS month, 0.0 AS fuel, total_amount AS maintenance
        FROM maintenance
        WHERE car_id = ?1 AND date BETWEEN ?2 AND ?3
    )
    GROUP BY month
    ORDER BY month DESC";

pub struct Statistics<'a> {
    conn: &'a Connection,
}

impl<'a> Statistics<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Statistics { conn }
    }

    pub fn fuel_consumption(&self, car_id: i64, range: &DateRange) -> Result<FuelConsumption> {
        let (cost, count, distance, volume): (f64, i64, i64, f64) = self
            .conn
            .query_row(SELECT_FUEL_SUMMARY, params![car_id, range.from, range.to], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?;
        Ok(FuelConsumption::compute(cost, count, distance, volume))
    }

    pub fn totals(&self, car_id: i64, range: &DateRange) -> Result<ExpenseTotals> {
        let fuel = self.fuel_consumption(car_id, range)?;
        let maintenance: f64 = self
            .conn
            .query_row(SELECT_MAINTENANCE_TOTAL, params![car_id, range.from, range.to], |row| row.get(0))?;
        Ok(ExpenseTotals::new(fuel.fuel_cost, maintenance, fuel.distance_km))
    }

    /// Expenses per calendar month, newest first.
    pub fn monthly(&self, car_id: i64, range: &DateRange) -> Result<Vec<MonthlyExpense>> {
        let mut stmt = self.conn.prepare(SELECT_MONTHLY)?;
        let months = stmt
            .query_map(params![car_id, range.from, range.to], |row| {
                let fuel: f64 = row.get(1)?;
                let maintenance: f64 = row.get(2)?;
                Ok(MonthlyExpense {
                    month: row.get(0)?,
                    fuel,
                    maintenance,
                    total: fuel + maintenance,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(months)
    }

    pub fn report(&self, car_id: i64, range: DateRange) -> Result<StatisticsReport> {
        let consumption = self.fuel_consumption(car_id, &range)?;
        let totals = self.totals(car_id, &range)?;
        Ok(StatisticsReport {
            range,
            share: ExpenseShare::from(&totals),
            totals,
            consumption,
            monthly: self.monthly(car_id, &range)?,
        })
    }
}
