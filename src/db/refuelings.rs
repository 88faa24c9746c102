//! Refueling records.
//!
//! Recording a refueling also moves the car's odometer forward. Both writes
//! share one transaction, and the odometer is only ever raised.

use super::cars::RAISE_CAR_MILEAGE;
use crate::libs::error::CarlogError;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INSERT_REFUELING: &str = "INSERT INTO refuelings (car_id, fuel_id, station_id, date, mileage, volume, price_per_liter, total_amount, full_tank)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const SELECT_REFUELINGS_FOR_CAR: &str = "SELECT r.refueling_id, r.car_id, r.date, r.mileage, r.volume, r.price_per_liter, r.total_amount, r.full_tank,
        COALESCE(f.name, ''), COALESCE(s.name, '')
    FROM refuelings r
    LEFT JOIN fuels f ON f.fuel_id = r.fuel_id
    LEFT JOIN gas_stations s ON s.station_id = r.station_id
    WHERE r.car_id = ?1
    ORDER BY r.date DESC, r.mileage DESC";

/// Input of [`Refuelings::insert`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewRefueling {
    pub car_id: i64,
    pub fuel_id: Option<i64>,
    pub station_id: Option<i64>,
    pub date: NaiveDate,
    pub mileage: i64,
    /// Litres.
    pub volume: f64,
    pub price_per_liter: f64,
    pub full_tank: bool,
}

impl NewRefueling {
    pub fn total_amount(&self) -> f64 {
        self.volume * self.price_per_liter
    }

    fn validate(&self) -> Result<()> {
        if self.mileage < 0 {
            return Err(CarlogError::InvalidInput("mileage must not be negative".to_string()).into());
        }
        if self.volume <= 0.0 {
            return Err(CarlogError::InvalidInput("volume must be positive".to_string()).into());
        }
        if self.price_per_liter < 0.0 {
            return Err(CarlogError::InvalidInput("price must not be negative".to_string()).into());
        }
        Ok(())
    }
}

/// A stored refueling with fuel and station names resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refueling {
    pub id: i64,
    pub car_id: i64,
    pub date: NaiveDate,
    pub mileage: i64,
    pub volume: f64,
    pub price_per_liter: f64,
    pub total_amount: f64,
    pub full_tank: bool,
    pub fuel_name: String,
    pub station_name: String,
}

/// Result of a write that may move the odometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    pub id: i64,
    /// Whether the car's stored mileage was raised to the record's mileage.
    pub mileage_raised: bool,
}

pub struct Refuelings<'a> {
    conn: &'a Connection,
}

impl<'a> Refuelings<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Refuelings { conn }
    }

    /// Stores the refueling and raises the car's mileage if it is lower.
    pub fn insert(&self, refueling: &NewRefueling) -> Result<Recorded> {
        refueling.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            INSERT_REFUELING,
            params![
                refueling.car_id,
                refueling.fuel_id,
                refueling.station_id,
                refueling.date,
                refueling.mileage,
                refueling.volume,
                refueling.price_per_liter,
                refueling.total_amount(),
                refueling.full_tank,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let raised = tx.execute(RAISE_CAR_MILEAGE, params![refueling.mileage, refueling.car_id])?;
        tx.commit()?;

        debug!(refueling_id = id, car_id = refueling.car_id, mileage_raised = raised > 0, "refueling recorded");
        Ok(Recorded {
            id,
            mileage_raised: raised > 0,
        })
    }

    /// Refuelings of a car, newest first.
    pub fn history(&self, car_id: i64) -> Result<Vec<Refueling>> {
        let mut stmt = self.conn.prepare(SELECT_REFUELINGS_FOR_CAR)?;
        let refuelings = stmt
            .query_map(params![car_id], |row| {
                Ok(Refueling {
                    id: row.get(0)?,
                    car_id: row.get(1)?,
                    date: row.get(2)?,
                    mileage: row.get(3)?,
                    volume: row.get(4)?,
                    price_per_liter: row.get(5)?,
                    total_amount: row.get(6)?,
                    full_tank: row.get(7)?,
                    fuel_name: row.get(8)?,
                    station_name: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(refuelings)
    }
}
