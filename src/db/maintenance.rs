//! Maintenance records and the per-service-type history the due evaluator
//! works from.

use super::cars::RAISE_CAR_MILEAGE;
use super::refuelings::Recorded;
use crate::libs::due::ServiceSchedule;
use crate::libs::error::CarlogError;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::debug;

const INSERT_MAINTENANCE: &str = "INSERT INTO maintenance (car_id, service_type_id, date, mileage, total_amount, description, next_service_mileage, next_service_date)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_MAINTENANCE_FOR_CAR: &str = "SELECT m.maintenance_id, m.car_id, m.service_type_id, COALESCE(st.name, ''), m.date, m.mileage, m.total_amount,
        COALESCE(m.description, ''), m.next_service_mileage, m.next_service_date
    FROM maintenance m
    LEFT JOIN service_types st ON st.service_type_id = m.service_type_id
    WHERE m.car_id = ?1
    ORDER BY m.date DESC, m.mileage DESC";

/// Every service type with the highest mileage it was performed at on one
/// car, 0 when it never was.
const SELECT_SERVICE_SCHEDULES: &str = "SELECT st.service_type_id, st.name, st.interval_km, COALESCE(MAX(m.mileage), 0)
    FROM service_types st
    LEFT JOIN maintenance m ON m.service_type_id = st.service_type_id AND m.car_id = ?1
    GROUP BY st.service_type_id, st.name, st.interval_km
    ORDER BY st.service_type_id";

/// Input of [`MaintenanceLog::insert`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenance {
    pub car_id: i64,
    pub service_type_id: i64,
    pub date: NaiveDate,
    pub mileage: i64,
    pub total_amount: f64,
    pub description: String,
    pub next_service_mileage: Option<i64>,
    pub next_service_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    pub id: i64,
    pub car_id: i64,
    pub service_type_id: i64,
    pub service_name: String,
    pub date: NaiveDate,
    pub mileage: i64,
    pub total_amount: f64,
    pub description: String,
    pub next_service_mileage: Option<i64>,
    pub next_service_date: Option<NaiveDate>,
}

pub struct MaintenanceLog<'a> {
    conn: &'a Connection,
}

impl<'a> MaintenanceLog<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        MaintenanceLog { conn }
    }

    /// Stores the record and raises the car's mileage if it is lower.
    pub fn insert(&self, record: &NewMaintenance) -> Result<Recorded> {
        if record.mileage < 0 {
            return Err(CarlogError::InvalidInput("mileage must not be negative".to_string()).into());
        }
        if record.total_amount < 0.0 {
            return Err(CarlogError::InvalidInput("amount must not be negative".to_string()).into());
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            INSERT_MAINTENANCE,
            params![
                record.car_id,
                record.service_type_id,
                record.date,
                record.mileage,
                record.total_amount,
                record.description,
                record.next_service_mileage,
                record.next_service_date,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let raised = tx.execute(RAISE_CAR_MILEAGE, params![record.mileage, record.car_id])?;
        tx.commit()?;

        debug!(maintenance_id = id, car_id = record.car_id, mileage_raised = raised > 0, "maintenance recorded");
        Ok(Recorded {
            id,
            mileage_raised: raised > 0,
        })
    }

    /// Maintenance of a car, newest first.
    pub fn history(&self, car_id: i64) -> Result<Vec<Maintenance>> {
        let mut stmt = self.conn.prepare(SELECT_MAINTENANCE_FOR_CAR)?;
        let records = stmt
            .query_map(params![car_id], |row| {
                Ok(Maintenance {
                    id: row.get(0)?,
                    car_id: row.get(1)?,
                    service_type_id: row.get(2)?,
                    service_name: row.get(3)?,
                    date: row.get(4)?,
                    mileage: row.get(5)?,
                    total_amount: row.get(6)?,
                    description: row.get(7)?,
                    next_service_mileage: row.get(8)?,
                    next_service_date: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Due evaluator input for one car, one entry per service type.
    pub fn service_schedules(&self, car_id: i64) -> Result<Vec<ServiceSchedule>> {
        let mut stmt = self.conn.prepare(SELECT_SERVICE_SCHEDULES)?;
        let schedules = stmt
            .query_map(params![car_id], |row| {
                Ok(ServiceSchedule {
                    service_type_id: row.get(0)?,
                    service_name: row.get(1)?,
                    interval_km: row.get(2)?,
                    last_serviced_mileage: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(schedules)
    }
}
