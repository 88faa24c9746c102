//! Vehicle records.
//!
//! Cars belong to one user. Every query is scoped by the owner id, so a car
//! of another user behaves exactly like a missing one.

use crate::libs::error::CarlogError;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SELECT_CARS_FOR_USER: &str = "SELECT c.car_id, c.user_id, c.model_id, COALESCE(b.name, ''), COALESCE(m.name, ''), COALESCE(c.mileage, 0), c.photo
    FROM cars c
    LEFT JOIN car_models m ON m.model_id = c.model_id
    LEFT JOIN car_brands b ON b.brand_id = m.brand_id
    WHERE c.user_id = ?1
    ORDER BY c.car_id";

const SELECT_CAR_OWNER: &str = "SELECT user_id FROM cars WHERE car_id = ?1";

const INSERT_CAR: &str = "INSERT INTO cars (user_id, model_id, mileage, photo) VALUES (?1, ?2, ?3, ?4)";

const UPDATE_CAR: &str = "UPDATE cars SET model_id = ?1, mileage = ?2, photo = ?3 WHERE car_id = ?4 AND user_id = ?5";

const DELETE_CAR_MAINTENANCE: &str = "DELETE FROM maintenance WHERE car_id = ?1";

const DELETE_CAR_REFUELINGS: &str = "DELETE FROM refuelings WHERE car_id = ?1";

const DELETE_CAR: &str = "DELETE FROM cars WHERE car_id = ?1 AND user_id = ?2";

/// Raises the stored mileage, never lowers it.
pub(crate) const RAISE_CAR_MILEAGE: &str = "UPDATE cars SET mileage = ?1 WHERE car_id = ?2 AND (mileage IS NULL OR mileage < ?1)";

/// A car with its brand and model names resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub user_id: i64,
    pub model_id: Option<i64>,
    pub brand: String,
    pub model: String,
    pub mileage: i64,
    #[serde(skip)]
    pub photo: Option<Vec<u8>>,
    /// `"<brand> <model>"`, or `"Car <n>"` when either name is missing.
    pub display_name: String,
}

impl Car {
    fn from_row(row: &Row, position: usize) -> rusqlite::Result<Self> {
        let brand: String = row.get(3)?;
        let model: String = row.get(4)?;
        Ok(Car {
            id: row.get(0)?,
            user_id: row.get(1)?,
            model_id: row.get(2)?,
            display_name: display_name(&brand, &model, position),
            brand,
            model,
            mileage: row.get(5)?,
            photo: row.get(6)?,
        })
    }
}

/// Display name for the car at 1-based `position` in its owner's list.
pub fn display_name(brand: &str, model: &str, position: usize) -> String {
    let (brand, model) = (brand.trim(), model.trim());
    if brand.is_empty() || model.is_empty() {
        format!("Car {}", position)
    } else {
        format!("{} {}", brand, model)
    }
}

/// Field values for creating or editing a car.
#[derive(Debug, Clone, Default)]
pub struct CarForm {
    pub model_id: Option<i64>,
    pub mileage: i64,
    pub photo: Option<Vec<u8>>,
}

pub struct Cars<'a> {
    conn: &'a Connection,
}

impl<'a> Cars<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Cars { conn }
    }

    pub fn list_for_user(&self, user_id: i64) -> Result<Vec<Car>> {
        let mut stmt = self.conn.prepare(SELECT_CARS_FOR_USER)?;
        let mut rows = stmt.query(params![user_id])?;

        let mut cars = Vec::new();
        while let Some(row) = rows.next()? {
            cars.push(Car::from_row(row, cars.len() + 1)?);
        }
        Ok(cars)
    }

    /// The car if it exists and belongs to `user_id`.
    pub fn get(&self, user_id: i64, car_id: i64) -> Result<Option<Car>> {
        Ok(self.list_for_user(user_id)?.into_iter().find(|car| car.id == car_id))
    }

    /// Like [`get`](Self::get), failing with [`CarlogError::CarNotFound`].
    pub fn require(&self, user_id: i64, car_id: i64) -> Result<Car> {
        self.get(user_id, car_id)?.ok_or_else(|| CarlogError::CarNotFound(car_id).into())
    }

    pub fn insert(&self, user_id: i64, form: &CarForm) -> Result<i64> {
        if form.mileage < 0 {
            return Err(CarlogError::InvalidInput("mileage must not be negative".to_string()).into());
        }
        self.conn.execute(INSERT_CAR, params![user_id, form.model_id, form.mileage, form.photo])?;
        let car_id = self.conn.last_insert_rowid();
        debug!(car_id, user_id, "car added");
        Ok(car_id)
    }

    /// Overwrites model, mileage and photo of an owned car.
    pub fn update(&self, user_id: i64, car_id: i64, form: &CarForm) -> Result<()> {
        if form.mileage < 0 {
            return Err(CarlogError::InvalidInput("mileage must not be negative".to_string()).into());
        }
        let affected = self.conn.execute(UPDATE_CAR, params![form.model_id, form.mileage, form.photo, car_id, user_id])?;
        if affected == 0 {
            return Err(CarlogError::CarNotFound(car_id).into());
        }
        Ok(())
    }

    /// Deletes an owned car together with its maintenance and refueling records.
    ///
    /// Nothing is deleted unless the car belongs to `user_id`.
    pub fn delete(&self, user_id: i64, car_id: i64) -> Result<()> {
        let owner: Option<i64> = self.conn.query_row(SELECT_CAR_OWNER, params![car_id], |row| row.get(0)).optional()?;
        if owner != Some(user_id) {
            return Err(CarlogError::CarNotFound(car_id).into());
        }

        let tx = self.conn.unchecked_transaction()?;
        let maintenance = tx.execute(DELETE_CAR_MAINTENANCE, params![car_id])?;
        let refuelings = tx.execute(DELETE_CAR_REFUELINGS, params![car_id])?;
        tx.execute(DELETE_CAR, params![car_id, user_id])?;
        tx.commit()?;

        debug!(car_id, maintenance, refuelings, "car deleted");
        Ok(())
    }
}
