//! Reference data: car brands and models, fuels, gas stations and the service
//! catalog (categories and service types with their distance intervals).

use crate::libs::error::CarlogError;
use crate::libs::notification::MAX_SERVICE_TYPE_ID;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const SELECT_BRANDS: &str = "SELECT brand_id, name FROM car_brands ORDER BY name";
const INSERT_BRAND: &str = "INSERT INTO car_brands (name) VALUES (?1)";

const SELECT_MODELS_FOR_BRAND: &str = "SELECT model_id, brand_id, name FROM car_models WHERE brand_id = ?1 ORDER BY name";
const INSERT_MODEL: &str = "INSERT INTO car_models (brand_id, name) VALUES (?1, ?2)";

const SELECT_FUELS: &str = "SELECT fuel_id, name, COALESCE(marking, '') FROM fuels ORDER BY fuel_id";
const INSERT_FUEL: &str = "INSERT INTO fuels (name, marking) VALUES (?1, ?2)";

const SELECT_STATIONS: &str = "SELECT station_id, name, COALESCE(address, '') FROM gas_stations ORDER BY name";
const INSERT_STATION: &str = "INSERT INTO gas_stations (name, address) VALUES (?1, ?2)";

const SELECT_CATEGORIES: &str = "SELECT category_id, name FROM service_categories ORDER BY category_id";

const SELECT_SERVICE_TYPES: &str = "SELECT st.service_type_id, st.name, st.category_id, COALESCE(sc.name, ''), st.interval_km
    FROM service_types st
    LEFT JOIN service_categories sc ON sc.category_id = st.category_id
    ORDER BY st.category_id, st.service_type_id";

const SELECT_SERVICE_TYPE: &str = "SELECT st.service_type_id, st.name, st.category_id, COALESCE(sc.name, ''), st.interval_km
    FROM service_types st
    LEFT JOIN service_categories sc ON sc.category_id = st.category_id
    WHERE st.service_type_id = ?1";

const INSERT_SERVICE_TYPE: &str = "INSERT INTO service_types (name, category_id, interval_km) VALUES (?1, ?2, ?3)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: i64,
    pub brand_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fuel {
    pub id: i64,
    pub name: String,
    pub marking: String,
}

impl Fuel {
    pub fn label(&self) -> String {
        if self.marking.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.marking)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasStation {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub category_name: String,
    /// `<= 0` means the service is done as needed.
    pub interval_km: i64,
}

pub struct Catalog<'a> {
    conn: &'a Connection,
}

impl<'a> Catalog<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Catalog { conn }
    }

    pub fn brands(&self) -> Result<Vec<Brand>> {
        let mut stmt = self.conn.prepare(SELECT_BRANDS)?;
        let brands = stmt
            .query_map([], |row| Ok(Brand { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(brands)
    }

    pub fn add_brand(&self, name: &str) -> Result<i64> {
        let name = required(name, "brand name")?;
        self.conn.execute(INSERT_BRAND, params![name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn models(&self, brand_id: i64) -> Result<Vec<Model>> {
        let mut stmt = self.conn.prepare(SELECT_MODELS_FOR_BRAND)?;
        let models = stmt
            .query_map(params![brand_id], |row| {
                Ok(Model {
                    id: row.get(0)?,
                    brand_id: row.get(1)?,
                    name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(models)
    }

    pub fn add_model(&self, brand_id: i64, name: &str) -> Result<i64> {
        let name = required(name, "model name")?;
        self.conn.execute(INSERT_MODEL, params![brand_id, name])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn fuels(&self) -> Result<Vec<Fuel>> {
        let mut stmt = self.conn.prepare(SELECT_FUELS)?;
        let fuels = stmt
            .query_map([], |row| {
                Ok(Fuel {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    marking: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(fuels)
    }

    pub fn add_fuel(&self, name: &str, marking: &str) -> Result<i64> {
        let name = required(name, "fuel name")?;
        self.conn.execute(INSERT_FUEL, params![name, marking.trim()])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn stations(&self) -> Result<Vec<GasStation>> {
        let mut stmt = self.conn.prepare(SELECT_STATIONS)?;
        let stations = stmt
            .query_map([], |row| {
                Ok(GasStation {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    address: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stations)
    }

    pub fn add_station(&self, name: &str, address: &str) -> Result<i64> {
        let name = required(name, "station name")?;
        self.conn.execute(INSERT_STATION, params![name, address.trim()])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn categories(&self) -> Result<Vec<ServiceCategory>> {
        let mut stmt = self.conn.prepare(SELECT_CATEGORIES)?;
        let categories = stmt
            .query_map([], |row| Ok(ServiceCategory { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn service_types(&self) -> Result<Vec<ServiceType>> {
        let mut stmt = self.conn.prepare(SELECT_SERVICE_TYPES)?;
        let types = stmt.query_map([], service_type_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(types)
    }

    pub fn service_type(&self, service_type_id: i64) -> Result<ServiceType> {
        self.conn
            .query_row(SELECT_SERVICE_TYPE, params![service_type_id], service_type_from_row)
            .optional()?
            .ok_or_else(|| CarlogError::ServiceTypeNotFound(service_type_id).into())
    }

    pub fn add_service_type(&self, name: &str, category_id: Option<i64>, interval_km: i64) -> Result<i64> {
        let name = required(name, "service name")?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(INSERT_SERVICE_TYPE, params![name, category_id, interval_km])?;
        let id = tx.last_insert_rowid();
        // Notification ids reserve a fixed number of slots per service type
        if id > MAX_SERVICE_TYPE_ID {
            return Err(CarlogError::InvalidInput(format!("service type id {} exceeds {}", id, MAX_SERVICE_TYPE_ID)).into());
        }
        tx.commit()?;
        Ok(id)
    }
}

fn service_type_from_row(row: &rusqlite::Row) -> rusqlite::Result<ServiceType> {
    Ok(ServiceType {
        id: row.get(0)?,
        name: row.get(1)?,
        category_id: row.get(2)?,
        category_name: row.get(3)?,
        interval_km: row.get(4)?,
    })
}

fn required<'n>(value: &'n str, field: &str) -> Result<&'n str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CarlogError::InvalidInput(format!("{} must not be empty", field)).into());
    }
    Ok(value)
}
