use super::formatter::{format_date, format_km, format_money, format_optional_date, format_optional_km, format_percent};
use super::messages::Message;
use super::notification::Notification;
use super::statistics::StatisticsReport;
use crate::db::cars::Car;
use crate::db::catalog::{Brand, Fuel, GasStation, Model, ServiceType};
use crate::db::maintenance::Maintenance;
use crate::db::refuelings::Refueling;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// `current` marks the selected car.
    pub fn cars(cars: &[Car], current: Option<i64>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "ID", "NAME", "BRAND", "MODEL", "MILEAGE", "PHOTO"]);
        for car in cars {
            table.add_row(row![
                if Some(car.id) == current { "*" } else { "" },
                car.id,
                car.display_name,
                car.brand,
                car.model,
                r->format_km(car.mileage),
                if car.photo.is_some() { "yes" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn brands(brands: &[Brand]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "BRAND"]);
        for brand in brands {
            table.add_row(row![brand.id, brand.name]);
        }
        table.printstd();

        Ok(())
    }

    pub fn models(models: &[Model]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "MODEL"]);
        for model in models {
            table.add_row(row![model.id, model.name]);
        }
        table.printstd();

        Ok(())
    }

    pub fn fuels(fuels: &[Fuel]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "FUEL", "MARKING"]);
        for fuel in fuels {
            table.add_row(row![fuel.id, fuel.name, fuel.marking]);
        }
        table.printstd();

        Ok(())
    }

    pub fn stations(stations: &[GasStation]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "STATION", "ADDRESS"]);
        for station in stations {
            table.add_row(row![station.id, station.name, station.address]);
        }
        table.printstd();

        Ok(())
    }

    pub fn service_types(types: &[ServiceType]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "CATEGORY", "SERVICE", "INTERVAL"]);
        for service in types {
            let interval = if service.interval_km > 0 {
                format_km(service.interval_km)
            } else {
                "as needed".to_string()
            };
            table.add_row(row![service.id, service.category_name, service.name, r->interval]);
        }
        table.printstd();

        Ok(())
    }

    pub fn refuelings(refuelings: &[Refueling]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "MILEAGE", "FUEL", "STATION", "LITRES", "PRICE", "TOTAL", "FULL"]);
        for refueling in refuelings {
            table.add_row(row![
                refueling.id,
                format_date(&refueling.date),
                r->format_km(refueling.mileage),
                refueling.fuel_name,
                refueling.station_name,
                r->format_money(refueling.volume),
                r->format_money(refueling.price_per_liter),
                r->format_money(refueling.total_amount),
                if refueling.full_tank { "yes" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn maintenance(records: &[Maintenance]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "MILEAGE", "SERVICE", "COST", "DESCRIPTION", "NEXT AT", "NEXT DATE"]);
        for record in records {
            table.add_row(row![
                record.id,
                format_date(&record.date),
                r->format_km(record.mileage),
                record.service_name,
                r->format_money(record.total_amount),
                record.description,
                r->format_optional_km(&record.next_service_mileage),
                format_optional_date(&record.next_service_date)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn notifications(notifications: &[Notification]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "", "TITLE", "MESSAGE"]);
        for notification in notifications {
            table.add_row(row![
                notification.id,
                if notification.is_read { "" } else { "●" },
                notification.title,
                notification.message
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn statistics(report: &StatisticsReport) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["FUEL", r->format_money(report.totals.fuel), r->format_percent(report.share.fuel_percent)]);
        table.add_row(row![
            "MAINTENANCE",
            r->format_money(report.totals.maintenance),
            r->format_percent(report.share.maintenance_percent)
        ]);
        table.add_row(row!["TOTAL", r->format_money(report.totals.total), ""]);
        table.add_row(row!["DISTANCE", r->format_km(report.totals.distance_km), ""]);
        table.add_row(row!["REFUELINGS", r->report.consumption.refuel_count, ""]);
        table.add_row(row!["VOLUME, L", r->format_money(report.consumption.total_volume), ""]);
        table.add_row(row!["L/100 KM", r->format_money(report.consumption.avg_consumption), ""]);
        table.add_row(row!["COST PER KM", r->format_money(report.consumption.cost_per_km), ""]);
        table.printstd();

        if report.monthly.is_empty() {
            return Ok(());
        }

        println!("\n{}", Message::MonthlyExpensesHeader);
        let mut monthly = Table::new();
        monthly.add_row(row!["MONTH", "FUEL", "MAINTENANCE", "TOTAL"]);
        for month in &report.monthly {
            monthly.add_row(row![
                month.month,
                r->format_money(month.fuel),
                r->format_money(month.maintenance),
                r->format_money(month.total)
            ]);
        }
        monthly.printstd();

        Ok(())
    }
}
