//! Display implementation for carlog application messages.
//!
//! All user-facing wording is defined here, in one match over [`Message`].
//! Distances inside sentences go through the same formatter as the tables so
//! that `50 500 km` reads the same everywhere.
//!
//! ```rust
//! use carlog::libs::messages::Message;
//!
//! assert_eq!(Message::CarAdded("Lada Vesta".into()).to_string(), "Car 'Lada Vesta' added");
//! ```

use super::types::Message;
use crate::libs::formatter::format_km;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === ACCOUNT MESSAGES ===
            Message::Registered(username) => format!("Account '{}' created, you are now logged in", username),
            Message::LoggedIn(name) => format!("Welcome, {}!", name),
            Message::LoggedOut => "Logged out".to_string(),
            Message::PromptFullName => "Full name".to_string(),
            Message::PromptUsername => "Username".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PasswordsDoNotMatch => "Passwords do not match".to_string(),

            // === CAR MESSAGES ===
            Message::CarsHeader => "Your cars:".to_string(),
            Message::NoCars => "No cars yet. Add one with `carlog car add`".to_string(),
            Message::CarAdded(name) => format!("Car '{}' added", name),
            Message::CarUpdated(name) => format!("Car '{}' updated", name),
            Message::CarDeleted(name) => format!("Car '{}' and its records deleted", name),
            Message::CarSelected(name) => format!("Selected car: {}", name),
            Message::CarSelectionCleared => "Car selection cleared, commands now cover all your cars".to_string(),
            Message::ConfirmDeleteCar(name) => {
                format!("Delete '{}' together with all its refueling and maintenance records?", name)
            }
            Message::CarDeleteCancelled => "Deletion cancelled".to_string(),
            Message::PromptSelectCar => "Select a car".to_string(),
            Message::PromptSelectBrand => "Brand".to_string(),
            Message::PromptSelectModel => "Model".to_string(),
            Message::PromptMileage => "Mileage, km".to_string(),
            Message::NoBrands => "The catalog has no brands. Add one with `carlog catalog add-brand`".to_string(),
            Message::NoModels(brand) => format!("No models for {}. Add one with `carlog catalog add-model`", brand),
            Message::KeepCurrentModel(name) => format!("Keep current model ({})?", name),

            // === CATALOG MESSAGES ===
            Message::BrandsHeader => "Car brands:".to_string(),
            Message::ModelsHeader(brand) => format!("{} models:", brand),
            Message::FuelsHeader => "Fuels:".to_string(),
            Message::StationsHeader => "Gas stations:".to_string(),
            Message::ServiceTypesHeader => "Service types:".to_string(),
            Message::BrandAdded(name) => format!("Brand '{}' added", name),
            Message::ModelAdded(name) => format!("Model '{}' added", name),
            Message::FuelAdded(name) => format!("Fuel '{}' added", name),
            Message::StationAdded(name) => format!("Gas station '{}' added", name),
            Message::ServiceTypeAdded(name) => format!("Service type '{}' added", name),
            Message::CatalogEmpty => "Nothing here yet".to_string(),

            // === REFUELING MESSAGES ===
            Message::RefuelingRecorded(car) => format!("Refueling of {} recorded", car),
            Message::RefuelingsHeader(car) => format!("Refueling history of {}:", car),
            Message::NoRefuelings => "No refuelings recorded".to_string(),
            Message::PromptDate => "Date (dd.mm.yyyy)".to_string(),
            Message::PromptSelectFuel => "Fuel".to_string(),
            Message::PromptSelectStation => "Gas station".to_string(),
            Message::PromptVolume => "Volume, l".to_string(),
            Message::PromptPricePerLiter => "Price per litre".to_string(),
            Message::PromptFullTank => "Full tank?".to_string(),
            Message::NotSpecified => "Not specified".to_string(),

            // === MAINTENANCE MESSAGES ===
            Message::MaintenanceRecorded(service) => format!("{} recorded", service),
            Message::MaintenanceHeader(car) => format!("Maintenance history of {}:", car),
            Message::NoMaintenance => "No maintenance recorded".to_string(),
            Message::PromptSelectServiceType => "Service".to_string(),
            Message::PromptAmount => "Cost".to_string(),
            Message::PromptDescription => "Description".to_string(),
            Message::PromptNextServiceMileage => "Next service at, km (leave empty for none)".to_string(),
            Message::PromptNextServiceDate => "Next service date (leave empty for none)".to_string(),
            Message::ForecastHeader(service) => format!("Forecast for {}:", service),
            Message::ForecastNextMileage(km) => format!("Next service at {}", format_km(*km)),
            Message::ForecastNextDate(date) => format!("Expected around {}", date),
            Message::ForecastNoDate => "Less than a month of driving away".to_string(),
            Message::ForecastAsNeeded(service) => format!("{} has no fixed interval, it is done as needed", service),
            Message::ForecastMileageForDate(date, km) => format!("By {} the car will be at about {}", date, format_km(*km)),

            // === ODOMETER MESSAGES ===
            Message::MileageRaised(km) => format!("Car mileage updated to {}", format_km(*km)),
            Message::MileageUnchanged(km) => format!("Car mileage stays at {}", format_km(*km)),

            // === NOTIFICATION MESSAGES ===
            Message::NotificationsHeader(car, mileage) => format!("{} ({})", car, format_km(*mileage)),
            Message::UrgentTierHeader => "Urgent".to_string(),
            Message::RecommendationTierHeader => "Recommendations".to_string(),
            Message::InfoTierHeader => "Information".to_string(),
            Message::RemindersHeader => "Reminders".to_string(),
            Message::UnreadNotifications(count) => format!("{} unread notification(s)", count),
            Message::NotificationMarkedRead(id) => format!("Notification {} marked as read", id),
            Message::NotificationNotFound(id) => format!("Notification {} not found", id),
            Message::AllNotificationsMarkedRead(count) => format!("{} notification(s) marked as read", count),
            Message::NotificationOverdueTitle(service) => format!("Overdue: {}", service),
            Message::NotificationOverdue {
                car,
                service,
                overdue_km,
                last_mileage,
                current_mileage,
            } => format!(
                "{}: {} is overdue by {}. Last done at {}, now at {}",
                car,
                service,
                format_km(*overdue_km),
                format_km(*last_mileage),
                format_km(*current_mileage)
            ),
            Message::NotificationUrgentTitle(service) => format!("Due soon: {}", service),
            Message::NotificationUrgent {
                car,
                service,
                remaining_km,
                current_mileage,
            } => format!(
                "{}: {} is due in {} (now at {})",
                car,
                service,
                format_km(*remaining_km),
                format_km(*current_mileage)
            ),
            Message::NotificationRecommendationTitle(service) => format!("Plan ahead: {}", service),
            Message::NotificationRecommendation {
                car,
                service,
                remaining_km,
                current_mileage,
            } => format!(
                "{}: plan {} within the next {} (now at {})",
                car,
                service,
                format_km(*remaining_km),
                format_km(*current_mileage)
            ),
            Message::NotificationAllClearTitle => "All clear".to_string(),
            Message::NotificationAllClear { car, current_mileage } => {
                format!("{}: no maintenance needed right now (at {})", car, format_km(*current_mileage))
            }
            Message::ReminderRegularCheckTitle => "Regular check".to_string(),
            Message::ReminderRegularCheck { car, current_mileage } => format!(
                "{}: check tyre pressure and fluid levels (at {})",
                car,
                format_km(*current_mileage)
            ),
            Message::ReminderSeasonalTitle => "Seasonal service".to_string(),
            Message::ReminderSeasonal { car, advice } => format!("{}: {}", car, advice),
            Message::SeasonWinter => "prepare for winter: winter tyres, battery and antifreeze".to_string(),
            Message::SeasonSpring => "spring service: summer tyres, wash the underbody, check the suspension".to_string(),
            Message::SeasonSummer => "summer check: air conditioning and engine cooling".to_string(),
            Message::SeasonAutumn => "prepare for autumn: wipers, lights and brakes".to_string(),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader(car, from, to) => format!("Expenses of {} from {} to {}:", car, from, to),
            Message::MonthlyExpensesHeader => "By month:".to_string(),
            Message::NoExpensesInRange => "No expenses in this period".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::PromptSelectModules => "Select the modules to configure".to_string(),
            Message::ConfigModuleDatabase => "Database".to_string(),
            Message::PromptDatabasePath => "Database file (leave empty for the default location)".to_string(),
            Message::ConfigModuleNotifications => "Notifications".to_string(),
            Message::PromptUrgentWithin => "Urgent when due within, km".to_string(),
            Message::PromptRecommendWithin => "Recommend when due within, km".to_string(),
            Message::PromptEnableReminders => "Show regular-check and seasonal reminders?".to_string(),
            Message::ConfigModuleForecast => "Forecast".to_string(),
            Message::PromptAvgYearlyMileage => "Average yearly mileage, km".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
        };

        write!(f, "{}", text)
    }
}
