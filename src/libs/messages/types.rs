/// Every user-facing text of the application.
///
/// Variants carry the values they interpolate; the wording lives in
/// [`display`](super::display).
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === ACCOUNT MESSAGES ===
    Registered(String),
    LoggedIn(String),
    LoggedOut,
    PromptFullName,
    PromptUsername,
    PromptPassword,
    PromptPasswordConfirm,
    PasswordsDoNotMatch,

    // === CAR MESSAGES ===
    CarsHeader,
    NoCars,
    CarAdded(String),
    CarUpdated(String),
    CarDeleted(String),
    CarSelected(String),
    CarSelectionCleared,
    ConfirmDeleteCar(String),
    CarDeleteCancelled,
    PromptSelectCar,
    PromptSelectBrand,
    PromptSelectModel,
    PromptMileage,
    NoBrands,
    NoModels(String),
    KeepCurrentModel(String),

    // === CATALOG MESSAGES ===
    BrandsHeader,
    ModelsHeader(String),
    FuelsHeader,
    StationsHeader,
    ServiceTypesHeader,
    BrandAdded(String),
    ModelAdded(String),
    FuelAdded(String),
    StationAdded(String),
    ServiceTypeAdded(String),
    CatalogEmpty,

    // === REFUELING MESSAGES ===
    RefuelingRecorded(String),
    RefuelingsHeader(String),
    NoRefuelings,
    PromptDate,
    PromptSelectFuel,
    PromptSelectStation,
    PromptVolume,
    PromptPricePerLiter,
    PromptFullTank,
    NotSpecified,

    // === MAINTENANCE MESSAGES ===
    MaintenanceRecorded(String),
    MaintenanceHeader(String),
    NoMaintenance,
    PromptSelectServiceType,
    PromptAmount,
    PromptDescription,
    PromptNextServiceMileage,
    PromptNextServiceDate,
    ForecastHeader(String),
    ForecastNextMileage(i64),
    ForecastNextDate(String),
    ForecastNoDate,
    ForecastAsNeeded(String),
    ForecastMileageForDate(String, i64),

    // === ODOMETER MESSAGES ===
    MileageRaised(i64),
    MileageUnchanged(i64),

    // === NOTIFICATION MESSAGES ===
    NotificationsHeader(String, i64),
    UrgentTierHeader,
    RecommendationTierHeader,
    InfoTierHeader,
    RemindersHeader,
    UnreadNotifications(usize),
    NotificationMarkedRead(i64),
    NotificationNotFound(i64),
    AllNotificationsMarkedRead(usize),
    NotificationOverdueTitle(String),
    NotificationOverdue {
        car: String,
        service: String,
        overdue_km: i64,
        last_mileage: i64,
        current_mileage: i64,
    },
    NotificationUrgentTitle(String),
    NotificationUrgent {
        car: String,
        service: String,
        remaining_km: i64,
        current_mileage: i64,
    },
    NotificationRecommendationTitle(String),
    NotificationRecommendation {
        car: String,
        service: String,
        remaining_km: i64,
        current_mileage: i64,
    },
    NotificationAllClearTitle,
    NotificationAllClear {
        car: String,
        current_mileage: i64,
    },
    ReminderRegularCheckTitle,
    ReminderRegularCheck {
        car: String,
        current_mileage: i64,
    },
    ReminderSeasonalTitle,
    ReminderSeasonal {
        car: String,
        advice: String,
    },
    SeasonWinter,
    SeasonSpring,
    SeasonSummer,
    SeasonAutumn,

    // === STATISTICS MESSAGES ===
    StatisticsHeader(String, String, String),
    MonthlyExpensesHeader,
    NoExpensesInRange,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    PromptSelectModules,
    ConfigModuleDatabase,
    PromptDatabasePath,
    ConfigModuleNotifications,
    PromptUrgentWithin,
    PromptRecommendWithin,
    PromptEnableReminders,
    ConfigModuleForecast,
    PromptAvgYearlyMileage,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
}
