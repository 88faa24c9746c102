//! Next-service estimation.
//!
//! Converts between distance and calendar time with a fixed average yearly
//! mileage. Used to pre-fill the next-due mileage and date of a maintenance
//! record.

use chrono::{Datelike, Months, NaiveDate};

/// Average distance driven per year, in km.
pub const DEFAULT_AVG_YEARLY_MILEAGE: i64 = 15_000;

/// Mileage at which a service with `interval_km` is next due.
///
/// Services without a positive interval have no next-due mileage.
pub fn next_service_mileage(current_mileage: i64, interval_km: i64) -> Option<i64> {
    (interval_km > 0).then(|| current_mileage + interval_km)
}

/// Whole months needed to drive `distance_km` at `avg_yearly_mileage`.
pub fn months_for_distance(distance_km: i64, avg_yearly_mileage: i64) -> i64 {
    if avg_yearly_mileage <= 0 {
        return 0;
    }
    (distance_km as f64 / avg_yearly_mileage as f64 * 12.0) as i64
}

/// Estimated date of the next service.
///
/// `None` when the next-due mileage is less than one month of driving away.
pub fn next_service_date(service_date: NaiveDate, next_mileage: i64, current_mileage: i64, avg_yearly_mileage: i64) -> Option<NaiveDate> {
    let months = months_for_distance(next_mileage - current_mileage, avg_yearly_mileage);
    if months <= 0 {
        return None;
    }
    service_date.checked_add_months(Months::new(months as u32))
}

/// Calendar month difference, ignoring the day of month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

/// Estimated next-due mileage for a target next-service date.
pub fn mileage_from_date(service_date: NaiveDate, next_date: NaiveDate, current_mileage: i64, avg_yearly_mileage: i64) -> Option<i64> {
    let months = months_between(service_date, next_date);
    if months <= 0 {
        return None;
    }
    Some(current_mileage + (months as f64 / 12.0 * avg_yearly_mileage as f64) as i64)
}

/// Both next-due values for a service performed at `current_mileage` on `service_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceForecast {
    pub next_mileage: Option<i64>,
    pub next_date: Option<NaiveDate>,
}

impl ServiceForecast {
    pub fn for_interval(service_date: NaiveDate, current_mileage: i64, interval_km: i64, avg_yearly_mileage: i64) -> Self {
        let next_mileage = next_service_mileage(current_mileage, interval_km);
        let next_date = next_mileage.and_then(|next| next_service_date(service_date, next, current_mileage, avg_yearly_mileage));
        ServiceForecast { next_mileage, next_date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn oil_change_forecast() {
        let forecast = ServiceForecast::for_interval(date(2024, 3, 15), 50_000, 10_000, DEFAULT_AVG_YEARLY_MILEAGE);
        assert_eq!(forecast.next_mileage, Some(60_000));
        assert_eq!(forecast.next_date, Some(date(2024, 11, 15)));
    }

    #[test]
    fn as_needed_service_has_no_forecast() {
        let forecast = ServiceForecast::for_interval(date(2024, 3, 15), 50_000, 0, DEFAULT_AVG_YEARLY_MILEAGE);
        assert_eq!(forecast.next_mileage, None);
        assert_eq!(forecast.next_date, None);
    }

    #[test]
    fn short_distance_has_no_date() {
        // 1000 km is 0.8 months of driving
        assert_eq!(next_service_date(date(2024, 1, 1), 51_000, 50_000, 15_000), None);
    }

    #[test]
    fn month_end_is_clamped() {
        assert_eq!(next_service_date(date(2024, 1, 31), 51_250, 50_000, 15_000), Some(date(2024, 2, 29)));
    }

    #[test]
    fn mileage_from_target_date() {
        assert_eq!(mileage_from_date(date(2024, 1, 20), date(2024, 7, 1), 40_000, 15_000), Some(47_500));
        assert_eq!(mileage_from_date(date(2024, 1, 20), date(2024, 1, 30), 40_000, 15_000), None);
    }
}
