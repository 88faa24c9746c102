//! Maintenance due evaluation.
//!
//! For every service type with a positive distance interval, the next service
//! is due at `last_serviced_mileage + interval_km`. The signed distance from
//! the current odometer reading to that point decides the status:
//!
//! ```text
//!            overdue  │        urgent        │    recommendation    │  (nothing)
//! ────────────────────┼──────────────────────┼──────────────────────┼──────────▶ delta, km
//!                     0              urgent_within        recommend_within
//! ```
//!
//! With the default policy a service is urgent for `0..=500` km remaining and a
//! recommendation for `501..=2000` km remaining.
//!
//! ## Usage
//!
//! ```rust
//! use carlog::libs::due::{evaluate, DuePolicy, DueStatus, ServiceSchedule};
//!
//! let schedule = ServiceSchedule::new(1, "Engine oil change", 10_000, 40_000);
//! let items = evaluate(7, 50_500, &[schedule], &DuePolicy::default());
//!
//! assert_eq!(items[0].status, DueStatus::Overdue);
//! assert_eq!(items[0].distance_km, 500);
//! ```

use serde::{Deserialize, Serialize};

/// Remaining distance (km) up to which a service counts as urgent.
pub const DEFAULT_URGENT_WITHIN_KM: i64 = 500;

/// Remaining distance (km) up to which a service is recommended.
pub const DEFAULT_RECOMMEND_WITHIN_KM: i64 = 2000;

/// Tier boundaries for the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuePolicy {
    pub urgent_within_km: i64,
    pub recommend_within_km: i64,
}

impl Default for DuePolicy {
    fn default() -> Self {
        DuePolicy {
            urgent_within_km: DEFAULT_URGENT_WITHIN_KM,
            recommend_within_km: DEFAULT_RECOMMEND_WITHIN_KM,
        }
    }
}

impl DuePolicy {
    /// Classifies a signed remaining distance. `None` means no notification.
    pub fn classify(&self, delta_km: i64) -> Option<DueStatus> {
        if delta_km < 0 {
            Some(DueStatus::Overdue)
        } else if delta_km <= self.urgent_within_km {
            Some(DueStatus::Urgent)
        } else if delta_km <= self.recommend_within_km {
            Some(DueStatus::Recommendation)
        } else {
            None
        }
    }
}

/// Per-service-type input of the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSchedule {
    pub service_type_id: i64,
    pub service_name: String,
    /// Fixed distance between services; `<= 0` means "as needed".
    pub interval_km: i64,
    /// Highest odometer reading of a past service of this type, 0 if never serviced.
    pub last_serviced_mileage: i64,
}

impl ServiceSchedule {
    pub fn new(service_type_id: i64, service_name: &str, interval_km: i64, last_serviced_mileage: i64) -> Self {
        ServiceSchedule {
            service_type_id,
            service_name: service_name.to_string(),
            interval_km,
            last_serviced_mileage,
        }
    }

    pub fn due_at_mileage(&self) -> i64 {
        self.last_serviced_mileage + self.interval_km
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DueStatus {
    Overdue,
    Urgent,
    Recommendation,
}

/// A service that needs attention on one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueItem {
    pub car_id: i64,
    pub service_type_id: i64,
    pub service_name: String,
    pub status: DueStatus,
    /// Overdue distance for `Overdue`, remaining distance otherwise. Never negative.
    pub distance_km: i64,
    pub due_at_mileage: i64,
    pub last_serviced_mileage: i64,
}

/// Evaluates every schedule against `current_mileage`.
///
/// Schedules with a non-positive interval are skipped. The result lists
/// overdue items first (most overdue first), followed by the remaining items
/// in ascending order of remaining distance.
pub fn evaluate(car_id: i64, current_mileage: i64, schedules: &[ServiceSchedule], policy: &DuePolicy) -> Vec<DueItem> {
    let mut items: Vec<(i64, DueItem)> = schedules
        .iter()
        .filter(|schedule| schedule.interval_km > 0)
        .filter_map(|schedule| {
            let due_at_mileage = schedule.due_at_mileage();
            let delta = due_at_mileage - current_mileage;
            policy.classify(delta).map(|status| {
                (
                    delta,
                    DueItem {
                        car_id,
                        service_type_id: schedule.service_type_id,
                        service_name: schedule.service_name.clone(),
                        status,
                        distance_km: delta.abs(),
                        due_at_mileage,
                        last_serviced_mileage: schedule.last_serviced_mileage,
                    },
                )
            })
        })
        .collect();

    // Ascending delta puts the most overdue first and the nearest upcoming next.
    items.sort_by(|(a, item_a), (b, item_b)| a.cmp(b).then(item_a.service_type_id.cmp(&item_b.service_type_id)));
    items.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(interval: i64, last: i64, current: i64) -> Option<DueItem> {
        let schedule = ServiceSchedule::new(3, "Oil", interval, last);
        evaluate(1, current, &[schedule], &DuePolicy::default()).into_iter().next()
    }

    #[test]
    fn overdue_reports_distance_past_due() {
        let item = single(10_000, 40_000, 50_500).unwrap();
        assert_eq!(item.status, DueStatus::Overdue);
        assert_eq!(item.distance_km, 500);
        assert_eq!(item.due_at_mileage, 50_000);
    }

    #[test]
    fn never_serviced_counts_from_zero() {
        let item = single(15_000, 0, 14_800).unwrap();
        assert_eq!(item.status, DueStatus::Urgent);
        assert_eq!(item.distance_km, 200);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(single(10_000, 0, 10_001).unwrap().status, DueStatus::Overdue);
        assert_eq!(single(10_000, 0, 10_000).unwrap().status, DueStatus::Urgent);
        assert_eq!(single(10_000, 0, 9_500).unwrap().status, DueStatus::Urgent);
        assert_eq!(single(10_000, 0, 9_499).unwrap().status, DueStatus::Recommendation);
        assert_eq!(single(10_000, 0, 8_000).unwrap().status, DueStatus::Recommendation);
        assert!(single(10_000, 0, 7_999).is_none());
    }

    #[test]
    fn as_needed_services_are_skipped() {
        assert!(single(0, 0, 1_000_000).is_none());
        assert!(single(-5, 0, 1_000_000).is_none());
    }

    #[test]
    fn ordering_puts_most_overdue_first() {
        let schedules = vec![
            ServiceSchedule::new(1, "Recommend", 10_000, 0),
            ServiceSchedule::new(2, "Slightly overdue", 5_000, 0),
            ServiceSchedule::new(3, "Very overdue", 1_000, 0),
            ServiceSchedule::new(4, "Urgent", 9_000, 0),
        ];
        let items = evaluate(1, 8_500, &schedules, &DuePolicy::default());
        let ids: Vec<i64> = items.iter().map(|i| i.service_type_id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn custom_policy_moves_boundaries() {
        let policy = DuePolicy {
            urgent_within_km: 1_000,
            recommend_within_km: 3_000,
        };
        assert_eq!(policy.classify(800), Some(DueStatus::Urgent));
        assert_eq!(policy.classify(2_500), Some(DueStatus::Recommendation));
        assert_eq!(policy.classify(3_001), None);
    }
}
