//! Notification tiering.
//!
//! Groups the due items of one vehicle into three tiers:
//!
//! - **urgent**: overdue services and services due within the urgent distance
//! - **recommendation**: services due within the recommendation distance
//! - **informational**: a single "all clear" entry when nothing is urgent
//!
//! Notification ids are derived from the car and service type so that read
//! flags stored in the session keep pointing at the same notification after
//! every re-evaluation.

use super::due::{evaluate, DueItem, DuePolicy, DueStatus};
use super::messages::Message;
use super::session::Session;
use crate::db::cars::Car;
use crate::db::db::Db;
use crate::libs::config::Config;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Every id is `car_id * CAR_STRIDE + tier * TIER_STRIDE + slot`. The slot
/// is the service type id for due notifications and stays below
/// `TIER_STRIDE`, so no two (car, tier, slot) triples share an id.
const CAR_STRIDE: i64 = 10 * TIER_STRIDE;
const TIER_STRIDE: i64 = 1_000_000;

const OVERDUE_TIER: i64 = 1;
const URGENT_TIER: i64 = 2;
const RECOMMENDATION_TIER: i64 = 3;
const INFO_TIER: i64 = 4;

const ALL_CLEAR_SLOT: i64 = 0;
const REGULAR_CHECK_SLOT: i64 = 1;
const SEASONAL_SLOT: i64 = 2;

/// Highest service type id that still fits in a notification id.
pub const MAX_SERVICE_TYPE_ID: i64 = TIER_STRIDE - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationTier {
    Urgent,
    Recommendation,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Overdue,
    Urgent,
    Recommendation,
    AllClear,
    RegularCheck,
    Seasonal,
}

impl NotificationKind {
    pub fn tier(&self) -> NotificationTier {
        match self {
            NotificationKind::Overdue | NotificationKind::Urgent => NotificationTier::Urgent,
            NotificationKind::Recommendation => NotificationTier::Recommendation,
            _ => NotificationTier::Info,
        }
    }
}

/// Stable id of a due notification.
pub fn due_notification_id(car_id: i64, service_type_id: i64, status: DueStatus) -> i64 {
    let tier = match status {
        DueStatus::Overdue => OVERDUE_TIER,
        DueStatus::Urgent => URGENT_TIER,
        DueStatus::Recommendation => RECOMMENDATION_TIER,
    };
    notification_id(car_id, tier, service_type_id)
}

/// Stable id of the all-clear notification of a car.
pub fn all_clear_id(car_id: i64) -> i64 {
    notification_id(car_id, INFO_TIER, ALL_CLEAR_SLOT)
}

/// Stable ids of the regular-check and seasonal reminders of a car.
pub fn reminder_ids(car_id: i64) -> [i64; 2] {
    [
        notification_id(car_id, INFO_TIER, REGULAR_CHECK_SLOT),
        notification_id(car_id, INFO_TIER, SEASONAL_SLOT),
    ]
}

fn notification_id(car_id: i64, tier: i64, slot: i64) -> i64 {
    car_id * CAR_STRIDE + tier * TIER_STRIDE + slot
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub car_id: i64,
    pub car_name: String,
    /// Overdue or remaining distance for due notifications.
    pub distance_km: Option<i64>,
    pub date: NaiveDate,
    pub is_read: bool,
}

impl Notification {
    pub fn tier(&self) -> NotificationTier {
        self.kind.tier()
    }

    pub fn action_required(&self) -> bool {
        self.tier() == NotificationTier::Urgent
    }

    fn from_due(item: &DueItem, car_name: &str, current_mileage: i64, date: NaiveDate) -> Self {
        let (kind, title, message) = match item.status {
            DueStatus::Overdue => (
                NotificationKind::Overdue,
                Message::NotificationOverdueTitle(item.service_name.clone()),
                Message::NotificationOverdue {
                    car: car_name.to_string(),
                    service: item.service_name.clone(),
                    overdue_km: item.distance_km,
                    last_mileage: item.last_serviced_mileage,
                    current_mileage,
                },
            ),
            DueStatus::Urgent => (
                NotificationKind::Urgent,
                Message::NotificationUrgentTitle(item.service_name.clone()),
                Message::NotificationUrgent {
                    car: car_name.to_string(),
                    service: item.service_name.clone(),
                    remaining_km: item.distance_km,
                    current_mileage,
                },
            ),
            DueStatus::Recommendation => (
                NotificationKind::Recommendation,
                Message::NotificationRecommendationTitle(item.service_name.clone()),
                Message::NotificationRecommendation {
                    car: car_name.to_string(),
                    service: item.service_name.clone(),
                    remaining_km: item.distance_km,
                    current_mileage,
                },
            ),
        };

        Notification {
            id: due_notification_id(item.car_id, item.service_type_id, item.status),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            car_id: item.car_id,
            car_name: car_name.to_string(),
            distance_km: Some(item.distance_km),
            date,
            is_read: false,
        }
    }

    fn info(id: i64, kind: NotificationKind, title: Message, message: Message, car: &VehicleStatus, date: NaiveDate) -> Self {
        Notification {
            id,
            kind,
            title: title.to_string(),
            message: message.to_string(),
            car_id: car.car_id,
            car_name: car.car_name.clone(),
            distance_km: None,
            date,
            is_read: false,
        }
    }
}

/// The vehicle a board is built for.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleStatus {
    pub car_id: i64,
    pub car_name: String,
    pub mileage: i64,
}

impl From<&Car> for VehicleStatus {
    fn from(car: &Car) -> Self {
        VehicleStatus {
            car_id: car.id,
            car_name: car.display_name.clone(),
            mileage: car.mileage,
        }
    }
}

/// Seasonal maintenance advice for a calendar month (1-12).
pub fn seasonal_advice(month: u32) -> Message {
    match month {
        11 | 12 | 1 => Message::SeasonWinter,
        4..=6 => Message::SeasonSpring,
        7..=9 => Message::SeasonSummer,
        _ => Message::SeasonAutumn,
    }
}

/// Tiered notifications of one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationBoard {
    pub car_id: i64,
    pub car_name: String,
    pub mileage: i64,
    pub urgent: Vec<Notification>,
    pub recommendation: Vec<Notification>,
    pub informational: Vec<Notification>,
    /// Regular-check and seasonal reminders, kept apart from the tiers.
    pub reminders: Vec<Notification>,
}

impl NotificationBoard {
    /// Buckets evaluator output. `items` keep their evaluator order.
    pub fn build(vehicle: &VehicleStatus, items: &[DueItem], date: NaiveDate) -> Self {
        let mut urgent = Vec::new();
        let mut recommendation = Vec::new();

        for item in items.iter().filter(|item| item.car_id == vehicle.car_id) {
            let notification = Notification::from_due(item, &vehicle.car_name, vehicle.mileage, date);
            match notification.tier() {
                NotificationTier::Urgent => urgent.push(notification),
                _ => recommendation.push(notification),
            }
        }

        let informational = if urgent.is_empty() {
            vec![Notification::info(
                all_clear_id(vehicle.car_id),
                NotificationKind::AllClear,
                Message::NotificationAllClearTitle,
                Message::NotificationAllClear {
                    car: vehicle.car_name.clone(),
                    current_mileage: vehicle.mileage,
                },
                vehicle,
                date,
            )]
        } else {
            Vec::new()
        };

        NotificationBoard {
            car_id: vehicle.car_id,
            car_name: vehicle.car_name.clone(),
            mileage: vehicle.mileage,
            urgent,
            recommendation,
            informational,
            reminders: Vec::new(),
        }
    }

    /// Adds the regular-check and seasonal reminders for `date`'s month.
    pub fn with_reminders(mut self, date: NaiveDate) -> Self {
        let vehicle = VehicleStatus {
            car_id: self.car_id,
            car_name: self.car_name.clone(),
            mileage: self.mileage,
        };
        let [regular_check_id, seasonal_id] = reminder_ids(self.car_id);
        self.reminders = vec![
            Notification::info(
                regular_check_id,
                NotificationKind::RegularCheck,
                Message::ReminderRegularCheckTitle,
                Message::ReminderRegularCheck {
                    car: self.car_name.clone(),
                    current_mileage: self.mileage,
                },
                &vehicle,
                date,
            ),
            Notification::info(
                seasonal_id,
                NotificationKind::Seasonal,
                Message::ReminderSeasonalTitle,
                Message::ReminderSeasonal {
                    car: self.car_name.clone(),
                    advice: seasonal_advice(date.month()).to_string(),
                },
                &vehicle,
                date,
            ),
        ];
        self
    }

    pub fn apply_read_flags(&mut self, is_read: impl Fn(i64) -> bool) {
        for notification in self
            .urgent
            .iter_mut()
            .chain(self.recommendation.iter_mut())
            .chain(self.informational.iter_mut())
            .chain(self.reminders.iter_mut())
        {
            notification.is_read = is_read(notification.id);
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &Notification> {
        self.urgent
            .iter()
            .chain(self.recommendation.iter())
            .chain(self.informational.iter())
            .chain(self.reminders.iter())
    }

    pub fn unread_count(&self) -> usize {
        self.all().filter(|n| !n.is_read).count()
    }
}

/// Loads vehicles and service history and builds their boards.
#[derive(Debug, Clone)]
pub struct NotificationService {
    policy: DuePolicy,
    reminders: bool,
}

impl NotificationService {
    pub fn new(policy: DuePolicy, reminders: bool) -> Self {
        NotificationService { policy, reminders }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.due_policy(), config.reminders_enabled())
    }

    /// Builds the board of every vehicle in scope, in car id order.
    ///
    /// With a selected car in the session only that car is evaluated,
    /// otherwise every car of the logged-in user.
    pub fn collect(&self, db: &Db, session: &Session, date: NaiveDate) -> Result<Vec<NotificationBoard>> {
        let user_id = session.require_user()?;

        let cars = match session.current_car_id {
            Some(car_id) => db.cars().get(user_id, car_id)?.into_iter().collect(),
            None => db.cars().list_for_user(user_id)?,
        };

        let mut boards = Vec::with_capacity(cars.len());
        for car in &cars {
            let schedules = db.maintenance().service_schedules(car.id)?;
            let items = evaluate(car.id, car.mileage, &schedules, &self.policy);
            debug!(car_id = car.id, due = items.len(), "evaluated maintenance schedule");

            let mut board = NotificationBoard::build(&VehicleStatus::from(car), &items, date);
            if self.reminders {
                board = board.with_reminders(date);
            }
            board.apply_read_flags(|id| session.is_notification_read(id));
            boards.push(board);
        }

        Ok(boards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::due::ServiceSchedule;

    fn vehicle() -> VehicleStatus {
        VehicleStatus {
            car_id: 4,
            car_name: "Lada Vesta".to_string(),
            mileage: 50_500,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn overdue_and_urgent_share_the_urgent_tier() {
        let schedules = vec![
            ServiceSchedule::new(1, "Engine oil change", 10_000, 40_000),
            ServiceSchedule::new(2, "Air filter replacement", 20_000, 30_800),
            ServiceSchedule::new(3, "Wheel alignment", 15_000, 37_000),
        ];
        let items = evaluate(4, 50_500, &schedules, &DuePolicy::default());
        let board = NotificationBoard::build(&vehicle(), &items, today());

        assert_eq!(board.urgent.len(), 2);
        assert_eq!(board.urgent[0].kind, NotificationKind::Overdue);
        assert_eq!(board.urgent[0].id, 41_000_001);
        assert_eq!(board.urgent[1].kind, NotificationKind::Urgent);
        assert_eq!(board.urgent[1].id, 42_000_002);
        assert!(board.urgent.iter().all(|n| n.action_required()));

        assert_eq!(board.recommendation.len(), 1);
        assert_eq!(board.recommendation[0].id, 43_000_003);
        assert_eq!(board.recommendation[0].distance_km, Some(1_500));

        assert!(board.informational.is_empty());
    }

    #[test]
    fn nothing_urgent_yields_exactly_one_all_clear() {
        let schedules = vec![ServiceSchedule::new(3, "Wheel alignment", 15_000, 37_000)];
        let items = evaluate(4, 50_500, &schedules, &DuePolicy::default());
        let board = NotificationBoard::build(&vehicle(), &items, today());

        assert_eq!(board.informational.len(), 1);
        assert_eq!(board.informational[0].kind, NotificationKind::AllClear);
        assert_eq!(board.informational[0].id, 44_000_000);
        assert!(board.reminders.is_empty());
    }

    #[test]
    fn reminders_stay_out_of_the_informational_tier() {
        let board = NotificationBoard::build(&vehicle(), &[], today()).with_reminders(today());
        assert_eq!(board.informational.len(), 1);
        assert_eq!(board.reminders.len(), 2);
        assert_eq!(board.reminders[0].id, 44_000_001);
        assert_eq!(board.reminders[1].id, 44_000_002);
    }

    #[test]
    fn read_flags_are_applied_by_id() {
        let mut board = NotificationBoard::build(&vehicle(), &[], today());
        board.apply_read_flags(|id| id == all_clear_id(4));
        assert!(board.informational[0].is_read);
        assert_eq!(board.unread_count(), 0);
    }

    #[test]
    fn ids_never_alias_across_cars_and_tiers() {
        let mut seen = std::collections::HashSet::new();
        for car_id in 1..=40 {
            for service_type_id in [1, 2, 15, 999, 1_000, MAX_SERVICE_TYPE_ID] {
                for status in [DueStatus::Overdue, DueStatus::Urgent, DueStatus::Recommendation] {
                    assert!(seen.insert(due_notification_id(car_id, service_type_id, status)));
                }
            }
            assert!(seen.insert(all_clear_id(car_id)));
            for id in reminder_ids(car_id) {
                assert!(seen.insert(id));
            }
        }
    }

    #[test]
    fn urgent_id_differs_from_overdue_id_ten_cars_later() {
        assert_ne!(
            due_notification_id(1, 1, DueStatus::Urgent),
            due_notification_id(11, 1, DueStatus::Overdue)
        );
        assert_ne!(due_notification_id(1, 1, DueStatus::Recommendation), due_notification_id(21, 1, DueStatus::Overdue));
    }

    #[test]
    fn seasons_follow_the_calendar() {
        assert_eq!(seasonal_advice(12), Message::SeasonWinter);
        assert_eq!(seasonal_advice(1), Message::SeasonWinter);
        assert_eq!(seasonal_advice(5), Message::SeasonSpring);
        assert_eq!(seasonal_advice(8), Message::SeasonSummer);
        assert_eq!(seasonal_advice(10), Message::SeasonAutumn);
        assert_eq!(seasonal_advice(2), Message::SeasonAutumn);
    }
}
