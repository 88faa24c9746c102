#[cfg(test)]
mod tests {
    use carlog::db::cars::CarForm;
    use carlog::db::db::Db;
    use carlog::db::maintenance::{Maintenance, NewMaintenance};
    use carlog::db::refuelings::NewRefueling;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct RecordTestContext {
        _temp_dir: TempDir,
        db: Db,
        user_id: i64,
        car_id: i64,
    }

    impl TestContext for RecordTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("carlog.db")).unwrap();
            let user_id = db.users().register("Ivan Petrov", "ivan", "secret").unwrap().id;
            let car_id = db
                .cars()
                .insert(user_id, &CarForm { model_id: None, mileage: 50_000, photo: None })
                .unwrap();
            RecordTestContext {
                _temp_dir: temp_dir,
                db,
                user_id,
                car_id,
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn refueling(car_id: i64, day: NaiveDate, mileage: i64) -> NewRefueling {
        NewRefueling {
            car_id,
            fuel_id: Some(2),
            station_id: None,
            date: day,
            mileage,
            volume: 40.0,
            price_per_liter: 52.5,
            full_tank: true,
        }
    }

    fn oil_change(car_id: i64, day: NaiveDate, mileage: i64) -> NewMaintenance {
        NewMaintenance {
            car_id,
            service_type_id: 1,
            date: day,
            mileage,
            total_amount: 4_500.0,
            description: String::new(),
            next_service_mileage: None,
            next_service_date: None,
        }
    }

    fn current_mileage(ctx: &RecordTestContext) -> i64 {
        ctx.db.cars().require(ctx.user_id, ctx.car_id).unwrap().mileage
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_refueling_never_lowers_mileage(ctx: &mut RecordTestContext) {
        let recorded = ctx.db.refuelings().insert(&refueling(ctx.car_id, date(2024, 1, 5), 49_000)).unwrap();
        assert!(!recorded.mileage_raised);
        assert_eq!(current_mileage(ctx), 50_000);

        let recorded = ctx.db.refuelings().insert(&refueling(ctx.car_id, date(2024, 1, 20), 51_000)).unwrap();
        assert!(recorded.mileage_raised);
        assert_eq!(current_mileage(ctx), 51_000);

        // Equal mileage is not an increase
        let recorded = ctx.db.refuelings().insert(&refueling(ctx.car_id, date(2024, 1, 21), 51_000)).unwrap();
        assert!(!recorded.mileage_raised);
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_maintenance_never_lowers_mileage(ctx: &mut RecordTestContext) {
        let recorded = ctx.db.maintenance().insert(&oil_change(ctx.car_id, date(2023, 6, 1), 40_000)).unwrap();
        assert!(!recorded.mileage_raised);
        assert_eq!(current_mileage(ctx), 50_000);

        let recorded = ctx.db.maintenance().insert(&oil_change(ctx.car_id, date(2024, 6, 1), 60_000)).unwrap();
        assert!(recorded.mileage_raised);
        assert_eq!(current_mileage(ctx), 60_000);
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_failed_insert_leaves_mileage(ctx: &mut RecordTestContext) {
        // Unknown service type violates the foreign key
        let mut record = oil_change(ctx.car_id, date(2024, 6, 1), 70_000);
        record.service_type_id = 9_999;
        assert!(ctx.db.maintenance().insert(&record).is_err());

        assert_eq!(current_mileage(ctx), 50_000);
        assert!(ctx.db.maintenance().history(ctx.car_id).unwrap().is_empty());
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_refueling_history(ctx: &mut RecordTestContext) {
        ctx.db.refuelings().insert(&refueling(ctx.car_id, date(2024, 1, 5), 50_100)).unwrap();
        let mut later = refueling(ctx.car_id, date(2024, 2, 5), 50_700);
        later.fuel_id = None;
        ctx.db.refuelings().insert(&later).unwrap();

        let history = ctx.db.refuelings().history(ctx.car_id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, date(2024, 2, 5));
        assert_eq!(history[0].fuel_name, "");
        assert_eq!(history[1].fuel_name, "Petrol");
        assert_eq!(history[1].total_amount, 40.0 * 52.5);
        assert!(history[1].full_tank);
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_maintenance_history(ctx: &mut RecordTestContext) {
        let mut record = oil_change(ctx.car_id, date(2024, 3, 15), 50_000);
        record.description = "Synthetic 5W-30".to_string();
        record.next_service_mileage = Some(60_000);
        record.next_service_date = Some(date(2024, 11, 15));
        ctx.db.maintenance().insert(&record).unwrap();

        let history = ctx.db.maintenance().history(ctx.car_id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].service_name, "Engine oil change");
        assert_eq!(history[0].description, "Synthetic 5W-30");
        assert_eq!(history[0].next_service_mileage, Some(60_000));
        assert_eq!(history[0].next_service_date, Some(date(2024, 11, 15)));
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_last_service_mileage_is_the_maximum(ctx: &mut RecordTestContext) {
        ctx.db.maintenance().insert(&oil_change(ctx.car_id, date(2024, 5, 1), 45_000)).unwrap();
        ctx.db.maintenance().insert(&oil_change(ctx.car_id, date(2023, 5, 1), 35_000)).unwrap();

        let schedules = ctx.db.maintenance().service_schedules(ctx.car_id).unwrap();
        let oil = schedules.iter().find(|s| s.service_type_id == 1).unwrap();
        assert_eq!(oil.last_serviced_mileage, 45_000);
        assert_eq!(oil.interval_km, 10_000);

        let filter = schedules.iter().find(|s| s.service_type_id == 2).unwrap();
        assert_eq!(filter.last_serviced_mileage, 0);
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_invalid_refueling_is_rejected(ctx: &mut RecordTestContext) {
        let mut record = refueling(ctx.car_id, date(2024, 1, 5), 50_100);
        record.volume = 0.0;
        assert!(ctx.db.refuelings().insert(&record).is_err());
        assert!(ctx.db.refuelings().history(ctx.car_id).unwrap().is_empty());
    }

    #[test_context(RecordTestContext)]
    #[test]
    fn test_records_serialize_dates_as_iso(ctx: &mut RecordTestContext) {
        let mut record = oil_change(ctx.car_id, date(2024, 3, 15), 50_000);
        record.next_service_date = Some(date(2024, 11, 15));
        ctx.db.maintenance().insert(&record).unwrap();
        ctx.db.refuelings().insert(&refueling(ctx.car_id, date(2024, 3, 16), 50_100)).unwrap();

        let stored = ctx.db.maintenance().history(ctx.car_id).unwrap().remove(0);
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["next_service_date"], "2024-11-15");
        let restored: Maintenance = serde_json::from_value(json).unwrap();
        assert_eq!(restored, stored);

        let fill_up = ctx.db.refuelings().history(ctx.car_id).unwrap().remove(0);
        assert_eq!(serde_json::to_value(&fill_up).unwrap()["date"], "2024-03-16");
    }
}
