#[cfg(test)]
mod tests {
    use carlog::db::cars::CarForm;
    use carlog::db::db::Db;
    use carlog::db::maintenance::NewMaintenance;
    use carlog::db::refuelings::NewRefueling;
    use carlog::libs::statistics::DateRange;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const EPSILON: f64 = 1e-9;

    struct StatisticsTestContext {
        _temp_dir: TempDir,
        db: Db,
        car_id: i64,
    }

    impl TestContext for StatisticsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("carlog.db")).unwrap();
            let user_id = db.users().register("Ivan Petrov", "ivan", "secret").unwrap().id;
            let car_id = db
                .cars()
                .insert(user_id, &CarForm { model_id: None, mileage: 10_000, photo: None })
                .unwrap();

            for (day, mileage, volume) in [(date(2024, 1, 10), 10_000, 40.0), (date(2024, 2, 15), 10_500, 30.0)] {
                db.refuelings()
                    .insert(&NewRefueling {
                        car_id,
                        fuel_id: Some(2),
                        station_id: None,
                        date: day,
                        mileage,
                        volume,
                        price_per_liter: 50.0,
                        full_tank: true,
                    })
                    .unwrap();
            }
            db.maintenance()
                .insert(&NewMaintenance {
                    car_id,
                    service_type_id: 9,
                    date: date(2024, 2, 20),
                    mileage: 10_520,
                    total_amount: 500.0,
                    description: "Front pads".to_string(),
                    next_service_mileage: None,
                    next_service_date: None,
                })
                .unwrap();

            StatisticsTestContext {
                _temp_dir: temp_dir,
                db,
                car_id,
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(from: NaiveDate, to: NaiveDate) -> DateRange {
        DateRange::new(from, to).unwrap()
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_report_over_the_whole_period(ctx: &mut StatisticsTestContext) {
        let report = ctx
            .db
            .statistics()
            .report(ctx.car_id, range(date(2024, 1, 1), date(2024, 12, 31)))
            .unwrap();

        assert!((report.totals.fuel - 3_500.0).abs() < EPSILON);
        assert!((report.totals.maintenance - 500.0).abs() < EPSILON);
        assert!((report.totals.total - 4_000.0).abs() < EPSILON);
        assert_eq!(report.totals.distance_km, 500);

        assert_eq!(report.consumption.refuel_count, 2);
        assert!((report.consumption.total_volume - 70.0).abs() < EPSILON);
        assert!((report.consumption.avg_consumption - 14.0).abs() < EPSILON);
        assert!((report.consumption.cost_per_km - 7.0).abs() < EPSILON);

        assert!((report.share.fuel_percent - 87.5).abs() < EPSILON);
        assert!((report.share.maintenance_percent - 12.5).abs() < EPSILON);
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_monthly_breakdown_newest_first(ctx: &mut StatisticsTestContext) {
        let monthly = ctx
            .db
            .statistics()
            .monthly(ctx.car_id, &range(date(2024, 1, 1), date(2024, 12, 31)))
            .unwrap();

        let months: Vec<&str> = monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-02", "2024-01"]);

        assert!((monthly[0].fuel - 1_500.0).abs() < EPSILON);
        assert!((monthly[0].maintenance - 500.0).abs() < EPSILON);
        assert!((monthly[0].total - 2_000.0).abs() < EPSILON);
        assert!((monthly[1].fuel - 2_000.0).abs() < EPSILON);
        assert!(monthly[1].maintenance.abs() < EPSILON);
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_single_refueling_has_no_consumption(ctx: &mut StatisticsTestContext) {
        let consumption = ctx
            .db
            .statistics()
            .fuel_consumption(ctx.car_id, &range(date(2024, 2, 1), date(2024, 2, 29)))
            .unwrap();

        assert_eq!(consumption.refuel_count, 1);
        assert_eq!(consumption.distance_km, 0);
        assert_eq!(consumption.avg_consumption, 0.0);
        assert_eq!(consumption.cost_per_km, 0.0);
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_range_bounds_are_inclusive(ctx: &mut StatisticsTestContext) {
        let totals = ctx
            .db
            .statistics()
            .totals(ctx.car_id, &range(date(2024, 1, 10), date(2024, 1, 10)))
            .unwrap();
        assert!((totals.fuel - 2_000.0).abs() < EPSILON);
        assert!(totals.maintenance.abs() < EPSILON);
    }

    #[test_context(StatisticsTestContext)]
    #[test]
    fn test_empty_period(ctx: &mut StatisticsTestContext) {
        let report = ctx
            .db
            .statistics()
            .report(ctx.car_id, range(date(2023, 1, 1), date(2023, 12, 31)))
            .unwrap();

        assert_eq!(report.totals.total, 0.0);
        assert_eq!(report.share.fuel_percent, 0.0);
        assert_eq!(report.consumption.refuel_count, 0);
        assert!(report.monthly.is_empty());
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        assert!(DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
    }
}
