#[cfg(test)]
mod tests {
    use carlog::db::cars::CarForm;
    use carlog::db::db::Db;
    use carlog::db::maintenance::NewMaintenance;
    use carlog::db::refuelings::NewRefueling;
    use carlog::libs::error::CarlogError;
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct CarTestContext {
        _temp_dir: TempDir,
        db: Db,
        owner_id: i64,
        other_id: i64,
        model_id: i64,
    }

    impl TestContext for CarTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(&temp_dir.path().join("carlog.db")).unwrap();
            let owner_id = db.users().register("Ivan Petrov", "ivan", "secret").unwrap().id;
            let other_id = db.users().register("Anna Smirnova", "anna", "secret").unwrap().id;
            let brand_id = db.catalog().add_brand("Lada").unwrap();
            let model_id = db.catalog().add_model(brand_id, "Vesta").unwrap();
            CarTestContext {
                _temp_dir: temp_dir,
                db,
                owner_id,
                other_id,
                model_id,
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_context(CarTestContext)]
    #[test]
    fn test_car_crud(ctx: &mut CarTestContext) {
        let cars = ctx.db.cars();
        let form = CarForm {
            model_id: Some(ctx.model_id),
            mileage: 42_000,
            photo: Some(vec![0xFF, 0xD8, 0xFF]),
        };
        let car_id = cars.insert(ctx.owner_id, &form).unwrap();

        let car = cars.get(ctx.owner_id, car_id).unwrap().unwrap();
        assert_eq!(car.display_name, "Lada Vesta");
        assert_eq!(car.brand, "Lada");
        assert_eq!(car.model, "Vesta");
        assert_eq!(car.mileage, 42_000);
        assert_eq!(car.photo, Some(vec![0xFF, 0xD8, 0xFF]));

        let edited = CarForm {
            model_id: Some(ctx.model_id),
            mileage: 43_500,
            photo: None,
        };
        cars.update(ctx.owner_id, car_id, &edited).unwrap();
        let car = cars.require(ctx.owner_id, car_id).unwrap();
        assert_eq!(car.mileage, 43_500);
        assert!(car.photo.is_none());

        cars.delete(ctx.owner_id, car_id).unwrap();
        assert!(cars.get(ctx.owner_id, car_id).unwrap().is_none());
    }

    #[test_context(CarTestContext)]
    #[test]
    fn test_display_name_without_model(ctx: &mut CarTestContext) {
        let cars = ctx.db.cars();
        cars.insert(ctx.owner_id, &CarForm { model_id: Some(ctx.model_id), mileage: 0, photo: None }).unwrap();
        cars.insert(ctx.owner_id, &CarForm { model_id: None, mileage: 0, photo: None }).unwrap();

        let names: Vec<String> = cars.list_for_user(ctx.owner_id).unwrap().into_iter().map(|car| car.display_name).collect();
        assert_eq!(names, vec!["Lada Vesta".to_string(), "Car 2".to_string()]);
    }

    #[test_context(CarTestContext)]
    #[test]
    fn test_cars_are_private_to_their_owner(ctx: &mut CarTestContext) {
        let cars = ctx.db.cars();
        let car_id = cars.insert(ctx.owner_id, &CarForm { model_id: None, mileage: 1_000, photo: None }).unwrap();

        assert!(cars.list_for_user(ctx.other_id).unwrap().is_empty());
        assert!(cars.get(ctx.other_id, car_id).unwrap().is_none());

        let err = cars
            .update(ctx.other_id, car_id, &CarForm { model_id: None, mileage: 0, photo: None })
            .unwrap_err();
        assert_eq!(err.downcast_ref::<CarlogError>(), Some(&CarlogError::CarNotFound(car_id)));

        let err = cars.delete(ctx.other_id, car_id).unwrap_err();
        assert_eq!(err.downcast_ref::<CarlogError>(), Some(&CarlogError::CarNotFound(car_id)));
        assert_eq!(cars.require(ctx.owner_id, car_id).unwrap().mileage, 1_000);
    }

    #[test_context(CarTestContext)]
    #[test]
    fn test_delete_removes_records(ctx: &mut CarTestContext) {
        let car_id = ctx
            .db
            .cars()
            .insert(ctx.owner_id, &CarForm { model_id: None, mileage: 10_000, photo: None })
            .unwrap();
        ctx.db
            .refuelings()
            .insert(&NewRefueling {
                car_id,
                fuel_id: Some(2),
                station_id: None,
                date: date(2024, 3, 1),
                mileage: 10_200,
                volume: 40.0,
                price_per_liter: 55.0,
                full_tank: true,
            })
            .unwrap();
        ctx.db
            .maintenance()
            .insert(&NewMaintenance {
                car_id,
                service_type_id: 1,
                date: date(2024, 3, 2),
                mileage: 10_300,
                total_amount: 4_500.0,
                description: "Oil and filter".to_string(),
                next_service_mileage: Some(20_300),
                next_service_date: None,
            })
            .unwrap();

        ctx.db.cars().delete(ctx.owner_id, car_id).unwrap();

        assert!(ctx.db.refuelings().history(car_id).unwrap().is_empty());
        assert!(ctx.db.maintenance().history(car_id).unwrap().is_empty());
    }

    #[test_context(CarTestContext)]
    #[test]
    fn test_negative_mileage_is_rejected(ctx: &mut CarTestContext) {
        let err = ctx
            .db
            .cars()
            .insert(ctx.owner_id, &CarForm { model_id: None, mileage: -1, photo: None })
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<CarlogError>(), Some(CarlogError::InvalidInput(_))));
    }
}
