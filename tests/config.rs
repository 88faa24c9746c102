#[cfg(test)]
mod tests {
    use carlog::libs::config::{Config, DatabaseConfig, ForecastConfig, NotificationConfig};
    use carlog::libs::due::{DuePolicy, DueStatus};
    use carlog::libs::error::CarlogError;
    use carlog::libs::session::Session;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points every file at a private temporary directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
        session_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = temp_dir.path().join("carlog").join("config.json");
            let session_path = temp_dir.path().join("carlog").join("session.json");
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
                session_path,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_config_uses_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.due_policy(), DuePolicy::default());
        assert_eq!(config.avg_yearly_mileage(), 15_000);
        assert!(!config.reminders_enabled());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_round_trip(ctx: &mut ConfigTestContext) {
        let config = Config {
            database: Some(DatabaseConfig {
                path: Some("/var/lib/carlog/records.db".to_string()),
            }),
            notifications: Some(NotificationConfig {
                urgent_within_km: 1_000,
                recommend_within_km: 3_000,
                reminders: true,
            }),
            forecast: Some(ForecastConfig { avg_yearly_mileage: 20_000 }),
        };
        config.save_to(&ctx.config_path).unwrap();

        let loaded = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.database_path().unwrap(), PathBuf::from("/var/lib/carlog/records.db"));
        assert_eq!(loaded.avg_yearly_mileage(), 20_000);
        assert!(loaded.reminders_enabled());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_thresholds_drive_the_policy(ctx: &mut ConfigTestContext) {
        std::fs::create_dir_all(ctx.config_path.parent().unwrap()).unwrap();
        std::fs::write(
            &ctx.config_path,
            r#"{ "notifications": { "urgent_within_km": 1000, "recommend_within_km": 3000 } }"#,
        )
        .unwrap();

        let policy = Config::read_from(&ctx.config_path).unwrap().due_policy();
        assert_eq!(policy.classify(800), Some(DueStatus::Urgent));
        assert_eq!(policy.classify(2_500), Some(DueStatus::Recommendation));
        assert_eq!(policy.classify(3_001), None);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_unconfigured_sections_are_not_written(ctx: &mut ConfigTestContext) {
        let config = Config {
            forecast: Some(ForecastConfig::default()),
            ..Default::default()
        };
        config.save_to(&ctx.config_path).unwrap();

        let json = std::fs::read_to_string(&ctx.config_path).unwrap();
        assert!(json.contains("avg_yearly_mileage"));
        assert!(!json.contains("notifications"));
        assert!(!json.contains("database"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_config_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::create_dir_all(ctx.config_path.parent().unwrap()).unwrap();
        std::fs::write(&ctx.config_path, "{ not json").unwrap();
        assert!(Config::read_from(&ctx.config_path).is_err());
    }

    fn write_thresholds(ctx: &ConfigTestContext, urgent: i64, recommend: i64) {
        std::fs::create_dir_all(ctx.config_path.parent().unwrap()).unwrap();
        let json = format!(
            r#"{{ "notifications": {{ "urgent_within_km": {}, "recommend_within_km": {} }} }}"#,
            urgent, recommend
        );
        std::fs::write(&ctx.config_path, json).unwrap();
    }

    fn is_invalid_input(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<CarlogError>(), Some(CarlogError::InvalidInput(_)))
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_urgent_threshold_above_recommendation_is_rejected(ctx: &mut ConfigTestContext) {
        write_thresholds(ctx, 3_000, 1_000);
        let err = Config::read_from(&ctx.config_path).unwrap_err();
        assert!(is_invalid_input(&err));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_negative_urgent_threshold_is_rejected(ctx: &mut ConfigTestContext) {
        write_thresholds(ctx, -1, 2_000);
        let err = Config::read_from(&ctx.config_path).unwrap_err();
        assert!(is_invalid_input(&err));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_equal_thresholds_leave_no_recommendation_band(ctx: &mut ConfigTestContext) {
        write_thresholds(ctx, 0, 0);
        let policy = Config::read_from(&ctx.config_path).unwrap().due_policy();
        assert_eq!(policy.classify(0), Some(DueStatus::Urgent));
        assert_eq!(policy.classify(1), None);
        assert_eq!(policy.classify(-5), Some(DueStatus::Overdue));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_session_persists_between_runs(ctx: &mut ConfigTestContext) {
        assert!(!Session::read_from(&ctx.session_path).unwrap().is_logged_in());

        let mut session = Session::login(7, "Ivan Petrov", "ivan");
        session.select_car(3, "Lada Vesta");
        session.mark_notification_read(13_001);
        session.save_to(&ctx.session_path).unwrap();

        let restored = Session::read_from(&ctx.session_path).unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.require_car().unwrap(), 3);
        assert!(restored.is_notification_read(13_001));
        assert!(!restored.is_notification_read(13_002));

        Session::clear_at(&ctx.session_path).unwrap();
        assert!(!ctx.session_path.exists());
        assert_eq!(Session::read_from(&ctx.session_path).unwrap(), Session::default());
    }
}
