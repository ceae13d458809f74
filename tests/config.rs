#[cfg(test)]
mod tests {
    use declock::libs::clock::ClockFormat;
    use declock::libs::config::{Config, ConvertConfig};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_lifecycle(_ctx: &mut ConfigTestContext) {
        // With no file on disk, reading yields the defaults.
        let config = Config::read().unwrap();
        assert!(config.convert.is_none());

        let defaults = config.convert_defaults();
        assert!(!defaults.keep_original);
        assert_eq!(defaults.clock_format, ClockFormat::HoursMinutes);
        assert!(defaults.extra_keywords.is_empty());

        // Saved settings come back on the next read.
        let mut config = Config::default();
        config.convert = Some(ConvertConfig {
            keep_original: true,
            clock_format: ClockFormat::HoursMinutesSeconds,
            extra_keywords: vec!["stunden".to_string()],
        });
        config.save().unwrap();

        let reloaded = Config::read().unwrap().convert_defaults();
        assert!(reloaded.keep_original);
        assert_eq!(reloaded.clock_format, ClockFormat::HoursMinutesSeconds);
        assert_eq!(reloaded.extra_keywords, vec!["stunden"]);

        // Deleting returns the application to its initial state.
        Config::delete().unwrap();
        assert!(Config::read().unwrap().convert.is_none());
    }
}
