#[cfg(test)]
mod tests {
    use bitcount::{Backend, BackendPreference, Config, Counter, CountingError};

    #[test]
    fn test_config_save_load() {
        let dir = tempfile::Builder::new().prefix("config").tempdir().unwrap();
        let path = dir.path().join("nested").join("bitcount.json");

        let config = Config {
            backend: BackendPreference::Portable,
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            Counter::from_config(&loaded).map(|c| c.backend()),
            Ok(Backend::Portable)
        );
    }

    #[test]
    fn test_config_load_errors() {
        let dir = tempfile::Builder::new().prefix("config").tempdir().unwrap();
        let path = dir.path().join("bitcount.json");
        assert!(Config::load(&path).is_err());

        std::fs::write(&path, r#"{"backend":"avx512"}"#).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_forced_backend() {
        let config = Config {
            backend: BackendPreference::Avx2,
        };
        match Counter::from_config(&config) {
            Ok(counter) => assert_eq!(counter.backend(), Backend::Avx2),
            Err(err) => {
                assert!(!Backend::Avx2.is_supported());
                assert_eq!(err, CountingError::UnsupportedHardware(Backend::Avx2));
            }
        }

        let auto = Counter::from_config(&Config::default()).unwrap();
        assert_eq!(auto.backend(), Backend::detect());
    }
}
