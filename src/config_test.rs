use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

const STOREFRONT: &str = r#"
languages = ["en-US", "de", "pt-BR"]

[options]
default_language = "en-US"
permanent_redirects = true

[[regions]]
slug = "worldwide"
name = "worldwide"
default_language = "en-US"
worldwide = true

[[regions]]
slug = "BR"
name = "br"
default_language = "pt-BR"
ordering = 2

[[regions]]
slug = "de"
name = "de"
default_language = "de"
ordering = 1
"#;

mod from_toml_str {
    use super::*;

    #[test]
    fn should_parse_options_and_fill_missing_fields_with_defaults() {
        // Act
        let config = ChainConfig::from_toml_str(STOREFRONT).expect("valid config");

        // Assert
        assert!(config.options.permanent_redirects);
        assert_eq!(config.options.apps, ChainOptions::default().apps);
        assert_eq!(config.regions.len(), 3);
        assert!(config.regions[0].worldwide);
        assert_eq!(config.regions[2].ordering, 1);
    }

    #[test]
    fn should_use_default_options_when_section_missing() {
        let content = r#"
languages = ["en-US"]

[[regions]]
slug = "worldwide"
name = "worldwide"
default_language = "en-US"
worldwide = true
"#;

        let config = ChainConfig::from_toml_str(content).expect("valid config");

        assert_eq!(config.options, ChainOptions::default());
    }

    #[test]
    fn should_return_parse_error_when_toml_is_malformed() {
        let result = ChainConfig::from_toml_str("languages = [");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

mod into_parts {
    use super::*;

    #[test]
    fn should_build_ordered_region_table() {
        // Arrange
        let config = ChainConfig::from_toml_str(STOREFRONT).expect("valid config");

        // Act
        let (options, languages, regions) = config.into_parts().expect("valid parts");

        // Assert
        assert_eq!(options.default_language, "en-US");
        assert_eq!(languages.canonical("pt-br"), Some("pt-BR"));
        let slugs: Vec<&str> = regions.iter().map(|region| region.slug.as_str()).collect();
        assert_eq!(slugs, ["worldwide", "de", "br"]);
    }

    #[test]
    fn should_reject_configuration_without_worldwide_region() {
        // Arrange
        let mut config = ChainConfig::from_toml_str(STOREFRONT).expect("valid config");
        config.regions.retain(|region| !region.worldwide);

        // Act
        let result = config.into_parts();

        // Assert
        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::WorldwideRegionCount(0)))
        ));
    }

    #[test]
    fn should_reject_configuration_with_two_worldwide_regions() {
        let mut config = ChainConfig::from_toml_str(STOREFRONT).expect("valid config");
        config.regions[1].worldwide = true;

        let result = config.into_parts();

        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::WorldwideRegionCount(2)))
        ));
    }

    #[test]
    fn should_reject_default_language_missing_from_languages() {
        let mut config = ChainConfig::from_toml_str(STOREFRONT).expect("valid config");
        config.options.default_language = "ja".into();

        let result = config.into_parts();

        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::UnknownDefaultLanguage(code))) if code == "ja"
        ));
    }

    #[test]
    fn should_reject_duplicate_region_slugs() {
        let mut config = ChainConfig::from_toml_str(STOREFRONT).expect("valid config");
        config.regions[2].slug = "br".into();

        let result = config.into_parts();

        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::DuplicateRegion(slug))) if slug == "br"
        ));
    }
}

mod load_config {
    use super::*;

    #[test]
    fn should_load_configuration_from_file() {
        // Arrange
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(STOREFRONT.as_bytes()).expect("write config");

        // Act
        let chain = load_config(file.path())
            .expect("config loads")
            .build_chain()
            .expect("chain builds");

        // Assert
        assert_eq!(chain.regions().len(), 3);
        assert!(chain.options().permanent_redirects);
    }

    #[test]
    fn should_report_path_when_file_is_missing() {
        // Arrange
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.toml");

        // Act
        let result = load_config(&path);

        // Assert
        match result {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
