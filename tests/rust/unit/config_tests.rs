//! Unit tests for compiler configuration sources

#[cfg(test)]
mod config_tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use polyschema::config::{CliConfig, ConfigError, DEFAULT_FORMATTER_COMMAND};
    use polyschema::{CompilerConfig, GenerationMode};
    use test_case::test_case;
    use validator::Validate;

    fn cli() -> CliConfig {
        CliConfig {
            output: Some(PathBuf::from("prisma/schema.prisma")),
            mode: Some(GenerationMode::Logical),
            format: Some(false),
            formatter_timeout_secs: Some(120),
            identifier_max_length: Some(63),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_cli() {
        let config = CompilerConfig::from_cli(cli()).expect("valid cli config");
        assert_eq!(config.mode, GenerationMode::Logical);
        assert!(!config.format);
        assert_eq!(config.identifier_max_length, 63);
        assert_eq!(config.formatter_timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_from_cli_keeps_defaults_for_missing_flags() {
        let config = CompilerConfig::from_cli(CliConfig::default()).expect("defaults are valid");
        assert_eq!(config.mode, GenerationMode::Physical);
        assert!(config.format);
        assert!(config.output.is_none());
        assert_eq!(config.formatter_command, DEFAULT_FORMATTER_COMMAND);
        assert_eq!(config.project_root, PathBuf::from("."));
    }

    #[test_case(19 ; "below minimum")]
    #[test_case(256 ; "above maximum")]
    fn test_from_cli_rejects_identifier_length(length: usize) {
        let cli = CliConfig {
            identifier_max_length: Some(length),
            ..cli()
        };
        assert!(matches!(
            CompilerConfig::from_cli(cli),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_from_cli_rejects_long_timeout() {
        let cli = CliConfig {
            formatter_timeout_secs: Some(7200),
            ..cli()
        };
        assert!(CompilerConfig::from_cli(cli).is_err());
    }

    #[test]
    fn test_yaml_file_is_validated() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("polyschema.yaml");
        std::fs::write(&path, "mode: physical\nformatter_command: \"\"\n")?;
        assert!(matches!(
            CompilerConfig::from_yaml_file(&path),
            Err(ConfigError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_yaml_file_with_unknown_mode() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("polyschema.yaml");
        std::fs::write(&path, "mode: hybrid\n")?;
        assert!(matches!(
            CompilerConfig::from_yaml_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_yaml_file() {
        let result = CompilerConfig::from_yaml_file("/nonexistent/polyschema.yaml");
        assert!(matches!(result, Err(ConfigError::Parse { ref field, .. }) if field == "yaml_file"));
    }

    #[test]
    fn test_default_is_valid() {
        let config = CompilerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.formatter_timeout(), None);
        assert_eq!(config.project_root, PathBuf::from("."));
    }
}
