//! Writing the schema file: banner, directories, warnings and failures

#[cfg(test)]
mod generate_output_tests {
    use std::cell::RefCell;
    use std::fs;
    use std::path::{Path, PathBuf};

    use polyschema::model::{schema_from_yaml_str, ModelError, Schema};
    use polyschema::prisma::emit::FORMAT_FAILED_WARNING;
    use polyschema::prisma::BANNER;
    use polyschema::toolchain::{FormatError, SchemaFormatter, StaticVersion};
    use polyschema::{CompilerConfig, GenerationMode, PrismaGeneratorError, PrismaSchemaGenerator};

    const BLOG: &str = r#"
declarations:
  - kind: datasource
    name: db
    fields:
      - { name: provider, value: { string: sqlite } }
      - { name: url, value: { string: "file:./dev.db" } }
  - kind: generator
    name: js
    fields:
      - { name: provider, value: { string: prisma-client-js } }
  - kind: model
    name: Post
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
      - { name: title, type: String }
"#;

    fn output_config(output: PathBuf) -> CompilerConfig {
        CompilerConfig {
            output: Some(output),
            format: true,
            ..Default::default()
        }
    }

    /// Records the paths it was asked to format
    #[derive(Default)]
    struct RecordingFormatter {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl SchemaFormatter for &RecordingFormatter {
        fn format(&self, path: &Path) -> Result<(), FormatError> {
            self.calls.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    struct CrashingFormatter;

    impl SchemaFormatter for CrashingFormatter {
        fn format(&self, _: &Path) -> Result<(), FormatError> {
            Err(FormatError::Failed {
                command: "prisma format".to_string(),
                status: "exit status: 1".to_string(),
            })
        }
    }

    #[test]
    fn test_generate_writes_banner_and_schema() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("prisma/generated/schema.prisma");
        let schema = schema_from_yaml_str(BLOG)?;
        let config = output_config(output.clone());
        let formatter = RecordingFormatter::default();

        let outcome = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(Some("5.3.1".to_string())))
            .with_formatter(&formatter)
            .generate()?;

        assert_eq!(outcome.output, output);
        assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
        assert_eq!(*formatter.calls.borrow(), vec![output.clone()]);

        let written = fs::read_to_string(&output)?;
        assert!(written.starts_with(BANNER));
        assert!(written.contains("DO NOT MODIFY THIS FILE"));
        assert!(written.ends_with(
            "model Post {\n    id Int @id\n    title String\n}\n"
        ));
        assert!(written.contains("datasource db {\n    provider = \"sqlite\"\n    url = \"file:./dev.db\"\n}"));
        Ok(())
    }

    #[test]
    fn test_formatter_failure_is_a_warning() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("schema.prisma");
        let schema = schema_from_yaml_str(BLOG)?;
        let config = output_config(output.clone());

        let outcome = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(None))
            .with_formatter(CrashingFormatter)
            .generate()?;

        assert_eq!(outcome.warnings, vec![FORMAT_FAILED_WARNING.to_string()]);
        // the unformatted file is kept
        assert!(fs::read_to_string(&output)?.contains("model Post {"));
        Ok(())
    }

    #[test]
    fn test_old_tool_version_is_a_warning() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("schema.prisma");
        let schema = schema_from_yaml_str(BLOG)?;
        let config = CompilerConfig {
            output: Some(output.clone()),
            format: false,
            ..Default::default()
        };

        let outcome = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(Some("4.16.2".to_string())))
            .generate()?;

        assert_eq!(
            outcome.warnings,
            vec![
                "Prisma version \"5.0.0\" or higher is required. Detected version is \"4.16.2\"."
                    .to_string()
            ]
        );
        assert!(output.exists());
        Ok(())
    }

    #[test]
    fn test_warnings_keep_their_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let schema = schema_from_yaml_str(BLOG)?;
        let config = output_config(dir.path().join("schema.prisma"));

        let outcome = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(Some("3.0.0".to_string())))
            .with_formatter(CrashingFormatter)
            .generate()?;

        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[0].starts_with("Prisma version"));
        assert_eq!(outcome.warnings[1], FORMAT_FAILED_WARNING);
        Ok(())
    }

    #[test]
    fn test_missing_output_path_writes_nothing() -> anyhow::Result<()> {
        let schema = schema_from_yaml_str(BLOG)?;
        let config = CompilerConfig {
            output: None,
            format: false,
            ..Default::default()
        };
        let err = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(None))
            .generate()
            .unwrap_err();
        assert_eq!(err, PrismaGeneratorError::MissingOutputPath);
        Ok(())
    }

    #[test]
    fn test_compile_error_leaves_no_file() -> anyhow::Result<()> {
        let yaml = r#"
declarations:
  - kind: model
    name: Legacy
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
    attributes:
      - { name: "@@prisma.passthrough", args: [ { value: { number: 42 } } ] }
"#;
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("schema.prisma");
        let schema = schema_from_yaml_str(yaml)?;
        let config = output_config(output.clone());
        let formatter = RecordingFormatter::default();

        let err = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(None))
            .with_formatter(&formatter)
            .generate()
            .unwrap_err();

        assert_eq!(
            err,
            PrismaGeneratorError::InvalidPassthroughArguments {
                attribute: "@@prisma.passthrough".to_string()
            }
        );
        assert!(!output.exists());
        assert!(formatter.calls.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn test_unwritable_output_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        // a regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "")?;
        let schema = schema_from_yaml_str(BLOG)?;
        let config = CompilerConfig {
            output: Some(blocker.join("schema.prisma")),
            format: false,
            ..Default::default()
        };

        let err = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(None))
            .generate()
            .unwrap_err();
        assert!(matches!(err, PrismaGeneratorError::WriteFailed { .. }));
        Ok(())
    }

    #[test]
    fn test_model_files_by_extension() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let yaml_path = dir.path().join("model.yaml");
        fs::write(&yaml_path, BLOG)?;
        let from_yaml = Schema::from_path(&yaml_path)?;

        let json = r#"{
  "declarations": [
    { "kind": "datasource", "name": "db", "fields": [
      { "name": "provider", "value": { "string": "sqlite" } },
      { "name": "url", "value": { "string": "file:./dev.db" } } ] },
    { "kind": "generator", "name": "js", "fields": [
      { "name": "provider", "value": { "string": "prisma-client-js" } } ] },
    { "kind": "model", "name": "Post", "fields": [
      { "name": "id", "type": "Int", "attributes": [ { "name": "@id" } ] },
      { "name": "title", "type": "String" } ] }
  ]
}"#;
        let json_path = dir.path().join("model.json");
        fs::write(&json_path, json)?;
        let from_json = Schema::from_path(&json_path)?;

        let config = CompilerConfig {
            mode: GenerationMode::Logical,
            format: false,
            ..Default::default()
        };
        let render = |schema: &Schema| -> Result<String, PrismaGeneratorError> {
            Ok(PrismaSchemaGenerator::new(schema, &config)
                .with_version_source(StaticVersion(None))
                .build()?
                .to_string())
        };
        assert_eq!(render(&from_yaml)?, render(&from_json)?);
        Ok(())
    }

    #[test]
    fn test_unreadable_model_file() {
        let err = Schema::from_path("/nonexistent/polyschema/model.yaml").unwrap_err();
        assert!(matches!(err, ModelError::ConfigReadError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_formatter_failure_through_config() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("schema.prisma");
        let schema = schema_from_yaml_str(BLOG)?;
        let config = CompilerConfig {
            output: Some(output.clone()),
            format: true,
            formatter_command: "false".to_string(),
            formatter_timeout_secs: Some(10),
            ..Default::default()
        };

        let outcome = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(None))
            .generate()?;
        assert_eq!(outcome.warnings, vec![FORMAT_FAILED_WARNING.to_string()]);
        assert!(output.exists());
        Ok(())
    }
}
