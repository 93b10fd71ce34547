//! Unit tests for loading models and querying the inheritance graph

#[cfg(test)]
mod model_graph_tests {
    use polyschema::model::{schema_from_json_str, schema_from_yaml_str, ModelError};
    use polyschema::toolchain::StaticVersion;
    use polyschema::{CompilerConfig, GenerationMode, PrismaSchemaGenerator};

    const MEDIA: &str = r#"
declarations:
  - kind: datasource
    name: db
    fields:
      - { name: provider, value: { string: mysql } }
  - kind: model
    name: Timestamped
    abstract: true
    fields:
      - { name: createdAt, type: DateTime }
  - kind: model
    name: Media
    delegate: true
    extends: [Timestamped]
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
      - { name: mediaType, type: String }
  - kind: model
    name: Clip
    delegate: true
    extends: [Media]
    fields:
      - { name: seconds, type: Int }
  - kind: model
    name: ShortClip
    extends: [Clip]
  - kind: model
    name: Photo
    extends: [Media]
  - kind: model
    name: Draft
    abstract: true
    extends: [Media]
"#;

    fn names<'a>(models: impl Iterator<Item = &'a polyschema::model::Model>) -> Vec<&'a str> {
        models.map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_subtypes_and_descendants_skip_abstract_models() {
        let schema = schema_from_yaml_str(MEDIA).unwrap();
        let media = schema.model("Media").unwrap();

        assert_eq!(names(schema.direct_subtypes(media)), vec!["Clip", "Photo"]);
        assert_eq!(
            names(schema.descendants(media)),
            vec!["Clip", "ShortClip", "Photo"]
        );
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let schema = schema_from_yaml_str(MEDIA).unwrap();
        let short = schema.model("ShortClip").unwrap();
        assert_eq!(
            names(schema.ancestors(short).into_iter()),
            vec!["Clip", "Media", "Timestamped"]
        );
        assert!(schema.is_descendant_of(short, "Timestamped"));
        assert!(!schema.is_descendant_of(short, "Photo"));
    }

    #[test]
    fn test_field_storage_through_delegates() {
        let schema = schema_from_yaml_str(MEDIA).unwrap();
        let short = schema.model("ShortClip").unwrap();

        let id = short.field("id").unwrap();
        let stored_on = schema.inherited_from_delegate(short, id).unwrap();
        assert_eq!(stored_on.name, "Media");
        assert!(schema.is_id_field(short, id));

        // declared on an abstract model but stored on the delegate below it
        let created = short.field("createdAt").unwrap();
        assert_eq!(created.inherited_from.as_deref(), Some("Timestamped"));
        assert_eq!(schema.inherited_from_delegate(short, created).unwrap().name, "Media");

        let seconds = short.field("seconds").unwrap();
        assert_eq!(schema.inherited_from_delegate(short, seconds).unwrap().name, "Clip");
        let (declaring, _) = schema
            .find_up_matching_field_from_delegate(short, "seconds")
            .unwrap();
        assert_eq!(declaring.name, "Clip");
        let (declaring, _) = schema
            .find_up_matching_field_from_delegate(short, "mediaType")
            .unwrap();
        assert_eq!(declaring.name, "Media");
    }

    #[test]
    fn test_provider_and_named_constraints() {
        let schema = schema_from_yaml_str(MEDIA).unwrap();
        assert_eq!(schema.provider(), Some("mysql"));
        assert!(schema.supports_named_constraints());

        let sqlite = schema_from_yaml_str(
            r#"
declarations:
  - kind: datasource
    name: db
    fields:
      - { name: provider, value: { string: sqlite } }
"#,
        )
        .unwrap();
        assert!(!sqlite.supports_named_constraints());
    }

    #[test]
    fn test_declared_alias_translates_to_canonical_attribute() {
        let yaml = r#"
attributes:
  - { name: "@key", alias_of: "@id" }
declarations:
  - kind: model
    name: Tag
    fields:
      - { name: slug, type: String, attributes: [ { name: "@key" } ] }
"#;
        let schema = schema_from_yaml_str(yaml).unwrap();
        let config = CompilerConfig {
            format: false,
            mode: GenerationMode::Physical,
            ..Default::default()
        };
        let text = PrismaSchemaGenerator::new(&schema, &config)
            .with_version_source(StaticVersion(None))
            .build()
            .unwrap()
            .to_string();
        assert_eq!(text, "model Tag {\n    slug String @id\n}");
    }

    #[test]
    fn test_load_errors() {
        let err = schema_from_yaml_str("declarations: [ { kind: table, name: X } ]").unwrap_err();
        assert!(matches!(err, ModelError::ConfigParseError { .. }));

        let err = schema_from_json_str(
            r#"{ "declarations": [ { "kind": "model", "name": "Dog", "extends": ["Animal"] } ] }"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownSuperType {
                model: "Dog".to_string(),
                super_type: "Animal".to_string()
            }
        );
    }
}
