//! Logical-mode widening, inherited relation naming and identifier truncation

#[cfg(test)]
mod polymorphic_relation_tests {
    use polyschema::model::schema_from_yaml_str;
    use polyschema::toolchain::StaticVersion;
    use polyschema::{CompilerConfig, GenerationMode, PrismaSchemaGenerator};

    const SHELTER: &str = r#"
declarations:
  - kind: datasource
    name: db
    fields:
      - { name: provider, value: { string: sqlite } }
  - kind: model
    name: Owner
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
      - { name: pets, type: "Animal[]" }
  - kind: model
    name: Vet
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
      - { name: favorite, type: "Animal?" }
  - kind: model
    name: Animal
    delegate: true
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
      - { name: kind, type: String }
      - name: owner
        type: "Owner?"
        attributes:
          - name: "@relation"
            args:
              - { name: fields, value: { array: [ { reference: { target: ownerId } } ] } }
              - { name: references, value: { array: [ { reference: { target: id } } ] } }
      - { name: ownerId, type: "Int?" }
  - kind: model
    name: Dog
    extends: [Animal]
  - kind: model
    name: Cat
    extends: [Animal]
"#;

    fn compile_with(yaml: &str, config: &CompilerConfig) -> String {
        let schema = schema_from_yaml_str(yaml).expect("model should load");
        let text = PrismaSchemaGenerator::new(&schema, config)
            .with_version_source(StaticVersion(None))
            .build()
            .expect("model should compile")
            .to_string();
        text
    }

    fn compile(yaml: &str, mode: GenerationMode) -> String {
        let config = CompilerConfig {
            mode,
            format: false,
            ..Default::default()
        };
        compile_with(yaml, &config)
    }

    fn block<'t>(text: &'t str, name: &str) -> &'t str {
        let header = format!("model {} {{", name);
        let start = text.find(&header).expect("model block present");
        let end = start + text[start..].find('}').expect("closing brace");
        &text[start..=end]
    }

    #[test]
    fn test_optional_relation_is_widened_per_subtype() {
        let text = compile(SHELTER, GenerationMode::Logical);
        let vet = block(&text, "Vet");

        assert!(vet.contains("    favorite Animal?\n"), "{}", vet);
        let widened: Vec<&str> = vet
            .lines()
            .filter(|l| l.contains("delegate_aux_"))
            .collect();
        assert_eq!(
            widened,
            vec![
                "    delegate_aux_Vet_favorite_Dog Dog? @relation(\"delegate_aux_Vet_favorite_Dog\")",
                "    delegate_aux_Vet_favorite_Cat Cat? @relation(\"delegate_aux_Vet_favorite_Cat\")",
            ]
        );
    }

    #[test]
    fn test_list_relation_keeps_cardinality() {
        let text = compile(SHELTER, GenerationMode::Logical);
        let owner = block(&text, "Owner");
        assert!(owner.contains("    pets Animal[]\n"));
        assert!(owner.contains(
            "    delegate_aux_Owner_pets_Dog Dog[] @relation(\"delegate_aux_Owner_pets_Dog\")\n"
        ));
        assert!(owner.contains(
            "    delegate_aux_Owner_pets_Cat Cat[] @relation(\"delegate_aux_Owner_pets_Cat\")\n"
        ));
    }

    #[test]
    fn test_inherited_relation_named_after_opposite_side() {
        let text = compile(SHELTER, GenerationMode::Logical);
        let dog = block(&text, "Dog");
        assert!(dog.contains(
            "    owner Owner? @relation(\"delegate_aux_Owner_pets_Dog\", fields: [ownerId], references: [id])\n"
        ), "{}", dog);
        let cat = block(&text, "Cat");
        assert!(cat.contains("@relation(\"delegate_aux_Owner_pets_Cat\""), "{}", cat);

        // the delegate keeps its own relation unnamed
        let animal = block(&text, "Animal");
        assert!(animal.contains("    owner Owner? @relation(fields: [ownerId], references: [id])\n"));
    }

    #[test]
    fn test_physical_mode_has_no_widening() {
        let text = compile(SHELTER, GenerationMode::Physical);
        assert!(!text.contains("delegate_aux_Owner_"));
        assert!(!text.contains("delegate_aux_Vet_"));
        assert_eq!(
            block(&text, "Owner"),
            "model Owner {\n    id Int @id\n    pets Animal[]\n}"
        );
    }

    const LONG_NAMES: &str = r#"
declarations:
  - kind: model
    name: OrganizationMembershipRecord
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
      - { name: primaryAttachment, type: "Attachment?" }
  - kind: model
    name: Attachment
    delegate: true
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
  - kind: model
    name: ImageAttachmentVariantOne
    extends: [Attachment]
  - kind: model
    name: ImageAttachmentVariantTwo
    extends: [Attachment]
"#;

    #[test]
    fn test_shared_truncation_prefix_gets_ordered_suffixes() {
        let text = compile(LONG_NAMES, GenerationMode::Logical);
        assert!(text.contains(
            "    delegate_aux_OrganizationMembershipRecord_primaryAt_0 ImageAttachmentVariantOne? @relation(\"delegate_aux_OrganizationMembershipRecord_primaryAt_0\")\n"
        ), "{}", text);
        assert!(text.contains(
            "    delegate_aux_OrganizationMembershipRecord_primaryAt_1 ImageAttachmentVariantTwo? @relation(\"delegate_aux_OrganizationMembershipRecord_primaryAt_1\")\n"
        ), "{}", text);
        assert_eq!(text, compile(LONG_NAMES, GenerationMode::Logical));
    }

    #[test]
    fn test_identifier_budget_follows_config() {
        let config = CompilerConfig {
            mode: GenerationMode::Physical,
            format: false,
            identifier_max_length: 30,
            ..Default::default()
        };
        let text = compile_with(LONG_NAMES, &config);
        // 30 minus the 12-character prefix leaves 18
        assert!(text.contains("    delegate_aux_imageAttachmentVar_0 ImageAttachmentVariantOne?\n"), "{}", text);
        assert!(text.contains("    delegate_aux_imageAttachmentVar_1 ImageAttachmentVariantTwo?\n"), "{}", text);

        let default_text = compile(LONG_NAMES, GenerationMode::Physical);
        assert!(default_text.contains("    delegate_aux_imageAttachmentVariantOne ImageAttachmentVariantOne?\n"));
    }

    #[test]
    fn test_field_passthrough_is_emitted_verbatim() {
        let yaml = r#"
declarations:
  - kind: model
    name: Legacy
    fields:
      - { name: id, type: Int, attributes: [ { name: "@id" } ] }
      - name: title
        type: String
        attributes:
          - { name: "@prisma.passthrough", args: [ { value: { string: "@map(\"legacy_col\")" } } ] }
    attributes:
      - { name: "@@prisma.passthrough", args: [ { value: { string: "@@map(\"legacy_table\")" } } ] }
"#;
        for mode in [GenerationMode::Physical, GenerationMode::Logical] {
            let text = compile(yaml, mode);
            assert_eq!(
                text,
                "model Legacy {\n    id Int @id\n    title String @map(\"legacy_col\")\n\n    @@map(\"legacy_table\")\n}"
            );
        }
    }
}
