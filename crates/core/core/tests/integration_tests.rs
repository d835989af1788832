//! Integration tests for Schemagate Core
//!
//! This test suite covers:
//! - Verification semantics (vacuous, superset, subset, name mismatch)
//! - Diagnostic reports
//! - Packaged schema definitions
//! - Static schema sources

use schemagate_core::{
    verify_report, verify_schemas, FamilySubsetVerifier, SchemaDefinition, SchemaSource,
    SchemaVerifier, StaticSchemaSource, TableName, TableSchema,
};

fn create_table(qualifier: &str, families: &[&str]) -> TableSchema {
    TableSchema::new(TableName::in_default(qualifier)).with_families(families.iter().copied())
}

fn base_schemas() -> Vec<TableSchema> {
    vec![
        create_table("table1", &["table1_1"]),
        create_table("table2", &["table2_1", "table2_2", "table2_3"]),
        create_table("table3", &[]),
    ]
}

fn copy_schemas(schemas: &[TableSchema]) -> Vec<TableSchema> {
    schemas.to_vec()
}

fn add_family_to_all(schemas: Vec<TableSchema>, family: &str) -> Vec<TableSchema> {
    schemas
        .into_iter()
        .map(|schema| schema.with_family(family))
        .collect()
}

mod verification_tests {
    use super::*;

    #[test]
    fn test_empty_expected_schemas_pass() {
        let actual = vec![create_table("table1", &["table1_1"])];
        assert!(verify_schemas(None, Some(&actual)));
        assert!(verify_schemas(Some(&[]), Some(&actual)));
    }

    #[test]
    fn test_empty_actual_schemas_fail() {
        let expected = vec![create_table("table1", &["table1_1"])];
        assert!(!verify_schemas(Some(&expected), None));
        assert!(!verify_schemas(Some(&expected), Some(&[])));
    }

    #[test]
    fn test_exact_match_passes() {
        let expected = base_schemas();
        let actual = copy_schemas(&expected);
        assert!(verify_schemas(Some(&expected), Some(&actual)));
    }

    #[test]
    fn test_excessive_tables_pass() {
        let expected = base_schemas();
        let mut actual = copy_schemas(&expected);
        actual.push(create_table("table4", &["table4_1"]));
        assert!(verify_schemas(Some(&expected), Some(&actual)));
    }

    #[test]
    fn test_excessive_column_families_pass() {
        let expected = base_schemas();
        let actual = add_family_to_all(copy_schemas(&expected), "newCF");
        assert!(verify_schemas(Some(&expected), Some(&actual)));
    }

    #[test]
    fn test_partial_table_match_fails() {
        let actual = base_schemas();
        let mut expected = copy_schemas(&actual);
        expected.push(create_table("table4", &["table4_1"]));
        assert!(!verify_schemas(Some(&expected), Some(&actual)));
    }

    #[test]
    fn test_partial_column_family_match_fails() {
        let actual = base_schemas();
        let expected = add_family_to_all(copy_schemas(&actual), "newCF");
        assert!(!verify_schemas(Some(&expected), Some(&actual)));
    }

    #[test]
    fn test_table_name_mismatch_fails() {
        let expected = vec![create_table("table1", &["CF1"])];
        let actual = vec![create_table("table2", &["CF1"])];
        assert!(!verify_schemas(Some(&expected), Some(&actual)));
    }

    #[test]
    fn test_column_family_mismatch_fails() {
        let expected = vec![create_table("table1", &["CF1"])];
        let actual = vec![create_table("table1", &["CF2"])];
        assert!(!verify_schemas(Some(&expected), Some(&actual)));
    }

    #[test]
    fn test_namespaces_are_part_of_identity() {
        let expected = vec![TableSchema::new(TableName::new("apm", "table1")).with_family("CF1")];
        let actual = vec![create_table("table1", &["CF1"])];
        assert!(!verify_schemas(Some(&expected), Some(&actual)));
    }

    #[test]
    fn test_inputs_unchanged_and_idempotent() {
        let expected = base_schemas();
        let mut actual = add_family_to_all(copy_schemas(&expected), "newCF");
        actual.push(create_table("table4", &["table4_1"]));

        let expected_before = expected.clone();
        let actual_before = actual.clone();

        let verifier = FamilySubsetVerifier::new();
        let first = verifier.verify_schemas(Some(&expected), Some(&actual));
        let second = verifier.verify_schemas(Some(&expected), Some(&actual));
        let report = verifier.verify_report(Some(&expected), Some(&actual));

        assert!(first);
        assert_eq!(first, second);
        assert_eq!(first, report.is_compatible());
        assert_eq!(expected, expected_before);
        assert_eq!(actual, actual_before);
    }

    #[test]
    fn test_verifier_usable_across_threads() {
        let expected = base_schemas();
        let actual = copy_schemas(&expected);
        let verifier: &dyn SchemaVerifier = &FamilySubsetVerifier;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| verifier.verify_schemas(Some(&expected), Some(&actual))))
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap());
            }
        });
    }
}

mod report_tests {
    use super::*;

    #[test]
    fn test_report_agrees_with_boolean() {
        let actual = base_schemas();
        let scenarios: Vec<Vec<TableSchema>> = vec![
            vec![],
            copy_schemas(&actual),
            add_family_to_all(copy_schemas(&actual), "newCF"),
            vec![create_table("table9", &[])],
        ];

        for expected in scenarios {
            let boolean = verify_schemas(Some(&expected), Some(&actual));
            let report = verify_report(Some(&expected), Some(&actual));
            assert_eq!(boolean, report.is_compatible());
        }
    }

    #[test]
    fn test_report_lists_every_missing_family() {
        let actual = base_schemas();
        let expected = add_family_to_all(copy_schemas(&actual), "newCF");

        let report = verify_report(Some(&expected), Some(&actual));
        assert!(report.missing_tables.is_empty());
        assert_eq!(report.missing_families.len(), 3);
        assert_eq!(report.missing_family_count(), 3);
        for families in report.missing_families.values() {
            assert_eq!(families, &vec!["newCF".to_string()]);
        }
    }
}

mod definition_tests {
    use super::*;

    #[tokio::test]
    async fn test_definition_against_live_copy() {
        let definition = SchemaDefinition::from_json(
            r#"{
                "tables": [
                    { "name": "table1", "columnFamilies": ["table1_1"] },
                    { "name": "table2", "columnFamilies": ["table2_1", "table2_2", "table2_3"] },
                    { "name": "table3" }
                ]
            }"#,
        )
        .unwrap();

        let source = StaticSchemaSource::from_definition("packaged", &definition);
        let expected = source.load_schemas().await.unwrap();
        let actual = base_schemas();

        assert_eq!(expected.as_deref(), Some(actual.as_slice()));
        assert!(verify_schemas(expected.as_deref(), Some(&actual)));
    }
}
