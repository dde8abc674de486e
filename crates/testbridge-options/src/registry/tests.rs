//! Tests for the category registry.

use super::*;
use crate::categories::build_categories_filter;
use crate::categories::{CategoryPredicate, TestDescription};

const SAMPLE: &str = r#"
[[category]]
name = "com.example.Tagged"

[[category]]
name = "com.example.Slow"
extends = ["com.example.Tagged"]

[[category]]
name = "com.example.VerySlow"
extends = ["com.example.Slow"]

[[category]]
name = "com.example.Flaky"
"#;

#[test]
fn empty_registry_resolves_nothing() {
    let registry = CategoryRegistry::empty();
    assert!(registry.is_empty());
    assert_eq!(
        registry.resolve("com.example.Slow"),
        Err(ResolveError::NotFound("com.example.Slow".into()))
    );
}

#[test]
fn empty_toml_is_an_empty_registry() {
    let registry = from_toml_str("").unwrap();
    assert!(registry.is_empty());
}

#[test]
fn resolves_declared_categories() {
    let registry = from_toml_str(SAMPLE).unwrap();
    assert_eq!(registry.len(), 4);
    let slow = registry.resolve("com.example.Slow").unwrap();
    assert_eq!(slow.name(), "com.example.Slow");
    assert_eq!(slow.supertypes().collect::<Vec<_>>(), ["com.example.Tagged"]);
}

#[test]
fn supertypes_are_transitive() {
    let registry = from_toml_str(SAMPLE).unwrap();
    let very_slow = registry.resolve("com.example.VerySlow").unwrap();
    let tagged = registry.resolve("com.example.Tagged").unwrap();
    assert_eq!(
        very_slow.supertypes().collect::<Vec<_>>(),
        ["com.example.Slow", "com.example.Tagged"]
    );
    assert!(tagged.is_assignable_from(&very_slow));
    assert!(!very_slow.is_assignable_from(&tagged));
}

#[test]
fn lookup_is_case_sensitive() {
    let registry = from_toml_str(SAMPLE).unwrap();
    assert!(registry.resolve("com.example.slow").is_err());
}

#[test]
fn registry_drives_category_filter() {
    let registry = from_toml_str(SAMPLE).unwrap();
    let filter = build_categories_filter(
        &registry,
        Some("com.example.Tagged"),
        Some("com.example.Flaky"),
    )
    .unwrap();

    let very_slow = registry.resolve("com.example.VerySlow").unwrap();
    let flaky = registry.resolve("com.example.Flaky").unwrap();

    assert!(filter.accept(&TestDescription::test("a", vec![very_slow.clone()])));
    assert!(!filter.accept(&TestDescription::test("b", vec![very_slow, flaky])));
}

#[test]
fn registry_reports_every_missing_category() {
    let registry = from_toml_str(SAMPLE).unwrap();
    let err = build_categories_filter(&registry, Some("a.One,com.example.Slow,b.Two"), None)
        .unwrap_err();
    assert_eq!(err.missing(), ["a.One", "b.Two"]);
}

#[test]
fn invalid_toml_is_parse_error() {
    let err = from_toml_str("[[category]\nname = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn unknown_field_is_parse_error() {
    let err = from_toml_str("[[category]]\nname = \"a\"\nparent = \"b\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn duplicate_names_fail_validation() {
    let err = from_toml_str(
        r#"
[[category]]
name = "a.A"

[[category]]
name = "a.A"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
    assert!(err.to_string().contains("duplicate category 'a.A'"));
}

#[test]
fn undeclared_parent_fails_validation() {
    let err = from_toml_str(
        r#"
[[category]]
name = "a.A"
extends = ["a.Missing"]
"#,
    )
    .unwrap_err();
    assert!(err
        .to_string()
        .contains("category 'a.A' extends undeclared category 'a.Missing'"));
}

#[test]
fn cycle_fails_validation() {
    let err = from_toml_str(
        r#"
[[category]]
name = "a.A"
extends = ["a.B"]

[[category]]
name = "a.B"
extends = ["a.A"]
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("inheritance cycle"));
}

#[test]
fn self_extension_fails_validation() {
    let err = from_toml_str("[[category]]\nname = \"a.A\"\nextends = [\"a.A\"]\n").unwrap_err();
    assert!(err.to_string().contains("'a.A' is part of an inheritance cycle"));
}

#[test]
fn validation_collects_all_errors() {
    let err = from_toml_str(
        r#"
[[category]]
name = ""

[[category]]
name = "a,b"
extends = ["nope"]
"#,
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("must not be empty"));
    assert!(msg.contains("must not contain ','"));
    assert!(msg.contains("undeclared category 'nope'"));
}

#[test]
fn load_from_missing_path() {
    let path = std::path::PathBuf::from("/tmp/nonexistent_testbridge_registry.toml");
    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.toml");
    std::fs::write(&path, SAMPLE).unwrap();

    let registry = load_from_path(&path).unwrap();
    assert_eq!(registry.len(), 4);
    assert!(registry.resolve("com.example.Flaky").is_ok());
}
