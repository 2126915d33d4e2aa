//! Integration tests for capabilities loading
//!
//! These tests verify that provider capabilities documents parse from
//! real files and that loaded capabilities drive canonicalization.

use dbkite_core::{
    APPLICATION_NAME, CapabilitiesError, CapabilitiesRegistry, ConnectionOption,
    ConnectionProfile, ProfileRecord, ProviderCapabilities, SpecialOptionType,
};

// ============================================================================
// Built-in Defaults
// ============================================================================

#[test]
fn test_defaults_cover_builtin_providers() {
    let registry = CapabilitiesRegistry::with_defaults();

    assert_eq!(registry.provider_ids(), vec!["MSSQL", "MYSQL", "PG"]);

    let pg = registry.get("PG").expect("PG should be registered");
    assert_eq!(
        pg.app_name_option().map(|option| option.name.as_str()),
        Some("application_name")
    );
    assert!(pg.identity_option_names().contains(&"host"));

    let mssql = registry.get("MSSQL").expect("MSSQL should be registered");
    assert_eq!(
        mssql.app_name_option().map(|option| option.name.as_str()),
        Some("applicationName")
    );

    let mysql = registry.get("MYSQL").expect("MYSQL should be registered");
    assert!(mysql.app_name_option().is_none());
}

// ============================================================================
// File Loading
// ============================================================================

#[test]
fn test_load_capabilities_from_file() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("providers.toml");

    let document = r#"
        [[providers]]
        provider_id = "SQLITE"
        display_name = "SQLite"

        [[providers.connection_options]]
        name = "filename"
        special_type = "server_name"
        is_identity = true
        is_required = true

        [[providers.connection_options]]
        name = "app_name"
        special_type = "app_name"
    "#;
    std::fs::write(&path, document).expect("fixture should be written");

    let registry = CapabilitiesRegistry::load_from_file(&path).expect("file should load");
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("SQLITE"));

    let sqlite = registry.get("SQLITE").expect("SQLITE should be registered");
    assert_eq!(
        sqlite.special_option(SpecialOptionType::ServerName).map(|option| option.name.as_str()),
        Some("filename")
    );
    assert_eq!(
        sqlite.app_name_option().map(|option| option.name.as_str()),
        Some("app_name")
    );
}

#[test]
fn test_load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let err = CapabilitiesRegistry::load_from_file(dir.path().join("absent.toml"))
        .expect_err("missing file should fail");
    assert!(matches!(err, CapabilitiesError::Io(_)));
}

#[test]
fn test_malformed_document_is_parse_error() {
    let err = CapabilitiesRegistry::from_toml_str("providers = 3")
        .expect_err("malformed document should fail");
    assert!(matches!(err, CapabilitiesError::Parse(_)));
}

// ============================================================================
// Loaded Capabilities Drive Canonicalization
// ============================================================================

#[test]
fn test_registered_provider_feeds_canonicalization() {
    let mut registry = CapabilitiesRegistry::with_defaults();
    registry.register(
        ProviderCapabilities::new("DUCKDB", "DuckDB").with_options(vec![
            ConnectionOption::new("path")
                .with_special_type(SpecialOptionType::ServerName)
                .identity()
                .required(),
            ConnectionOption::new("custom_user_agent")
                .with_special_type(SpecialOptionType::AppName),
        ]),
    );

    let record = ProfileRecord {
        provider_name: "DUCKDB".to_string(),
        server_name: "/data/analytics.duckdb".to_string(),
        ..Default::default()
    };
    let profile = ConnectionProfile::from_record(&registry, &record);
    assert_eq!(profile.option("custom_user_agent"), Some(APPLICATION_NAME));
}
