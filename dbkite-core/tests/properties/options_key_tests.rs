//! Property-based tests for options-key derivation
//!
//! The derived keys are a persisted compatibility contract, so these
//! tests pin the segment layout and the relationship between the full
//! options key and the group-independent connection info id.

use dbkite_core::{
    CapabilitiesRegistry, ConnectionProfile, ProfileRecord, base_options_key,
    provider_from_options_key,
};
use proptest::prelude::*;

/// Generates a provider tag drawn from the built-in registry set
fn arb_provider() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("PG".to_string()),
        Just("MSSQL".to_string()),
        Just("MYSQL".to_string()),
    ]
}

/// Generates a server (host) name
fn arb_server_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9.-]{0,20}")
        .unwrap()
        .prop_filter("server name must not be empty", |s| !s.is_empty())
}

/// Generates a database name; empty means the server default database
fn arb_database_name() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        4 => prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_]{0,15}").unwrap(),
    ]
}

/// Generates a login user name
fn arb_user_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z0-9_]{0,15}")
        .unwrap()
        .prop_filter("user name must not be empty", |s| !s.is_empty())
}

/// Generates an authentication scheme tag
fn arb_auth_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("password".to_string()),
        Just("integrated".to_string()),
    ]
}

/// Generates a group identifier; empty means ungrouped
fn arb_group_id() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        4 => prop::string::string_regex("[a-f0-9]{8,16}").unwrap(),
    ]
}

/// Strategy for generating raw profile records
fn arb_record() -> impl Strategy<Value = ProfileRecord> {
    (
        arb_provider(),
        arb_server_name(),
        arb_database_name(),
        arb_user_name(),
        arb_auth_type(),
        arb_group_id(),
    )
        .prop_map(
            |(provider_name, server_name, database_name, user_name, authentication_type, group_id)| {
                ProfileRecord {
                    provider_name,
                    server_name,
                    database_name,
                    user_name,
                    authentication_type,
                    group_id,
                    ..Default::default()
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Key derivation is a pure function of the profile state.
    #[test]
    fn prop_options_key_is_deterministic(record in arb_record()) {
        let registry = CapabilitiesRegistry::with_defaults();
        let profile = ConnectionProfile::from_record(&registry, &record);
        prop_assert_eq!(profile.options_key(), profile.options_key());
    }

    /// The full options key always extends the connection info id and
    /// always terminates with the group segment.
    #[test]
    fn prop_options_key_extends_connection_info_id(record in arb_record()) {
        let registry = CapabilitiesRegistry::with_defaults();
        let profile = ConnectionProfile::from_record(&registry, &record);

        let key = profile.options_key();
        prop_assert!(key.starts_with(&profile.connection_info_id()));
        let group_suffix = format!("|group:{}", record.group_id);
        prop_assert!(key.ends_with(&group_suffix));
    }

    /// The provider written at the head of the key is recoverable from
    /// the serialized form.
    #[test]
    fn prop_provider_survives_key_extraction(record in arb_record()) {
        let registry = CapabilitiesRegistry::with_defaults();
        let profile = ConnectionProfile::from_record(&registry, &record);

        let key = profile.options_key();
        prop_assert_eq!(provider_from_options_key(&key), record.provider_name.as_str());
    }

    /// The display-name segment appears exactly when the canonicalized
    /// profile carries a non-empty database display name.
    #[test]
    fn prop_display_segment_present_iff_database_named(record in arb_record()) {
        let registry = CapabilitiesRegistry::with_defaults();
        let profile = ConnectionProfile::from_record(&registry, &record);

        let key = profile.options_key();
        if record.database_name.is_empty() {
            prop_assert!(!key.contains("|databaseDisplayName:"));
        } else {
            let display_segment = format!("|databaseDisplayName:{}", record.database_name);
            prop_assert!(key.contains(&display_segment));
        }
    }

    /// The identity segments always serialize in the same order.
    #[test]
    fn prop_identity_segment_order_is_fixed(record in arb_record()) {
        let registry = CapabilitiesRegistry::with_defaults();
        let profile = ConnectionProfile::from_record(&registry, &record);
        let key = profile.options_key();

        let provider = key.find("providerName:");
        let auth = key.find("|authenticationType:");
        let database = key.find("|databaseName:");
        let server = key.find("|serverName:");
        let user = key.find("|userName:");

        prop_assert_eq!(provider, Some(0));
        prop_assert!(auth.is_some() && database.is_some() && server.is_some() && user.is_some());
        prop_assert!(auth < database && database < server && server < user);
    }

    /// The base key is byte-for-byte the documented five-segment layout.
    #[test]
    fn prop_base_options_key_matches_documented_layout(
        provider in arb_provider(),
        auth in arb_auth_type(),
        server in arb_server_name(),
        database in arb_database_name(),
        user in arb_user_name()
    ) {
        let key = base_options_key(&provider, &auth, &server, &database, &user);
        let expected = format!(
            "providerName:{provider}|authenticationType:{auth}|databaseName:{database}|serverName:{server}|userName:{user}"
        );
        prop_assert_eq!(key, expected);
    }

    /// Moving a profile between groups changes the full key but never
    /// the group-independent connection info id.
    #[test]
    fn prop_group_scopes_key_but_not_connection_info_id(
        record in arb_record(),
        other_group in prop::string::string_regex("[a-f0-9]{8,16}").unwrap()
    ) {
        prop_assume!(record.group_id != other_group);

        let registry = CapabilitiesRegistry::with_defaults();
        let a = ConnectionProfile::from_record(&registry, &record);
        let b = ConnectionProfile::from_record(
            &registry,
            &ProfileRecord { group_id: other_group, ..record },
        );

        prop_assert_eq!(a.connection_info_id(), b.connection_info_id());
        prop_assert_ne!(a.options_key(), b.options_key());
        prop_assert!(!a.connection_info_id().contains("|group:"));
    }
}
