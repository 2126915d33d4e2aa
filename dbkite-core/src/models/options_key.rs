//! Deterministic option-key derivation for connection profiles.
//!
//! A profile's options key is the string collaborators use as a map key to
//! detect "the same logical connection already exists" without reference
//! equality. The format is shared with persisted profile stores and any
//! cache keyed by it, so the segment ordering and separators here are a
//! fixed wire format: changing them invalidates every key already written
//! and requires a migration path.

/// Separator between `name:value` segments of an options key.
pub const ID_SEPARATOR: &str = "|";

/// Separator between a segment name and its value.
pub const NAME_VALUE_SEPARATOR: &str = ":";

/// Segment name for the provider tag. Always the first segment of a key.
pub const PROVIDER_PROPERTY: &str = "providerName";

/// Segment name for the authentication type.
pub const AUTHENTICATION_TYPE_PROPERTY: &str = "authenticationType";

/// Segment name for the database name.
pub const DATABASE_NAME_PROPERTY: &str = "databaseName";

/// Segment name for the server name.
pub const SERVER_NAME_PROPERTY: &str = "serverName";

/// Segment name for the user name.
pub const USER_NAME_PROPERTY: &str = "userName";

/// Segment name for the database display name suffix of a full options key.
pub const DATABASE_DISPLAY_NAME_PROPERTY: &str = "databaseDisplayName";

/// Segment name for the group suffix of a full options key.
pub const GROUP_PROPERTY: &str = "group";

/// Builds the base options key over the identity fields of a connection.
///
/// The identity segments follow the leading `providerName` segment in the
/// alphabetical order of their segment names. Persisted keys depend on
/// this ordering and on the separator characters.
///
/// # Examples
///
/// ```
/// use dbkite_core::models::options_key::base_options_key;
///
/// let key = base_options_key("MSSQL", "", "server3", "database", "user");
/// assert_eq!(
///     key,
///     "providerName:MSSQL|authenticationType:|databaseName:database|serverName:server3|userName:user"
/// );
/// ```
#[must_use]
pub fn base_options_key(
    provider_name: &str,
    authentication_type: &str,
    server_name: &str,
    database_name: &str,
    user_name: &str,
) -> String {
    let segments = [
        (PROVIDER_PROPERTY, provider_name),
        (AUTHENTICATION_TYPE_PROPERTY, authentication_type),
        (DATABASE_NAME_PROPERTY, database_name),
        (SERVER_NAME_PROPERTY, server_name),
        (USER_NAME_PROPERTY, user_name),
    ];
    let mut key = String::new();
    for (name, value) in segments {
        if !key.is_empty() {
            key.push_str(ID_SEPARATOR);
        }
        key.push_str(name);
        key.push_str(NAME_VALUE_SEPARATOR);
        key.push_str(value);
    }
    key
}

/// Appends one `|name:value` segment to an existing options key.
pub fn append_key_segment(key: &mut String, name: &str, value: &str) {
    key.push_str(ID_SEPARATOR);
    key.push_str(name);
    key.push_str(NAME_VALUE_SEPARATOR);
    key.push_str(value);
}

/// Extracts the provider tag from an options key.
///
/// Accepts both base keys and full keys carrying display-name/group
/// suffixes. Returns the empty string when the key has no provider
/// segment.
#[must_use]
pub fn provider_from_options_key(options_key: &str) -> &str {
    options_key
        .split(ID_SEPARATOR)
        .find_map(|segment| {
            segment
                .strip_prefix(PROVIDER_PROPERTY)?
                .strip_prefix(NAME_VALUE_SEPARATOR)
        })
        .unwrap_or("")
}
