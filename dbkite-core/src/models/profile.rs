//! Connection profile identity model.
//!
//! [`ConnectionProfile`] is the canonical answer to "which logical
//! connection is this". It owns the addressing fields (provider, server,
//! database, user, authentication type), the credential, the owning group
//! and the provider-specific options mapping, and it derives the string
//! keys collaborators use to de-duplicate profiles without reference
//! equality. [`ProfileRecord`] is the raw, profile-shaped document an
//! external source supplies before canonicalization.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capabilities::{CapabilitiesRegistry, ProviderCapabilities};

use super::options_key;

/// Application name written into a provider's app-name option during
/// canonicalization, so servers can attribute sessions to this client.
pub const APPLICATION_NAME: &str = "dbkite";

/// Options-map key holding the owning group's identifier.
pub const OPTION_GROUP_ID: &str = "groupId";

/// Options-map key holding the display form of the database name.
pub const OPTION_DATABASE_DISPLAY_NAME: &str = options_key::DATABASE_DISPLAY_NAME_PROPERTY;

/// Options-map key holding the directory/cloud tenant of the connection.
pub const OPTION_TENANT_ID: &str = "tenantId";

/// Options-map key holding the description of a registered server.
pub const OPTION_REGISTERED_SERVER_DESCRIPTION: &str = "registeredServerDescription";

fn default_true() -> bool {
    true
}

/// Externally supplied profile-shaped record, prior to canonicalization.
///
/// Every field defaults, so partial documents deserialize totally:
/// missing values degrade to empty strings or sentinel defaults rather
/// than failing. The password is plain text at this stage; the canonical
/// [`ConnectionProfile`] wraps it in a secret type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Backend driver/dialect tag (e.g. `PG`, `MSSQL`).
    #[serde(default)]
    pub provider_name: String,
    /// Server (host) the record addresses.
    #[serde(default)]
    pub server_name: String,
    /// Database to open; empty means the server's default database.
    #[serde(default)]
    pub database_name: String,
    /// Login user name.
    #[serde(default)]
    pub user_name: String,
    /// Login password.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Authentication scheme tag.
    #[serde(default)]
    pub authentication_type: String,
    /// Identifier of the owning group.
    #[serde(default)]
    pub group_id: String,
    /// Human-readable group path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_full_name: Option<String>,
    /// Whether credential stores should persist the password.
    #[serde(default)]
    pub save_password: bool,
    /// Whether the profile itself should be persisted.
    #[serde(default = "default_true")]
    pub save_profile: bool,
    /// Identifier carried by the record; empty means unset.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Directory/cloud tenant, for providers that authenticate against one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Provider-specific named options.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub options: HashMap<String, String>,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            provider_name: String::new(),
            server_name: String::new(),
            database_name: String::new(),
            user_name: String::new(),
            password: String::new(),
            authentication_type: String::new(),
            group_id: String::new(),
            group_full_name: None,
            save_password: false,
            save_profile: true,
            id: String::new(),
            tenant_id: None,
            options: HashMap::new(),
        }
    }
}

/// Serialization projection of a profile: its options mapping, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    /// Provider-specific named options, including the derived
    /// `groupId` and `databaseDisplayName` entries.
    pub options: HashMap<String, String>,
}

/// Input to [`ConnectionProfile::from_existing`].
///
/// Collaborators that may already hold a canonical profile pass it as
/// [`ProfileSource::Canonical`] and get it back unchanged, avoiding a
/// redundant canonicalization pass.
#[derive(Debug, Clone)]
pub enum ProfileSource {
    /// An already canonical profile, passed through unchanged.
    Canonical(ConnectionProfile),
    /// A raw record, canonicalized via [`ConnectionProfile::from_record`].
    Raw(ProfileRecord),
}

impl From<ConnectionProfile> for ProfileSource {
    fn from(profile: ConnectionProfile) -> Self {
        Self::Canonical(profile)
    }
}

impl From<ProfileRecord> for ProfileSource {
    fn from(record: ProfileRecord) -> Self {
        Self::Raw(record)
    }
}

/// Canonical identity of one database connection.
///
/// A profile answers "what server, database and credential does this
/// connection address" and derives stable comparison keys from that
/// answer. Equivalence is decided by [`matches`](Self::matches), which
/// compares a fixed subset of fields and never the unique identifier.
/// Copies produced by the derivation operations never alias the source's
/// options mapping.
///
/// Fields with derived or secret state (`database_name`, `group_id`, the
/// options mapping, the password, the identifier) are private and mutated
/// through setters that keep the derived options entries in sync; plain
/// identity fields are public and may be mutated in place by owners.
#[derive(Debug, Clone)]
pub struct ConnectionProfile {
    /// Backend driver/dialect tag (e.g. `PG`, `MSSQL`).
    pub provider_name: String,
    /// Server (host) the profile addresses.
    pub server_name: String,
    /// Login user name; empty for integrated authentication.
    pub user_name: String,
    /// Authentication scheme tag; compared exactly, never case-folded.
    pub authentication_type: String,
    /// Human-readable group path; the root group's path is `/`.
    pub group_full_name: Option<String>,
    /// Whether credential stores should persist the password.
    pub save_password: bool,
    /// Whether the profile itself should be persisted.
    pub save_profile: bool,
    /// Transient disconnect-in-progress marker; never part of identity.
    pub is_disconnecting: bool,
    database_name: String,
    group_id: String,
    password: SecretString,
    options: HashMap<String, String>,
    id: Option<String>,
}

impl ConnectionProfile {
    /// Display path of the root connection group.
    pub const ROOT_GROUP_NAME: &'static str = "/";

    /// Creates a fresh profile: empty addressing fields, root group,
    /// `save_password` off, `save_profile` on, a newly generated
    /// identifier.
    #[must_use]
    pub fn new() -> Self {
        let mut profile = Self {
            provider_name: String::new(),
            server_name: String::new(),
            user_name: String::new(),
            authentication_type: String::new(),
            group_full_name: Some(Self::ROOT_GROUP_NAME.to_string()),
            save_password: false,
            save_profile: true,
            is_disconnecting: false,
            database_name: String::new(),
            group_id: String::new(),
            password: SecretString::from(String::new()),
            options: HashMap::new(),
            id: Some(Uuid::new_v4().to_string()),
        };
        profile.republish_derived_options();
        profile
    }

    /// Canonicalizes an externally supplied record.
    ///
    /// Copies the record's fields verbatim, including its identifier (an
    /// empty record identifier stays unset until first read) and its
    /// whole options mapping. If the capability lookup for the record's
    /// provider resolves an application-name option, that option is set
    /// to [`APPLICATION_NAME`]; an unknown provider or a provider without
    /// one skips the step. The derived `groupId` and
    /// `databaseDisplayName` entries are always republished last.
    #[must_use]
    pub fn from_record(capabilities: &CapabilitiesRegistry, record: &ProfileRecord) -> Self {
        let mut profile = Self {
            provider_name: record.provider_name.clone(),
            server_name: record.server_name.clone(),
            user_name: record.user_name.clone(),
            authentication_type: record.authentication_type.clone(),
            group_full_name: record.group_full_name.clone(),
            save_password: record.save_password,
            save_profile: record.save_profile,
            is_disconnecting: false,
            database_name: record.database_name.clone(),
            group_id: record.group_id.clone(),
            password: SecretString::from(record.password.clone()),
            options: record.options.clone(),
            id: if record.id.is_empty() {
                None
            } else {
                Some(record.id.clone())
            },
        };

        if let Some(tenant_id) = &record.tenant_id {
            profile
                .options
                .insert(OPTION_TENANT_ID.to_string(), tenant_id.clone());
        }
        if let Some(app_name_option) = capabilities
            .get(&record.provider_name)
            .and_then(ProviderCapabilities::app_name_option)
        {
            profile
                .options
                .insert(app_name_option.name.clone(), APPLICATION_NAME.to_string());
        }
        profile.republish_derived_options();
        profile
    }

    /// Canonicalizes a source that may already be canonical.
    ///
    /// A [`ProfileSource::Canonical`] input is returned unchanged, with
    /// its identifier state intact; a [`ProfileSource::Raw`] input goes
    /// through [`Self::from_record`].
    #[must_use]
    pub fn from_existing(capabilities: &CapabilitiesRegistry, source: ProfileSource) -> Self {
        match source {
            ProfileSource::Canonical(profile) => profile,
            ProfileSource::Raw(record) => Self::from_record(capabilities, &record),
        }
    }

    /// Decides whether two profiles address the same logical connection.
    ///
    /// Compares provider name and authentication type exactly, the group
    /// identifier exactly, and the server, database, user and
    /// database-display names case-insensitively (empty on both sides is
    /// equal). The unique identifier, the save flags and all other
    /// options are ignored. This is an equivalence relation.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.provider_name == other.provider_name
            && eq_ignore_case(&self.server_name, &other.server_name)
            && eq_ignore_case(&self.database_name, &other.database_name)
            && eq_ignore_case(&self.user_name, &other.user_name)
            && eq_ignore_case(
                self.option(OPTION_DATABASE_DISPLAY_NAME).unwrap_or(""),
                other.option(OPTION_DATABASE_DISPLAY_NAME).unwrap_or(""),
            )
            && self.authentication_type == other.authentication_type
            && self.group_id == other.group_id
    }

    /// Returns the profile identifier, generating and caching a fresh one
    /// if it is unset.
    ///
    /// Takes `&mut self` because an unset identifier is filled on first
    /// read; after that the same string is returned on every call.
    pub fn id(&mut self) -> &str {
        self.id.get_or_insert_with(|| {
            let id = Uuid::new_v4().to_string();
            tracing::debug!(profile_id = %id, "generated profile identifier on first read");
            id
        })
    }

    /// Replaces the identifier with a freshly generated one.
    pub fn generate_new_id(&mut self) {
        self.id = Some(Uuid::new_v4().to_string());
    }

    /// Returns a copy sharing this profile's identifier.
    ///
    /// The identifier is settled first, so both the original and the copy
    /// observe the same value even when it had not been read yet. The
    /// options mapping is deep-copied.
    #[must_use]
    pub fn duplicate(&mut self) -> Self {
        self.id();
        self.clone()
    }

    /// Returns a copy with its own freshly generated identifier.
    #[must_use]
    pub fn duplicate_with_new_id(&self) -> Self {
        let mut copy = self.clone();
        copy.generate_new_id();
        copy
    }

    /// Returns a copy with a fresh identifier pointed at one particular
    /// database, for specializing a server profile to a single database.
    #[must_use]
    pub fn duplicate_with_database(&self, database_name: impl Into<String>) -> Self {
        let mut copy = self.duplicate_with_new_id();
        copy.set_database_name(database_name);
        copy
    }

    /// Returns a copy sharing this profile's identifier with the password
    /// cleared, for contexts that must not carry secrets.
    #[must_use]
    pub fn without_password(&mut self) -> Self {
        self.id();
        let mut copy = self.clone();
        copy.set_password(String::new());
        copy
    }

    /// Builds the full options key used for de-duplication lookups.
    ///
    /// Starts from [`Self::connection_info_id`]; if the database display
    /// name option is present and non-empty it is appended as a segment,
    /// and the group identifier segment always comes last. The format is
    /// part of the persisted-key compatibility contract described in
    /// [`options_key`](super::options_key).
    #[must_use]
    pub fn options_key(&self) -> String {
        let mut key = self.connection_info_id();
        if let Some(display_name) = self.option(OPTION_DATABASE_DISPLAY_NAME)
            && !display_name.is_empty()
        {
            options_key::append_key_segment(
                &mut key,
                options_key::DATABASE_DISPLAY_NAME_PROPERTY,
                display_name,
            );
        }
        options_key::append_key_segment(&mut key, options_key::GROUP_PROPERTY, &self.group_id);
        key
    }

    /// Builds the base key identifying the connection independent of the
    /// group it is filed under.
    #[must_use]
    pub fn connection_info_id(&self) -> String {
        options_key::base_options_key(
            &self.provider_name,
            &self.authentication_type,
            &self.server_name,
            &self.database_name,
            &self.user_name,
        )
    }

    /// Projects the options mapping, verbatim, for external consumers.
    #[must_use]
    pub fn to_connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            options: self.options.clone(),
        }
    }

    /// Returns true if the profile is filed directly under the root
    /// group.
    #[must_use]
    pub fn is_added_to_root_group(&self) -> bool {
        self.group_full_name.as_deref() == Some(Self::ROOT_GROUP_NAME)
    }

    /// Returns true if the record connects to its server's default
    /// database (the database name is empty after trimming whitespace).
    #[must_use]
    pub fn is_connection_to_default_db(record: &ProfileRecord) -> bool {
        record.database_name.trim().is_empty()
    }

    /// Instance form of [`Self::is_connection_to_default_db`].
    #[must_use]
    pub fn connects_to_default_database(&self) -> bool {
        self.database_name.trim().is_empty()
    }

    /// Database the profile opens; empty for the server default.
    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Sets the database name and republishes the derived
    /// `databaseDisplayName` options entry.
    pub fn set_database_name(&mut self, database_name: impl Into<String>) {
        self.database_name = database_name.into();
        self.options.insert(
            OPTION_DATABASE_DISPLAY_NAME.to_string(),
            self.database_name.clone(),
        );
    }

    /// Identifier of the owning group.
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Sets the owning group and republishes the derived `groupId`
    /// options entry.
    pub fn set_group_id(&mut self, group_id: impl Into<String>) {
        self.group_id = group_id.into();
        self.options
            .insert(OPTION_GROUP_ID.to_string(), self.group_id.clone());
    }

    /// Replaces the password.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = SecretString::from(password.into());
    }

    /// Exposes the password for handing to a driver.
    #[must_use]
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Returns true if a non-empty password is set.
    #[must_use]
    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }

    /// The provider-specific options mapping, including the derived
    /// entries.
    #[must_use]
    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    /// Looks up one option value.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Sets one option value.
    ///
    /// Writing the derived `groupId`/`databaseDisplayName` entries
    /// directly is possible but short-lived: the next typed-field
    /// mutation or canonical construction republishes them.
    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.options.insert(name.into(), value.into());
    }

    /// Removes one option value, returning it if present.
    pub fn remove_option(&mut self, name: &str) -> Option<String> {
        self.options.remove(name)
    }

    /// Directory/cloud tenant of the connection, if any.
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        self.option(OPTION_TENANT_ID)
    }

    /// Sets the directory/cloud tenant.
    pub fn set_tenant_id(&mut self, tenant_id: impl Into<String>) {
        self.options
            .insert(OPTION_TENANT_ID.to_string(), tenant_id.into());
    }

    /// Description carried over from a registered server, if any.
    #[must_use]
    pub fn registered_server_description(&self) -> Option<&str> {
        self.option(OPTION_REGISTERED_SERVER_DESCRIPTION)
    }

    /// Sets the registered server description.
    pub fn set_registered_server_description(&mut self, description: impl Into<String>) {
        self.options.insert(
            OPTION_REGISTERED_SERVER_DESCRIPTION.to_string(),
            description.into(),
        );
    }

    fn republish_derived_options(&mut self) {
        self.options
            .insert(OPTION_GROUP_ID.to_string(), self.group_id.clone());
        self.options.insert(
            OPTION_DATABASE_DISPLAY_NAME.to_string(),
            self.database_name.clone(),
        );
    }
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self::new()
    }
}

// Empty on both sides compares equal; comparison is Unicode
// case-insensitive, matching how server and database names are resolved.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
