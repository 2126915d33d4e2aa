//! Provider capabilities for `dbkite`
//!
//! This module describes what each database provider accepts at the
//! connection level: the named options its driver understands, which of
//! those options play a well-known role (server name, user name,
//! application name), and which participate in connection identity.
//! [`CapabilitiesRegistry`] collects a descriptor per known provider and
//! is consulted while canonicalizing externally supplied profile records.

mod registry;

pub use registry::CapabilitiesRegistry;

use serde::{Deserialize, Serialize};

/// Well-known roles a provider can assign to one of its connection options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialOptionType {
    /// The human-readable connection name.
    ConnectionName,
    /// The server (host) to connect to.
    ServerName,
    /// The database to open on the server.
    DatabaseName,
    /// The authentication scheme selector.
    AuthType,
    /// The login user name.
    UserName,
    /// The login password.
    Password,
    /// The client application name reported to the server.
    AppName,
}

impl SpecialOptionType {
    /// Returns the snake_case identifier used in descriptor documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionName => "connection_name",
            Self::ServerName => "server_name",
            Self::DatabaseName => "database_name",
            Self::AuthType => "auth_type",
            Self::UserName => "user_name",
            Self::Password => "password",
            Self::AppName => "app_name",
        }
    }

    /// Returns all special option types.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::ConnectionName,
            Self::ServerName,
            Self::DatabaseName,
            Self::AuthType,
            Self::UserName,
            Self::Password,
            Self::AppName,
        ]
    }
}

/// One connection option a provider's driver accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionOption {
    /// Option name as the driver spells it (e.g. `application_name`).
    pub name: String,
    /// Human-readable label for option editors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Well-known role of this option, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_type: Option<SpecialOptionType>,
    /// Whether the option participates in connection identity.
    #[serde(default)]
    pub is_identity: bool,
    /// Whether the option must be supplied to connect.
    #[serde(default)]
    pub is_required: bool,
    /// Value assumed when the option is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ConnectionOption {
    /// Creates an option with the given driver name and no role.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            special_type: None,
            is_identity: false,
            is_required: false,
            default_value: None,
        }
    }

    /// Sets the human-readable label.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Assigns a well-known role.
    #[must_use]
    pub fn with_special_type(mut self, special_type: SpecialOptionType) -> Self {
        self.special_type = Some(special_type);
        self
    }

    /// Marks the option as identity-relevant.
    #[must_use]
    pub fn identity(mut self) -> Self {
        self.is_identity = true;
        self
    }

    /// Marks the option as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Returns true if this option carries the application name.
    #[must_use]
    pub const fn is_app_name(&self) -> bool {
        matches!(self.special_type, Some(SpecialOptionType::AppName))
    }
}

/// Connection-option descriptor for one database provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    /// Provider tag matched against a profile's provider name (e.g. `PG`).
    pub provider_id: String,
    /// Human-readable provider name (e.g. `PostgreSQL`).
    pub display_name: String,
    /// Options the provider's driver accepts.
    #[serde(default)]
    pub connection_options: Vec<ConnectionOption>,
}

impl ProviderCapabilities {
    /// Creates a descriptor with no options.
    #[must_use]
    pub fn new(provider_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            display_name: display_name.into(),
            connection_options: Vec::new(),
        }
    }

    /// Replaces the option list.
    #[must_use]
    pub fn with_options(mut self, options: Vec<ConnectionOption>) -> Self {
        self.connection_options = options;
        self
    }

    /// Finds an option by its driver name.
    #[must_use]
    pub fn option_by_name(&self, name: &str) -> Option<&ConnectionOption> {
        self.connection_options.iter().find(|o| o.name == name)
    }

    /// Finds the option assigned the given role, if the provider has one.
    #[must_use]
    pub fn special_option(&self, special_type: SpecialOptionType) -> Option<&ConnectionOption> {
        self.connection_options
            .iter()
            .find(|o| o.special_type == Some(special_type))
    }

    /// Finds the application-name option, if the provider has one.
    #[must_use]
    pub fn app_name_option(&self) -> Option<&ConnectionOption> {
        self.special_option(SpecialOptionType::AppName)
    }

    /// Returns the names of all identity-relevant options.
    #[must_use]
    pub fn identity_option_names(&self) -> Vec<&str> {
        self.connection_options
            .iter()
            .filter(|o| o.is_identity)
            .map(|o| o.name.as_str())
            .collect()
    }
}
