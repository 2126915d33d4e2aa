//! Registry of provider capability descriptors.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CapabilitiesError, CapabilitiesResult};

use super::{ConnectionOption, ProviderCapabilities, SpecialOptionType};

/// On-disk document shape: a list of `[[providers]]` tables.
#[derive(Debug, Deserialize)]
struct CapabilitiesDocument {
    #[serde(default)]
    providers: Vec<ProviderCapabilities>,
}

/// In-memory registry of provider capability descriptors, keyed by
/// provider tag.
///
/// Re-registering a provider replaces its descriptor; lookups for unknown
/// providers return `None` rather than failing, and callers treat that as
/// "no special handling applies".
///
/// # Examples
///
/// ```
/// use dbkite_core::capabilities::CapabilitiesRegistry;
///
/// let registry = CapabilitiesRegistry::with_defaults();
/// let pg = registry.get("PG").unwrap();
/// assert!(pg.app_name_option().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct CapabilitiesRegistry {
    providers: HashMap<String, ProviderCapabilities>,
}

impl CapabilitiesRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Creates a registry pre-populated with the built-in provider
    /// descriptors (PostgreSQL, SQL Server, MySQL).
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(postgres_capabilities());
        registry.register(sql_server_capabilities());
        registry.register(mysql_capabilities());
        registry
    }

    /// Registers a provider descriptor, replacing any existing descriptor
    /// with the same provider tag.
    pub fn register(&mut self, capabilities: ProviderCapabilities) {
        tracing::debug!(
            provider = %capabilities.provider_id,
            options = capabilities.connection_options.len(),
            "registering provider capabilities"
        );
        self.providers
            .insert(capabilities.provider_id.clone(), capabilities);
    }

    /// Returns the descriptor for a provider tag, if registered.
    #[must_use]
    pub fn get(&self, provider_id: &str) -> Option<&ProviderCapabilities> {
        self.providers.get(provider_id)
    }

    /// Returns true if a descriptor is registered for the provider tag.
    #[must_use]
    pub fn contains(&self, provider_id: &str) -> bool {
        self.providers.contains_key(provider_id)
    }

    /// Returns the number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns the registered provider tags in sorted order.
    #[must_use]
    pub fn provider_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Parses a registry from a TOML document of `[[providers]]` tables.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilitiesError::Parse`] if the document is not valid
    /// TOML or does not match the descriptor shape.
    pub fn from_toml_str(document: &str) -> CapabilitiesResult<Self> {
        let document: CapabilitiesDocument = toml::from_str(document)?;
        let mut registry = Self::new();
        for provider in document.providers {
            registry.register(provider);
        }
        Ok(registry)
    }

    /// Loads a registry from a TOML descriptor file.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilitiesError::Io`] if the file cannot be read, or
    /// [`CapabilitiesError::Parse`] if its contents do not parse.
    pub fn load_from_file(path: impl AsRef<Path>) -> CapabilitiesResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            providers = registry.len(),
            "loaded provider capabilities"
        );
        Ok(registry)
    }

    /// Loads the registry from the platform capabilities file, falling
    /// back to the built-in descriptors when no file exists.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilitiesError::NoConfigDir`] if the platform has no
    /// configuration directory, or the errors of [`Self::load_from_file`]
    /// when the file exists but cannot be loaded.
    pub fn load_default() -> CapabilitiesResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(
                path = %path.display(),
                "no capabilities file found, using built-in provider descriptors"
            );
            Ok(Self::with_defaults())
        }
    }

    /// Returns the platform path of the capabilities file
    /// (`<config dir>/dbkite/providers.toml`).
    ///
    /// # Errors
    ///
    /// Returns [`CapabilitiesError::NoConfigDir`] if the platform has no
    /// configuration directory.
    pub fn default_path() -> CapabilitiesResult<PathBuf> {
        let base = dirs::config_dir().ok_or(CapabilitiesError::NoConfigDir)?;
        Ok(base.join("dbkite").join("providers.toml"))
    }
}

impl Default for CapabilitiesRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn postgres_capabilities() -> ProviderCapabilities {
    ProviderCapabilities::new("PG", "PostgreSQL").with_options(vec![
        ConnectionOption::new("host")
            .with_display_name("Server name")
            .with_special_type(SpecialOptionType::ServerName)
            .identity()
            .required(),
        ConnectionOption::new("dbname")
            .with_display_name("Database name")
            .with_special_type(SpecialOptionType::DatabaseName)
            .identity(),
        ConnectionOption::new("user")
            .with_display_name("User name")
            .with_special_type(SpecialOptionType::UserName)
            .identity(),
        ConnectionOption::new("password")
            .with_display_name("Password")
            .with_special_type(SpecialOptionType::Password),
        ConnectionOption::new("application_name")
            .with_display_name("Application name")
            .with_special_type(SpecialOptionType::AppName),
        ConnectionOption::new("sslmode").with_display_name("SSL mode"),
    ])
}

fn sql_server_capabilities() -> ProviderCapabilities {
    ProviderCapabilities::new("MSSQL", "SQL Server").with_options(vec![
        ConnectionOption::new("server")
            .with_display_name("Server name")
            .with_special_type(SpecialOptionType::ServerName)
            .identity()
            .required(),
        ConnectionOption::new("database")
            .with_display_name("Database name")
            .with_special_type(SpecialOptionType::DatabaseName)
            .identity(),
        ConnectionOption::new("user")
            .with_display_name("User name")
            .with_special_type(SpecialOptionType::UserName)
            .identity(),
        ConnectionOption::new("password")
            .with_display_name("Password")
            .with_special_type(SpecialOptionType::Password),
        ConnectionOption::new("authenticationType")
            .with_display_name("Authentication type")
            .with_special_type(SpecialOptionType::AuthType)
            .identity(),
        ConnectionOption::new("applicationName")
            .with_display_name("Application name")
            .with_special_type(SpecialOptionType::AppName),
        ConnectionOption::new("encrypt").with_display_name("Encrypt"),
    ])
}

// MySQL deliberately carries no application-name option: profile
// canonicalization must skip the app-name step for it.
fn mysql_capabilities() -> ProviderCapabilities {
    ProviderCapabilities::new("MYSQL", "MySQL").with_options(vec![
        ConnectionOption::new("server")
            .with_display_name("Server name")
            .with_special_type(SpecialOptionType::ServerName)
            .identity()
            .required(),
        ConnectionOption::new("database")
            .with_display_name("Database name")
            .with_special_type(SpecialOptionType::DatabaseName)
            .identity(),
        ConnectionOption::new("user")
            .with_display_name("User name")
            .with_special_type(SpecialOptionType::UserName)
            .identity(),
        ConnectionOption::new("password")
            .with_display_name("Password")
            .with_special_type(SpecialOptionType::Password),
        ConnectionOption::new("ssl-mode").with_display_name("SSL mode"),
    ])
}
