//! `dbkite` Core Library
//!
//! This crate provides the core functionality for the `dbkite` database
//! connection manager, including connection profile identity, equivalence
//! rules, and provider capabilities handling.
//!
//! # Crate Structure
//!
//! - [`models`] - Core data structures (ConnectionProfile, ProfileRecord, options-key derivation)
//! - [`capabilities`] - Provider capability descriptors and the capabilities registry
//! - [`error`] - Shared error types
//! - [`tracing`] - Structured logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod capabilities;
pub mod error;
pub mod models;
pub mod tracing;

// =============================================================================
// Convenience re-exports
//
// These flat re-exports exist for the property tests and integration tests,
// which exercise the crate the way an embedding application would. New code
// should import via modular paths (e.g. `dbkite_core::models::ConnectionProfile`)
// rather than the flat namespace (`dbkite_core::ConnectionProfile`).
// =============================================================================

pub use capabilities::{
    CapabilitiesRegistry, ConnectionOption, ProviderCapabilities, SpecialOptionType,
};
pub use error::{CapabilitiesError, CapabilitiesResult};
pub use models::{
    APPLICATION_NAME, ConnectionInfo, ConnectionProfile, OPTION_DATABASE_DISPLAY_NAME,
    OPTION_GROUP_ID, OPTION_REGISTERED_SERVER_DESCRIPTION, OPTION_TENANT_ID, ProfileRecord,
    ProfileSource, base_options_key, provider_from_options_key,
};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, get_tracing_config,
    init_tracing, is_tracing_initialized,
};
