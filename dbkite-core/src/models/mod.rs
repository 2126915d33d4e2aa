//! Data models for `dbkite`
//!
//! This module provides the connection-profile identity model: the
//! canonical [`ConnectionProfile`] with its equivalence and cloning
//! semantics, the raw [`ProfileRecord`] documents external sources
//! supply, and the options-key derivation whose string format is a
//! persisted-data compatibility contract.

pub mod options_key;
mod profile;

pub use options_key::{base_options_key, provider_from_options_key};
pub use profile::{
    APPLICATION_NAME, ConnectionInfo, ConnectionProfile, OPTION_DATABASE_DISPLAY_NAME,
    OPTION_GROUP_ID, OPTION_REGISTERED_SERVER_DESCRIPTION, OPTION_TENANT_ID, ProfileRecord,
    ProfileSource,
};
