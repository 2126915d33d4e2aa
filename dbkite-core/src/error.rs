//! Error types for `dbkite-core`
//!
//! The identity model is total: every profile operation is defined over
//! well-typed input and none of them returns an error. The error surface
//! covers only the fallible edges, which is loading provider capability
//! descriptors from disk.

/// Errors that can occur while loading provider capability descriptors.
#[derive(Debug, thiserror::Error)]
pub enum CapabilitiesError {
    /// Reading a descriptor file failed.
    #[error("failed to read capabilities file: {0}")]
    Io(#[from] std::io::Error),

    /// A descriptor document did not parse as TOML.
    #[error("failed to parse capabilities document: {0}")]
    Parse(#[from] toml::de::Error),

    /// No platform configuration directory could be resolved.
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

/// Result type for capabilities operations.
pub type CapabilitiesResult<T> = Result<T, CapabilitiesError>;
