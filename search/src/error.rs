//! Typed errors for the search crate.
//!
//! Lifecycle precondition violations are bugs in the calling search and
//! panic; they never appear here. The only fallible surface is loading a
//! [`SearchSpaceConfig`](crate::SearchSpaceConfig).

use std::path::PathBuf;

/// Failure to load a search-space configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read search space config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for this schema.
    #[error("invalid search space config: {0}")]
    Parse(#[from] toml::de::Error),
}
