//! Error types for `docnav-core`.
//!
//! Loading a configuration is the only fallible step: it returns
//! [`CoreResult<T>`], an alias for `Result<T, CoreError>`. Everything after a
//! successful load is a total function over validated, immutable data.

use std::path::PathBuf;

/// A configuration that cannot be accepted.
///
/// Every variant carries the field path of the offending value (for example
/// `sidebar[1].i[0]` or `toolbarLinks[2].id`) so the caller can point the
/// author of the configuration at the exact spot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Two sibling sidebar nodes share a name.
    #[error("duplicate sidebar node name {name:?} at {path}")]
    DuplicateSidebarName { path: String, name: String },

    /// Two sidebar nodes resolve to the same navigation key.
    #[error("sidebar node at {path} resolves to key {key:?}, which is already taken")]
    DuplicateNodeKey { path: String, key: String },

    /// A sidebar node has an empty name.
    #[error("empty sidebar node name at {path}")]
    EmptyNodeName { path: String },

    /// Two toolbar links share an id.
    #[error("duplicate toolbar link id {id:?} at {path}")]
    DuplicateToolbarId { path: String, id: String },

    /// Two access labels share a value.
    #[error("duplicate access value {value:?} at {path}")]
    DuplicateAccessValue { path: String, value: String },

    #[error("{path} must be >= 0, got {value}")]
    NegativeMinChars { path: String, value: i64 },

    #[error("{path} must be >= 1, got {value}")]
    InvalidMaxResults { path: String, value: i64 },

    #[error("{path} must be >= 1, got {value}")]
    InvalidMaxHistoryItems { path: String, value: i64 },

    /// The search mode is neither a known code nor a known name.
    #[error("unknown search mode {mode:?} at {path}")]
    UnknownSearchMode { path: String, mode: String },
}

impl ValidationError {
    /// The field path identifying the violation.
    pub fn path(&self) -> &str {
        match self {
            Self::DuplicateSidebarName { path, .. }
            | Self::DuplicateNodeKey { path, .. }
            | Self::EmptyNodeName { path }
            | Self::DuplicateToolbarId { path, .. }
            | Self::DuplicateAccessValue { path, .. }
            | Self::NegativeMinChars { path, .. }
            | Self::InvalidMaxResults { path, .. }
            | Self::InvalidMaxHistoryItems { path, .. }
            | Self::UnknownSearchMode { path, .. } => path,
        }
    }
}

/// Unified error type for loading a configuration from disk.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The configuration file does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to read the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The file extension does not name a supported format.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// The payload is not well-formed JSON, TOML or script.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The payload parsed but violates an invariant.
    #[error("invalid config: {0}")]
    Validation(#[from] ValidationError),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `docnav-core`.
pub type CoreResult<T> = Result<T, CoreError>;
