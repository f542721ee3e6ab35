//! Error type for mod discovery, plugin resolution, and hook dispatch.
//!
//! Every per-item failure during a scan is one of these variants. The engine
//! logs and skips them; only collaborator-level failures (an unreadable mods
//! directory, a library that will not load) reach the caller. All variants
//! map cleanly to `modskeleton_core::error::AppError`.

use std::path::PathBuf;

use modskeleton_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Unified error type for the mod engine.
#[derive(Debug, Error)]
pub enum ModError {
    // --- Archive errors ---
    /// Archive is unreadable or not a valid container.
    #[error("Invalid archive '{}': {reason}", path.display())]
    InvalidArchive {
        /// Archive file path.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// Archive could not be attached at its mount point.
    #[error("Cannot mount '{}' at '{mount_point}': {reason}", path.display())]
    MountConflict {
        /// Archive file path.
        path: PathBuf,
        /// Mount point that was requested.
        mount_point: String,
        /// Why the attach failed.
        reason: String,
    },

    // --- Catalog errors ---
    /// Catalog index exists but could not be decoded.
    #[error("Catalog index '{path}' is malformed: {reason}")]
    CatalogIndex {
        /// Virtual path of the index.
        path: String,
        /// Decoder message.
        reason: String,
    },

    // --- Plugin errors ---
    /// Type name does not resolve to a loadable class.
    #[error("Type '{type_name}' could not be resolved")]
    TypeResolution {
        /// The type name that was looked up.
        type_name: String,
    },

    /// Class factory failed to produce an instance.
    #[error("Failed to instantiate '{class_name}': {reason}")]
    Instantiation {
        /// Class that was being constructed.
        class_name: String,
        /// Factory message.
        reason: String,
    },

    /// Object does not implement the plugin capability contract.
    #[error("'{class_name}' does not implement the mod plugin interface")]
    CapabilityMismatch {
        /// Class of the rejected object.
        class_name: String,
    },

    /// Shared library could not be loaded or lacks the registration symbol.
    #[error("Failed to load plugin library '{}': {reason}", path.display())]
    LibraryLoad {
        /// Library path.
        path: PathBuf,
        /// Loader message.
        reason: String,
    },

    // --- Hook errors ---
    /// Hook name was never installed.
    #[error("Hook '{hook}' is not registered")]
    UnregisteredHook {
        /// The unknown hook name.
        hook: String,
    },

    /// Hook name is already installed.
    #[error("Hook '{hook}' is already registered")]
    DuplicateHook {
        /// The duplicate hook name.
        hook: String,
    },

    /// A plugin reported failure while handling a hook.
    #[error("Plugin '{plugin}' failed handling hook '{hook}': {reason}")]
    HookFailed {
        /// Hook being handled.
        hook: String,
        /// Plugin class or identity.
        plugin: String,
        /// Plugin-supplied message.
        reason: String,
    },

    // --- Generic errors ---
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP library error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModError {
    /// Convenience constructor for plugin-side hook failures.
    pub fn hook_failed(hook: &str, plugin: &str, reason: impl Into<String>) -> Self {
        Self::HookFailed {
            hook: hook.to_string(),
            plugin: plugin.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias for mod engine operations.
pub type ModResult<T> = Result<T, ModError>;

impl From<ModError> for AppError {
    fn from(err: ModError) -> Self {
        let kind = match &err {
            ModError::InvalidArchive { .. } | ModError::Zip(_) => ErrorKind::Archive,
            ModError::MountConflict { .. } | ModError::DuplicateHook { .. } => ErrorKind::Conflict,
            ModError::CatalogIndex { .. } | ModError::Json(_) => ErrorKind::Serialization,
            ModError::TypeResolution { .. } | ModError::UnregisteredHook { .. } => {
                ErrorKind::NotFound
            }
            ModError::Instantiation { .. }
            | ModError::CapabilityMismatch { .. }
            | ModError::LibraryLoad { .. }
            | ModError::HookFailed { .. } => ErrorKind::Plugin,
            ModError::Io(_) => ErrorKind::Storage,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
