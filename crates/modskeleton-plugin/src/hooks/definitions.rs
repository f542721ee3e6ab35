//! Hook names, payload types, and hook descriptions.

use modskeleton_core::config::HookConfig;
use serde::{Deserialize, Serialize};

/// One opaque value in a hook payload.
pub type HookValue = serde_json::Value;

/// The payload threaded through hook stages.
pub type HookIo = Vec<HookValue>;

/// Hook invoked once on every plugin at the moment it is resolved.
pub const BOOTSTRAP_HOOK: &str = "ModSkeletonInit";

/// A named hook and its invocation policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookDescription {
    /// Unique hook name.
    pub name: String,
    /// `true`: broadcast to every loaded plugin in registration order.
    /// `false`: run only the connected plugins, in priority order.
    #[serde(default)]
    pub always_invoke: bool,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

impl HookDescription {
    /// A hook that runs on every loaded plugin.
    pub fn broadcast(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            always_invoke: true,
            description: description.into(),
        }
    }

    /// A hook that runs only on connected plugins.
    pub fn chained(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            always_invoke: false,
            description: description.into(),
        }
    }

    /// The bootstrap hook description.
    pub fn bootstrap() -> Self {
        Self::broadcast(
            BOOTSTRAP_HOOK,
            "Invoked once on each mod plugin when it is loaded",
        )
    }

    /// Human-readable policy name.
    pub fn policy(&self) -> &'static str {
        if self.always_invoke { "broadcast" } else { "chained" }
    }
}

impl From<HookConfig> for HookDescription {
    fn from(config: HookConfig) -> Self {
        Self {
            name: config.name,
            always_invoke: config.always_invoke,
            description: config.description,
        }
    }
}
