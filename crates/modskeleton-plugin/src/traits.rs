//! Object and plugin traits implemented by mod classes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ModResult;
use crate::hooks::definitions::HookIo;

/// Anything a class loader can produce.
///
/// Only objects whose [`as_plugin`](ModObject::as_plugin) returns `Some`
/// take part in hook dispatch.
pub trait ModObject: Send + Sync + std::fmt::Debug {
    /// Class name, used in logs and listings.
    fn class_name(&self) -> &str;

    /// Upcasts to the plugin interface if this object implements it.
    fn as_plugin(self: Arc<Self>) -> Option<Arc<dyn ModPlugin>> {
        None
    }
}

/// The capability contract a loaded mod must satisfy.
pub trait ModPlugin: ModObject {
    /// Handles `hook_name`, consuming the running payload and returning the
    /// payload handed to the next stage.
    fn invoke_hook(&self, hook_name: &str, io: HookIo) -> ModResult<HookIo>;

    /// Chained hooks this plugin wants to be connected to once loaded.
    fn hook_connections(&self) -> Vec<HookInterest> {
        Vec::new()
    }
}

/// A `(hook, priority)` pair a plugin declares interest in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookInterest {
    /// Hook name.
    pub hook: String,
    /// Lower runs first.
    pub priority: i32,
}

impl HookInterest {
    /// Creates an interest.
    pub fn new(hook: impl Into<String>, priority: i32) -> Self {
        Self {
            hook: hook.into(),
            priority,
        }
    }
}

type HookFn = dyn Fn(&str, HookIo) -> ModResult<HookIo> + Send + Sync;

/// A plugin backed by a closure, for hosts and tests that do not need a type.
pub struct ClosurePlugin {
    /// Class name.
    name: String,
    /// Declared chained-hook interests.
    connections: Vec<HookInterest>,
    /// Hook handler.
    handler: Arc<HookFn>,
}

impl std::fmt::Debug for ClosurePlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosurePlugin")
            .field("name", &self.name)
            .field("connections", &self.connections)
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosurePlugin {
    /// Creates a plugin that handles every hook with `handler`.
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str, HookIo) -> ModResult<HookIo> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            connections: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Declares a chained-hook interest.
    pub fn with_connection(mut self, hook: impl Into<String>, priority: i32) -> Self {
        self.connections.push(HookInterest::new(hook, priority));
        self
    }
}

impl ModObject for ClosurePlugin {
    fn class_name(&self) -> &str {
        &self.name
    }

    fn as_plugin(self: Arc<Self>) -> Option<Arc<dyn ModPlugin>> {
        Some(self)
    }
}

impl ModPlugin for ClosurePlugin {
    fn invoke_hook(&self, hook_name: &str, io: HookIo) -> ModResult<HookIo> {
        (self.handler)(hook_name, io)
    }

    fn hook_connections(&self) -> Vec<HookInterest> {
        self.connections.clone()
    }
}
