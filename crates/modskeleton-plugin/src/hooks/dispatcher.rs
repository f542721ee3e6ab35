//! Hook dispatcher: runs a named hook as a pipeline of plugin stages.
//!
//! Broadcast hooks (`always_invoke`) run on every loaded plugin in
//! registration order. Chained hooks run on the connected plugins in
//! `(priority, sequence)` order. Either way, each stage's output is the next
//! stage's input. A stage that fails is logged and the payload passes through
//! it unchanged. An unregistered hook returns its input untouched.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::connector::ConnectionQueue;
use super::definitions::HookIo;
use super::registry::HookRegistry;
use crate::error::ModError;
use crate::resolver::PluginResolver;
use crate::traits::ModPlugin;

/// A stage that returned an error.
#[derive(Debug, Clone, Serialize)]
pub struct StageFailure {
    /// Plugin identity or class name.
    pub plugin: String,
    /// Error message.
    pub reason: String,
}

/// Outcome of one dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    /// Hook that was dispatched.
    pub hook: String,
    /// Whether the hook was registered.
    pub registered: bool,
    /// Final payload.
    pub output: HookIo,
    /// Number of stages invoked, failed ones included.
    pub invoked: usize,
    /// Stages that failed.
    pub failures: Vec<StageFailure>,
}

impl DispatchResult {
    fn new(hook: &str, registered: bool, io: HookIo) -> Self {
        Self {
            hook: hook.to_string(),
            registered,
            output: io,
            invoked: 0,
            failures: Vec::new(),
        }
    }

    fn run_stage(&mut self, label: &str, plugin: &dyn ModPlugin) {
        self.invoked += 1;
        match plugin.invoke_hook(&self.hook, self.output.clone()) {
            Ok(next) => {
                debug!(hook = %self.hook, plugin = %label, len = next.len(), "Hook stage completed");
                self.output = next;
            }
            Err(e) => {
                error!(
                    hook = %self.hook,
                    plugin = %label,
                    error = %e,
                    "Hook stage failed, passing payload through"
                );
                self.failures.push(StageFailure {
                    plugin: label.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Borrowed view of the engine state needed to run hooks.
#[derive(Debug, Clone, Copy)]
pub struct HookDispatcher<'a> {
    registry: &'a HookRegistry,
    plugins: &'a PluginResolver,
    connections: &'a ConnectionQueue,
}

impl<'a> HookDispatcher<'a> {
    /// Creates a dispatcher over the given state.
    pub fn new(
        registry: &'a HookRegistry,
        plugins: &'a PluginResolver,
        connections: &'a ConnectionQueue,
    ) -> Self {
        Self {
            registry,
            plugins,
            connections,
        }
    }

    /// Runs `hook_name` and returns the full outcome.
    pub fn dispatch(&self, hook_name: &str, io: HookIo) -> DispatchResult {
        let Some(description) = self.registry.get(hook_name) else {
            let err = ModError::UnregisteredHook {
                hook: hook_name.to_string(),
            };
            warn!(hook = %hook_name, error = %err, "Passing input through unchanged");
            return DispatchResult::new(hook_name, false, io);
        };

        let mut result = DispatchResult::new(hook_name, true, io);

        if description.always_invoke {
            for loaded in self.plugins.plugins() {
                result.run_stage(&loaded.identity, loaded.instance.as_ref());
            }
        } else {
            for connection in self.connections.drain_snapshot() {
                if connection.hook_name != hook_name {
                    continue;
                }
                result.run_stage(connection.plugin.class_name(), connection.plugin.as_ref());
            }
        }

        info!(
            hook = %hook_name,
            policy = description.policy(),
            invoked = result.invoked,
            failed = result.failures.len(),
            "Hook invoked"
        );

        result
    }

    /// Runs `hook_name` and returns the final payload.
    pub fn invoke(&self, hook_name: &str, io: HookIo) -> HookIo {
        self.dispatch(hook_name, io).output
    }
}
