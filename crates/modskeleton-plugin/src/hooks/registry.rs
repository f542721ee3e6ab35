//! Hook registry: the set of named hooks and their invocation policy.

use std::collections::HashMap;

use tracing::{debug, info};

use super::definitions::HookDescription;
use crate::error::{ModError, ModResult};

/// Registry of hook descriptions keyed by name.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Hook name → description.
    hooks: HashMap<String, HookDescription>,
}

impl HookRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook. An existing name is never overwritten.
    pub fn register(&mut self, description: HookDescription) -> ModResult<()> {
        if self.hooks.contains_key(&description.name) {
            debug!(hook = %description.name, "Duplicate hook registration rejected");
            return Err(ModError::DuplicateHook {
                hook: description.name,
            });
        }

        info!(
            hook = %description.name,
            policy = description.policy(),
            "Hook registered"
        );
        self.hooks.insert(description.name.clone(), description);
        Ok(())
    }

    /// Description for `name`.
    pub fn get(&self, name: &str) -> Option<&HookDescription> {
        self.hooks.get(name)
    }

    /// Description for `name`, or `UnregisteredHook`.
    pub fn require(&self, name: &str) -> ModResult<&HookDescription> {
        self.get(name).ok_or_else(|| ModError::UnregisteredHook {
            hook: name.to_string(),
        })
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// All descriptions, sorted by name.
    pub fn list(&self) -> Vec<HookDescription> {
        let mut hooks: Vec<HookDescription> = self.hooks.values().cloned().collect();
        hooks.sort_by(|a, b| a.name.cmp(&b.name));
        hooks
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
