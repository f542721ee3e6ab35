//! Hook connections: which plugins run for a chained hook, and in what order.
//!
//! Connections live in a min-heap keyed by `(priority, sequence)`, where
//! `sequence` increases with every connect. Equal priorities therefore pop in
//! insertion order no matter how the heap reshuffles.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ModError, ModResult};
use crate::traits::{ModObject, ModPlugin};

/// A plugin's interest in a hook.
#[derive(Debug, Clone)]
pub struct HookConnection {
    /// Hook the plugin connected to.
    pub hook_name: String,
    /// Lower runs first.
    pub priority: i32,
    /// Insertion sequence; breaks priority ties.
    pub sequence: u64,
    /// The connected plugin.
    pub plugin: Arc<dyn ModPlugin>,
}

impl HookConnection {
    fn key(&self) -> (i32, u64) {
        (self.priority, self.sequence)
    }
}

impl PartialEq for HookConnection {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HookConnection {}

impl PartialOrd for HookConnection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HookConnection {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Priority queue of hook connections.
#[derive(Debug, Default)]
pub struct ConnectionQueue {
    heap: BinaryHeap<Reverse<HookConnection>>,
    next_sequence: u64,
}

impl ConnectionQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects `object` to `hook_name`. Objects that are not plugins are
    /// rejected and the queue is left unchanged.
    pub fn connect(
        &mut self,
        hook_name: &str,
        priority: i32,
        object: Arc<dyn ModObject>,
    ) -> ModResult<()> {
        let class_name = object.class_name().to_string();
        match object.as_plugin() {
            Some(plugin) => {
                self.connect_plugin(hook_name, priority, plugin);
                Ok(())
            }
            None => {
                debug!(hook = %hook_name, class = %class_name, "Connection rejected, not a mod plugin");
                Err(ModError::CapabilityMismatch { class_name })
            }
        }
    }

    /// Connects a plugin that already satisfies the capability contract.
    pub fn connect_plugin(
        &mut self,
        hook_name: impl Into<String>,
        priority: i32,
        plugin: Arc<dyn ModPlugin>,
    ) {
        let hook_name = hook_name.into();
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        info!(
            hook = %hook_name,
            class = %plugin.class_name(),
            priority,
            sequence,
            "Hook connected"
        );

        self.heap.push(Reverse(HookConnection {
            hook_name,
            priority,
            sequence,
            plugin,
        }));
    }

    /// Drains a copy of the queue in ascending `(priority, sequence)` order.
    /// The queue itself is untouched.
    pub fn drain_snapshot(&self) -> impl Iterator<Item = HookConnection> + use<> {
        let mut snapshot = self.heap.clone();
        std::iter::from_fn(move || snapshot.pop().map(|Reverse(connection)| connection))
    }

    /// Connections for `hook_name`, in dispatch order.
    pub fn for_hook(&self, hook_name: &str) -> Vec<HookConnection> {
        self.drain_snapshot()
            .filter(|c| c.hook_name == hook_name)
            .collect()
    }

    /// Number of connections across all hooks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether there are no connections.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
