//! # modskeleton-plugin
//!
//! Mod discovery and hook dispatch for ModSkeleton. Provides:
//!
//! - Archive discovery and mounting into a virtual filesystem
//! - Catalog merging from each archive's metadata index
//! - Plugin resolution through a pluggable class loader
//! - Hook registry, priority-ordered connections, and pipeline dispatch
//! - Optional shared-library class loading via `libloading` (`dynamic` feature)

pub mod archive;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod loader;
pub mod macros;
pub mod prelude;
pub mod resolver;
pub mod traits;

pub use serde_json;

pub use engine::{Engine, ScanConfig, ScanReport};
pub use error::{ModError, ModResult};
pub use hooks::{HookDescription, HookDispatcher, HookIo};
pub use resolver::{LoadedPlugin, PluginResolver};
pub use traits::{ModObject, ModPlugin};
