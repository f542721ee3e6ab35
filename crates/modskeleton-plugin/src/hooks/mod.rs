//! Hook system: descriptions, registry, connections, and dispatch.

pub mod connector;
pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use connector::{ConnectionQueue, HookConnection};
pub use definitions::{BOOTSTRAP_HOOK, HookDescription, HookIo, HookValue};
pub use dispatcher::{DispatchResult, HookDispatcher, StageFailure};
pub use registry::HookRegistry;
