//! Prelude for convenient imports.

pub use crate::error::{ModError, ModResult};
pub use crate::hooks::definitions::{BOOTSTRAP_HOOK, HookDescription, HookIo, HookValue};
pub use crate::loader::{ClassLoader, ClassRegistry, ModClass};
pub use crate::traits::{ClosurePlugin, HookInterest, ModObject, ModPlugin};

pub use crate::{hook_io, impl_mod_object, impl_mod_plugin};
