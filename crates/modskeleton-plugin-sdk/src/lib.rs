//! # modskeleton-plugin-sdk
//!
//! SDK for writing ModSkeleton mod plugins.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modskeleton_plugin_sdk::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct WeaponsMod;
//! impl_mod_plugin!(WeaponsMod, "WeaponsMod");
//!
//! impl ModPlugin for WeaponsMod {
//!     fn invoke_hook(&self, hook: &str, mut io: HookIo) -> ModResult<HookIo> {
//!         if hook == "OnSpawn" {
//!             io.push("weapons".into());
//!         }
//!         Ok(io)
//!     }
//!
//!     fn hook_connections(&self) -> Vec<HookInterest> {
//!         vec![HookInterest::new("OnSpawn", 10)]
//!     }
//! }
//!
//! // Built as a `cdylib`, this exports the registration symbol the host's
//! // dynamic class loader looks for.
//! export_mod_classes! {
//!     "WeaponsMod" => WeaponsMod,
//! }
//! ```
//!
//! The catalog index inside the mod archive then names the class:
//!
//! ```json
//! {"entries": [{"name": "MOD_SKELETON_Weapons", "package_path": "/Weapons",
//!   "object_identity": "/Weapons/MOD_SKELETON_Weapons", "type_name": "WeaponsMod"}]}
//! ```

pub use modskeleton_plugin;

/// Prelude for convenient imports.
pub mod prelude {
    pub use modskeleton_plugin::prelude::*;

    pub use crate::export_mod_classes;
}

/// Generates the `modskeleton_register_classes` symbol, registering each
/// listed type under its class name through `Default`.
///
/// Also usable in-process: the generated function can be called directly
/// with a `ClassRegistry`.
#[macro_export]
macro_rules! export_mod_classes {
    ($($class:expr => $ty:ty),* $(,)?) => {
        #[unsafe(no_mangle)]
        pub extern "Rust" fn modskeleton_register_classes(
            registry: &mut $crate::modskeleton_plugin::loader::ClassRegistry,
        ) {
            $(
                registry.register_default::<$ty>($class);
            )*
        }
    };
}
