//! Class loading from shared libraries using `libloading`.

use std::path::Path;

use tracing::info;

use super::{ClassLoader, ClassRegistry, ModClass};
use crate::error::{ModError, ModResult};

/// Symbol every mod library exports, generated by `export_mod_classes!`.
pub const REGISTER_SYMBOL: &[u8] = b"modskeleton_register_classes";

/// Signature of [`REGISTER_SYMBOL`].
///
/// The library and host must be built with the same compiler and the same
/// version of this crate, since the registry crosses the boundary as a Rust
/// type.
pub type RegisterClassesFn = unsafe extern "Rust" fn(&mut ClassRegistry);

/// Resolves classes registered by loaded shared libraries.
pub struct DynamicClassLoader {
    /// Registered classes. Declared before `libraries` so the factories drop
    /// while their code is still mapped.
    classes: ClassRegistry,
    /// Loaded libraries, kept alive for the lifetime of the loader.
    libraries: Vec<libloading::Library>,
}

impl DynamicClassLoader {
    /// Creates a loader seeded with statically registered classes.
    pub fn new(classes: ClassRegistry) -> Self {
        Self {
            classes,
            libraries: Vec::new(),
        }
    }

    /// Loads a library and lets it register its classes. Returns how many
    /// class names it added.
    ///
    /// # Safety
    /// This runs arbitrary code from the library. Only load trusted mods
    /// built against this exact crate version.
    pub unsafe fn load_library(&mut self, path: &Path) -> ModResult<usize> {
        let library_error = |reason: String| ModError::LibraryLoad {
            path: path.to_path_buf(),
            reason,
        };

        let library =
            unsafe { libloading::Library::new(path) }.map_err(|e| library_error(e.to_string()))?;

        let before = self.classes.len();
        {
            let register: libloading::Symbol<RegisterClassesFn> =
                unsafe { library.get(REGISTER_SYMBOL) }.map_err(|e| library_error(e.to_string()))?;
            unsafe { register(&mut self.classes) };
        }
        let added = self.classes.len().saturating_sub(before);

        info!(path = %path.display(), classes = added, "Mod library loaded");

        self.libraries.push(library);
        Ok(added)
    }

    /// Number of loaded libraries.
    pub fn library_count(&self) -> usize {
        self.libraries.len()
    }
}

impl ClassLoader for DynamicClassLoader {
    fn resolve_type(&self, type_name: &str) -> Option<ModClass> {
        self.classes.resolve_type(type_name)
    }
}

impl std::fmt::Debug for DynamicClassLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicClassLoader")
            .field("classes", &self.classes.len())
            .field("libraries", &self.libraries.len())
            .finish()
    }
}
