//! Class loading: turning a catalog type name into an object instance.

#[cfg(feature = "dynamic")]
pub mod dynamic;

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::ModResult;
use crate::traits::ModObject;

#[cfg(feature = "dynamic")]
pub use dynamic::DynamicClassLoader;

type ClassFactory = dyn Fn() -> ModResult<Arc<dyn ModObject>> + Send + Sync;

/// A resolved, instantiable type.
#[derive(Clone)]
pub struct ModClass {
    name: String,
    factory: Arc<ClassFactory>,
}

impl std::fmt::Debug for ModClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModClass")
            .field("name", &self.name)
            .field("factory", &"<fn>")
            .finish()
    }
}

impl ModClass {
    /// Creates a class from a factory.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> ModResult<Arc<dyn ModObject>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(factory),
        }
    }

    /// Registered type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the factory.
    pub fn construct(&self) -> ModResult<Arc<dyn ModObject>> {
        (self.factory)()
    }
}

/// Resolves type names and instantiates them.
pub trait ClassLoader: Send + Sync + std::fmt::Debug {
    /// Looks up a type by name. `None` when the name is not a loadable type.
    fn resolve_type(&self, type_name: &str) -> Option<ModClass>;

    /// Creates an instance of a resolved type.
    fn instantiate(&self, class: &ModClass) -> ModResult<Arc<dyn ModObject>> {
        class.construct()
    }
}

/// Name → factory table.
#[derive(Debug, Default, Clone)]
pub struct ClassRegistry {
    classes: IndexMap<String, ModClass>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `name`, replacing any earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> ModResult<Arc<dyn ModObject>> + Send + Sync + 'static,
    {
        let class = ModClass::new(name, factory);
        debug!(class = %class.name, "Class registered");
        if let Some(previous) = self.classes.insert(class.name.clone(), class) {
            warn!(class = %previous.name, "Class re-registered, previous factory replaced");
        }
        self
    }

    /// Registers `T::default()` as the factory for `name`.
    pub fn register_default<T>(&mut self, name: impl Into<String>) -> &mut Self
    where
        T: ModObject + Default + 'static,
    {
        self.register(name, || Ok(Arc::new(T::default()) as Arc<dyn ModObject>))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLoader for ClassRegistry {
    fn resolve_type(&self, type_name: &str) -> Option<ModClass> {
        self.classes.get(type_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModError;
    use crate::traits::ClosurePlugin;

    #[derive(Debug, Default)]
    struct Counter;

    impl ModObject for Counter {
        fn class_name(&self) -> &str {
            "Counter"
        }
    }

    #[test]
    fn test_resolve_and_instantiate() {
        let mut registry = ClassRegistry::new();
        registry
            .register_default::<Counter>("CounterType")
            .register("EchoType", || {
                Ok(Arc::new(ClosurePlugin::new("Echo", |_, io| Ok(io))) as Arc<dyn ModObject>)
            });

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["CounterType", "EchoType"]);
        assert!(registry.resolve_type("Missing").is_none());

        let class = registry.resolve_type("EchoType").expect("resolved");
        assert_eq!(class.name(), "EchoType");
        let object = registry.instantiate(&class).expect("instance");
        assert_eq!(object.class_name(), "Echo");

        let counter = registry.resolve_type("CounterType").expect("resolved");
        let object = registry.instantiate(&counter).expect("instance");
        assert!(object.as_plugin().is_none());
    }

    #[test]
    fn test_factory_error_surfaces() {
        let mut registry = ClassRegistry::new();
        registry.register("Faulty", || {
            Err(ModError::Instantiation {
                class_name: "Faulty".to_string(),
                reason: "missing asset".to_string(),
            })
        });
        let class = registry.resolve_type("Faulty").expect("resolved");
        assert!(matches!(
            registry.instantiate(&class),
            Err(ModError::Instantiation { .. })
        ));
    }
}
