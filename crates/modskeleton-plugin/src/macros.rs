//! Convenience macros for mod authors.

/// Implements [`ModObject`](crate::traits::ModObject) for a type that is not
/// a plugin.
///
/// ```rust,ignore
/// #[derive(Debug, Default)]
/// struct WeaponTable;
/// impl_mod_object!(WeaponTable, "WeaponTable");
/// ```
#[macro_export]
macro_rules! impl_mod_object {
    ($ty:ty, $class:expr) => {
        impl $crate::traits::ModObject for $ty {
            fn class_name(&self) -> &str {
                $class
            }
        }
    };
}

/// Implements [`ModObject`](crate::traits::ModObject) for a type that also
/// implements [`ModPlugin`](crate::traits::ModPlugin), so the engine sees it
/// as a plugin.
///
/// ```rust,ignore
/// #[derive(Debug, Default)]
/// struct WeaponsMod;
/// impl_mod_plugin!(WeaponsMod, "WeaponsMod");
///
/// impl ModPlugin for WeaponsMod {
///     fn invoke_hook(&self, hook: &str, io: HookIo) -> ModResult<HookIo> {
///         Ok(io)
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_mod_plugin {
    ($ty:ty, $class:expr) => {
        impl $crate::traits::ModObject for $ty {
            fn class_name(&self) -> &str {
                $class
            }

            fn as_plugin(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::option::Option<::std::sync::Arc<dyn $crate::traits::ModPlugin>> {
                ::std::option::Option::Some(self)
            }
        }
    };
}

/// Builds a hook payload from values convertible into JSON.
///
/// ```rust,ignore
/// let io = hook_io!["spawn", 3, true];
/// ```
#[macro_export]
macro_rules! hook_io {
    () => {
        ::std::vec::Vec::<$crate::hooks::definitions::HookValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::serde_json::Value::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::error::ModResult;
    use crate::hooks::definitions::HookIo;
    use crate::traits::{ModObject, ModPlugin};

    #[derive(Debug, Default)]
    struct Table;
    impl_mod_object!(Table, "Table");

    #[derive(Debug, Default)]
    struct Doubler;
    impl_mod_plugin!(Doubler, "Doubler");

    impl ModPlugin for Doubler {
        fn invoke_hook(&self, _hook: &str, io: HookIo) -> ModResult<HookIo> {
            Ok(io
                .into_iter()
                .map(|v| json!(v.as_i64().unwrap_or_default() * 2))
                .collect())
        }
    }

    #[test]
    fn test_impl_macros() {
        let table: Arc<dyn ModObject> = Arc::new(Table);
        assert_eq!(table.class_name(), "Table");
        assert!(table.as_plugin().is_none());

        let doubler: Arc<dyn ModObject> = Arc::new(Doubler);
        let plugin = doubler.as_plugin().expect("plugin");
        assert_eq!(
            plugin.invoke_hook("Any", hook_io![1, 2]).expect("invoke"),
            hook_io![2, 4]
        );
    }

    #[test]
    fn test_hook_io() {
        let empty: HookIo = hook_io![];
        assert!(empty.is_empty());
        assert_eq!(
            hook_io!["a", 1, true, json!({"k": "v"})],
            vec![json!("a"), json!(1), json!(true), json!({"k": "v"})]
        );
    }
}
