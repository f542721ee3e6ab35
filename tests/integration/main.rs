//! Integration tests for mod discovery, plugin loading, and hook dispatch.

mod helpers;

mod catalog_test;
mod hook_test;
mod mount_test;
mod plugin_test;
