//! # modskeleton-core
//!
//! Core crate for ModSkeleton. Contains the configuration schemas and
//! the unified error system shared by the engine and the host binary.
//!
//! This crate has **no** internal dependencies on other ModSkeleton crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
