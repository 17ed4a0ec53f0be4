//! `commands` crate — command catalog, executor, and typed operations.
//!
//! The catalog is the single source of truth for every supported
//! backing-store operation; the executor binds typed parameters into a
//! catalog template and runs it through a pool-acquired session; the `ops`
//! module is the typed boundary the action layer calls into.

pub mod catalog;
pub mod error;
pub mod executor;
pub mod ops;

pub use catalog::CommandSpec;
pub use error::CommandError;
pub use executor::CommandExecutor;

#[cfg(test)]
mod executor_tests;
