//! Configuration module.
//!
//! This module provides functionality for loading sensor invocation
//! parameters from files and command-line arguments.

pub mod loader;

pub use loader::ConfigLoader;
