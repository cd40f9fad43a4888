//! Core data types for the depth dependency explorer.
//!
//! This crate defines the values exchanged with a module resolver (module
//! metadata and lookup modes), the on-disk module index format, and the
//! global user configuration.
//!
//! This crate is intentionally free of async code and process spawning.

pub mod config;
pub mod index;
pub mod module;
