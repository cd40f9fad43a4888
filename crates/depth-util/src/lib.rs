//! Shared utilities for the depth dependency explorer.
//!
//! This crate provides cross-cutting concerns used by the other depth crates:
//! the unified error type, external process spawning (used to query the Go
//! toolchain), and terminal status lines and spinners.

pub mod errors;
pub mod process;
pub mod progress;
