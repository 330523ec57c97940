//! Shared utilities for nugraph.
//!
//! Cross-cutting concerns used by the other crates: the unified error type,
//! external process spawning, and terminal status and progress indicators.

pub mod errors;
pub mod process;
pub mod progress;
