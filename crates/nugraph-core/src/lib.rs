//! Core data types for nugraph.
//!
//! This crate defines the values shared by the registry client, resolver and
//! diagram serializer: package identities, per-package metadata, and the
//! `nugraph.toml` configuration.
//!
//! This crate is intentionally free of async code and network I/O.

/// Default maximum recursion depth when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 2;

pub mod config;
pub mod identity;
pub mod metadata;
