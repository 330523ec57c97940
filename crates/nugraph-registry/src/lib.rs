//! NuGet registry protocol: the package metadata sources the resolver reads
//! from, nuspec parsing, flat-container URL layout, downloads with retries,
//! local `.nupkg` feeds, and authentication.

pub mod auth;
pub mod download;
pub mod local;
pub mod nuget;
pub mod nuspec;
pub mod repository;
pub mod source;
pub mod version;
