//! Dependency resolution engine: recursive discovery of a package's
//! transitive dependencies up to a depth bound, with cycle and diamond
//! de-duplication and tolerance for packages that cannot be fetched.

pub mod graph;
pub mod resolver;
pub mod visited;
