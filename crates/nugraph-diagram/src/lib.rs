//! Diagram output: PlantUML serialization of a resolved dependency graph and
//! invocation of the PlantUML renderer.

pub mod plantuml;
pub mod render;
