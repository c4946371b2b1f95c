//! Data models for Cartographer

pub mod analysis;
pub mod config;
pub mod dependency_graph;
pub mod file_record;
pub mod finding;
pub mod metrics;
