//! Source parsing: import extraction, declaration outlines and graph building
//!
//! Everything here works on text already loaded by the walker. Parsing is
//! line-oriented and lenient; input that does not match is skipped.

pub mod dependency_graph_builder;
pub mod imports;
pub mod outline;

pub use dependency_graph_builder::{find_cycles, DependencyGraphBuilder};
pub use imports::{extract_imports, extractor_for, ImportExtractor, ImportKind, RawImport};
pub use outline::outline;
