pub mod asset_graph;
pub mod asset_manager;
pub mod common;
pub mod gpu;
pub mod importer;
pub mod loader;
