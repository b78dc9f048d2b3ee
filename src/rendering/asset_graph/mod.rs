//! This module contains the graph of decoded assets, that provides deduplication, streaming ("async loading")
//! and the bookkeeping for GPU objects.
//!
//! To achieve the first goal of deduplication, the graph will mostly consist of [`std::sync::Arc`]s.
//! Whoever has the first reference to any specific asset takes care of spawning the loader
//! (i.e. [`crate::rendering::loader`]) for it, every later reference awaits that same load and receives
//! a clone of the resulting [`std::sync::Arc`]. Only inserting the pending entry takes a lock, the decoding
//! itself runs on the blocking pool of tokio.
//!
//! Failures are first class nodes, too: a file that is missing or corrupt is logged once and the error is
//! cached, so a model referenced by a hundred placements does not trigger a hundred failing decodes.
//!
//! The nodes only hold the intermediate representation (flat vertices, pixel buffers). GPU objects are
//! derived from them on the render thread by [`crate::rendering::gpu::resource_tables::GpuResourceTables`],
//! either eagerly (model buffers) or lazily on first use (textures).
//!
//! Note: There is no eviction. Nodes live as long as the store that created them, dropping the store (or the
//! whole [`crate::rendering::asset_manager::AssetManager`]) is the teardown point.
pub mod asset_key;
pub mod model_generator;
pub mod model_store;
pub mod nodes;
pub mod resolver;
pub mod texture_generator;
pub mod texture_store;
