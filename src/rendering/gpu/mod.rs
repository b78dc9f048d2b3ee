//! The backends that GPU objects are created on. The asset graph never touches a device, only
//! [`resource_tables::GpuResourceTables`] does, from the render thread.
pub mod headless;
pub mod resource_tables;
pub mod wgpu_device;

use thiserror::Error;

use crate::rendering::common::types::FlatVertex;

#[derive(Error, Debug)]
pub enum GpuError {
    #[error("{label}: refusing to create an empty buffer")]
    EmptyBuffer { label: String },

    #[error("{label}: {width}x{height} exceeds the maximum texture dimension {max}")]
    TextureTooLarge {
        label: String,
        width: u32,
        height: u32,
        max: u32,
    },

    #[error("{label}: expected {expected} bytes of pixel data, got {actual}")]
    DataLength {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("No compatible GPU adapter")]
    NoAdapter,

    #[error("Device request failed: {0}")]
    DeviceRequest(String),
}

/// Creates the GPU objects of the asset graph. The objects are shared behind `Arc`s by the resource tables,
/// dropping the last reference frees them.
pub trait GpuDevice: Send + Sync {
    type VertexBuffer: Send + Sync;
    type IndexBuffer: Send + Sync;
    type Texture: Send + Sync;

    fn create_vertex_buffer(&self, label: &str, vertices: &[FlatVertex]) -> Result<Self::VertexBuffer, GpuError>;

    fn create_index_buffer(&self, label: &str, indices: &[u32]) -> Result<Self::IndexBuffer, GpuError>;

    /// `rgba` is tightly packed, row-major, top row first.
    fn create_texture_rgba8(&self, label: &str, width: u32, height: u32, rgba: &[u8])
    -> Result<Self::Texture, GpuError>;

    fn backend_name(&self) -> &'static str;
}

/// Shared checks of the texture parameters, before anything is allocated.
pub(crate) fn validate_rgba8(label: &str, width: u32, height: u32, max: u32, rgba: &[u8]) -> Result<(), GpuError> {
    if width > max || height > max {
        return Err(GpuError::TextureTooLarge {
            label: label.to_string(),
            width,
            height,
            max,
        });
    }

    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(GpuError::DataLength {
            label: label.to_string(),
            expected,
            actual: rgba.len(),
        });
    }
    Ok(())
}
