use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::rendering::common::types::FlatVertex;
use crate::rendering::gpu::{GpuDevice, GpuError, validate_rgba8};

/// Keeps everything in memory and counts allocations. Used for dry runs and for verifying that the resource
/// tables never create an object twice.
#[derive(Debug)]
pub struct HeadlessDevice {
    max_texture_dimension: u32,
    buffer_allocations: AtomicUsize,
    texture_allocations: AtomicUsize,
    allocated_bytes: AtomicU64,
}

#[derive(Debug)]
pub struct HeadlessBuffer {
    pub label: String,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct HeadlessTexture {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl HeadlessTexture {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::with_max_texture_dimension(8192)
    }

    pub fn with_max_texture_dimension(max_texture_dimension: u32) -> Self {
        Self {
            max_texture_dimension,
            buffer_allocations: AtomicUsize::new(0),
            texture_allocations: AtomicUsize::new(0),
            allocated_bytes: AtomicU64::new(0),
        }
    }

    pub fn buffer_allocations(&self) -> usize {
        self.buffer_allocations.load(Ordering::Relaxed)
    }

    pub fn texture_allocations(&self) -> usize {
        self.texture_allocations.load(Ordering::Relaxed)
    }

    pub fn allocated_bytes(&self) -> u64 {
        self.allocated_bytes.load(Ordering::Relaxed)
    }

    fn create_buffer(&self, label: &str, data: &[u8]) -> Result<HeadlessBuffer, GpuError> {
        if data.is_empty() {
            return Err(GpuError::EmptyBuffer {
                label: label.to_string(),
            });
        }

        self.buffer_allocations.fetch_add(1, Ordering::Relaxed);
        self.allocated_bytes.fetch_add(data.len() as u64, Ordering::Relaxed);
        Ok(HeadlessBuffer {
            label: label.to_string(),
            data: data.to_vec(),
        })
    }
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuDevice for HeadlessDevice {
    type VertexBuffer = HeadlessBuffer;
    type IndexBuffer = HeadlessBuffer;
    type Texture = HeadlessTexture;

    fn create_vertex_buffer(&self, label: &str, vertices: &[FlatVertex]) -> Result<HeadlessBuffer, GpuError> {
        self.create_buffer(label, bytemuck::cast_slice(vertices))
    }

    fn create_index_buffer(&self, label: &str, indices: &[u32]) -> Result<HeadlessBuffer, GpuError> {
        self.create_buffer(label, bytemuck::cast_slice(indices))
    }

    fn create_texture_rgba8(&self, label: &str, width: u32, height: u32, rgba: &[u8]) -> Result<HeadlessTexture, GpuError> {
        validate_rgba8(label, width, height, self.max_texture_dimension, rgba)?;

        self.texture_allocations.fetch_add(1, Ordering::Relaxed);
        self.allocated_bytes.fetch_add(rgba.len() as u64, Ordering::Relaxed);
        Ok(HeadlessTexture {
            label: label.to_string(),
            width,
            height,
            rgba: rgba.to_vec(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "headless"
    }
}
