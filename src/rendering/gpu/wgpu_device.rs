use log::info;
use wgpu::util::DeviceExt;

use crate::rendering::common::types::FlatVertex;
use crate::rendering::gpu::{GpuDevice, GpuError, validate_rgba8};

/// Creates the GPU objects through wgpu. The render loop owning the device hands it in, tooling can request a
/// device of its own with [`WgpuDevice::request`].
pub struct WgpuDevice {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl WgpuDevice {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Blocks on requesting any adapter, no surface is needed for uploading.
    pub fn request() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or(GpuError::NoAdapter)?;
        info!("Using GPU adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("emberfall"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .map_err(|err| GpuError::DeviceRequest(err.to_string()))?;

        Ok(Self::new(device, queue))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    fn create_buffer(&self, label: &str, contents: &[u8], usage: wgpu::BufferUsages) -> Result<wgpu::Buffer, GpuError> {
        if contents.is_empty() {
            return Err(GpuError::EmptyBuffer {
                label: label.to_string(),
            });
        }

        Ok(self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        }))
    }
}

impl GpuDevice for WgpuDevice {
    type VertexBuffer = wgpu::Buffer;
    type IndexBuffer = wgpu::Buffer;
    type Texture = wgpu::Texture;

    fn create_vertex_buffer(&self, label: &str, vertices: &[FlatVertex]) -> Result<wgpu::Buffer, GpuError> {
        self.create_buffer(label, bytemuck::cast_slice(vertices), wgpu::BufferUsages::VERTEX)
    }

    fn create_index_buffer(&self, label: &str, indices: &[u32]) -> Result<wgpu::Buffer, GpuError> {
        self.create_buffer(label, bytemuck::cast_slice(indices), wgpu::BufferUsages::INDEX)
    }

    fn create_texture_rgba8(&self, label: &str, width: u32, height: u32, rgba: &[u8]) -> Result<wgpu::Texture, GpuError> {
        validate_rgba8(
            label,
            width,
            height,
            self.device.limits().max_texture_dimension_2d,
            rgba,
        )?;

        Ok(self.device.create_texture_with_data(
            &self.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            rgba,
        ))
    }

    fn backend_name(&self) -> &'static str {
        "wgpu"
    }
}
