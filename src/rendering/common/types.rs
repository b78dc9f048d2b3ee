use std::fmt::{Debug, Formatter};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One de-indexed face corner, the only vertex layout that ever reaches the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct FlatVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Flat vertex list and the triangle list indexing into it. Vertices are never welded, so every face owns
/// its own corners.
#[derive(Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<FlatVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ vertices: [{}], ", self.vertices.len())?;
        write!(f, "indices: [{}] }}", self.indices.len())
    }
}
