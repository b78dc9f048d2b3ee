use crate::common::types::{C2Vector, C3Vector, FixedName};
use crate::ParserError;
use emberfall_files_derive_parseable::Parse;
use std::io::Write;

pub const FOURCC_MESH: u32 = u32::from_le_bytes(*b"EMD1");
pub const MESH_VERSION: u16 = 1;

/// Follows the signature.
#[derive(Debug, Parse)]
pub(crate) struct MeshHeader {
    pub version: u16,
    pub sub_mesh_count: u16,
    pub bone_count: u16,
    pub reserved: u16,
    pub name: FixedName,
}

#[derive(Debug, Clone, Parse)]
pub struct Bone {
    pub name: FixedName,
    /// -1 for root bones
    pub parent: i16,
    pub position: C3Vector,
}

#[derive(Debug, Parse)]
pub(crate) struct SubMeshHeader {
    pub vertex_count: u16,
    pub normal_count: u16,
    pub uv_count: u16,
    pub face_count: u16,
    pub texture_name: FixedName,
}

#[derive(Debug, Copy, Clone, Parse)]
pub struct MeshVertex {
    pub bone: i16,
    pub position: C3Vector,
}

#[derive(Debug, Copy, Clone, Parse)]
pub struct MeshNormal {
    pub bone: i16,
    pub normal: C3Vector,
}

/// A triangle or a quad. Every corner carries three independent indices into the position, normal and uv
/// streams of its sub-mesh.
#[derive(Debug, Copy, Clone, Parse)]
pub struct Face {
    pub corner_count: u8,
    pub reserved: u8,
    pub position_index: [u16; 4],
    pub normal_index: [u16; 4],
    pub uv_index: [u16; 4],
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FaceCorner {
    pub position: u16,
    pub normal: u16,
    pub uv: u16,
}

impl Face {
    /// The corners in authored order. Only valid on faces that passed decoding (corner_count is 3 or 4).
    pub fn corners(&self) -> impl Iterator<Item = FaceCorner> + '_ {
        (0..self.corner_count as usize).map(|i| FaceCorner {
            position: self.position_index[i],
            normal: self.normal_index[i],
            uv: self.uv_index[i],
        })
    }
}

#[derive(Debug, Clone)]
pub struct MeshSection {
    /// As authored, not resolved against any directory yet.
    pub texture_name: String,
    pub vertices: Vec<MeshVertex>,
    pub normals: Vec<MeshNormal>,
    pub uvs: Vec<C2Vector>,
    pub faces: Vec<Face>,
}

impl MeshSection {
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(|f| f.corner_count as usize).sum()
    }
}

#[derive(Debug, Clone)]
pub struct MeshAsset {
    pub name: String,
    pub bones: Vec<Bone>,
    pub sub_meshes: Vec<MeshSection>,
}

impl MeshAsset {
    pub fn dump_to_wavefront_obj<W: Write>(&self, w: &mut W) -> Result<(), ParserError> {
        writeln!(w, "o {}", &self.name)?;

        // obj indices are global and 1-based, so every stream needs its own running offset.
        let (mut v_base, mut vn_base, mut vt_base) = (1usize, 1usize, 1usize);
        for (i, section) in self.sub_meshes.iter().enumerate() {
            writeln!(w, "g submesh_{} {}", i, section.texture_name)?;
            for v in &section.vertices {
                writeln!(w, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
            }
            for n in &section.normals {
                writeln!(w, "vn {} {} {}", n.normal.x, n.normal.y, n.normal.z)?;
            }
            for uv in &section.uvs {
                writeln!(w, "vt {} {}", uv.x, uv.y)?;
            }
            for face in &section.faces {
                write!(w, "f")?;
                for corner in face.corners() {
                    write!(
                        w,
                        " {}/{}/{}",
                        corner.position as usize + v_base,
                        corner.uv as usize + vt_base,
                        corner.normal as usize + vn_base
                    )?;
                }
                writeln!(w)?;
            }

            v_base += section.vertices.len();
            vn_base += section.normals.len();
            vt_base += section.uvs.len();
        }

        Ok(())
    }
}
