use glam::{Vec2, Vec3};

use emberfall_files::mesh::types::MeshSection;

use crate::rendering::common::types::{FlatVertex, Mesh};

pub struct MeshImporter {}

impl MeshImporter {
    /// De-indexes every face corner into its own [`FlatVertex`] and fans the polygons into triangles. The
    /// section has to come out of the mesh reader, that already range checked every corner index.
    pub fn create_mesh(section: &MeshSection) -> Mesh {
        profiling::scope!("MeshImporter::create_mesh");
        let corners = section.corner_count();
        let mut vertices = Vec::<FlatVertex>::with_capacity(corners);
        let mut indices = Vec::<u32>::with_capacity(corners.saturating_sub(2 * section.faces.len()) * 3);

        for face in &section.faces {
            let base = vertices.len() as u32;
            for corner in face.corners() {
                let position = section.vertices[corner.position as usize].position;
                let normal = section.normals[corner.normal as usize].normal;
                let uv = section.uvs[corner.uv as usize];

                vertices.push(FlatVertex {
                    position: Vec3::new(position.x, position.y, position.z),
                    normal: Vec3::new(normal.x, normal.y, normal.z),
                    uv: Vec2::new(uv.x, uv.y),
                });
            }

            // fan from the first corner: triangles stay as they are, quads become [0, 1, 2] and [0, 2, 3]
            for i in 1..(face.corner_count as u32).saturating_sub(1) {
                indices.extend([base, base + i, base + i + 1]);
            }
        }

        Mesh { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::MeshImporter;
    use emberfall_files::common::types::{C2Vector, C3Vector};
    use emberfall_files::mesh::types::{Face, MeshNormal, MeshSection, MeshVertex};

    fn vertex(x: f32, y: f32) -> MeshVertex {
        MeshVertex {
            bone: 0,
            position: C3Vector { x, y, z: 0.0 },
        }
    }

    fn face(positions: [u16; 4], uvs: [u16; 4], corner_count: u8) -> Face {
        Face {
            corner_count,
            reserved: 0,
            position_index: positions,
            normal_index: [0; 4],
            uv_index: uvs,
        }
    }

    fn section(faces: Vec<Face>, uv_count: usize) -> MeshSection {
        MeshSection {
            texture_name: "Leaf01".to_string(),
            vertices: vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(1.0, 1.0), vertex(0.0, 1.0)],
            normals: vec![MeshNormal {
                bone: 0,
                normal: C3Vector { x: 0.0, y: 0.0, z: 1.0 },
            }],
            uvs: (0..uv_count).map(|i| C2Vector { x: i as f32, y: 0.5 }).collect(),
            faces,
        }
    }

    #[test]
    fn triangles_keep_their_own_corners() {
        let section = section(
            vec![face([0, 1, 2, 0], [0, 1, 2, 0], 3), face([0, 2, 3, 0], [3, 4, 5, 0], 3)],
            6,
        );
        let mesh = MeshImporter::create_mesh(&section);

        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        // position 0 is shared, but its uvs differ per triangle
        assert_eq!(mesh.vertices[0].position, mesh.vertices[3].position);
        assert_eq!(mesh.vertices[0].uv.x, 0.0);
        assert_eq!(mesh.vertices[3].uv.x, 3.0);
        assert_eq!(mesh.vertices[5].position.y, 1.0);
        assert!(mesh.vertices.iter().all(|v| v.normal.z == 1.0));
    }

    #[test]
    fn quads_are_fanned() {
        let section = section(vec![face([0, 1, 2, 3], [0, 1, 2, 3], 4)], 4);
        let mesh = MeshImporter::create_mesh(&section);

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
