use std::io::Cursor;

use crate::ParserError;
use crate::common::reader::{ContainerDecoder, read_magic, read_record, read_records};
use crate::common::types::C2Vector;
use crate::mesh::types::{
    Bone, FOURCC_MESH, Face, MESH_VERSION, MeshAsset, MeshHeader, MeshNormal, MeshSection, MeshVertex, SubMeshHeader,
};

pub struct MeshReader {}

impl ContainerDecoder for MeshReader {
    type Asset = MeshAsset;
    const EXTENSION: &'static str = "emd";

    fn decode(buf: &[u8]) -> Result<MeshAsset, ParserError> {
        let mut rdr = Cursor::new(buf);
        read_magic(&mut rdr, FOURCC_MESH)?;

        let header: MeshHeader = read_record(&mut rdr, "header")?;
        if header.version != MESH_VERSION {
            return Err(ParserError::format(format!(
                "mesh version {} is not supported, expected {}",
                header.version, MESH_VERSION
            )));
        }

        let bones: Vec<Bone> = read_records(&mut rdr, header.bone_count as usize, "bone table")?;
        MeshReader::validate_bones(&bones)?;

        let mut sub_meshes = Vec::with_capacity(header.sub_mesh_count as usize);
        for index in 0..header.sub_mesh_count as usize {
            sub_meshes.push(MeshReader::read_section(&mut rdr, index)?);
        }

        Ok(MeshAsset {
            name: header.name.to_string_lossy(),
            bones,
            sub_meshes,
        })
    }
}

impl MeshReader {
    fn validate_bones(bones: &[Bone]) -> Result<(), ParserError> {
        for (i, bone) in bones.iter().enumerate() {
            if bone.parent < -1 || bone.parent as isize >= bones.len() as isize {
                return Err(ParserError::format(format!(
                    "bone {} references parent {} outside of the bone table",
                    i, bone.parent
                )));
            }
        }
        Ok(())
    }

    fn read_section(rdr: &mut Cursor<&[u8]>, index: usize) -> Result<MeshSection, ParserError> {
        let header: SubMeshHeader = read_record(rdr, "sub-mesh header")?;
        let vertices: Vec<MeshVertex> = read_records(rdr, header.vertex_count as usize, "vertices")?;
        let normals: Vec<MeshNormal> = read_records(rdr, header.normal_count as usize, "normals")?;
        let uvs: Vec<C2Vector> = read_records(rdr, header.uv_count as usize, "uvs")?;
        let faces: Vec<Face> = read_records(rdr, header.face_count as usize, "faces")?;

        let section = MeshSection {
            texture_name: header.texture_name.to_string_lossy(),
            vertices,
            normals,
            uvs,
            faces,
        };
        MeshReader::validate_faces(&section, index)?;
        Ok(section)
    }

    /// All three index streams are independent, so every one of them has to be checked on its own.
    fn validate_faces(section: &MeshSection, index: usize) -> Result<(), ParserError> {
        for (face_idx, face) in section.faces.iter().enumerate() {
            if face.corner_count != 3 && face.corner_count != 4 {
                return Err(ParserError::format(format!(
                    "sub-mesh {index}, face {face_idx}: polygons need 3 or 4 corners, got {}",
                    face.corner_count
                )));
            }

            for corner in face.corners() {
                let out_of_range = if corner.position as usize >= section.vertices.len() {
                    Some(("position", corner.position, section.vertices.len()))
                } else if corner.normal as usize >= section.normals.len() {
                    Some(("normal", corner.normal, section.normals.len()))
                } else if corner.uv as usize >= section.uvs.len() {
                    Some(("uv", corner.uv, section.uvs.len()))
                } else {
                    None
                };

                if let Some((stream, idx, len)) = out_of_range {
                    return Err(ParserError::format(format!(
                        "sub-mesh {index}, face {face_idx}: {stream} index {idx} is out of range ({len} entries)"
                    )));
                }
            }
        }
        Ok(())
    }
}
