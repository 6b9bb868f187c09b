//! Wavefront OBJ import via `tobj`.

use std::path::Path;

use log::{info, warn};

use crate::mesh::MeshBuilder;

use super::Result;

/// Loads a triangulated OBJ file into an empty `builder`.
///
/// Texture coordinates keep their own index space (`single_index` off), and
/// every model in the file is merged with base offsets. Faces without
/// texcoords point at a default (0, 0) UV inserted first.
///
/// OBJ texcoords are normalized to [0, 1]; callers pairing OBJ geometry with
/// a texel-addressed texture scale their UV table by the texture dimensions.
pub fn load_obj<B: MeshBuilder>(path: impl AsRef<Path>, builder: &mut B) -> Result<()> {
    let (models, _materials) = tobj::load_obj(
        path.as_ref(),
        &tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ..Default::default()
        },
    )?;

    builder.add_uv(0.0, 0.0);
    let mut vertex_base = 0usize;
    let mut uv_base = 1usize; // slot 0 is the default UV

    let mut total_faces = 0usize;
    for model in &models {
        let mesh = &model.mesh;

        for position in mesh.positions.chunks_exact(3) {
            builder.add_vertex(position[0], position[1], position[2]);
        }
        for uv in mesh.texcoords.chunks_exact(2) {
            builder.add_uv(uv[0], uv[1]);
        }

        let has_texcoords = !mesh.texcoord_indices.is_empty();
        if !has_texcoords && !mesh.indices.is_empty() {
            warn!("obj: model '{}' has no texcoords, using default UV", model.name);
        }

        for (face_index, face) in mesh.indices.chunks_exact(3).enumerate() {
            let uv = if has_texcoords {
                let uvs = &mesh.texcoord_indices[face_index * 3..face_index * 3 + 3];
                [
                    uv_base + uvs[0] as usize,
                    uv_base + uvs[1] as usize,
                    uv_base + uvs[2] as usize,
                ]
            } else {
                [0, 0, 0]
            };
            builder.add_face(
                vertex_base + face[0] as usize,
                vertex_base + face[1] as usize,
                vertex_base + face[2] as usize,
                uv[0],
                uv[1],
                uv[2],
            );
            total_faces += 1;
        }

        vertex_base += mesh.positions.len() / 3;
        uv_base += mesh.texcoords.len() / 2;
    }

    info!(
        "obj: {} model(s), {} vertices, {} faces",
        models.len(),
        vertex_base,
        total_faces
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use std::io::Write;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn obj_with_texcoords_keeps_separate_uv_indices() {
        let path = write_temp_obj(
            "painterly_uv.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vt 0 0\nvt 1 0\nvt 0 1\n\
             f 1/1 2/2 3/3\n",
        );

        let mut mesh = Mesh::new();
        load_obj(&path, &mut mesh).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        // Default UV plus the three from the file.
        assert_eq!(mesh.uvs().len(), 4);
        assert_eq!(mesh.faces()[0].indices, [0, 1, 2]);
        assert_eq!(mesh.faces()[0].uv_indices, [1, 2, 3]);
        assert_eq!(mesh.uvs()[2].u, 1.0);
    }

    #[test]
    fn obj_without_texcoords_uses_the_default_uv() {
        let path = write_temp_obj(
            "painterly_nouv.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let mut mesh = Mesh::new();
        load_obj(&path, &mut mesh).unwrap();

        assert_eq!(mesh.uvs().len(), 1);
        assert_eq!(mesh.faces()[0].uv_indices, [0, 0, 0]);
    }

    #[test]
    fn quad_faces_are_triangulated() {
        let path = write_temp_obj(
            "painterly_quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );

        let mut mesh = Mesh::new();
        load_obj(&path, &mut mesh).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
    }
}
