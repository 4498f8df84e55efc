use std::{fs, iter, path::Path};

use glam::{Vec2, Vec3};
use log::{debug, info, warn};

use crate::{Material, Mesh, MeshError, TextureLoader, Vertex, VertexIndexer, error::Result};

/// Keeps a separate position/normal/texcoord index per face corner so deduplication sees the
/// real attribute combinations.
const LOAD_OPTIONS: tobj::LoadOptions = tobj::LoadOptions {
    single_index: false,
    triangulate: true,
    ignore_points: true,
    ignore_lines: true,
    ..tobj::OFFLINE_RENDERING_LOAD_OPTIONS
};

/// Load a Wavefront OBJ file into a single indexed mesh.
///
/// Vertex normals are synthesized when no face corner supplies one. A corner without a normal or
/// texture coordinate gets a zero one when other corners do have it. When `standardize` is set
/// the result is recentred and rescaled, see [`Mesh::standardize`].
pub fn load_obj(path: impl AsRef<Path>, standardize: bool) -> Result<Mesh> {
    let path = path.as_ref();
    info!("Loading model {}...", path.display());

    let source = fs::read_to_string(path).map_err(|e| MeshError::parse(path, e.to_string()))?;
    let base_dir = path.parent().unwrap_or(Path::new(""));

    let (models, materials) = tobj::load_obj_buf(&mut source.as_bytes(), &LOAD_OPTIONS, |p| {
        tobj::load_mtl(base_dir.join(p))
    })
    .map_err(|e| MeshError::parse(path, e.to_string()))?;

    let corner_count = models.iter().map(|m| m.mesh.indices.len()).sum();
    let attributes = corner_attributes(path, &source, &models, corner_count);

    let mut indexer = VertexIndexer::with_capacity(corner_count);
    let mut has_normals = false;
    let mut has_tex_coords = false;

    let mut remaining = attributes.as_slice();
    for model in models.iter() {
        let (model_attributes, rest) = remaining.split_at(model.mesh.indices.len());
        remaining = rest;

        let (normals, tex_coords) = add_model(path, model, model_attributes, &mut indexer)?;
        has_normals |= normals;
        has_tex_coords |= tex_coords;
    }

    let material = match materials {
        Ok(materials) => materials
            .first()
            .map(|m| Material::from_obj(m, base_dir))
            .unwrap_or_default(),
        Err(e) => {
            warn!(
                "Unable to load material library for {}: {e}",
                path.display()
            );
            Material::default()
        }
    };

    let (vertices, indices) = indexer.finish();
    let mut mesh = Mesh {
        vertices,
        indices,
        has_normals,
        has_tex_coords,
        material,
    };

    if !mesh.has_normals {
        debug!("Computing normals for {}", path.display());
        mesh.compute_normals();
    }

    if standardize {
        mesh.standardize();
    }

    info!(
        "Loaded model {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Load a Wavefront OBJ file and its diffuse texture, if the material has one.
pub fn load_obj_with_texture<L: TextureLoader>(
    path: impl AsRef<Path>,
    standardize: bool,
    texture_loader: &L,
) -> Result<(Mesh, Option<L::Texture>)> {
    let mesh = load_obj(path, standardize)?;

    let texture = mesh
        .material
        .diffuse_texture
        .as_deref()
        .map(|texture_path| texture_loader.load_texture(texture_path))
        .transpose()?;

    Ok((mesh, texture))
}

/// Optional attributes named by one face corner, e.g. `3//1` has a normal and no texture
/// coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CornerAttributes {
    normal: bool,
    tex_coord: bool,
}

impl CornerAttributes {
    fn parse(corner: &str) -> Self {
        let mut parts = corner.split('/').skip(1);
        let tex_coord = parts.next().is_some_and(|p| !p.is_empty());
        let normal = parts.next().is_some_and(|p| !p.is_empty());
        Self { normal, tex_coord }
    }
}

/// Attribute presence of every triangulated face corner, in file order.
///
/// tobj hands out a normal and texture coordinate index for every corner, repeating an earlier
/// index where the face record has none, so presence has to come from the `f` records.
fn scan_corner_attributes(source: &str) -> Vec<CornerAttributes> {
    let source = source.replace("\\\r\n", " ").replace("\\\n", " ");
    let mut corners = Vec::new();

    for line in source.lines() {
        let line = line.split('#').next().unwrap_or_default();
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("f") {
            continue;
        }

        // Fan triangulation, the same as tobj's.
        let face: Vec<_> = tokens.map(CornerAttributes::parse).collect();
        for i in 1..face.len().saturating_sub(1) {
            corners.extend([face[0], face[i], face[i + 1]]);
        }
    }

    corners
}

/// Returns one entry per corner of `models`. Falls back to the parser's index arrays if the face
/// records disagree with the parsed corner count.
fn corner_attributes(
    path: &Path,
    source: &str,
    models: &[tobj::Model],
    corner_count: usize,
) -> Vec<CornerAttributes> {
    let attributes = scan_corner_attributes(source);
    if attributes.len() == corner_count {
        return attributes;
    }

    warn!(
        "{}: face records give {} corners but {corner_count} were parsed, \
         using parser attribute indices",
        path.display(),
        attributes.len()
    );
    models
        .iter()
        .flat_map(|model| {
            let mesh = &model.mesh;
            let present = CornerAttributes {
                normal: !mesh.normal_indices.is_empty(),
                tex_coord: !mesh.texcoord_indices.is_empty(),
            };
            iter::repeat_n(present, mesh.indices.len())
        })
        .collect()
}

/// Adds every face corner of `model` to the indexer. Returns whether any corner supplied a normal
/// and whether any supplied a texture coordinate.
fn add_model(
    path: &Path,
    model: &tobj::Model,
    attributes: &[CornerAttributes],
    indexer: &mut VertexIndexer,
) -> Result<(bool, bool)> {
    let mesh = &model.mesh;
    let mut has_normals = false;
    let mut has_tex_coords = false;

    for ((corner, &position_index), present) in mesh.indices.iter().enumerate().zip(attributes) {
        let position = read_vec3(&mesh.positions, position_index)
            .ok_or_else(|| out_of_bounds(path, "position", corner))?;

        let normal = if present.normal {
            has_normals = true;
            mesh.normal_indices
                .get(corner)
                .and_then(|&i| read_vec3(&mesh.normals, i))
                .ok_or_else(|| out_of_bounds(path, "normal", corner))?
        } else {
            Vec3::ZERO
        };

        let tex_coord = if present.tex_coord {
            has_tex_coords = true;
            mesh.texcoord_indices
                .get(corner)
                .and_then(|&i| read_vec2(&mesh.texcoords, i))
                .ok_or_else(|| out_of_bounds(path, "texture coordinate", corner))?
        } else {
            Vec2::ZERO
        };

        indexer.insert(Vertex::new(position, normal, tex_coord))?;
    }

    debug!(
        "Model '{}': {} corners, normals: {has_normals}, texture coordinates: {has_tex_coords}",
        model.name,
        mesh.indices.len()
    );

    Ok((has_normals, has_tex_coords))
}

fn read_vec3(pool: &[f32], index: u32) -> Option<Vec3> {
    let start = 3 * index as usize;
    pool.get(start..start + 3).map(Vec3::from_slice)
}

fn read_vec2(pool: &[f32], index: u32) -> Option<Vec2> {
    let start = 2 * index as usize;
    pool.get(start..start + 2).map(Vec2::from_slice)
}

fn out_of_bounds(path: &Path, attribute: &str, corner: usize) -> MeshError {
    MeshError::parse(path, format!("{attribute} index of corner {corner} out of bounds"))
}
