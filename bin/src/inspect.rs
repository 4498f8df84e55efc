use anyhow::{Context, Result};
use log::info;
use mesh::{ImageTextureLoader, Mesh, load_obj, load_obj_with_texture};
use scene_file::SceneFile;

/// Loads one model and prints a detailed report.
pub fn inspect_model(path: &str, standardize: bool, num_triangles: Option<u32>) -> Result<()> {
    let (mesh, texture) = load_obj_with_texture(path, standardize, &ImageTextureLoader)?;
    mesh.validate()
        .with_context(|| format!("Model '{path}' failed validation"))?;

    println!("Model:          {path}");
    println!("Vertices:       {}", mesh.vertex_count());
    println!("Indices:        {}", mesh.index_count());
    println!("Triangles:      {}", mesh.triangle_count());
    println!("Normals:        {}", mesh.has_normals);
    println!("Tex coords:     {}", mesh.has_tex_coords);

    if let Some((min, max)) = mesh.bounding_box() {
        println!("Bounds:         {min} .. {max}");
    }

    let material = &mesh.material;
    println!("Ambient:        {}", material.ambient);
    println!("Diffuse:        {}", material.diffuse);
    println!("Specular:       {}", material.specular);
    println!("Shininess:      {}", material.shininess);

    match (&material.diffuse_texture, texture) {
        (Some(texture_path), Some(texture)) => println!(
            "Texture:        {} ({} x {})",
            texture_path.display(),
            texture.width,
            texture.height
        ),
        _ => println!("Texture:        none"),
    }

    println!("Draw indices:   {}", mesh.draw_index_count(num_triangles)?);

    Ok(())
}

/// Loads every model of a scene file and prints one line per model.
pub fn inspect_scene(path: &str) -> Result<()> {
    let scene_file = SceneFile::load_json(path)?;
    let models = scene_file.get_models();
    info!("Scene '{path}' has {} models", models.len());

    println!(
        "{: <16} {: >10} {: >10} {: >10}  {: <8} {: <8}",
        "Name", "Vertices", "Triangles", "Draw", "Normals", "UV"
    );

    for model in models {
        let mesh = load_obj(&model.path, model.standardize)
            .with_context(|| format!("Unable to load model '{}' ({})", model.name, model.path))?;
        println!("{}", summary_line(&model.name, &mesh, model.num_triangles)?);
    }

    Ok(())
}

fn summary_line(name: &str, mesh: &Mesh, num_triangles: Option<u32>) -> Result<String> {
    Ok(format!(
        "{: <16} {: >10} {: >10} {: >10}  {: <8} {: <8}",
        name,
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.draw_index_count(num_triangles)? / 3,
        mesh.has_normals,
        mesh.has_tex_coords
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_counts_drawn_triangles() {
        let mesh = Mesh {
            vertices: vec![Default::default(); 3],
            indices: vec![0, 1, 2, 2, 1, 0],
            has_normals: true,
            ..Default::default()
        };

        let line = summary_line("rock", &mesh, Some(1)).unwrap();
        let columns: Vec<_> = line.split_whitespace().collect();
        assert_eq!(columns, vec!["rock", "3", "2", "1", "true", "false"]);
    }
}
