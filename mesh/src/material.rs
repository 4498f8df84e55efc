use std::path::{Path, PathBuf};

use glam::{Vec3, Vec4};
use log::debug;

pub const DEFAULT_AMBIENT: Vec4 = Vec4::new(0.1, 0.1, 0.1, 1.0);
pub const DEFAULT_DIFFUSE: Vec4 = Vec4::new(0.7, 0.7, 0.7, 1.0);
pub const DEFAULT_SPECULAR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
pub const DEFAULT_SHININESS: f32 = 100.0;

/// Surface material of a mesh. Colours are RGBA with alpha fixed at 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,

    /// Resolved path of the diffuse texture. Only set when the file exists.
    pub diffuse_texture: Option<PathBuf>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: DEFAULT_AMBIENT,
            diffuse: DEFAULT_DIFFUSE,
            specular: DEFAULT_SPECULAR,
            shininess: DEFAULT_SHININESS,
            diffuse_texture: None,
        }
    }
}

impl Material {
    /// Converts a material library entry. Values the library leaves out keep their defaults and
    /// the diffuse texture is resolved relative to `base_dir`.
    pub fn from_obj(material: &tobj::Material, base_dir: &Path) -> Self {
        let defaults = Self::default();

        let diffuse_texture = material
            .diffuse_texture
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| base_dir.join(name))
            .filter(|path| {
                let exists = path.exists();
                if !exists {
                    debug!("Skipping missing diffuse texture {}", path.display());
                }
                exists
            });

        Self {
            ambient: rgb_or(material.ambient, defaults.ambient),
            diffuse: rgb_or(material.diffuse, defaults.diffuse),
            specular: rgb_or(material.specular, defaults.specular),
            shininess: material.shininess.unwrap_or(defaults.shininess),
            diffuse_texture,
        }
    }
}

fn rgb_or(rgb: Option<[f32; 3]>, default: Vec4) -> Vec4 {
    rgb.map_or(default, |c| Vec3::from_array(c).extend(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let m = Material::default();
        assert_eq!(m.ambient, Vec4::new(0.1, 0.1, 0.1, 1.0));
        assert_eq!(m.diffuse, Vec4::new(0.7, 0.7, 0.7, 1.0));
        assert_eq!(m.specular, Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(m.shininess, 100.0);
        assert!(m.diffuse_texture.is_none());
    }

    #[test]
    fn from_obj_fixes_alpha_and_fills_gaps() {
        let obj = tobj::Material {
            ambient: Some([0.2, 0.3, 0.4]),
            diffuse: Some([0.5, 0.6, 0.7]),
            shininess: Some(32.0),
            ..Default::default()
        };
        let m = Material::from_obj(&obj, Path::new("."));
        assert_eq!(m.ambient, Vec4::new(0.2, 0.3, 0.4, 1.0));
        assert_eq!(m.diffuse, Vec4::new(0.5, 0.6, 0.7, 1.0));
        assert_eq!(m.specular, DEFAULT_SPECULAR);
        assert_eq!(m.shininess, 32.0);
    }

    #[test]
    fn missing_texture_is_skipped() {
        let obj = tobj::Material {
            diffuse_texture: Some("does_not_exist.png".to_string()),
            ..Default::default()
        };
        let m = Material::from_obj(&obj, Path::new("/nonexistent-dir"));
        assert!(m.diffuse_texture.is_none());
    }
}
