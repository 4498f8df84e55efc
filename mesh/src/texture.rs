use std::{fmt, path::Path};

use image::ImageReader;
use log::info;

use crate::{MeshError, error::Result};

/// Loads the diffuse texture referenced by a mesh material. The loader pipeline only calls this
/// for paths that exist.
pub trait TextureLoader {
    type Texture;

    fn load_texture(&self, path: &Path) -> Result<Self::Texture>;
}

/// Decoded RGBA8 image, ready to be copied into a GPU texture.
pub struct ImageTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl fmt::Debug for ImageTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageTexture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

/// Decodes textures with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageTextureLoader;

impl TextureLoader for ImageTextureLoader {
    type Texture = ImageTexture;

    fn load_texture(&self, path: &Path) -> Result<ImageTexture> {
        info!("Loading texture {}...", path.display());

        let img = ImageReader::open(path)
            .map_err(|e| MeshError::texture(path, e.to_string()))?
            .with_guessed_format()
            .map_err(|e| MeshError::texture(path, e.to_string()))?
            .decode()
            .map_err(|e| MeshError::texture(path, e.to_string()))?
            .to_rgba8();
        let (width, height) = img.dimensions();

        info!("Loaded texture {}: {width} x {height}", path.display());

        Ok(ImageTexture {
            width,
            height,
            pixels: img.into_raw(),
        })
    }
}
