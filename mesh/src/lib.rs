mod dedup;
mod error;
mod gpu;
mod material;
mod mesh;
mod normals;
mod obj_loader;
mod texture;
mod vertex;

pub use dedup::*;
pub use error::MeshError;
pub use gpu::*;
pub use material::*;
pub use mesh::*;
pub use normals::*;
pub use obj_loader::*;
pub use texture::*;
pub use vertex::*;
