use std::path::Path;

use serde::{Deserialize, Serialize};

/// A model the scene loads.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Model {
    pub name: String,

    /// Path to the Wavefront OBJ file. Relative paths are resolved against the scene file.
    pub path: String,

    /// Recentre and rescale the model to a canonical size on load.
    #[serde(default)]
    pub standardize: bool,

    /// Only draw this many triangles. Draws the whole model when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_triangles: Option<u32>,
}

impl Model {
    pub fn adjust_relative_path(&mut self, relative_to: &Path) {
        let path = Path::new(&self.path);
        if path.is_relative() {
            self.path = relative_to.join(path).to_string_lossy().into_owned();
        }
    }
}
