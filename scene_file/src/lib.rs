mod model;

pub use model::*;

use std::{
    collections::HashSet,
    path::Path,
};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SceneFile {
    pub models: Vec<Model>,
}

impl SceneFile {
    pub fn load_json(path: &str) -> Result<Self> {
        let serialized = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read scene file '{path}'"))?;
        let mut deserialized: Self = serde_json::from_str(&serialized)
            .with_context(|| format!("Unable to parse scene file '{path}'"))?;

        if let Some(relative_to) = Path::new(path).parent() {
            deserialized.adjust_relative_paths(relative_to);
        }

        Ok(deserialized)
    }

    pub fn save_json(&self, path: &str) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn adjust_relative_paths(&mut self, relative_to: &Path) {
        for model in self.models.iter_mut() {
            model.adjust_relative_path(relative_to);
        }
    }

    /// Returns the models in file order. When a name is used more than once the first
    /// definition wins.
    pub fn get_models(&self) -> Vec<&Model> {
        let mut seen = HashSet::new();
        let mut models = vec![];

        for model in self.models.iter() {
            if seen.insert(model.name.as_str()) {
                models.push(model);
            } else {
                warn!("Model name '{}' is used multiple times", model.name);
            }
        }

        models
    }
}
