mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::inspect::{inspect_model, inspect_scene};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a single Wavefront OBJ model and print its details.
    Model {
        /// Path to the OBJ file.
        path: String,

        /// Recentre and rescale the model.
        #[arg(short, long)]
        standardize: bool,

        /// Number of triangles to draw. Draws all when omitted.
        #[arg(short, long)]
        num_triangles: Option<u32>,
    },

    /// Load every model listed in a scene file.
    Scene {
        /// Path
        #[arg(short, long, default_value = "assets/asteroids.json")]
        path: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Model {
            path,
            standardize,
            num_triangles,
        } => inspect_model(path, *standardize, *num_triangles),
        Commands::Scene { path } => inspect_scene(path),
    }
}
