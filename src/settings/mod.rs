use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "emberfall")]
#[command(version)]
#[command(about = "Decodes, caches and uploads Emberfall client assets")]
pub struct CliArgs {
    #[arg(long, env = "EMBERFALL_DATA_DIR", default_value_t = default_data_dir())]
    pub data_dir: String,

    #[arg(
        long,
        env = "EMBERFALL_FALLBACK_DIR",
        default_value = "texture",
        help = "Sub directory next to a model that is searched when a texture isn't found beside it"
    )]
    pub fallback_dir: String,

    #[arg(long, env = "EMBERFALL_EXPANSION_THREADS")]
    pub expansion_threads: Option<usize>,

    #[arg(long, help = "Upload through a wgpu device instead of the in-memory headless one")]
    pub gpu: bool,

    #[command(subcommand)]
    pub command: Command,
}

pub fn default_data_dir() -> String {
    std::env::current_dir()
        .map(|cwd| cwd.join("_data"))
        .unwrap_or_else(|_| PathBuf::from("_data"))
        .to_string_lossy()
        .to_string()
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decodes a model, prints its sub-meshes and waits for the textures it references.
    Model {
        path: String,
        #[arg(long, help = "Additionally dump the decoded mesh as wavefront obj")]
        obj: Option<PathBuf>,
    },
    /// Decodes a texture and materializes it on the device.
    Texture { path: String },
    /// Loads several models concurrently and uploads all of their buffers.
    Prewarm {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

impl CliArgs {
    pub fn asset_config(&self) -> AssetConfig {
        AssetConfig {
            root: PathBuf::from(&self.data_dir),
            fallback_dir: self.fallback_dir.clone(),
            expansion_threads: self.expansion_threads,
        }
    }
}

/// Where and how assets are looked up. Several configurations (and thus asset managers) may coexist.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub root: PathBuf,
    /// Sibling sub directory (of the requesting asset's directory) that is searched second.
    pub fallback_dir: String,
    /// Worker threads for the RGBA expansion of large textures, `None` for the available parallelism.
    pub expansion_threads: Option<usize>,
}

impl AssetConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(default_data_dir()),
            fallback_dir: "texture".to_string(),
            expansion_threads: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_builds_the_asset_config() -> Result<(), anyhow::Error> {
        let args = CliArgs::try_parse_from([
            "emberfall",
            "--data-dir",
            "/srv/data",
            "--expansion-threads",
            "2",
            "prewarm",
            "Object1/Tree01",
            "Object1/Rock01",
        ])?;

        let config = args.asset_config();
        assert_eq!(config.root, PathBuf::from("/srv/data"));
        assert_eq!(config.fallback_dir, "texture");
        assert_eq!(config.expansion_threads, Some(2));
        assert!(matches!(args.command, Command::Prewarm { ref paths } if paths.len() == 2));
        Ok(())
    }

    #[test]
    fn prewarm_needs_paths() {
        assert!(CliArgs::try_parse_from(["emberfall", "prewarm"]).is_err());
    }
}
