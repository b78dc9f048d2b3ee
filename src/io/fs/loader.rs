use std::fs;
use std::path::{Path, PathBuf};

use log::trace;

use crate::error::AssetError;
use crate::io::common::loader::RawAssetLoader;
use crate::settings::AssetConfig;

/// Resolves logical asset paths against a data directory on disk. The content has been authored for
/// case-insensitive file systems, so every path component falls back to a case-insensitive directory scan.
pub struct FsLoader {
    root: PathBuf,
    fallback_dir: String,
}

impl FsLoader {
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            root: config.root.clone(),
            fallback_dir: config.fallback_dir.clone(),
        }
    }

    /// Candidate paths relative to the root, in lookup order: per extension, next to the asset first, then inside
    /// the fallback directory.
    fn candidates(&self, logical_path: &str, extensions: &[&str]) -> Vec<String> {
        let normalized = logical_path.replace('\\', "/");
        let (dir, file) = normalized.rsplit_once('/').unwrap_or(("", normalized.as_str()));
        // an authored extension is replaced, the container is decided by the candidate extension
        let stem = match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file,
        };

        let fallback = match dir {
            "" => self.fallback_dir.clone(),
            dir => format!("{dir}/{}", self.fallback_dir),
        };

        let mut candidates = Vec::with_capacity(extensions.len() * 2);
        for ext in extensions {
            for directory in [dir, fallback.as_str()] {
                candidates.push(match directory {
                    "" => format!("{stem}.{ext}"),
                    directory => format!("{directory}/{stem}.{ext}"),
                });
            }
        }
        candidates
    }

    fn find_case_insensitive(&self, relative: &str) -> Option<PathBuf> {
        let mut current = self.root.clone();
        for component in relative.split('/').filter(|c| !c.is_empty() && *c != ".") {
            // lookups never leave the data directory
            if component == ".." {
                return None;
            }
            let exact = current.join(component);
            if exact.exists() {
                current = exact;
                continue;
            }

            current = fs::read_dir(&current)
                .ok()?
                .filter_map(Result::ok)
                .find(|entry| {
                    entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| name.eq_ignore_ascii_case(component))
                })?
                .path();
        }

        current.is_file().then_some(current)
    }
}

impl RawAssetLoader for FsLoader {
    fn locate(&self, logical_path: &str, extensions: &[&str]) -> Result<PathBuf, AssetError> {
        for candidate in self.candidates(logical_path, extensions) {
            if let Some(path) = self.find_case_insensitive(&candidate) {
                trace!("Resolved {logical_path} to {}", path.display());
                return Ok(path);
            }
        }

        Err(AssetError::NotFound {
            path: logical_path.to_string(),
        })
    }

    fn load_raw_owned(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        fs::read(path).map_err(|err| AssetError::from_io(&path.to_string_lossy(), err))
    }
}
