use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of an asset inside the resolvers. Legacy content references the same file with arbitrary casing and
/// either separator, so equality and hashing only look at the normalized form (lowercase, `/` separated, without
/// empty or `.` components, `..` collapsed). A `..` never climbs above the asset root. The spelling of the first
/// request is kept for logging and for deriving sibling paths, as the data directory may live on a case-sensitive
/// file system.
#[derive(Clone)]
pub struct AssetKey {
    normalized: Arc<str>,
    requested: Arc<str>,
}

impl AssetKey {
    pub fn new(path: &str) -> Self {
        let mut components = Vec::new();
        for component in path.split(['/', '\\']) {
            match component {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                component => components.push(component),
            }
        }
        let requested = components.join("/");

        Self {
            normalized: requested.to_ascii_lowercase().into(),
            requested: requested.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// The directory part of the requested path, empty for files in the asset root.
    pub fn directory(&self) -> &str {
        self.requested.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    pub fn file_name(&self) -> &str {
        self.requested.rsplit_once('/').map_or(&self.requested, |(_, file)| file)
    }

    /// Resolves a name that has been authored relative to this asset, e.g. the texture reference of a model.
    /// `Object1/Tree01` and `Leaf01` become `Object1/Leaf01`.
    pub fn sibling(&self, name: &str) -> AssetKey {
        match self.directory() {
            "" => AssetKey::new(name),
            dir => AssetKey::new(&format!("{dir}/{name}")),
        }
    }
}

impl PartialEq for AssetKey {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for AssetKey {}

impl Hash for AssetKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.requested)
    }
}

impl Debug for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AssetKey({:?})", &*self.normalized)
    }
}
