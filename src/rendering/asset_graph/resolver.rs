use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::{debug, trace, warn};
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::error::AssetError;
use crate::rendering::asset_graph::asset_key::AssetKey;

/// The shared outcome of loading one key. Failures are cached just like successes.
pub type Loaded<T> = Result<Arc<T>, Arc<AssetError>>;

/// `None` while the generator is still running.
type Slot<T> = watch::Receiver<Option<Loaded<T>>>;

pub trait GraphNodeGenerator<T>: Send + Sync + 'static {
    /// Runs on the blocking pool, so it's fine to do file I/O and heavy decoding in here.
    fn generate(&self, key: &AssetKey) -> Result<T, AssetError>;
}

pub enum LoadStatus<T> {
    NotRequested,
    Loading,
    Ready(Arc<T>),
    Failed(Arc<AssetError>),
}

impl<T> LoadStatus<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadStatus::Ready(_))
    }
}

impl<T> std::fmt::Debug for LoadStatus<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::NotRequested => write!(f, "NotRequested"),
            LoadStatus::Loading => write!(f, "Loading"),
            LoadStatus::Ready(_) => write!(f, "Ready"),
            LoadStatus::Failed(err) => write!(f, "Failed({err})"),
        }
    }
}

/// Deduplicates loading: the first caller of a key inserts a watch channel and spawns the generator, everyone
/// else (including later callers) subscribes to that same channel. The generator thus runs at most once per key.
pub struct Resolver<G: GraphNodeGenerator<T>, T> {
    ref_cache: DashMap<AssetKey, Slot<T>>,
    generator: Arc<G>,
    kind: &'static str,
}

impl<G: GraphNodeGenerator<T>, T: Send + Sync + 'static> Resolver<G, T> {
    pub fn new(kind: &'static str, generator: G) -> Self {
        Self {
            ref_cache: DashMap::with_capacity(100),
            generator: Arc::new(generator),
            kind,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn resolve(&self, path: &str) -> Loaded<T> {
        self.resolve_key(AssetKey::new(path)).await
    }

    pub async fn resolve_key(&self, key: AssetKey) -> Loaded<T> {
        let mut slot = self.subscribe(&key);

        let loaded = match slot.wait_for(Option::is_some).await {
            Ok(value) => (*value).clone(),
            // The sender is gone without ever sending, i.e. the task has been dropped by a shutting down runtime.
            Err(_) => None,
        };

        loaded.unwrap_or_else(|| {
            Err(Arc::new(AssetError::Abandoned {
                path: key.requested().to_string(),
            }))
        })
    }

    /// Starts loading `path` without waiting for it. Does nothing outside of a tokio runtime.
    pub fn prefetch(&self, path: &str) {
        if Handle::try_current().is_err() {
            debug!("No runtime to prefetch {} {path} on", self.kind);
            return;
        }
        self.subscribe(&AssetKey::new(path));
    }

    fn subscribe(&self, key: &AssetKey) -> Slot<T> {
        // Only the shard lock is held while inserting, the entry guard is gone before the generator is spawned.
        let (slot, sender) = match self.ref_cache.entry(key.clone()) {
            Entry::Occupied(entry) => (entry.get().clone(), None),
            Entry::Vacant(entry) => {
                let (sender, receiver) = watch::channel(None);
                entry.insert(receiver.clone());
                (receiver, Some(sender))
            }
        };

        if let Some(sender) = sender {
            self.spawn_generator(key.clone(), sender);
        }
        slot
    }

    fn spawn_generator(&self, key: AssetKey, sender: watch::Sender<Option<Loaded<T>>>) {
        let generator = self.generator.clone();
        let kind = self.kind;

        tokio::spawn(async move {
            let task_key = key.clone();
            let result = tokio::task::spawn_blocking(move || {
                profiling::scope!("Resolver::generate");
                generator.generate(&task_key)
            })
            .await;

            let loaded = match result {
                Ok(Ok(asset)) => {
                    trace!("Loaded {kind} {key}");
                    Ok(Arc::new(asset))
                }
                Ok(Err(err)) => {
                    warn!("Failed to load {kind} {key}: {err}");
                    Err(Arc::new(err))
                }
                Err(join_error) => {
                    warn!("Loading {kind} {key} panicked: {join_error}");
                    Err(Arc::new(AssetError::DecodePanicked {
                        path: key.requested().to_string(),
                    }))
                }
            };

            sender.send_replace(Some(loaded));
        });
    }

    pub fn status(&self, path: &str) -> LoadStatus<T> {
        self.status_key(&AssetKey::new(path))
    }

    pub fn status_key(&self, key: &AssetKey) -> LoadStatus<T> {
        let Some(slot) = self.ref_cache.get(key) else {
            return LoadStatus::NotRequested;
        };

        match &*slot.value().borrow() {
            None => LoadStatus::Loading,
            Some(Ok(asset)) => LoadStatus::Ready(asset.clone()),
            Some(Err(err)) => LoadStatus::Failed(err.clone()),
        }
    }

    /// Number of keys that have ever been requested, loaded or not.
    pub fn len(&self) -> usize {
        self.ref_cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ref_cache.is_empty()
    }
}
