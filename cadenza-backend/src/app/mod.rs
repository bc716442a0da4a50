use typed_path::Utf8PlatformPathBuf;

use crate::capability::Capabilities;
use crate::config::Config;
use crate::{Error, artifact, cache, error, registry, song};

/// Everything a request needs, built once at start-up and shared by reference.
#[derive(Debug)]
pub struct App<R> {
    pub config: Config,
    pub registry: R,
    pub capabilities: Capabilities,
    pub cache: cache::Decode,
    pub locks: artifact::Locks,
}

impl<R: registry::Trait> App<R> {
    pub fn new(config: Config, registry: R, capabilities: Capabilities) -> Self {
        std::fs::create_dir_all(&config.storage.root).expect("Could not create storage root");
        tracing::info!(root = %config.storage.root, "storage");
        let cache = cache::Decode::new(&config.cache);
        Self { config, registry, capabilities, cache, locks: artifact::Locks::default() }
    }

    pub fn with_process(config: Config, registry: R) -> Self {
        let capabilities = Capabilities::process(&config.capability.process);
        Self::new(config, registry, capabilities)
    }

    pub fn song_dir(&self, song: song::Id) -> Utf8PlatformPathBuf {
        artifact::Path::dir(&self.config.storage.root, song)
    }

    pub fn derived(&self, path: artifact::Path) -> artifact::Derived {
        artifact::Derived::new(path, &self.config.storage)
    }

    pub async fn song(&self, id: song::Id) -> Result<song::Song, Error> {
        self.registry
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::Kind::SongNotFound(id.into()).into())
    }
}
