use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::time::Instant;
use tracing::instrument;
use typed_path::Utf8PlatformPathBuf;

use crate::audio::Audio;
use crate::{Error, artifact, config, error, song};

type Key = (song::Id, String);

#[derive(Debug)]
struct Entry {
    audio: Arc<Audio>,
    expires: Instant,
}

/// Decoded buffers of recently used artifacts, kept for a fixed time after insertion.
///
/// Concurrent misses for the same artifact share a single load. A failed load leaves the slot
/// empty so the next caller tries again.
#[derive(Debug)]
pub struct Decode {
    ttl: Duration,
    slots: Mutex<HashMap<Key, Arc<OnceCell<Entry>>>>,
}

impl Decode {
    pub fn new(config: &config::Cache) -> Self {
        Self { ttl: config.decode_ttl(), slots: Mutex::default() }
    }

    fn slot(&self, key: Key) -> Arc<OnceCell<Entry>> {
        let now = Instant::now();
        let live = |slot: &Arc<OnceCell<Entry>>| slot.get().is_none_or(|entry| entry.expires > now);

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get(&key).filter(|slot| live(*slot)) {
            return slot.clone();
        }
        slots.retain(|_, slot| live(slot));
        let slot = Arc::new(OnceCell::new());
        slots.insert(key, slot.clone());
        slot
    }

    async fn get_or_try_load<F>(&self, key: Key, load: F) -> Result<Arc<Audio>, Error>
    where
        F: FnOnce() -> Result<Audio, Error> + Send + 'static,
    {
        let slot = self.slot(key);
        let entry = slot
            .get_or_try_init(|| async {
                let span = tracing::Span::current();
                let audio = tokio::task::spawn_blocking(move || {
                    let _entered = span.enter();
                    load()
                })
                .await??;
                Ok::<_, Error>(Entry { audio: Arc::new(audio), expires: Instant::now() + self.ttl })
            })
            .await?;
        Ok(entry.audio.clone())
    }

    #[instrument(skip_all, fields(song = %path.song, name = %path.name), err(Debug))]
    pub async fn get_or_load(
        &self,
        path: &artifact::Path,
        disk: Utf8PlatformPathBuf,
    ) -> Result<Arc<Audio>, Error> {
        self.get_or_try_load((path.song, path.name.clone()), move || {
            if !std::fs::exists(&disk)? {
                return error::Kind::ArtifactNotFound(disk).into();
            }
            tracing::debug!(%disk, "decode");
            Audio::open(&disk)
        })
        .await
    }

    pub fn invalidate(&self, song: song::Id) {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).retain(|key, _| key.0 != song);
    }
}
