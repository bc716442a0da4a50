use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::{OwnedMutexGuard, OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

use crate::song;

type Table<K, T> = Mutex<HashMap<K, Weak<T>>>;

/// Per-song directory locks plus per-artifact locks.
///
/// Transforms hold the directory lock shared and the artifact lock exclusively around the
/// "exists, else compute and write" sequence. Ingest and reset hold the directory lock
/// exclusively. Entries are dropped once no guard refers to them.
#[derive(Debug, Default)]
pub struct Locks {
    dirs: Table<song::Id, RwLock<()>>,
    artifacts: Table<(song::Id, String), tokio::sync::Mutex<()>>,
    lyrics: Table<song::Id, tokio::sync::Mutex<()>>,
}

fn entry<K: Eq + Hash, T: Default>(table: &Table<K, T>, key: K) -> Arc<T> {
    let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(value) = table.get(&key).and_then(Weak::upgrade) {
        return value;
    }
    table.retain(|_, value| value.strong_count() > 0);
    let value = Arc::new(T::default());
    table.insert(key, Arc::downgrade(&value));
    value
}

impl Locks {
    pub async fn read_dir(&self, song: song::Id) -> OwnedRwLockReadGuard<()> {
        entry(&self.dirs, song).read_owned().await
    }

    pub async fn write_dir(&self, song: song::Id) -> OwnedRwLockWriteGuard<()> {
        entry(&self.dirs, song).write_owned().await
    }

    pub async fn artifact(&self, song: song::Id, name: &str) -> OwnedMutexGuard<()> {
        entry(&self.artifacts, (song, name.to_owned())).lock_owned().await
    }

    pub async fn lyrics(&self, song: song::Id) -> OwnedMutexGuard<()> {
        entry(&self.lyrics, song).lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use fake::{Fake, Faker};

    use super::*;

    #[tokio::test]
    async fn test_artifact_exclusive() {
        let locks = Locks::default();
        let song: song::Id = Faker.fake();

        let guard = locks.artifact(song, "a.wav").await;
        assert!(
            tokio::time::timeout(Duration::from_millis(10), locks.artifact(song, "a.wav"))
                .await
                .is_err()
        );
        let _other = locks.artifact(song, "b.wav").await;
        drop(guard);
        let _guard = locks.artifact(song, "a.wav").await;
    }

    #[tokio::test]
    async fn test_write_excludes_read() {
        let locks = Locks::default();
        let song: song::Id = Faker.fake();

        let read = locks.read_dir(song).await;
        let shared = locks.read_dir(song).await;
        assert!(
            tokio::time::timeout(Duration::from_millis(10), locks.write_dir(song)).await.is_err()
        );
        let _other = locks.write_dir(Faker.fake()).await;
        drop(read);
        drop(shared);
        let _write = locks.write_dir(song).await;
    }

    #[tokio::test]
    async fn test_release_entries() {
        let locks = Locks::default();
        for _ in 0..8 {
            let _guard = locks.artifact(Faker.fake(), "a.wav").await;
        }
        let _guard = locks.artifact(Faker.fake(), "a.wav").await;
        assert_eq!(locks.artifacts.lock().unwrap().len(), 1);
    }
}
