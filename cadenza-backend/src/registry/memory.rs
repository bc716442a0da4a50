use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{Error, error, song};

#[derive(Debug, Default)]
pub struct Memory {
    songs: RwLock<HashMap<song::Id, song::Song>>,
}

impl super::Trait for Memory {
    async fn find_by_name(&self, name: &str) -> Result<Option<song::Song>, Error> {
        Ok(self.songs.read().await.values().find(|song| song.name == name).cloned())
    }

    async fn find_by_id(&self, id: song::Id) -> Result<Option<song::Song>, Error> {
        Ok(self.songs.read().await.get(&id).cloned())
    }

    async fn insert(&self, song: song::Song) -> Result<(), Error> {
        self.songs.write().await.insert(song.id, song);
        Ok(())
    }

    async fn update(&self, id: song::Id, update: song::Update) -> Result<(), Error> {
        self.songs
            .write()
            .await
            .get_mut(&id)
            .ok_or_else(|| error::Kind::SongNotFound(id.into()))?
            .apply(update);
        Ok(())
    }
}
