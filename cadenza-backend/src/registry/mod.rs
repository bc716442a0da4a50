mod memory;

pub use memory::Memory;

use crate::{Error, song};

/// Song metadata store.
pub trait Trait: Send + Sync {
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<song::Song>, Error>> + Send;
    fn find_by_id(
        &self,
        id: song::Id,
    ) -> impl Future<Output = Result<Option<song::Song>, Error>> + Send;
    fn insert(&self, song: song::Song) -> impl Future<Output = Result<(), Error>> + Send;
    fn update(
        &self,
        id: song::Id,
        update: song::Update,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}
