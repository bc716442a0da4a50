use std::sync::Arc;

use concat_string::concat_string;
use fake::{Fake as _, Faker};
use rstest::fixture;
use tempfile::TempDir;
use typed_path::Utf8PlatformPathBuf;

use super::{Calls, Fake};
use crate::audio::Audio;
use crate::config::{self, Config};
use crate::{App, artifact, registry, song};

pub fn audio() -> Audio {
    let samples = (0..800).map(|i| ((i as f32) * 0.05).sin() * 0.5).collect();
    Audio { samples, channels: 1, sample_rate: 8000 }
}

pub struct Mock {
    pub app: App<registry::Memory>,
    pub calls: Arc<Calls>,
    root: TempDir,
    incoming: TempDir,
}

fn utf8(dir: &TempDir) -> Utf8PlatformPathBuf {
    Utf8PlatformPathBuf::from(dir.path().to_str().unwrap())
}

impl Mock {
    pub fn new(fake: Fake) -> Self {
        let root = tempfile::Builder::new().prefix("cadenza.").tempdir().unwrap();
        let incoming = tempfile::Builder::new().prefix("cadenza.incoming.").tempdir().unwrap();

        let config = Config {
            storage: config::Storage::with_root(utf8(&root)),
            capability: config::Capability::test(),
            ..Config::default()
        };
        let calls = fake.calls.clone();
        let app = App::new(config, registry::Memory::default(), fake.into_capabilities());
        Self { app, calls, root, incoming }
    }

    pub fn disk(&self, path: &artifact::Path) -> Utf8PlatformPathBuf {
        path.disk(utf8(&self.root))
    }

    pub fn transport(&self, path: &artifact::Path) -> String {
        path.transport(&self.app.config.storage.transport_prefix)
    }

    pub fn exists(&self, path: &artifact::Path) -> bool {
        std::fs::exists(self.disk(path)).unwrap()
    }

    /// File names inside the song directory, sorted.
    pub fn files(&self, song: song::Id) -> Vec<String> {
        let mut files: Vec<_> = std::fs::read_dir(self.app.song_dir(song))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        files.sort();
        files
    }

    pub fn write(&self, path: &artifact::Path) {
        let disk = self.disk(path);
        std::fs::create_dir_all(disk.parent().unwrap()).unwrap();
        artifact::stage::write_wav(disk, &audio()).unwrap();
    }

    pub async fn add_stem(&self, name: &str) -> artifact::Path {
        self.add_stem_to(Faker.fake(), name).await
    }

    pub async fn add_stem_to(&self, song: song::Id, name: &str) -> artifact::Path {
        let path = artifact::Path::new(song, name).unwrap();
        self.write(&path);
        path
    }

    /// A wav upload waiting outside the storage root.
    pub fn upload(&self) -> Utf8PlatformPathBuf {
        self.upload_with(&audio())
    }

    pub fn upload_with(&self, audio: &Audio) -> Utf8PlatformPathBuf {
        let path = utf8(&self.incoming).join(concat_string!(Faker.fake::<String>(), ".upload"));
        artifact::stage::write_wav(&path, audio).unwrap();
        path
    }
}

#[fixture]
pub async fn mock(#[default(Fake::default())] fake: Fake) -> Mock {
    Mock::new(fake)
}
