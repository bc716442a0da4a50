mod id;
mod stem;

pub use id::Id;
pub use stem::StemSet;

use crate::music::Key;

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Song {
    pub id: Id,
    /// Original upload file name, the lookup key for re-uploads.
    pub name: String,
    pub artist: String,
    pub duration: f64,
    /// Name of the key and tempo tagged wav inside the song directory.
    pub canonical: String,
    pub key: Key,
    pub bpm: u32,
    pub lyrics: Option<String>,
    pub stems: StemSet,
    pub is_solo: bool,
}

/// Fields to overwrite on an existing song. `None` leaves the field as is, so clearing the
/// lyrics takes `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct Update {
    pub artist: Option<String>,
    pub duration: Option<f64>,
    pub canonical: Option<String>,
    pub key: Option<Key>,
    pub bpm: Option<u32>,
    pub lyrics: Option<Option<String>>,
    pub stems: Option<StemSet>,
    pub is_solo: Option<bool>,
}

impl Song {
    pub fn apply(&mut self, update: Update) {
        let Update { artist, duration, canonical, key, bpm, lyrics, stems, is_solo } = update;
        if let Some(artist) = artist {
            self.artist = artist;
        }
        if let Some(duration) = duration {
            self.duration = duration;
        }
        if let Some(canonical) = canonical {
            self.canonical = canonical;
        }
        if let Some(key) = key {
            self.key = key;
        }
        if let Some(bpm) = bpm {
            self.bpm = bpm;
        }
        if let Some(lyrics) = lyrics {
            self.lyrics = lyrics;
        }
        if let Some(stems) = stems {
            self.stems = stems;
        }
        if let Some(is_solo) = is_solo {
            self.is_solo = is_solo;
        }
    }

    pub fn lyrics(&self) -> Option<&str> {
        self.lyrics.as_deref().filter(|lyrics| !lyrics.is_empty())
    }
}

impl From<Song> for Update {
    fn from(value: Song) -> Self {
        Self {
            artist: Some(value.artist),
            duration: Some(value.duration),
            canonical: Some(value.canonical),
            key: Some(value.key),
            bpm: Some(value.bpm),
            lyrics: Some(value.lyrics),
            stems: Some(value.stems),
            is_solo: Some(value.is_solo),
        }
    }
}

#[cfg(test)]
mod test {
    use fake::{Fake, Faker};

    use super::*;
    use cadenza_api::common::stem::Role;

    impl Song {
        pub fn fake(canonical: impl Into<String>, key: &str, bpm: u32) -> Self {
            Self {
                id: Faker.fake(),
                name: Faker.fake::<String>(),
                artist: Faker.fake::<String>(),
                duration: (30.0..600.0).fake(),
                canonical: canonical.into(),
                key: key.parse().unwrap(),
                bpm,
                lyrics: None,
                stems: StemSet::default(),
                is_solo: false,
            }
        }
    }

    #[test]
    fn test_apply_partial() {
        let mut song = Song::fake("a_KEY_C_BPM_120.wav", "C", 120);
        let original = song.clone();
        song.apply(Update {
            bpm: Some(130),
            lyrics: Some(Some("la".to_owned())),
            ..Default::default()
        });
        assert_eq!(song.bpm, 130);
        assert_eq!(song.lyrics(), Some("la"));
        assert_eq!(song.key, original.key);
        assert_eq!(song.canonical, original.canonical);
        assert_eq!(song.artist, original.artist);
    }

    #[test]
    fn test_apply_full() {
        let mut song = Song::fake("a_KEY_C_BPM_120.wav", "C", 120);
        let mut other = Song::fake("b_KEY_Am_BPM_90.wav", "Am", 90);
        other.id = song.id;
        other.name = song.name.clone();
        other.stems = [(Role::Soprano, "b_Soprano.wav".to_owned())].into_iter().collect();
        song.apply(other.clone().into());
        assert_eq!(song, other);
    }

    #[test]
    fn test_apply_clears_lyrics() {
        let mut song = Song::fake("a_KEY_C_BPM_120.wav", "C", 120);
        song.lyrics = Some("old".to_owned());

        song.apply(Update { bpm: Some(130), ..Default::default() });
        assert_eq!(song.lyrics(), Some("old"));

        let mut other = song.clone();
        other.lyrics = None;
        song.apply(other.into());
        assert_eq!(song.lyrics(), None);
    }
}
