mod format;

use cadenza_api::common::stem::Role;
use tracing::instrument;

pub use format::{format, wrap};

use crate::{App, Error, artifact, capability, error, registry, song};

/// Returns the stored lyrics of a song, transcribing its soprano stem once if there are none.
#[instrument(skip_all, fields(song = %song.id), err(Debug))]
pub async fn get_or_transcribe<R: registry::Trait>(
    app: &App<R>,
    song: &song::Song,
) -> Result<String, Error> {
    if let Some(lyrics) = song.lyrics() {
        return Ok(lyrics.to_owned());
    }

    let _guard = app.locks.lyrics(song.id).await;
    let song = app.song(song.id).await?;
    if let Some(lyrics) = song.lyrics() {
        return Ok(lyrics.to_owned());
    }

    let soprano = song
        .stems
        .get(Role::Soprano)
        .ok_or(error::Kind::SeparationStemMissing(Role::Soprano.into()))?;
    let input = artifact::Path::new(song.id, soprano)?.disk(&app.config.storage.root);
    if !tokio::fs::try_exists(&input).await? {
        return error::Kind::ArtifactNotFound(input).into();
    }

    let text = capability::invoke(&app.config.capability, "transcribe", {
        let transcriber = app.capabilities.transcriber.clone();
        move || transcriber.transcribe(&input)
    })
    .await?;
    let lyrics = format(&text, app.config.transform.lyrics.width);

    let update = song::Update { lyrics: Some(Some(lyrics.clone())), ..Default::default() };
    app.registry.update(song.id, update).await?;
    tracing::info!(lines = lyrics.lines().count(), "transcribed");
    Ok(lyrics)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use itertools::Itertools;
    use rstest::rstest;
    use tokio::task::JoinSet;

    use super::*;
    use crate::registry::Trait as _;
    use crate::test::{Mock, mock};

    async fn setup(mock: &Mock, lyrics: Option<&str>) -> song::Song {
        let mut song = song::Song::fake("song_KEY_C_BPM_120.wav", "C", 120);
        let soprano = mock.add_stem_to(song.id, "song_KEY_C_BPM_120_Soprano.wav").await;
        song.stems = [(Role::Soprano, soprano.name)].into_iter().collect();
        song.lyrics = lyrics.map(str::to_owned);
        mock.app.registry.insert(song.clone()).await.unwrap();
        song
    }

    #[rstest]
    #[tokio::test]
    async fn test_stored(#[future(awt)] mock: Mock) {
        let song = setup(&mock, Some("stored")).await;
        assert_eq!(get_or_transcribe(&mock.app, &song).await.unwrap(), "stored");
        assert_eq!(mock.calls.transcribe(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_transcribe_once(
        #[future(awt)] mock: Mock,
        #[values(None, Some(""))] lyrics: Option<&str>,
    ) {
        let song = setup(&mock, lyrics).await;

        let first = get_or_transcribe(&mock.app, &song).await.unwrap();
        assert_eq!(first, "Hello darkness my old friend.\nI've come to talk with you again");
        let stored = mock.app.song(song.id).await.unwrap();
        assert_eq!(stored.lyrics(), Some(first.as_str()));

        assert_eq!(get_or_transcribe(&mock.app, &stored).await.unwrap(), first);
        assert_eq!(mock.calls.transcribe(), 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent(#[future(awt)] mock: Mock) {
        let mock = Arc::new(mock);
        let song = setup(&mock, None).await;

        let mut set = JoinSet::new();
        for _ in 0..4 {
            let mock = mock.clone();
            let song = song.clone();
            set.spawn(async move { get_or_transcribe(&mock.app, &song).await.unwrap() });
        }
        assert!(set.join_all().await.iter().all_equal());
        assert_eq!(mock.calls.transcribe(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_soprano(#[future(awt)] mock: Mock) {
        let mut song = setup(&mock, None).await;
        song.stems = song::StemSet::default();
        mock.app
            .registry
            .update(song.id, song::Update { stems: Some(song.stems.clone()), ..Default::default() })
            .await
            .unwrap();

        assert!(get_or_transcribe(&mock.app, &song).await.is_err());
        assert_eq!(mock.calls.transcribe(), 0);
    }
}
