use std::collections::HashSet;

use cadenza_api::common::stem::Stems;
use tracing::instrument;

use crate::{App, Error, registry, song};

/// Deletes everything in the song directory except the canonical file and its stems.
///
/// Removal is best effort: a failed deletion is logged and the sweep continues.
#[instrument(skip_all, fields(song = %song.id), err(Debug))]
pub async fn reset<R: registry::Trait>(app: &App<R>, song: &song::Song) -> Result<Stems, Error> {
    let keep: HashSet<&str> =
        std::iter::once(song.canonical.as_str()).chain(song.stems.names()).collect();

    let _dir = app.locks.write_dir(song.id).await;
    let mut entries = tokio::fs::read_dir(app.song_dir(song.id)).await?;
    let mut removed = 0usize;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if name.to_str().is_some_and(|name| keep.contains(name)) {
            continue;
        }

        let path = entry.path();
        let result = match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => tokio::fs::remove_dir_all(&path).await,
            Ok(_) => tokio::fs::remove_file(&path).await,
            Err(error) => Err(error),
        };
        match result {
            Ok(()) => removed += 1,
            Err(error) => tracing::warn!(path = %path.display(), ?error, "could not remove"),
        }
    }
    app.cache.invalidate(song.id);

    tracing::info!(removed, "reset");
    Ok(song.stems.transport(song.id, &app.config.storage.transport_prefix))
}

#[cfg(test)]
mod tests {
    use cadenza_api::common::stem::Role;
    use fake::{Fake, Faker};
    use rstest::rstest;

    use super::*;
    use crate::song::StemSet;
    use crate::test::{Mock, mock};

    async fn setup(mock: &Mock, is_solo: bool) -> song::Song {
        let mut song = song::Song::fake("song_KEY_C_BPM_120.wav", "C", 120);
        let mut roles = vec![Role::Soprano, Role::Instrumental];
        if is_solo {
            roles.extend([Role::Alto, Role::Tenor]);
        }
        song.stems = roles
            .into_iter()
            .map(|role| {
                (role, format!("song_KEY_C_BPM_120_{role}.wav"))
            })
            .collect::<StemSet>();

        for name in std::iter::once(song.canonical.as_str()).chain(song.stems.names()) {
            mock.add_stem_to(song.id, name).await;
        }
        song
    }

    fn expected(song: &song::Song) -> Vec<String> {
        let mut names: Vec<_> = std::iter::once(song.canonical.as_str())
            .chain(song.stems.names())
            .map(str::to_owned)
            .collect();
        names.sort();
        names
    }

    #[rstest]
    #[tokio::test]
    async fn test_idempotent(
        #[future(awt)] mock: Mock,
        #[values(true, false)] is_solo: bool,
        #[values(0, 1, 5)] n_extra: usize,
    ) {
        let song = setup(&mock, is_solo).await;
        for _ in 0..n_extra {
            mock.add_stem_to(song.id, &format!("{}_KEY_D_BPM_90.wav", Faker.fake::<String>()))
                .await;
        }

        let first = reset(&mock.app, &song).await.unwrap();
        assert_eq!(mock.files(song.id), expected(&song));
        let second = reset(&mock.app, &song).await.unwrap();
        assert_eq!(mock.files(song.id), expected(&song));
        assert_eq!(first, second);
        let prefix = &mock.app.config.storage.transport_prefix;
        assert_eq!(first, song.stems.transport(song.id, prefix));
    }

    #[rstest]
    #[tokio::test]
    async fn test_never_deletes_stems(#[future(awt)] mock: Mock) {
        let song = setup(&mock, true).await;
        let extras = [
            "song_KEY_C#_BPM_120_Soprano.wav",
            "song_KEY_C_BPM_130_Soprano.wav",
            "song_KEY_C_BPM_120_Soprano.wav.tmp",
            ".staged1234.wav",
            "Soprano",
        ];
        for permutation in 0..extras.len() {
            for extra in extras.iter().cycle().skip(permutation).take(extras.len() - permutation) {
                mock.add_stem_to(song.id, extra).await;
            }
            std::fs::create_dir_all(mock.app.song_dir(song.id).join(".separation1234")).unwrap();

            reset(&mock.app, &song).await.unwrap();
            assert_eq!(mock.files(song.id), expected(&song));
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_missing_song_dir(#[future(awt)] mock: Mock) {
        let song = song::Song::fake("song_KEY_C_BPM_120.wav", "C", 120);
        let error = reset(&mock.app, &song).await.unwrap_err();
        assert_eq!(error.class(), crate::error::Class::IoFailure);
    }
}
