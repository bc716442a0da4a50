use std::sync::Arc;

pub use cadenza_api::insert::{Request, Response};
use tracing::instrument;
use typed_path::{Utf8PlatformPath, Utf8PlatformPathBuf};
use unicode_normalization::UnicodeNormalization;

use crate::artifact::{self, name};
use crate::audio::Audio;
use crate::{App, Error, capability, error, registry, separate, song};

pub const CREATED: &str = "Song uploaded and database entry created";
pub const UPDATED: &str = "Song re-uploaded and database updated";
pub const SKIPPED: &str = "Song file already exists on the server, upload skipped";

/// Folds accents away with NFKD, keeps ASCII alphanumerics, `.`, `-` and `_`, turns whitespace
/// runs into `_` and strips leading and trailing dots and underscores.
pub fn sanitize(file_name: &str) -> String {
    file_name
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .replace(['/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect::<String>()
        .trim_matches(['.', '_'])
        .to_owned()
}

fn base_name(file_name: &str) -> Result<String, Error> {
    let unsupported = || error::Kind::UnsupportedUploadFormat(file_name.to_owned());
    let (stem, extension) = file_name.rsplit_once('.').ok_or_else(unsupported)?;
    if !matches!(extension.to_ascii_lowercase().as_str(), "wav" | "mp3") {
        return Err(unsupported().into());
    }

    let base = sanitize(stem);
    if base.is_empty() { Err(unsupported().into()) } else { Ok(base) }
}

async fn already_uploaded(dir: &Utf8PlatformPath, base: &str) -> Result<bool, Error> {
    let plain = concat_string::concat_string!(base, ".wav");
    let tagged = concat_string::concat_string!(base, "_KEY_");
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if name.to_str().is_some_and(|name| {
            name.ends_with(".wav") && (name == plain || name.starts_with(&tagged))
        }) {
            return Ok(true);
        }
    }
    Ok(false)
}

async fn move_file(from: &Utf8PlatformPath, to: &Utf8PlatformPath) -> Result<(), Error> {
    if tokio::fs::rename(from, to).await.is_err() {
        tokio::fs::copy(from, to).await?;
        tokio::fs::remove_file(from).await?;
    }
    Ok(())
}

/// Drops the directory of a song that never made it into the registry.
async fn discard(dir: &Utf8PlatformPath) {
    if let Err(error) = tokio::fs::remove_dir_all(dir).await {
        tracing::warn!(%dir, ?error, "could not remove song directory");
    }
}

#[instrument(
    skip_all,
    fields(file_name = %request.file_name, is_solo = request.is_solo),
    err(Debug)
)]
pub async fn handler<R: registry::Trait>(
    app: &App<R>,
    request: Request,
) -> Result<Response, Error> {
    let base = base_name(&request.file_name)?;
    let existing = app.registry.find_by_name(&request.file_name).await?;
    let id = existing.as_ref().map_or_else(song::Id::new, |song| song.id);

    let dir = app.song_dir(id);
    tokio::fs::create_dir_all(&dir).await?;
    let _dir = app.locks.write_dir(id).await;

    if already_uploaded(&dir, &base).await? {
        tracing::info!(%id, "skipped");
        return Ok(Response { status: SKIPPED.to_owned(), song_id: id.into() });
    }
    // Buffers decoded from a previous recording of this song are stale from here on.
    app.cache.invalidate(id);

    let song = match ingest(app, id, &base, &request).await {
        Ok(song) => song,
        Err(error) => {
            if existing.is_none() {
                discard(&dir).await;
            }
            return Err(error);
        }
    };

    let status = if existing.is_some() {
        app.registry.update(id, song.into()).await?;
        UPDATED
    } else {
        app.registry.insert(song).await?;
        CREATED
    };
    Ok(Response { status: status.to_owned(), song_id: id.into() })
}

/// Moves the upload into place, analyzes it and separates it. The caller holds the song
/// directory exclusively.
async fn ingest<R: registry::Trait>(
    app: &App<R>,
    id: song::Id,
    base: &str,
    request: &Request,
) -> Result<song::Song, Error> {
    let upload = artifact::Path::new(id, concat_string::concat_string!(base, ".wav"))?;
    let upload_disk = upload.disk(&app.config.storage.root);
    move_file(Utf8PlatformPath::new(&request.upload), &upload_disk).await?;

    let audio = Arc::new(
        tokio::task::spawn_blocking({
            let span = tracing::Span::current();
            let disk = upload_disk.clone();
            move || {
                let _entered = span.enter();
                Audio::open(disk)
            }
        })
        .await??,
    );
    let key = capability::invoke(&app.config.capability, "estimate_key", {
        let estimator = app.capabilities.key_estimator.clone();
        let audio = audio.clone();
        move || estimator.estimate_key(&audio)
    })
    .await?;
    let bpm = capability::invoke(&app.config.capability, "estimate_tempo", {
        let estimator = app.capabilities.tempo_estimator.clone();
        let disk: Utf8PlatformPathBuf = upload_disk.clone();
        move || estimator.estimate_tempo(&disk)
    })
    .await?;
    tracing::info!(%id, %key, bpm, "analyzed");

    let canonical = upload.with_name(name::canonical(base, key, bpm))?;
    tokio::fs::rename(&upload_disk, canonical.disk(&app.config.storage.root)).await?;
    let stems = separate::separate_locked(app, &canonical, request.is_solo).await?;

    Ok(song::Song {
        id,
        name: request.file_name.clone(),
        artist: request.artist.clone(),
        duration: if request.duration > 0.0 { request.duration } else { audio.duration() },
        canonical: canonical.name,
        key,
        bpm,
        lyrics: request.lyrics.clone().filter(|lyrics| !lyrics.is_empty()),
        stems,
        is_solo: request.is_solo,
    })
}
