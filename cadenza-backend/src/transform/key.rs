use cadenza_api::common::stem::{Role, Stems};
use itertools::Itertools;
use tracing::instrument;

use crate::artifact::{self, Derived, name};
use crate::music::Key;
use crate::{App, Error, capability, registry};

/// Produces the `key` variant of `source` unless it already exists.
#[instrument(
    skip_all,
    fields(song = %source.song, name = %source.name, semitones = semitones, %key),
    err(Debug)
)]
pub async fn apply_key_shift<R: registry::Trait>(
    app: &App<R>,
    source: &artifact::Path,
    semitones: i32,
    key: Key,
) -> Result<Derived, Error> {
    let _dir = app.locks.read_dir(source.song).await;
    materialize(app, source, semitones, key).await
}

/// Same as [`apply_key_shift`] for callers already holding the song directory lock.
pub(crate) async fn materialize<R: registry::Trait>(
    app: &App<R>,
    source: &artifact::Path,
    semitones: i32,
    key: Key,
) -> Result<Derived, Error> {
    materialize_as(app, source, semitones, name::derive_key_name(source, key, &app.config.storage)?)
        .await
}

/// Pitch shifts `source` by `semitones` into `target` unless `target` already exists.
pub(crate) async fn materialize_as<R: registry::Trait>(
    app: &App<R>,
    source: &artifact::Path,
    semitones: i32,
    target: Derived,
) -> Result<Derived, Error> {
    let _artifact = app.locks.artifact(target.path.song, &target.path.name).await;
    if tokio::fs::try_exists(&target.disk).await? {
        tracing::debug!(name = %target.path.name, "reuse");
        return Ok(target);
    }

    let audio = app.cache.get_or_load(source, source.disk(&app.config.storage.root)).await?;
    let shifted = capability::invoke(&app.config.capability, "pitch_shift", {
        let shifter = app.capabilities.pitch_shifter.clone();
        move || shifter.pitch_shift(&audio, semitones)
    })
    .await?;

    let span = tracing::Span::current();
    let disk = target.disk.clone();
    tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        artifact::stage::write_wav(disk, &shifted)
    })
    .await??;

    tracing::info!(name = %target.path.name, "pitch shifted");
    Ok(target)
}

/// Shifts every given stem so the song plays in `current` moved by `semitones`.
/// A net shift of zero returns the inputs untouched.
#[instrument(skip_all, fields(%current, semitones = semitones), err(Debug))]
pub async fn change_key<R: registry::Trait>(
    app: &App<R>,
    current: Key,
    semitones: i32,
    stems: &Stems,
) -> Result<(Key, Stems), Error> {
    let key = current.shift(semitones);
    if semitones.rem_euclid(12) == 0 {
        return Ok((key, stems.clone()));
    }

    let sources: Vec<(Role, artifact::Path)> = stems
        .iter()
        .map(|(role, path)| Ok::<_, Error>((role, artifact::Path::parse_transport(path)?)))
        .try_collect()?;

    let mut shifted = Stems::default();
    for (role, source) in sources {
        let derived = apply_key_shift(app, &source, semitones, key).await?;
        shifted.set(role, Some(derived.transport));
    }
    Ok((key, shifted))
}
