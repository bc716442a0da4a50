use cadenza_api::common::stem::{Role, Stems};
use itertools::Itertools;
use tracing::instrument;

use crate::artifact::{self, Derived, name, stage};
use crate::music::tempo;
use crate::{App, Error, capability, error, registry};

/// Produces the `target` tempo variant of `source` unless it already exists.
#[instrument(
    skip_all,
    fields(song = %source.song, name = %source.name, current = current, target = target),
    err(Debug)
)]
pub async fn apply_tempo_shift<R: registry::Trait>(
    app: &App<R>,
    source: &artifact::Path,
    current: u32,
    target: u32,
) -> Result<Derived, Error> {
    let ratio = tempo::ratio(current, target, app.config.transform.tempo_precision)?;
    let derived = name::derive_bpm_name(source, target, &app.config.storage)?;

    let _dir = app.locks.read_dir(source.song).await;
    let _artifact = app.locks.artifact(derived.path.song, &derived.path.name).await;
    if tokio::fs::try_exists(&derived.disk).await? {
        tracing::debug!(name = %derived.path.name, "reuse");
        return Ok(derived);
    }

    let input = source.disk(&app.config.storage.root);
    if !tokio::fs::try_exists(&input).await? {
        return error::Kind::ArtifactNotFound(input).into();
    }

    let staged = stage::Staged::new(derived.disk.clone())?;
    capability::invoke(&app.config.capability, "time_stretch", {
        let stretcher = app.capabilities.time_stretcher.clone();
        let output = staged.path().to_path_buf();
        move || stretcher.time_stretch(&input, ratio, &output)
    })
    .await?;
    staged.commit()?;

    tracing::info!(name = %derived.path.name, ratio, "time stretched");
    Ok(derived)
}

/// Moves every given stem from `current` to `current + delta` beats per minute.
/// A zero delta returns the inputs untouched.
#[instrument(skip_all, fields(current = current, delta = delta), err(Debug))]
pub async fn change_bpm<R: registry::Trait>(
    app: &App<R>,
    current: u32,
    delta: i32,
    stems: &Stems,
) -> Result<(u32, Stems), Error> {
    let target = tempo::shift(current, delta)?;
    if target == current {
        return Ok((current, stems.clone()));
    }

    let sources: Vec<(Role, artifact::Path)> = stems
        .iter()
        .map(|(role, path)| Ok::<_, Error>((role, artifact::Path::parse_transport(path)?)))
        .try_collect()?;

    let mut stretched = Stems::default();
    for (role, source) in sources {
        let derived = apply_tempo_shift(app, &source, current, target).await?;
        stretched.set(role, Some(derived.transport));
    }
    Ok((target, stretched))
}
