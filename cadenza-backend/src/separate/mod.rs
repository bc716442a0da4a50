mod normalize;

use cadenza_api::common::stem::Role;
use concat_string::concat_string;
use tracing::instrument;

use crate::song::StemSet;
use crate::transform::key;
use crate::{App, Error, artifact, capability, error, registry};

pub use normalize::normalize;

/// Splits the canonical recording into stems inside its song directory.
#[instrument(
    skip_all,
    fields(song = %canonical.song, name = %canonical.name, is_solo = is_solo),
    err(Debug)
)]
pub async fn separate<R: registry::Trait>(
    app: &App<R>,
    canonical: &artifact::Path,
    is_solo: bool,
) -> Result<StemSet, Error> {
    let _dir = app.locks.write_dir(canonical.song).await;
    separate_locked(app, canonical, is_solo).await
}

/// Same as [`separate`] for callers already holding the song directory exclusively.
pub(crate) async fn separate_locked<R: registry::Trait>(
    app: &App<R>,
    canonical: &artifact::Path,
    is_solo: bool,
) -> Result<StemSet, Error> {
    let dir = app.song_dir(canonical.song);
    let workspace = tempfile::Builder::new().prefix(".separation").tempdir_in(&dir)?;
    let output_dir = workspace
        .path()
        .to_str()
        .map(typed_path::Utf8PlatformPathBuf::from)
        .ok_or_else(|| error::Kind::InvalidArtifactPath(workspace.path().display().to_string()))?;

    let outputs = capability::invoke(&app.config.capability, "separate_stems", {
        let separator = app.capabilities.stem_separator.clone();
        let input = canonical.disk(&app.config.storage.root);
        move || separator.separate(&input, &output_dir)
    })
    .await?;

    let mut stems = StemSet::default();
    for output in outputs {
        let Some((name, role)) = output.file_name().map(normalize) else {
            continue;
        };
        let Some(role) = role else {
            tracing::warn!(%output, "unrecognized separation output");
            continue;
        };

        let destination = dir.join(&name);
        if tokio::fs::try_exists(&destination).await? {
            tracing::info!(%destination, "stem already exists, skipping move");
        } else {
            tokio::fs::rename(&output, &destination).await?;
        }
        stems.insert(role, name);
    }

    let soprano = stems
        .get(Role::Soprano)
        .ok_or(error::Kind::SeparationStemMissing(Role::Soprano.into()))?
        .to_owned();
    if stems.get(Role::Instrumental).is_none() {
        return error::Kind::SeparationStemMissing(Role::Instrumental.into()).into();
    }

    if is_solo {
        let soprano = canonical.with_name(soprano)?;
        let harmony = app.config.transform.harmony;
        for (role, semitones) in [(Role::Alto, harmony.alto), (Role::Tenor, harmony.tenor)] {
            let label: &'static str = role.into();
            let name = soprano.name.replace("Soprano", &capitalize(label));
            let target = app.derived(soprano.with_name(name)?);
            let derived = key::materialize_as(app, &soprano, semitones, target).await?;
            stems.insert(role, derived.path.name);
        }
    }

    workspace.close()?;
    Ok(stems)
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars
        .next()
        .map(|first| concat_string!(first.to_uppercase().to_string(), chars.as_str()))
        .unwrap_or_default()
}
