pub use cadenza_api::change_key::{Request, Response};

use crate::music::Key;
use crate::{App, Error, error, registry, transform};

/// Largest shift accepted from a client, two octaves either way.
pub const MAX_SEMITONES: i32 = 24;

/// Semitones to move from `current`, either given directly or as the shortest way to `target`.
pub fn semitones(current: Key, value: Option<i32>, target: Option<&str>) -> Result<i32, Error> {
    match (value, target) {
        (Some(value), _) if !(-MAX_SEMITONES..=MAX_SEMITONES).contains(&value) => {
            error::Kind::SemitonesOutOfRange(value).into()
        }
        (Some(value), _) => Ok(value),
        (None, Some(target)) => current.distance(target.parse()?),
        (None, None) => error::Kind::MissingKeyChange.into(),
    }
}

pub async fn handler<R: registry::Trait>(
    app: &App<R>,
    request: Request,
) -> Result<Response, Error> {
    let current: Key = request.current_key.parse()?;
    let semitones = semitones(current, request.value, request.target.as_deref())?;
    let (key, stems) =
        transform::change_key(app, current, semitones, &request.current_audio_stems).await?;
    Ok(Response { new_key: key.to_string(), stems })
}
