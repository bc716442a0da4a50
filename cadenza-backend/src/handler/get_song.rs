pub use cadenza_api::get_song::{MusicalParts, Request, Response};
use cadenza_api::common::stem::Role;

use crate::{App, Error, artifact, registry};

pub async fn handler<R: registry::Trait>(
    app: &App<R>,
    request: Request,
) -> Result<Response, Error> {
    let song = app.song(request.id.into()).await?;
    let prefix = &app.config.storage.transport_prefix;
    let part = |role| {
        song.stems
            .get(role)
            .map(|name| artifact::Path { song: song.id, name: name.to_owned() }.transport(prefix))
            .unwrap_or_default()
    };

    Ok(Response {
        paths: artifact::Path { song: song.id, name: song.canonical.clone() }.transport(prefix),
        musical_parts: MusicalParts {
            soprano_path: part(Role::Soprano),
            alto_path: part(Role::Alto),
            tenor_path: part(Role::Tenor),
            instrumental_path: part(Role::Instrumental),
        },
        filename: song.name,
        duration: song.duration,
        musical_key: song.key.to_string(),
        song_tempo: song.bpm,
        lyrics: song.lyrics,
    })
}
