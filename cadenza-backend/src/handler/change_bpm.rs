pub use cadenza_api::change_bpm::{Request, Response};

use crate::{App, Error, registry, transform};

pub async fn handler<R: registry::Trait>(
    app: &App<R>,
    request: Request,
) -> Result<Response, Error> {
    let Request { value, current_bpm, current_audio_stems } = request;
    let (new_bpm, stems) =
        transform::change_bpm(app, current_bpm, value, &current_audio_stems).await?;
    Ok(Response { new_bpm, stems })
}
