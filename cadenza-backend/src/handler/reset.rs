pub use cadenza_api::reset::{Request, Response};

use crate::{App, Error, reconcile, registry};

pub async fn handler<R: registry::Trait>(
    app: &App<R>,
    request: Request,
) -> Result<Response, Error> {
    let song = app.song(request.song_id.into()).await?;
    reconcile::reset(app, &song).await
}
