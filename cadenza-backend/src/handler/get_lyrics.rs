pub use cadenza_api::get_lyrics::{Request, Response};

use crate::{App, Error, lyrics, registry};

pub async fn handler<R: registry::Trait>(
    app: &App<R>,
    request: Request,
) -> Result<Response, Error> {
    let song = app.song(request.song_id.into()).await?;
    Ok(Response { lyrics: lyrics::get_or_transcribe(app, &song).await? })
}

#[cfg(test)]
mod tests {
    use fake::{Fake, Faker};
    use rstest::rstest;

    use super::*;
    use crate::test::{Mock, mock};

    #[rstest]
    #[tokio::test]
    async fn test_not_found(#[future(awt)] mock: Mock) {
        let error = handler(&mock.app, Request { song_id: Faker.fake() }).await.unwrap_err();
        assert_eq!(error.class(), crate::error::Class::NotFound);
        assert_eq!(mock.calls.transcribe(), 0);
    }
}
