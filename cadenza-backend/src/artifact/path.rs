use concat_string::concat_string;
use typed_path::{Utf8PlatformPath, Utf8PlatformPathBuf};

use crate::{Error, error, song};

/// Location of an artifact: a plain file name inside a song directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    pub song: song::Id,
    pub name: String,
}

impl Path {
    pub fn new(song: song::Id, name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0'])
        {
            return error::Kind::InvalidArtifactPath(name).into();
        }
        Ok(Self { song, name })
    }

    pub fn with_name(&self, name: impl Into<String>) -> Result<Self, Error> {
        Self::new(self.song, name)
    }

    pub fn dir(root: impl AsRef<Utf8PlatformPath>, song: song::Id) -> Utf8PlatformPathBuf {
        root.as_ref().join(song.to_string())
    }

    pub fn disk(&self, root: impl AsRef<Utf8PlatformPath>) -> Utf8PlatformPathBuf {
        Self::dir(root, self.song).join(&self.name)
    }

    pub fn transport(&self, prefix: &str) -> String {
        let song = self.song.to_string();
        let name = urlencoding::encode(&self.name);
        if prefix.is_empty() {
            concat_string!(song, "/", name)
        } else {
            concat_string!(prefix.trim_end_matches('/'), "/", song, "/", name)
        }
    }

    /// Accepts anything ending in `<song>/<encoded name>`, so prefixed and absolute forms work.
    pub fn parse_transport(value: &str) -> Result<Self, Error> {
        let invalid = || error::Kind::InvalidArtifactPath(value.to_owned());
        let (rest, name) = value.rsplit_once('/').ok_or_else(invalid)?;
        let song = rest.rsplit('/').next().unwrap_or(rest);
        let song = song.parse::<song::Id>().map_err(|_| invalid())?;
        Self::new(song, urlencoding::decode(name).map_err(|_| invalid())?)
    }
}
