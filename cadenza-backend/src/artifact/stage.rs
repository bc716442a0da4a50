use atomic_write_file::AtomicWriteFile;
use tempfile::TempPath;
use typed_path::{Utf8PlatformPath, Utf8PlatformPathBuf};

use crate::audio::Audio;
use crate::{Error, error};

/// Encodes `audio` next to `path` and renames it into place once complete.
pub fn write_wav(path: impl AsRef<Utf8PlatformPath>, audio: &Audio) -> Result<(), Error> {
    let mut file = AtomicWriteFile::open(path.as_ref())?;
    audio.write(&mut file)?;
    file.commit()?;
    Ok(())
}

/// A temporary file in the target's directory for an external program to write into.
/// It is removed on drop unless committed.
#[derive(Debug)]
pub struct Staged {
    temp: TempPath,
    path: Utf8PlatformPathBuf,
    target: Utf8PlatformPathBuf,
}

impl Staged {
    pub fn new(target: Utf8PlatformPathBuf) -> Result<Self, Error> {
        let dir =
            target.parent().ok_or_else(|| error::Kind::ArtifactNotFound(target.clone()))?;
        let temp = tempfile::Builder::new()
            .prefix(".staged")
            .suffix(".wav")
            .tempfile_in(dir)?
            .into_temp_path();
        let path = temp.to_str().map(Utf8PlatformPathBuf::from).ok_or_else(|| {
            error::Kind::InvalidArtifactPath(temp.to_string_lossy().into_owned())
        })?;
        Ok(Self { temp, path, target })
    }

    pub fn path(&self) -> &Utf8PlatformPath {
        &self.path
    }

    pub fn commit(self) -> Result<Utf8PlatformPathBuf, Error> {
        self.temp.persist(&self.target).map_err(std::io::Error::from)?;
        Ok(self.target)
    }
}
