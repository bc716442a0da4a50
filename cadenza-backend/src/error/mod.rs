use std::time::Duration;

use o2o::o2o;
use strum::IntoStaticStr;
use typed_path::Utf8PlatformPathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Class {
    InvalidInput,
    NotFound,
    ExternalCapabilityFailure,
    IoFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum Kind {
    #[error("Unknown musical key label {0:?}")]
    InvalidKeyLabel(String),
    #[error("Could not move from a {from} key to a {to} key")]
    KeyModeMismatch { from: &'static str, to: &'static str },
    #[error("Either a semitone value or a target key must be given")]
    MissingKeyChange,
    #[error("Key change of {0} semitones is out of range")]
    SemitonesOutOfRange(i32),
    #[error("Current tempo must not be zero")]
    ZeroBpm,
    #[error("Tempo {0} is out of range")]
    InvalidBpm(i64),
    #[error("Upload {0:?} is not a wav or mp3 file")]
    UnsupportedUploadFormat(String),
    #[error("Artifact name {0:?} carries more than one {1} token")]
    DuplicateArtifactToken(String, &'static str),
    #[error("Invalid artifact path {0:?}")]
    InvalidArtifactPath(String),

    #[error("Could not find song {0}")]
    SongNotFound(Uuid),
    #[error("Could not find artifact {0}")]
    ArtifactNotFound(Utf8PlatformPathBuf),
    #[error("Separation did not produce a {0} stem")]
    SeparationStemMissing(&'static str),

    #[error("Could not spawn {capability}: {source}")]
    CapabilitySpawn {
        capability: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{capability} failed: {reason}")]
    CapabilityFailed { capability: &'static str, reason: String },
    #[error("{capability} did not finish within {timeout:?}")]
    CapabilityTimedOut { capability: &'static str, timeout: Duration },

    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Wav(#[from] hound::Error),
}

#[derive(Debug, thiserror::Error, o2o)]
#[from_owned(std::io::Error| return Self::Kind(Kind::Io(@)))]
#[from_owned(hound::Error| return Self::Kind(Kind::Wav(@)))]
#[from_owned(tokio::task::JoinError| return Self::Internal(@.into()))]
pub enum Error {
    #[error(transparent)]
    Kind(#[from] Kind),
    #[error(transparent)]
    Internal(#[from] color_eyre::Report),
}

impl Kind {
    pub fn class(&self) -> Class {
        match self {
            Kind::InvalidKeyLabel(_)
            | Kind::KeyModeMismatch { .. }
            | Kind::MissingKeyChange
            | Kind::SemitonesOutOfRange(_)
            | Kind::ZeroBpm
            | Kind::InvalidBpm(_)
            | Kind::UnsupportedUploadFormat(_)
            | Kind::DuplicateArtifactToken(..)
            | Kind::InvalidArtifactPath(_) => Class::InvalidInput,
            Kind::SongNotFound(_) | Kind::ArtifactNotFound(_) => Class::NotFound,
            Kind::SeparationStemMissing(_)
            | Kind::CapabilitySpawn { .. }
            | Kind::CapabilityFailed { .. }
            | Kind::CapabilityTimedOut { .. } => Class::ExternalCapabilityFailure,
            Kind::Io(_) | Kind::Wav(_) => Class::IoFailure,
        }
    }
}

impl Error {
    pub fn class(&self) -> Class {
        match self {
            Error::Kind(kind) => kind.class(),
            Error::Internal(_) => Class::IoFailure,
        }
    }

    pub fn kind(&self) -> Option<&Kind> {
        if let Error::Kind(kind) = self { Some(kind) } else { None }
    }

    /// Failures worth one automatic retry: the external program never started.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Kind(Kind::CapabilitySpawn { .. }))
    }

    /// Failures a caller may resubmit.
    pub fn is_retriable(&self) -> bool {
        self.is_transient() || matches!(self, Error::Kind(Kind::CapabilityTimedOut { .. }))
    }
}

impl<T> From<Kind> for Result<T, Error> {
    fn from(value: Kind) -> Self {
        Err(value.into())
    }
}
