pub mod process;

use std::fmt::Debug;
use std::sync::Arc;

use tracing::instrument;
use typed_path::{Utf8PlatformPath, Utf8PlatformPathBuf};

use crate::audio::Audio;
use crate::music::Key;
use crate::{Error, config, error};

pub trait KeyEstimator: Debug + Send + Sync {
    fn estimate_key(&self, audio: &Audio) -> Result<Key, Error>;
}

pub trait TempoEstimator: Debug + Send + Sync {
    fn estimate_tempo(&self, input: &Utf8PlatformPath) -> Result<u32, Error>;
}

pub trait PitchShifter: Debug + Send + Sync {
    fn pitch_shift(&self, audio: &Audio, semitones: i32) -> Result<Audio, Error>;
}

pub trait TimeStretcher: Debug + Send + Sync {
    /// Writes `input` played `ratio` times as fast to `output`.
    fn time_stretch(
        &self,
        input: &Utf8PlatformPath,
        ratio: f64,
        output: &Utf8PlatformPath,
    ) -> Result<(), Error>;
}

pub trait StemSeparator: Debug + Send + Sync {
    /// Splits `input` into files inside `output_dir` and returns their paths.
    fn separate(
        &self,
        input: &Utf8PlatformPath,
        output_dir: &Utf8PlatformPath,
    ) -> Result<Vec<Utf8PlatformPathBuf>, Error>;
}

pub trait Transcriber: Debug + Send + Sync {
    fn transcribe(&self, input: &Utf8PlatformPath) -> Result<String, Error>;
}

#[derive(Debug, Clone)]
pub struct Capabilities {
    pub key_estimator: Arc<dyn KeyEstimator>,
    pub tempo_estimator: Arc<dyn TempoEstimator>,
    pub pitch_shifter: Arc<dyn PitchShifter>,
    pub time_stretcher: Arc<dyn TimeStretcher>,
    pub stem_separator: Arc<dyn StemSeparator>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl Capabilities {
    pub fn process(config: &config::capability::Process) -> Self {
        let process = Arc::new(process::Process::new(config.clone()));
        Self {
            key_estimator: process.clone(),
            tempo_estimator: process.clone(),
            pitch_shifter: process.clone(),
            time_stretcher: process.clone(),
            stem_separator: process.clone(),
            transcriber: process,
        }
    }
}

/// Runs a blocking capability call off the async runtime, bounded by the configured timeout.
///
/// Spawn failures are retried with exponential backoff. A timeout abandons the blocking thread
/// and is reported as a retriable error.
#[instrument(skip(config, call), err(Debug))]
pub async fn invoke<T, F>(
    config: &config::Capability,
    capability: &'static str,
    call: F,
) -> Result<T, Error>
where
    T: Send + 'static,
    F: Fn() -> Result<T, Error> + Send + Sync + 'static,
{
    let call = Arc::new(call);
    let mut attempt = 0;
    loop {
        let span = tracing::Span::current();
        let handle = tokio::task::spawn_blocking({
            let call = call.clone();
            move || {
                let _entered = span.enter();
                call()
            }
        });

        let result = match tokio::time::timeout(config.timeout(), handle).await {
            Ok(result) => result?,
            Err(_) => {
                error::Kind::CapabilityTimedOut { capability, timeout: config.timeout() }.into()
            }
        };

        match result {
            Err(error) if error.is_transient() && attempt < config.retry => {
                let backoff = config.backoff(attempt);
                tracing::warn!(?error, attempt, ?backoff, "retry");
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}
