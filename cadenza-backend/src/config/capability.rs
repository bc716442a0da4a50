use std::time::Duration;

use educe::Educe;
use serde::{Deserialize, Serialize};

/// An external program. Arguments may carry the placeholders `{input}`, `{output}`,
/// `{output_dir}`, `{ratio}` and `{semitones}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
}

impl Command {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_owned(),
            args: args.iter().copied().map(str::to_owned).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Educe)]
#[educe(Default)]
pub struct Process {
    #[educe(Default(expression = Command::new("keyfinder-cli", &["{input}"])))]
    pub estimate_key: Command,
    #[educe(Default(expression = Command::new("aubio", &["tempo", "{input}"])))]
    pub estimate_tempo: Command,
    #[educe(Default(expression = Command::new(
        "rubberband", &["--pitch", "{semitones}", "{input}", "{output}"]
    )))]
    pub pitch_shift: Command,
    #[educe(Default(expression = Command::new(
        "ffmpeg", &["-y", "-i", "{input}", "-filter:a", "atempo={ratio}", "{output}"]
    )))]
    pub time_stretch: Command,
    #[educe(Default(expression = Command::new(
        "audio-separator", &["{input}", "--output_dir", "{output_dir}"]
    )))]
    pub separate_stems: Command,
    #[educe(Default(expression = Command::new(
        "whisper-cli", &["--no-timestamps", "--no-prints", "--file", "{input}"]
    )))]
    pub transcribe: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize, Educe)]
#[educe(Default)]
pub struct Capability {
    // seconds
    #[educe(Default(expression = 600))]
    pub timeout: u64,
    #[educe(Default(expression = 1))]
    pub retry: u32,
    // milliseconds, doubled for every further attempt
    #[educe(Default(expression = 500))]
    pub backoff: u64,
    pub process: Process,
}

impl Capability {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff.saturating_mul(1 << attempt.min(16)))
    }
}
