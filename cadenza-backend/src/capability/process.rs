use concat_string::concat_string;
use tempfile::TempPath;
use typed_path::{Utf8PlatformPath, Utf8PlatformPathBuf};

use super::{
    KeyEstimator, PitchShifter, StemSeparator, TempoEstimator, TimeStretcher, Transcriber,
};
use crate::audio::Audio;
use crate::config::capability::{Command, Process as Config};
use crate::music::Key;
use crate::{Error, error};

/// Every capability backed by an external program.
#[derive(Debug)]
pub struct Process {
    config: Config,
}

fn utf8(path: &std::path::Path) -> Result<Utf8PlatformPathBuf, Error> {
    path.to_str()
        .map(Utf8PlatformPathBuf::from)
        .ok_or_else(|| error::Kind::InvalidArtifactPath(path.to_string_lossy().into_owned()).into())
}

fn temp_wav() -> Result<(TempPath, Utf8PlatformPathBuf), Error> {
    let path = tempfile::Builder::new().suffix(".wav").tempfile()?.into_temp_path();
    let utf8 = utf8(&path)?;
    Ok((path, utf8))
}

fn stage(audio: &Audio) -> Result<(TempPath, Utf8PlatformPathBuf), Error> {
    let mut file = tempfile::Builder::new().suffix(".wav").tempfile()?;
    audio.write(&mut file)?;
    let path = file.into_temp_path();
    let utf8 = utf8(&path)?;
    Ok((path, utf8))
}

fn failed(capability: &'static str, reason: impl Into<String>) -> Error {
    error::Kind::CapabilityFailed { capability, reason: reason.into() }.into()
}

impl Process {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn run(
        capability: &'static str,
        command: &Command,
        substitutions: &[(&str, &str)],
    ) -> Result<String, Error> {
        let args = command.args.iter().map(|arg| {
            substitutions.iter().fold(arg.clone(), |arg, (placeholder, value)| {
                arg.replace(placeholder, value)
            })
        });

        tracing::debug!(capability, program = %command.program, "spawn");
        let output = std::process::Command::new(&command.program)
            .args(args)
            .output()
            .map_err(|source| error::Kind::CapabilitySpawn { capability, source })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(failed(
                capability,
                concat_string!(
                    output.status.to_string(),
                    ": ",
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ))
        }
    }
}

impl KeyEstimator for Process {
    fn estimate_key(&self, audio: &Audio) -> Result<Key, Error> {
        const CAPABILITY: &str = "estimate_key";

        let (_input, input) = stage(audio)?;
        let stdout =
            Self::run(CAPABILITY, &self.config.estimate_key, &[("{input}", input.as_str())])?;
        stdout
            .split_whitespace()
            .rev()
            .find_map(|token| token.parse().ok())
            .ok_or_else(|| failed(CAPABILITY, concat_string!("unrecognized key ", stdout.trim())))
    }
}

impl TempoEstimator for Process {
    fn estimate_tempo(&self, input: &Utf8PlatformPath) -> Result<u32, Error> {
        const CAPABILITY: &str = "estimate_tempo";

        let stdout =
            Self::run(CAPABILITY, &self.config.estimate_tempo, &[("{input}", input.as_str())])?;
        stdout
            .split_whitespace()
            .find_map(|token| token.parse::<f64>().ok())
            .filter(|bpm| bpm.is_finite() && *bpm >= 0.5 && *bpm < f64::from(u32::MAX))
            .map(|bpm| bpm.round() as u32)
            .ok_or_else(|| failed(CAPABILITY, concat_string!("unrecognized tempo ", stdout.trim())))
    }
}

impl PitchShifter for Process {
    fn pitch_shift(&self, audio: &Audio, semitones: i32) -> Result<Audio, Error> {
        let (_input, input) = stage(audio)?;
        let (_output, output) = temp_wav()?;
        let semitones = semitones.to_string();
        Self::run(
            "pitch_shift",
            &self.config.pitch_shift,
            &[
                ("{input}", input.as_str()),
                ("{output}", output.as_str()),
                ("{semitones}", semitones.as_str()),
            ],
        )?;
        Audio::open(&output)
    }
}

impl TimeStretcher for Process {
    fn time_stretch(
        &self,
        input: &Utf8PlatformPath,
        ratio: f64,
        output: &Utf8PlatformPath,
    ) -> Result<(), Error> {
        let ratio = ratio.to_string();
        Self::run(
            "time_stretch",
            &self.config.time_stretch,
            &[
                ("{input}", input.as_str()),
                ("{output}", output.as_str()),
                ("{ratio}", ratio.as_str()),
            ],
        )?;
        Ok(())
    }
}

impl StemSeparator for Process {
    fn separate(
        &self,
        input: &Utf8PlatformPath,
        output_dir: &Utf8PlatformPath,
    ) -> Result<Vec<Utf8PlatformPathBuf>, Error> {
        Self::run(
            "separate_stems",
            &self.config.separate_stems,
            &[("{input}", input.as_str()), ("{output_dir}", output_dir.as_str())],
        )?;

        let mut outputs = Vec::new();
        for entry in std::fs::read_dir(output_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                outputs.push(utf8(&entry.path())?);
            }
        }
        outputs.sort();
        Ok(outputs)
    }
}

impl Transcriber for Process {
    fn transcribe(&self, input: &Utf8PlatformPath) -> Result<String, Error> {
        Self::run("transcribe", &self.config.transcribe, &[("{input}", input.as_str())])
            .map(|text| text.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(program: &str, args: &[&str]) -> Command {
        Command {
            program: program.to_owned(),
            args: args.iter().copied().map(str::to_owned).collect(),
        }
    }

    fn process(configure: impl FnOnce(&mut Config)) -> Process {
        let mut config = Config::default();
        configure(&mut config);
        Process::new(config)
    }

    fn audio() -> Audio {
        Audio { samples: vec![0.0, 0.5, -0.5, 0.25], channels: 1, sample_rate: 8000 }
    }

    #[test]
    fn test_estimate_key() {
        let process =
            process(|config| config.estimate_key = command("echo", &["{input}", "A#m"]));
        assert_eq!(process.estimate_key(&audio()).unwrap(), "A#m".parse().unwrap());
    }

    #[test]
    fn test_estimate_tempo() {
        let process =
            process(|config| config.estimate_tempo = command("echo", &["119.6", "bpm"]));
        assert_eq!(process.estimate_tempo(Utf8PlatformPath::new("a.wav")).unwrap(), 120);
    }

    #[test]
    fn test_unparsable_output() {
        let process = process(|config| config.estimate_tempo = command("echo", &["none"]));
        assert!(matches!(
            process.estimate_tempo(Utf8PlatformPath::new("a.wav")).unwrap_err().kind(),
            Some(error::Kind::CapabilityFailed { .. })
        ));
    }

    #[test]
    fn test_pitch_shift() {
        let process = process(|config| {
            config.pitch_shift = command("cp", &["{input}", "{output}"]);
        });
        assert_eq!(process.pitch_shift(&audio(), 3).unwrap(), audio());
    }

    #[test]
    fn test_separate() {
        let dir = tempfile::tempdir().unwrap();
        let dir = Utf8PlatformPathBuf::from(dir.path().to_str().unwrap());
        let process = process(|config| {
            config.separate_stems = command(
                "sh",
                &[
                    "-c",
                    "touch \"$1/song_(Vocals)_model_a.wav\" \"$1/song_(Instrumental)_model_a.wav\"",
                    "sh",
                    "{input}",
                    "{output_dir}",
                ],
            );
        });

        let outputs = process.separate(Utf8PlatformPath::new("song.wav"), &dir).unwrap();
        assert_eq!(
            outputs.iter().filter_map(|output| output.file_name()).collect::<Vec<_>>(),
            ["song_(Instrumental)_model_a.wav", "song_(Vocals)_model_a.wav"]
        );
    }

    #[test]
    fn test_spawn_failure() {
        let process = process(|config| {
            config.transcribe = command("cadenza-missing-transcriber", &["{input}"]);
        });
        let error = process.transcribe(Utf8PlatformPath::new("a.wav")).unwrap_err();
        assert!(error.is_transient());
    }

    #[test]
    fn test_exit_failure() {
        let process = process(|config| {
            config.transcribe = command("sh", &["-c", "echo broken >&2; exit 3"]);
        });
        let error = process.transcribe(Utf8PlatformPath::new("a.wav")).unwrap_err();
        let Some(error::Kind::CapabilityFailed { reason, .. }) = error.kind() else {
            panic!("unexpected error {error:?}");
        };
        assert!(reason.ends_with("broken"));
    }
}
