use std::io::{Read, Seek, Write};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use typed_path::Utf8PlatformPath;

use crate::Error;

/// A decoded recording: interleaved samples normalised to `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl Audio {
    pub fn read(reader: impl Read) -> Result<Self, Error> {
        let reader = WavReader::new(reader)?;
        let spec = reader.spec();
        let samples = match spec.sample_format {
            SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<_, _>>()?,
            SampleFormat::Int => {
                let scale = (1u64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|sample| sample.map(|sample| sample as f32 / scale))
                    .collect::<Result<_, _>>()?
            }
        };
        Ok(Self { samples, channels: spec.channels, sample_rate: spec.sample_rate })
    }

    pub fn open(path: impl AsRef<Utf8PlatformPath>) -> Result<Self, Error> {
        Self::read(std::io::BufReader::new(std::fs::File::open(path.as_ref())?))
    }

    pub fn write(&self, writer: impl Write + Seek) -> Result<(), Error> {
        let spec = WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::new(writer, spec)?;
        for sample in &self.samples {
            writer.write_sample(*sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        if self.channels == 0 || self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.channels) / f64::from(self.sample_rate)
    }
}
