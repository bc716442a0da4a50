use std::fmt::{self, Display};
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::IntoStaticStr;

use crate::{Error, error};

const SEMITONES: i32 = 12;

const MAJOR: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const MINOR: [&str; 12] =
    ["Am", "A#m", "Bm", "Cm", "C#m", "Dm", "D#m", "Em", "Fm", "F#m", "Gm", "G#m"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Major,
    Minor,
}

/// A position on one of the two twelve-tone rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Key {
    mode: Mode,
    index: u8,
}

impl Mode {
    fn ring(self) -> &'static [&'static str; 12] {
        match self {
            Mode::Major => &MAJOR,
            Mode::Minor => &MINOR,
        }
    }
}

impl Key {
    pub fn mode(self) -> Mode {
        self.mode
    }

    pub fn label(self) -> &'static str {
        self.mode.ring()[usize::from(self.index)]
    }

    pub fn shift(self, semitones: i32) -> Self {
        let index = (i32::from(self.index) + semitones.rem_euclid(SEMITONES)) % SEMITONES;
        Self { mode: self.mode, index: index as u8 }
    }

    /// Signed distance to `target` taking the shorter way around the ring, in `[-6, 6]`.
    pub fn distance(self, target: Self) -> Result<i32, Error> {
        if self.mode != target.mode {
            return error::Kind::KeyModeMismatch { from: self.mode.into(), to: target.mode.into() }
                .into();
        }
        let mut delta = i32::from(target.index) - i32::from(self.index);
        if delta > SEMITONES / 2 {
            delta -= SEMITONES;
        } else if delta < -SEMITONES / 2 {
            delta += SEMITONES;
        }
        Ok(delta)
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = if s.ends_with('m') { Mode::Minor } else { Mode::Major };
        mode.ring()
            .iter()
            .position(|label| *label == s)
            .map(|index| Self { mode, index: index as u8 })
            .ok_or_else(|| error::Kind::InvalidKeyLabel(s.to_owned()).into())
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
