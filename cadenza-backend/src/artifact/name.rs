use std::sync::OnceLock;

use concat_string::concat_string;
use regex::{NoExpand, Regex};
use typed_path::Utf8PlatformPathBuf;

use super::Path;
use crate::music::Key;
use crate::{Error, config, error};

const KEY_TOKEN: &str = "_KEY_";
const BPM_TOKEN: &str = "_BPM_";

fn key_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"_KEY_[A-G]#?m?").unwrap())
}

fn bpm_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"_BPM_\d+").unwrap())
}

/// An artifact name resolved against the upload root and the transport prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    pub path: Path,
    pub disk: Utf8PlatformPathBuf,
    pub transport: String,
}

impl Derived {
    pub fn new(path: Path, storage: &config::Storage) -> Self {
        let disk = path.disk(&storage.root);
        let transport = path.transport(&storage.transport_prefix);
        Self { path, disk, transport }
    }
}

fn substitute(
    name: &str,
    regex: &Regex,
    token: &'static str,
    value: &str,
) -> Result<String, Error> {
    if regex.find_iter(name).nth(1).is_some() {
        return error::Kind::DuplicateArtifactToken(name.to_owned(), token).into();
    }
    Ok(regex.replace(name, NoExpand(&concat_string!(token, value))).into_owned())
}

/// Replaces the key token of `name`. A name without a key token is returned unchanged.
pub fn with_key(name: &str, key: Key) -> Result<String, Error> {
    substitute(name, key_regex(), KEY_TOKEN, key.label())
}

/// Replaces the tempo token of `name`. A name without a tempo token is returned unchanged.
pub fn with_bpm(name: &str, bpm: u32) -> Result<String, Error> {
    substitute(name, bpm_regex(), BPM_TOKEN, &bpm.to_string())
}

pub fn canonical(base: &str, key: Key, bpm: u32) -> String {
    concat_string!(base, KEY_TOKEN, key.label(), BPM_TOKEN, bpm.to_string(), ".wav")
}

pub fn derive_key_name(path: &Path, key: Key, storage: &config::Storage) -> Result<Derived, Error> {
    Ok(Derived::new(path.with_name(with_key(&path.name, key)?)?, storage))
}

pub fn derive_bpm_name(path: &Path, bpm: u32, storage: &config::Storage) -> Result<Derived, Error> {
    Ok(Derived::new(path.with_name(with_bpm(&path.name, bpm)?)?, storage))
}
