use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicalParts {
    pub soprano_path: String,
    pub alto_path: String,
    pub tenor_path: String,
    pub instrumental_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub filename: String,
    pub paths: String,
    pub duration: f64,
    pub musical_key: String,
    pub song_tempo: u32,
    pub lyrics: Option<String>,
    pub musical_parts: MusicalParts,
}
