use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `upload` points at the received file, already converted to WAV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub file_name: String,
    pub upload: String,
    #[serde(default)]
    pub is_solo: bool,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub lyrics: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: String,
    pub song_id: Uuid,
}
