use serde::{Deserialize, Serialize};

use crate::common::stem::Stems;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub value: i32,
    #[serde(rename = "currentBPM")]
    pub current_bpm: u32,
    pub current_audio_stems: Stems,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub new_bpm: u32,
    #[serde(flatten)]
    pub stems: Stems,
}
