use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::stem::Stems;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "songId")]
    pub song_id: Uuid,
}

pub type Response = Stems;
