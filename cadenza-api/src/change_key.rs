use serde::{Deserialize, Serialize};

use crate::common::stem::Stems;

/// Either `value` (a semitone delta) or `target` (a key label) must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub target: Option<String>,
    pub current_key: String,
    pub current_audio_stems: Stems,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub new_key: String,
    #[serde(flatten)]
    pub stems: Stems,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_legacy_request() {
        let request: Request = serde_json::from_str(
            r#"{
                "value": 3,
                "currentKey": "C",
                "currentBPM": 120,
                "currentAudioStems": { "soprano": "uploads/x/a.wav", "alto": null }
            }"#,
        )
        .unwrap();
        assert_eq!(request.value, Some(3));
        assert_eq!(request.target, None);
        assert_eq!(request.current_key, "C");
        assert_eq!(request.current_audio_stems.soprano.as_deref(), Some("uploads/x/a.wav"));
        assert_eq!(request.current_audio_stems.alto, None);
    }

    #[test]
    fn test_serialize_flattened_response() {
        let response = Response {
            new_key: "D#".to_owned(),
            stems: Stems { soprano: Some("s".to_owned()), ..Stems::default() },
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "new_key": "D#",
                "soprano": "s",
                "alto": "",
                "tenor": "",
                "instrumental": ""
            })
        );
    }
}
