use educe::Educe;
use serde::{Deserialize, Serialize};
use typed_path::Utf8PlatformPathBuf;
use typed_path::utils::utf8_temp_dir;

#[derive(Debug, Clone, Serialize, Deserialize, Educe)]
#[educe(Default)]
pub struct Storage {
    #[serde(with = "super::path")]
    #[educe(Default(
        expression = utf8_temp_dir()
            .unwrap()
            .join("cadenza")
            .join("uploads")
            .with_platform_encoding()
    ))]
    pub root: Utf8PlatformPathBuf,
    #[educe(Default(expression = "uploads".to_owned()))]
    pub transport_prefix: String,
}
