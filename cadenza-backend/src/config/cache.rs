use std::time::Duration;

use educe::Educe;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Educe)]
#[educe(Default)]
pub struct Cache {
    // seconds
    #[educe(Default(expression = 600))]
    pub decode_ttl: u64,
}

impl Cache {
    pub fn decode_ttl(&self) -> Duration {
        Duration::from_secs(self.decode_ttl)
    }
}
