pub mod cache;
pub mod capability;
pub mod log;
mod path;
pub mod storage;
pub mod transform;

use cadenza_api::constant;
pub use cache::Cache;
pub use capability::Capability;
use figment::Figment;
use figment::providers::{Env, Serialized};
pub use log::Log;
use serde::Deserialize;
pub use storage::Storage;
pub use transform::Transform;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub storage: Storage,
    pub cache: Cache,
    pub transform: Transform,
    pub capability: Capability,
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Figment::new()
            .merge(
                Env::prefixed(&concat_string::concat_string!(
                    constant::SERVER_NAME.to_uppercase(),
                    "_"
                ))
                .split("__"),
            )
            .join(Serialized::default("storage", Storage::default()))
            .join(Serialized::default("cache", Cache::default()))
            .join(Serialized::default("transform", Transform::default()))
            .join(Serialized::default("capability", Capability::default()))
            .join(Serialized::default("log", Log::default()))
            .extract()
            .expect("Could not parse config")
    }
}
