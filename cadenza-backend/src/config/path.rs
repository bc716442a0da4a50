use ::serde::de::Error;
use ::serde::{Deserialize, Deserializer, Serializer};
use typed_path::Utf8PlatformPathBuf;

pub fn serialize<S>(path: &Utf8PlatformPathBuf, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(path.as_str())
}

/// Storage roots must be non-empty absolute paths.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Utf8PlatformPathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    let path = Utf8PlatformPathBuf::from(<String>::deserialize(deserializer)?);
    if path.is_absolute() {
        Ok(path)
    } else {
        let message = concat_string::concat_string!("path is not absolute: ", path.as_str());
        Err(D::Error::custom(message))
    }
}
