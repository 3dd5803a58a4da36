use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Deserialize with JSON-path context in error messages.
///
/// `origin` names where the text came from (usually a file path) so that the
/// error reads `failed to decode config.json: at JSON path custom-mappings → ...`.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str, origin: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| Error::Decode {
        origin: origin.to_string(),
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}
