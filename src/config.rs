//! Resolved generator configuration.
//!
//! ```json
//! {
//!   "output-file-path": "resources/js/formRequests.ts",
//!   "front-end-provider": "react",
//!   "custom-mappings": { "App\\Rules\\Slug": "string", "binary": "Blob" },
//!   "exclude": ["App\\Http\\Requests\\InternalRequest"]
//! }
//! ```
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::provider::FrontEndProvider;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub output_file_path: PathBuf,
    pub front_end_provider: String,
    /// token or rule discriminator → type emitted verbatim
    #[serde(alias = "custom_mappings")]
    pub custom_mappings: IndexMap<String, String>,
    /// schema names to skip
    pub exclude: Vec<String>,
    /// stripped from schema names before deriving type names
    pub namespace_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file_path: PathBuf::from("resources/js/formRequests.ts"),
            front_end_provider: "vue".to_string(),
            custom_mappings: IndexMap::new(),
            exclude: Vec::new(),
            namespace_prefix: "App\\Http\\Requests\\".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        crate::path_de::from_str_with_path(&source, &path.to_string_lossy())
    }

    pub fn provider(&self) -> Result<FrontEndProvider> {
        self.front_end_provider.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: Config = serde_json::from_str(r#"{ "front-end-provider": "react" }"#).unwrap();
        assert_eq!(config.provider().unwrap(), FrontEndProvider::React);
        assert_eq!(config.output_file_path, PathBuf::from("resources/js/formRequests.ts"));
        assert_eq!(config.namespace_prefix, "App\\Http\\Requests\\");
        assert!(config.custom_mappings.is_empty());
    }

    #[test]
    fn custom_mappings_keep_order_and_accept_snake_case() {
        let config: Config = serde_json::from_str(
            r#"{ "custom_mappings": { "year": "string", "binary": "Blob" } }"#,
        )
        .unwrap();
        let keys: Vec<_> = config.custom_mappings.keys().cloned().collect();
        assert_eq!(keys, vec!["year", "binary"]);
    }

    #[test]
    fn bad_provider_is_reported_by_name() {
        let config = Config { front_end_provider: "angular".into(), ..Config::default() };
        assert!(matches!(config.provider(), Err(Error::UnknownProvider(p)) if p == "angular"));
    }
}
