//! Input descriptors: validation schemas and the enum catalog.
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::rules::{RuleList, Scalar};

/// One named validation schema: field path → rule list, in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDescriptor {
    pub name: String,
    #[serde(default)]
    pub rules: IndexMap<String, RuleList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumDescriptor {
    pub name: String,
    #[serde(default)]
    pub values: Vec<Scalar>,
}

/// A schema document as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub schemas: Vec<SchemaDescriptor>,
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
}

/// Fully-qualified enum name → declared values, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct EnumCatalog {
    enums: IndexMap<String, Vec<String>>,
}

impl EnumCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.enums.insert(name.into(), values);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.enums.get(name).map(Vec::as_slice)
    }
}

impl SchemaDocument {
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        crate::path_de::from_str_with_path(&source, &path.to_string_lossy())
    }

    /// Concatenate schemas and merge enum catalogs; later enum definitions
    /// replace earlier ones with the same name.
    pub fn merge(&mut self, other: SchemaDocument) {
        self.schemas.extend(other.schemas);
        self.enums.extend(other.enums);
    }

    pub fn catalog(&self) -> EnumCatalog {
        let mut catalog = EnumCatalog::new();
        for descriptor in &self.enums {
            let values = descriptor.values.iter().map(Scalar::to_string).collect();
            catalog.insert(descriptor.name.clone(), values);
        }
        catalog
    }

    /// Drop schemas whose name appears in `exclude`.
    pub fn exclude(&mut self, exclude: &[String]) {
        self.schemas.retain(|schema| {
            let keep = !exclude.contains(&schema.name);
            if !keep {
                log::debug!("excluding schema {}", schema.name);
            }
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> SchemaDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rules_keep_declaration_order() {
        let doc = document(json!({
            "schemas": [{ "name": "A", "rules": { "zeta": "string", "alpha": "integer", "mid": "boolean" } }]
        }));
        let keys: Vec<_> = doc.schemas[0].rules.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn catalog_merges_with_later_definitions_winning() {
        let mut doc = document(json!({
            "enums": [{ "name": "App\\Enums\\Status", "values": ["active", "inactive"] }]
        }));
        doc.merge(document(json!({
            "enums": [
                { "name": "App\\Enums\\Status", "values": ["draft"] },
                { "name": "App\\Enums\\Level", "values": [1, 2] }
            ]
        })));
        let catalog = doc.catalog();
        assert_eq!(catalog.values("App\\Enums\\Status"), Some(&["draft".to_string()][..]));
        assert_eq!(catalog.values("App\\Enums\\Level"), Some(&["1".to_string(), "2".to_string()][..]));
        assert!(!catalog.contains("App\\Enums\\Missing"));
    }

    #[test]
    fn exclude_drops_named_schemas() {
        let mut doc = document(json!({
            "schemas": [{ "name": "Keep" }, { "name": "Skip" }]
        }));
        doc.exclude(&["Skip".to_string()]);
        assert_eq!(doc.schemas.len(), 1);
        assert_eq!(doc.schemas[0].name, "Keep");
    }
}
