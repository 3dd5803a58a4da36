//! Schema → (type expression, initial value) driver.
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::Config;
use crate::emit::initial::InitialValueSynthesizer;
use crate::emit::ty::render_type;
use crate::mapping::{EnumRegistry, FieldType, TypeMapper};
use crate::schema::{EnumCatalog, SchemaDescriptor};
use crate::tree;

pub const FORM_SUFFIX: &str = "Form";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaResult {
    pub form_name: String,
    pub type_name: String,
    pub type_expression: String,
    pub initial_expression: String,
}

/// Per-field mapping of one schema, before nesting.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
}

pub struct SchemaTransformer<'a> {
    config: &'a Config,
    catalog: &'a EnumCatalog,
}

impl<'a> SchemaTransformer<'a> {
    pub fn new(config: &'a Config, catalog: &'a EnumCatalog) -> Self {
        Self { config, catalog }
    }

    /// One generator run. Schemas with nothing renderable yield no result.
    pub fn transform_all(&self, schemas: &[SchemaDescriptor]) -> Vec<SchemaResult> {
        let mut registry = EnumRegistry::new();
        schemas
            .iter()
            .filter_map(|schema| self.transform(schema, &mut registry))
            .collect()
    }

    pub fn transform(&self, schema: &SchemaDescriptor, registry: &mut EnumRegistry) -> Option<SchemaResult> {
        let fields = self.map_fields(schema, registry);
        let members = tree::build(&fields);
        if members.is_empty() {
            log::debug!("skipping {}: no renderable fields", schema.name);
            return None;
        }

        let type_name = type_name(&schema.name, &self.config.namespace_prefix);
        let synthesizer = InitialValueSynthesizer::new(registry, self.catalog);
        Some(SchemaResult {
            form_name: form_name(&type_name),
            type_expression: render_type(&members),
            initial_expression: synthesizer.synthesize(&members),
            type_name,
        })
    }

    /// Field path → mapped type, for the `inspect` view.
    pub fn report(&self, schemas: &[SchemaDescriptor]) -> IndexMap<String, IndexMap<String, FieldReport>> {
        let mut registry = EnumRegistry::new();
        schemas
            .iter()
            .map(|schema| {
                let fields = self
                    .map_fields(schema, &mut registry)
                    .into_iter()
                    .map(|(path, field)| (path, FieldReport { ty: field.expr, required: field.required }))
                    .collect();
                (schema.name.clone(), fields)
            })
            .collect()
    }

    fn map_fields(&self, schema: &SchemaDescriptor, registry: &mut EnumRegistry) -> IndexMap<String, FieldType> {
        let mapper = TypeMapper::new(&self.config.custom_mappings, self.catalog);
        schema
            .rules
            .iter()
            .map(|(path, rules)| {
                let field = mapper.map_field(rules, registry);
                log::debug!("{}: {path} → {}", schema.name, field.expr);
                (path.clone(), field)
            })
            .collect()
    }
}

/// Schema name without the namespace prefix and path separators.
pub fn type_name(schema_name: &str, namespace_prefix: &str) -> String {
    let name = if namespace_prefix.is_empty() {
        schema_name
    } else {
        schema_name.strip_prefix(namespace_prefix).unwrap_or(schema_name)
    };
    name.chars().filter(|c| !matches!(c, '\\' | '/')).collect()
}

/// `StoreUserRequest` → `storeUserRequestForm`.
pub fn form_name(type_name: &str) -> String {
    let studly: String = type_name
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    let mut chars = studly.chars();
    let camel: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{camel}{FORM_SUFFIX}")
}
