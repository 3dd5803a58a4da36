//! Rule list → type expression.
//!
//! Precedence, each step short-circuiting the ones after it:
//!
//! 1. custom mapping hit on any token (absolute, nothing else runs)
//! 2. first rule object decides (`Rule::in`, `Rule::enum`, `Rule::array`, or unknown)
//! 3. keyword categories (`in:` list, then alpha_num → numeric → string → boolean → file → array)
//! 4. `| null` suffix when `nullable` is present
//! 5. anything mentioning `unknown` outside a quoted literal collapses to `unknown`
use std::collections::BTreeMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::{self, Category};
use crate::rules::{RuleList, RuleToken};
use crate::schema::EnumCatalog;

pub const UNKNOWN: &str = "unknown";
pub const NULL_SUFFIX: &str = " | null";

static QUOTED_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"'(?:[^'\\]|\\.)*'").unwrap());
static UNKNOWN_TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bunknown\b").unwrap());

/// Dotted type name → fully-qualified enum name, filled while mapping and
/// read back when synthesizing defaults. One per generator run.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    entries: BTreeMap<String, String>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, type_name: String, enum_name: String) {
        self.entries.insert(type_name, enum_name);
    }

    pub fn resolve(&self, type_name: &str) -> Option<&str> {
        self.entries.get(type_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mapped shape of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub expr: String,
    pub required: bool,
}

impl FieldType {
    pub fn is_unknown(&self) -> bool {
        self.expr == UNKNOWN
    }
}

pub struct TypeMapper<'a> {
    overrides: &'a IndexMap<String, String>,
    catalog: &'a EnumCatalog,
}

impl<'a> TypeMapper<'a> {
    pub fn new(overrides: &'a IndexMap<String, String>, catalog: &'a EnumCatalog) -> Self {
        Self { overrides, catalog }
    }

    pub fn map_field(&self, rules: &RuleList, registry: &mut EnumRegistry) -> FieldType {
        FieldType {
            expr: self.map_type(rules, registry),
            required: is_required(rules),
        }
    }

    pub fn map_type(&self, rules: &RuleList, registry: &mut EnumRegistry) -> String {
        if let Some(overridden) = self.override_for(rules) {
            return overridden.to_string();
        }

        let mut ty = match self.class_based(rules, registry) {
            Some(ty) if ty != UNKNOWN => ty,
            _ => keyword_based(rules),
        };

        if classify::is(rules, Category::Nullable) {
            ty.push_str(NULL_SUFFIX);
        }

        if mentions_unknown(&ty) {
            return UNKNOWN.to_string();
        }

        ty.replace("null | null", "null")
    }

    /// First token (in rule order) present in the custom-mapping table.
    fn override_for(&self, rules: &RuleList) -> Option<&'a str> {
        let overrides = self.overrides;
        rules
            .iter()
            .find_map(|token| overrides.get(&token.lookup_key()))
            .map(String::as_str)
    }

    /// `None` when the list carries no rule object at all.
    fn class_based(&self, rules: &RuleList, registry: &mut EnumRegistry) -> Option<String> {
        let object = rules.iter().find(|token| token.is_object())?;
        Some(self.object_type(object, rules, registry))
    }

    fn object_type(&self, object: &RuleToken, rules: &RuleList, registry: &mut EnumRegistry) -> String {
        match object {
            RuleToken::OneOfList(_) if rules.has_numeric_tag() => "number".to_string(),
            RuleToken::OneOfList(values) => {
                literal_union(values.iter().map(String::as_str)).unwrap_or_else(|| "string".to_string())
            }
            RuleToken::Enum(reference) => match reference.as_deref() {
                Some(enum_name) if self.catalog.contains(enum_name) => {
                    let type_name = enum_name.replace('\\', ".");
                    registry.register(type_name.clone(), enum_name.to_string());
                    type_name
                }
                _ => "string".to_string(),
            },
            RuleToken::StructuredArray(keys) => {
                let members = keys
                    .iter()
                    .map(|key| format!("{}: {UNKNOWN}", key.trim()))
                    .collect::<Vec<_>>()
                    .join(";");
                format!("{{{members}}}")
            }
            RuleToken::RequiredIf
            | RuleToken::Unique
            | RuleToken::Dimensions
            | RuleToken::Callable
            | RuleToken::Opaque(_)
            | RuleToken::Keyword { .. } => UNKNOWN.to_string(),
        }
    }
}

pub fn is_required(rules: &RuleList) -> bool {
    classify::is(rules, Category::Required)
}

fn keyword_based(rules: &RuleList) -> String {
    let inclusion = rules.iter().find_map(|token| match token {
        RuleToken::Keyword { name, param: Some(csv) } if name == "in" => Some(csv.as_str()),
        _ => None,
    });
    if let Some(csv) = inclusion {
        if rules.has_numeric_tag() {
            return "number".to_string();
        }
        if csv.trim().is_empty() {
            return "string".to_string();
        }
        return literal_union(csv.split(',')).unwrap_or_else(|| "string".to_string());
    }

    let ty = if classify::is(rules, Category::AlphaNumeric) {
        "string | number"
    } else if classify::is(rules, Category::Numeric) {
        "number"
    } else if classify::is(rules, Category::StringLike) {
        "string"
    } else if classify::is(rules, Category::Boolean) {
        "boolean"
    } else if classify::is(rules, Category::File) {
        "File | null"
    } else if classify::is(rules, Category::Array) {
        "unknown[]"
    } else {
        UNKNOWN
    };
    ty.to_string()
}

/// Literal values (`'unknown'` included) never count as the sentinel.
fn mentions_unknown(ty: &str) -> bool {
    UNKNOWN_TERM.is_match(&QUOTED_LITERAL.replace_all(ty, "''"))
}

/// `'a' | 'b'`; empty values stay as `''`. `None` only for an empty list.
fn literal_union<'v>(values: impl Iterator<Item = &'v str>) -> Option<String> {
    let quoted: Vec<String> = values
        .map(str::trim)
        .map(|value| format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    if quoted.is_empty() { None } else { Some(quoted.join(" | ")) }
}
