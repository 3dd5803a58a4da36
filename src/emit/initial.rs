//! Initial form values.
//!
//! Repeated entries always start as `[]` (never recursed into); nullable
//! entries start as `null`. Leaves pick a literal from their type string and
//! carry an `as T | undefined` assertion.
use once_cell::sync::Lazy;
use regex::Regex;

use super::{quote_key, widened_type, INDENT};
use crate::mapping::{EnumRegistry, UNKNOWN};
use crate::schema::EnumCatalog;
use crate::tree::{Entry, Members, PathTree};

static ARRAY_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bArray<.*>(\[\])?|\bunknown\[\]").unwrap());
static LITERAL_UNION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^'(?:[^'\\]|\\.)*'(?:\s*\|\s*'(?:[^'\\]|\\.)*')+$").unwrap());
static LEADING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*('(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*")\s*\|"#).unwrap());
static FILE_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bFile\b").unwrap());
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").unwrap());

pub struct InitialValueSynthesizer<'a> {
    registry: &'a EnumRegistry,
    catalog: &'a EnumCatalog,
}

impl<'a> InitialValueSynthesizer<'a> {
    pub fn new(registry: &'a EnumRegistry, catalog: &'a EnumCatalog) -> Self {
        Self { registry, catalog }
    }

    pub fn synthesize(&self, members: &Members) -> String {
        let mut out = String::from("{\n");
        self.object_lines(members, INDENT, &mut out);
        out.push('}');
        out
    }

    fn object_lines(&self, members: &Members, indent: &str, out: &mut String) {
        for (key, entry) in members {
            let key = quote_key(key);
            let value = self.entry_value(entry, indent);
            out.push_str(&format!("{indent}{key}: {value},\n"));
        }
    }

    fn entry_value(&self, entry: &Entry, indent: &str) -> String {
        match &entry.value {
            PathTree::Node(_) if entry.repeated => {
                if entry.nullable { "null".to_string() } else { "[]".to_string() }
            }
            PathTree::Node(_) if entry.nullable => "null".to_string(),
            PathTree::Node(members) => {
                let mut body = String::from("{\n");
                self.object_lines(members, &format!("{indent}{INDENT}"), &mut body);
                body.push_str(indent);
                body.push('}');
                body
            }
            PathTree::Leaf(ty) => {
                let default = self.default_for(&ty.expr, entry.nullable, entry.repeated);
                match widened_type(&ty.expr, entry.repeated) {
                    Some(assertion) => format!("{default} as {assertion}"),
                    None => default,
                }
            }
        }
    }

    /// Default literal for one leaf type; first matching heuristic wins.
    pub fn default_for(&self, ty: &str, nullable: bool, array_of: bool) -> String {
        // leading quoted literal of a union
        if !array_of {
            if let Some(first) = LEADING_LITERAL.captures(ty).and_then(|caps| caps.get(1)) {
                return first.as_str().to_string();
            }
        }

        if !array_of && ty.contains('\'') {
            return ty.trim_matches(';').trim().to_string();
        }

        if !nullable && (array_of || ARRAY_TYPE.is_match(ty)) {
            return "[]".to_string();
        }

        if nullable {
            return "null".to_string();
        }

        let trimmed = ty.trim();
        if LITERAL_UNION.is_match(trimmed) {
            // don't guess among the options
            return "''".to_string();
        }

        if ty.contains("string") {
            return "''".to_string();
        }
        if ty.contains("number") {
            return "0".to_string();
        }
        if ty.contains("boolean") {
            return "false".to_string();
        }
        if FILE_TYPE.is_match(ty) {
            return "null".to_string();
        }
        if trimmed.trim_end_matches(';') == UNKNOWN {
            return "''".to_string();
        }

        let name = trimmed.trim_matches(';');
        if IDENTIFIER.is_match(name) {
            if let Some(first) = self.first_enum_value(name) {
                return first;
            }
        }

        "null".to_string()
    }

    /// First declared value of a registered enum, quoted; `null` when the
    /// enum declares none.
    fn first_enum_value(&self, type_name: &str) -> Option<String> {
        let enum_name = self.registry.resolve(type_name)?;
        let values = self.catalog.values(enum_name)?;
        Some(match values.first() {
            Some(value) => format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")),
            None => "null".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::FieldType;

    fn leaf(expr: &str, repeated: bool, nullable: bool) -> Entry {
        Entry {
            repeated,
            nullable,
            value: PathTree::Leaf(FieldType { expr: expr.to_string(), required: false }),
        }
    }

    fn with_synth<R>(f: impl FnOnce(&InitialValueSynthesizer<'_>) -> R) -> R {
        let mut registry = EnumRegistry::new();
        registry.register("App.Enums.Status".into(), "App\\Enums\\Status".into());
        registry.register("App.Enums.Empty".into(), "App\\Enums\\Empty".into());
        registry.register("App.Enums.Path".into(), "App\\Enums\\Path".into());
        let mut catalog = EnumCatalog::new();
        catalog.insert("App\\Enums\\Status", vec!["active".into(), "inactive".into()]);
        catalog.insert("App\\Enums\\Empty", vec![]);
        catalog.insert("App\\Enums\\Path", vec!["A\\B".into()]);
        f(&InitialValueSynthesizer::new(&registry, &catalog))
    }

    #[test]
    fn defaults_by_type() {
        with_synth(|s| {
            assert_eq!(s.default_for("'active' | 'inactive'", false, false), "'active'");
            assert_eq!(s.default_for("'only'", false, false), "'only'");
            assert_eq!(s.default_for("'' | 'a'", false, false), "''");
            assert_eq!(s.default_for("'a'[] | null", false, false), "'a'[] | null");
            assert_eq!(s.default_for("unknown[]", false, false), "[]");
            assert_eq!(s.default_for("string", false, true), "[]");
            assert_eq!(s.default_for("number | null", true, false), "null");
            assert_eq!(s.default_for("string | number", false, false), "''");
            assert_eq!(s.default_for("number", false, false), "0");
            assert_eq!(s.default_for("boolean", false, false), "false");
            assert_eq!(s.default_for("File", false, false), "null");
            assert_eq!(s.default_for("unknown", false, false), "''");
            assert_eq!(s.default_for("CustomStringType", false, false), "null");
        });
    }

    #[test]
    fn leading_literal_is_taken_whole() {
        with_synth(|s| {
            assert_eq!(s.default_for("'a|b' | 'c'", false, false), "'a|b'");
            assert_eq!(s.default_for("'it\\'s|x' | 'y'", false, false), "'it\\'s|x'");
            assert_eq!(s.default_for("\"x|y\" | \"z\"", false, false), "\"x|y\"");
            assert_eq!(s.default_for("'a|b' | 'c'", false, true), "[]");
        });
    }

    #[test]
    fn enum_defaults_use_first_declared_value() {
        with_synth(|s| {
            assert_eq!(s.default_for("App.Enums.Status", false, false), "'active'");
            assert_eq!(s.default_for("App.Enums.Empty", false, false), "null");
            assert_eq!(s.default_for("App.Enums.Path", false, false), "'A\\\\B'");
            assert_eq!(s.default_for("App.Enums.Status | null", true, false), "null");
        });
    }

    #[test]
    fn renders_sorted_nested_object_with_assertions() {
        let mut address = Members::new();
        address.insert("city".into(), leaf("string", false, false));
        let mut members = Members::new();
        members.insert("age".into(), leaf("number | null", false, true));
        members.insert("address".into(), Entry { repeated: false, nullable: false, value: PathTree::Node(address) });
        members.insert("tags".into(), leaf("string", true, false));
        members.insert("list".into(), leaf("unknown", true, false));
        members.insert("first-name".into(), leaf("string", false, false));

        let rendered = with_synth(|s| s.synthesize(&members));
        assert_eq!(
            rendered,
            concat!(
                "{\n",
                "  address: {\n",
                "    city: '' as string | undefined,\n",
                "  },\n",
                "  age: null as number | null | undefined,\n",
                "  \"first-name\": '' as string | undefined,\n",
                "  list: [],\n",
                "  tags: [] as Array<string | undefined>,\n",
                "}",
            )
        );
    }

    #[test]
    fn repeated_objects_are_not_recursed() {
        let mut shape = Members::new();
        shape.insert("name".into(), leaf("string", false, false));
        let mut members = Members::new();
        members.insert("items".into(), Entry { repeated: true, nullable: false, value: PathTree::Node(shape.clone()) });
        members.insert("extra".into(), Entry { repeated: false, nullable: true, value: PathTree::Node(shape) });
        let rendered = with_synth(|s| s.synthesize(&members));
        assert_eq!(rendered, "{\n  extra: null,\n  items: [],\n}");
    }
}
