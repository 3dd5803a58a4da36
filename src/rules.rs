//! Rule tokens and rule lists as read from schema documents.
//!
//! A rule list arrives either as one pipe-delimited string (`"string|required"`)
//! or as an array mixing single keyword strings and tagged rule objects
//! (`{"rule": "Rule::enum", "type": "App\\Enums\\Status"}`). Both decode into
//! the same closed [`RuleToken`] set; nothing downstream inspects raw JSON.
use std::fmt;

use serde::Deserialize;

// ————————————————————————————————————————————————————————————————————————————
// DISCRIMINATORS
// ————————————————————————————————————————————————————————————————————————————

pub const IN_RULE: &str = "Rule::in";
pub const ENUM_RULE: &str = "Rule::enum";
pub const REQUIRED_IF_RULE: &str = "Rule::requiredIf";
pub const UNIQUE_RULE: &str = "Rule::unique";
pub const DIMENSIONS_RULE: &str = "Rule::dimensions";
pub const ARRAY_RULE: &str = "Rule::array";
pub const CLOSURE_RULE: &str = "Closure";
pub const OPAQUE_RULE: &str = "opaque";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleToken {
    /// `name` or `name:param`
    Keyword { name: String, param: Option<String> },
    /// inclusion list (`Rule::in([...])`)
    OneOfList(Vec<String>),
    /// enumerated-value rule; `None` when the backing type was not given
    Enum(Option<String>),
    RequiredIf,
    Unique,
    Dimensions,
    /// array rule declaring its permitted sub-keys
    StructuredArray(Vec<String>),
    Callable,
    /// any other rule object, carrying its discriminator
    Opaque(String),
}

/// Ordered rule tokens for one field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRuleList")]
pub struct RuleList(pub Vec<RuleToken>);

/// Scalar literal accepted where a validation rule lists values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Num(serde_json::Number),
    Bool(bool),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl RuleToken {
    /// Parse one keyword token, splitting at the first `:`.
    pub fn keyword(token: &str) -> Self {
        match token.split_once(':') {
            Some((name, param)) => RuleToken::Keyword {
                name: name.to_string(),
                param: Some(param.to_string()),
            },
            None => RuleToken::Keyword { name: token.to_string(), param: None },
        }
    }

    pub fn is_object(&self) -> bool {
        !matches!(self, RuleToken::Keyword { .. })
    }

    /// Bare keyword with no parameter, e.g. `numeric` but not `numeric:3`.
    pub fn is_bare(&self, keyword: &str) -> bool {
        matches!(self, RuleToken::Keyword { name, param: None } if name == keyword)
    }

    /// Key used to look the token up in the custom-mapping table: the full
    /// keyword text for keywords, the discriminator for rule objects.
    pub fn lookup_key(&self) -> String {
        match self {
            RuleToken::Keyword { .. } => self.to_string(),
            RuleToken::OneOfList(_) => IN_RULE.to_string(),
            RuleToken::Enum(_) => ENUM_RULE.to_string(),
            RuleToken::RequiredIf => REQUIRED_IF_RULE.to_string(),
            RuleToken::Unique => UNIQUE_RULE.to_string(),
            RuleToken::Dimensions => DIMENSIONS_RULE.to_string(),
            RuleToken::StructuredArray(_) => ARRAY_RULE.to_string(),
            RuleToken::Callable => CLOSURE_RULE.to_string(),
            RuleToken::Opaque(discriminator) => discriminator.clone(),
        }
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleToken::Keyword { name, param: Some(param) } => write!(f, "{name}:{param}"),
            RuleToken::Keyword { name, param: None } => f.write_str(name),
            RuleToken::OneOfList(values) => write!(f, "{IN_RULE}({})", values.join(",")),
            RuleToken::Enum(Some(ty)) => write!(f, "{ENUM_RULE}({ty})"),
            RuleToken::StructuredArray(keys) => write!(f, "{ARRAY_RULE}({})", keys.join(",")),
            other => f.write_str(&other.lookup_key()),
        }
    }
}

impl RuleList {
    /// Split a pipe-delimited rule string into keyword tokens.
    pub fn parse(rules: &str) -> Self {
        RuleList(
            rules
                .split('|')
                .filter(|token| !token.is_empty())
                .map(RuleToken::keyword)
                .collect(),
        )
    }

    pub fn tokens(&self) -> &[RuleToken] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleToken> {
        self.0.iter()
    }

    /// True when a bare `numeric` or `integer` keyword accompanies an
    /// inclusion list, which then types as `number`.
    pub fn has_numeric_tag(&self) -> bool {
        self.iter().any(|t| t.is_bare("numeric") || t.is_bare("integer"))
    }
}

impl FromIterator<RuleToken> for RuleList {
    fn from_iter<I: IntoIterator<Item = RuleToken>>(iter: I) -> Self {
        RuleList(iter.into_iter().collect())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Num(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// WIRE FORMAT
// ————————————————————————————————————————————————————————————————————————————

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRuleList {
    Piped(String),
    List(Vec<RawToken>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToken {
    Keyword(String),
    Object(RawObject),
}

#[derive(Deserialize)]
#[serde(tag = "rule")]
enum RawObject {
    #[serde(rename = "Rule::in")]
    In {
        #[serde(default)]
        values: Vec<Scalar>,
    },
    #[serde(rename = "Rule::enum")]
    Enum {
        #[serde(default, rename = "type")]
        type_: Option<String>,
    },
    #[serde(rename = "Rule::requiredIf")]
    RequiredIf {},
    #[serde(rename = "Rule::unique")]
    Unique {},
    #[serde(rename = "Rule::dimensions")]
    Dimensions {},
    #[serde(rename = "Rule::array")]
    Array {
        #[serde(default)]
        keys: Vec<String>,
    },
    #[serde(rename = "Closure")]
    Closure {},
    #[serde(rename = "custom")]
    Custom { class: String },
    #[serde(other)]
    Other,
}

impl From<RawRuleList> for RuleList {
    fn from(raw: RawRuleList) -> Self {
        match raw {
            RawRuleList::Piped(rules) => RuleList::parse(&rules),
            RawRuleList::List(tokens) => tokens.into_iter().map(RuleToken::from).collect(),
        }
    }
}

impl From<RawToken> for RuleToken {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Keyword(token) => RuleToken::keyword(&token),
            RawToken::Object(RawObject::In { values }) => {
                RuleToken::OneOfList(values.iter().map(Scalar::to_string).collect())
            }
            RawToken::Object(RawObject::Enum { type_ }) => RuleToken::Enum(type_),
            RawToken::Object(RawObject::RequiredIf {}) => RuleToken::RequiredIf,
            RawToken::Object(RawObject::Unique {}) => RuleToken::Unique,
            RawToken::Object(RawObject::Dimensions {}) => RuleToken::Dimensions,
            RawToken::Object(RawObject::Array { keys }) => RuleToken::StructuredArray(keys),
            RawToken::Object(RawObject::Closure {}) => RuleToken::Callable,
            RawToken::Object(RawObject::Custom { class }) => RuleToken::Opaque(class),
            RawToken::Object(RawObject::Other) => RuleToken::Opaque(OPAQUE_RULE.to_string()),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> RuleList {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn piped_string_splits_into_keywords() {
        let rules = decode(json!("string|required|max:255"));
        assert_eq!(rules.tokens().len(), 3);
        assert!(rules.tokens()[0].is_bare("string"));
        assert_eq!(
            rules.tokens()[2],
            RuleToken::Keyword { name: "max".into(), param: Some("255".into()) }
        );
    }

    #[test]
    fn array_items_are_not_split_on_pipes() {
        let rules = decode(json!(["regex:/a|b/", "nullable"]));
        assert_eq!(rules.tokens().len(), 2);
        assert_eq!(rules.tokens()[0].to_string(), "regex:/a|b/");
    }

    #[test]
    fn rule_objects_decode_by_tag() {
        let rules = decode(json!([
            { "rule": "Rule::in", "values": ["a", 2, true] },
            { "rule": "Rule::enum", "type": "App\\Enums\\Status" },
            { "rule": "Rule::unique", "table": "users" },
            { "rule": "Rule::array", "keys": ["x", "y"] },
            { "rule": "custom", "class": "App\\Rules\\Uppercase" },
            { "rule": "Something::else" },
        ]));
        assert_eq!(
            rules.0,
            vec![
                RuleToken::OneOfList(vec!["a".into(), "2".into(), "true".into()]),
                RuleToken::Enum(Some("App\\Enums\\Status".into())),
                RuleToken::Unique,
                RuleToken::StructuredArray(vec!["x".into(), "y".into()]),
                RuleToken::Opaque("App\\Rules\\Uppercase".into()),
                RuleToken::Opaque(OPAQUE_RULE.into()),
            ]
        );
    }

    #[test]
    fn lookup_keys() {
        assert_eq!(RuleToken::keyword("in:a,b").lookup_key(), "in:a,b");
        assert_eq!(RuleToken::Enum(None).lookup_key(), ENUM_RULE);
        assert_eq!(RuleToken::Opaque("App\\Rules\\X".into()).lookup_key(), "App\\Rules\\X");
    }
}
