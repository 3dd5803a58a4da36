//! Keyword categories over a rule list.
//!
//! A list belongs to a category when any keyword token is exactly one of the
//! category's keywords, or is that keyword with a `:param` suffix. Rule
//! objects never match here; they are dispatched by the type mapper.
use std::collections::BTreeSet;

use crate::rules::{RuleList, RuleToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    AlphaNumeric,
    Numeric,
    StringLike,
    Boolean,
    File,
    Array,
    Nullable,
    Required,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::AlphaNumeric,
        Category::Numeric,
        Category::StringLike,
        Category::Boolean,
        Category::File,
        Category::Array,
        Category::Nullable,
        Category::Required,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::AlphaNumeric => &["alpha_num"],
            Category::Numeric => &["integer", "numeric", "int", "float"],
            Category::StringLike => &["string", "email", "url", "date_format", "date"],
            Category::Boolean => &["boolean", "bool", "accepted", "declined"],
            Category::File => &["file", "image"],
            Category::Array => &["array"],
            Category::Nullable => &["nullable"],
            Category::Required => &["required"],
        }
    }
}

/// Does any keyword token of `rules` name one of `keywords`?
pub fn matches(rules: &RuleList, keywords: &[&str]) -> bool {
    rules.iter().any(|token| match token {
        // `name:param` matches `name`; parsing already split at the colon
        RuleToken::Keyword { name, .. } => keywords.contains(&name.as_str()),
        _ => false,
    })
}

pub fn is(rules: &RuleList, category: Category) -> bool {
    matches(rules, category.keywords())
}

pub fn classify(rules: &RuleList) -> BTreeSet<Category> {
    Category::ALL
        .into_iter()
        .filter(|category| is(rules, *category))
        .collect()
}
