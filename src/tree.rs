//! Dotted field paths → nested tree.
//!
//! `"a.b"` nests `b` under `a`; a `*` segment marks the entry above it as
//! repeated and hoists the element shape found under `*` into that entry.
//! Members are kept in a `BTreeMap` so every level renders in key order.
use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::mapping::FieldType;

pub const WILDCARD: &str = "*";

pub type Members = BTreeMap<String, Entry>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTree {
    Leaf(FieldType),
    Node(Members),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// path had a `*` below this key; `value` is the element shape
    pub repeated: bool,
    pub nullable: bool,
    pub value: PathTree,
}

// ————————————————————————————————————————————————————————————————————————————
// BUILD
// ————————————————————————————————————————————————————————————————————————————

/// Nest and clean a flat `path → type` map. An empty result means the schema
/// has nothing renderable.
pub fn build(flat: &IndexMap<String, FieldType>) -> Members {
    let mut raw = RawNode::new();
    for (path, ty) in flat {
        let segments: Vec<&str> = path.split('.').collect();
        insert(&mut raw, &segments, ty.clone());
    }
    clean(raw)
}

type RawNode = BTreeMap<String, Raw>;

#[derive(Debug)]
enum Raw {
    Leaf(FieldType),
    Node(RawNode),
}

/// A nested structure always wins over a leaf at the same path, so `tags`
/// and `tags.*` nest the same way in either declaration order.
fn insert(node: &mut RawNode, segments: &[&str], ty: FieldType) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        if !matches!(node.get(*head), Some(Raw::Node(_))) {
            node.insert(head.to_string(), Raw::Leaf(ty));
        }
        return;
    }
    let slot = node
        .entry(head.to_string())
        .or_insert_with(|| Raw::Node(RawNode::new()));
    if let Raw::Leaf(_) = slot {
        *slot = Raw::Node(RawNode::new());
    }
    if let Raw::Node(child) = slot {
        insert(child, rest, ty);
    }
}

fn clean(raw: RawNode) -> Members {
    let mut out = Members::new();
    for (key, value) in raw {
        match value {
            Raw::Leaf(ty) => {
                if ty.is_unknown() {
                    log::debug!("dropping `{key}`: no inferable type");
                    continue;
                }
                let nullable = is_nullable(&ty.expr);
                out.insert(key, Entry { repeated: false, nullable, value: PathTree::Leaf(ty) });
            }
            Raw::Node(mut children) => {
                if let Some(element) = children.remove(WILDCARD) {
                    if !children.is_empty() {
                        log::debug!("`{key}` is repeated; ignoring sibling keys of `*`");
                    }
                    let value = match element {
                        Raw::Leaf(ty) => PathTree::Leaf(ty),
                        Raw::Node(shape) => PathTree::Node(clean(shape)),
                    };
                    out.insert(key, Entry { repeated: true, nullable: false, value });
                } else {
                    let members = clean(children);
                    if members.is_empty() {
                        continue;
                    }
                    out.insert(key, Entry { repeated: false, nullable: false, value: PathTree::Node(members) });
                }
            }
        }
    }
    out
}

pub fn is_nullable(expr: &str) -> bool {
    expr.contains("| null")
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
