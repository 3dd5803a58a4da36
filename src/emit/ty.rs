//! Object type matching the initial value, member for member.
//!
//! Leaf members use the same widened type as the initial value's `as`
//! assertion, so `initial satisfies Type` holds by construction.
use super::{quote_key, widened_type, INDENT};
use crate::mapping::UNKNOWN;
use crate::tree::{Entry, Members, PathTree};

pub fn render_type(members: &Members) -> String {
    object(members, "")
}

fn object(members: &Members, indent: &str) -> String {
    let inner = format!("{indent}{INDENT}");
    let mut out = String::from("{\n");
    for (key, entry) in members {
        let key = quote_key(key);
        let ty = member_type(entry, &inner);
        out.push_str(&format!("{inner}{key}: {ty};\n"));
    }
    out.push_str(indent);
    out.push('}');
    out
}

fn member_type(entry: &Entry, indent: &str) -> String {
    let ty = match &entry.value {
        PathTree::Leaf(ty) => match widened_type(&ty.expr, entry.repeated) {
            Some(widened) => return widened,
            None if entry.repeated => format!("{UNKNOWN}[]"),
            None => UNKNOWN.to_string(),
        },
        PathTree::Node(members) if entry.repeated => format!("Array<{}>", object(members, indent)),
        PathTree::Node(members) => object(members, indent),
    };
    if entry.nullable && !matches!(entry.value, PathTree::Leaf(_)) {
        format!("{ty} | null")
    } else {
        ty
    }
}
