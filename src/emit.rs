//! Text emitters over a [`PathTree`](crate::tree::PathTree): the initial form
//! value and the matching object type.
pub mod initial;
pub mod ty;

use std::borrow::Cow;

use crate::mapping::UNKNOWN;

pub const INDENT: &str = "  ";

/// Keys with a space or `-` are not valid bare identifiers.
pub fn quote_key(key: &str) -> Cow<'_, str> {
    if key.contains(' ') || key.contains('-') {
        Cow::Owned(format!("\"{key}\""))
    } else {
        Cow::Borrowed(key)
    }
}

/// Type used in `as ...` assertions and in the emitted type: the leaf type
/// widened with `undefined`, wrapped in `Array<...>` for repeated leaves.
/// `None` for the unknown sentinel.
pub fn widened_type(expr: &str, repeated: bool) -> Option<String> {
    let expr = expr.trim_end_matches(';');
    if expr == UNKNOWN {
        return None;
    }
    let widened = format!("{expr} | undefined");
    Some(if repeated { format!("Array<{widened}>") } else { widened })
}
