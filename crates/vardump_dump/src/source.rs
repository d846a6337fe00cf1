//! Callable source extraction.
//!
//! A callable is shown as its declaration source, exactly as written, except
//! that type names in its parameter list are rewritten to their
//! fully-qualified form using the declaring scope's import table. Names that
//! cannot be resolved are kept as written; extraction never fails.

use vardump_foundation::{Closure, ImportScope};

/// Words that may precede a parameter's type but are not types themselves.
const MODIFIERS: &[&str] = &["public", "protected", "private", "readonly"];

/// Type keywords that are never qualified.
const BUILTIN_TYPES: &[&str] = &[
    "array", "bool", "callable", "false", "float", "int", "iterable", "mixed", "never", "null",
    "object", "parent", "self", "static", "string", "true", "void",
];

/// Returns the declaration source of a callable with parameter types
/// fully qualified.
#[must_use]
pub fn extract_source(closure: &Closure) -> String {
    qualify_parameters(closure.source(), closure.scope())
}

/// Rewrites type names in the first parenthesised group of `source`.
#[must_use]
pub fn qualify_parameters(source: &str, scope: &ImportScope) -> String {
    if scope.is_empty() && scope.namespace.is_none() {
        return source.to_string();
    }
    let Some((open, close)) = parameter_span(source) else {
        return source.to_string();
    };

    let params = &source[open + 1..close];
    let mut out = String::with_capacity(source.len() + 32);
    out.push_str(&source[..=open]);
    for (i, param) in split_top_level(params, b',').into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&qualify_parameter(param, scope));
    }
    out.push_str(&source[close..]);
    out
}

/// Byte offsets of the first `(` and its matching `)`.
fn parameter_span(source: &str) -> Option<(usize, usize)> {
    let open = source.find('(')?;
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    for (i, &b) in source.as_bytes().iter().enumerate().skip(open) {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'\'' | b'"' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some((open, i));
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits on `sep` outside brackets and string literals.
fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    let mut start = 0;
    for (i, &b) in text.as_bytes().iter().enumerate() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'\'' | b'"' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ if b == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Qualifies the type part of one parameter, leaving its name and default
/// value untouched.
fn qualify_parameter(param: &str, scope: &ImportScope) -> String {
    // Everything from the first top-level `=` on is the default value.
    let head_len = split_top_level(param, b'=')[0].len();
    let (head, default) = param.split_at(head_len);

    // The last word of the head is the parameter name.
    let trimmed = head.trim_end();
    let type_end = trimmed
        .rfind(|c: char| c.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    let (types, name) = head.split_at(type_end);

    let mut out = String::with_capacity(param.len() + 32);
    let mut rest = types;
    while let Some(start) = rest.find(is_name_start) {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let len = tail.find(|c: char| !is_name_char(c)).unwrap_or(tail.len());
        out.push_str(&resolve_type(&tail[..len], scope));
        rest = &tail[len..];
    }
    out.push_str(rest);
    out.push_str(name);
    out.push_str(default);
    out
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '\\'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\\'
}

/// Resolves one type name against the import table, then the declaring
/// namespace.
fn resolve_type(name: &str, scope: &ImportScope) -> String {
    if name.starts_with('\\')
        || MODIFIERS.contains(&name)
        || BUILTIN_TYPES.contains(&name.to_ascii_lowercase().as_str())
    {
        return name.to_string();
    }
    let first = name.split('\\').next().unwrap_or(name);
    match (scope.resolve(first), scope.namespace.as_deref()) {
        (Some(target), _) => format!("\\{target}{}", &name[first.len()..]),
        (None, Some(namespace)) => format!("\\{namespace}\\{name}"),
        (None, None) => name.to_string(),
    }
}
