//! Placeholder substitution inside parameter values.
//!
//! Three token forms are recognized inside strings:
//!
//! - `%name%` — the value of another parameter,
//! - `%env(VAR)%` — the value of an environment variable,
//! - `%%` — a literal percent sign.
//!
//! A string consisting of exactly one `%name%` token resolves to the
//! referenced parameter's value with its type preserved; in every other
//! position the referenced value must be a scalar and is interpolated
//! into the surrounding text. Resolution is recursive with a fixed depth
//! limit so parameter chains work and reference cycles fail cleanly.

use std::collections::HashMap;
use std::env;

use serde_yaml::Value;

use crate::error::AllegroError;

// Deep enough for any sane parameter chain, small enough to fail fast
// on a cycle.
const MAX_DEPTH: usize = 32;

/// Returns whether `text` contains placeholder syntax worth resolving.
pub(crate) fn contains_placeholder(text: &str) -> bool {
    text.contains('%')
}

/// Resolves every placeholder in `value`, recursing into sequences and
/// mappings.
pub(crate) fn resolve_value(
    value: &Value,
    parameters: &HashMap<String, Value>,
    depth: usize,
) -> Result<Value, AllegroError> {
    if depth > MAX_DEPTH {
        return Err(AllegroError::initialization(
            "circular parameter reference detected while resolving placeholders",
            None,
        ));
    }
    match value {
        Value::String(text) if contains_placeholder(text) => {
            resolve_string(text, parameters, depth)
        }
        Value::Sequence(items) => {
            let resolved = items
                .iter()
                .map(|item| resolve_value(item, parameters, depth))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Sequence(resolved))
        }
        Value::Mapping(map) => {
            let mut resolved = serde_yaml::Mapping::with_capacity(map.len());
            for (key, item) in map {
                resolved.insert(key.clone(), resolve_value(item, parameters, depth)?);
            }
            Ok(Value::Mapping(resolved))
        }
        other => Ok(other.clone()),
    }
}

fn resolve_string(
    text: &str,
    parameters: &HashMap<String, Value>,
    depth: usize,
) -> Result<Value, AllegroError> {
    // A lone `%name%` token preserves the referenced value's type.
    if let Some(token) = single_token(text) {
        return resolve_token(token, parameters, depth);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        if let Some(tail) = after.strip_prefix('%') {
            out.push('%');
            rest = tail;
            continue;
        }
        let end = after.find('%').ok_or_else(|| {
            AllegroError::initialization(
                format!("unmatched '%' in value '{text}' (use '%%' for a literal percent sign)"),
                None,
            )
        })?;
        let token = &after[..end];
        let resolved = resolve_token(token, parameters, depth)?;
        out.push_str(&scalar_text(&resolved, token)?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(Value::String(out))
}

/// Returns the inner token when `text` is exactly one `%token%`.
fn single_token(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('%')?.strip_suffix('%')?;
    if inner.is_empty() || inner.contains('%') {
        return None;
    }
    Some(inner)
}

fn resolve_token(
    token: &str,
    parameters: &HashMap<String, Value>,
    depth: usize,
) -> Result<Value, AllegroError> {
    if let Some(var) = token.strip_prefix("env(").and_then(|t| t.strip_suffix(')')) {
        let value = env::var(var).map_err(|_| {
            AllegroError::initialization(
                format!("environment variable '{var}' referenced by a placeholder is not set"),
                None,
            )
        })?;
        return Ok(Value::String(value));
    }
    let value = parameters
        .get(token)
        .ok_or_else(|| AllegroError::UnknownParameter(token.to_string()))?;
    resolve_value(value, parameters, depth + 1)
}

/// Stringifies a resolved scalar for interpolation into surrounding text.
fn scalar_text(value: &Value, token: &str) -> Result<String, AllegroError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(AllegroError::initialization(
            format!("parameter '{token}' is not a scalar and cannot be interpolated into a string"),
            None,
        )),
    }
}
