//! Shape checks shared by the model builders.

use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::config::EmptyPolicy;
use crate::error::{GenError, Result, location};
use crate::loader::kind_of;

/// View `value` as a mapping. `null` counts as an empty mapping.
pub fn as_mapping<'a>(
    value: &'a Value,
    path: &[&str],
    expected: &'static str,
) -> Result<Option<&'a Mapping>> {
    match value {
        Value::Mapping(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(GenError::SchemaShape {
            location: display_location(path),
            expected,
            found: kind_of(other),
        }),
    }
}

/// Iterate a possibly-absent mapping as `(key, value)` pairs with string keys.
pub fn entries<'a>(
    map: Option<&'a Mapping>,
    path: &[&str],
) -> Result<Vec<(&'a str, &'a Value)>> {
    let Some(map) = map else {
        return Ok(Vec::new());
    };
    map.iter()
        .map(|(key, value)| match key {
            Value::String(name) => Ok((name.as_str(), value)),
            other => Err(GenError::SchemaShape {
                location: display_location(path),
                expected: "string key",
                found: kind_of(other),
            }),
        })
        .collect()
}

/// Apply the empty-name policy. Returns `false` when the entry must be skipped.
pub fn check_name(
    name: &str,
    kind: &'static str,
    path: &[&str],
    policy: EmptyPolicy,
) -> Result<bool> {
    if !name.trim().is_empty() {
        return Ok(true);
    }
    match policy {
        EmptyPolicy::Reject => Err(GenError::EmptyName {
            location: display_location(path),
            kind,
        }),
        EmptyPolicy::Skip => {
            warn!(
                location = %display_location(path),
                kind,
                "Skipping entry with empty name."
            );
            Ok(false)
        }
    }
}

/// Location string for error messages; the document root is `<root>`.
pub fn display_location(path: &[&str]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        location(path)
    }
}
