//! Description loader.
//!
//! Reads a description document into a `serde_yaml::Value` tree. JSON input
//! works too since YAML is a superset of it. Mapping order is preserved, so
//! everything downstream sees entries in document order.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{GenError, Result};

/// Read and parse the description at `path`.
pub fn load_description(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|source| GenError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        len = contents.len(),
        "Loaded description document."
    );

    parse_description(&contents, &path.display().to_string())
}

/// Parse description text. `origin` labels the text in error messages.
pub fn parse_description(contents: &str, origin: &str) -> Result<Value> {
    serde_yaml::from_str(contents).map_err(|err| GenError::Parse {
        origin: origin.to_string(),
        message: err.to_string(),
    })
}

/// Short human-readable name of a value's kind, for shape errors.
pub(crate) fn kind_of(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string '{s}'"),
        Value::Sequence(_) => "sequence".to_string(),
        Value::Mapping(_) => "mapping".to_string(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_preserves_order() {
        let value = parse_description("Zeta: {}\nAlpha: {}\nMid: {}\n", "inline").unwrap();
        let keys: Vec<_> = value
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_parse_json_input() {
        let value = parse_description(
            r#"{"PowerSupply": {"xyz.openbmc.Asset": {"PartNumber": "VINI,PN"}}}"#,
            "inline",
        )
        .unwrap();
        assert!(value.get("PowerSupply").is_some());
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = parse_description("BMC: [unclosed", "writefru.yaml").unwrap_err();
        match err {
            GenError::Parse { origin, .. } => assert_eq!(origin, "writefru.yaml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = parse_description("BMC: {}\nBMC: {}\n", "inline").unwrap_err();
        assert!(matches!(err, GenError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_description(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, GenError::Load { .. }));
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of(&Value::Null), "null");
        assert_eq!(kind_of(&Value::String("x".into())), "string 'x'");
        assert_eq!(kind_of(&Value::Sequence(Vec::new())), "sequence");
    }
}
