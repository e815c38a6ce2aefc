//! Generator configuration.
//!
//! Values come from three layers, lowest priority first: built-in defaults,
//! an optional TOML file, and command-line flags applied by the caller.
//!
//! ```toml
//! namespace = ["openpower", "vpd", "inventory"]
//! lenient = false
//!
//! [writefru]
//! input = "writefru.yaml"
//! output = "writefru.hpp"
//!
//! [extra_properties]
//! input = "extra-properties.yaml"
//! output = "extra-properties.hpp"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GenError, Result};
use crate::model::ident::{is_valid_identifier, reserved_reason};

/// Default description file for the accessor generator.
pub const DEFAULT_WRITEFRU_INPUT: &str = "writefru.yaml";
/// Default header produced by the accessor generator.
pub const DEFAULT_WRITEFRU_OUTPUT: &str = "writefru.hpp";
/// Default description file for the extra-properties generator.
pub const DEFAULT_EXTRA_INPUT: &str = "extra-properties.yaml";
/// Default header produced by the extra-properties generator.
pub const DEFAULT_EXTRA_OUTPUT: &str = "extra-properties.hpp";

/// Namespace the generated code lives in unless configured otherwise.
pub const DEFAULT_NAMESPACE: [&str; 3] = ["openpower", "vpd", "inventory"];

/// How the model builders treat empty names and values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Empty names and values are input errors.
    #[default]
    Reject,
    /// Entries with an empty name or value are dropped with a warning.
    Skip,
}

impl EmptyPolicy {
    /// Map the `lenient` switch onto a policy.
    pub fn from_lenient(lenient: bool) -> Self {
        if lenient { Self::Skip } else { Self::Reject }
    }
}

/// Input and output locations of one generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Description document to read.
    pub input: PathBuf,
    /// Header to write.
    pub output: PathBuf,
}

impl Paths {
    fn new(input: &str, output: &str) -> Self {
        Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }
    }
}

/// Fully resolved configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Accessor generator paths.
    pub writefru: Paths,
    /// Extra-properties generator paths.
    pub extra_properties: Paths,
    /// Namespace segments wrapping the generated code.
    pub namespace: Vec<String>,
    /// Empty-entry handling for both builders.
    pub empty_policy: EmptyPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            writefru: Paths::new(DEFAULT_WRITEFRU_INPUT, DEFAULT_WRITEFRU_OUTPUT),
            extra_properties: Paths::new(DEFAULT_EXTRA_INPUT, DEFAULT_EXTRA_OUTPUT),
            namespace: DEFAULT_NAMESPACE.iter().map(|s| (*s).to_string()).collect(),
            empty_policy: EmptyPolicy::Reject,
        }
    }
}

/// On-disk form of the configuration; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    namespace: Option<Vec<String>>,
    lenient: Option<bool>,
    writefru: PathsFile,
    extra_properties: PathsFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PathsFile {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl PathsFile {
    fn apply(self, paths: &mut Paths) {
        if let Some(input) = self.input {
            paths.input = input;
        }
        if let Some(output) = self.output {
            paths.output = output;
        }
    }
}

impl GeneratorConfig {
    /// Load defaults overlaid with the TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| GenError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_toml(&contents).map_err(|message| GenError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let file: ConfigFile = toml::from_str(contents).map_err(|err| err.to_string())?;
        let mut config = Self::default();

        if let Some(namespace) = file.namespace {
            config.namespace = parse_namespace_segments(namespace)?;
        }
        if let Some(lenient) = file.lenient {
            config.empty_policy = EmptyPolicy::from_lenient(lenient);
        }
        file.writefru.apply(&mut config.writefru);
        file.extra_properties.apply(&mut config.extra_properties);

        Ok(config)
    }
}

/// Parse a `a::b::c` namespace string as accepted on the command line.
pub fn parse_namespace(spec: &str) -> Result<Vec<String>, String> {
    if spec.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_namespace_segments(spec.split("::").map(|s| s.trim().to_string()).collect())
}

fn parse_namespace_segments(segments: Vec<String>) -> Result<Vec<String>, String> {
    for segment in &segments {
        if !is_valid_identifier(segment) {
            return Err(format!("'{segment}' is not a valid namespace name"));
        }
        if let Some(reason) = reserved_reason(segment) {
            return Err(format!("namespace '{segment}' {reason}"));
        }
    }
    Ok(segments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.writefru.input, PathBuf::from("writefru.yaml"));
        assert_eq!(config.writefru.output, PathBuf::from("writefru.hpp"));
        assert_eq!(config.namespace, vec!["openpower", "vpd", "inventory"]);
        assert_eq!(config.empty_policy, EmptyPolicy::Reject);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = GeneratorConfig::from_toml(
            r#"
namespace = ["acme", "inventory"]
lenient = true

[writefru]
output = "gen/writefru.hpp"
"#,
        )
        .unwrap();
        assert_eq!(config.namespace, vec!["acme", "inventory"]);
        assert_eq!(config.empty_policy, EmptyPolicy::Skip);
        assert_eq!(config.writefru.input, PathBuf::from("writefru.yaml"));
        assert_eq!(config.writefru.output, PathBuf::from("gen/writefru.hpp"));
        assert_eq!(
            config.extra_properties.output,
            PathBuf::from("extra-properties.hpp")
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = GeneratorConfig::from_toml("outputPath = \"x.hpp\"").unwrap_err();
        assert!(err.contains("outputPath"), "unexpected message: {err}");
    }

    #[test]
    fn test_invalid_namespace_rejected() {
        assert!(GeneratorConfig::from_toml("namespace = [\"a.b\"]").is_err());
    }

    #[test]
    fn test_parse_namespace() {
        assert_eq!(
            parse_namespace("openpower::vpd").unwrap(),
            vec!["openpower", "vpd"]
        );
        assert!(parse_namespace("").unwrap().is_empty());
        assert!(parse_namespace("a::1b").is_err());
        assert!(parse_namespace("a::::b").is_err());
        assert_eq!(
            parse_namespace("openpower::namespace").unwrap_err(),
            "namespace 'namespace' is a C++ keyword"
        );
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = GeneratorConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, GenError::Config { .. }));
    }
}
