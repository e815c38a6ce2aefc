//! Load, build and emit in one call, plus atomic output writing.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_yaml::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::{EmptyPolicy, GeneratorConfig};
use crate::emit::{Emit, ExtraPropertiesHeader, WriteFruHeader};
use crate::error::{GenError, Result};
use crate::loader::load_description;
use crate::model::{build_extra_model, build_model};

/// Render the `writeFru` header for the configured input.
pub fn generate_writefru(config: &GeneratorConfig) -> Result<String> {
    let tree = load_description(&config.writefru.input)?;
    render_writefru(&tree, &config.namespace, config.empty_policy)
}

/// Render the `writeFru` header from an already loaded description.
pub fn render_writefru(tree: &Value, namespace: &[String], policy: EmptyPolicy) -> Result<String> {
    let frus = build_model(tree, policy)?;
    info!(
        frus = frus.len(),
        properties = frus.iter().map(|f| f.property_count()).sum::<usize>(),
        "Built FRU model."
    );
    Ok(WriteFruHeader::new(&frus, namespace).emit())
}

/// Render the extra-properties header for the configured input.
pub fn generate_extra_properties(config: &GeneratorConfig) -> Result<String> {
    let tree = load_description(&config.extra_properties.input)?;
    render_extra_properties(&tree, &config.namespace, config.empty_policy)
}

/// Render the extra-properties header from an already loaded description.
pub fn render_extra_properties(
    tree: &Value,
    namespace: &[String],
    policy: EmptyPolicy,
) -> Result<String> {
    let objects = build_extra_model(tree, policy)?;
    info!(objects = objects.len(), "Built extra-properties model.");
    Ok(ExtraPropertiesHeader::new(&objects, namespace).emit())
}

/// Write `contents` to `path` through a temp file in the same directory and a
/// rename, so the destination only ever holds a complete header. The temp file
/// is removed on every failure path.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(write_error(parent))?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error(dir))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(write_error(tmp.path()))?;
    set_header_permissions(&tmp)?;
    tmp.persist(path).map_err(|err| GenError::Write {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    debug!(path = %path.display(), len = contents.len(), "Wrote generated header.");
    Ok(())
}

/// Temp files are created owner-only; headers should be readable like any
/// other source file.
#[cfg(unix)]
fn set_header_permissions(tmp: &NamedTempFile) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
        .map_err(write_error(tmp.path()))
}

#[cfg(not(unix))]
fn set_header_permissions(_tmp: &NamedTempFile) -> Result<()> {
    Ok(())
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> GenError {
    let path = path.to_path_buf();
    move |source| GenError::Write { path, source }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::loader::parse_description;
    use tempfile::TempDir;

    fn namespace() -> Vec<String> {
        vec!["openpower".into(), "vpd".into(), "inventory".into()]
    }

    #[test]
    fn test_render_counts_match_model() {
        let tree = parse_description(
            r#"{"BMC": {"a.X": {"P1": "VINI,PN", "P2": "VINI,SN"}, "a.Y": {"P3": "VSYS,TM"}},
                "PowerSupply": {"xyz.openbmc.Asset": {"PartNumber": "VINI,PN"}}}"#,
            "test",
        )
        .unwrap();
        let code = render_writefru(&tree, &namespace(), EmptyPolicy::Reject).unwrap();
        assert_eq!(code.matches("template <>").count(), 2);
        assert_eq!(code.matches("vpdStore.get<").count(), 4);
        assert_eq!(code.matches("object.emplace(").count(), 3);
    }

    #[test]
    fn test_render_rejects_before_emitting() {
        let tree = parse_description("BMC:\n  a.X:\n    P: VINI\n", "test").unwrap();
        let err = render_writefru(&tree, &namespace(), EmptyPolicy::Reject).unwrap_err();
        assert!(matches!(err, GenError::MalformedReference { .. }));
    }

    #[test]
    fn test_generate_writefru_from_config() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("writefru.yaml");
        fs::write(&input, "Empty: {}\n").unwrap();

        let mut config = GeneratorConfig::default();
        config.writefru.input = input;
        let code = generate_writefru(&config).unwrap();
        assert!(code.contains("inline void writeFru<Fru::Empty>("));
    }

    #[test]
    fn test_generate_missing_input() {
        let dir = TempDir::new().unwrap();
        let mut config = GeneratorConfig::default();
        config.extra_properties.input = dir.path().join("missing.yaml");
        assert!(matches!(
            generate_extra_properties(&config),
            Err(GenError::Load { .. })
        ));
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_output_creates_parent_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gen").join("writefru.hpp");

        write_output(&path, "first").unwrap();
        write_output(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(dir_entries(&dir.path().join("gen")), vec!["writefru.hpp"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("writefru.hpp");
        write_output(&path, "x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_write_output_into_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = write_output(&blocker.join("writefru.hpp"), "x").unwrap_err();
        assert!(matches!(err, GenError::Write { .. }));
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        // A directory at the destination makes the final rename fail.
        let path = dir.path().join("writefru.hpp");
        fs::create_dir(&path).unwrap();

        let err = write_output(&path, "x").unwrap_err();
        assert!(matches!(err, GenError::Write { path: ref failed, .. } if failed == &path));
        assert_eq!(dir_entries(dir.path()), vec!["writefru.hpp"]);
        assert!(path.is_dir());
    }
}
