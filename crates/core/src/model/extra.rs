//! Builds `ExtraObject`s from an extra-properties description.
//!
//! ```yaml
//! /system/chassis/motherboard:
//!   xyz.openbmc_project.Inventory.Item:
//!     Present: true
//!     PrettyName: System planar
//! ```

use serde_yaml::Value;
use tracing::{debug, warn};

use super::tree::{as_mapping, check_name, display_location, entries};
use super::{ExtraInterface, ExtraObject, ExtraProperty, Literal};
use crate::config::EmptyPolicy;
use crate::error::{GenError, Result};
use crate::loader::kind_of;

/// Build the extra-properties model from a loaded description tree.
pub fn build_extra_model(tree: &Value, policy: EmptyPolicy) -> Result<Vec<ExtraObject>> {
    let root = as_mapping(tree, &[], "mapping of object paths")?;
    let mut objects = Vec::new();

    for (path, interfaces) in entries(root, &[])? {
        if !check_name(path, "object path", &[path], policy)? {
            continue;
        }

        let map = as_mapping(interfaces, &[path], "mapping of interface names")?;
        let mut built = Vec::new();
        for (interface, properties) in entries(map, &[path])? {
            if !check_name(interface, "interface", &[path, interface], policy)? {
                continue;
            }
            built.push(build_interface(path, interface, properties, policy)?);
        }

        debug!(path, interfaces = built.len(), "Built extra object.");
        objects.push(ExtraObject {
            path: path.to_string(),
            interfaces: built,
        });
    }

    Ok(objects)
}

fn build_interface(
    path: &str,
    interface: &str,
    value: &Value,
    policy: EmptyPolicy,
) -> Result<ExtraInterface> {
    let map = as_mapping(value, &[path, interface], "mapping of property names")?;
    let mut properties = Vec::new();

    for (property, raw) in entries(map, &[path, interface])? {
        let location = [path, interface, property];
        if !check_name(property, "property", &location, policy)? {
            continue;
        }
        if raw.is_null() && policy == EmptyPolicy::Skip {
            warn!(location = %display_location(&location), "Skipping property without a value.");
            continue;
        }

        properties.push(ExtraProperty {
            name: property.to_string(),
            value: to_literal(raw, &location)?,
        });
    }

    Ok(ExtraInterface {
        name: interface.to_string(),
        properties,
    })
}

/// Scalars map onto the `bool`, `int64_t` and `std::string` alternatives of
/// the inventory value variant. Floats and integers outside `i64` have no
/// alternative to land in.
fn to_literal(value: &Value, location: &[&str]) -> Result<Literal> {
    match value {
        Value::Bool(b) => Ok(Literal::Bool(*b)),
        Value::String(s) => Ok(Literal::String(s.clone())),
        other => other
            .as_i64()
            .map(Literal::Int)
            .ok_or_else(|| GenError::SchemaShape {
                location: display_location(location),
                expected: "boolean, 64-bit signed integer or string",
                found: kind_of(other),
            }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::loader::parse_description;

    fn build(yaml: &str, policy: EmptyPolicy) -> Result<Vec<ExtraObject>> {
        build_extra_model(&parse_description(yaml, "test").unwrap(), policy)
    }

    #[test]
    fn test_build_literals() {
        let objects = build(
            "
/system/chassis/motherboard:
  xyz.openbmc_project.Inventory.Item:
    Present: true
    PrettyName: System planar
    Slot: 3
    Offset: -7
",
            EmptyPolicy::Reject,
        )
        .unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].path, "/system/chassis/motherboard");
        let values: Vec<_> = objects[0].interfaces[0]
            .properties
            .iter()
            .map(|p| p.value.clone())
            .collect();
        assert_eq!(
            values,
            vec![
                Literal::Bool(true),
                Literal::String("System planar".into()),
                Literal::Int(3),
                Literal::Int(-7),
            ]
        );
    }

    #[test]
    fn test_nested_value_rejected() {
        let err = build("/a:\n  x.Y:\n    List: [1, 2]\n", EmptyPolicy::Reject).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected shape at /a/x.Y/List: expected boolean, 64-bit signed integer or string, found sequence"
        );
    }

    #[test]
    fn test_numbers_without_int64_form_rejected() {
        for raw in ["0.5", "18446744073709551615", ".nan"] {
            let yaml = format!("/a:\n  x.Y:\n    Value: {raw}\n");
            let err = build(&yaml, EmptyPolicy::Reject).unwrap_err();
            assert!(
                matches!(err, GenError::SchemaShape { ref location, .. } if location == "/a/x.Y/Value"),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn test_null_value_policy() {
        assert!(build("/a:\n  x.Y:\n    Missing:\n", EmptyPolicy::Reject).is_err());
        let objects = build("/a:\n  x.Y:\n    Missing:\n", EmptyPolicy::Skip).unwrap();
        assert!(objects[0].interfaces[0].properties.is_empty());
    }

    #[test]
    fn test_empty_object_is_valid() {
        let objects = build("/a:\n", EmptyPolicy::Reject).unwrap();
        assert!(objects[0].interfaces.is_empty());
    }
}
