//! Builds `FruDescription`s from the loaded accessor description.
//!
//! Expected shape:
//!
//! ```yaml
//! BMC:
//!   xyz.openbmc_project.Inventory.Decorator.Asset:
//!     PartNumber: VINI,PN
//!     SerialNumber: VINI,SN
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_yaml::Value;
use tracing::{debug, warn};

use super::ident::{derive_identifier, is_reserved, is_valid_identifier, reserved_reason};
use super::tree::{as_mapping, check_name, display_location, entries};
use super::{FruDescription, InterfaceBlock, PropertyBinding, ValueReference};
use crate::config::EmptyPolicy;
use crate::error::{GenError, Result};
use crate::loader::kind_of;

/// Build the FRU model from a loaded description tree.
///
/// FRUs, interfaces and properties keep document order. Every check is local
/// to one FRU, so reordering the document never changes whether the build
/// succeeds.
pub fn build_model(tree: &Value, policy: EmptyPolicy) -> Result<Vec<FruDescription>> {
    let root = as_mapping(tree, &[], "mapping of FRU names")?;
    let mut frus = Vec::new();

    for (fru_name, interfaces) in entries(root, &[])? {
        if !check_name(fru_name, "FRU", &[fru_name], policy)? {
            continue;
        }
        if !is_valid_identifier(fru_name) {
            return Err(GenError::InvalidName {
                location: display_location(&[fru_name]),
                name: fru_name.to_string(),
                reason: "FRU names become Fru:: enumerators and must be C++ identifiers"
                    .to_string(),
            });
        }
        if let Some(reason) = reserved_reason(fru_name) {
            return Err(GenError::InvalidName {
                location: display_location(&[fru_name]),
                name: fru_name.to_string(),
                reason: format!("FRU name {reason}"),
            });
        }

        let fru = build_fru(fru_name, interfaces, policy)?;
        debug!(
            fru = %fru.name,
            interfaces = fru.interfaces.len(),
            properties = fru.property_count(),
            "Built FRU."
        );
        frus.push(fru);
    }

    Ok(frus)
}

fn build_fru(name: &str, value: &Value, policy: EmptyPolicy) -> Result<FruDescription> {
    let map = as_mapping(value, &[name], "mapping of interface names")?;
    let mut interfaces = Vec::new();
    // identifier -> interface that claimed it
    let mut claimed: HashMap<String, String> = HashMap::new();

    for (interface, properties) in entries(map, &[name])? {
        if !check_name(interface, "interface", &[name, interface], policy)? {
            continue;
        }

        let block = build_interface(name, interface, properties, policy)?;

        if is_reserved(&block.identifier) {
            return Err(GenError::ReservedIdentifier {
                fru: name.to_string(),
                interface: interface.to_string(),
                identifier: block.identifier,
            });
        }

        match claimed.entry(block.identifier.clone()) {
            Entry::Occupied(entry) => {
                return Err(GenError::IdentifierCollision {
                    fru: name.to_string(),
                    identifier: block.identifier,
                    first: entry.get().clone(),
                    second: interface.to_string(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(interface.to_string());
            }
        }

        interfaces.push(block);
    }

    Ok(FruDescription {
        name: name.to_string(),
        interfaces,
    })
}

fn build_interface(
    fru: &str,
    interface: &str,
    value: &Value,
    policy: EmptyPolicy,
) -> Result<InterfaceBlock> {
    let map = as_mapping(value, &[fru, interface], "mapping of property names")?;
    let mut properties = Vec::new();

    for (property, raw) in entries(map, &[fru, interface])? {
        let path = [fru, interface, property];
        if !check_name(property, "property", &path, policy)? {
            continue;
        }

        let raw = match raw {
            Value::String(raw) => raw.as_str(),
            Value::Null if policy == EmptyPolicy::Skip => {
                warn!(location = %display_location(&path), "Skipping property without a value.");
                continue;
            }
            other => {
                return Err(GenError::SchemaShape {
                    location: display_location(&path),
                    expected: "\"record,keyword\" string",
                    found: kind_of(other),
                });
            }
        };

        if raw.trim().is_empty() && policy == EmptyPolicy::Skip {
            warn!(location = %display_location(&path), "Skipping property without a value.");
            continue;
        }

        let reference: ValueReference =
            raw.parse()
                .map_err(|reason| GenError::MalformedReference {
                    fru: fru.to_string(),
                    interface: interface.to_string(),
                    property: property.to_string(),
                    raw: raw.to_string(),
                    reason,
                })?;

        properties.push(PropertyBinding {
            name: property.to_string(),
            reference,
        });
    }

    Ok(InterfaceBlock {
        name: interface.to_string(),
        identifier: derive_identifier(interface),
        properties,
    })
}
