//! Validated intermediate model.
//!
//! The builders in this module are the only place that knows what shape the
//! loaded description must have. Everything they return has already been
//! checked, so the emitters can render it without further validation.
//!
//! ## Module Structure
//!
//! - `fru`: description tree -> `FruDescription` list
//! - `extra`: extra-properties tree -> `ExtraObject` list
//! - `ident`: identifier derivation and validity checks
//! - `tree`: shape helpers shared by both builders

mod extra;
mod fru;
pub mod ident;
mod tree;

use std::fmt;
use std::str::FromStr;

pub use extra::build_extra_model;
pub use fru::build_model;

use ident::{is_valid_identifier, reserved_reason};

/// One FRU type and the interfaces it exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FruDescription {
    /// FRU type name, also the `Fru::` enumerator in generated code.
    pub name: String,
    /// Interfaces in description order.
    pub interfaces: Vec<InterfaceBlock>,
}

impl FruDescription {
    /// Number of property bindings across all interfaces.
    pub fn property_count(&self) -> usize {
        self.interfaces.iter().map(|i| i.properties.len()).sum()
    }
}

/// A dotted interface name with its derived variable name and properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceBlock {
    /// Fully-qualified interface name, e.g. `xyz.openbmc_project.Inventory.Decorator.Asset`.
    pub name: String,
    /// Variable name used for the interface's container in generated code.
    pub identifier: String,
    /// Properties in description order.
    pub properties: Vec<PropertyBinding>,
}

/// A property and where its value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBinding {
    /// Property name, never empty.
    pub name: String,
    /// Source of the value in the VPD store.
    pub reference: ValueReference,
}

/// A `record,keyword` address into the VPD store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueReference {
    /// Record name, e.g. `VINI`.
    pub record: String,
    /// Keyword name within the record, e.g. `PN`.
    pub keyword: String,
}

impl FromStr for ValueReference {
    type Err = String;

    /// Parse `"RECORD,KEYWORD"`. Whitespace around either token is ignored;
    /// anything but exactly two non-empty identifier tokens is rejected.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
        let [record, keyword] = tokens.as_slice() else {
            return Err(format!(
                "expected exactly two comma-separated tokens, found {}",
                tokens.len()
            ));
        };

        for (role, token) in [("record", record), ("keyword", keyword)] {
            if token.is_empty() {
                return Err(format!("{role} is empty"));
            }
            if !is_valid_identifier(token) {
                return Err(format!("{role} '{token}' is not a valid identifier"));
            }
            if let Some(reason) = reserved_reason(token) {
                return Err(format!("{role} '{token}' {reason}"));
            }
        }

        Ok(Self {
            record: (*record).to_string(),
            keyword: (*keyword).to_string(),
        })
    }
}

impl fmt::Display for ValueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.record, self.keyword)
    }
}

/// An inventory object with literal-valued properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraObject {
    /// Inventory object path.
    pub path: String,
    /// Interfaces in description order.
    pub interfaces: Vec<ExtraInterface>,
}

/// An interface of an [`ExtraObject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraInterface {
    /// Fully-qualified interface name.
    pub name: String,
    /// Properties in description order.
    pub properties: Vec<ExtraProperty>,
}

/// A property with a value fixed at generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraProperty {
    /// Property name.
    pub name: String,
    /// Value emitted into the generated map.
    pub value: Literal,
}

/// Scalar value of an extra property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// `true` / `false`.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// Text, emitted as a string literal.
    String(String),
}
