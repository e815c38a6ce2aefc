//! Code generator for VPD inventory accessors.
//!
//! Turns a YAML description of FRU types into a C++ header with one
//! specialization of `writeFru` per FRU, and an extra-properties description
//! into a header holding a constant map of inventory objects.
//!
//! The pipeline runs in three stages, each consuming the previous stage's
//! result: `loader` reads the document, `model` validates it into typed
//! nodes, and `emit` renders those nodes as text. All validation finishes
//! before any output is produced.

pub mod config;
pub mod emit;
pub mod error;
mod generate;
pub mod loader;
pub mod model;

// Re-export commonly used types
pub use config::{EmptyPolicy, GeneratorConfig, parse_namespace};
pub use error::{GenError, Result};
pub use generate::{
    generate_extra_properties, generate_writefru, render_extra_properties, render_writefru,
    write_output,
};
