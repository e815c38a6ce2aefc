//! Error type shared by every stage of the generator.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a generator run.
///
/// Model errors carry the FRU / interface / property they were found in so the
/// CLI can point the user at the offending entry.
#[derive(Error, Debug)]
pub enum GenError {
    /// The description document could not be read.
    #[error("failed to read description {}: {source}", path.display())]
    Load {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The description document is not valid YAML (or JSON).
    #[error("failed to parse description {origin}: {message}")]
    Parse {
        /// File name or other label of the parsed text.
        origin: String,
        /// Parser message, including line and column when known.
        message: String,
    },

    /// The loaded tree does not have the nested-mapping shape we need.
    #[error("unexpected shape at {location}: expected {expected}, found {found}")]
    SchemaShape {
        /// Slash-separated position in the tree.
        location: String,
        /// What the builder wanted to see.
        expected: &'static str,
        /// What it found instead.
        found: String,
    },

    /// An empty FRU, interface, object path or property name in strict mode.
    #[error("empty {kind} name at {location}")]
    EmptyName {
        /// Slash-separated position in the tree.
        location: String,
        /// Which kind of name was empty.
        kind: &'static str,
    },

    /// A name that ends up as a C++ symbol is not a valid identifier.
    #[error("invalid name '{name}' at {location}: {reason}")]
    InvalidName {
        /// Slash-separated position in the tree.
        location: String,
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A value reference is not exactly `record,keyword`.
    #[error("malformed value reference '{raw}' for {fru}/{interface}/{property}: {reason}")]
    MalformedReference {
        /// Owning FRU.
        fru: String,
        /// Owning interface.
        interface: String,
        /// Property the reference belongs to.
        property: String,
        /// Reference text as written in the description.
        raw: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two interfaces of one FRU derive the same variable name.
    #[error(
        "interfaces '{first}' and '{second}' of FRU {fru} both derive identifier '{identifier}'"
    )]
    IdentifierCollision {
        /// FRU holding both interfaces.
        fru: String,
        /// The shared identifier.
        identifier: String,
        /// Interface that claimed the identifier first.
        first: String,
        /// Interface that collided with it.
        second: String,
    },

    /// An interface derives a keyword or a name the generated code already uses.
    #[error("interface '{interface}' of FRU {fru} derives reserved identifier '{identifier}'")]
    ReservedIdentifier {
        /// Owning FRU.
        fru: String,
        /// Offending interface.
        interface: String,
        /// The derived identifier.
        identifier: String,
    },

    /// The configuration file is unreadable or not valid TOML.
    #[error("invalid configuration {}: {message}", path.display())]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Reader or parser message.
        message: String,
    },

    /// Writing the generated output failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Result alias used throughout the core crate.
pub type Result<T, E = GenError> = std::result::Result<T, E>;

/// Join tree keys into the `a/b/c` form used in error locations.
pub(crate) fn location(segments: &[&str]) -> String {
    segments.join("/")
}
