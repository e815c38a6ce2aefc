//! C++ header emission via the `Emit` trait.
//!
//! Every emitter is a pure function of the validated model: it performs no
//! checks of its own and cannot fail. Equal input always yields byte-identical
//! text, so regenerated headers diff cleanly.

mod extra;
mod writefru;

pub use extra::ExtraPropertiesHeader;
pub use writefru::WriteFruHeader;

/// Trait for turning model nodes into C++ source text.
pub trait Emit {
    /// Render the node.
    fn emit(&self) -> String;
}

/// First line of every generated file.
pub const GENERATED_BANNER: &str = "// WARNING: Generated header. Do not edit!";

/// Escape a string for use inside a C++ double-quoted literal.
///
/// Control characters use three-digit octal escapes, which unlike `\x`
/// escapes cannot swallow the characters that follow.
pub fn escape_cpp_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

/// Quote `s` as a C++ string literal.
pub fn string_literal(s: &str) -> String {
    format!("\"{}\"", escape_cpp_string(s))
}

/// `namespace a\n{\n` lines for each segment.
fn open_namespaces(namespace: &[String]) -> String {
    namespace
        .iter()
        .map(|ns| format!("namespace {ns}\n{{\n"))
        .collect()
}

/// Matching closers, innermost first.
fn close_namespaces(namespace: &[String]) -> String {
    namespace
        .iter()
        .rev()
        .map(|ns| format!("}} // namespace {ns}\n"))
        .collect()
}

/// Banner, `#pragma once` and includes shared by all generated headers.
fn preamble(local_includes: &[&str], system_includes: &[&str]) -> String {
    let mut out = format!("{GENERATED_BANNER}\n\n#pragma once\n\n");
    for include in local_includes {
        out.push_str(&format!("#include \"{include}\"\n"));
    }
    out.push('\n');
    for include in system_includes {
        out.push_str(&format!("#include <{include}>\n"));
    }
    out.push('\n');
    out
}
