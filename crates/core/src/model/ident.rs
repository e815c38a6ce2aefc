//! C++ identifier helpers.

use std::collections::HashSet;
use std::sync::LazyLock;

/// C++ keywords that cannot be used as variable names.
pub static CPP_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
        "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
        "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
        "co_return", "co_yield", "decltype", "default", "delete", "do", "double",
        "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false", "float", "for",
        "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace", "new",
        "noexcept", "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private",
        "protected", "public", "register", "reinterpret_cast", "requires", "return", "short",
        "signed", "sizeof", "static", "static_assert", "static_cast", "struct", "switch",
        "template", "this", "thread_local", "throw", "true", "try", "typedef", "typeid",
        "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "wchar_t",
        "while", "xor", "xor_eq",
    ]
    .into_iter()
    .collect()
});

/// Names already bound inside a generated `writeFru` specialization.
pub const GENERATED_NAMES: [&str; 7] = ["object", "vpdStore", "path", "print", "Inner", "Outer", "std"];

/// Check whether `name` is a syntactically valid C++ identifier.
///
/// Only the ASCII subset is accepted: a letter or underscore followed by
/// letters, digits or underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Why `name` cannot be used as a C++ identifier despite being well formed.
///
/// Covers keywords and the names the standard reserves for the
/// implementation: any `__`, or `_` followed by an uppercase letter.
pub fn reserved_reason(name: &str) -> Option<&'static str> {
    if CPP_RESERVED_WORDS.contains(name) {
        Some("is a C++ keyword")
    } else if name.contains("__")
        || name
            .strip_prefix('_')
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
    {
        Some("is reserved for the C++ implementation")
    } else {
        None
    }
}

/// Check whether `name` would clash with a reserved name or generated local.
pub fn is_reserved(name: &str) -> bool {
    reserved_reason(name).is_some() || GENERATED_NAMES.contains(&name)
}

/// Derive the container variable name for a dotted interface name.
///
/// The first and last dot-separated segments are concatenated, so
/// `xyz.openbmc_project.Inventory.Decorator.Asset` becomes `xyzAsset` and a
/// single segment `Asset` becomes `AssetAsset`. Characters that cannot appear
/// in an identifier become `_`, and a leading digit gets an `_` prefix.
pub fn derive_identifier(interface: &str) -> String {
    let first = interface.split('.').next().unwrap_or_default();
    let last = interface.rsplit('.').next().unwrap_or_default();
    sanitize_identifier(&format!("{first}{last}"))
}

/// Replace every character that is not valid in an identifier with `_`.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut ident: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}
