//! Turn raw descriptor names into exported Go identifiers.
//!
//! ## Notes
//! - Only the first Unicode scalar is case-folded (`char::to_uppercase`). There is no title-casing and no
//!   grapheme awareness; the remainder of the string is copied byte-for-byte.
//! - A first scalar with a multi-scalar uppercase form (e.g. `ß` → `SS`) expands in place.

/// Return `raw` with its first character upper-cased and the rest untouched.
///
/// Empty input yields empty output. The transform is total and pure: the same raw name always produces the same
/// identifier, and applying it to its own output is a no-op.
///
/// ## Examples
///
/// ```
/// use rpcxgen_core::exported_name;
///
/// assert_eq!(exported_name("greeter"), "Greeter");
/// assert_eq!(exported_name("sayHello"), "SayHello");
/// assert_eq!(exported_name(""), "");
/// ```
pub fn exported_name(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();
    let mut out = String::with_capacity(raw.len());
    out.extend(first.to_uppercase());
    out.push_str(rest);
    out
}

/// Check whether `raw` already starts with a character that [`exported_name`] leaves unchanged.
pub fn is_exported(raw: &str) -> bool {
    match raw.chars().next() {
        Some(first) => {
            let mut upper = first.to_uppercase();
            upper.next() == Some(first) && upper.next().is_none()
        }
        None => false,
    }
}

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for", "func", "go",
    "goto", "if", "import", "interface", "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

/// Turn an arbitrary string into a valid Go package name.
///
/// Characters that cannot appear in an identifier become `_`. A leading digit or a Go keyword gets a `_` prefix,
/// and empty input becomes `_`.
///
/// ```
/// use rpcxgen_core::naming::go_package_name;
///
/// assert_eq!(go_package_name("hello-world"), "hello_world");
/// assert_eq!(go_package_name("2fa"), "_2fa");
/// assert_eq!(go_package_name("type"), "_type");
/// ```
pub fn go_package_name(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let starts_with_digit = out.chars().next().is_some_and(|c| c.is_numeric());
    if out.is_empty() || starts_with_digit || GO_KEYWORDS.contains(&out.as_str()) {
        out.insert(0, '_');
    }
    out
}
