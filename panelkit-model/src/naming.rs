//! Name and uri-key derivation from class names.
//!
//! A class name may be given fully qualified (`app::cards::RevenueCard` or
//! `App\Cards\RevenueCard`); only the last segment takes part in derivation.

use convert_case::{Case, Casing};

/// Returns the simple name of a possibly qualified class path.
pub fn class_basename(class: &str) -> &str {
    class
        .rsplit(|c: char| c == '\\' || c == ':')
        .find(|segment| !segment.is_empty())
        .unwrap_or(class)
}

/// Strips `suffix` from the end of `name` when something remains before it.
pub fn strip_suffix<'a>(name: &'a str, suffix: Option<&str>) -> &'a str {
    match suffix {
        Some(suffix) if name.len() > suffix.len() => name.strip_suffix(suffix).unwrap_or(name),
        _ => name,
    }
}

/// Derives a uri key: basename, suffix stripped, PascalCase to kebab-case.
///
/// `uri_key_for("FooBarCard", Some("Card")) == "foo-bar"`.
pub fn uri_key_for(class: &str, suffix: Option<&str>) -> String {
    strip_suffix(class_basename(class), suffix).to_case(Case::Kebab)
}

/// Derives a display name: basename, suffix stripped, split into title-cased words.
///
/// `display_name_for("FooBarCard", Some("Card")) == "Foo Bar"`.
pub fn display_name_for(class: &str, suffix: Option<&str>) -> String {
    strip_suffix(class_basename(class), suffix).to_case(Case::Title)
}

/// True when `key` is non-empty and only holds lowercase ASCII alphanumerics and `-`.
pub fn is_valid_uri_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('-')
        && !key.ends_with('-')
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
