//! Property-name casing.
//!
//! Style properties are stored in hyphen-case (`background-color`). Hosts that speak the
//! object-model spelling (`backgroundColor`, `WebkitTransition`) convert at the boundary.

use alloc::borrow::Cow;
use alloc::string::String;

/// Leading segments that mark a vendor-prefixed property in camelCase form.
const VENDOR_SEGMENTS: [&str; 4] = ["webkit", "moz", "ms", "o"];

fn is_separator(c: char) -> bool {
    c == '-' || c == '_' || c.is_whitespace()
}

/// Converts a property name to hyphen-case.
///
/// `backgroundColor` becomes `background-color`, and a capitalised vendor segment becomes a
/// leading-dash prefix (`WebkitTransition` -> `-webkit-transition`). Names that are already
/// hyphen-case are returned borrowed, as are custom properties (`--myVar`), which are
/// case-sensitive.
pub fn to_kebab_case(name: &str) -> Cow<'_, str> {
    let name = name.trim();
    if name.starts_with("--")
        || !name
            .chars()
            .any(|c| c.is_ascii_uppercase() || (c != '-' && is_separator(c)))
    {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if is_separator(c) {
            if !out.ends_with('-') {
                out.push('-');
            }
        } else {
            out.push(c);
        }
    }

    let head = out.split('-').next().unwrap_or_default();
    let vendor = if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        VENDOR_SEGMENTS.contains(&head)
    } else {
        // The object model spells this one in lowercase: `msTransition`.
        head == "ms"
    };
    if vendor {
        out.insert(0, '-');
    }

    Cow::Owned(out)
}

/// Converts a property name to camelCase.
///
/// A leading capital is lowered and every run of separators upper-cases the character that
/// follows it, so `-webkit-transition` becomes `WebkitTransition`. Custom properties (`--x`) are
/// returned as they are.
pub fn to_camel_case(name: &str) -> String {
    if name.starts_with("--") {
        return name.into();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for (i, c) in name.chars().enumerate() {
        if is_separator(c) {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else if i == 0 {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
