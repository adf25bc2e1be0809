//! Shape patterns for typed inputs.

use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld`, no whitespace, at least one dot in the domain.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("Invalid email regex")
});

/// Phone characters only: `+`, ASCII digits, spaces, hyphens, parentheses.
pub static TEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+0-9 \-()]+$").expect("Invalid phone regex"));

/// Absolute URL: `scheme://host` followed by an optional path/query.
pub static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#@]+(?:@[^\s/?#]+)?(?:[/?#]\S*)?$")
        .expect("Invalid URL regex")
});

/// Calendar date as `YYYY-MM-DD`, ASCII digits only.
pub static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex"));
