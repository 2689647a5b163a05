//! Parse-with-default helpers for best-effort tabular ingestion.
//!
//! Loaders look up a field (yielding `Option<&str>`, `None` when the column is
//! absent) and hand it to one of these helpers.  Blank fields behave exactly
//! like absent ones.
//!
//! | Helper             | Absent / malformed                  |
//! |--------------------|-------------------------------------|
//! | [`parse_or`]       | returns the supplied default        |
//! | [`parse_required`] | returns `None`; caller drops record |
//! | [`parse_flag`]     | returns `None`                      |
//! | [`text_or`]        | returns the supplied default        |

use std::str::FromStr;

#[inline]
fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse `field`, falling back to `default` if it is absent, blank, or
/// malformed.
pub fn parse_or<T: FromStr>(field: Option<&str>, default: T) -> T {
    parse_required(field).unwrap_or(default)
}

/// Parse a field the record cannot do without.
pub fn parse_required<T: FromStr>(field: Option<&str>) -> Option<T> {
    non_blank(field).and_then(|s| s.parse().ok())
}

/// Parse a numeric boolean flag: any non-zero number is `true`.
///
/// `"true"` / `"false"` are accepted as well.
pub fn parse_flag(field: Option<&str>) -> Option<bool> {
    let s = non_blank(field)?;
    match s.parse::<f64>() {
        Ok(n) => Some(n != 0.0),
        Err(_) => s.parse::<bool>().ok(),
    }
}

/// Take a text field verbatim (trimmed), or `default` if absent or blank.
pub fn text_or(field: Option<&str>, default: &str) -> String {
    non_blank(field).unwrap_or(default).to_owned()
}
