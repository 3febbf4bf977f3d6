//! Tag normalization and endpoint path assembly.
//!
//! The API addresses players and clans by tag, which always starts with `#`. The
//! escaped `#` (`%23`) is part of the endpoint prefix, so callers may pass tags with
//! or without it.

/// Resource family a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Players,
    Clans,
}

impl Endpoint {
    pub fn prefix(self) -> &'static str {
        match self {
            Endpoint::Players => "players/%23",
            Endpoint::Clans => "clans/%23",
        }
    }
}

/// Strips surrounding whitespace and `#` characters, then percent-encodes what is left.
///
/// Internal `#` characters survive as `%23`, so the result never holds a literal `#`.
pub fn normalize_tag(raw: &str) -> String {
    let stripped = raw.trim_matches(|c: char| c == '#' || c.is_whitespace());
    urlencoding::encode(stripped).into_owned()
}

/// Builds the path to append to the base URL, e.g. `clans/%232PP/members`.
pub fn endpoint_path(endpoint: Endpoint, tag: &str, suffix: Option<&str>) -> String {
    let mut path = String::from(endpoint.prefix());
    path.push_str(&normalize_tag(tag));
    if let Some(suffix) = suffix {
        path.push_str(suffix);
    }
    path
}
