//! Key extraction from hstore lookups embedded in layer SQL.
//!
//! Only two textual shapes are recognized; nothing here tries to parse SQL.
//!
//! Single key:
//!   tags->'wetland'
//!   tags ? 'wetland'
//!   tags @> 'capital=>yes'
//!   tags @> '"generator:source"=>wind'
//!
//! Key array:
//!   tags ?& ARRAY['wheelchair','ramp:wheelchair']
//!   tags ?| ARRAY['wheelchair','ramp:wheelchair']

use regex::Regex;
use std::sync::LazyLock;

// `tags` must not be the tail of a longer identifier (e.g. `way_tags`).
// The operator part may not cross a quote, paren or bracket, which keeps the
// array form out of this pattern.
static SINGLE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^a-zA-Z0-9_])tags[^'^)\[\]]*'.+?'").unwrap());

static KEY_ARRAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^a-zA-Z0-9_])tags\s*[@?-][>&|]\s*[aA][rR][rR][aA][yY]\[.+?\]").unwrap()
});

/// Key named by the first quoted section of `fragment`.
///
/// `'capital=>yes'` gives `capital`; double quotes around the key are dropped.
/// Returns None when there is no quoted section or the key is empty.
pub fn quoted_key(fragment: &str) -> Option<String> {
    let quoted = fragment.split('\'').nth(1)?;
    let key = quoted.split('=').next().unwrap_or_default().replace('"', "");
    if key.is_empty() { None } else { Some(key) }
}

/// Keys from single-key lookups, in order of appearance.
pub fn single_keys(text: &str) -> Vec<String> {
    SINGLE_KEY_REGEX
        .find_iter(text)
        .filter_map(|m| quoted_key(m.as_str()))
        .collect()
}

/// Keys from `ARRAY[...]` lookups, in order of appearance.
pub fn array_keys(text: &str) -> Vec<String> {
    KEY_ARRAY_REGEX
        .find_iter(text)
        .flat_map(|m| {
            m.as_str()
                .split(',')
                .filter_map(quoted_key)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// All keys referenced by `text`: single-key lookups first, then array lookups.
///
/// Duplicates are kept; every match is a separate observation.
pub fn extract_keys(text: &str) -> Vec<String> {
    let mut keys = single_keys(text);
    keys.extend(array_keys(text));
    keys
}
