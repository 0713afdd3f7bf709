//! Partial-update helpers
//!
//! A PUT body distinguishes three states per nullable column: the key is
//! absent (keep), `null` (clear) or a value (replace). Plain `Option<Option<T>>`
//! collapses the first two, so nullable fields use [`double_option`].

use serde::{Deserialize, Deserializer};

/// Maps a present key to `Some(..)`; pair with `#[serde(default)]` so an
/// absent key stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trims a free-text field and turns blank input into `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.notes, None);

        let cleared: Patch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(cleared.notes, Some(None));

        let set: Patch = serde_json::from_str(r#"{"notes": "ok"}"#).unwrap();
        assert_eq!(set.notes, Some(Some("ok".to_string())));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Awa ".to_string())), Some("Awa".to_string()));
        assert_eq!(non_blank(None), None);
    }
}
