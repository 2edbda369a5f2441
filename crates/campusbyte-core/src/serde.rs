use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Deserializes an optional query value, treating `""` as absent.
///
/// Works for any `FromStr` type, so typed ids and text enums can be used
/// directly as filter fields.
pub fn deserialize_optional_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<T>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[serde(default, deserialize_with = "deserialize_optional_from_str")]
        year: Option<i32>,
    }

    #[test]
    fn test_empty_string_is_none() {
        let f: Filter = serde_json::from_str(r#"{"year":""}"#).unwrap();
        assert!(f.year.is_none());
    }

    #[test]
    fn test_missing_is_none() {
        let f: Filter = serde_json::from_str("{}").unwrap();
        assert!(f.year.is_none());
    }

    #[test]
    fn test_value_is_parsed() {
        let f: Filter = serde_json::from_str(r#"{"year":"2026"}"#).unwrap();
        assert_eq!(f.year, Some(2026));
    }

    #[test]
    fn test_unparsable_value_errors() {
        assert!(serde_json::from_str::<Filter>(r#"{"year":"soon"}"#).is_err());
    }
}
