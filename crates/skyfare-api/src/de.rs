// Lenient deserializers for fields the backend sends as either a JSON
// string or a JSON number.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        }
    }
}

/// Deserialize a string or number into a `String`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// Like [`string_or_number`], but `null` and missing values become `None`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer)
        .map(|v| v.map(StringOrNumber::into_string))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "super::string_or_number")]
        value: String,
        #[serde(default, deserialize_with = "super::opt_string_or_number")]
        extra: Option<String>,
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let p: Probe = serde_json::from_str(r#"{"value": "CDG"}"#).unwrap();
        assert_eq!(p.value, "CDG");
        assert_eq!(p.extra, None);

        let p: Probe = serde_json::from_str(r#"{"value": 42, "extra": 7}"#).unwrap();
        assert_eq!(p.value, "42");
        assert_eq!(p.extra.as_deref(), Some("7"));

        let p: Probe = serde_json::from_str(r#"{"value": 129.5, "extra": null}"#).unwrap();
        assert_eq!(p.value, "129.5");
        assert_eq!(p.extra, None);
    }
}
