use de::Visitor;
use serde::de;
use serde::Deserializer;

/// Accepts `true`, `false`, `"true"`, `"false"` and `null`.
pub fn opt_bool_from_str_or_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(OptBoolOrStringVisitor)
}

struct OptBoolOrStringVisitor;

impl<'de> Visitor<'de> for OptBoolOrStringVisitor {
    type Value = Option<bool>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a boolean or string of \"true\", \"false\".")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Option<bool>, E>
    where
        E: de::Error,
    {
        Ok(Some(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Option<bool>, E>
    where
        E: de::Error,
    {
        match value {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _s => Err(E::custom(format!("Unknown string value: {}", _s))),
        }
    }

    fn visit_unit<E>(self) -> Result<Option<bool>, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Option<bool>, E>
    where
        E: de::Error,
    {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(default, deserialize_with = "super::opt_bool_from_str_or_bool")]
        value: Option<bool>,
    }

    fn flag(json: &str) -> Result<Option<bool>, serde_json::Error> {
        serde_json::from_str::<Flag>(json).map(|f| f.value)
    }

    #[test]
    fn accepts_booleans_and_strings() {
        assert_eq!(Some(true), flag(r#"{"value": true}"#).unwrap());
        assert_eq!(Some(false), flag(r#"{"value": "false"}"#).unwrap());
        assert_eq!(None, flag(r#"{"value": null}"#).unwrap());
        assert_eq!(None, flag(r#"{}"#).unwrap());
    }

    #[test]
    fn rejects_other_types() {
        assert!(flag(r#"{"value": "yes"}"#).is_err());
        assert!(flag(r#"{"value": 1}"#).is_err());
        assert!(flag(r#"{"value": {}}"#).is_err());
    }
}
