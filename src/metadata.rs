use crate::deserializers::opt_bool_from_str_or_bool;
use serde::{Deserialize, Serialize};

/// Real-world character of the address. Independent of the USPS data.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    pub business: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    pub po_box: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    pub residential: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response() {
        let json = r#"{ "business": true, "residential": "false" }"#;
        let metadata: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(Some(true), metadata.business);
        assert_eq!(None, metadata.po_box);
        assert_eq!(Some(false), metadata.residential);
    }
}
