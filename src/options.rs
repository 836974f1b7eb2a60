use serde::{Deserialize, Serialize};
use validator::Validate;

/// Optional parameters of a validation request.
/// Derives Default, so remember to ..Default::default() after you specify what you want.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Options {
    /// CLDR region code, e.g. `US` or `CH`. The service can often guess it from the
    /// address lines, but results are better when it is given.
    #[validate(length(equal = 2))]
    pub region_code: Option<String>,
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub postal_code: Option<String>,
    /// BCP-47 language code of the input, e.g. `en`.
    pub language_code: Option<String>,
    /// Request USPS CASS processing. Only allowed for `US` and `PR`.
    pub enable_usps_cass: bool,
    /// Ask for an English transliteration of the validated address.
    pub return_english_latin_address: bool,
    /// Groups calls for billing, see the service documentation on session tokens.
    #[validate(length(min = 1, max = 36))]
    pub session_token: Option<String>,
    /// `responseId` of the first validation when re-validating a corrected address.
    pub previous_response_id: Option<String>,
}

impl Options {
    /// Region code normalized to upper case.
    pub fn region(&self) -> Option<String> {
        self.region_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_ascii_uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_is_upper_cased() {
        let options = Options {
            region_code: Some(" us ".into()),
            ..Default::default()
        };
        assert_eq!(Some("US".to_string()), options.region());
        assert_eq!(None, Options::default().region());
    }

    #[test]
    fn rejects_long_region_code() {
        let options = Options {
            region_code: Some("USA".into()),
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = Options {
            region_code: Some("US".into()),
            session_token: Some("0f0c8a1e-6a6b-4d6e-9d1c-8a3f1b2c3d4e".into()),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }
}
