use crate::{error::Error, Options};
use serde::Serialize;
use validator::Validate;

/// Body of a `validateAddress` call.
///
/// Built once from an address and [`Options`], never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    #[validate]
    pub address: RequestAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_response_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub enable_usps_cass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<LanguageOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

/// The address being validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[validate(length(min = 1))]
    pub address_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOptions {
    pub return_english_latin_address: bool,
}

impl ValidationRequest {
    /// Builds a request from free-form address text. Lines are split on newlines and
    /// blank lines are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use address_validation::{Options, ValidationRequest};
    ///
    /// let request = ValidationRequest::new(
    ///     "1600 Amphitheatre Pkwy\nMountain View, CA 94043",
    ///     &Options {
    ///         region_code: Some("US".into()),
    ///         enable_usps_cass: true,
    ///         ..Default::default()
    ///     },
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(2, request.address.address_lines.len());
    /// ```
    pub fn new(address: &str, options: &Options) -> Result<Self, Error> {
        Self::from_lines(address.lines(), options)
    }

    /// Builds a request from explicit address lines.
    pub fn from_lines<I, S>(lines: I, options: &Options) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let address_lines: Vec<String> = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if address_lines.is_empty() {
            return Err(Error::EmptyAddress);
        }

        options.validate()?;

        let region_code = options.region();
        if options.enable_usps_cass && !matches!(region_code.as_deref(), Some("US") | Some("PR"))
        {
            return Err(Error::UspsRequiresUsRegion(region_code));
        }

        let request = ValidationRequest {
            address: RequestAddress {
                region_code,
                language_code: options.language_code.clone(),
                postal_code: options.postal_code.clone(),
                administrative_area: options.administrative_area.clone(),
                locality: options.locality.clone(),
                address_lines,
            },
            previous_response_id: options.previous_response_id.clone(),
            enable_usps_cass: options.enable_usps_cass,
            language_options: if options.return_english_latin_address {
                Some(LanguageOptions {
                    return_english_latin_address: true,
                })
            } else {
                None
            },
            session_token: options.session_token.clone(),
        };
        request.validate()?;

        Ok(request)
    }

    /// The address as a single text, lines joined with `\n`.
    pub fn address_text(&self) -> String {
        self.address.address_lines.join("\n")
    }
}
