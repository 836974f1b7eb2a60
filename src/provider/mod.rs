/*!
Address validation service providers.
*/
use crate::error::Error;
use url::Url;

/// Service endpoints a [`Client`](crate::Client) talks to.
pub trait Provider {
    /// The `validateAddress` endpoint URI.
    fn validate_uri(&self) -> &Url;

    /// The `provideValidationFeedback` endpoint URI.
    fn feedback_uri(&self) -> &Url;

    /// Provider expects the API key in the `X-Goog-Api-Key` header instead of the `key`
    /// query parameter.
    fn key_in_header(&self) -> bool {
        false
    }
}

lazy_static! {
    /// Base URL of the public Google endpoint.
    pub static ref GOOGLE_BASE_URI: Url =
        Url::parse("https://addressvalidation.googleapis.com/").unwrap();
    static ref GOOGLE: Custom = Custom::new(GOOGLE_BASE_URI.clone()).unwrap();
}

/// Google Address Validation API.
///
/// See [Address Validation API](https://developers.google.com/maps/documentation/address-validation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Google;
impl Provider for Google {
    fn validate_uri(&self) -> &Url {
        GOOGLE.validate_uri()
    }
    fn feedback_uri(&self) -> &Url {
        GOOGLE.feedback_uri()
    }
}

/// A provider serving the same API under another base URL, e.g. a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Custom {
    validate_uri: Url,
    feedback_uri: Url,
    key_in_header: bool,
}

impl Custom {
    /// Derives both endpoints from a base URL: `{base}/v1:validateAddress` and
    /// `{base}/v1:provideValidationFeedback`.
    pub fn new(base: Url) -> Result<Self, Error> {
        Ok(Custom {
            validate_uri: endpoint(&base, "v1:validateAddress")?,
            feedback_uri: endpoint(&base, "v1:provideValidationFeedback")?,
            key_in_header: false,
        })
    }

    /// Send the API key as a header.
    pub fn with_key_in_header(mut self) -> Self {
        self.key_in_header = true;
        self
    }
}

impl Provider for Custom {
    fn validate_uri(&self) -> &Url {
        &self.validate_uri
    }
    fn feedback_uri(&self) -> &Url {
        &self.feedback_uri
    }
    fn key_in_header(&self) -> bool {
        self.key_in_header
    }
}

fn endpoint(base: &Url, method: &str) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::CannotBeABase)?
        .pop_if_empty()
        .push(method);
    Ok(url)
}

#[test]
fn google_urls() {
    let prov = Google;
    assert_eq!(
        "https://addressvalidation.googleapis.com/v1:validateAddress",
        prov.validate_uri().as_str()
    );
    assert_eq!(
        "https://addressvalidation.googleapis.com/v1:provideValidationFeedback",
        prov.feedback_uri().as_str()
    );
    assert!(!prov.key_in_header());
}

#[test]
fn custom_urls() {
    let prov = Custom::new(Url::parse("http://localhost:8080/proxy/").unwrap()).unwrap();
    assert_eq!(
        "http://localhost:8080/proxy/v1:validateAddress",
        prov.validate_uri().as_str()
    );
    assert_eq!(
        "http://localhost:8080/proxy/v1:provideValidationFeedback",
        prov.feedback_uri().as_str()
    );
    assert!(prov.with_key_in_header().key_in_header());
}

#[test]
fn custom_rejects_cannot_be_a_base() {
    let base = Url::parse("mailto:someone@example.com").unwrap();
    assert!(matches!(Custom::new(base), Err(Error::CannotBeABase)));
}

#[test]
fn google_base_matches_google_endpoints() {
    let custom = Custom::new(GOOGLE_BASE_URI.clone()).unwrap();
    assert_eq!(Google.validate_uri(), custom.validate_uri());
    assert_eq!(Google.feedback_uri(), custom.feedback_uri());
}
