use crate::{
    address::{self, Address, AddressComponent, PostalAddress},
    geocode::Geocode,
    metadata::Metadata,
    usps::UspsData,
    verdict::Verdict,
};
use serde::{Deserialize, Serialize};

/// Body of a successful `validateAddress` call.
///
/// Every field is optional and every accessor returns a defined default when the path is
/// missing. Scoring and classification live in the `score` and `classification` modules.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    #[serde(default)]
    pub result: ValidationResult,
    #[serde(default)]
    /// Identifies this response; pass it as `previous_response_id` when re-validating.
    pub response_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    #[serde(default)]
    pub verdict: Option<Verdict>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub geocode: Option<Geocode>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub usps_data: Option<UspsData>,
    #[serde(default)]
    pub english_latin_address: Option<Address>,
}

lazy_static! {
    static ref EMPTY_VERDICT: Verdict = Verdict::default();
    static ref EMPTY_ADDRESS: Address = Address::default();
}

impl ValidationResponse {
    /// The verdict, or an empty one asserting nothing.
    pub fn verdict(&self) -> &Verdict {
        self.result.verdict.as_ref().unwrap_or(&EMPTY_VERDICT)
    }

    /// The processed address, or an empty one.
    pub fn address(&self) -> &Address {
        self.result.address.as_ref().unwrap_or(&EMPTY_ADDRESS)
    }

    pub fn postal_address(&self) -> Option<&PostalAddress> {
        self.address().postal_address.as_ref()
    }

    pub fn geocode(&self) -> Option<&Geocode> {
        self.result.geocode.as_ref()
    }

    pub fn metadata(&self) -> Metadata {
        self.result.metadata.unwrap_or_default()
    }

    pub fn usps_data(&self) -> Option<&UspsData> {
        self.result.usps_data.as_ref()
    }

    pub fn response_id(&self) -> Option<&str> {
        self.response_id.as_deref()
    }

    pub fn formatted_address(&self) -> Option<&str> {
        self.address().formatted_address.as_deref()
    }

    pub fn english_latin_formatted_address(&self) -> Option<&str> {
        self.result
            .english_latin_address
            .as_ref()
            .and_then(|a| a.formatted_address.as_deref())
    }

    /// First component of the given type, in response order.
    pub fn component(&self, component_type: &str) -> Option<&AddressComponent> {
        self.address().component(component_type)
    }

    pub fn component_text(&self, component_type: &str) -> Option<&str> {
        self.address().component_text(component_type)
    }

    pub fn street_number(&self) -> Option<&str> {
        self.component_text(address::STREET_NUMBER)
    }

    pub fn route(&self) -> Option<&str> {
        self.component_text(address::ROUTE)
    }

    pub fn locality(&self) -> Option<&str> {
        self.postal_address()
            .and_then(|p| p.locality.as_deref())
            .or_else(|| self.component_text(address::LOCALITY))
    }

    pub fn administrative_area(&self) -> Option<&str> {
        self.postal_address()
            .and_then(|p| p.administrative_area.as_deref())
            .or_else(|| self.component_text(address::ADMINISTRATIVE_AREA))
    }

    /// Postal code of the standardized address. Empty strings read as missing.
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_address()
            .and_then(|p| p.postal_code.as_deref())
            .filter(|code| !code.trim().is_empty())
    }

    pub fn region_code(&self) -> Option<&str> {
        self.postal_address().and_then(|p| p.region_code.as_deref())
    }

    pub fn missing_component_types(&self) -> &[String] {
        &self.address().missing_component_types
    }

    pub fn unconfirmed_component_types(&self) -> &[String] {
        &self.address().unconfirmed_component_types
    }

    pub fn unresolved_tokens(&self) -> &[String] {
        &self.address().unresolved_tokens
    }

    pub fn latitude(&self) -> Option<f64> {
        self.geocode().and_then(|g| g.location).map(|l| l.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.geocode().and_then(|g| g.location).map(|l| l.longitude)
    }

    pub fn has_location(&self) -> bool {
        self.geocode().and_then(|g| g.location).is_some()
    }

    pub fn feature_size_meters(&self) -> Option<f64> {
        self.geocode().and_then(|g| g.feature_size_meters)
    }

    pub fn place_id(&self) -> Option<&str> {
        self.geocode().and_then(|g| g.place_id.as_deref())
    }

    pub fn plus_code(&self) -> Option<&str> {
        self.geocode()
            .and_then(|g| g.plus_code.as_ref())
            .and_then(|p| p.global_code.as_deref())
    }

    pub fn place_types(&self) -> &[String] {
        self.geocode().map(|g| g.place_types.as_slice()).unwrap_or(&[])
    }

    pub fn usps_first_address_line(&self) -> Option<&str> {
        self.usps_data()
            .and_then(|u| u.standardized_address.as_ref())
            .and_then(|a| a.first_address_line.as_deref())
    }

    pub fn usps_zip_plus_four(&self) -> Option<String> {
        self.usps_data()
            .and_then(|u| u.standardized_address.as_ref())
            .and_then(|a| a.zip_plus_four())
    }

    pub fn carrier_route(&self) -> Option<&str> {
        self.usps_data().and_then(|u| u.carrier_route.as_deref())
    }

    pub fn county(&self) -> Option<&str> {
        self.usps_data().and_then(|u| u.county.as_deref())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const GOOGLEPLEX: &str = r#"
        {
            "result": {
                "verdict": {
                    "inputGranularity": "PREMISE",
                    "validationGranularity": "PREMISE",
                    "geocodeGranularity": "PREMISE",
                    "addressComplete": true,
                    "hasUnconfirmedComponents": false,
                    "hasInferredComponents": false,
                    "hasReplacedComponents": false
                },
                "address": {
                    "formattedAddress": "1600 Amphitheatre Parkway, Mountain View, CA 94043-1351, USA",
                    "postalAddress": {
                        "regionCode": "US",
                        "languageCode": "en",
                        "postalCode": "94043-1351",
                        "administrativeArea": "CA",
                        "locality": "Mountain View",
                        "addressLines": ["1600 Amphitheatre Pkwy"]
                    },
                    "addressComponents": [
                        { "componentName": { "text": "1600" }, "componentType": "street_number", "confirmationLevel": "CONFIRMED" },
                        { "componentName": { "text": "Amphitheatre Parkway", "languageCode": "en" }, "componentType": "route", "confirmationLevel": "CONFIRMED" },
                        { "componentName": { "text": "Mountain View", "languageCode": "en" }, "componentType": "locality", "confirmationLevel": "CONFIRMED" },
                        { "componentName": { "text": "CA", "languageCode": "en" }, "componentType": "administrative_area_level_1", "confirmationLevel": "CONFIRMED" },
                        { "componentName": { "text": "94043" }, "componentType": "postal_code", "confirmationLevel": "CONFIRMED" },
                        { "componentName": { "text": "USA", "languageCode": "en" }, "componentType": "country", "confirmationLevel": "CONFIRMED" }
                    ]
                },
                "geocode": {
                    "location": { "latitude": 37.4225508, "longitude": -122.0846338 },
                    "plusCode": { "globalCode": "849VCWC7+CW" },
                    "featureSizeMeters": 5.5,
                    "placeId": "ChIJj38IfwK6j4ARNcyPDnEGa9g",
                    "placeTypes": ["premise", "point_of_interest"]
                },
                "metadata": { "business": true, "residential": false },
                "uspsData": {
                    "standardizedAddress": {
                        "firstAddressLine": "1600 AMPHITHEATRE PKWY",
                        "city": "MOUNTAIN VIEW",
                        "state": "CA",
                        "zipCode": "94043",
                        "zipCodeExtension": "1351"
                    },
                    "deliveryPointCode": "00",
                    "dpvConfirmation": "Y",
                    "dpvCmra": "N",
                    "dpvVacant": "N",
                    "dpvNoStat": "N",
                    "carrierRoute": "C909",
                    "county": "SANTA CLARA"
                }
            },
            "responseId": "de5b5e7e-6d4e-4a34-a95b-fa9f8c8bcd9b"
        }
    "#;

    pub(crate) fn googleplex() -> ValidationResponse {
        serde_json::from_str(GOOGLEPLEX).unwrap()
    }

    #[test]
    fn accessors() {
        let response = googleplex();
        assert_eq!(
            Some("de5b5e7e-6d4e-4a34-a95b-fa9f8c8bcd9b"),
            response.response_id()
        );
        assert_eq!(
            Some("1600 Amphitheatre Parkway, Mountain View, CA 94043-1351, USA"),
            response.formatted_address()
        );
        assert_eq!(Some("1600"), response.street_number());
        assert_eq!(Some("Amphitheatre Parkway"), response.route());
        assert_eq!(Some("Mountain View"), response.locality());
        assert_eq!(Some("CA"), response.administrative_area());
        assert_eq!(Some("94043-1351"), response.postal_code());
        assert_eq!(Some("US"), response.region_code());
        assert_eq!(Some(37.4225508), response.latitude());
        assert_eq!(Some(-122.0846338), response.longitude());
        assert_eq!(Some("849VCWC7+CW"), response.plus_code());
        assert_eq!(Some("ChIJj38IfwK6j4ARNcyPDnEGa9g"), response.place_id());
        assert_eq!(Some(5.5), response.feature_size_meters());
        assert_eq!(Some("1600 AMPHITHEATRE PKWY"), response.usps_first_address_line());
        assert_eq!(Some("94043-1351".to_string()), response.usps_zip_plus_four());
        assert_eq!(Some("C909"), response.carrier_route());
        assert_eq!(Some("SANTA CLARA"), response.county());
        assert_eq!(Some(true), response.metadata().business);
        assert!(response.missing_component_types().is_empty());
    }

    #[test]
    fn empty_payload_has_defaults() {
        let response: ValidationResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(ValidationResponse::default(), response);
        assert_eq!(&Verdict::default(), response.verdict());
        assert!(response.formatted_address().is_none());
        assert!(response.english_latin_formatted_address().is_none());
        assert!(response.component("route").is_none());
        assert!(response.postal_code().is_none());
        assert!(response.latitude().is_none());
        assert!(!response.has_location());
        assert!(response.place_types().is_empty());
        assert!(response.usps_zip_plus_four().is_none());
        assert_eq!(Metadata::default(), response.metadata());
    }

    #[test]
    fn blank_postal_code_is_missing() {
        let json = r#"{ "result": { "address": { "postalAddress": { "postalCode": "  " } } } }"#;
        let response: ValidationResponse = serde_json::from_str(json).unwrap();
        assert!(response.postal_code().is_none());
    }

    #[test]
    fn type_mismatch_fails_decoding() {
        let json = r#"{ "result": { "geocode": "somewhere" } }"#;
        assert!(serde_json::from_str::<ValidationResponse>(json).is_err());

        let json = r#"{ "result": { "verdict": { "addressComplete": "true" } } }"#;
        let response: ValidationResponse = serde_json::from_str(json).unwrap();
        assert!(response.verdict().is_address_complete());
    }

    #[test]
    fn locality_falls_back_to_component() {
        let json = r#"
            {
                "result": {
                    "address": {
                        "addressComponents": [
                            { "componentName": { "text": "Zürich" }, "componentType": "locality" }
                        ]
                    },
                    "englishLatinAddress": { "formattedAddress": "Zurich, Switzerland" }
                }
            }
        "#;
        let response: ValidationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(Some("Zürich"), response.locality());
        assert_eq!(
            Some("Zurich, Switzerland"),
            response.english_latin_formatted_address()
        );
    }
}
