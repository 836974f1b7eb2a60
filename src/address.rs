use crate::deserializers::opt_bool_from_str_or_bool;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const STREET_NUMBER: &str = "street_number";
pub const ROUTE: &str = "route";
pub const LOCALITY: &str = "locality";
pub const ADMINISTRATIVE_AREA: &str = "administrative_area_level_1";
pub const POSTAL_CODE: &str = "postal_code";
pub const COUNTRY: &str = "country";

/// Component types an address needs to be usable for mailing.
pub const REQUIRED_COMPONENT_TYPES: [&str; 4] = [ROUTE, LOCALITY, ADMINISTRATIVE_AREA, POSTAL_CODE];

/// The processed address returned by the service.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    /// Post-processed address, formatted as a single line.
    pub formatted_address: Option<String>,
    #[serde(default)]
    /// Post-processed address represented as a postal address.
    pub postal_address: Option<PostalAddress>,
    #[serde(default)]
    /// Individual components, in the order the service returned them.
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    /// Types of components that were expected but not found.
    pub missing_component_types: Vec<String>,
    #[serde(default)]
    /// Types of components present but not confirmed to be correct.
    pub unconfirmed_component_types: Vec<String>,
    #[serde(default)]
    /// Input tokens that could not be resolved.
    pub unresolved_tokens: Vec<String>,
}

impl Address {
    /// First component carrying the given type tag.
    pub fn component(&self, component_type: &str) -> Option<&AddressComponent> {
        self.address_components
            .iter()
            .find(|c| c.component_type.as_deref() == Some(component_type))
    }

    /// Text of the first component carrying the given type tag.
    pub fn component_text(&self, component_type: &str) -> Option<&str> {
        self.component(component_type).and_then(AddressComponent::text)
    }

    /// The component is present and not reported as missing.
    pub fn has_component(&self, component_type: &str) -> bool {
        self.component(component_type).is_some()
            && !self
                .missing_component_types
                .iter()
                .any(|t| t == component_type)
    }
}

/// Postal address in the service's standardized form.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(default)]
    /// CLDR region code of the country, e.g. `US`.
    pub region_code: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    // Kept as text: leading zeros and letters are significant.
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub sorting_code: Option<String>,
    #[serde(default)]
    /// State, province, prefecture or region.
    pub administrative_area: Option<String>,
    #[serde(default)]
    /// City or town.
    pub locality: Option<String>,
    #[serde(default)]
    pub sublocality: Option<String>,
    #[serde(default)]
    pub address_lines: Vec<String>,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentName {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

/// A single address component, e.g. a street number or a locality.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponent {
    #[serde(default)]
    pub component_name: Option<ComponentName>,
    #[serde(default)]
    /// Type tag, e.g. `street_number` or `postal_code`.
    pub component_type: Option<String>,
    #[serde(default)]
    pub confirmation_level: Option<ConfirmationLevel>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    /// Added by the service, not present in the input.
    pub inferred: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    pub spell_corrected: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    /// Replaced with a different value by the service.
    pub replaced: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    /// Not expected in an address of this region.
    pub unexpected: Option<bool>,
}

impl AddressComponent {
    pub fn text(&self) -> Option<&str> {
        self.component_name
            .as_ref()
            .and_then(|name| name.text.as_deref())
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmation_level == Some(ConfirmationLevel::Confirmed)
    }

    pub fn is_inferred(&self) -> bool {
        self.inferred == Some(true)
    }

    pub fn is_replaced(&self) -> bool {
        self.replaced == Some(true)
    }
}

/// How sure the service is that a component is correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationLevel {
    Confirmed,
    UnconfirmedButPlausible,
    UnconfirmedAndSuspicious,
    Unspecified,
    Unrecognized(String),
}

impl ConfirmationLevel {
    pub fn as_str(&self) -> &str {
        use ConfirmationLevel::*;
        match self {
            Confirmed => "CONFIRMED",
            UnconfirmedButPlausible => "UNCONFIRMED_BUT_PLAUSIBLE",
            UnconfirmedAndSuspicious => "UNCONFIRMED_AND_SUSPICIOUS",
            Unspecified => "CONFIRMATION_LEVEL_UNSPECIFIED",
            Unrecognized(s) => s.as_str(),
        }
    }
}

impl<'a> From<&'a str> for ConfirmationLevel {
    fn from(s: &str) -> ConfirmationLevel {
        use ConfirmationLevel::*;
        match s {
            "CONFIRMED" => Confirmed,
            "UNCONFIRMED_BUT_PLAUSIBLE" => UnconfirmedButPlausible,
            "UNCONFIRMED_AND_SUSPICIOUS" => UnconfirmedAndSuspicious,
            "CONFIRMATION_LEVEL_UNSPECIFIED" => Unspecified,
            s => Unrecognized(s.to_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for ConfirmationLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ConfirmationLevel::from(s.as_str()))
    }
}

impl Serialize for ConfirmationLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
