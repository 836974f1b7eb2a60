use crate::deserializers::opt_bool_from_str_or_bool;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The service's overall judgment on the input address.
///
/// The service omits `false` flags, so a missing flag on an assessed address (one that is
/// complete or carries a validation granularity) reads as `false`. An empty verdict asserts
/// nothing.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    #[serde(default)]
    /// Granularity of the input address, as parsed.
    pub input_granularity: Option<Granularity>,
    #[serde(default)]
    /// Granularity to which the address could be validated.
    pub validation_granularity: Option<Granularity>,
    #[serde(default)]
    /// Granularity of the geocode.
    pub geocode_granularity: Option<Granularity>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    /// No unresolved tokens and no missing or unexpected components.
    pub address_complete: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    /// At least one component could not be confirmed.
    pub has_unconfirmed_components: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    /// At least one component was added by the service.
    pub has_inferred_components: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    /// At least one component was replaced by the service.
    pub has_replaced_components: Option<bool>,
}

impl Verdict {
    pub fn is_address_complete(&self) -> bool {
        self.address_complete == Some(true)
    }

    pub fn has_unconfirmed_components(&self) -> bool {
        self.has_unconfirmed_components == Some(true)
    }

    pub fn has_inferred_components(&self) -> bool {
        self.has_inferred_components == Some(true)
    }

    pub fn has_replaced_components(&self) -> bool {
        self.has_replaced_components == Some(true)
    }

    /// Every component was confirmed.
    pub fn all_components_confirmed(&self) -> bool {
        self.cleared(self.has_unconfirmed_components)
    }

    /// No component was inferred.
    pub fn no_components_inferred(&self) -> bool {
        self.cleared(self.has_inferred_components)
    }

    /// No component was replaced.
    pub fn no_components_replaced(&self) -> bool {
        self.cleared(self.has_replaced_components)
    }

    fn cleared(&self, flag: Option<bool>) -> bool {
        match flag {
            Some(flag) => !flag,
            None => self.is_address_complete() || self.validation_granularity.is_some(),
        }
    }
}

/// Precision tier of a match, from the most to the least precise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Granularity {
    SubPremise,
    Premise,
    PremiseProximity,
    Block,
    Route,
    Other,
    Unspecified,
    Unrecognized(String),
}

impl Granularity {
    pub fn as_str(&self) -> &str {
        use Granularity::*;
        match self {
            SubPremise => "SUB_PREMISE",
            Premise => "PREMISE",
            PremiseProximity => "PREMISE_PROXIMITY",
            Block => "BLOCK",
            Route => "ROUTE",
            Other => "OTHER",
            Unspecified => "GRANULARITY_UNSPECIFIED",
            Unrecognized(s) => s.as_str(),
        }
    }

    /// Route level or finer.
    pub fn is_defined(&self) -> bool {
        use Granularity::*;
        matches!(
            self,
            SubPremise | Premise | PremiseProximity | Block | Route
        )
    }

    /// Building level or finer.
    pub fn is_premise(&self) -> bool {
        matches!(self, Granularity::SubPremise | Granularity::Premise)
    }
}

impl<'a> From<&'a str> for Granularity {
    fn from(s: &str) -> Granularity {
        use Granularity::*;
        match s {
            "SUB_PREMISE" => SubPremise,
            "PREMISE" => Premise,
            "PREMISE_PROXIMITY" => PremiseProximity,
            "BLOCK" => Block,
            "ROUTE" => Route,
            "OTHER" => Other,
            "GRANULARITY_UNSPECIFIED" => Unspecified,
            s => Unrecognized(s.to_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for Granularity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Granularity::from(s.as_str()))
    }
}

impl Serialize for Granularity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
