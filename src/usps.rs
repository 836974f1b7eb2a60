use crate::deserializers::opt_bool_from_str_or_bool;
use serde::{Deserialize, Serialize};

/// DPV confirmation for an address confirmed down to the delivery point.
pub const DPV_CONFIRMED: &str = "Y";

/// USPS data, present for US addresses validated with CASS enabled.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UspsData {
    #[serde(default)]
    pub standardized_address: Option<UspsAddress>,
    #[serde(default)]
    /// 2 digit delivery point code.
    pub delivery_point_code: Option<String>,
    #[serde(default)]
    pub delivery_point_check_digit: Option<String>,
    #[serde(default)]
    /// `Y` confirmed, `N` not confirmed, `S` secondary dropped, `D` secondary missing.
    pub dpv_confirmation: Option<String>,
    #[serde(default)]
    pub dpv_footnote: Option<String>,
    #[serde(default)]
    /// Commercial Mail Receiving Agency, `Y` or `N`.
    pub dpv_cmra: Option<String>,
    #[serde(default)]
    /// `Y` when the address is vacant.
    pub dpv_vacant: Option<String>,
    #[serde(default)]
    /// `Y` when the address does not receive mail, `N` when it is active.
    pub dpv_no_stat: Option<String>,
    #[serde(default)]
    pub carrier_route: Option<String>,
    #[serde(default)]
    pub carrier_route_indicator: Option<String>,
    #[serde(default)]
    pub post_office_city: Option<String>,
    #[serde(default)]
    pub post_office_state: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    pub ews_no_match: Option<bool>,
    #[serde(default, deserialize_with = "opt_bool_from_str_or_bool")]
    pub cass_processed: Option<bool>,
}

impl UspsData {
    pub fn is_dpv_confirmed(&self) -> bool {
        flag_is(&self.dpv_confirmation, DPV_CONFIRMED)
    }

    pub fn is_cmra(&self) -> bool {
        flag_is(&self.dpv_cmra, "Y")
    }

    pub fn is_vacant(&self) -> bool {
        flag_is(&self.dpv_vacant, "Y")
    }

    pub fn is_active(&self) -> bool {
        flag_is(&self.dpv_no_stat, "N")
    }
}

fn flag_is(flag: &Option<String>, expected: &str) -> bool {
    flag.as_deref() == Some(expected)
}

/// USPS representation of a US address.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UspsAddress {
    #[serde(default)]
    pub first_address_line: Option<String>,
    #[serde(default)]
    pub firm: Option<String>,
    #[serde(default)]
    pub second_address_line: Option<String>,
    #[serde(default)]
    pub urbanization: Option<String>,
    #[serde(default)]
    pub city_state_zip_address_line: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub zip_code_extension: Option<String>,
}

impl UspsAddress {
    /// ZIP+4, or the plain ZIP code when no extension is known.
    pub fn zip_plus_four(&self) -> Option<String> {
        match (&self.zip_code, &self.zip_code_extension) {
            (Some(zip), Some(ext)) if !ext.is_empty() => Some(format!("{}-{}", zip, ext)),
            (Some(zip), _) => Some(zip.clone()),
            _ => None,
        }
    }
}
