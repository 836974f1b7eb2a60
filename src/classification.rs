use crate::{
    address::REQUIRED_COMPONENT_TYPES,
    score::Rating,
    ValidationResponse,
};
use serde::Serialize;
use std::fmt;

/// Scores from this value on are [`Rating::Good`] or better.
pub const HIGH_CONFIDENCE_SCORE: u8 = 75;

/// Scores below this value need a human to look at the address.
pub const MINIMUM_VALID_SCORE: u8 = 50;

pub const ISSUE_INCOMPLETE: &str = "Incomplete address";
pub const ISSUE_UNCONFIRMED: &str = "Address has unconfirmed components";
pub const ISSUE_INFERRED: &str = "Address has inferred components";
pub const ISSUE_REPLACED: &str = "Address has replaced components";
pub const ISSUE_MISSING: &str = "Address is missing required components";
pub const ISSUE_NO_GEOCODE: &str = "Address could not be geocoded";

/// Confidence tag derived from a [`Rating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
    VeryLow,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        use Confidence::*;
        match *self {
            High => "high",
            Medium => "medium",
            Low => "low",
            VeryLow => "very_low",
        }
    }
}

impl From<Rating> for Confidence {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Excellent => Confidence::High,
            Rating::Good => Confidence::Medium,
            Rating::Fair => Confidence::Low,
            Rating::Poor => Confidence::VeryLow,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic summary returned by [`ValidationResponse::check_validity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub is_valid: bool,
    pub confidence_level: Confidence,
    /// Human-readable issues, in check order. Empty when nothing failed.
    ///
    /// ```
    /// use address_validation::{ValidationResponse, ISSUE_INCOMPLETE, ISSUE_NO_GEOCODE};
    ///
    /// let validity = ValidationResponse::default().check_validity();
    /// assert_eq!(ISSUE_INCOMPLETE, validity.issues[0]);
    /// assert!(validity.issues.iter().any(|issue| issue == ISSUE_NO_GEOCODE));
    /// ```
    pub issues: Vec<String>,
}

impl ValidationResponse {
    /// Validated to route level or finer.
    pub fn is_verified(&self) -> bool {
        self.verdict()
            .validation_granularity
            .as_ref()
            .map(|g| g.is_defined())
            .unwrap_or(false)
    }

    pub fn is_fully_validated(&self) -> bool {
        let verdict = self.verdict();
        verdict.is_address_complete()
            && verdict.all_components_confirmed()
            && verdict.no_components_inferred()
    }

    pub fn is_high_confidence(&self) -> bool {
        self.score() >= HIGH_CONFIDENCE_SCORE
    }

    /// Street, locality, region and postal code are all present.
    pub fn has_minimal_components(&self) -> bool {
        let address = self.address();
        REQUIRED_COMPONENT_TYPES
            .iter()
            .all(|t| address.has_component(t))
    }

    pub fn is_minimal_valid(&self) -> bool {
        self.has_minimal_components()
    }

    pub fn is_standardized(&self) -> bool {
        self.formatted_address()
            .map(|f| !f.trim().is_empty())
            .unwrap_or(false)
            && self.verdict().no_components_replaced()
    }

    pub fn is_exact_match(&self) -> bool {
        let verdict = self.verdict();
        verdict.no_components_inferred() && verdict.no_components_replaced()
    }

    pub fn is_verification_needed(&self) -> bool {
        self.verdict().has_unconfirmed_components() || self.score() < MINIMUM_VALID_SCORE
    }

    /// US addresses need a DPV match; other addresses need full validation.
    pub fn is_deliverable(&self) -> bool {
        if self.is_us_address() {
            self.usps_data()
                .map(|usps| usps.is_dpv_confirmed())
                .unwrap_or(false)
        } else {
            self.is_fully_validated()
        }
    }

    /// Deliverable and not vacant. PO boxes are shippable.
    pub fn is_shippable(&self) -> bool {
        self.is_deliverable() && !self.is_vacant()
    }

    pub fn is_valid_landmark(&self) -> bool {
        self.geocode().map(|g| g.is_landmark()).unwrap_or(false)
    }

    pub fn is_us_address(&self) -> bool {
        self.region_code()
            .map(|code| code.trim().eq_ignore_ascii_case("US"))
            .unwrap_or(false)
    }

    pub fn is_business(&self) -> bool {
        self.metadata().business.unwrap_or(false)
    }

    pub fn is_po_box(&self) -> bool {
        self.metadata().po_box.unwrap_or(false)
    }

    pub fn is_residential(&self) -> bool {
        self.metadata().residential.unwrap_or(false)
    }

    /// USPS reports the delivery point as receiving mail.
    pub fn is_active(&self) -> bool {
        self.usps_data().map(|u| u.is_active()).unwrap_or(false)
    }

    pub fn is_vacant(&self) -> bool {
        self.usps_data().map(|u| u.is_vacant()).unwrap_or(false)
    }

    pub fn is_commercial_mail_receiver(&self) -> bool {
        self.usps_data().map(|u| u.is_cmra()).unwrap_or(false)
    }

    /// Aggregates the verdict into a validity flag, a confidence tag and a list of issues.
    pub fn check_validity(&self) -> Validity {
        let verdict = self.verdict();
        let score = self.score();

        let checks = [
            (!verdict.is_address_complete(), ISSUE_INCOMPLETE),
            (verdict.has_unconfirmed_components(), ISSUE_UNCONFIRMED),
            (verdict.has_inferred_components(), ISSUE_INFERRED),
            (verdict.has_replaced_components(), ISSUE_REPLACED),
            (!self.has_minimal_components(), ISSUE_MISSING),
            (!self.has_location(), ISSUE_NO_GEOCODE),
        ];
        let issues = checks
            .iter()
            .filter(|(failed, _)| *failed)
            .map(|(_, issue)| issue.to_string())
            .collect();

        Validity {
            is_valid: self.is_fully_validated() || score >= MINIMUM_VALID_SCORE,
            confidence_level: Rating::from_score(score).into(),
            issues,
        }
    }
}
