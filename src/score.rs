/*!
Address quality score and rating.

The score is additive: each factor contributes its full weight or nothing.

| Factor                  | Weight |
|-------------------------|--------|
| address complete        | 30     |
| components confirmed    | 20     |
| no inferred components  | 15     |
| no replaced components  | 10     |
| geocode location        | 10     |
| postal code             | 5      |
| precise location        | 5      |
| USPS DPV confirmed (US) | 5      |
*/
use crate::ValidationResponse;
use std::fmt;

pub const WEIGHT_COMPLETE: u32 = 30;
pub const WEIGHT_CONFIRMED: u32 = 20;
pub const WEIGHT_NOT_INFERRED: u32 = 15;
pub const WEIGHT_NOT_REPLACED: u32 = 10;
pub const WEIGHT_GEOCODE: u32 = 10;
pub const WEIGHT_POSTAL_CODE: u32 = 5;
pub const WEIGHT_PRECISE: u32 = 5;
pub const WEIGHT_USPS: u32 = 5;

pub const MAX_SCORE: u8 = 100;

/// Feature sizes below this many meters count as a precise location.
pub const PRECISE_FEATURE_SIZE_METERS: f64 = 10.0;

/// Four-tier label of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Rating {
    /// Lower bounds are inclusive: 90 Excellent, 75 Good, 50 Fair.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Rating::Excellent,
            75..=89 => Rating::Good,
            50..=74 => Rating::Fair,
            _ => Rating::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use Rating::*;
        match *self {
            Excellent => "Excellent",
            Good => "Good",
            Fair => "Fair",
            Poor => "Poor",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationResponse {
    /// Quality score in `0..=100`.
    pub fn score(&self) -> u8 {
        let verdict = self.verdict();
        let factors = [
            (verdict.is_address_complete(), WEIGHT_COMPLETE),
            (verdict.all_components_confirmed(), WEIGHT_CONFIRMED),
            (verdict.no_components_inferred(), WEIGHT_NOT_INFERRED),
            (verdict.no_components_replaced(), WEIGHT_NOT_REPLACED),
            (self.has_location(), WEIGHT_GEOCODE),
            (self.postal_code().is_some(), WEIGHT_POSTAL_CODE),
            (self.is_precise_location(), WEIGHT_PRECISE),
            (self.is_usps_confirmed(), WEIGHT_USPS),
        ];

        let total: u32 = factors
            .iter()
            .filter(|(credited, _)| *credited)
            .map(|(_, weight)| weight)
            .sum();

        total.min(MAX_SCORE as u32) as u8
    }

    pub fn rating(&self) -> Rating {
        Rating::from_score(self.score())
    }

    /// Geocoded with a feature size below [`PRECISE_FEATURE_SIZE_METERS`].
    pub fn is_precise_location(&self) -> bool {
        matches!(self.feature_size_meters(), Some(size) if size < PRECISE_FEATURE_SIZE_METERS)
    }

    fn is_usps_confirmed(&self) -> bool {
        self.is_us_address()
            && self
                .usps_data()
                .map(|usps| usps.is_dpv_confirmed())
                .unwrap_or(false)
    }
}
