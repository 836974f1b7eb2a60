/*!
Address validation service and client errors.
*/
use serde::{Deserialize, Deserializer};
use std::{error, fmt};

/// Error reported by the validation service.
///
/// The service wraps it into an `{"error": {...}}` envelope, see [`ApiErrorEnvelope`].
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code mirrored in the body.
    #[serde(default)]
    pub code: u16,

    /// Human-readable text providing additional information about the error.
    #[serde(default)]
    pub message: Option<String>,

    /// Canonical error status.
    #[serde(default = "ApiErrorStatus::unspecified")]
    pub status: ApiErrorStatus,
}

/// The `{"error": {...}}` body returned with a non-2xx status.
#[derive(Deserialize, Debug)]
pub(crate) struct ApiErrorEnvelope {
    pub(crate) error: ApiError,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{:?} ({})", self.status, self.code)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl error::Error for ApiError {}

/// Canonical status of a service error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorStatus {
    /// The request is malformed, e.g. no address lines or an unsupported region.
    InvalidArgument,

    /// The API key is not allowed to call this service.
    PermissionDenied,

    /// The API key is missing or invalid.
    Unauthenticated,

    /// Quota exhausted.
    ResourceExhausted,

    NotFound,

    Internal,

    Unavailable,

    /// An unrecognized status.
    Unrecognized(String),
}

impl ApiErrorStatus {
    fn unspecified() -> Self {
        ApiErrorStatus::Unrecognized(String::new())
    }

    /// Whether repeating the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiErrorStatus::ResourceExhausted
                | ApiErrorStatus::Internal
                | ApiErrorStatus::Unavailable
        )
    }
}

impl<'a> From<&'a str> for ApiErrorStatus {
    fn from(s: &str) -> ApiErrorStatus {
        match s {
            "INVALID_ARGUMENT" => ApiErrorStatus::InvalidArgument,
            "PERMISSION_DENIED" => ApiErrorStatus::PermissionDenied,
            "UNAUTHENTICATED" => ApiErrorStatus::Unauthenticated,
            "RESOURCE_EXHAUSTED" => ApiErrorStatus::ResourceExhausted,
            "NOT_FOUND" => ApiErrorStatus::NotFound,
            "INTERNAL" => ApiErrorStatus::Internal,
            "UNAVAILABLE" => ApiErrorStatus::Unavailable,
            s => ApiErrorStatus::Unrecognized(s.to_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for ApiErrorStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ApiErrorStatus::from(s.as_str()))
    }
}

pub use reqwest::Error as Http;
pub use serde_json::Error as Json;
pub use validator::ValidationErrors as Invalid;

/// Errors returned by the client. The scoring engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] Http),
    #[error(transparent)]
    Json(#[from] Json),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("Service responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("{0}")]
    Invalid(#[from] Invalid),
    #[error("Address must contain at least one non-empty line")]
    EmptyAddress,
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("USPS CASS requires region code US or PR, got: {0:?}")]
    UspsRequiresUsRegion(Option<String>),
    #[error("Url: Path segments is cannot-be-a-base")]
    CannotBeABase,
}
