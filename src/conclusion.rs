use serde::{Serialize, Serializer};

/// Which version of the address the caller ended up using, reported back to the service
/// through [`Client::provide_feedback`](crate::Client::provide_feedback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationConclusion {
    /// The validated address was used as returned.
    ValidatedVersionUsed,
    /// The address as entered by the user was used.
    UserVersionUsed,
    /// An address that was never validated, e.g. edited after validation.
    UnvalidatedVersionUsed,
    /// The transaction was abandoned.
    Unused,
}

impl ValidationConclusion {
    pub(crate) fn as_str(&self) -> &'static str {
        use ValidationConclusion::*;
        match *self {
            ValidatedVersionUsed => "VALIDATED_VERSION_USED",
            UserVersionUsed => "USER_VERSION_USED",
            UnvalidatedVersionUsed => "UNVALIDATED_VERSION_USED",
            Unused => "UNUSED",
        }
    }
}

impl Serialize for ValidationConclusion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Body of a `provideValidationFeedback` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Feedback<'a> {
    pub(crate) conclusion: ValidationConclusion,
    pub(crate) response_id: &'a str,
}
