//! Errors reported by the backend REST ports.

use super::define_port_error;

define_port_error! {
    /// Failure of a backend REST call.
    pub enum ApiError {
        /// The request could not be sent or the connection dropped.
        Transport { message: String } => "backend transport failed: {message}",
        /// The backend did not answer in time.
        Timeout { message: String } => "backend request timed out: {message}",
        /// The bearer token was missing, expired or rejected.
        Unauthorized { message: String } => "backend rejected credentials: {message}",
        /// The caller lacks the role required for the operation.
        Forbidden { message: String } => "backend denied access: {message}",
        /// The record does not exist.
        NotFound { message: String } => "record not found: {message}",
        /// The `If-Match` version no longer matches the stored record.
        PreconditionFailed { status: u16, message: String } =>
            "record version is stale (status {status}): {message}",
        /// Any other unsuccessful status.
        Status { status: u16, message: String } => "backend returned status {status}: {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } => "backend response could not be decoded: {message}",
    }
}

/// Statuses the backend uses to reject a stale or missing version.
pub const PRECONDITION_STATUSES: [u16; 3] = [409, 412, 428];

impl ApiError {
    /// Whether the failure means the record changed underneath the caller.
    #[must_use]
    pub fn is_precondition_failure(&self) -> bool {
        matches!(self, Self::PreconditionFailed { .. })
    }

    /// Whether the failure means the session credentials are no longer valid.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::precondition_failed(412_u16, "stale"), true)]
    #[case(ApiError::precondition_failed(428_u16, "missing"), true)]
    #[case(ApiError::status(500_u16, "boom"), false)]
    #[case(ApiError::transport("reset"), false)]
    fn classifies_precondition_failures(#[case] err: ApiError, #[case] expected: bool) {
        assert_eq!(err.is_precondition_failure(), expected);
    }
}
