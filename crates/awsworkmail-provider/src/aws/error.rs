//! AWS error classification and handling
//!
//! Provides typed errors for AWS SDK operations using the `.code()` method
//! instead of string matching on Debug format. All three SDKs share the
//! smithy error types, so one conversion covers WorkMail, SES and Cognito.

use aws_sdk_workmail::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// AWS error categories for retry and cleanup logic
#[derive(Debug, Error)]
pub enum AwsError {
    /// Resource was not found (safe to skip in cleanup)
    #[error("Resource not found: {message}")]
    NotFound { code: String, message: String },

    /// Rate limit exceeded (retryable with backoff)
    #[error("Rate limit exceeded: {message}")]
    Throttled { message: String },

    /// Entity or organization is in the wrong state for the request
    #[error("Invalid state ({code}): {message}")]
    InvalidState { code: String, message: String },

    /// Request never got a response (timeout, DNS, connection refused)
    #[error("AWS request failed: {message}")]
    Transport { message: String },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, AwsError::Throttled { .. } | AwsError::Transport { .. })
    }

    /// The service error code, if the service returned one
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::NotFound { code, .. } | AwsError::InvalidState { code, .. } => Some(code),
            AwsError::Sdk { code, .. } => code.as_deref(),
            AwsError::Throttled { .. } | AwsError::Transport { .. } => None,
        }
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "OrganizationNotFoundException",
    "EntityNotFoundException",
    "MailDomainNotFoundException",
    "ResourceNotFoundException",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "TooManyRequestsException",
];

/// Known AWS error codes for requests made against an entity in the wrong state
const STATE_CODES: &[&str] = &[
    "OrganizationStateException",
    "EntityStateException",
    "MailDomainStateException",
];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound {
            code: c.to_string(),
            message,
        },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled { message },
        Some(c) if STATE_CODES.contains(&c) => AwsError::InvalidState {
            code: c.to_string(),
            message,
        },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Convert an SDK error from any of the service clients into an [`AwsError`].
pub fn from_sdk_error<E, R>(err: SdkError<E, R>) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => AwsError::Transport {
            message: DisplayErrorContext(&err).to_string(),
        },
        _ => {
            let fallback = DisplayErrorContext(&err).to_string();
            classify_aws_error(err.code(), Some(err.message().unwrap_or(fallback.as_str())))
        }
    }
}

/// Whether any error in the chain is an AWS "not found" error
pub fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<AwsError>())
        .any(AwsError::is_not_found)
}
