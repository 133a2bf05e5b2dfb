//! Provider errors and failure classification
//!
//! Handlers return `anyhow::Result` with context on every remote call. The
//! typed errors below sit inside the chain and are recovered with
//! `downcast_ref` to decide how a failure is reported.

use crate::aws::AwsError;
use awsworkmail_common::{ResourceKind, UnknownResourceType};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Inputs or remote state make the operation impossible; retrying won't help
    #[error("{0}")]
    Precondition(String),

    /// A referenced resource does not exist
    #[error("{0}")]
    NotFound(String),

    #[error("Timeout waiting for {resource} after {timeout:?} ({attempts} attempts)")]
    Timeout {
        resource: String,
        timeout: Duration,
        attempts: u32,
    },

    #[error("Wait for {resource} cancelled")]
    Cancelled { resource: String },

    #[error("Organization {organization_id} failed: {message}")]
    OrganizationFailed {
        organization_id: String,
        message: String,
    },

    #[error("Verification of domain {domain} failed with status {status}")]
    VerificationFailed { domain: String, status: String },

    #[error(transparent)]
    UnknownResourceType(#[from] UnknownResourceType),

    #[error("Invalid {kind} properties: {source}")]
    InvalidProperties {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },
}

/// How a failure should be reported to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Precondition,
    /// Throttling or transport failure, safe to retry
    Transient,
    Fatal,
    Timeout,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Precondition => "precondition",
            ErrorKind::Transient => "transient",
            ErrorKind::Fatal => "fatal",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Cancelled => "cancelled",
        })
    }
}

/// Classify an error by the first typed error found in its chain.
pub fn classify_error(error: &anyhow::Error) -> ErrorKind {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<ProviderError>() {
            return match e {
                ProviderError::Precondition(_)
                | ProviderError::UnknownResourceType(_)
                | ProviderError::InvalidProperties { .. } => ErrorKind::Precondition,
                ProviderError::Timeout { .. } => ErrorKind::Timeout,
                ProviderError::Cancelled { .. } => ErrorKind::Cancelled,
                ProviderError::NotFound(_)
                | ProviderError::OrganizationFailed { .. }
                | ProviderError::VerificationFailed { .. } => ErrorKind::Fatal,
            };
        }
        if let Some(e) = cause.downcast_ref::<AwsError>() {
            return if e.is_retryable() {
                ErrorKind::Transient
            } else {
                ErrorKind::Fatal
            };
        }
    }
    ErrorKind::Fatal
}
