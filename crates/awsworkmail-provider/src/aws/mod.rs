//! AWS client modules for the provider
//!
//! This module provides wrappers around AWS SDK clients for:
//! - WorkMail: Organizations, mail domains, users and registrations
//! - SES: Domain identity verification status and cleanup
//! - Cognito: User pool lambda configuration
//!
//! Each wrapper implements an operations trait so the resource handlers can
//! be tested without hitting AWS.

pub mod cognito;
pub mod context;
pub mod error;
pub mod ses;
pub mod types;
pub mod workmail;

pub use cognito::{CognitoClient, CognitoOperations};
pub use context::AwsContext;
pub use error::{AwsError, classify_aws_error, from_sdk_error, is_not_found};
pub use ses::{SesClient, SesOperations};
pub use types::{
    CreateOrganizationRequest, CreateUserRequest, EntityState, OrganizationDescription,
    OrganizationSummary, VerificationStatus,
};
pub use workmail::{WorkMailClient, WorkMailOperations};

#[cfg(test)]
pub use cognito::MockCognitoOperations;
#[cfg(test)]
pub use ses::MockSesOperations;
#[cfg(test)]
pub use workmail::MockWorkMailOperations;
