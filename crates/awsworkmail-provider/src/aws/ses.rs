//! SES domain identity verification status and cleanup
//!
//! WorkMail verifies organization domains through SES and leaves the
//! identities behind when the organization is deleted.

use super::context::AwsContext;
use super::error::from_sdk_error;
use super::types::VerificationStatus;
use anyhow::{Context, Result};
use aws_sdk_ses::Client;
use std::collections::HashMap;
use tracing::{debug, info};

/// SES client for domain identities
pub struct SesClient {
    client: Client,
}

impl SesClient {
    /// Create an SES client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ses_client(),
        }
    }

    /// Verification status of each identity. Identities SES has never seen
    /// are absent from the returned map.
    pub async fn verification_statuses(
        &self,
        identities: Vec<String>,
    ) -> Result<HashMap<String, VerificationStatus>> {
        let response = self
            .client
            .get_identity_verification_attributes()
            .set_identities(Some(identities))
            .send()
            .await
            .map_err(from_sdk_error)
            .context("Failed to get identity verification attributes")?;

        let statuses: HashMap<String, VerificationStatus> = response
            .verification_attributes()
            .iter()
            .map(|(identity, attributes)| {
                (
                    identity.clone(),
                    VerificationStatus::parse(attributes.verification_status().as_str()),
                )
            })
            .collect();

        debug!(?statuses, "Fetched identity verification status");
        Ok(statuses)
    }

    pub async fn delete_identity(&self, identity: &str) -> Result<()> {
        info!(identity = %identity, "Deleting SES identity");

        self.client
            .delete_identity()
            .identity(identity)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to delete SES identity {identity}"))?;

        Ok(())
    }
}

/// Trait for SES operations that can be mocked in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait SesOperations: Send + Sync {
    async fn verification_statuses(
        &self,
        identities: Vec<String>,
    ) -> Result<HashMap<String, VerificationStatus>>;

    async fn delete_identity(&self, identity: &str) -> Result<()>;
}

impl SesOperations for SesClient {
    async fn verification_statuses(
        &self,
        identities: Vec<String>,
    ) -> Result<HashMap<String, VerificationStatus>> {
        SesClient::verification_statuses(self, identities).await
    }

    async fn delete_identity(&self, identity: &str) -> Result<()> {
        SesClient::delete_identity(self, identity).await
    }
}
