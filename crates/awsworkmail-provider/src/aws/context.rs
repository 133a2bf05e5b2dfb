//! Shared AWS configuration context
//!
//! Provides `AwsContext` for loading AWS SDK configuration once per request
//! region and creating the service clients a handler needs from it.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;

/// Shared AWS configuration context for creating service clients.
///
/// # Example
/// ```ignore
/// let aws = AwsContext::load(Some("eu-west-1"), None).await;
///
/// let workmail = WorkMailClient::from_context(&aws);
/// let ses = SesClient::from_context(&aws);
/// ```
#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
}

impl AwsContext {
    /// Load AWS configuration with an optional region and named profile.
    ///
    /// Credentials, and the region when none is given, are resolved from
    /// the environment, config files and instance roles.
    pub async fn load(region: Option<&str>, profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }

        Self {
            config: Arc::new(loader.load().await),
        }
    }

    /// Get the underlying SDK config for direct client construction.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    /// Region the clients will talk to, if one was resolved.
    pub fn region(&self) -> Option<&str> {
        self.config.region().map(|r| r.as_ref())
    }

    pub fn workmail_client(&self) -> aws_sdk_workmail::Client {
        aws_sdk_workmail::Client::new(self.sdk_config())
    }

    pub fn ses_client(&self) -> aws_sdk_ses::Client {
        aws_sdk_ses::Client::new(self.sdk_config())
    }

    pub fn cognito_client(&self) -> aws_sdk_cognitoidentityprovider::Client {
        aws_sdk_cognitoidentityprovider::Client::new(self.sdk_config())
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("region", &self.region())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_region_wins() {
        let ctx = AwsContext::load(Some("eu-west-1"), None).await;
        assert_eq!(ctx.region(), Some("eu-west-1"));
    }

    #[tokio::test]
    async fn test_context_clone_shares_config() {
        let ctx1 = AwsContext::load(Some("us-east-1"), None).await;
        let ctx2 = ctx1.clone();
        assert!(Arc::ptr_eq(&ctx1.config, &ctx2.config));
        assert!(format!("{ctx2:?}").contains("us-east-1"));
    }
}
