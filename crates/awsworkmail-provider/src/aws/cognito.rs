//! Cognito user pool custom email sender configuration

use super::context::AwsContext;
use super::error::from_sdk_error;
use anyhow::{Context, Result};
use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::types::{
    CustomEmailLambdaVersionConfigType, CustomEmailSenderLambdaVersionType, LambdaConfigType,
    VerifiedAttributeType,
};
use tracing::info;

/// Cognito identity provider client
pub struct CognitoClient {
    client: Client,
}

impl CognitoClient {
    /// Create a Cognito client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.cognito_client(),
        }
    }

    /// Route the pool's outgoing email through a lambda and auto-verify email.
    ///
    /// UpdateUserPool replaces the whole lambda configuration, so any other
    /// triggers on the pool are cleared.
    pub async fn set_custom_email_sender(
        &self,
        user_pool_id: &str,
        lambda_arn: &str,
        kms_key_arn: &str,
    ) -> Result<()> {
        info!(
            user_pool_id = %user_pool_id,
            lambda_arn = %lambda_arn,
            "Setting custom email sender"
        );

        let sender = CustomEmailLambdaVersionConfigType::builder()
            .lambda_version(CustomEmailSenderLambdaVersionType::V10)
            .lambda_arn(lambda_arn)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build custom email sender config: {}", e))?;

        let lambda_config = LambdaConfigType::builder()
            .custom_email_sender(sender)
            .kms_key_id(kms_key_arn)
            .build();

        self.client
            .update_user_pool()
            .user_pool_id(user_pool_id)
            .lambda_config(lambda_config)
            .auto_verified_attributes(VerifiedAttributeType::Email)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to update user pool {user_pool_id}"))?;

        Ok(())
    }

    /// Clear the lambda configuration and auto-verified attributes
    pub async fn clear_custom_email_sender(&self, user_pool_id: &str) -> Result<()> {
        info!(user_pool_id = %user_pool_id, "Clearing custom email sender");

        self.client
            .update_user_pool()
            .user_pool_id(user_pool_id)
            .lambda_config(LambdaConfigType::builder().build())
            .set_auto_verified_attributes(Some(Vec::new()))
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to update user pool {user_pool_id}"))?;

        Ok(())
    }
}

/// Trait for Cognito operations that can be mocked in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait CognitoOperations: Send + Sync {
    async fn set_custom_email_sender(
        &self,
        user_pool_id: &str,
        lambda_arn: &str,
        kms_key_arn: &str,
    ) -> Result<()>;

    async fn clear_custom_email_sender(&self, user_pool_id: &str) -> Result<()>;
}

impl CognitoOperations for CognitoClient {
    async fn set_custom_email_sender(
        &self,
        user_pool_id: &str,
        lambda_arn: &str,
        kms_key_arn: &str,
    ) -> Result<()> {
        CognitoClient::set_custom_email_sender(self, user_pool_id, lambda_arn, kms_key_arn).await
    }

    async fn clear_custom_email_sender(&self, user_pool_id: &str) -> Result<()> {
        CognitoClient::clear_custom_email_sender(self, user_pool_id).await
    }
}
