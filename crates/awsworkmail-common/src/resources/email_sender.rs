//! Cognito custom email sender schema and replacement policy

use crate::diff::{DiffBuilder, DiffResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitoEmailSenderArgs {
    /// User pool that gets the custom email sender
    pub user_pool_id: String,
    /// Lambda responsible for sending emails
    pub lambda_arn: String,
    /// KMS key used to encrypt the codes handed to the lambda
    pub kms_key_arn: String,
    /// Region of the user pool, defaults to the provider region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

pub type CognitoEmailSenderState = CognitoEmailSenderArgs;

/// Every field forces replacement, delete before replace.
pub fn diff(olds: &CognitoEmailSenderState, news: &CognitoEmailSenderArgs) -> DiffResponse {
    let mut builder = DiffBuilder::new();
    builder
        .replace_if_changed("userPoolId", &olds.user_pool_id, &news.user_pool_id)
        .replace_if_changed("lambdaArn", &olds.lambda_arn, &news.lambda_arn)
        .replace_if_changed("kmsKeyArn", &olds.kms_key_arn, &news.kms_key_arn)
        .replace_if_changed_opt("region", olds.region.as_deref(), news.region.as_deref());
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffKind;

    fn args() -> CognitoEmailSenderArgs {
        CognitoEmailSenderArgs {
            user_pool_id: "eu-west-1_abc".to_string(),
            lambda_arn: "arn:aws:lambda:eu-west-1:123:function:sender".to_string(),
            kms_key_arn: "arn:aws:kms:eu-west-1:123:key/k".to_string(),
            region: None,
        }
    }

    #[test]
    fn test_identical_inputs_have_no_changes() {
        assert!(!diff(&args(), &args()).has_changes);
    }

    #[test]
    fn test_every_field_replaces() {
        let news = CognitoEmailSenderArgs {
            user_pool_id: "eu-west-1_def".to_string(),
            lambda_arn: "arn:aws:lambda:eu-west-1:123:function:other".to_string(),
            kms_key_arn: "arn:aws:kms:eu-west-1:123:key/other".to_string(),
            region: Some("eu-west-1".to_string()),
        };
        let result = diff(&args(), &news);

        assert_eq!(result.replaces.len(), 4);
        assert!(result.delete_before_replace);
        assert_eq!(
            result.property("region").unwrap().kind,
            DiffKind::AddReplace
        );
    }
}
