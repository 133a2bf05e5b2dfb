//! Cognito custom email sender lifecycle

use super::{Created, Resource};
use crate::aws::CognitoOperations;
use anyhow::Result;
use awsworkmail_common::ResourceKind;
use awsworkmail_common::resources::{CognitoEmailSenderArgs, CognitoEmailSenderState};

pub struct CognitoEmailSenderResource<C> {
    cognito: C,
}

impl<C: CognitoOperations> CognitoEmailSenderResource<C> {
    pub fn new(cognito: C) -> Self {
        Self { cognito }
    }
}

impl<C: CognitoOperations> Resource for CognitoEmailSenderResource<C> {
    const KIND: ResourceKind = ResourceKind::CognitoEmailSender;

    type Args = CognitoEmailSenderArgs;
    type State = CognitoEmailSenderState;

    async fn create(
        &self,
        name: &str,
        args: CognitoEmailSenderArgs,
        preview: bool,
    ) -> Result<Created<CognitoEmailSenderState>> {
        if preview {
            return Ok(Created::new(name, args));
        }

        self.cognito
            .set_custom_email_sender(&args.user_pool_id, &args.lambda_arn, &args.kms_key_arn)
            .await?;

        Ok(Created::new(args.lambda_arn.clone(), args))
    }

    /// Clears every lambda trigger on the pool, not only the email sender.
    async fn delete(&self, _id: &str, state: CognitoEmailSenderState) -> Result<()> {
        self.cognito
            .clear_custom_email_sender(&state.user_pool_id)
            .await
    }
}
