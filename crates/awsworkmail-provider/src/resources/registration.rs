//! WorkMail registration lifecycle

use super::{Created, Resource};
use crate::aws::WorkMailOperations;
use crate::error::ProviderError;
use anyhow::Result;
use awsworkmail_common::ResourceKind;
use awsworkmail_common::resources::{WorkmailRegistrationArgs, WorkmailRegistrationState};

pub struct WorkmailRegistrationResource<W> {
    workmail: W,
}

impl<W: WorkMailOperations> WorkmailRegistrationResource<W> {
    pub fn new(workmail: W) -> Self {
        Self { workmail }
    }
}

impl<W: WorkMailOperations> Resource for WorkmailRegistrationResource<W> {
    const KIND: ResourceKind = ResourceKind::WorkmailRegistration;

    type Args = WorkmailRegistrationArgs;
    type State = WorkmailRegistrationState;

    async fn create(
        &self,
        name: &str,
        args: WorkmailRegistrationArgs,
        preview: bool,
    ) -> Result<Created<WorkmailRegistrationState>> {
        if preview {
            return Ok(Created::new(name, args));
        }

        let organization = self
            .workmail
            .describe_organization(&args.organization_id)
            .await?;
        let mail_domain = organization.default_mail_domain.ok_or_else(|| {
            ProviderError::Precondition(format!(
                "organization {} has no default mail domain",
                args.organization_id
            ))
        })?;

        let email = args.email_address(&mail_domain);
        self.workmail
            .register_to_workmail(&args.organization_id, &args.entity_id, &email)
            .await?;

        Ok(Created::new(args.entity_id.clone(), args))
    }

    async fn delete(&self, id: &str, state: WorkmailRegistrationState) -> Result<()> {
        self.workmail
            .deregister_from_workmail(&state.organization_id, id)
            .await
    }
}
