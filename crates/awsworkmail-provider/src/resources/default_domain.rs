//! Default mail domain lifecycle

use super::{Created, Resource};
use crate::aws::WorkMailOperations;
use crate::error::ProviderError;
use anyhow::Result;
use awsworkmail_common::ResourceKind;
use awsworkmail_common::defaults::alias_mail_domain;
use awsworkmail_common::resources::{DefaultDomainArgs, DefaultDomainState};
use tracing::info;

pub struct DefaultDomainResource<W> {
    workmail: W,
}

impl<W: WorkMailOperations> DefaultDomainResource<W> {
    pub fn new(workmail: W) -> Self {
        Self { workmail }
    }
}

impl<W: WorkMailOperations> Resource for DefaultDomainResource<W> {
    const KIND: ResourceKind = ResourceKind::DefaultDomain;

    type Args = DefaultDomainArgs;
    type State = DefaultDomainState;

    async fn create(
        &self,
        name: &str,
        args: DefaultDomainArgs,
        preview: bool,
    ) -> Result<Created<DefaultDomainState>> {
        if preview {
            return Ok(Created::new(name, DefaultDomainState::from(args)));
        }

        let organization_id = args.organization_id.as_str();
        let domain = args.domain_name.as_str();

        self.workmail
            .register_mail_domain(organization_id, domain, args.client_token.clone())
            .await?;
        self.workmail
            .update_default_mail_domain(organization_id, domain)
            .await?;
        let records = self
            .workmail
            .get_mail_domain_records(organization_id, domain)
            .await?;

        let id = args.domain_name.clone();
        Ok(Created::new(
            id,
            DefaultDomainState {
                records,
                ..DefaultDomainState::from(args)
            },
        ))
    }

    /// WorkMail refuses to deregister the default domain, so the default is
    /// first moved back to the alias domain the organization was created with.
    async fn delete(&self, id: &str, state: DefaultDomainState) -> Result<()> {
        let organization_id = state.args.organization_id.as_str();

        let organization = self.workmail.describe_organization(organization_id).await?;
        let alias = organization.alias.ok_or_else(|| {
            ProviderError::Precondition(format!(
                "organization {organization_id} has no alias to fall back to"
            ))
        })?;

        let fallback = alias_mail_domain(&alias);
        info!(domain = %id, fallback = %fallback, "Resetting default mail domain");
        self.workmail
            .update_default_mail_domain(organization_id, &fallback)
            .await?;
        self.workmail
            .deregister_mail_domain(organization_id, &state.args.domain_name)
            .await
    }
}
