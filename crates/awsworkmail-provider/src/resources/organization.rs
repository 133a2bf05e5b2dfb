//! Organization lifecycle
//!
//! Creation is asynchronous on the WorkMail side: the organization moves
//! through `Requested` and `Creating` before `Active`, and its domains are
//! verified through SES in parallel. Create waits for both before making
//! the first domain the default.

use super::{Created, Resource};
use crate::aws::{
    CreateOrganizationRequest, SesOperations, VerificationStatus, WorkMailOperations, is_not_found,
};
use crate::config::PollConfig;
use crate::error::ProviderError;
use crate::wait::{WaitConfig, wait_for_resource};
use anyhow::{Context, Result};
use awsworkmail_common::ResourceKind;
use awsworkmail_common::resources::{OrganizationArgs, OrganizationState};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct OrganizationResource<W, S> {
    workmail: W,
    ses: S,
    create_wait: WaitConfig,
    delete_wait: WaitConfig,
    cancel: Option<CancellationToken>,
}

impl<W: WorkMailOperations, S: SesOperations> OrganizationResource<W, S> {
    pub fn new(workmail: W, ses: S, poll: &PollConfig) -> Self {
        Self {
            workmail,
            ses,
            create_wait: poll.create_wait(),
            delete_wait: poll.delete_wait(),
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Poll until the organization is Active and every domain verified.
    async fn wait_until_ready(&self, organization_id: &str, domains: &[String]) -> Result<()> {
        let workmail = &self.workmail;
        let ses = &self.ses;

        wait_for_resource(
            &self.create_wait,
            self.cancel.as_ref(),
            || async move {
                let organization = workmail.describe_organization(organization_id).await?;
                if organization.is_failed() {
                    return Err(ProviderError::OrganizationFailed {
                        organization_id: organization_id.to_string(),
                        message: organization
                            .error_message
                            .unwrap_or_else(|| "no error message".to_string()),
                    }
                    .into());
                }
                if !organization.is_active() {
                    debug!(
                        organization_id = %organization_id,
                        state = organization.state_or_unknown(),
                        "Organization not active yet"
                    );
                    return Ok(false);
                }
                if domains.is_empty() {
                    return Ok(true);
                }

                let statuses = ses.verification_statuses(domains.to_vec()).await?;
                for domain in domains {
                    match statuses.get(domain) {
                        Some(VerificationStatus::Success) => {}
                        Some(VerificationStatus::Failed) => {
                            return Err(ProviderError::VerificationFailed {
                                domain: domain.clone(),
                                status: VerificationStatus::Failed.to_string(),
                            }
                            .into());
                        }
                        status => {
                            debug!(domain = %domain, ?status, "Domain not verified yet");
                            return Ok(false);
                        }
                    }
                }
                Ok(true)
            },
            "WorkMail organization",
        )
        .await
    }

    /// Poll until DescribeOrganization reports Deleted or stops finding it.
    async fn wait_until_deleted(&self, organization_id: &str) -> Result<()> {
        let workmail = &self.workmail;

        wait_for_resource(
            &self.delete_wait,
            self.cancel.as_ref(),
            || async move {
                match workmail.describe_organization(organization_id).await {
                    Ok(organization) => Ok(organization.is_deleted()),
                    Err(e) if is_not_found(&e) => Ok(true),
                    Err(e) => Err(e),
                }
            },
            "WorkMail organization deletion",
        )
        .await
    }
}

impl<W: WorkMailOperations, S: SesOperations> Resource for OrganizationResource<W, S> {
    const KIND: ResourceKind = ResourceKind::Organization;

    type Args = OrganizationArgs;
    type State = OrganizationState;

    async fn create(
        &self,
        name: &str,
        args: OrganizationArgs,
        preview: bool,
    ) -> Result<Created<OrganizationState>> {
        if preview {
            return Ok(Created::new(name, OrganizationState::from(args)));
        }

        let organization_id = self
            .workmail
            .create_organization(CreateOrganizationRequest::from(&args))
            .await?;

        self.wait_until_ready(&organization_id, &args.domain_names())
            .await
            .with_context(|| {
                format!("Organization {organization_id} was created but did not become ready")
            })?;
        info!(organization_id = %organization_id, "Organization active");

        let mut state = OrganizationState {
            organization_id: Some(organization_id.clone()),
            ..OrganizationState::from(args)
        };

        if let Some(domain) = state.args.default_domain().map(|d| d.domain_name.clone()) {
            self.workmail
                .update_default_mail_domain(&organization_id, &domain)
                .await?;
            state.records = self
                .workmail
                .get_mail_domain_records(&organization_id, &domain)
                .await?;
            state.default_mail_domain = Some(domain);
        }

        Ok(Created::new(organization_id, state))
    }

    async fn delete(&self, id: &str, state: OrganizationState) -> Result<()> {
        let organization = match self.workmail.describe_organization(id).await {
            Ok(organization) => organization,
            Err(e) if is_not_found(&e) => {
                info!(organization_id = %id, "Organization not found, nothing to delete");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if organization.is_deleted() {
            info!(organization_id = %id, "Organization already deleted");
            return Ok(());
        }

        self.workmail.delete_organization(id).await?;
        self.wait_until_deleted(id).await?;
        info!(organization_id = %id, "Organization deleted");

        for domain in state.args.domain_names() {
            self.ses.delete_identity(&domain).await.with_context(|| {
                format!("Organization {id} was deleted but SES identity {domain} was not")
            })?;
        }

        Ok(())
    }
}
