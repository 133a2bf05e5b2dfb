//! WorkMail organization, mail domain, user and registration management

use super::context::AwsContext;
use super::error::from_sdk_error;
use super::types::{
    CreateOrganizationRequest, CreateUserRequest, EntityState, OrganizationDescription,
    OrganizationSummary,
};
use anyhow::{Context, Result};
use aws_sdk_workmail::Client;
use aws_sdk_workmail::types::Domain;
use awsworkmail_common::DnsRecord;
use tracing::{debug, info};

/// WorkMail client for the organization, domain and user resources
pub struct WorkMailClient {
    client: Client,
}

impl WorkMailClient {
    /// Create a WorkMail client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.workmail_client(),
        }
    }

    /// Start creating an organization. Returns its id; the organization is
    /// provisioned asynchronously and starts out in the `Requested` state.
    pub async fn create_organization(&self, request: CreateOrganizationRequest) -> Result<String> {
        info!(
            alias = %request.alias,
            domains = request.domains.len(),
            "Creating WorkMail organization"
        );

        let domains = request
            .domains
            .iter()
            .map(|d| {
                Domain::builder()
                    .domain_name(&d.domain_name)
                    .set_hosted_zone_id(d.hosted_zone_id.clone())
                    .build()
                    .map_err(|e| anyhow::anyhow!("Failed to build domain {}: {}", d.domain_name, e))
            })
            .collect::<Result<Vec<_>>>()?;

        let response = self
            .client
            .create_organization()
            .alias(&request.alias)
            .set_domains((!domains.is_empty()).then_some(domains))
            .set_client_token(request.client_token)
            .set_directory_id(request.directory_id)
            .set_kms_key_arn(request.kms_key_arn)
            .enable_interoperability(request.enable_interoperability)
            .send()
            .await
            .map_err(from_sdk_error)
            .context("Failed to create WorkMail organization")?;

        let organization_id = response
            .organization_id()
            .context("No organization ID in CreateOrganization response")?
            .to_string();

        info!(organization_id = %organization_id, "Organization requested");
        Ok(organization_id)
    }

    pub async fn describe_organization(
        &self,
        organization_id: &str,
    ) -> Result<OrganizationDescription> {
        let response = self
            .client
            .describe_organization()
            .organization_id(organization_id)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to describe organization {organization_id}"))?;

        let description = OrganizationDescription {
            organization_id: response
                .organization_id()
                .unwrap_or(organization_id)
                .to_string(),
            alias: response.alias().map(str::to_string),
            state: response.state().map(str::to_string),
            default_mail_domain: response.default_mail_domain().map(str::to_string),
            error_message: response.error_message().map(str::to_string),
        };

        debug!(
            organization_id = %organization_id,
            state = description.state_or_unknown(),
            "Described organization"
        );
        Ok(description)
    }

    /// Delete an organization together with its directory and mailboxes
    pub async fn delete_organization(&self, organization_id: &str) -> Result<()> {
        info!(organization_id = %organization_id, "Deleting WorkMail organization");

        self.client
            .delete_organization()
            .organization_id(organization_id)
            .delete_directory(true)
            .force_delete(true)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to delete organization {organization_id}"))?;

        Ok(())
    }

    /// List every organization in the region, following pagination
    pub async fn list_organizations(&self) -> Result<Vec<OrganizationSummary>> {
        let mut summaries = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_organizations()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(from_sdk_error)
                .context("Failed to list WorkMail organizations")?;

            summaries.extend(response.organization_summaries().iter().map(|s| {
                OrganizationSummary {
                    organization_id: s.organization_id().map(str::to_string),
                    alias: s.alias().map(str::to_string),
                    default_mail_domain: s.default_mail_domain().map(str::to_string),
                    state: s.state().map(str::to_string),
                }
            }));

            match response.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(count = summaries.len(), "Listed organizations");
        Ok(summaries)
    }

    pub async fn register_mail_domain(
        &self,
        organization_id: &str,
        domain_name: &str,
        client_token: Option<String>,
    ) -> Result<()> {
        info!(organization_id = %organization_id, domain = %domain_name, "Registering mail domain");

        self.client
            .register_mail_domain()
            .organization_id(organization_id)
            .domain_name(domain_name)
            .set_client_token(client_token)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to register mail domain {domain_name}"))?;

        Ok(())
    }

    pub async fn deregister_mail_domain(
        &self,
        organization_id: &str,
        domain_name: &str,
    ) -> Result<()> {
        info!(
            organization_id = %organization_id,
            domain = %domain_name,
            "Deregistering mail domain"
        );

        self.client
            .deregister_mail_domain()
            .organization_id(organization_id)
            .domain_name(domain_name)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to deregister mail domain {domain_name}"))?;

        Ok(())
    }

    pub async fn update_default_mail_domain(
        &self,
        organization_id: &str,
        domain_name: &str,
    ) -> Result<()> {
        info!(
            organization_id = %organization_id,
            domain = %domain_name,
            "Setting default mail domain"
        );

        self.client
            .update_default_mail_domain()
            .organization_id(organization_id)
            .domain_name(domain_name)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to set default mail domain to {domain_name}"))?;

        Ok(())
    }

    /// DNS records the domain owner must publish for the domain
    pub async fn get_mail_domain_records(
        &self,
        organization_id: &str,
        domain_name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let response = self
            .client
            .get_mail_domain()
            .organization_id(organization_id)
            .domain_name(domain_name)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to get mail domain {domain_name}"))?;

        let records: Vec<DnsRecord> = response
            .records()
            .iter()
            .map(|r| DnsRecord {
                record_type: r.r#type().unwrap_or_default().to_string(),
                hostname: r.hostname().unwrap_or_default().to_string(),
                value: r.value().unwrap_or_default().to_string(),
            })
            .collect();

        debug!(domain = %domain_name, count = records.len(), "Fetched mail domain records");
        Ok(records)
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<String> {
        info!(
            organization_id = %request.organization_id,
            name = %request.name,
            "Creating WorkMail user"
        );

        let response = self
            .client
            .create_user()
            .organization_id(&request.organization_id)
            .name(&request.name)
            .display_name(&request.display_name)
            .set_first_name(request.first_name)
            .set_last_name(request.last_name)
            .set_password(request.password)
            .hidden_from_global_address_list(request.hidden_from_global_address_list)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to create user {}", request.name))?;

        let user_id = response
            .user_id()
            .context("No user ID in CreateUser response")?
            .to_string();

        info!(user_id = %user_id, "User created");
        Ok(user_id)
    }

    pub async fn describe_user_state(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<EntityState> {
        let response = self
            .client
            .describe_user()
            .organization_id(organization_id)
            .user_id(user_id)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to describe user {user_id}"))?;

        let state = response
            .state()
            .map(|s| EntityState::parse(s.as_str()))
            .unwrap_or_else(|| EntityState::Unknown("(none)".to_string()));

        debug!(user_id = %user_id, state = %state, "Described user");
        Ok(state)
    }

    pub async fn delete_user(&self, organization_id: &str, user_id: &str) -> Result<()> {
        info!(organization_id = %organization_id, user_id = %user_id, "Deleting WorkMail user");

        self.client
            .delete_user()
            .organization_id(organization_id)
            .user_id(user_id)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to delete user {user_id}"))?;

        Ok(())
    }

    /// Enable an entity for WorkMail under the given primary address
    pub async fn register_to_workmail(
        &self,
        organization_id: &str,
        entity_id: &str,
        email: &str,
    ) -> Result<()> {
        info!(entity_id = %entity_id, email = %email, "Registering entity to WorkMail");

        self.client
            .register_to_work_mail()
            .organization_id(organization_id)
            .entity_id(entity_id)
            .email(email)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to register {entity_id} as {email}"))?;

        Ok(())
    }

    pub async fn deregister_from_workmail(
        &self,
        organization_id: &str,
        entity_id: &str,
    ) -> Result<()> {
        info!(entity_id = %entity_id, "Deregistering entity from WorkMail");

        self.client
            .deregister_from_work_mail()
            .organization_id(organization_id)
            .entity_id(entity_id)
            .send()
            .await
            .map_err(from_sdk_error)
            .with_context(|| format!("Failed to deregister {entity_id}"))?;

        Ok(())
    }
}

/// Trait for WorkMail operations that can be mocked in tests.
///
/// Note: Some parameters use `Option<String>` instead of `Option<&str>` to work
/// around mockall lifetime limitations.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait WorkMailOperations: Send + Sync {
    async fn create_organization(&self, request: CreateOrganizationRequest) -> Result<String>;

    async fn describe_organization(&self, organization_id: &str) -> Result<OrganizationDescription>;

    async fn delete_organization(&self, organization_id: &str) -> Result<()>;

    async fn list_organizations(&self) -> Result<Vec<OrganizationSummary>>;

    async fn register_mail_domain(
        &self,
        organization_id: &str,
        domain_name: &str,
        client_token: Option<String>,
    ) -> Result<()>;

    async fn deregister_mail_domain(&self, organization_id: &str, domain_name: &str) -> Result<()>;

    async fn update_default_mail_domain(&self, organization_id: &str, domain_name: &str)
    -> Result<()>;

    async fn get_mail_domain_records(
        &self,
        organization_id: &str,
        domain_name: &str,
    ) -> Result<Vec<DnsRecord>>;

    async fn create_user(&self, request: CreateUserRequest) -> Result<String>;

    async fn describe_user_state(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<EntityState>;

    async fn delete_user(&self, organization_id: &str, user_id: &str) -> Result<()>;

    async fn register_to_workmail(
        &self,
        organization_id: &str,
        entity_id: &str,
        email: &str,
    ) -> Result<()>;

    async fn deregister_from_workmail(&self, organization_id: &str, entity_id: &str) -> Result<()>;
}

impl WorkMailOperations for WorkMailClient {
    async fn create_organization(&self, request: CreateOrganizationRequest) -> Result<String> {
        WorkMailClient::create_organization(self, request).await
    }

    async fn describe_organization(
        &self,
        organization_id: &str,
    ) -> Result<OrganizationDescription> {
        WorkMailClient::describe_organization(self, organization_id).await
    }

    async fn delete_organization(&self, organization_id: &str) -> Result<()> {
        WorkMailClient::delete_organization(self, organization_id).await
    }

    async fn list_organizations(&self) -> Result<Vec<OrganizationSummary>> {
        WorkMailClient::list_organizations(self).await
    }

    async fn register_mail_domain(
        &self,
        organization_id: &str,
        domain_name: &str,
        client_token: Option<String>,
    ) -> Result<()> {
        WorkMailClient::register_mail_domain(self, organization_id, domain_name, client_token).await
    }

    async fn deregister_mail_domain(&self, organization_id: &str, domain_name: &str) -> Result<()> {
        WorkMailClient::deregister_mail_domain(self, organization_id, domain_name).await
    }

    async fn update_default_mail_domain(
        &self,
        organization_id: &str,
        domain_name: &str,
    ) -> Result<()> {
        WorkMailClient::update_default_mail_domain(self, organization_id, domain_name).await
    }

    async fn get_mail_domain_records(
        &self,
        organization_id: &str,
        domain_name: &str,
    ) -> Result<Vec<DnsRecord>> {
        WorkMailClient::get_mail_domain_records(self, organization_id, domain_name).await
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<String> {
        WorkMailClient::create_user(self, request).await
    }

    async fn describe_user_state(
        &self,
        organization_id: &str,
        user_id: &str,
    ) -> Result<EntityState> {
        WorkMailClient::describe_user_state(self, organization_id, user_id).await
    }

    async fn delete_user(&self, organization_id: &str, user_id: &str) -> Result<()> {
        WorkMailClient::delete_user(self, organization_id, user_id).await
    }

    async fn register_to_workmail(
        &self,
        organization_id: &str,
        entity_id: &str,
        email: &str,
    ) -> Result<()> {
        WorkMailClient::register_to_workmail(self, organization_id, entity_id, email).await
    }

    async fn deregister_from_workmail(&self, organization_id: &str, entity_id: &str) -> Result<()> {
        WorkMailClient::deregister_from_workmail(self, organization_id, entity_id).await
    }
}
