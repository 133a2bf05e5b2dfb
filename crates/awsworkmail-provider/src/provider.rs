//! Request dispatch by resource kind
//!
//! Parses the untyped property bags into the typed args and state of the
//! requested kind, builds the handler with clients for the resource's
//! region, and serializes the result back.

use crate::aws::{AwsContext, CognitoClient, SesClient, WorkMailClient};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::resources::{
    CognitoEmailSenderResource, Created, DefaultDomainResource, OrganizationResource, Resource,
    UserResource, WorkmailRegistrationResource,
};
use anyhow::{Context, Result};
use awsworkmail_common::resources::{
    CognitoEmailSenderState, DefaultDomainState, OrganizationState, UserState,
    WorkmailRegistrationState, default_domain, email_sender, organization, registration, user,
};
use awsworkmail_common::{DiffResponse, ResourceKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Result of a create: the id and the full property bag to persist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateResponse {
    pub id: String,
    pub properties: Value,
}

pub struct Provider {
    config: ProviderConfig,
    cancel: CancellationToken,
}

impl Provider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop in-progress polling when `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    async fn aws(&self, region: Option<&str>) -> AwsContext {
        AwsContext::load(
            self.config.region_for(region),
            self.config.aws_profile.as_deref(),
        )
        .await
    }

    pub async fn create(
        &self,
        kind: ResourceKind,
        name: &str,
        inputs: Value,
        preview: bool,
    ) -> Result<CreateResponse> {
        match kind {
            ResourceKind::Organization => {
                let args: organization::OrganizationArgs = parse(kind, inputs)?;
                let aws = self.aws(Some(&args.region)).await;
                let resource = OrganizationResource::new(
                    WorkMailClient::from_context(&aws),
                    SesClient::from_context(&aws),
                    &self.config.poll,
                )
                .with_cancellation(self.cancel.clone());
                run_create(&resource, name, args, preview).await
            }
            ResourceKind::DefaultDomain => {
                let args: default_domain::DefaultDomainArgs = parse(kind, inputs)?;
                let aws = self.aws(Some(&args.region)).await;
                let resource = DefaultDomainResource::new(WorkMailClient::from_context(&aws));
                run_create(&resource, name, args, preview).await
            }
            ResourceKind::User => {
                let args: user::UserArgs = parse(kind, inputs)?;
                let aws = self.aws(Some(&args.region)).await;
                let resource = UserResource::new(WorkMailClient::from_context(&aws));
                run_create(&resource, name, args, preview).await
            }
            ResourceKind::WorkmailRegistration => {
                let args: registration::WorkmailRegistrationArgs = parse(kind, inputs)?;
                let aws = self.aws(Some(&args.region)).await;
                let resource =
                    WorkmailRegistrationResource::new(WorkMailClient::from_context(&aws));
                run_create(&resource, name, args, preview).await
            }
            ResourceKind::CognitoEmailSender => {
                let args: email_sender::CognitoEmailSenderArgs = parse(kind, inputs)?;
                let aws = self.aws(args.region.as_deref()).await;
                let resource = CognitoEmailSenderResource::new(CognitoClient::from_context(&aws));
                run_create(&resource, name, args, preview).await
            }
        }
    }

    pub async fn delete(&self, kind: ResourceKind, id: &str, state: Value) -> Result<()> {
        info!(kind = %kind, id = %id, "Deleting resource");

        let result = match kind {
            ResourceKind::Organization => {
                let state: OrganizationState = parse(kind, state)?;
                let aws = self.aws(Some(&state.args.region)).await;
                OrganizationResource::new(
                    WorkMailClient::from_context(&aws),
                    SesClient::from_context(&aws),
                    &self.config.poll,
                )
                .with_cancellation(self.cancel.clone())
                .delete(id, state)
                .await
            }
            ResourceKind::DefaultDomain => {
                let state: DefaultDomainState = parse(kind, state)?;
                let aws = self.aws(Some(&state.args.region)).await;
                DefaultDomainResource::new(WorkMailClient::from_context(&aws))
                    .delete(id, state)
                    .await
            }
            ResourceKind::User => {
                let state: UserState = parse(kind, state)?;
                let aws = self.aws(Some(&state.region)).await;
                UserResource::new(WorkMailClient::from_context(&aws))
                    .delete(id, state)
                    .await
            }
            ResourceKind::WorkmailRegistration => {
                let state: WorkmailRegistrationState = parse(kind, state)?;
                let aws = self.aws(Some(&state.region)).await;
                WorkmailRegistrationResource::new(WorkMailClient::from_context(&aws))
                    .delete(id, state)
                    .await
            }
            ResourceKind::CognitoEmailSender => {
                let state: CognitoEmailSenderState = parse(kind, state)?;
                let aws = self.aws(state.region.as_deref()).await;
                CognitoEmailSenderResource::new(CognitoClient::from_context(&aws))
                    .delete(id, state)
                    .await
            }
        };

        result.with_context(|| format!("Failed to delete {kind} {id}"))
    }
}

/// Compare stored state against new inputs. Pure; makes no remote calls.
pub fn diff(kind: ResourceKind, olds: Value, news: Value) -> Result<DiffResponse, ProviderError> {
    Ok(match kind {
        ResourceKind::Organization => organization::diff(&parse(kind, olds)?, &parse(kind, news)?),
        ResourceKind::DefaultDomain => {
            default_domain::diff(&parse(kind, olds)?, &parse(kind, news)?)
        }
        ResourceKind::User => user::diff(&parse(kind, olds)?, &parse(kind, news)?),
        ResourceKind::WorkmailRegistration => {
            registration::diff(&parse(kind, olds)?, &parse(kind, news)?)
        }
        ResourceKind::CognitoEmailSender => {
            email_sender::diff(&parse(kind, olds)?, &parse(kind, news)?)
        }
    })
}

fn parse<T: DeserializeOwned>(kind: ResourceKind, value: Value) -> Result<T, ProviderError> {
    serde_json::from_value(value)
        .map_err(|source| ProviderError::InvalidProperties { kind, source })
}

async fn run_create<R: Resource>(
    resource: &R,
    name: &str,
    args: R::Args,
    preview: bool,
) -> Result<CreateResponse> {
    info!(kind = %R::KIND, name = %name, preview, "Creating resource");

    let Created { id, state } = resource
        .create(name, args, preview)
        .await
        .with_context(|| format!("Failed to create {} {name}", R::KIND))?;
    let properties = serde_json::to_value(state).context("Failed to serialize resource state")?;

    info!(kind = %R::KIND, id = %id, "Resource created");
    Ok(CreateResponse { id, properties })
}
