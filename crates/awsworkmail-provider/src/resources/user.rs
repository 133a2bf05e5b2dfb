//! User lifecycle
//!
//! The owning organization is named either by id or by its default mail
//! domain. Domain lookups scan every organization in the region.

use super::{Created, Resource};
use crate::aws::{CreateUserRequest, EntityState, WorkMailOperations, is_not_found};
use crate::error::ProviderError;
use anyhow::Result;
use awsworkmail_common::ResourceKind;
use awsworkmail_common::resources::{OrganizationRef, UserArgs, UserState};
use tracing::{debug, info};

pub struct UserResource<W> {
    workmail: W,
}

impl<W: WorkMailOperations> UserResource<W> {
    pub fn new(workmail: W) -> Self {
        Self { workmail }
    }

    /// Id of the first organization whose default mail domain is exactly `domain`
    async fn find_organization_by_domain(&self, domain: &str) -> Result<String> {
        let organizations = self.workmail.list_organizations().await?;
        debug!(
            domain = %domain,
            candidates = organizations.len(),
            "Resolving organization by domain"
        );

        organizations
            .into_iter()
            .find(|o| o.default_mail_domain.as_deref() == Some(domain))
            .and_then(|o| o.organization_id)
            .ok_or_else(|| {
                ProviderError::NotFound(format!(
                    "no workmail organization with domain {domain} found"
                ))
                .into()
            })
    }
}

impl<W: WorkMailOperations> Resource for UserResource<W> {
    const KIND: ResourceKind = ResourceKind::User;

    type Args = UserArgs;
    type State = UserState;

    async fn create(
        &self,
        name: &str,
        args: UserArgs,
        preview: bool,
    ) -> Result<Created<UserState>> {
        if preview {
            return Ok(Created::new(name, UserState::from(args)));
        }

        let organization_id = match args
            .organization_ref()
            .map_err(|e| ProviderError::Precondition(e.to_string()))?
        {
            OrganizationRef::Id(id) => id.to_string(),
            OrganizationRef::Domain(domain) => self.find_organization_by_domain(domain).await?,
        };

        let user_id = self
            .workmail
            .create_user(CreateUserRequest::new(&organization_id, &args))
            .await?;

        Ok(Created::new(
            user_id.clone(),
            UserState::created(args, organization_id, user_id),
        ))
    }

    /// Only disabled users can be deleted; the user is never disabled here.
    async fn delete(&self, id: &str, state: UserState) -> Result<()> {
        let organization_id = state.organization_id.as_deref().ok_or_else(|| {
            ProviderError::Precondition(format!("user {id} has no organizationId in its state"))
        })?;

        let user_state = match self.workmail.describe_user_state(organization_id, id).await {
            Ok(user_state) => user_state,
            Err(e) if is_not_found(&e) => {
                info!(user_id = %id, "User not found, nothing to delete");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if user_state != EntityState::Disabled {
            return Err(ProviderError::Precondition(format!(
                "user {id} is not in a deletable state (needs to be DISABLED)"
            ))
            .into());
        }

        self.workmail.delete_user(organization_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{MockWorkMailOperations, OrganizationSummary, classify_aws_error};
    use crate::error::{ErrorKind, classify_error};
    use mockall::predicate::eq;

    fn args() -> UserArgs {
        UserArgs {
            region: "eu-west-1".to_string(),
            display_name: "Jane Doe".to_string(),
            name: "jane".to_string(),
            organization_id: Some("m-1".to_string()),
            domain: None,
            first_name: None,
            last_name: None,
            password: Some("Passw0rd!".to_string()),
            hidden_from_global_address_list: None,
        }
    }

    fn domain_args(domain: &str) -> UserArgs {
        UserArgs {
            organization_id: None,
            domain: Some(domain.to_string()),
            ..args()
        }
    }

    fn summary(id: &str, domain: Option<&str>) -> OrganizationSummary {
        OrganizationSummary {
            organization_id: Some(id.to_string()),
            default_mail_domain: domain.map(str::to_string),
            ..Default::default()
        }
    }

    fn created_state() -> UserState {
        UserState::created(args(), "m-1".to_string(), "u-1".to_string())
    }

    #[tokio::test]
    async fn test_preview_echoes_inputs() {
        let resource = UserResource::new(MockWorkMailOperations::new());
        let created = resource.create("jane", domain_args("acme.io"), true).await.unwrap();

        assert_eq!(created.id, "jane");
        assert_eq!(created.state, UserState::from(domain_args("acme.io")));
        assert!(created.state.user_id.is_none());
    }

    #[tokio::test]
    async fn test_create_requires_organization_reference() {
        let mut workmail = MockWorkMailOperations::new();
        workmail.expect_list_organizations().never();
        workmail.expect_create_user().never();

        let resource = UserResource::new(workmail);
        let neither = UserArgs {
            organization_id: None,
            ..args()
        };
        let err = resource.create("jane", neither, false).await.unwrap_err();

        assert_eq!(err.to_string(), "either organizationId or domain must be specified");
        assert_eq!(classify_error(&err), ErrorKind::Precondition);
    }

    #[tokio::test]
    async fn test_create_rejects_both_references() {
        let mut workmail = MockWorkMailOperations::new();
        workmail.expect_list_organizations().never();
        workmail.expect_create_user().never();

        let resource = UserResource::new(workmail);
        let both = UserArgs {
            domain: Some("acme.io".to_string()),
            ..args()
        };
        let err = resource.create("jane", both, false).await.unwrap_err();
        assert_eq!(classify_error(&err), ErrorKind::Precondition);
    }

    #[tokio::test]
    async fn test_create_with_organization_id() {
        let mut workmail = MockWorkMailOperations::new();
        workmail.expect_list_organizations().never();
        workmail
            .expect_create_user()
            .withf(|r| {
                r.organization_id == "m-1"
                    && r.name == "jane"
                    && r.display_name == "Jane Doe"
                    && !r.hidden_from_global_address_list
            })
            .times(1)
            .returning(|_| Ok("u-1".to_string()));

        let resource = UserResource::new(workmail);
        let created = resource.create("jane", args(), false).await.unwrap();

        assert_eq!(created.id, "u-1");
        assert_eq!(created.state, created_state());
    }

    #[tokio::test]
    async fn test_create_resolves_domain() {
        let mut workmail = MockWorkMailOperations::new();
        workmail.expect_list_organizations().times(1).returning(|| {
            Ok(vec![
                summary("m-0", None),
                summary("m-1", Some("other.io")),
                summary("m-2", Some("acme.io")),
                summary("m-3", Some("acme.io")),
            ])
        });
        workmail
            .expect_create_user()
            .withf(|r| r.organization_id == "m-2")
            .times(1)
            .returning(|_| Ok("u-9".to_string()));

        let resource = UserResource::new(workmail);
        let created = resource
            .create("jane", domain_args("acme.io"), false)
            .await
            .unwrap();

        assert_eq!(created.id, "u-9");
        assert_eq!(created.state.organization_id.as_deref(), Some("m-2"));
        assert_eq!(created.state.domain.as_deref(), Some("acme.io"));
        assert!(created.state.is_domain_mode());
    }

    #[tokio::test]
    async fn test_create_domain_match_is_exact() {
        let mut workmail = MockWorkMailOperations::new();
        workmail
            .expect_list_organizations()
            .times(1)
            .returning(|| Ok(vec![summary("m-1", Some("Acme.io"))]));
        workmail.expect_create_user().never();

        let resource = UserResource::new(workmail);
        let err = resource
            .create("jane", domain_args("acme.io"), false)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "no workmail organization with domain acme.io found");
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_disabled_user() {
        let mut workmail = MockWorkMailOperations::new();
        workmail
            .expect_describe_user_state()
            .with(eq("m-1"), eq("u-1"))
            .times(1)
            .returning(|_, _| Ok(EntityState::Disabled));
        workmail
            .expect_delete_user()
            .with(eq("m-1"), eq("u-1"))
            .times(1)
            .returning(|_, _| Ok(()));

        UserResource::new(workmail)
            .delete("u-1", created_state())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_refuses_enabled_user() {
        for state in [EntityState::Enabled, EntityState::Deleted] {
            let mut workmail = MockWorkMailOperations::new();
            let returned = state.clone();
            workmail
                .expect_describe_user_state()
                .times(1)
                .returning(move |_, _| Ok(returned.clone()));
            workmail.expect_delete_user().never();

            let err = UserResource::new(workmail)
                .delete("u-1", created_state())
                .await
                .unwrap_err();

            assert_eq!(
                err.to_string(),
                "user u-1 is not in a deletable state (needs to be DISABLED)"
            );
            assert_eq!(classify_error(&err), ErrorKind::Precondition, "{state}");
        }
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_noop() {
        let mut workmail = MockWorkMailOperations::new();
        workmail.expect_describe_user_state().times(1).returning(|_, _| {
            Err(classify_aws_error(Some("EntityNotFoundException"), None).into())
        });
        workmail.expect_delete_user().never();

        UserResource::new(workmail)
            .delete("u-1", created_state())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_propagates_other_describe_errors() {
        let mut workmail = MockWorkMailOperations::new();
        workmail.expect_describe_user_state().times(1).returning(|_, _| {
            Err(classify_aws_error(Some("AccessDeniedException"), Some("denied")).into())
        });
        workmail.expect_delete_user().never();

        let err = UserResource::new(workmail)
            .delete("u-1", created_state())
            .await
            .unwrap_err();

        assert!(!is_not_found(&err));
        assert_eq!(classify_error(&err), ErrorKind::Fatal);
        assert!(err.to_string().contains("denied"));
    }
}
