//! Resource handlers
//!
//! Each handler owns the remote calls for one resource kind and is generic
//! over the operations traits in [`crate::aws`], so the create and delete
//! flows can be exercised against mocks. Diff is pure and lives with the
//! schema types in `awsworkmail_common::resources`.

pub mod default_domain;
pub mod email_sender;
pub mod organization;
pub mod registration;
pub mod user;

use anyhow::Result;
use awsworkmail_common::ResourceKind;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use default_domain::DefaultDomainResource;
pub use email_sender::CognitoEmailSenderResource;
pub use organization::OrganizationResource;
pub use registration::WorkmailRegistrationResource;
pub use user::UserResource;

/// Outcome of a create: the resource id and the state to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created<S> {
    pub id: String,
    pub state: S,
}

impl<S> Created<S> {
    pub fn new(id: impl Into<String>, state: S) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}

/// Lifecycle operations of one resource kind.
///
/// A create with `preview` set makes no remote calls: the id is the
/// resource name and the state echoes the inputs.
#[allow(async_fn_in_trait)] // Internal use only, handlers are never spawned
pub trait Resource {
    const KIND: ResourceKind;

    type Args: DeserializeOwned;
    type State: Serialize + DeserializeOwned;

    async fn create(
        &self,
        name: &str,
        args: Self::Args,
        preview: bool,
    ) -> Result<Created<Self::State>>;

    async fn delete(&self, id: &str, state: Self::State) -> Result<()>;
}
