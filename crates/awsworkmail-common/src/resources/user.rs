//! User schema, organization resolution mode and replacement policy
//!
//! A user names its organization either directly (`organizationId`) or
//! through the organization's default mail domain (`domain`). The state
//! keeps the resolved organization id and remembers which mode was used:
//! `domain` is only set in domain mode.

use crate::diff::{DiffBuilder, DiffKind, DiffResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserArgs {
    pub region: String,
    pub display_name: String,
    /// Login name. Directory user names allow 64 characters, others 20.
    pub name: String,
    /// Owning organization. Exactly one of this and `domain` must be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Default mail domain of the owning organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_from_global_address_list: Option<bool>,
}

/// How the owning organization of a user is identified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationRef<'a> {
    Id(&'a str),
    Domain(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrganizationRefError {
    #[error("either organizationId or domain must be specified")]
    Missing,

    #[error("only one of organizationId or domain may be specified")]
    Ambiguous,
}

impl UserArgs {
    pub fn organization_ref(&self) -> Result<OrganizationRef<'_>, OrganizationRefError> {
        match (self.organization_id.as_deref(), self.domain.as_deref()) {
            (Some(id), None) => Ok(OrganizationRef::Id(id)),
            (None, Some(domain)) => Ok(OrganizationRef::Domain(domain)),
            (None, None) => Err(OrganizationRefError::Missing),
            (Some(_), Some(_)) => Err(OrganizationRefError::Ambiguous),
        }
    }

    pub fn hidden(&self) -> bool {
        self.hidden_from_global_address_list.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub region: String,
    pub display_name: String,
    pub name: String,
    /// Resolved organization id (echoes the input during preview)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_from_global_address_list: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl UserState {
    /// State of a created user, with the organization the inputs resolved to.
    pub fn created(args: UserArgs, organization_id: String, user_id: String) -> Self {
        Self {
            organization_id: Some(organization_id),
            user_id: Some(user_id),
            ..Self::from(args)
        }
    }

    pub fn is_domain_mode(&self) -> bool {
        self.domain.is_some()
    }

    pub fn hidden(&self) -> bool {
        self.hidden_from_global_address_list.unwrap_or(false)
    }
}

impl From<UserArgs> for UserState {
    fn from(args: UserArgs) -> Self {
        Self {
            region: args.region,
            display_name: args.display_name,
            name: args.name,
            organization_id: args.organization_id,
            domain: args.domain,
            first_name: args.first_name,
            last_name: args.last_name,
            password: args.password,
            hidden_from_global_address_list: args.hidden_from_global_address_list,
            user_id: None,
        }
    }
}

/// Region and organization identity force replacement; profile fields do not.
///
/// Switching between domain mode and organizationId mode always replaces
/// both properties. The domain is not re-resolved, so a switch that would
/// land on the same organization still replaces.
pub fn diff(olds: &UserState, news: &UserArgs) -> DiffResponse {
    let mut builder = DiffBuilder::new();

    builder.replace_if_changed("region", &olds.region, &news.region);

    let was_domain_mode = olds.is_domain_mode();
    let is_domain_mode = news.domain.is_some();
    if was_domain_mode != is_domain_mode {
        let (domain_kind, organization_kind) = if is_domain_mode {
            (DiffKind::AddReplace, DiffKind::DeleteReplace)
        } else {
            (DiffKind::DeleteReplace, DiffKind::AddReplace)
        };
        builder
            .record("domain", domain_kind)
            .record("organizationId", organization_kind);
    } else if is_domain_mode {
        builder.replace_if_changed_opt("domain", olds.domain.as_deref(), news.domain.as_deref());
    } else {
        builder.replace_if_changed_opt(
            "organizationId",
            olds.organization_id.as_deref(),
            news.organization_id.as_deref(),
        );
    }

    builder
        .update_if_changed("displayName", &olds.display_name, &news.display_name)
        .update_if_changed("name", &olds.name, &news.name)
        .update_if_changed_opt(
            "firstName",
            olds.first_name.as_deref(),
            news.first_name.as_deref(),
        )
        .update_if_changed_opt(
            "lastName",
            olds.last_name.as_deref(),
            news.last_name.as_deref(),
        )
        .update_if_changed_opt("password", olds.password.as_deref(), news.password.as_deref())
        .update_if_changed(
            "hiddenFromGlobalAddressList",
            &olds.hidden(),
            &news.hidden(),
        );

    builder.build()
}
