//! Request and response types passed across the operations traits

use awsworkmail_common::defaults::{
    ORGANIZATION_STATE_ACTIVE, ORGANIZATION_STATE_DELETED, ORGANIZATION_STATE_FAILED,
};
use awsworkmail_common::resources::{OrganizationArgs, OrganizationDomain, UserArgs};
use std::fmt;

/// Parameters for CreateOrganization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrganizationRequest {
    pub alias: String,
    pub domains: Vec<OrganizationDomain>,
    pub client_token: Option<String>,
    pub directory_id: Option<String>,
    pub kms_key_arn: Option<String>,
    pub enable_interoperability: bool,
}

impl From<&OrganizationArgs> for CreateOrganizationRequest {
    fn from(args: &OrganizationArgs) -> Self {
        Self {
            alias: args.alias.clone(),
            domains: args.domains.clone(),
            client_token: args.client_token.clone(),
            directory_id: args.directory_id.clone(),
            kms_key_arn: args.kms_key_arn.clone(),
            enable_interoperability: args.interoperability_enabled(),
        }
    }
}

/// Result of DescribeOrganization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationDescription {
    pub organization_id: String,
    pub alias: Option<String>,
    /// Lifecycle state as reported by WorkMail (Requested, Creating, Active, ...)
    pub state: Option<String>,
    pub default_mail_domain: Option<String>,
    pub error_message: Option<String>,
}

impl OrganizationDescription {
    pub fn is_active(&self) -> bool {
        self.state.as_deref() == Some(ORGANIZATION_STATE_ACTIVE)
    }

    pub fn is_deleted(&self) -> bool {
        self.state.as_deref() == Some(ORGANIZATION_STATE_DELETED)
    }

    pub fn is_failed(&self) -> bool {
        self.state.as_deref() == Some(ORGANIZATION_STATE_FAILED)
    }

    pub fn state_or_unknown(&self) -> &str {
        self.state.as_deref().unwrap_or("Unknown")
    }
}

/// One entry of ListOrganizations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationSummary {
    pub organization_id: Option<String>,
    pub alias: Option<String>,
    pub default_mail_domain: Option<String>,
    pub state: Option<String>,
}

/// Parameters for CreateUser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub organization_id: String,
    pub name: String,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub hidden_from_global_address_list: bool,
}

impl CreateUserRequest {
    pub fn new(organization_id: impl Into<String>, args: &UserArgs) -> Self {
        Self {
            organization_id: organization_id.into(),
            name: args.name.clone(),
            display_name: args.display_name.clone(),
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            password: args.password.clone(),
            hidden_from_global_address_list: args.hidden(),
        }
    }
}

/// State of a user, group or resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityState {
    Enabled,
    Disabled,
    Deleted,
    Unknown(String),
}

impl EntityState {
    pub fn parse(state: &str) -> Self {
        match state {
            "ENABLED" => EntityState::Enabled,
            "DISABLED" => EntityState::Disabled,
            "DELETED" => EntityState::Deleted,
            other => EntityState::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityState::Enabled => "ENABLED",
            EntityState::Disabled => "DISABLED",
            EntityState::Deleted => "DELETED",
            EntityState::Unknown(s) => s,
        }
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SES identity verification status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Success,
    Failed,
    TemporaryFailure,
    NotStarted,
    Unknown(String),
}

impl VerificationStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "Pending" => VerificationStatus::Pending,
            "Success" => VerificationStatus::Success,
            "Failed" => VerificationStatus::Failed,
            "TemporaryFailure" => VerificationStatus::TemporaryFailure,
            "NotStarted" => VerificationStatus::NotStarted,
            other => VerificationStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VerificationStatus::Pending => "Pending",
            VerificationStatus::Success => "Success",
            VerificationStatus::Failed => "Failed",
            VerificationStatus::TemporaryFailure => "TemporaryFailure",
            VerificationStatus::NotStarted => "NotStarted",
            VerificationStatus::Unknown(s) => s,
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
