//! Resource kinds managed by the provider
//!
//! Every request names its resource through a Pulumi type token such as
//! `awsworkmail:index:Organization`. Parsing the token into a [`ResourceKind`]
//! is the single dispatch point for create, delete and diff.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pulumi package name, first segment of every type token
pub const PACKAGE_NAME: &str = "awsworkmail";

/// Module segment of every type token
pub const MODULE_NAME: &str = "index";

/// Types of resources managed by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// WorkMail organization (asynchronously provisioned)
    Organization,
    /// Mail domain registered and set as the organization default
    DefaultDomain,
    /// WorkMail user
    User,
    /// Email address registration for a user, group or resource
    WorkmailRegistration,
    /// Custom email sender lambda on a Cognito user pool
    CognitoEmailSender,
}

/// Returned when a type token does not name a known resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resource type: {0}")]
pub struct UnknownResourceType(pub String);

impl ResourceKind {
    /// All resource kinds, leaves of the dependency graph first
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Organization,
        ResourceKind::DefaultDomain,
        ResourceKind::User,
        ResourceKind::WorkmailRegistration,
        ResourceKind::CognitoEmailSender,
    ];

    /// Resource name as used in the type token
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Organization => "Organization",
            ResourceKind::DefaultDomain => "DefaultDomain",
            ResourceKind::User => "User",
            ResourceKind::WorkmailRegistration => "WorkmailRegistration",
            ResourceKind::CognitoEmailSender => "CognitoEmailSender",
        }
    }

    /// Full Pulumi type token, e.g. `awsworkmail:index:User`
    pub fn type_token(self) -> String {
        format!("{PACKAGE_NAME}:{MODULE_NAME}:{}", self.as_str())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = UnknownResourceType;

    /// Accepts either a full type token or the bare resource name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s.split(':').collect::<Vec<_>>().as_slice() {
            [package, module, name] if *package == PACKAGE_NAME && *module == MODULE_NAME => *name,
            [name] => *name,
            _ => return Err(UnknownResourceType(s.to_string())),
        };

        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| UnknownResourceType(s.to_string()))
    }
}
