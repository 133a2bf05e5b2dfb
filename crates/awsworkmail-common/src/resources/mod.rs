//! Typed inputs, state and diff policy for every resource
//!
//! Field names serialize in camelCase, matching the Pulumi property names.
//! Remote-assigned fields are `Option`s so a preview can echo the inputs
//! without inventing identifiers.

pub mod default_domain;
pub mod email_sender;
pub mod organization;
pub mod registration;
pub mod user;

use serde::{Deserialize, Serialize};

pub use default_domain::{DefaultDomainArgs, DefaultDomainState};
pub use email_sender::{CognitoEmailSenderArgs, CognitoEmailSenderState};
pub use organization::{OrganizationArgs, OrganizationDomain, OrganizationState};
pub use registration::{WorkmailRegistrationArgs, WorkmailRegistrationState};
pub use user::{OrganizationRef, OrganizationRefError, UserArgs, UserState};

/// DNS record a domain owner must publish for mail delivery or verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record type (MX, TXT, CNAME)
    #[serde(rename = "type")]
    pub record_type: String,
    pub hostname: String,
    pub value: String,
}
