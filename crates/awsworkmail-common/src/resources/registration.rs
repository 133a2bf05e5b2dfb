//! Workmail registration schema and replacement policy

use crate::diff::{DiffBuilder, DiffResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkmailRegistrationArgs {
    pub region: String,
    pub organization_id: String,
    /// User, group or resource to register (id or name)
    pub entity_id: String,
    /// Local part of the address; the organization's default domain is appended
    pub email_prefix: String,
}

impl WorkmailRegistrationArgs {
    /// Full address under the given mail domain, without any normalization.
    pub fn email_address(&self, mail_domain: &str) -> String {
        format!("{}@{}", self.email_prefix, mail_domain)
    }
}

/// Registrations have no remote identifier of their own
pub type WorkmailRegistrationState = WorkmailRegistrationArgs;

pub fn diff(olds: &WorkmailRegistrationState, news: &WorkmailRegistrationArgs) -> DiffResponse {
    let mut builder = DiffBuilder::new();
    builder
        .replace_if_changed("region", &olds.region, &news.region)
        .replace_if_changed("organizationId", &olds.organization_id, &news.organization_id)
        .replace_if_changed("entityId", &olds.entity_id, &news.entity_id)
        .replace_if_changed("emailPrefix", &olds.email_prefix, &news.email_prefix);
    builder.build()
}
