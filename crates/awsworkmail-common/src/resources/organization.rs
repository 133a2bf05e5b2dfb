//! Organization schema and replacement policy

use super::DnsRecord;
use crate::diff::{DiffBuilder, DiffKind, DiffResponse};
use serde::{Deserialize, Serialize};

/// A domain submitted with the organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDomain {
    pub domain_name: String,
    /// Route 53 hosted zone WorkMail writes the verification records into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_zone_id: Option<String>,
}

/// Inputs of an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationArgs {
    pub region: String,
    pub alias: String,
    /// Domains to attach. The first one becomes the default mail domain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<OrganizationDomain>,
    /// Idempotency token for CreateOrganization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    /// AWS Directory Service directory ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_id: Option<String>,
    /// Customer managed KMS key ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<String>,
    /// Interoperability with Microsoft Exchange (requires an AD Connector directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_interoperability: Option<bool>,
}

impl OrganizationArgs {
    /// Domain that becomes the default mail domain, if any
    pub fn default_domain(&self) -> Option<&OrganizationDomain> {
        self.domains.first()
    }

    pub fn domain_names(&self) -> Vec<String> {
        self.domains.iter().map(|d| d.domain_name.clone()).collect()
    }

    pub fn interoperability_enabled(&self) -> bool {
        self.enable_interoperability.unwrap_or(false)
    }
}

/// State of a created organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationState {
    #[serde(flatten)]
    pub args: OrganizationArgs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mail_domain: Option<String>,
    /// DNS records of the default mail domain
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<DnsRecord>,
}

impl From<OrganizationArgs> for OrganizationState {
    fn from(args: OrganizationArgs) -> Self {
        Self {
            args,
            organization_id: None,
            default_mail_domain: None,
            records: Vec::new(),
        }
    }
}

/// Every input change forces replacement; organizations have no update path.
pub fn diff(olds: &OrganizationState, news: &OrganizationArgs) -> DiffResponse {
    let old = &olds.args;
    let mut builder = DiffBuilder::new();

    builder
        .replace_if_changed("region", &old.region, &news.region)
        .replace_if_changed("alias", &old.alias, &news.alias)
        .replace_if_changed_opt(
            "clientToken",
            old.client_token.as_deref(),
            news.client_token.as_deref(),
        )
        .replace_if_changed_opt(
            "directoryId",
            old.directory_id.as_deref(),
            news.directory_id.as_deref(),
        )
        .replace_if_changed_opt(
            "kmsKeyArn",
            old.kms_key_arn.as_deref(),
            news.kms_key_arn.as_deref(),
        )
        .replace_if_changed(
            "enableInteroperability",
            &old.interoperability_enabled(),
            &news.interoperability_enabled(),
        );

    let count = old.domains.len().max(news.domains.len());
    for i in 0..count {
        match (old.domains.get(i), news.domains.get(i)) {
            (Some(o), Some(n)) => {
                builder
                    .replace_if_changed(
                        &format!("domains[{i}].domainName"),
                        &o.domain_name,
                        &n.domain_name,
                    )
                    .replace_if_changed_opt(
                        &format!("domains[{i}].hostedZoneId"),
                        o.hosted_zone_id.as_deref(),
                        n.hosted_zone_id.as_deref(),
                    );
            }
            (None, Some(_)) => {
                builder.record(format!("domains[{i}]"), DiffKind::AddReplace);
            }
            (Some(_), None) => {
                builder.record(format!("domains[{i}]"), DiffKind::DeleteReplace);
            }
            (None, None) => {}
        }
    }

    builder.build()
}
