//! Default domain schema and replacement policy

use super::DnsRecord;
use crate::diff::{DiffBuilder, DiffResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultDomainArgs {
    pub region: String,
    pub domain_name: String,
    /// Organization the domain is registered with
    pub organization_id: String,
    /// Idempotency token for RegisterMailDomain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultDomainState {
    #[serde(flatten)]
    pub args: DefaultDomainArgs,
    /// Records required for delivery and verification, as reported by WorkMail
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<DnsRecord>,
}

impl From<DefaultDomainArgs> for DefaultDomainState {
    fn from(args: DefaultDomainArgs) -> Self {
        Self {
            args,
            records: Vec::new(),
        }
    }
}

pub fn diff(olds: &DefaultDomainState, news: &DefaultDomainArgs) -> DiffResponse {
    let old = &olds.args;
    let mut builder = DiffBuilder::new();
    builder
        .replace_if_changed("region", &old.region, &news.region)
        .replace_if_changed("domainName", &old.domain_name, &news.domain_name)
        .replace_if_changed("organizationId", &old.organization_id, &news.organization_id)
        .replace_if_changed_opt(
            "clientToken",
            old.client_token.as_deref(),
            news.client_token.as_deref(),
        );
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> DefaultDomainArgs {
        DefaultDomainArgs {
            region: "eu-west-1".to_string(),
            domain_name: "dev.gothub.io".to_string(),
            organization_id: "m-1".to_string(),
            client_token: None,
        }
    }

    #[test]
    fn test_records_do_not_affect_diff() {
        let olds = DefaultDomainState {
            records: vec![DnsRecord {
                record_type: "MX".to_string(),
                hostname: "dev.gothub.io.".to_string(),
                value: "10 inbound-smtp.eu-west-1.amazonaws.com.".to_string(),
            }],
            ..DefaultDomainState::from(args())
        };
        assert!(!diff(&olds, &args()).has_changes);
    }

    #[test]
    fn test_organization_change_replaces() {
        let news = DefaultDomainArgs {
            organization_id: "m-2".to_string(),
            ..args()
        };
        let result = diff(&DefaultDomainState::from(args()), &news);
        assert_eq!(result.replaces, vec!["organizationId".to_string()]);
    }

    #[test]
    fn test_record_type_serializes_as_type() {
        let record = DnsRecord {
            record_type: "CNAME".to_string(),
            hostname: "a._domainkey.dev.gothub.io.".to_string(),
            value: "a.dkim.amazonses.com.".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "CNAME");
    }
}
