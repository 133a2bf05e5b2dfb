//! Machine-readable description of every resource
//!
//! Lists each property with its optionality, whether it is secret, and
//! whether changing it forces replacement. The replace-on-change flags
//! mirror the diff functions in [`crate::resources`].

use crate::resource_kind::{PACKAGE_NAME, ResourceKind};
use serde::Serialize;

/// Description of a single property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub secret: bool,
    pub replace_on_changes: bool,
    /// Set by the provider, never accepted as input
    pub output_only: bool,
}

impl PropertySchema {
    fn input(name: &'static str, type_name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            type_name,
            description,
            required: false,
            secret: false,
            replace_on_changes: false,
            output_only: false,
        }
    }

    fn output(name: &'static str, type_name: &'static str, description: &'static str) -> Self {
        Self {
            output_only: true,
            ..Self::input(name, type_name, description)
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn replaces(mut self) -> Self {
        self.replace_on_changes = true;
        self
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSchema {
    pub token: String,
    pub description: &'static str,
    pub properties: Vec<PropertySchema>,
}

impl ResourceSchema {
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &PropertySchema> {
        self.properties.iter().filter(|p| !p.output_only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSchema {
    pub name: &'static str,
    pub version: &'static str,
    pub resources: Vec<ResourceSchema>,
}

/// Schema of every resource the provider manages
pub fn provider_schema() -> ProviderSchema {
    ProviderSchema {
        name: PACKAGE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        resources: ResourceKind::ALL.into_iter().map(resource_schema).collect(),
    }
}

pub fn resource_schema(kind: ResourceKind) -> ResourceSchema {
    use PropertySchema as P;

    let region = P::input("region", "string", "The AWS region.").required().replaces();

    let (description, properties) = match kind {
        ResourceKind::Organization => (
            "A WorkMail organization, optionally with domains verified through SES.",
            vec![
                region,
                P::input("alias", "string", "The organization alias.")
                    .required()
                    .replaces(),
                P::input(
                    "domains",
                    "array<OrganizationDomain>",
                    "Domains to attach. The first becomes the default mail domain.",
                )
                .replaces(),
                P::input("clientToken", "string", "Idempotency token for the create request.")
                    .replaces(),
                P::input("directoryId", "string", "The AWS Directory Service directory ID.")
                    .replaces(),
                P::input("kmsKeyArn", "string", "ARN of a customer managed KMS key.").replaces(),
                P::input(
                    "enableInteroperability",
                    "boolean",
                    "Allow interoperability with Microsoft Exchange.",
                )
                .replaces(),
                P::output("organizationId", "string", "The organization id."),
                P::output("defaultMailDomain", "string", "The default mail domain."),
                P::output("records", "array<DnsRecord>", "DNS records of the default domain."),
            ],
        ),
        ResourceKind::DefaultDomain => (
            "A mail domain registered with an organization and made its default.",
            vec![
                region,
                P::input("domainName", "string", "The domain name.")
                    .required()
                    .replaces(),
                P::input(
                    "organizationId",
                    "string",
                    "The organization the domain is associated with.",
                )
                .required()
                .replaces(),
                P::input("clientToken", "string", "Idempotency token for the register request.")
                    .replaces(),
                P::output("records", "array<DnsRecord>", "DNS records of the domain."),
            ],
        ),
        ResourceKind::User => (
            "A WorkMail user. Exactly one of organizationId or domain must be set.",
            vec![
                region,
                P::input("displayName", "string", "The display name of the user.").required(),
                P::input("name", "string", "The user name.").required(),
                P::input("organizationId", "string", "The owning organization.").replaces(),
                P::input(
                    "domain",
                    "string",
                    "Default mail domain of the owning organization.",
                )
                .replaces(),
                P::input("firstName", "string", "The first name of the user."),
                P::input("lastName", "string", "The last name of the user."),
                P::input("password", "string", "The password of the user.").secret(),
                P::input(
                    "hiddenFromGlobalAddressList",
                    "boolean",
                    "Hide the user from the address book.",
                ),
                P::output("userId", "string", "The user id."),
            ],
        ),
        ResourceKind::WorkmailRegistration => (
            "Registers a user, group or resource with WorkMail under the default domain.",
            vec![
                region,
                P::input("organizationId", "string", "The organization id.")
                    .required()
                    .replaces(),
                P::input("entityId", "string", "The user, group or resource to register.")
                    .required()
                    .replaces(),
                P::input(
                    "emailPrefix",
                    "string",
                    "Local part of the address; the default domain is appended.",
                )
                .required()
                .replaces(),
            ],
        ),
        ResourceKind::CognitoEmailSender => (
            "A custom email sender lambda on a Cognito user pool.",
            vec![
                P::input("userPoolId", "string", "The Cognito user pool id.")
                    .required()
                    .replaces(),
                P::input("lambdaArn", "string", "ARN of the sending lambda.")
                    .required()
                    .replaces(),
                P::input("kmsKeyArn", "string", "ARN of the KMS key encrypting codes.")
                    .required()
                    .replaces(),
                P::input(
                    "region",
                    "string",
                    "Region of the user pool, defaults to the provider region.",
                )
                .replaces(),
            ],
        ),
    };

    ResourceSchema {
        token: kind.type_token(),
        description,
        properties,
    }
}
