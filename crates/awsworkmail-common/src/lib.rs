//! awsworkmail-common - Resource schema and diff policy
//!
//! This crate holds the typed inputs and state of every resource the
//! provider manages, plus the pure diff functions that decide between an
//! in-place change and a forced replacement. It has no AWS SDK dependencies
//! so schema consumers stay lightweight.
//!
//! ## Modules
//!
//! - [`defaults`]: Default polling and naming values
//! - [`diff`]: Diff results and the builder used by every resource
//! - [`resource_kind`]: Tagged resource kinds and their Pulumi type tokens
//! - [`resources`]: Per-resource args, state and diff policy
//! - [`schema`]: Machine-readable description of every resource

pub mod defaults;
pub mod diff;
pub mod resource_kind;
pub mod resources;
pub mod schema;

// Re-export commonly used types
pub use diff::{DiffBuilder, DiffKind, DiffResponse, PropertyDiff};
pub use resource_kind::{ResourceKind, UnknownResourceType};
pub use resources::DnsRecord;
pub use schema::{ProviderSchema, provider_schema};
