//! awsworkmail provider library
//!
//! Lifecycle handlers for AWS WorkMail organizations, domains, users and
//! registrations, plus Cognito custom email senders. Each handler is generic
//! over the AWS operations traits so the flows can be tested with mocks.

pub mod aws;
pub mod config;
pub mod document;
pub mod error;
pub mod provider;
pub mod resources;
pub mod wait;

pub use config::{PollConfig, ProviderConfig};
pub use error::{ErrorKind, ProviderError, classify_error};
pub use provider::{CreateResponse, Provider, diff};
