//! Shared utilities for AWS integration tests
//!
//! Provides region detection, unique aliases and a fast-polling provider.

use awsworkmail_provider::{PollConfig, Provider, ProviderConfig};
use chrono::Utc;
use std::time::Duration;

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to eu-west-1 (WorkMail is not available everywhere)
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "eu-west-1".to_string())
}

/// Unique organization alias, `awsworkmail-test-{timestamp}`
pub fn test_alias() -> String {
    format!("awsworkmail-test-{}", Utc::now().timestamp())
}

pub fn test_provider() -> Provider {
    Provider::new(ProviderConfig {
        aws_profile: std::env::var("AWS_PROFILE").ok(),
        default_region: Some(get_test_region()),
        poll: PollConfig {
            interval: Duration::from_secs(5),
            max_interval: Some(Duration::from_secs(30)),
            create_timeout: Duration::from_secs(1800),
            delete_timeout: Duration::from_secs(900),
        },
    })
}
