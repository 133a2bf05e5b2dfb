//! Configuration types for the provider

use crate::wait::{PollInterval, WaitConfig};
use awsworkmail_common::defaults::{
    DEFAULT_CREATE_TIMEOUT_SECS, DEFAULT_DELETE_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS,
};
use std::time::Duration;

/// Polling behavior for asynchronously provisioned resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    /// Back off exponentially from `interval` up to this delay, with jitter
    pub max_interval: Option<Duration>,
    /// Upper bound on waiting for an organization to become active
    pub create_timeout: Duration,
    /// Upper bound on waiting for an organization to reach Deleted
    pub delete_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_interval: None,
            create_timeout: Duration::from_secs(DEFAULT_CREATE_TIMEOUT_SECS),
            delete_timeout: Duration::from_secs(DEFAULT_DELETE_TIMEOUT_SECS),
        }
    }
}

impl PollConfig {
    pub fn create_wait(&self) -> WaitConfig {
        self.wait(self.create_timeout)
    }

    pub fn delete_wait(&self) -> WaitConfig {
        self.wait(self.delete_timeout)
    }

    fn wait(&self, timeout: Duration) -> WaitConfig {
        match self.max_interval {
            Some(max) if max > self.interval => WaitConfig {
                interval: PollInterval::Exponential {
                    initial: self.interval,
                    max,
                },
                timeout,
                jitter: true,
            },
            _ => WaitConfig::fixed(self.interval, timeout),
        }
    }
}

/// Provider-wide configuration, injected into every handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
    /// Region for resources whose inputs may omit one
    pub default_region: Option<String>,
    pub poll: PollConfig,
}

impl ProviderConfig {
    /// Region for a request, preferring the resource's own. `None` leaves
    /// resolution to the AWS SDK's environment and profile chain.
    pub fn region_for<'a>(&'a self, region: Option<&'a str>) -> Option<&'a str> {
        region.or(self.default_region.as_deref())
    }
}
