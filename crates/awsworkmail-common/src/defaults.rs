//! Default configuration values shared by the provider and its schema
//!
//! These constants keep polling behavior and naming consistent across the
//! CLI, the handlers and the tests.

/// Interval between remote status checks while polling, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Upper bound for waiting on organization activation and domain verification (30 minutes)
pub const DEFAULT_CREATE_TIMEOUT_SECS: u64 = 1800;

/// Upper bound for waiting on organization deletion (15 minutes)
pub const DEFAULT_DELETE_TIMEOUT_SECS: u64 = 900;

/// Suffix of the domain WorkMail generates for every organization alias
pub const AWSAPPS_DOMAIN_SUFFIX: &str = "awsapps.com";

/// Organization state reported once the organization is usable
pub const ORGANIZATION_STATE_ACTIVE: &str = "Active";

/// Organization state reported once deletion finished
pub const ORGANIZATION_STATE_DELETED: &str = "Deleted";

/// Organization state reported when provisioning failed
pub const ORGANIZATION_STATE_FAILED: &str = "Failed";

/// Returns the auto-generated mail domain for an organization alias.
///
/// ```
/// use awsworkmail_common::defaults::alias_mail_domain;
///
/// assert_eq!(alias_mail_domain("acme"), "acme.awsapps.com");
/// ```
pub fn alias_mail_domain(alias: &str) -> String {
    format!("{alias}.{AWSAPPS_DOMAIN_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_mail_domain() {
        assert_eq!(alias_mail_domain("my-org"), "my-org.awsapps.com");
    }

    #[test]
    fn test_delete_timeout_not_longer_than_create() {
        assert!(DEFAULT_DELETE_TIMEOUT_SECS <= DEFAULT_CREATE_TIMEOUT_SECS);
        assert!(DEFAULT_POLL_INTERVAL_SECS < DEFAULT_DELETE_TIMEOUT_SECS);
    }
}
