//! WorkMail integration tests - actually call AWS APIs
//!
//! These tests are marked `#[ignore]` and only run with:
//! ```
//! AWS_PROFILE=your_profile cargo test --test aws_workmail_integration -- --ignored
//! ```

mod aws_test_helpers;

use aws_test_helpers::*;
use awsworkmail_common::ResourceKind;
use awsworkmail_provider::{ErrorKind, classify_error};
use serde_json::json;

/// Organization and user lifecycle without custom domains
///
/// This test verifies:
/// 1. Organization creation waits for Active
/// 2. User creation by organization id
/// 3. User deletion, refused only as a precondition failure
/// 4. Organization deletion waits for Deleted
/// 5. A second organization delete is a no-op
#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_organization_and_user_lifecycle() {
    let region = get_test_region();
    let provider = test_provider();
    let alias = test_alias();

    let organization = provider
        .create(
            ResourceKind::Organization,
            "test-org",
            json!({ "region": region, "alias": alias }),
            false,
        )
        .await
        .expect("AWS credentials required - set AWS_PROFILE or AWS_ACCESS_KEY_ID");

    assert!(organization.id.starts_with("m-"), "unexpected id {}", organization.id);
    assert_eq!(organization.properties["organizationId"], organization.id);

    let user = provider
        .create(
            ResourceKind::User,
            "test-user",
            json!({
                "region": region,
                "organizationId": organization.id,
                "name": "integration",
                "displayName": "Integration Test",
            }),
            false,
        )
        .await
        .expect("Should create user");

    // Unregistered users are DISABLED, so this normally deletes the user
    let refused = provider
        .delete(ResourceKind::User, &user.id, user.properties.clone())
        .await;
    if let Err(e) = &refused {
        assert_eq!(classify_error(e), ErrorKind::Precondition);
    }

    provider
        .delete(
            ResourceKind::Organization,
            &organization.id,
            organization.properties.clone(),
        )
        .await
        .expect("Should delete organization");

    provider
        .delete(
            ResourceKind::Organization,
            &organization.id,
            organization.properties,
        )
        .await
        .expect("Deleting a deleted organization should succeed");
}

/// Resolving a user's organization by an unknown domain fails without creating anything
#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_user_with_unknown_domain() {
    let provider = test_provider();

    let err = provider
        .create(
            ResourceKind::User,
            "test-user",
            json!({
                "region": get_test_region(),
                "domain": format!("{}.invalid", test_alias()),
                "name": "nobody",
                "displayName": "Nobody",
            }),
            false,
        )
        .await
        .expect_err("No organization should own this domain");

    assert!(format!("{err:#}").contains("no workmail organization with domain"));
}
