mod common;

use common::{PASSWORD, VALID_TOKEN, logged_in_client, test_client};
use futures::future::join_all;
use schoolhub::client::error::SESSION_EXPIRED_MESSAGE;
use schoolhub::prelude::*;
use schoolhub::auth::SessionStorage;

#[tokio::test]
async fn test_login_establishes_and_persists_session() {
    let test = test_client().await;

    let session = AuthApi::login(&test.client, &LoginRequest::new("grace@school.edu", PASSWORD))
        .await
        .unwrap();

    assert_eq!(session.token, VALID_TOKEN);
    assert_eq!(session.user.name, "Grace Hopper");
    assert!(test.client.sessions().is_authenticated());
    assert_eq!(test.storage.load().unwrap(), Some(session));
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    let test = test_client().await;

    let err = AuthApi::login(&test.client, &LoginRequest::new("grace@school.edu", "wrong"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(!test.client.sessions().is_authenticated());
    assert_eq!(test.storage.clear_count(), 0);
}

#[tokio::test]
async fn test_me_sends_bearer_token() {
    let test = logged_in_client().await;

    let user = AuthApi::me(&test.client).await.unwrap();

    assert_eq!(user.email.to_string(), "grace@school.edu");
    assert_eq!(test.backend.hits.count("GET /auth/me"), 1);
}

#[tokio::test]
async fn test_concurrent_401s_sign_out_exactly_once() {
    let test = logged_in_client().await;
    test.client.cache().set(&QueryKey::from("students"), &1).await;

    let requests = (1..=5).map(|page| {
        let client = test.client.clone();
        async move {
            client
                .resource::<resources::Notices>()
                .list(&ListQuery::new().page(page))
                .await
        }
    });
    let results = join_all(requests).await;

    for result in results {
        let err = result.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), SESSION_EXPIRED_MESSAGE);
    }
    assert_eq!(test.backend.hits.count("GET /notices"), 5);
    assert_eq!(test.storage.clear_count(), 1);
    assert!(!test.client.sessions().is_authenticated());
    assert!(test.client.cache().is_empty().await);
}

#[tokio::test]
async fn test_change_password_to_same_password_makes_no_request() {
    let test = logged_in_client().await;
    let (effects, mut rx) = effect_channel();
    let submitter = FormSubmitter::new(test.client.cache().clone(), effects);
    let request = ChangePasswordRequest::new(PASSWORD, PASSWORD, PASSWORD);

    let result = submitter
        .submit(&request, || AuthApi::change_password(&test.client, &request))
        .await;

    let errors = match result {
        Err(SubmitError::Invalid(errors)) => errors,
        other => panic!("expected validation failure, got {other:?}"),
    };
    assert_eq!(
        errors.first("new_password"),
        Some("New password must be different from current password")
    );
    assert_eq!(test.backend.hits.count("PUT /auth/change-password"), 0);
    assert!(rx.drain().is_empty());
}

#[tokio::test]
async fn test_change_password() {
    let test = logged_in_client().await;
    let request = ChangePasswordRequest::new(PASSWORD, "betterpass456", "betterpass456");

    let response = AuthApi::change_password(&test.client, &request).await.unwrap();

    assert_eq!(response.message, "Password changed successfully");
    assert_eq!(test.backend.hits.count("PUT /auth/change-password"), 1);
}

#[tokio::test]
async fn test_logout_clears_session_and_cache() {
    let test = logged_in_client().await;
    test.client
        .resource::<resources::Students>()
        .list(&ListQuery::new())
        .await
        .unwrap();
    assert!(!test.client.cache().is_empty().await);

    AuthApi::logout(&test.client).await.unwrap();

    assert!(!test.client.sessions().is_authenticated());
    assert!(test.client.cache().is_empty().await);
    assert_eq!(test.storage.load().unwrap(), None);
}
