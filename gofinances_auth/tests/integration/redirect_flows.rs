use std::sync::Arc;

use gofinances_auth::{
    AuthState, InMemorySessionStore, SESSION_STORAGE_KEY, SessionStore, SignInError,
    SignInOutcome, SignInProvider,
};

use crate::common::{
    MockBrowser, MockUserinfoServer, NON_JSON_PROFILE_TOKEN, PROFILE_WITHOUT_ID_TOKEN,
    TEST_CLIENT_ID, TestUsers, VALID_ACCESS_TOKEN, controller_with_google, google_adapter,
};

/// Test the complete Google redirect flow
///
/// Flow: authorization URL -> browser grant -> userinfo fetch -> persist -> publish
#[tokio::test]
async fn test_google_sign_in_persists_and_publishes_profile() {
    let server = MockUserinfoServer::start().await;
    let browser = Arc::new(MockBrowser::granting(VALID_ACCESS_TOKEN));
    let store = Arc::new(InMemorySessionStore::new());
    let controller = controller_with_google(
        store.clone(),
        google_adapter(&server.userinfo_url(), browser.clone()),
    );
    controller.restore().await;
    assert_eq!(controller.auth_state(), AuthState::Anonymous);

    let outcome = controller.sign_in(SignInProvider::Google).await;

    assert_eq!(outcome, Ok(SignInOutcome::Applied));
    assert_eq!(controller.user(), Some(TestUsers::google_user()));
    assert_eq!(controller.auth_state(), AuthState::Authenticated);

    let record = store
        .get(&SESSION_STORAGE_KEY)
        .await
        .unwrap()
        .expect("session should be persisted");
    assert_eq!(record, TestUsers::google_user().to_record().unwrap());

    let opened = browser.opened_urls();
    assert_eq!(opened.len(), 1);
    let auth_url = url::Url::parse(&opened[0]).unwrap();
    let params: std::collections::HashMap<_, _> = auth_url.query_pairs().into_owned().collect();
    assert_eq!(params.get("client_id").map(String::as_str), Some(TEST_CLIENT_ID));
    assert_eq!(params.get("response_type").map(String::as_str), Some("token"));
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn test_rejected_access_token_is_provider_error() {
    let server = MockUserinfoServer::start().await;
    let store = Arc::new(InMemorySessionStore::new());
    let controller = controller_with_google(
        store.clone(),
        google_adapter(
            &server.userinfo_url(),
            Arc::new(MockBrowser::granting("ya29.expired")),
        ),
    );
    controller.restore().await;

    let result = controller.sign_in(SignInProvider::Google).await;

    assert!(
        matches!(result, Err(SignInError::Provider(_))),
        "Expected provider error, got {result:?}"
    );
    assert_eq!(controller.auth_state(), AuthState::Anonymous);
    assert_eq!(store.get(&SESSION_STORAGE_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_unusable_profiles_are_provider_errors() {
    let server = MockUserinfoServer::start().await;

    for token in [PROFILE_WITHOUT_ID_TOKEN, NON_JSON_PROFILE_TOKEN] {
        let controller = controller_with_google(
            Arc::new(InMemorySessionStore::new()),
            google_adapter(&server.userinfo_url(), Arc::new(MockBrowser::granting(token))),
        );
        controller.restore().await;

        let result = controller.sign_in(SignInProvider::Google).await;

        assert!(
            matches!(result, Err(SignInError::Provider(_))),
            "Token {token}: expected provider error, got {result:?}"
        );
        assert!(controller.user().is_none());
    }
}

#[tokio::test]
async fn test_unreachable_userinfo_is_network_error() {
    let controller = controller_with_google(
        Arc::new(InMemorySessionStore::new()),
        google_adapter(
            "http://127.0.0.1:1/oauth2/v1/userinfo",
            Arc::new(MockBrowser::granting(VALID_ACCESS_TOKEN)),
        ),
    );
    controller.restore().await;

    let result = controller.sign_in(SignInProvider::Google).await;

    assert!(
        matches!(result, Err(SignInError::Network(_))),
        "Expected network error, got {result:?}"
    );
    assert_eq!(controller.auth_state(), AuthState::Anonymous);
}

#[tokio::test]
async fn test_cancelled_or_denied_session_keeps_existing_user() {
    let server = MockUserinfoServer::start().await;
    let existing = TestUsers::apple_user();

    for browser in [MockBrowser::cancelling(), MockBrowser::denying()] {
        let store = Arc::new(InMemorySessionStore::new());
        store
            .set(&SESSION_STORAGE_KEY, &existing.to_record().unwrap())
            .await
            .unwrap();
        let controller =
            controller_with_google(store, google_adapter(&server.userinfo_url(), Arc::new(browser)));
        controller.restore().await;

        let outcome = controller.sign_in(SignInProvider::Google).await;

        assert_eq!(outcome, Ok(SignInOutcome::Unchanged));
        assert_eq!(controller.user(), Some(existing.clone()));
        assert!(!controller.snapshot().sign_in_pending);
    }

    // No profile fetch happens without a grant
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_concurrent_google_sign_in_is_rejected() {
    let server = MockUserinfoServer::start().await;
    let browser = Arc::new(MockBrowser::holding(VALID_ACCESS_TOKEN));
    let controller = controller_with_google(
        Arc::new(InMemorySessionStore::new()),
        google_adapter(&server.userinfo_url(), browser.clone()),
    );
    controller.restore().await;

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.sign_in(SignInProvider::Google).await }
    });
    browser.wait_until_opened().await;
    assert!(controller.snapshot().sign_in_pending);

    let second = controller.sign_in(SignInProvider::Google).await;
    assert_eq!(second, Err(SignInError::AlreadyInProgress));
    assert_eq!(browser.opened_urls().len(), 1);

    browser.release();
    let first = first.await.expect("first sign-in task panicked");

    assert_eq!(first, Ok(SignInOutcome::Applied));
    assert_eq!(controller.user(), Some(TestUsers::google_user()));
    assert!(!controller.snapshot().sign_in_pending);
}

#[tokio::test]
async fn test_google_sign_in_replaces_previous_user() {
    let server = MockUserinfoServer::start().await;
    let store = Arc::new(InMemorySessionStore::new());
    store
        .set(
            &SESSION_STORAGE_KEY,
            &TestUsers::apple_user().to_record().unwrap(),
        )
        .await
        .unwrap();
    let controller = controller_with_google(
        store.clone(),
        google_adapter(
            &server.userinfo_url(),
            Arc::new(MockBrowser::granting(VALID_ACCESS_TOKEN)),
        ),
    );
    controller.restore().await;
    assert_eq!(controller.user(), Some(TestUsers::apple_user()));

    controller.sign_in(SignInProvider::Google).await.unwrap();

    assert_eq!(controller.user(), Some(TestUsers::google_user()));
    let record = store.get(&SESSION_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(record, TestUsers::google_user().to_record().unwrap());
}
