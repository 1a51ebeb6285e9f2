//! End-to-end session flows against an in-memory API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use parley_core::gate::PROFILE_INCOMPLETE_NOTICE;
use parley_core::{
    resolve, ApiError, ApiResult, AuthActions, AuthReply, BootstrapOutcome, Bootstrapper,
    Credentials, ProfileUpdate, Resolution, Route, SessionApi, SessionState, SessionStore,
    UserPayload,
};
use pretty_assertions::assert_eq;

/// Scripted API that counts calls
#[derive(Default)]
struct FakeApi {
    identity: Mutex<Option<ApiResult<Option<UserPayload>>>>,
    login_reply: Mutex<Option<ApiResult<AuthReply>>>,
    profile_reply: Mutex<Option<ApiResult<AuthReply>>>,
    fetch_calls: AtomicUsize,
    fetch_delay: Option<Duration>,
}

impl FakeApi {
    fn with_identity(result: ApiResult<Option<UserPayload>>) -> Self {
        Self {
            identity: Mutex::new(Some(result)),
            ..Self::default()
        }
    }

    fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionApi for FakeApi {
    async fn fetch_identity(&self) -> ApiResult<Option<UserPayload>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        self.identity.lock().unwrap().clone().unwrap_or(Ok(None))
    }

    async fn login(&self, _credentials: &Credentials) -> ApiResult<AuthReply> {
        self.login_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ApiError::status(500, None)))
    }

    async fn signup(&self, _credentials: &Credentials) -> ApiResult<AuthReply> {
        Err(ApiError::status(500, None))
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> ApiResult<AuthReply> {
        self.profile_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ApiError::status(500, None)))
    }
}

fn user(id: &str, profile_setup: bool) -> UserPayload {
    UserPayload {
        id: Some(id.into()),
        email: Some("ada@example.com".into()),
        first_name: profile_setup.then(|| "Ada".to_string()),
        last_name: profile_setup.then(|| "Lovelace".to_string()),
        profile_setup,
        ..UserPayload::default()
    }
}

async fn navigate(bootstrapper: &Bootstrapper<FakeApi>, path: &str) -> Resolution {
    bootstrapper.ensure().await;
    resolve(bootstrapper.store().state(), Route::parse(path)).unwrap()
}

#[tokio::test]
async fn scenario_a_no_session_lands_on_auth() {
    let api = Arc::new(FakeApi::with_identity(Ok(None)));
    let store = SessionStore::new();
    let bootstrapper = Bootstrapper::new(api.clone(), store.clone());

    assert_eq!(store.state(), SessionState::Unknown);

    let root = navigate(&bootstrapper, "/").await;
    let chat = navigate(&bootstrapper, "/chat").await;

    assert_eq!(store.state(), SessionState::Anonymous);
    assert!(!store.is_loading());
    assert_eq!(root.route, Route::Auth);
    assert_eq!(chat.route, Route::Auth);
    assert!(chat.notices.is_empty());
    assert_eq!(api.fetch_calls(), 1);
}

#[tokio::test]
async fn scenario_a_bootstrap_failure_is_anonymous() {
    let api = Arc::new(FakeApi::with_identity(Err(ApiError::network(
        "connection refused",
    ))));
    let store = SessionStore::new();
    let bootstrapper = Bootstrapper::new(api, store.clone());

    assert!(matches!(
        bootstrapper.ensure().await,
        BootstrapOutcome::Failed(_)
    ));
    assert_eq!(store.state(), SessionState::Anonymous);
    assert_eq!(
        resolve(store.state(), Route::Chat).unwrap().route,
        Route::Auth
    );
}

#[tokio::test]
async fn scenario_b_login_with_incomplete_profile_is_kept_out_of_chat() {
    let api = Arc::new(FakeApi {
        login_reply: Mutex::new(Some(Ok(AuthReply {
            status: 200,
            message: Some("Login successful".into()),
            user: Some(UserPayload {
                id: Some("u1".into()),
                profile_setup: false,
                ..UserPayload::default()
            }),
        }))),
        ..FakeApi::default()
    });
    let store = SessionStore::new();
    let bootstrapper = Bootstrapper::new(api.clone(), store.clone());
    let actions = AuthActions::new(api, store.clone());

    assert_eq!(navigate(&bootstrapper, "/auth").await.route, Route::Auth);

    let outcome = actions
        .login(Credentials {
            email: "ada@example.com".into(),
            password: "correct horse".into(),
        })
        .await;
    assert!(outcome.session_updated);
    assert_eq!(store.identity().unwrap().id, "u1");
    assert_eq!(store.state(), SessionState::AuthenticatedIncomplete);

    let chat = navigate(&bootstrapper, "/chat").await;
    assert_eq!(chat.route, Route::Profile);
    assert_eq!(chat.notices.len(), 1);
    assert_eq!(chat.notices[0].title, PROFILE_INCOMPLETE_NOTICE);
}

#[tokio::test]
async fn scenario_c_profile_update_reaches_chat_and_stays() {
    let api = Arc::new(FakeApi {
        identity: Mutex::new(Some(Ok(Some(user("u1", false))))),
        profile_reply: Mutex::new(Some(Ok(AuthReply {
            status: 200,
            message: Some("Profile updated".into()),
            user: Some(user("u1", true)),
        }))),
        ..FakeApi::default()
    });
    let store = SessionStore::new();
    let bootstrapper = Bootstrapper::new(api.clone(), store.clone());
    let actions = AuthActions::new(api, store.clone());

    assert_eq!(navigate(&bootstrapper, "/").await.route, Route::Profile);

    let outcome = actions
        .update_profile(ProfileUpdate {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            color: 0,
        })
        .await;
    assert_eq!(store.state(), SessionState::AuthenticatedComplete);

    let target = outcome.navigate_to.unwrap();
    let landed = navigate(&bootstrapper, target.path()).await;
    assert_eq!(landed.route, Route::Chat);
    assert!(!landed.was_redirected());

    // Re-evaluating the same route later keeps the visitor in chat.
    assert_eq!(navigate(&bootstrapper, "/chat").await.route, Route::Chat);
    assert_eq!(navigate(&bootstrapper, "/auth").await.route, Route::Chat);
}

#[tokio::test]
async fn concurrent_navigations_bootstrap_once() {
    let api = Arc::new(FakeApi {
        identity: Mutex::new(Some(Ok(Some(user("u1", true))))),
        fetch_delay: Some(Duration::from_millis(20)),
        ..FakeApi::default()
    });
    let store = SessionStore::new();
    let bootstrapper = Bootstrapper::new(api.clone(), store.clone());

    let (first, second) = tokio::join!(
        navigate(&bootstrapper, "/chat"),
        navigate(&bootstrapper, "/profile")
    );

    assert_eq!(api.fetch_calls(), 1);
    assert_eq!(first.route, Route::Chat);
    assert_eq!(second.route, Route::Profile);
}

#[tokio::test]
async fn loading_flag_covers_the_bootstrap_call() {
    let api = Arc::new(FakeApi {
        fetch_delay: Some(Duration::from_millis(50)),
        ..FakeApi::default()
    });
    let store = SessionStore::new();
    let bootstrapper = Arc::new(Bootstrapper::new(api, store.clone()));

    let task = {
        let bootstrapper = Arc::clone(&bootstrapper);
        tokio::spawn(async move { bootstrapper.ensure().await })
    };

    let mut rx = store.subscribe();
    rx.wait_for(|snapshot| snapshot.loading).await.unwrap();
    assert_eq!(store.state(), SessionState::Unknown);

    assert_eq!(task.await.unwrap(), BootstrapOutcome::NoSession);
    assert!(!store.is_loading());
    assert_eq!(store.state(), SessionState::Anonymous);
}
