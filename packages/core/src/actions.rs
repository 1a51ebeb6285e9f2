//! Login, signup, profile update and logout.
//!
//! Every action catches its own remote failure and reports it as a notice;
//! nothing here returns an error to the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{AuthReply, Credentials, ProfileUpdate, SessionApi};
use crate::error::{ApiError, ApiResult};
use crate::gate::Route;
use crate::notice::Notice;
use crate::store::SessionStore;

pub const SUCCESS_TITLE: &str = "Success";
pub const FAILURE_TITLE: &str = "Something went wrong";

/// Status the signup endpoint uses for a newly created account
pub const SIGNUP_CREATED: u16 = 201;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Login,
    Signup,
    UpdateProfile,
    Logout,
}

/// What the front-end should do after an action completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub notice: Notice,
    /// Clear the form that was submitted; failures keep its contents for a retry
    pub reset_form: bool,
    pub navigate_to: Option<Route>,
    pub session_updated: bool,
}

impl ActionOutcome {
    pub fn succeeded(&self) -> bool {
        self.notice.level != crate::notice::NoticeLevel::Error
    }

    fn failure(kind: ActionKind, err: &ApiError) -> Self {
        Self {
            kind,
            notice: Notice::error(FAILURE_TITLE, Some(err.user_message())),
            reset_form: false,
            navigate_to: None,
            session_updated: false,
        }
    }
}

/// Auth and profile operations bound to one API and one Session Store
pub struct AuthActions<A: SessionApi + ?Sized> {
    api: Arc<A>,
    store: SessionStore,
}

impl<A: SessionApi + ?Sized> Clone for AuthActions<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: self.store.clone(),
        }
    }
}

impl<A: SessionApi + ?Sized> AuthActions<A> {
    pub fn new(api: Arc<A>, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Sign in; the session is set when the reply carries a usable identity
    pub async fn login(&self, credentials: Credentials) -> ActionOutcome {
        let result = self.api.login(&credentials).await;
        self.finish_auth(ActionKind::Login, result, |_| true)
    }

    /// Create an account; only a `201 Created` reply signs the visitor in
    pub async fn signup(&self, credentials: Credentials) -> ActionOutcome {
        let result = self.api.signup(&credentials).await;
        self.finish_auth(ActionKind::Signup, result, |reply| {
            reply.status == SIGNUP_CREATED
        })
    }

    /// Complete profile setup and forward to chat
    pub async fn update_profile(&self, update: ProfileUpdate) -> ActionOutcome {
        let kind = ActionKind::UpdateProfile;
        let reply = match self.api.update_profile(&update).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "Profile update failed");
                return ActionOutcome::failure(kind, &err);
            }
        };

        let Some(identity) = reply.identity() else {
            let err = ApiError::invalid("profile update reply carried no user");
            warn!(error = %err, "Profile update failed");
            return ActionOutcome::failure(kind, &err);
        };

        info!(user_id = %identity.id, "Profile updated");
        self.store.set(Some(identity));
        ActionOutcome {
            kind,
            notice: Notice::success(SUCCESS_TITLE, reply.message),
            reset_form: true,
            navigate_to: Some(Route::Chat),
            session_updated: true,
        }
    }

    /// Forget the local session. The API has no logout operation.
    pub fn logout(&self) -> ActionOutcome {
        info!("Signed out");
        self.store.set(None);
        ActionOutcome {
            kind: ActionKind::Logout,
            notice: Notice::info("Signed out", None),
            reset_form: false,
            navigate_to: Some(Route::Auth),
            session_updated: true,
        }
    }

    fn finish_auth<F>(&self, kind: ActionKind, result: ApiResult<AuthReply>, accept: F) -> ActionOutcome
    where
        F: Fn(&AuthReply) -> bool,
    {
        match result {
            Ok(reply) => {
                let mut session_updated = false;
                if accept(&reply) {
                    if let Some(identity) = reply.identity() {
                        info!(?kind, user_id = %identity.id, "Signed in");
                        self.store.set(Some(identity));
                        session_updated = true;
                    }
                } else {
                    debug!(?kind, status = reply.status, "Reply accepted without signing in");
                }
                ActionOutcome {
                    kind,
                    notice: Notice::success(SUCCESS_TITLE, reply.message),
                    reset_form: true,
                    navigate_to: None,
                    session_updated,
                }
            }
            Err(err) => {
                warn!(?kind, error = %err, "Auth request failed");
                self.store.set(None);
                ActionOutcome::failure(kind, &err)
            }
        }
    }
}
