//! Remote API seam consumed by the session core.
//!
//! The HTTP implementation lives in `parley-client`; tests substitute mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::identity::{IdentityRecord, UserPayload};

/// Login and signup request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile update request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub color: u8,
}

/// Body of a successful login, signup or profile update
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserPayload>,
}

/// Successful auth response together with its HTTP status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthReply {
    pub status: u16,
    pub message: Option<String>,
    pub user: Option<UserPayload>,
}

impl AuthReply {
    pub fn from_envelope(status: u16, envelope: AuthEnvelope) -> Self {
        Self {
            status,
            message: envelope.message,
            user: envelope.user,
        }
    }

    /// The identity carried by this reply, if it has a usable id
    pub fn identity(&self) -> Option<IdentityRecord> {
        self.user.clone().and_then(IdentityRecord::from_payload)
    }
}

/// The four remote operations the client depends on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Who is the current visitor? `Ok(None)` when the API reports no session.
    async fn fetch_identity(&self) -> ApiResult<Option<UserPayload>>;

    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthReply>;

    async fn signup(&self, credentials: &Credentials) -> ApiResult<AuthReply>;

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<AuthReply>;
}
