// ABOUTME: Session model, route gating and auth actions for the Parley chat client
// ABOUTME: Decides on every navigation whether a visitor is anonymous, mid-setup or fully signed in

pub mod actions;
pub mod api;
pub mod bootstrap;
pub mod error;
pub mod forms;
pub mod gate;
pub mod identity;
pub mod notice;
pub mod state;
pub mod store;

// Re-export main types
pub use actions::{ActionKind, ActionOutcome, AuthActions};
pub use api::{AuthEnvelope, AuthReply, Credentials, ProfileUpdate, SessionApi};
pub use bootstrap::{BootstrapOutcome, Bootstrapper};
pub use error::{ApiError, ApiResult, GateError};
pub use gate::{decide, resolve, Decision, Resolution, Route};
pub use identity::{IdentityRecord, UserPayload};
pub use notice::{Notice, NoticeLevel};
pub use state::SessionState;
pub use store::{SessionSnapshot, SessionStore};
