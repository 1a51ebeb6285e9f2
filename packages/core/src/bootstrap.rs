// ABOUTME: Startup resolution of the ambient session
// ABOUTME: Asks the API who the visitor is, exactly once per Unknown period

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::SessionApi;
use crate::error::ApiError;
use crate::identity::IdentityRecord;
use crate::state::SessionState;
use crate::store::SessionStore;

/// What a call to [`Bootstrapper::ensure`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The API returned a valid identity
    Identified,
    /// The API answered but reported no session
    NoSession,
    /// The call failed; the visitor is treated as anonymous
    Failed(ApiError),
    /// The store was already resolved (or another caller resolved it)
    Skipped,
}

/// Populates the Session Store from the "who am I" endpoint.
///
/// Single-flight: concurrent `ensure` calls while the store is `Unknown`
/// result in one remote call; the others wait and return `Skipped`.
pub struct Bootstrapper<A: SessionApi + ?Sized> {
    api: Arc<A>,
    store: SessionStore,
    in_flight: Mutex<()>,
}

impl<A: SessionApi + ?Sized> Bootstrapper<A> {
    pub fn new(api: Arc<A>, store: SessionStore) -> Self {
        Self {
            api,
            store,
            in_flight: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Resolve the session if it is still `Unknown`. Never retries.
    pub async fn ensure(&self) -> BootstrapOutcome {
        if self.store.state() != SessionState::Unknown {
            return BootstrapOutcome::Skipped;
        }

        let _guard = self.in_flight.lock().await;
        // Another caller may have resolved the session while we waited.
        if self.store.state() != SessionState::Unknown {
            debug!("Bootstrap already resolved by a concurrent caller");
            return BootstrapOutcome::Skipped;
        }

        self.store.mark_loading();
        debug!("Fetching current identity");

        match self.api.fetch_identity().await {
            Ok(Some(payload)) => match IdentityRecord::from_payload(payload) {
                Some(record) => {
                    info!(user_id = %record.id, profile_setup = record.profile_setup, "Session restored");
                    self.store.set(Some(record));
                    BootstrapOutcome::Identified
                }
                None => {
                    debug!("Identity payload without id, treating visitor as anonymous");
                    self.store.set(None);
                    BootstrapOutcome::NoSession
                }
            },
            Ok(None) => {
                debug!("No ambient session");
                self.store.set(None);
                BootstrapOutcome::NoSession
            }
            Err(err) if err.is_unauthorized() => {
                debug!(status = ?err.status_code(), "Session rejected by the API");
                self.store.set(None);
                BootstrapOutcome::NoSession
            }
            Err(err) => {
                warn!(error = %err, "Bootstrap failed, treating visitor as anonymous");
                self.store.set(None);
                BootstrapOutcome::Failed(err)
            }
        }
    }
}
