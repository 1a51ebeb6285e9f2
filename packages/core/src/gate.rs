//! Route gating.
//!
//! Every navigation is checked against the current [`SessionState`] before a
//! screen is rendered. The three rules (public gate, private gate and the
//! chat guard) are kept as named functions, and [`decide`] combines them
//! into one decision per route.
//!
//! `Unknown` is treated as `Anonymous` everywhere: the front-end shows a
//! loading screen while bootstrapping, so the inaccuracy is never visible.

use std::fmt;

use tracing::debug;

use crate::error::GateError;
use crate::notice::Notice;
use crate::state::SessionState;

/// Longest redirect chain `resolve` will follow
pub const MAX_REDIRECTS: usize = 4;

pub const PROFILE_INCOMPLETE_NOTICE: &str = "Please setup your profile first";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, always forwarded to the auth screen
    Root,
    /// `/auth`, the combined login/signup screen
    Auth,
    /// `/profile`, profile setup
    Profile,
    /// `/chat`
    Chat,
    /// Anything else; carries the normalized path
    NotFound(String),
}

/// Who a route is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
    Open,
}

impl Route {
    /// Parse a navigation target, ignoring query, fragment and trailing slash
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let trimmed = path.trim_start_matches('/').trim_end_matches('/');

        match trimmed {
            "" => Route::Root,
            "auth" => Route::Auth,
            "profile" => Route::Profile,
            "chat" => Route::Chat,
            other => Route::NotFound(format!("/{}", other)),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Root => "/",
            Route::Auth => "/auth",
            Route::Profile => "/profile",
            Route::Chat => "/chat",
            Route::NotFound(path) => path,
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Auth => Access::Public,
            Route::Profile | Route::Chat => Access::Private,
            Route::Root | Route::NotFound(_) => Access::Open,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of gating one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Render,
    RedirectTo {
        route: Route,
        notice: Option<Notice>,
    },
}

impl Decision {
    fn redirect(route: Route) -> Self {
        Decision::RedirectTo {
            route,
            notice: None,
        }
    }
}

/// Gate for screens meant for anonymous visitors.
///
/// Signed-in visitors are sent on to where they belong: profile setup when
/// it is pending, chat otherwise.
pub fn public_gate(state: SessionState) -> Decision {
    match state {
        SessionState::Unknown | SessionState::Anonymous => Decision::Render,
        SessionState::AuthenticatedIncomplete => Decision::redirect(Route::Profile),
        SessionState::AuthenticatedComplete => Decision::redirect(Route::Chat),
    }
}

/// Gate for screens that need a signed-in visitor
pub fn private_gate(state: SessionState) -> Decision {
    if state.is_authenticated() {
        Decision::Render
    } else {
        Decision::redirect(Route::Auth)
    }
}

/// Chat additionally needs a completed profile
pub fn chat_guard(state: SessionState) -> Decision {
    if state.is_authenticated() && !state.is_profile_complete() {
        Decision::RedirectTo {
            route: Route::Profile,
            notice: Some(Notice::error(PROFILE_INCOMPLETE_NOTICE, None)),
        }
    } else {
        Decision::Render
    }
}

/// Decide whether `route` may be rendered in `state`
pub fn decide(state: SessionState, route: &Route) -> Decision {
    let decision = match route.access() {
        Access::Public => public_gate(state),
        Access::Private => match private_gate(state) {
            Decision::Render if *route == Route::Chat => chat_guard(state),
            other => other,
        },
        Access::Open if *route == Route::Root => Decision::redirect(Route::Auth),
        Access::Open => Decision::Render,
    };
    debug!(%state, %route, ?decision, "Gate decision");
    decision
}

/// Where a navigation finally lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    /// Notices raised along the redirect chain, in order
    pub notices: Vec<Notice>,
    /// Routes passed through before landing, starting with the requested one
    pub redirected_from: Vec<Route>,
}

impl Resolution {
    pub fn was_redirected(&self) -> bool {
        !self.redirected_from.is_empty()
    }
}

/// Follow redirects from `requested` until a route renders
pub fn resolve(state: SessionState, requested: Route) -> Result<Resolution, GateError> {
    let mut current = requested;
    let mut notices = Vec::new();
    let mut redirected_from = Vec::new();

    for _ in 0..=MAX_REDIRECTS {
        match decide(state, &current) {
            Decision::Render => {
                return Ok(Resolution {
                    route: current,
                    notices,
                    redirected_from,
                })
            }
            Decision::RedirectTo { route, notice } => {
                notices.extend(notice);
                redirected_from.push(std::mem::replace(&mut current, route));
            }
        }
    }

    let from = redirected_from
        .first()
        .map(|route| route.path().to_string())
        .unwrap_or_default();
    Err(GateError::RedirectLoop {
        from,
        hops: redirected_from.len(),
    })
}
