//! Parley TUI - terminal front-end for the Parley chat client
//!
//! Renders the auth, profile and chat screens with ratatui and gates every
//! navigation through the session state kept in `parley-core`.

pub mod app;
pub mod events;
pub mod notices;
pub mod state;
pub mod supervisor;
pub mod ui;

pub use app::App;
pub use state::AppState;
