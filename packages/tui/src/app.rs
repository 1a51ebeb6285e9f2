use crate::events::{AppEvent, EventHandler, EventSender};
use crate::state::{AppState, Intent};
use crate::supervisor::{RenderOutcome, RenderSupervisor};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parley_core::{
    ActionOutcome, AuthActions, BootstrapOutcome, Bootstrapper, Route, SessionApi, SessionState,
    SessionStore,
};
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Main TUI application struct
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    supervisor: RenderSupervisor,
    store: SessionStore,
    bootstrapper: Arc<Bootstrapper<dyn SessionApi>>,
    actions: AuthActions<dyn SessionApi>,
    notice_ttl: Duration,
    bootstrapping: bool,
}

impl App {
    pub fn new(
        api: Arc<dyn SessionApi>,
        store: SessionStore,
        start: Route,
        notice_ttl: Duration,
    ) -> Self {
        Self {
            state: AppState::new(start, notice_ttl),
            should_quit: false,
            supervisor: RenderSupervisor::new(),
            bootstrapper: Arc::new(Bootstrapper::new(Arc::clone(&api), store.clone())),
            actions: AuthActions::new(api, store.clone()),
            store,
            notice_ttl,
            bootstrapping: false,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn is_faulted(&self) -> bool {
        self.supervisor.is_faulted()
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut event_handler = EventHandler::new(TICK_RATE);
        let sender = event_handler.sender().clone();
        let mut session = self.store.subscribe();

        self.sync_session(&sender);

        while !self.should_quit {
            self.draw(terminal)?;

            tokio::select! {
                event = event_handler.next() => match event {
                    Some(event) => self.handle_event(event, &sender),
                    None => self.quit(),
                },
                changed = session.changed() => {
                    if changed.is_err() {
                        self.quit();
                    } else {
                        session.borrow_and_update();
                        self.sync_session(&sender);
                    }
                }
            }
        }

        info!("Leaving the event loop");
        Ok(())
    }

    /// Draw one frame under the render supervisor
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<RenderOutcome> {
        let mut outcome = RenderOutcome::Rendered;
        let supervisor = &mut self.supervisor;
        let state = &self.state;
        terminal.draw(|frame| outcome = supervisor.render(frame, state))?;
        Ok(outcome)
    }

    /// Pull the latest session into the UI; start a bootstrap while it is unknown
    pub fn sync_session(&mut self, sender: &EventSender) {
        let snapshot = self.store.get();
        let unknown = snapshot.state() == SessionState::Unknown;
        self.state.apply_session(snapshot);

        if unknown && !self.bootstrapping {
            self.bootstrapping = true;
            let bootstrapper = Arc::clone(&self.bootstrapper);
            let sender = sender.clone();
            tokio::spawn(async move {
                let outcome = bootstrapper.ensure().await;
                let _ = sender.send(AppEvent::BootstrapFinished(outcome));
            });
        }
    }

    pub fn handle_event(&mut self, event: AppEvent, sender: &EventSender) {
        match event {
            AppEvent::Key(key) => self.handle_key_event(key, sender),
            AppEvent::Tick => self.state.notices.prune(Instant::now()),
            AppEvent::ActionFinished(outcome) => self.finish_action(outcome),
            AppEvent::BootstrapFinished(outcome) => {
                self.bootstrapping = false;
                match &outcome {
                    BootstrapOutcome::Failed(err) => warn!(error = %err, "Session bootstrap failed"),
                    other => debug!(outcome = ?other, "Session bootstrap finished"),
                }
                self.sync_session(sender);
            }
            AppEvent::Quit => self.quit(),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent, sender: &EventSender) {
        if self.supervisor.is_faulted() {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Char('r') if ctrl => self.reset(sender),
                KeyCode::Char('c') if ctrl => self.quit(),
                KeyCode::Esc => self.quit(),
                _ => {}
            }
            return;
        }

        if let Some(intent) = self.state.handle_key(key) {
            self.dispatch(intent, sender);
        }
    }

    fn dispatch(&mut self, intent: Intent, sender: &EventSender) {
        match intent {
            Intent::Quit => self.quit(),
            Intent::Login(credentials) => {
                let actions = self.actions.clone();
                spawn_action(sender, async move { actions.login(credentials).await });
            }
            Intent::Signup(credentials) => {
                let actions = self.actions.clone();
                spawn_action(sender, async move { actions.signup(credentials).await });
            }
            Intent::UpdateProfile(update) => {
                let actions = self.actions.clone();
                spawn_action(sender, async move { actions.update_profile(update).await });
            }
            Intent::Logout => {
                let outcome = self.actions.logout();
                self.finish_action(outcome);
            }
        }
    }

    fn finish_action(&mut self, outcome: ActionOutcome) {
        // The store is written before the outcome is sent, so gate on the fresh session
        self.state.apply_session(self.store.get());
        self.state.apply_outcome(outcome);
    }

    /// Back to the initial state after a render fault
    fn reset(&mut self, sender: &EventSender) {
        info!("Resetting after render fault");
        self.supervisor.reset();
        self.store.invalidate();
        self.state = AppState::new(Route::Root, self.notice_ttl);
        self.sync_session(sender);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn spawn_action<F>(sender: &EventSender, task: F)
where
    F: Future<Output = ActionOutcome> + Send + 'static,
{
    let sender = sender.clone();
    tokio::spawn(async move {
        let outcome = task.await;
        let _ = sender.send(AppEvent::ActionFinished(outcome));
    });
}
