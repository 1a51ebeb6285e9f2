use crossterm::event::{self, Event, KeyEvent};
use parley_core::{ActionOutcome, BootstrapOutcome};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Event types for the TUI application
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// A spawned auth or profile action completed
    ActionFinished(ActionOutcome),
    BootstrapFinished(BootstrapOutcome),
    Quit,
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Reads terminal input and emits periodic ticks.
///
/// Spawned tasks report back through [`EventHandler::sender`].
pub struct EventHandler {
    sender: EventSender,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
    handler: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let input_sender = sender.clone();

        let handler = tokio::spawn(async move {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or_else(|| Duration::from_secs(0));

                if let Ok(true) = event::poll(timeout) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == event::KeyEventKind::Press
                            && input_sender.send(AppEvent::Key(key)).is_err()
                        {
                            break;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_sender.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            sender,
            receiver,
            handler,
        }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }

    pub fn sender(&self) -> &EventSender {
        &self.sender
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
