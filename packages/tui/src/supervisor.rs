// ABOUTME: Top-level render supervisor that contains panics raised while drawing
// ABOUTME: A faulted frame switches the UI to a static fault screen until reset

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use ratatui::Frame;
use tracing::error;

use crate::state::AppState;
use crate::ui;

/// A panic caught while drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFault {
    pub message: String,
}

impl RenderFault {
    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Self { message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    Faulted(RenderFault),
}

/// Wraps every frame so a rendering bug shows the fault screen instead of
/// tearing down the terminal.
#[derive(Debug, Default)]
pub struct RenderSupervisor {
    fault: Option<RenderFault>,
}

impl RenderSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fault(&self) -> Option<&RenderFault> {
        self.fault.as_ref()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Forget the fault; the next frame renders normally again
    pub fn reset(&mut self) {
        self.fault = None;
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) -> RenderOutcome {
        self.render_with(frame, |frame| ui::render(frame, state))
    }

    /// Run `draw` under the supervisor
    pub fn render_with<F>(&mut self, frame: &mut Frame, draw: F) -> RenderOutcome
    where
        F: FnOnce(&mut Frame),
    {
        if let Some(fault) = &self.fault {
            ui::widgets::fault::render(frame, fault);
            return RenderOutcome::Faulted(fault.clone());
        }

        match panic::catch_unwind(AssertUnwindSafe(|| draw(&mut *frame))) {
            Ok(()) => RenderOutcome::Rendered,
            Err(payload) => {
                let fault = RenderFault::from_panic(payload);
                error!(message = %fault.message, "Render panicked, showing fault screen");
                ui::widgets::fault::render(frame, &fault);
                self.fault = Some(fault.clone());
                RenderOutcome::Faulted(fault)
            }
        }
    }
}
