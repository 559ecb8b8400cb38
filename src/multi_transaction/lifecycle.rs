use serde::{Deserialize, Serialize};
use statig::prelude::*;

pub const DEFAULT_IDLE_MESSAGE: &str = "Sign the message in your wallet to continue";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchEvent {
    Start {
        total: usize,
        resume: bool,
    },
    ActionStarted {
        name: String,
    },
    ActionSucceeded,
    Finished,
    Abandoned,
    Stalled,
    /// The settled batch's finalizer is done with its failure hook
    Released,
    Cleared,
}

/// Coarse phase of the batch, mirrored from the active state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatchPhase {
    #[default]
    Idle,
    Running,
    Stalled,
}

/// Flags owned by the batch state machine
pub struct BatchLifecycle {
    pub has_action_pending: bool,
    pub has_remaining_actions: bool,
    pub has_error: bool,
    pub message: String,
    pub total: usize,
    pub phase: BatchPhase,
}

impl Default for BatchLifecycle {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_MESSAGE.to_string())
    }
}

impl BatchLifecycle {
    pub fn new(idle_message: String) -> Self {
        Self {
            has_action_pending: false,
            has_remaining_actions: false,
            has_error: false,
            message: idle_message,
            total: 0,
            phase: BatchPhase::Idle,
        }
    }

    fn begin(&mut self, total: usize, resume: bool) {
        self.total = total;
        self.has_action_pending = true;
        self.has_remaining_actions = true;
        if !resume {
            self.has_error = false;
        }
        self.phase = BatchPhase::Running;
    }

    fn reset(&mut self) {
        self.has_action_pending = false;
        self.has_remaining_actions = false;
        self.has_error = false;
        self.total = 0;
        self.phase = BatchPhase::Idle;
    }
}

#[state_machine(initial = "State::idle()")]
impl BatchLifecycle {
    #[state]
    fn idle(&mut self, event: &BatchEvent) -> Outcome<State> {
        match event {
            BatchEvent::Start { total, resume } => {
                self.begin(*total, *resume);
                tracing::debug!(total = %total, resume = %resume, "Batch started");
                Transition(State::running())
            }
            BatchEvent::Released => {
                self.has_action_pending = false;
                Handled
            }
            BatchEvent::Cleared => {
                self.reset();
                Handled
            }
            _ => Handled,
        }
    }

    #[state]
    fn running(&mut self, event: &BatchEvent) -> Outcome<State> {
        match event {
            BatchEvent::ActionStarted { name } => {
                self.message = name.clone();
                Handled
            }
            BatchEvent::ActionSucceeded => {
                self.has_error = false;
                Handled
            }
            // Pending stays set until Released so the finalizer cannot be re-entered
            BatchEvent::Finished | BatchEvent::Abandoned => {
                self.has_remaining_actions = false;
                self.phase = BatchPhase::Idle;
                Transition(State::idle())
            }
            BatchEvent::Stalled => {
                self.has_error = true;
                self.phase = BatchPhase::Stalled;
                tracing::debug!(message = %self.message, "Batch stalled on recoverable failure");
                Transition(State::stalled())
            }
            BatchEvent::Cleared => {
                self.reset();
                Transition(State::idle())
            }
            // A second start while running is rejected by the sequencer guard
            BatchEvent::Start { .. } | BatchEvent::Released => Handled,
        }
    }

    #[state]
    fn stalled(&mut self, event: &BatchEvent) -> Outcome<State> {
        match event {
            BatchEvent::Start { total, .. } => {
                self.begin(*total, true);
                tracing::debug!(total = %total, "Stalled batch resumed");
                Transition(State::running())
            }
            BatchEvent::Released => {
                self.has_action_pending = false;
                Handled
            }
            BatchEvent::Cleared => {
                self.reset();
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}
