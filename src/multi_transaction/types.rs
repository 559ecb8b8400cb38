// Core types for the multi-transaction sequencer

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::multi_transaction::errors::ActionError;
use crate::multi_transaction::progress::Progress;
use crate::multi_transaction::traits::{FnAction, WalletAction};

/// A named wallet operation waiting in the sequencer queue
#[derive(Clone)]
pub struct Action {
    /// Shown as the progress message while the action runs
    pub name: String,
    /// Unique within a batch; completed actions are removed by id
    pub id: String,
    pub operation: Arc<dyn WalletAction>,
    pub param: Value,
}

impl Action {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        operation: Arc<dyn WalletAction>,
        param: Value,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            operation,
            param,
        }
    }

    /// Build an action from an async closure
    pub fn from_fn<F, Fut>(
        name: impl Into<String>,
        id: impl Into<String>,
        param: Value,
        func: F,
    ) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        Self::new(name, id, Arc::new(FnAction::new(func)), param)
    }

    pub fn summary(&self) -> ActionSummary {
        ActionSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}

/// Display-only view of a queued action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    pub id: String,
    pub name: String,
}

/// How a `run` or `retry` call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The request was rejected by the reentrancy guards; nothing ran
    Ignored,
    /// Every action in the batch succeeded
    Completed,
    /// A cancellation or ambiguous failure discarded the remaining actions
    Abandoned { error: ActionError },
    /// A recoverable failure left the remaining actions queued for retry
    Stalled { error: ActionError },
    /// The batch was cleared while an action was in flight
    Cleared,
}

impl BatchOutcome {
    pub fn is_retryable(&self) -> bool {
        matches!(self, BatchOutcome::Stalled { .. })
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            BatchOutcome::Abandoned { error } | BatchOutcome::Stalled { error } => Some(error),
            _ => None,
        }
    }
}

/// Read-only copy of the sequencer state for presentation code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequencerSnapshot {
    pub has_action_pending: bool,
    pub has_remaining_actions: bool,
    pub has_error: bool,
    pub message: String,
    pub actions: Vec<ActionSummary>,
    pub progress: Progress,
}

impl SequencerSnapshot {
    pub fn remaining_ids(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.id.as_str()).collect()
    }
}
