// Failure types for wallet actions and the sequencer entry points

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wallet messages that mean the user cancelled, or that the transaction
/// outcome cannot be known. Matching is case-sensitive substring search.
pub const DEFAULT_ABANDON_PATTERNS: [&str; 3] = [
    "User rejected the request",
    "was not confirmed",
    "It is unknown if it succeeded or failed",
];

/// How a failed batch is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Remaining actions are discarded and no retry is offered
    Abandonable,
    /// Remaining actions stay queued so the batch can be retried
    Recoverable,
}

impl FailureKind {
    /// Classify a failure message against the default wallet patterns
    pub fn classify(message: &str) -> Self {
        Self::classify_with(message, &DEFAULT_ABANDON_PATTERNS)
    }

    /// Classify a failure message against a custom pattern list
    pub fn classify_with<S: AsRef<str>>(message: &str, patterns: &[S]) -> Self {
        if patterns
            .iter()
            .any(|pattern| message.contains(pattern.as_ref()))
        {
            FailureKind::Abandonable
        } else {
            FailureKind::Recoverable
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureKind::Recoverable)
    }
}

/// Failure of a single wallet action.
///
/// The message text is what the wallet reported. An action that knows how its
/// failure should be treated can attach an explicit kind, which wins over the
/// message heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
    kind: Option<FailureKind>,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
        }
    }

    pub fn with_kind(message: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            message: message.into(),
            kind: Some(kind),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Kind attached by the action itself, if any
    pub fn explicit_kind(&self) -> Option<FailureKind> {
        self.kind
    }

    /// Resolve the failure kind, falling back to message classification
    pub fn kind_with<S: AsRef<str>>(&self, patterns: &[S]) -> FailureKind {
        self.kind
            .unwrap_or_else(|| FailureKind::classify_with(&self.message, patterns))
    }

    pub fn kind(&self) -> FailureKind {
        self.kind_with(&DEFAULT_ABANDON_PATTERNS)
    }
}

impl From<anyhow::Error> for ActionError {
    fn from(err: anyhow::Error) -> Self {
        // Alternate formatting keeps the whole context chain in the message
        ActionError::new(format!("{err:#}"))
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        ActionError::new(message)
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        ActionError::new(message)
    }
}

/// Errors from the strict sequencer entry points
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequencerError {
    #[error("Has pending actions from a previous transaction ({remaining} remaining)")]
    BatchInProgress { remaining: usize },
    #[error("An action is already being executed")]
    ActionPending,
}
