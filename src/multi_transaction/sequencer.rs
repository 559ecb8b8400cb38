// Sequential executor for batches of wallet actions

use statig::prelude::*;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn, Instrument};

use crate::config::SequencerConfig;
use crate::multi_transaction::errors::{ActionError, FailureKind, SequencerError};
use crate::multi_transaction::lifecycle::{BatchEvent, BatchLifecycle, BatchPhase};
use crate::multi_transaction::progress::{Progress, ProgressModal};
use crate::multi_transaction::settings::ActionSettings;
use crate::multi_transaction::types::{Action, BatchOutcome, SequencerSnapshot};
use crate::telemetry::{create_batch_span, generate_correlation_id};

struct Inner {
    queue: Vec<Action>,
    lifecycle: StateMachine<BatchLifecycle>,
    /// Bumped whenever a batch starts or is cleared. A loop whose epoch is
    /// stale no longer owns the queue.
    epoch: u64,
}

/// Handle to the multi-transaction state for one storefront session.
///
/// Clones share the same queue and flags. At most one execution loop owns
/// the queue at a time; every await of an action is a suspension point but
/// actions of a batch never overlap.
#[derive(Clone)]
pub struct MultiTransaction {
    inner: Arc<Mutex<Inner>>,
    config: Arc<SequencerConfig>,
}

impl Default for MultiTransaction {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiTransaction {
    pub fn new() -> Self {
        Self::with_config(SequencerConfig::default())
    }

    pub fn with_config(config: SequencerConfig) -> Self {
        let lifecycle = BatchLifecycle::new(config.idle_message.clone()).state_machine();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                queue: Vec::new(),
                lifecycle,
                epoch: 0,
            })),
            config: Arc::new(config),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Callbacks never run under the lock, so a poisoned guard still holds
        // consistent state
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has_action_pending(&self) -> bool {
        self.lock().lifecycle.inner().has_action_pending
    }

    pub fn has_remaining_actions(&self) -> bool {
        self.lock().lifecycle.inner().has_remaining_actions
    }

    pub fn has_error(&self) -> bool {
        self.lock().lifecycle.inner().has_error
    }

    pub fn phase(&self) -> BatchPhase {
        self.lock().lifecycle.inner().phase
    }

    /// Remaining actions in execution order
    pub fn actions(&self) -> Vec<Action> {
        self.lock().queue.clone()
    }

    pub fn progress(&self) -> Progress {
        let inner = self.lock();
        Progress::from_counts(inner.lifecycle.inner().total, inner.queue.len())
    }

    pub fn snapshot(&self) -> SequencerSnapshot {
        let inner = self.lock();
        let lifecycle = inner.lifecycle.inner();
        SequencerSnapshot {
            has_action_pending: lifecycle.has_action_pending,
            has_remaining_actions: lifecycle.has_remaining_actions,
            has_error: lifecycle.has_error,
            message: lifecycle.message.clone(),
            actions: inner.queue.iter().map(Action::summary).collect(),
            progress: Progress::from_counts(lifecycle.total, inner.queue.len()),
        }
    }

    pub fn modal(&self) -> ProgressModal {
        ProgressModal::from_snapshot(&self.snapshot())
    }

    /// Start a new batch. Returns `Ignored` without touching state when a
    /// previous batch is still unresolved or an action is in flight.
    pub async fn run(&self, actions: Vec<Action>, settings: ActionSettings) -> BatchOutcome {
        match self.try_run(actions, settings).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("Run request ignored: {}", e);
                BatchOutcome::Ignored
            }
        }
    }

    /// Like [`run`](Self::run) but reports why a batch was refused
    pub async fn try_run(
        &self,
        actions: Vec<Action>,
        settings: ActionSettings,
    ) -> Result<BatchOutcome, SequencerError> {
        let epoch = {
            let mut inner = self.lock();
            let lifecycle = inner.lifecycle.inner();
            if lifecycle.has_remaining_actions {
                return Err(SequencerError::BatchInProgress {
                    remaining: inner.queue.len(),
                });
            }
            if lifecycle.has_action_pending {
                return Err(SequencerError::ActionPending);
            }

            // Replaces whatever a cleared or finished batch left behind
            inner.lifecycle.handle(&BatchEvent::Cleared);
            inner.epoch += 1;
            inner.queue = actions.clone();

            if actions.is_empty() {
                return Ok(BatchOutcome::Completed);
            }
            inner.lifecycle.handle(&BatchEvent::Start {
                total: actions.len(),
                resume: false,
            });
            inner.epoch
        };

        Ok(self.drive(epoch, actions, settings, "run").await)
    }

    /// Resume the remaining queue after a recoverable failure. No-op when the
    /// queue is empty or an action is in flight.
    pub async fn retry(&self, settings: ActionSettings) -> BatchOutcome {
        let (epoch, batch) = {
            let mut inner = self.lock();
            if inner.queue.is_empty() {
                debug!("Retry ignored: no remaining actions");
                return BatchOutcome::Ignored;
            }
            if inner.lifecycle.inner().has_action_pending {
                debug!("Retry ignored: an action is already pending");
                return BatchOutcome::Ignored;
            }

            let batch = inner.queue.clone();
            inner.epoch += 1;
            inner.lifecycle.handle(&BatchEvent::Start {
                total: batch.len(),
                resume: true,
            });
            (inner.epoch, batch)
        };

        self.drive(epoch, batch, settings, "retry").await
    }

    /// Abandon the current batch unconditionally. An action already in flight
    /// runs to completion but nothing after it starts.
    pub fn clear(&self) {
        let mut inner = self.lock();
        let dropped = inner.queue.len();
        inner.queue.clear();
        inner.epoch += 1;
        inner.lifecycle.handle(&BatchEvent::Cleared);
        info!(dropped = dropped, "Multi-transaction queue cleared");
    }

    async fn drive(
        &self,
        epoch: u64,
        batch: Vec<Action>,
        settings: ActionSettings,
        operation: &str,
    ) -> BatchOutcome {
        let batch_id = generate_correlation_id();
        let span = create_batch_span(operation, &batch_id, batch.len());
        self.execute_batch(epoch, batch, &settings)
            .instrument(span)
            .await
    }

    async fn execute_batch(
        &self,
        epoch: u64,
        batch: Vec<Action>,
        settings: &ActionSettings,
    ) -> BatchOutcome {
        info!(total = batch.len(), "Executing action batch");

        let mut failure: Option<ActionError> = None;
        let mut cleared = false;

        for action in &batch {
            {
                let mut inner = self.lock();
                if inner.epoch != epoch {
                    cleared = true;
                    break;
                }
                inner.lifecycle.handle(&BatchEvent::ActionStarted {
                    name: action.name.clone(),
                });
            }

            info!(action.id = %action.id, action.name = %action.name, "Executing action");
            match self.execute_action(action).await {
                Ok(()) => {
                    settings.action_succeeded(&action.id).await;

                    let mut inner = self.lock();
                    if inner.epoch != epoch {
                        cleared = true;
                        break;
                    }
                    inner.queue.retain(|queued| queued.id != action.id);
                    inner.lifecycle.handle(&BatchEvent::ActionSucceeded);
                    debug!(
                        action.id = %action.id,
                        remaining = inner.queue.len(),
                        "Action succeeded"
                    );
                }
                Err(err) => {
                    warn!(action.id = %action.id, error = %err, "Action failed");
                    failure = Some(err);
                    break;
                }
            }
        }

        let outcome = self.settle(epoch, cleared, failure.clone());

        // Fires for a cleared batch too, when its last action failed
        if let Some(err) = &failure {
            settings.action_failed(err).await;
        }
        self.release(epoch);
        settings.completed().await;
        outcome
    }

    /// Drop the pending flag once the failure hook has run. A batch that was
    /// cleared or replaced in the meantime no longer owns the flag.
    fn release(&self, epoch: u64) {
        let mut inner = self.lock();
        if inner.epoch == epoch {
            inner.lifecycle.handle(&BatchEvent::Released);
        }
    }

    /// Apply the end of a batch attempt to the shared state
    fn settle(&self, epoch: u64, cleared: bool, failure: Option<ActionError>) -> BatchOutcome {
        let mut inner = self.lock();
        if cleared || inner.epoch != epoch {
            info!("Batch was cleared while an action was in flight");
            return BatchOutcome::Cleared;
        }

        match failure {
            None => {
                inner.lifecycle.handle(&BatchEvent::Finished);
                info!("Action batch completed");
                BatchOutcome::Completed
            }
            Some(error) => match error.kind_with(&self.config.abandon_patterns) {
                FailureKind::Abandonable => {
                    let dropped = inner.queue.len();
                    inner.queue.clear();
                    inner.lifecycle.handle(&BatchEvent::Abandoned);
                    warn!(dropped = dropped, error = %error, "Action batch abandoned");
                    BatchOutcome::Abandoned { error }
                }
                FailureKind::Recoverable => {
                    inner.lifecycle.handle(&BatchEvent::Stalled);
                    warn!(
                        remaining = inner.queue.len(),
                        error = %error,
                        "Action batch stalled, retry available"
                    );
                    BatchOutcome::Stalled { error }
                }
            },
        }
    }

    async fn execute_action(&self, action: &Action) -> Result<(), ActionError> {
        let operation = action.operation.execute(&action.param);
        match self.config.action_timeout() {
            Some(limit) => tokio::time::timeout(limit, operation)
                .await
                .unwrap_or_else(|_| {
                    Err(ActionError::with_kind(
                        format!(
                            "Action '{}' timed out after {}s",
                            action.name,
                            limit.as_secs()
                        ),
                        FailureKind::Abandonable,
                    ))
                }),
            None => operation.await,
        }
    }
}
