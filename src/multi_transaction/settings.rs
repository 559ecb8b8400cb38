// Per-invocation callbacks for run and retry

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::multi_transaction::errors::ActionError;

type HookFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
type CompleteHook = Arc<dyn Fn() -> HookFuture + Send + Sync>;
type SuccessHook = Arc<dyn Fn(String) -> HookFuture + Send + Sync>;
type FailureHook = Arc<dyn Fn(ActionError) -> HookFuture + Send + Sync>;

/// Optional callbacks for a single `run` or `retry` call.
///
/// * `on_complete` runs after every attempt, whatever the result.
/// * `on_action_success` runs after each action succeeds, with its id.
/// * `on_action_failure` runs once when the attempt fails.
#[derive(Clone, Default)]
pub struct ActionSettings {
    on_complete: Option<CompleteHook>,
    on_action_success: Option<SuccessHook>,
    on_action_failure: Option<FailureHook>,
}

impl ActionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_complete<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_complete = Some(Arc::new(move || -> HookFuture { Box::pin(hook()) }));
        self
    }

    pub fn on_action_success<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_action_success = Some(Arc::new(move |id: String| -> HookFuture { Box::pin(hook(id)) }));
        self
    }

    pub fn on_action_failure<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(ActionError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_action_failure = Some(Arc::new(move |err: ActionError| -> HookFuture { Box::pin(hook(err)) }));
        self
    }

    pub(crate) async fn completed(&self) {
        if let Some(hook) = &self.on_complete {
            hook().await;
        }
    }

    pub(crate) async fn action_succeeded(&self, id: &str) {
        if let Some(hook) = &self.on_action_success {
            hook(id.to_string()).await;
        }
    }

    pub(crate) async fn action_failed(&self, err: &ActionError) {
        if let Some(hook) = &self.on_action_failure {
            hook(err.clone()).await;
        }
    }
}

impl fmt::Debug for ActionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSettings")
            .field("on_complete", &self.on_complete.is_some())
            .field("on_action_success", &self.on_action_success.is_some())
            .field("on_action_failure", &self.on_action_failure.is_some())
            .finish()
    }
}
