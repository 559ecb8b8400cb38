// Mock implementations for testing - no wallet, no side effects

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::multi_transaction::errors::ActionError;
use crate::multi_transaction::settings::ActionSettings;
use crate::multi_transaction::traits::WalletAction;
use crate::multi_transaction::types::Action;

/// Wallet action that replays scripted results and records every call
#[derive(Debug, Default)]
pub struct ScriptedWalletAction {
    pub responses: Mutex<VecDeque<Result<(), ActionError>>>,
    pub calls: Mutex<Vec<Value>>,
}

impl ScriptedWalletAction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always succeeds once the script runs out
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn failing_once(message: &str) -> Arc<Self> {
        let mock = Self::new();
        mock.push_failure(message);
        Arc::new(mock)
    }

    pub fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ActionError::new(message)));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletAction for ScriptedWalletAction {
    async fn execute(&self, param: &Value) -> Result<(), ActionError> {
        self.calls.lock().unwrap().push(param.clone());
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

/// Callback events in the order they fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackEvent {
    Success(String),
    Failure(String),
    Complete,
}

/// Records callbacks fired through [`ActionSettings`]
#[derive(Debug, Clone, Default)]
pub struct CallbackRecorder {
    events: Arc<Mutex<Vec<CallbackEvent>>>,
}

impl CallbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> ActionSettings {
        let on_success = self.events.clone();
        let on_failure = self.events.clone();
        let on_complete = self.events.clone();
        ActionSettings::new()
            .on_action_success(move |id| {
                let events = on_success.clone();
                async move { events.lock().unwrap().push(CallbackEvent::Success(id)) }
            })
            .on_action_failure(move |err| {
                let events = on_failure.clone();
                async move {
                    events
                        .lock()
                        .unwrap()
                        .push(CallbackEvent::Failure(err.message().to_string()))
                }
            })
            .on_complete(move || {
                let events = on_complete.clone();
                async move { events.lock().unwrap().push(CallbackEvent::Complete) }
            })
    }

    pub fn events(&self) -> Vec<CallbackEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                CallbackEvent::Success(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, CallbackEvent::Failure(_)))
            .count()
    }

    pub fn completions(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, CallbackEvent::Complete))
            .count()
    }
}

/// Build a queued action around a mock
pub fn mock_action(id: &str, mock: &Arc<ScriptedWalletAction>) -> Action {
    Action::new(
        format!("Sign transaction {id}"),
        id,
        mock.clone(),
        json!({ "id": id }),
    )
}
