/// Test fixtures: scripted wallet actions that record every call
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use storefront::{Action, ActionError, ActionSettings};

/// Shared log of action ids in the order the wallet saw them
#[derive(Debug, Clone, Default)]
pub struct WalletLog {
    calls: Arc<Mutex<Vec<String>>>,
    callbacks: Arc<Mutex<Vec<String>>>,
}

impl WalletLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn callbacks(&self) -> Vec<String> {
        self.callbacks.lock().unwrap().clone()
    }

    /// Settings that log `success:<id>`, `failure:<message>` and `complete`
    pub fn settings(&self) -> ActionSettings {
        let success = self.callbacks.clone();
        let failure = self.callbacks.clone();
        let complete = self.callbacks.clone();
        ActionSettings::new()
            .on_action_success(move |id| {
                let log = success.clone();
                async move { log.lock().unwrap().push(format!("success:{id}")) }
            })
            .on_action_failure(move |err| {
                let log = failure.clone();
                async move { log.lock().unwrap().push(format!("failure:{err}")) }
            })
            .on_complete(move || {
                let log = complete.clone();
                async move { log.lock().unwrap().push("complete".to_string()) }
            })
    }

    /// An action that fails once per scripted message, then succeeds
    pub fn action(&self, id: &str, failures: &[&str]) -> Action {
        let calls = self.calls.clone();
        let script: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(
            failures.iter().map(|f| f.to_string()).collect(),
        ));
        let action_id = id.to_string();

        Action::from_fn(
            format!("Signing {id}"),
            id,
            json!({ "id": id }),
            move |_param| {
                calls.lock().unwrap().push(action_id.clone());
                let next = script.lock().unwrap().pop_front();
                async move {
                    match next {
                        Some(message) => Err(ActionError::new(message)),
                        None => Ok(()),
                    }
                }
            },
        )
    }

    /// One action per id; the action at `fail_at` fails once with `message`
    pub fn batch(&self, ids: &[&str], fail_at: Option<(usize, &str)>) -> Vec<Action> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| match fail_at {
                Some((k, message)) if k == i => self.action(id, &[message]),
                _ => self.action(id, &[]),
            })
            .collect()
    }
}
