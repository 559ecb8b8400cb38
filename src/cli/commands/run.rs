use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::config::{config, SequencerConfig};
use crate::multi_transaction::{
    Action, ActionError, ActionSettings, BatchOutcome, FailureKind, MultiTransaction, WalletAction,
};

/// A batch of wallet actions described in TOML, with scripted wallet responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchScript {
    #[serde(default)]
    pub actions: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedStep {
    pub name: String,
    pub id: String,
    /// Simulated wallet round trip
    #[serde(default)]
    pub delay_ms: u64,
    /// Each attempt consumes one failure message; the step succeeds once they run out
    #[serde(default)]
    pub failures: Vec<String>,
    /// Overrides message-based classification for the scripted failures
    #[serde(default)]
    pub kind: Option<FailureKind>,
}

impl BatchScript {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch script {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse batch script {}", path.display()))
    }

    /// Build the queue; every step keeps its own failure script across retries
    pub fn to_actions(&self) -> Vec<Action> {
        self.build_actions(None)
    }

    /// Like [`to_actions`](Self::to_actions), but each step prints the
    /// sequencer's progress modal as it starts
    pub fn to_actions_with_progress(&self, sequencer: &MultiTransaction) -> Vec<Action> {
        self.build_actions(Some(sequencer))
    }

    fn build_actions(&self, progress: Option<&MultiTransaction>) -> Vec<Action> {
        self.actions
            .iter()
            .map(|step| {
                let mut wallet = ScriptedWallet::from_step(step);
                wallet.progress = progress.cloned();
                Action::new(
                    step.name.clone(),
                    step.id.clone(),
                    Arc::new(wallet),
                    json!({ "id": step.id }),
                )
            })
            .collect()
    }
}

/// Stand-in wallet that replays a step's scripted failures
pub struct ScriptedWallet {
    delay: Duration,
    failures: Mutex<VecDeque<String>>,
    kind: Option<FailureKind>,
    progress: Option<MultiTransaction>,
}

impl ScriptedWallet {
    pub fn from_step(step: &ScriptedStep) -> Self {
        Self {
            delay: Duration::from_millis(step.delay_ms),
            failures: Mutex::new(step.failures.iter().cloned().collect()),
            kind: step.kind,
            progress: None,
        }
    }
}

#[async_trait]
impl WalletAction for ScriptedWallet {
    async fn execute(&self, _param: &Value) -> Result<(), ActionError> {
        if let Some(sequencer) = &self.progress {
            println!("{}", sequencer.modal());
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match (next, self.kind) {
            (None, _) => Ok(()),
            (Some(message), Some(kind)) => Err(ActionError::with_kind(message, kind)),
            (Some(message), None) => Err(ActionError::new(message)),
        }
    }
}

pub struct RunCommand {
    pub script: PathBuf,
    pub retries: u32,
    pub sequencer: Option<SequencerConfig>,
}

impl RunCommand {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            retries: 0,
            sequencer: None,
        }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_sequencer_config(mut self, sequencer: SequencerConfig) -> Self {
        self.sequencer = Some(sequencer);
        self
    }

    pub async fn execute(&self) -> Result<()> {
        let script = BatchScript::load(&self.script)?;
        println!(
            "🧾 Running {} wallet action(s) from {}",
            script.actions.len(),
            self.script.display()
        );
        println!();

        let outcome = self.drive(&script).await?;

        println!();
        match &outcome {
            BatchOutcome::Completed => println!("✅ All actions confirmed"),
            BatchOutcome::Abandoned { error } => {
                println!("🛑 Batch abandoned: {}", error);
            }
            BatchOutcome::Stalled { error } => {
                println!("❌ Gave up after {} retr(ies): {}", self.retries, error);
            }
            BatchOutcome::Cleared => println!("🧹 Batch cleared"),
            BatchOutcome::Ignored => println!("⚠️  Batch was not started"),
        }
        Ok(())
    }

    /// Run the script to completion, retrying stalled batches up to the limit.
    /// A batch still stalled afterwards is cleared, like closing the progress modal.
    pub async fn drive(&self, script: &BatchScript) -> Result<BatchOutcome> {
        let sequencer_config = match &self.sequencer {
            Some(sequencer) => sequencer.clone(),
            None => config()?.sequencer.clone(),
        };
        let sequencer = MultiTransaction::with_config(sequencer_config);
        let settings = console_settings();

        let mut outcome = sequencer
            .try_run(script.to_actions_with_progress(&sequencer), settings.clone())
            .await?;

        let mut attempts = 0;
        while outcome.is_retryable() && attempts < self.retries {
            attempts += 1;
            println!("🔁 Retry {}/{}", attempts, self.retries);
            outcome = sequencer.retry(settings.clone()).await;
        }

        if outcome.is_retryable() {
            println!("{}", sequencer.modal());
            tracing::info!(
                remaining = sequencer.actions().len(),
                "Closing progress with actions still queued"
            );
            sequencer.clear();
        }

        Ok(outcome)
    }
}

fn console_settings() -> ActionSettings {
    ActionSettings::new()
        .on_action_success(|id| async move {
            println!("   ✅ {} confirmed", id);
        })
        .on_action_failure(|err| async move {
            let hint = if err.kind().is_retryable() {
                "can retry"
            } else {
                "abandoning"
            };
            println!("   ❌ {} ({})", err, hint);
        })
}
