// Progress derivation and the modal view model shown while a batch runs

use serde::Serialize;
use std::fmt;

use crate::multi_transaction::types::SequencerSnapshot;

pub const MODAL_TITLE: &str = "Please wait...";
const BAR_WIDTH: usize = 30;

/// Progress through the current batch, derived from the total snapshot and
/// the remaining queue length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn from_counts(total: usize, remaining: usize) -> Self {
        Self {
            completed: total.saturating_sub(remaining),
            total,
        }
    }

    /// Percentage for the progress bar. The running action is credited
    /// before it finishes so the bar moves while the wallet is waiting.
    pub fn percentage(&self) -> f64 {
        if self.total > 0 && self.completed < self.total {
            (self.completed + 1) as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.completed, self.total)
    }
}

/// Retry button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetryControl {
    pub disabled: bool,
    pub loading: bool,
}

/// What the blocking progress modal should display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressModal {
    pub title: &'static str,
    pub open: bool,
    pub message: String,
    pub progress: Progress,
    pub percentage: f64,
    pub retry: Option<RetryControl>,
}

impl ProgressModal {
    pub fn from_snapshot(snapshot: &SequencerSnapshot) -> Self {
        let retry = snapshot.has_error.then_some(RetryControl {
            disabled: snapshot.has_action_pending,
            loading: snapshot.has_action_pending,
        });

        Self {
            title: MODAL_TITLE,
            open: snapshot.has_remaining_actions || !snapshot.actions.is_empty(),
            message: snapshot.message.clone(),
            progress: snapshot.progress,
            percentage: snapshot.progress.percentage(),
            retry,
        }
    }

    pub fn counter(&self) -> String {
        self.progress.to_string()
    }

    fn bar(&self) -> String {
        let filled = ((self.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
    }
}

impl fmt::Display for ProgressModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.open {
            return Ok(());
        }
        writeln!(f, "⏳ {}", self.title)?;
        writeln!(f, "   {}", self.message)?;
        writeln!(f, "   {} {:>3.0}%", self.bar(), self.percentage)?;
        write!(f, "   {}", self.counter())?;
        if let Some(retry) = &self.retry {
            writeln!(f)?;
            if retry.loading {
                write!(f, "   🔄 Retrying...")?;
            } else {
                write!(f, "   🔁 Retry?")?;
            }
        }
        Ok(())
    }
}
