// Multi-transaction module - sequential wallet actions with retry
//
// A batch of wallet actions runs strictly in order. Cancellations and
// ambiguous outcomes abandon the batch; any other failure keeps the remaining
// actions queued so the batch can be resumed without re-sending completed ones.

pub mod errors;
pub mod lifecycle;
pub mod progress;
pub mod sequencer;
pub mod settings;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod mocks;


pub use errors::{ActionError, FailureKind, SequencerError, DEFAULT_ABANDON_PATTERNS};
pub use lifecycle::BatchPhase;
pub use progress::{Progress, ProgressModal, RetryControl};
pub use sequencer::MultiTransaction;
pub use settings::ActionSettings;
pub use traits::{FnAction, WalletAction};
pub use types::{Action, ActionSummary, BatchOutcome, SequencerSnapshot};
