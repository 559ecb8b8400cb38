// Storefront Library - drops listing and multi-transaction wallet sequencing
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod drops;
pub mod multi_transaction;
pub mod telemetry;

// Re-export key types for easy access
pub use config::{config, init_config, StorefrontConfig};
pub use drops::{CallToAction, DropCard, DropCatalog};
pub use multi_transaction::{
    Action, ActionError, ActionSettings, BatchOutcome, FailureKind, MultiTransaction,
    ProgressModal, SequencerError, WalletAction,
};
pub use telemetry::{create_batch_span, generate_correlation_id, init_telemetry};
