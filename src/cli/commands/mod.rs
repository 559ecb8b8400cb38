pub mod drops;
pub mod run;

pub use drops::DropsCommand;
pub use run::{BatchScript, RunCommand, ScriptedStep, ScriptedWallet};

/// Shown when no subcommand is given
pub fn show_usage_hints() {
    println!("🛍️  Storefront");
    println!();
    println!("   storefront drops                 List drops and their status");
    println!("   storefront drops --at <RFC3339>  Render the listing at a given instant");
    println!("   storefront run <batch.toml>      Sequence a scripted batch of wallet actions");
    println!();
    println!("   Try: storefront run demos/listing-batch.toml --retries 1");
}
