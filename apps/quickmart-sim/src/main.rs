//! # QuickMart Simulator Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load the built-in configuration
//! 3. Run the active scenario, printing to stdout
//!
//! The process exits 0 whatever the scenario outcome.

fn main() {
    // The actual setup is in lib.rs for better testability
    quickmart_sim::run();
}
