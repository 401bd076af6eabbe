//! # QuickMart Simulator
//!
//! Runs one hard-coded checkout scenario and prints the transcript.
//!
//! ## Module Organization
//! ```text
//! quickmart_sim/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── config.rs       ◄─── SimConfig, Scenario, ACTIVE_SCENARIO
//! ├── scenario.rs     ◄─── Store setup, cart filling, checkout, transcript
//! └── error.rs        ◄─── SimError
//! ```
//!
//! ## Output Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout  ◄── transcript: shipment notice, receipt, error lines          │
//! │  stderr  ◄── tracing events (RUST_LOG)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod scenario;

use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::SimConfig;
use scenario::Outcome;

/// Runs the active scenario against stdout.
///
/// Never fails: every problem is logged and, where it belongs in the
/// transcript, printed.
pub fn run() {
    init_tracing();

    let config = SimConfig::default();
    info!(?config, "Starting QuickMart simulator");

    let stdout = io::stdout();
    run_with(&config, &mut stdout.lock());
}

/// Runs `config` against `out`. Output failures are logged, never raised.
fn run_with<W: Write>(config: &SimConfig, out: &mut W) {
    match scenario::run(config, &mut *out) {
        Ok(report) => match report.outcome {
            Outcome::Completed(receipt) => {
                info!(total = %receipt.total, remaining = %receipt.remaining_balance, "scenario completed")
            }
            Outcome::CartRejected(err) | Outcome::CheckoutFailed(err) => {
                info!(kind = ?err.kind(), "scenario ended without a sale")
            }
        },
        Err(err) => {
            error!(%err, "scenario aborted");
            if let Err(write_err) = writeln!(out, "{}", err) {
                error!(%write_err, "failed to print abort message");
            }
        }
    }
    if let Err(err) = out.flush() {
        error!(%err, "failed to flush output");
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every cart and checkout step
/// - Default: warnings, plus INFO for the quickmart crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,quickmart_core=info,quickmart_sim=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
