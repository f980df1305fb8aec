//! Scoreboarding oracle for hardware FIFOs.
//!
//! A [`Predictor`] mirrors the FIFO under test from what the monitors see. Two
//! [`Scoreboard`]s, one per side, check the design's traffic against it in
//! order. [`Environment`] builds and wires them; see `tests/` for full runs.

mod channel;
pub mod config;
pub mod env;
mod error;
pub mod mailbox;
mod oracle_obj;
pub mod predictor;
pub mod prelude;
pub mod report;
pub mod scoreboard;
pub mod sequence;
mod transaction;
pub mod utils;

pub use channel::{Channel, Subscriber};
pub use config::{OracleConfig, ResiduePolicy};
pub use env::Environment;
pub use error::OracleError;
pub use oracle_obj::OracleObj;
pub use predictor::Predictor;
pub use scoreboard::Scoreboard;
pub use transaction::{Role, Side, Timing, Transaction};

/// Run verdict. Both arms carry a readable summary, `Ok` means passed.
pub type OracleResult = Result<String, String>;

/// Folds several verdicts into one that passes only if all of them do.
pub fn combine(results: impl IntoIterator<Item = OracleResult>) -> OracleResult {
    let mut failed = false;
    let mut parts = Vec::new();
    for r in results {
        match r {
            Ok(s) => parts.push(s),
            Err(s) => {
                failed = true;
                parts.push(s)
            }
        }
    }
    let summary = parts.join("; ");
    match failed {
        true => Err(summary),
        false => Ok(summary),
    }
}
