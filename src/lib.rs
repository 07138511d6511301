// PROCRASTINATOR -- ADAPTIVE ALGORITHM-CONFIGURATION SELECTION
// PICKS THE CONFIGURATION WITH THE LOWEST MEAN RUNTIME FROM A SIMULATED
// RUN LEDGER, WITH LEAPSANDBOUNDS OR STRUCTURED PROCRASTINATION.
//
// EVERYTHING HERE IS PURE RUST AND SINGLE-THREADED. THE BINARY (main.rs,
// cli/) ADDS MEASUREMENT LOADING, ARGUMENT PARSING AND REPORTING.

pub mod ebgstop;
pub mod error;
pub mod leaps;
pub mod ledger;
pub mod measurements;
pub mod params;
pub mod procrastination;
pub mod report;
pub mod selection;
pub mod trace;

pub use error::{Error, Result};
pub use leaps::LeapsAndBounds;
pub use ledger::{ConfigStats, RunLedger, RunOutcome};
pub use params::{LeapsParams, ProcrastinationParams};
pub use procrastination::StructuredProcrastination;
pub use selection::Selection;
