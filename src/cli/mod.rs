// PROCRASTINATOR SUBCOMMANDS
// ONE ENTRY POINT PER ALGORITHM PLUS A DATASET CHECK

pub mod check;
pub mod leaps;
pub mod procrastinate;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing_subscriber::EnvFilter;

use procrastinator::measurements::Measurements;
use procrastinator::params::{DEFAULT_DELTA, DEFAULT_EPSILON, DEFAULT_K0, DEFAULT_ZETA};
use procrastinator::RunLedger;

// WHERE THE GROUND TRUTH COMES FROM
#[derive(Args, Debug)]
pub struct DatasetArgs {
    // JSON (OR .json.gz) MAP OF CONFIG NAME -> PER-INSTANCE RUNTIMES
    #[arg(long, default_value = "measurements.json")]
    pub measurements: PathBuf,

    // TIMEOUT (SECONDS) USED WHEN THE MEASUREMENTS WERE TAKEN
    #[arg(long, default_value_t = 900.0)]
    pub measurements_timeout: f64,

    // SEED FOR RANDOM-INSTANCE RUNS (OS ENTROPY IF UNSET)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl DatasetArgs {
    pub fn open(&self) -> Result<(Vec<String>, RunLedger)> {
        Measurements::load(&self.measurements)?
            .into_ledger(self.measurements_timeout, self.seed)
    }
}

// KNOBS SHARED BY BOTH SELECTORS
#[derive(Args, Debug)]
pub struct SelectorArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    // ESTIMATE TOLERANCE
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    // PER-CONFIGURATION FAILURE PROBABILITY
    #[arg(long, default_value_t = DEFAULT_DELTA)]
    pub delta: f64,

    // GLOBAL FAILURE-PROBABILITY BUDGET
    #[arg(long, default_value_t = DEFAULT_ZETA)]
    pub zeta: f64,

    // INITIAL THRESHOLD / TIMEOUT SCALE
    #[arg(long, default_value_t = DEFAULT_K0)]
    pub k0: f64,

    // WRITE RESUMED RUNTIME PER CONFIGURATION HERE
    #[arg(long, default_value = "runtime_per_config.json")]
    pub runtime_out: PathBuf,

    // DEBUG-LEVEL LOGGING (PER-CONFIGURATION ESTIMATES)
    #[arg(long)]
    pub verbose: bool,

    // DUMP FULL PROGRESS LOG ON EXIT
    #[arg(long)]
    pub dump_log: bool,
}

// RUST_LOG WINS OVER --verbose
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
