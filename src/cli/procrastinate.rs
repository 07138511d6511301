use anyhow::{Context, Result};
use clap::Args;

use procrastinator::params::{
    ProcrastinationParams, DEFAULT_CHECK_INTERVAL, DEFAULT_K_BAR, PROCRASTINATION_THETA_MULTIPLIER,
};
use procrastinator::report::{print_selection, save_runtime_per_config};
use procrastinator::StructuredProcrastination;

use super::{init_logging, SelectorArgs};

#[derive(Args, Debug)]
pub struct ProcrastinateArgs {
    #[command(flatten)]
    pub common: SelectorArgs,

    // UPPER END OF THE TIMEOUT RANGE
    #[arg(long, default_value_t = DEFAULT_K_BAR)]
    pub k_bar: f64,

    // TIMEOUT GROWTH ON EACH RETRY OF A TIMED-OUT SLOT
    #[arg(long, default_value_t = PROCRASTINATION_THETA_MULTIPLIER)]
    pub theta_multiplier: f64,

    // ITERATIONS BETWEEN CONFIDENCE-GAP RECOMPUTATIONS
    #[arg(long, default_value_t = DEFAULT_CHECK_INTERVAL)]
    pub check_interval: u64,
}

pub fn run_procrastinate(args: &ProcrastinateArgs) -> Result<()> {
    let c = &args.common;
    init_logging(c.verbose);

    let params = ProcrastinationParams {
        epsilon: c.epsilon,
        delta: c.delta,
        zeta: c.zeta,
        k0: c.k0,
        k_bar: args.k_bar,
        theta_multiplier: args.theta_multiplier,
        check_interval: args.check_interval,
    };
    let mut selector = StructuredProcrastination::new(params)?;
    let (names, mut ledger) = c.dataset.open()?;

    println!("PROCRASTINATOR: STRUCTURED PROCRASTINATION");
    println!("CONFIGS:         {} x {} instances", ledger.num_configs(), ledger.num_instances());
    println!("EPSILON/DELTA:   {} / {}", params.epsilon, params.delta);
    println!("ZETA:            {}", params.zeta);
    println!("K0/K_BAR:        {} / {}", params.k0, params.k_bar);
    println!("THETA MULT:      {}", params.theta_multiplier);
    println!("CHECK EVERY:     {} iterations", params.check_interval);
    println!();

    let sel = selector.select(&mut ledger).context("STRUCTURED PROCRASTINATION FAILED")?;

    println!();
    println!("ITERATIONS:      {}", selector.iterations());
    print_selection(&names, &ledger, &sel)?;
    if let Some(best) = selector.configs().get(sel.best_config) {
        println!("RUN LIST:        {} slots, {} fresh runs", best.slots(), best.generation);
    }

    if c.dump_log {
        selector.log.dump();
    }
    selector.log.summary();

    save_runtime_per_config(&c.runtime_out, &names, &ledger)?;
    println!("RUNTIME PER CONFIG SAVED TO {}", c.runtime_out.display());
    Ok(())
}
