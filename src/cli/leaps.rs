use anyhow::{Context, Result};
use clap::Args;

use procrastinator::params::{LeapsParams, LEAPS_THETA_MULTIPLIER};
use procrastinator::report::{print_selection, save_runtime_per_config};
use procrastinator::LeapsAndBounds;

use super::{init_logging, SelectorArgs};

#[derive(Args, Debug)]
pub struct LeapsArgs {
    #[command(flatten)]
    pub common: SelectorArgs,

    // THRESHOLD GROWTH PER FAILED ROUND
    #[arg(long, default_value_t = LEAPS_THETA_MULTIPLIER)]
    pub theta_multiplier: f64,
}

pub fn run_leaps(args: &LeapsArgs) -> Result<()> {
    let c = &args.common;
    init_logging(c.verbose);

    let params = LeapsParams {
        epsilon: c.epsilon,
        delta: c.delta,
        zeta: c.zeta,
        k0: c.k0,
        theta_multiplier: args.theta_multiplier,
    };
    let mut selector = LeapsAndBounds::new(params)?;
    let (names, mut ledger) = c.dataset.open()?;

    println!("PROCRASTINATOR: LEAPSANDBOUNDS");
    println!("CONFIGS:         {} x {} instances", ledger.num_configs(), ledger.num_instances());
    println!("EPSILON/DELTA:   {} / {}", params.epsilon, params.delta);
    println!("ZETA:            {}", params.zeta);
    println!("K0:              {} (theta0 = {})", params.k0, params.initial_theta());
    println!("THETA MULT:      {}", params.theta_multiplier);
    println!();

    let sel = selector.select(&mut ledger).context("LEAPSANDBOUNDS FAILED")?;

    println!();
    println!("ROUNDS:          {}", selector.rounds());
    print_selection(&names, &ledger, &sel)?;

    if c.dump_log {
        selector.log.dump();
    }
    selector.log.summary();

    save_runtime_per_config(&c.runtime_out, &names, &ledger)?;
    println!("RUNTIME PER CONFIG SAVED TO {}", c.runtime_out.display());
    Ok(())
}
