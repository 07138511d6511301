use anyhow::Result;

use procrastinator::measurements::Measurements;
use procrastinator::report::print_config_stats;

use super::DatasetArgs;

// LOAD THE DATASET AND PRINT GROUND-TRUTH STATISTICS WITHOUT SELECTING
pub fn run_check(args: &DatasetArgs) -> Result<()> {
    println!("PROCRASTINATOR DATASET CHECK");
    println!();

    let measurements = Measurements::load(&args.measurements)?;
    println!("  FILE                  {}", args.measurements.display());
    println!("  CONFIGURATIONS        {}", measurements.num_configs());
    println!("  INSTANCES             {}", measurements.num_instances());

    let (names, ledger) = measurements.into_ledger(args.measurements_timeout, args.seed)?;
    println!("  MEASUREMENT TIMEOUT   {}s", ledger.ceiling());
    println!();

    let mut unusable = 0;
    for (config, name) in names.iter().enumerate() {
        let stats = ledger.config_stats(config, None)?;
        if stats.timeout_fraction >= 1.0 {
            unusable += 1;
        }
        println!("{:<6} {}", config, name);
        print_config_stats(&ledger, config, None)?;
    }
    println!();

    if unusable == 0 {
        println!("ALL CONFIGURATIONS FINISH AT LEAST ONE INSTANCE");
    } else {
        println!("{} CONFIGURATION(S) TIME OUT ON EVERY INSTANCE", unusable);
    }

    Ok(())
}
