// PROCRASTINATOR REPORTING
// CONSOLE REPORT OF A SELECTION + PER-CONFIGURATION RESUMED RUNTIME DUMP

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ledger::RunLedger;
use crate::selection::Selection;

pub fn format_runtime(seconds: f64) -> String {
    format!("{}s = {}m = {}h = {}d",
        seconds, seconds / 60.0, seconds / 3600.0, seconds / (3600.0 * 24.0))
}

// WINNER, ITS GROUND-TRUTH STATISTICS, AND BOTH RUNTIME COUNTERS
pub fn print_selection(names: &[String], ledger: &RunLedger, sel: &Selection) -> Result<()> {
    let name = names.get(sel.best_config).map_or("?", String::as_str);
    println!("BEST CONFIG:     {} ({})", sel.best_config, name);
    match sel.tau {
        Some(tau) => println!("CAPPED AVG:      {}\nTAU:             {}", sel.score, tau),
        None => println!("DELTA:           {}", sel.score),
    }
    print_config_stats(ledger, sel.best_config, sel.tau)?;
    println!("TOTAL RUNTIME:   {}", format_runtime(ledger.total_runtime()));
    println!("RESUMED RUNTIME: {}", format_runtime(ledger.total_resumed_runtime()));
    Ok(())
}

pub fn print_config_stats(ledger: &RunLedger, config: usize, tau: Option<f64>) -> Result<()> {
    let stats = ledger.config_stats(config, tau)?;
    println!("  AVG RUNTIME CAPPED AT DATASET TIMEOUT:   {}", stats.capped_mean);
    println!("  FRACTION TIMING OUT AT DATASET TIMEOUT:  {}", stats.timeout_fraction);
    if let Some(f) = stats.tau_timeout_fraction {
        println!("  FRACTION TIMING OUT AT TAU:              {}", f);
    }
    Ok(())
}

// RESUMED RUNTIME PER CONFIGURATION, KEYED BY NAME
pub fn runtime_per_config(names: &[String], ledger: &RunLedger) -> BTreeMap<String, f64> {
    names.iter()
        .cloned()
        .zip(ledger.runtime_per_config().iter().copied())
        .collect()
}

pub fn save_runtime_per_config(path: &Path, names: &[String], ledger: &RunLedger) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &runtime_per_config(names, ledger))?;
    out.flush()?;
    Ok(())
}
