// PROCRASTINATOR RUN LEDGER
// SIMULATED EXECUTION SUBSTRATE: EVERY (CONFIGURATION, INSTANCE) PAIR HAS A
// FIXED GROUND-TRUTH COMPLETION TIME. A "RUN" IS A LOOKUP CAPPED AT A TIMEOUT.
//
// TWO RUNTIME COUNTERS:
//   TOTAL RUNTIME:   EVERY ELAPSED VALUE EVER RETURNED. A RETRY OF THE SAME
//                    PAIR WITH A LARGER TIMEOUT PAYS FOR THE WHOLE RUN AGAIN.
//   RESUMED RUNTIME: ONLY THE TIME BEYOND THE PREVIOUS ATTEMPT ON THAT PAIR,
//                    AS IF THE INTERRUPTED RUN HAD BEEN RESUMED.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunOutcome {
    pub timed_out: bool,
    pub elapsed: f64,
}

// READ-ONLY VIEW OF ONE CONFIGURATION'S GROUND TRUTH
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigStats {
    pub capped_mean: f64,
    pub timeout_fraction: f64,
    pub tau_timeout_fraction: Option<f64>,
}

pub struct RunLedger {
    results: Vec<Vec<f64>>,
    instances: usize,
    ceiling: f64,
    total_runtime: f64,
    total_resumed_runtime: f64,
    runtime_per_config: Vec<f64>,
    // KEYED BY THE CALLER'S INSTANCE INDEX, BEFORE MODULO REDUCTION
    ran_so_far: HashMap<(usize, usize), f64>,
    rng: StdRng,
}

impl RunLedger {
    pub fn new(results: Vec<Vec<f64>>, ceiling: f64) -> Result<Self> {
        Self::with_rng(results, ceiling, StdRng::from_os_rng())
    }

    // REPRODUCIBLE RANDOM-INSTANCE RUNS
    pub fn with_seed(results: Vec<Vec<f64>>, ceiling: f64, seed: u64) -> Result<Self> {
        Self::with_rng(results, ceiling, StdRng::seed_from_u64(seed))
    }

    fn with_rng(results: Vec<Vec<f64>>, ceiling: f64, rng: StdRng) -> Result<Self> {
        let instances = results.first().map_or(0, Vec::len);
        if instances == 0 {
            return Err(Error::EmptyPool);
        }
        if let Some((config, row)) = results
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != instances)
        {
            return Err(Error::RaggedMeasurements {
                config,
                expected: instances,
                got: row.len(),
            });
        }
        if !(ceiling > 0.0) {
            return Err(Error::InvalidParameter {
                name: "ceiling",
                value: ceiling,
                expected: "positive",
            });
        }

        let configs = results.len();
        Ok(Self {
            results,
            instances,
            ceiling,
            total_runtime: 0.0,
            total_resumed_runtime: 0.0,
            runtime_per_config: vec![0.0; configs],
            ran_so_far: HashMap::new(),
            rng,
        })
    }

    // FORGET ALL RUN HISTORY. GROUND TRUTH AND RNG STREAM ARE KEPT.
    pub fn reset(&mut self) {
        self.total_runtime = 0.0;
        self.total_resumed_runtime = 0.0;
        self.runtime_per_config.iter_mut().for_each(|r| *r = 0.0);
        self.ran_so_far.clear();
    }

    pub fn num_configs(&self) -> usize {
        self.results.len()
    }

    pub fn num_instances(&self) -> usize {
        self.instances
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn total_runtime(&self) -> f64 {
        self.total_runtime
    }

    pub fn total_resumed_runtime(&self) -> f64 {
        self.total_resumed_runtime
    }

    // RESUMED RUNTIME CHARGED TO EACH CONFIGURATION, INDEXED BY CONFIG ID
    pub fn runtime_per_config(&self) -> &[f64] {
        &self.runtime_per_config
    }

    // LONGEST ELAPSED TIME RECORDED FOR A PAIR (0 IF NEVER RUN)
    pub fn ran_so_far(&self, config: usize, instance: usize) -> f64 {
        self.ran_so_far.get(&(config, instance)).copied().unwrap_or(0.0)
    }

    // SIMULATE ONE RUN. instance = None PICKS A RANDOM INSTANCE.
    // CALLERS MUST ONLY RETRY A PAIR WITH A LARGER TIMEOUT THAN BEFORE,
    // OTHERWISE THE RESUMED COUNTER SEES A ZERO OR NEGATIVE INCREMENT.
    pub fn run(&mut self, config: usize, timeout: f64, instance: Option<usize>) -> Result<RunOutcome> {
        // NaN FAILS BOTH COMPARISONS, SO IT IS REJECTED TOO
        if !(timeout >= 0.0 && timeout <= self.ceiling) {
            return Err(Error::InvalidTimeout { timeout, ceiling: self.ceiling });
        }
        if config >= self.results.len() {
            return Err(Error::UnknownConfig { config, count: self.results.len() });
        }

        let instance = match instance {
            Some(i) => i,
            None => self.rng.random_range(0..self.instances),
        };
        let truth = self.results[config][instance % self.instances];
        let elapsed = timeout.min(truth);

        self.total_runtime += elapsed;
        let previous = self.ran_so_far.insert((config, instance), elapsed).unwrap_or(0.0);
        let resumed = elapsed - previous;
        self.runtime_per_config[config] += resumed;
        self.total_resumed_runtime += resumed;

        Ok(RunOutcome { timed_out: timeout <= truth, elapsed })
    }

    // STATISTICS OVER THE STATIC GROUND TRUTH. INDEPENDENT OF RUN HISTORY.
    pub fn config_stats(&self, config: usize, tau: Option<f64>) -> Result<ConfigStats> {
        let row = self
            .results
            .get(config)
            .ok_or(Error::UnknownConfig { config, count: self.results.len() })?;
        let count = row.len() as f64;

        let capped_mean = row.iter().map(|&t| t.min(self.ceiling)).sum::<f64>() / count;
        let fraction_over = |bound: f64| row.iter().filter(|&&t| t > bound).count() as f64 / count;

        Ok(ConfigStats {
            capped_mean,
            timeout_fraction: fraction_over(self.ceiling),
            tau_timeout_fraction: tau.map(fraction_over),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> RunLedger {
        RunLedger::with_seed(vec![vec![1.0, 3.0], vec![10.0, 0.5]], 20.0, 7).unwrap()
    }

    #[test]
    fn completed_run_reports_ground_truth() {
        let mut l = ledger();
        let out = l.run(0, 5.0, Some(1)).unwrap();
        assert!(!out.timed_out);
        assert_eq!(out.elapsed, 3.0);
        assert_eq!(l.total_runtime(), 3.0);
        assert_eq!(l.total_resumed_runtime(), 3.0);
    }

    #[test]
    fn timeout_equal_to_truth_counts_as_timed_out() {
        let mut l = ledger();
        let out = l.run(0, 1.0, Some(0)).unwrap();
        assert!(out.timed_out);
        assert_eq!(out.elapsed, 1.0);
    }

    #[test]
    fn resumed_run_charges_only_new_time() {
        let mut l = ledger();
        l.run(1, 2.0, Some(0)).unwrap();
        l.run(1, 4.0, Some(0)).unwrap();
        assert_eq!(l.total_runtime(), 6.0);
        assert_eq!(l.total_resumed_runtime(), 4.0);
        assert_eq!(l.runtime_per_config()[1], 4.0);
        assert_eq!(l.ran_so_far(1, 0), 4.0);
    }

    #[test]
    fn instance_wraps_but_resumption_is_per_slot() {
        let mut l = ledger();
        // SLOT 2 MAPS TO INSTANCE 0 BUT HAS ITS OWN RESUMPTION ENTRY
        l.run(1, 3.0, Some(0)).unwrap();
        let out = l.run(1, 3.0, Some(2)).unwrap();
        assert!(out.timed_out);
        assert_eq!(l.total_resumed_runtime(), 6.0);
        assert_eq!(l.ran_so_far(1, 2), 3.0);
    }

    #[test]
    fn random_instance_stays_in_pool() {
        let mut l = ledger();
        for _ in 0..50 {
            let out = l.run(1, 20.0, None).unwrap();
            assert!(out.elapsed == 10.0 || out.elapsed == 0.5);
        }
    }

    #[test]
    fn invalid_timeout_leaves_counters() {
        let mut l = ledger();
        l.run(0, 2.0, Some(0)).unwrap();
        let err = l.run(0, 20.5, Some(1)).unwrap_err();
        assert_eq!(err, Error::InvalidTimeout { timeout: 20.5, ceiling: 20.0 });
        assert_eq!(l.total_runtime(), 1.0);
        assert_eq!(l.total_resumed_runtime(), 1.0);
        assert_eq!(l.ran_so_far(0, 1), 0.0);
    }

    #[test]
    fn negative_or_nan_timeout_is_rejected() {
        let mut l = ledger();
        assert!(matches!(l.run(0, -2.0, Some(0)), Err(Error::InvalidTimeout { .. })));
        assert!(matches!(l.run(0, f64::NAN, Some(0)), Err(Error::InvalidTimeout { .. })));
        assert_eq!(l.total_runtime(), 0.0);
        assert_eq!(l.total_resumed_runtime(), 0.0);

        // ZERO IS A LEGAL, FREE TIMEOUT
        let out = l.run(0, 0.0, Some(0)).unwrap();
        assert_eq!(out.elapsed, 0.0);
        assert!(out.timed_out);
    }

    #[test]
    fn unknown_config_is_an_error() {
        let mut l = ledger();
        assert!(matches!(l.run(5, 1.0, Some(0)), Err(Error::UnknownConfig { config: 5, count: 2 })));
    }

    #[test]
    fn reset_clears_history() {
        let mut l = ledger();
        l.run(0, 2.0, Some(1)).unwrap();
        l.reset();
        assert_eq!(l.total_runtime(), 0.0);
        assert_eq!(l.total_resumed_runtime(), 0.0);
        assert_eq!(l.runtime_per_config(), &[0.0, 0.0]);
        assert_eq!(l.ran_so_far(0, 1), 0.0);
    }

    #[test]
    fn rejects_empty_and_ragged_tables() {
        assert_eq!(RunLedger::new(vec![], 1.0).err(), Some(Error::EmptyPool));
        assert_eq!(RunLedger::new(vec![vec![]], 1.0).err(), Some(Error::EmptyPool));
        assert_eq!(
            RunLedger::new(vec![vec![1.0, 2.0], vec![1.0]], 1.0).err(),
            Some(Error::RaggedMeasurements { config: 1, expected: 2, got: 1 }),
        );
    }

    #[test]
    fn stats_cap_at_ceiling() {
        let l = RunLedger::new(vec![vec![10.0, 30.0, 40.0, 5.0]], 20.0).unwrap();
        let s = l.config_stats(0, Some(8.0)).unwrap();
        // (10 + 20 + 20 + 5) / 4
        assert_eq!(s.capped_mean, 13.75);
        assert_eq!(s.timeout_fraction, 0.5);
        assert_eq!(s.tau_timeout_fraction, Some(0.75));
        assert_eq!(l.config_stats(0, None).unwrap().tau_timeout_fraction, None);
    }
}
