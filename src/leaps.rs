// PROCRASTINATOR LEAPSANDBOUNDS SELECTOR
// ROUNDS k = 1, 2, ... WITH A GEOMETRICALLY RELAXED THRESHOLD theta.
//
// EACH ROUND RUNS THE EBGSTOP ESTIMATOR ONCE PER CONFIGURATION WITH A
// ROUND-SPECIFIC SAMPLE BOUND b. THE UNION BOUND OVER ROUNDS INSIDE b KEEPS
// THE TOTAL FAILURE PROBABILITY BELOW zeta NO MATTER HOW MANY ROUNDS RUN.
// THE FIRST ROUND WHERE SOME ESTIMATE LANDS STRICTLY BELOW theta ENDS THE SEARCH.

use tracing::info;

use crate::ebgstop::{Estimate, EstimatorRound};
use crate::error::Result;
use crate::ledger::RunLedger;
use crate::params::LeapsParams;
use crate::selection::Selection;
use crate::trace::ProgressLog;

pub struct LeapsAndBounds {
    params: LeapsParams,
    rounds: u64,
    pub log: ProgressLog,
}

impl LeapsAndBounds {
    pub fn new(params: LeapsParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            rounds: 0,
            log: ProgressLog::new("B"),
        })
    }

    pub fn params(&self) -> &LeapsParams {
        &self.params
    }

    // ROUNDS EXECUTED BY THE LAST select()
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn select(&mut self, ledger: &mut RunLedger) -> Result<Selection> {
        let n = ledger.num_configs();
        let mut theta = self.params.initial_theta();
        let mut k: u64 = 0;
        self.rounds = 0;
        self.log.clear();

        loop {
            k += 1;
            self.rounds = k;
            let b = self.params.sample_bound(n, k);
            info!(
                round = k,
                b,
                theta,
                total_runtime = ledger.total_runtime(),
                "leapsandbounds round"
            );
            self.log.record(k, theta, b as f64,
                            ledger.total_runtime(), ledger.total_resumed_runtime());

            let mut estimates: Vec<Estimate> = Vec::with_capacity(n);
            for config in 0..n {
                let round = EstimatorRound {
                    config,
                    num_configs: n,
                    round: k,
                    sample_bound: b,
                    theta,
                    epsilon: self.params.epsilon,
                    delta: self.params.delta,
                    zeta: self.params.zeta,
                };
                estimates.push(round.estimate(ledger)?);
            }

            // FIRST MINIMUM WINS TIES
            let best = estimates
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (i, e)| match best {
                    Some((_, v)) if v <= e.value => best,
                    _ => Some((i, e.value)),
                });
            if let Some((best_config, value)) = best {
                if value < theta {
                    return Ok(Selection {
                        best_config,
                        score: value,
                        tau: Some(self.params.tau(theta)),
                    });
                }
            }

            theta *= self.params.theta_multiplier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn rejects_invalid_params() {
        let params = LeapsParams { epsilon: 0.0, ..LeapsParams::default() };
        assert!(matches!(
            LeapsAndBounds::new(params),
            Err(Error::InvalidParameter { name: "epsilon", .. })
        ));
    }

    #[test]
    fn single_cheap_config_wins_first_round() {
        let mut ledger = RunLedger::new(vec![vec![1.0; 4]], 20.0).unwrap();
        let mut lb = LeapsAndBounds::new(LeapsParams::default()).unwrap();
        let sel = lb.select(&mut ledger).unwrap();
        assert_eq!(sel.best_config, 0);
        assert_eq!(lb.rounds(), 1);
        assert_eq!(sel.score, 1.0);
        assert_eq!(lb.log.len(), 1);
    }

    #[test]
    fn second_select_starts_a_fresh_log() {
        let mut ledger = RunLedger::new(vec![vec![3.0; 5]], 100.0).unwrap();
        let mut lb = LeapsAndBounds::new(LeapsParams::default()).unwrap();
        let first = lb.select(&mut ledger).unwrap();
        let first_thetas: Vec<f64> = lb.log.iter().map(|c| c.theta).collect();

        ledger.reset();
        let second = lb.select(&mut ledger).unwrap();
        assert_eq!(second, first);
        assert_eq!(lb.log.len() as u64, lb.rounds());
        let thetas: Vec<f64> = lb.log.iter().map(|c| c.theta).collect();
        assert_eq!(thetas, first_thetas);
        assert!(thetas.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn runaway_threshold_hits_ceiling() {
        // EVERY ROUND CERTIFIES ABOVE theta UNTIL tau OUTGROWS THE DATASET
        let mut ledger = RunLedger::new(vec![vec![15.0; 4]], 20.0).unwrap();
        let mut lb = LeapsAndBounds::new(LeapsParams::default()).unwrap();
        assert!(matches!(lb.select(&mut ledger), Err(Error::InvalidTimeout { .. })));
    }
}
