// PROCRASTINATOR SEQUENTIAL ESTIMATOR (EBGSTOP)
// RUNTIME ESTIMATION WITH AN EMPIRICAL-BERNSTEIN STOPPING RULE
//
// ONE CALL DECIDES WHETHER A CONFIGURATION'S MEAN RUNTIME SITS BELOW theta.
// THE BUDGET IS TIME (T = b * theta), NOT A RUN COUNT: A CONFIGURATION THAT
// FINISHES FAST GETS MANY MORE SAMPLES THAN b WOULD SUGGEST, ONE THAT HITS
// THE tau CAP BURNS THE BUDGET QUICKLY AND IS REPORTED AT theta.
//
//   ACCUMULATING -> CERTIFIED_BELOW          (TIGHT MEAN)
//                -> CERTIFIED_ABOVE_OR_EQUAL (theta)
//                -> TIME_BUDGET_EXHAUSTED    (theta)
//                -> SAMPLES_EXHAUSTED        (PLAIN MEAN)

use tracing::debug;

use crate::error::Result;
use crate::ledger::RunLedger;
use crate::params::{BETA, R2, ROUND_SCALE, UNION_BOUND_EVENTS, ZETA_1_1, ZETA_1_5};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    CertifiedBelow,
    CertifiedAboveOrEqual,
    TimeBudgetExhausted,
    SamplesExhausted,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::CertifiedBelow => "BELOW",
            Self::CertifiedAboveOrEqual => "ABOVE",
            Self::TimeBudgetExhausted => "TIME",
            Self::SamplesExhausted => "SAMPLES",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    pub value: f64,
    pub verdict: Verdict,
    pub samples: usize,
}

// ONE ESTIMATOR CALL: CONFIGURATION, ROUND, AND THE ROUND'S BUDGETS
#[derive(Clone, Copy, Debug)]
pub struct EstimatorRound {
    pub config: usize,
    pub num_configs: usize,
    pub round: u64,
    pub sample_bound: usize,
    pub theta: f64,
    pub epsilon: f64,
    pub delta: f64,
    pub zeta: f64,
}

impl EstimatorRound {
    pub fn tau(&self) -> f64 {
        4.0 * self.theta / (3.0 * self.delta)
    }

    // LOG-FACTOR FOR THE l-TH GEOMETRIC CHECKPOINT
    fn log_factor(&self, l: i32) -> f64 {
        let alpha = BETA.powf(l as f64).floor() / BETA.powf((l - 1) as f64).floor();
        let k = self.round as f64;
        let dk = ROUND_SCALE * k.powf(1.5) * ZETA_1_5 * (l as f64).powf(1.1) * ZETA_1_1
            * self.num_configs as f64
            / self.zeta;
        alpha * (3.0 * dk).ln()
    }

    // MINIMUM SAMPLE COUNT BEFORE A TIGHT ESTIMATE MAY BE RETURNED AT STEP j
    fn min_samples(&self, j: usize) -> f64 {
        let k = self.round as f64;
        let j = j as f64;
        let d_prime = self.zeta
            / (UNION_BOUND_EVENTS * self.num_configs as f64 * k * (k + 1.0) * j * (j + 1.0));
        (-R2 * d_prime.ln() / self.delta).ceil()
    }

    // RUN THE STOPPING RULE AGAINST THE LEDGER.
    // INSTANCES ARE CONSUMED IN ORDER 0..sample_bound, NOT SAMPLED.
    pub fn estimate(&self, ledger: &mut RunLedger) -> Result<Estimate> {
        let tau = self.tau();
        let mut budget = self.sample_bound as f64 * self.theta;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut l: i32 = 0;
        let mut x = 0.0;

        for j in 0..self.sample_bound {
            let mut elapsed = 0.0;
            if budget > 0.0 {
                elapsed = ledger.run(self.config, budget.min(tau), Some(j))?.elapsed;
            }

            budget -= elapsed;
            sum += elapsed;
            sum_sq += elapsed * elapsed;
            let m = (j + 1) as f64;
            if budget == 0.0 {
                return Ok(self.finish(self.theta, Verdict::TimeBudgetExhausted, j + 1));
            }

            let mean = sum / m;
            let var = ((sum_sq - mean * sum) / m).max(0.0);

            // x IS FIRST SET AT j = 1 (m = 2), WHICH IS ALSO ITS FIRST USE
            if m > BETA.powf(l as f64).floor() {
                l += 1;
                x = self.log_factor(l);
            }

            if j > 0 {
                let confidence = (var * 2.0 * x / m).sqrt() + 3.0 * tau * x / m;
                let lower_bound = mean - confidence;
                if (1.0 + 3.0 * self.epsilon / 7.0) * lower_bound > self.theta && mean > self.theta {
                    return Ok(self.finish(self.theta, Verdict::CertifiedAboveOrEqual, j + 1));
                }
                if m >= self.min_samples(j)
                    && confidence <= self.epsilon / 3.0 * (mean + lower_bound)
                {
                    return Ok(self.finish(mean, Verdict::CertifiedBelow, j + 1));
                }
            }
        }

        let mean = if self.sample_bound > 0 { sum / self.sample_bound as f64 } else { 0.0 };
        Ok(self.finish(mean, Verdict::SamplesExhausted, self.sample_bound))
    }

    fn finish(&self, value: f64, verdict: Verdict, samples: usize) -> Estimate {
        debug!(
            config = self.config,
            round = self.round,
            value,
            samples,
            verdict = verdict.label(),
            "estimate"
        );
        Estimate { value, verdict, samples }
    }
}
