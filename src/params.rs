// PROCRASTINATOR SELECTION PARAMETERS
// PURE-RUST MODULE: NO I/O
// SHARED BETWEEN BINARY CRATE (cli/) AND LIB CRATE (selectors, tests)

use crate::error::{Error, Result};

// CONFIDENCE-BOUND SCALING CONSTANTS
// THESE COME OUT OF THE LEAPSANDBOUNDS / STRUCTURED PROCRASTINATION ANALYSIS,
// NOT FROM TUNING. CHANGING THEM VOIDS THE FAILURE-PROBABILITY GUARANTEE.

pub const R: f64 = 44.0;          // SAMPLE BOUND b PER LEAPSANDBOUNDS ROUND
pub const R2: f64 = 32.0;         // EBGSTOP MINIMUM-SAMPLE RULE (APPENDIX D, LINE 25)
pub const C: f64 = 12.0;          // STRUCTURED PROCRASTINATION RUN-LIST LENGTH l_i

// EBGSTOP GEOMETRIC CHECK SCHEDULE

pub const BETA: f64 = 1.10;

// UNION BOUND SPLIT: zeta IS SHARED BETWEEN 40 * 3 HIGH-PROBABILITY EVENTS
// PER (CONFIGURATION, ROUND) PAIR

pub const UNION_BOUND_EVENTS: f64 = 40.0 * 3.0;

// EBGSTOP LOG-FACTOR d_k = 2.1 * k^1.5 * ZETA_1_5 * l^1.1 * ZETA_1_1 * n / zeta
// ZETA_1_5 AND ZETA_1_1 ARE RIEMANN ZETA VALUES THAT NORMALISE THE
// k^-1.5 AND l^-1.1 PROBABILITY ALLOCATIONS OVER ROUNDS AND CHECKS.

pub const ROUND_SCALE: f64 = 2.1;
pub const ZETA_1_5: f64 = 2.61238;
pub const ZETA_1_1: f64 = 10.5844;

// STRUCTURED PROCRASTINATION RECOMPUTES THE GLOBAL GAP THIS OFTEN

pub const DEFAULT_CHECK_INTERVAL: u64 = 10_000;

// DEFAULTS (MATCH THE CLI)

pub const DEFAULT_EPSILON: f64 = 0.2;
pub const DEFAULT_DELTA: f64 = 0.2;
pub const DEFAULT_ZETA: f64 = 0.1;
pub const DEFAULT_K0: f64 = 1.0;
pub const DEFAULT_K_BAR: f64 = 1_000_000.0;
pub const LEAPS_THETA_MULTIPLIER: f64 = 1.25;
pub const PROCRASTINATION_THETA_MULTIPLIER: f64 = 2.0;

// LEAPSANDBOUNDS KNOBS

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeapsParams {
    pub epsilon: f64,
    pub delta: f64,
    pub zeta: f64,
    pub k0: f64,
    pub theta_multiplier: f64,
}

impl Default for LeapsParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            delta: DEFAULT_DELTA,
            zeta: DEFAULT_ZETA,
            k0: DEFAULT_K0,
            theta_multiplier: LEAPS_THETA_MULTIPLIER,
        }
    }
}

impl LeapsParams {
    pub fn validate(&self) -> Result<()> {
        check_probability("epsilon", self.epsilon)?;
        check_probability("delta", self.delta)?;
        check_probability("zeta", self.zeta)?;
        check_positive("k0", self.k0)?;
        check_multiplier(self.theta_multiplier)
    }

    // FIRST CANDIDATE THRESHOLD
    pub fn initial_theta(&self) -> f64 {
        self.k0 * 16.0 / 7.0
    }

    // HARD PER-RUN CAP FOR A GIVEN THRESHOLD
    pub fn tau(&self, theta: f64) -> f64 {
        4.0 * theta / (3.0 * self.delta)
    }

    // SAMPLE BOUND FOR ROUND k OVER n CONFIGURATIONS
    pub fn sample_bound(&self, n: usize, k: u64) -> usize {
        let k = k as f64;
        let events = UNION_BOUND_EVENTS * n as f64 * k * (k + 1.0) / self.zeta;
        (R * events.ln() / (self.delta * self.epsilon * self.epsilon)).ceil() as usize
    }
}

// STRUCTURED PROCRASTINATION KNOBS

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProcrastinationParams {
    pub epsilon: f64,
    pub delta: f64,
    pub zeta: f64,
    pub k0: f64,
    pub k_bar: f64,
    pub theta_multiplier: f64,
    pub check_interval: u64,
}

impl Default for ProcrastinationParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            delta: DEFAULT_DELTA,
            zeta: DEFAULT_ZETA,
            k0: DEFAULT_K0,
            k_bar: DEFAULT_K_BAR,
            theta_multiplier: PROCRASTINATION_THETA_MULTIPLIER,
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

impl ProcrastinationParams {
    pub fn validate(&self) -> Result<()> {
        check_probability("epsilon", self.epsilon)?;
        check_probability("delta", self.delta)?;
        check_probability("zeta", self.zeta)?;
        check_positive("k0", self.k0)?;
        check_multiplier(self.theta_multiplier)?;
        if !(self.k_bar > self.k0) {
            return Err(Error::InvalidParameter {
                name: "k_bar",
                value: self.k_bar,
                expected: "greater than k0",
            });
        }
        if self.check_interval == 0 {
            return Err(Error::InvalidParameter {
                name: "check_interval",
                value: 0.0,
                expected: "at least 1",
            });
        }
        Ok(())
    }

    // NUMBER OF TIMEOUT DOUBLINGS BETWEEN k0 AND k_bar
    pub fn doublings(&self) -> f64 {
        (self.k_bar / self.k0).log2()
    }

    // RUN-LIST TARGET AFTER k GENERATIONS (k = 1 GIVES THE INITIAL l_i).
    // NEVER BELOW ONE SLOT, EVEN WHEN k_bar SITS BARELY ABOVE k0.
    pub fn target_samples(&self, n: usize, k: u64) -> usize {
        let k = k as f64;
        let inner = 3.0 * self.doublings() * n as f64 * k * k / self.zeta;
        ((C / (self.epsilon * self.epsilon) * inner.ln()).ceil() as usize).max(1)
    }

    // GAP ACHIEVED BY A CONFIGURATION WITH TARGET qq AFTER k GENERATIONS
    pub fn gap(&self, qq: usize, k: u64) -> f64 {
        (1.0 + self.epsilon).sqrt() * qq as f64 / k as f64
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value, expected: "in (0, 1)" })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value, expected: "positive" })
    }
}

fn check_multiplier(value: f64) -> Result<()> {
    if value > 1.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "theta_multiplier",
            value,
            expected: "greater than 1",
        })
    }
}
