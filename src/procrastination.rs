// PROCRASTINATOR STRUCTURED PROCRASTINATION SELECTOR
// ONE GLOBAL MIN-HEAP OVER CONFIGURATIONS, KEYED BY AVERAGE CHARGED COST.
//
// EACH CONFIGURATION OWNS A RUN LIST OF INSTANCE SLOTS AND A QUEUE OF
// (SLOT, TIMEOUT) REQUESTS:
//   TIMED OUT  -> SAME SLOT GOES TO THE BACK WITH timeout * theta_multiplier
//   GROWTH     -> FRESH ZERO-COST SLOTS GO TO THE FRONT
// THE CHEAPEST-LOOKING CONFIGURATION ALWAYS RUNS NEXT, SO EXPENSIVE ONES ARE
// PROCRASTINATED INDEFINITELY. THE ANYTIME LOOP STOPS ONCE THE GAP OF THE
// MOST-RUN CONFIGURATION DROPS TO THE TARGET delta.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use tracing::info;

use crate::error::{Error, Result};
use crate::ledger::RunLedger;
use crate::params::ProcrastinationParams;
use crate::selection::Selection;
use crate::trace::ProgressLog;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Request {
    pub slot: usize,
    pub timeout: f64,
}

// HEAP KEY: (AVERAGE COST, CONFIG ID). CONFIG ID BREAKS TIES.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Priority {
    cost: f64,
    config: usize,
}

impl Eq for Priority {}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.config.cmp(&other.config))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// PER-CONFIGURATION ACCUMULATORS
#[derive(Clone, Debug)]
pub struct ConfigState {
    // k[i]: FRESH SLOTS CONSUMED SO FAR
    pub generation: u64,
    // qq[i]: QUEUE LENGTH TARGET FOR THE CURRENT GENERATION
    pub target: usize,
    // r[i][slot]; ITS LENGTH IS l[i]
    pub charged: Vec<f64>,
    pub charged_sum: f64,
    pub queue: VecDeque<Request>,
}

impl ConfigState {
    fn new(slots: usize, timeout: f64) -> Self {
        Self {
            generation: 0,
            target: 0,
            charged: vec![0.0; slots],
            charged_sum: 0.0,
            queue: (0..slots).map(|slot| Request { slot, timeout }).collect(),
        }
    }

    pub fn slots(&self) -> usize {
        self.charged.len()
    }

    pub fn average_cost(&self) -> f64 {
        if self.generation == 0 {
            0.0
        } else {
            self.charged_sum / self.generation as f64
        }
    }

    fn charge(&mut self, slot: usize, cost: f64) {
        self.charged_sum += cost - self.charged[slot];
        self.charged[slot] = cost;
    }

    // APPEND A FRESH SLOT AT THE FRONT SO IT RUNS BEFORE ANY ESCALATION
    fn grow(&mut self, timeout: f64) {
        let slot = self.charged.len();
        self.charged.push(0.0);
        self.queue.push_front(Request { slot, timeout });
    }
}

pub struct StructuredProcrastination {
    params: ProcrastinationParams,
    configs: Vec<ConfigState>,
    iterations: u64,
    pub log: ProgressLog,
}

impl StructuredProcrastination {
    pub fn new(params: ProcrastinationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            configs: Vec::new(),
            iterations: 0,
            log: ProgressLog::new("DELTA"),
        })
    }

    pub fn params(&self) -> &ProcrastinationParams {
        &self.params
    }

    // ITERATIONS EXECUTED BY THE LAST select()
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    // ACCUMULATORS LEFT BY THE LAST select()
    pub fn configs(&self) -> &[ConfigState] {
        &self.configs
    }

    pub fn select(&mut self, ledger: &mut RunLedger) -> Result<Selection> {
        let n = ledger.num_configs();
        let params = self.params;
        let initial_slots = params.target_samples(n, 1);

        self.iterations = 0;
        self.log.clear();
        self.configs = (0..n)
            .map(|_| ConfigState::new(initial_slots, params.k0))
            .collect();
        let mut heap: BinaryHeap<Reverse<Priority>> = (0..n)
            .map(|config| Reverse(Priority { cost: 0.0, config }))
            .collect();

        let mut current_delta = 1.0;
        let mut best_config = 0;

        while current_delta > params.delta {
            self.iterations += 1;

            // EVERY CONFIG IS BACK IN THE HEAP BEFORE THE NEXT POP,
            // SO THE HEAP HOLDS EXACTLY n ENTRIES AND NONE ARE STALE
            let i = match heap.pop() {
                Some(Reverse(p)) => p.config,
                None => return Err(Error::EmptyPool),
            };
            let state = &mut self.configs[i];
            let Request { slot, timeout } = match state.queue.pop_front() {
                Some(r) => r,
                None => return Err(Error::EmptyPool),
            };

            if state.charged[slot] == 0.0 {
                state.generation += 1;
                state.target = params.target_samples(n, state.generation);
            }

            let outcome = ledger.run(i, timeout, Some(slot))?;
            if outcome.timed_out {
                state.charge(slot, timeout);
                state.queue.push_back(Request {
                    slot,
                    timeout: timeout * params.theta_multiplier,
                });
            } else {
                state.charge(slot, outcome.elapsed);
            }

            while state.queue.len() < state.target {
                state.grow(timeout);
            }

            heap.push(Reverse(Priority { cost: state.average_cost(), config: i }));

            if self.iterations % params.check_interval == 0 {
                best_config = self.most_charged();
                let best = &self.configs[best_config];
                current_delta = params.gap(best.target, best.generation);
                info!(
                    iterations = self.iterations,
                    delta = current_delta,
                    theta = timeout,
                    total_runtime = ledger.total_runtime(),
                    "structured procrastination checkpoint"
                );
                self.log.record(self.iterations, timeout, current_delta,
                                ledger.total_runtime(), ledger.total_resumed_runtime());
            }
        }

        Ok(Selection {
            best_config,
            score: current_delta,
            tau: None,
        })
    }

    // LARGEST TOTAL CHARGED COST, LOWEST ID ON TIES
    fn most_charged(&self) -> usize {
        let mut best = 0;
        for (i, c) in self.configs.iter().enumerate() {
            if c.charged_sum > self.configs[best].charged_sum {
                best = i;
            }
        }
        best
    }
}
