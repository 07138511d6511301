// PROCRASTINATOR PROGRESS LOG
// RECORDS ONE CHECKPOINT PER LEAPSANDBOUNDS ROUND OR PER STRUCTURED
// PROCRASTINATION GAP RECOMPUTATION.
// PRE-ALLOCATED RING BUFFER. WRAPS AROUND AT CAPACITY -- OLDEST ENTRIES OVERWRITTEN.

use std::time::Instant;

const MAX_CHECKPOINTS: usize = 8192;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Checkpoint {
    pub wall_ns: u64,
    // ROUND k (LEAPSANDBOUNDS) OR ITERATION COUNT (STRUCTURED PROCRASTINATION)
    pub step: u64,
    pub theta: f64,
    // SAMPLE BOUND b OR CURRENT DELTA, SEE ProgressLog::measure_label
    pub measure: f64,
    pub total_runtime: f64,
    pub resumed_runtime: f64,
}

pub struct ProgressLog {
    checkpoints: Vec<Checkpoint>,
    head: usize,
    len: usize,
    started: Instant,
    measure_label: &'static str,
}

impl ProgressLog {
    pub fn new(measure_label: &'static str) -> Self {
        Self {
            checkpoints: vec![Checkpoint::default(); MAX_CHECKPOINTS],
            head: 0,
            len: 0,
            started: Instant::now(),
            measure_label,
        }
    }

    // FORGET EVERY CHECKPOINT AND RESTART THE WALL CLOCK
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
        self.started = Instant::now();
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // RECORD ONE CHECKPOINT. OVERWRITES OLDEST ENTRY WHEN FULL.
    pub fn record(&mut self, step: u64, theta: f64, measure: f64,
                  total_runtime: f64, resumed_runtime: f64) {
        self.checkpoints[self.head] = Checkpoint {
            wall_ns: self.started.elapsed().as_nanos() as u64,
            step,
            theta,
            measure,
            total_runtime,
            resumed_runtime,
        };
        self.head = (self.head + 1) % MAX_CHECKPOINTS;
        if self.len < MAX_CHECKPOINTS {
            self.len += 1;
        }
    }

    // ITERATE CHECKPOINTS IN CHRONOLOGICAL ORDER
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        let start = if self.len < MAX_CHECKPOINTS { 0 } else { self.head };
        (0..self.len).map(move |i| {
            &self.checkpoints[(start + i) % MAX_CHECKPOINTS]
        })
    }

    pub fn last(&self) -> Option<&Checkpoint> {
        self.iter().last()
    }

    // DUMP THE TIME SERIES AFTER SELECTION
    pub fn dump(&self) {
        if self.is_empty() {
            return;
        }

        println!("\n{:<10} {:<10} {:<14} {:<14} {:<16} {:<16}",
            "WALL_S", "STEP", "THETA", self.measure_label, "RUNTIME", "RESUMED");
        println!("{}", "-".repeat(84));

        for c in self.iter() {
            println!("{:<10.3} {:<10} {:<14.4} {:<14.4} {:<16.1} {:<16.1}",
                c.wall_ns as f64 / 1_000_000_000.0, c.step, c.theta, c.measure,
                c.total_runtime, c.resumed_runtime);
        }

        if self.len == MAX_CHECKPOINTS {
            println!("\n(RING BUFFER WRAPPED -- SHOWING MOST RECENT {} CHECKPOINTS)", MAX_CHECKPOINTS);
        }
        println!("TOTAL CHECKPOINTS: {}", self.len);
    }

    // SUMMARY STATISTICS
    pub fn summary(&self) {
        let (first, last) = match (self.iter().next(), self.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return,
        };

        let peak_theta = self.iter().map(|c| c.theta).fold(0.0, f64::max);
        let saved = last.total_runtime - last.resumed_runtime;

        println!("\n{}", "=".repeat(50));
        println!("PROCRASTINATOR SUMMARY");
        println!("{}", "=".repeat(50));
        println!("  CHECKPOINTS:       {}", self.len);
        println!("  STEPS:             {} -> {}", first.step, last.step);
        println!("  PEAK THETA:        {:.4}", peak_theta);
        println!("  FINAL {:<12} {:.4}", format!("{}:", self.measure_label), last.measure);
        println!("  RUNTIME:           {:.1}s", last.total_runtime);
        println!("  RESUMED RUNTIME:   {:.1}s", last.resumed_runtime);
        if last.total_runtime > 0.0 {
            println!("  SAVED BY RESUMING: {:.1}%", saved / last.total_runtime * 100.0);
        }
        println!("  ELAPSED:           {:.3}s", last.wall_ns as f64 / 1_000_000_000.0);
    }
}
