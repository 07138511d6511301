// PROCRASTINATOR RUN LEDGER TESTS
// ACCOUNTING INVARIANTS, DETERMINISM, RESUMPTION, CEILING ENFORCEMENT
//
// ALL TESTS USE THE PUBLIC LIBRARY API. NO FILES, NO CLI.

use proptest::prelude::*;

use procrastinator::{Error, RunLedger};

const CEILING: f64 = 40.0;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// (GROUND TRUTH, CALLS AS (CONFIG, INSTANCE, TIMEOUT))
fn table_and_calls() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<(usize, usize, f64)>)> {
    (1usize..4, 1usize..6).prop_flat_map(|(configs, instances)| {
        (
            prop::collection::vec(prop::collection::vec(0.0f64..60.0, instances), configs),
            prop::collection::vec((0..configs, 0usize..12, 0.0f64..=CEILING), 0..40),
        )
    })
}

proptest! {
    // === ACCOUNTING INVARIANT ===

    #[test]
    fn resumed_never_exceeds_total((table, calls) in table_and_calls()) {
        let mut ledger = RunLedger::with_seed(table, CEILING, 1).unwrap();
        for (c, i, t) in calls {
            let out = ledger.run(c, t, Some(i)).unwrap();
            prop_assert!(out.elapsed <= t);
            prop_assert!(ledger.total_resumed_runtime() <= ledger.total_runtime() + 1e-9);
        }
    }

    #[test]
    fn single_attempts_keep_counters_equal((table, calls) in table_and_calls()) {
        let mut ledger = RunLedger::with_seed(table, CEILING, 1).unwrap();
        let mut seen = std::collections::HashSet::new();
        for (c, i, t) in calls {
            if seen.insert((c, i)) {
                ledger.run(c, t, Some(i)).unwrap();
            }
        }
        prop_assert!(close(ledger.total_resumed_runtime(), ledger.total_runtime()));
    }

    #[test]
    fn per_config_runtime_sums_to_resumed((table, calls) in table_and_calls()) {
        let mut ledger = RunLedger::with_seed(table, CEILING, 1).unwrap();
        for (c, i, t) in calls {
            ledger.run(c, t, Some(i)).unwrap();
        }
        let sum: f64 = ledger.runtime_per_config().iter().sum();
        prop_assert!(close(sum, ledger.total_resumed_runtime()));
    }

    // === DETERMINISM ===

    #[test]
    fn identical_calls_identical_counters((table, calls) in table_and_calls(), seed in any::<u64>()) {
        let mut a = RunLedger::with_seed(table.clone(), CEILING, seed).unwrap();
        let mut b = RunLedger::with_seed(table, CEILING, seed).unwrap();
        for (n, (c, i, t)) in calls.into_iter().enumerate() {
            // EVERY THIRD CALL LETS THE LEDGER PICK THE INSTANCE
            let instance = if n % 3 == 0 { None } else { Some(i) };
            prop_assert_eq!(a.run(c, t, instance).unwrap(), b.run(c, t, instance).unwrap());
        }
        prop_assert_eq!(a.total_runtime(), b.total_runtime());
        prop_assert_eq!(a.total_resumed_runtime(), b.total_resumed_runtime());
    }

    // === RESUMPTION ===

    #[test]
    fn retry_charges_only_the_difference(t1 in 0.0f64..20.0, extra in 0.001f64..20.0) {
        let t2 = t1 + extra;
        let mut ledger = RunLedger::new(vec![vec![CEILING]], CEILING).unwrap();
        let first = ledger.run(0, t1, Some(0)).unwrap();
        prop_assert!(first.timed_out);
        let second = ledger.run(0, t2, Some(0)).unwrap();
        prop_assert!(second.timed_out);
        prop_assert!(close(ledger.total_resumed_runtime() - t1, t2 - t1));
        prop_assert!(close(ledger.total_runtime(), t1 + t2));
        prop_assert_eq!(ledger.ran_so_far(0, 0), t2);
    }
}

// === CEILING ===

#[test]
fn timeout_above_ceiling_is_rejected() {
    let mut ledger = RunLedger::new(vec![vec![5.0, 6.0], vec![7.0, 8.0]], 20.0).unwrap();
    ledger.run(1, 10.0, Some(0)).unwrap();
    let before = (ledger.total_runtime(), ledger.total_resumed_runtime());

    let err = ledger.run(0, 20.1, Some(1)).unwrap_err();
    assert_eq!(err, Error::InvalidTimeout { timeout: 20.1, ceiling: 20.0 });
    assert_eq!((ledger.total_runtime(), ledger.total_resumed_runtime()), before);
    assert_eq!(ledger.runtime_per_config(), &[0.0, 7.0]);

    // RANDOM-INSTANCE RUNS ARE REJECTED TOO
    assert!(ledger.run(0, 25.0, None).is_err());
    assert_eq!((ledger.total_runtime(), ledger.total_resumed_runtime()), before);
}

#[test]
fn timeout_at_ceiling_is_allowed() {
    let mut ledger = RunLedger::new(vec![vec![30.0]], 20.0).unwrap();
    let out = ledger.run(0, 20.0, Some(0)).unwrap();
    assert!(out.timed_out);
    assert_eq!(out.elapsed, 20.0);
}

// === STATISTICS ===

#[test]
fn config_over_ceiling_everywhere_times_out_fully() {
    let ledger = RunLedger::new(vec![vec![1.0, 2.0, 3.0], vec![25.0, 30.0, 100.0]], 20.0).unwrap();
    let stats = ledger.config_stats(1, Some(4.0)).unwrap();
    assert_eq!(stats.timeout_fraction, 1.0);
    assert_eq!(stats.tau_timeout_fraction, Some(1.0));
    assert_eq!(stats.capped_mean, 20.0);

    let cheap = ledger.config_stats(0, Some(2.5)).unwrap();
    assert_eq!(cheap.timeout_fraction, 0.0);
    assert_eq!(cheap.capped_mean, 2.0);
    assert!((cheap.tau_timeout_fraction.unwrap() - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn stats_ignore_run_history() {
    let mut ledger = RunLedger::new(vec![vec![1.0, 50.0]], 20.0).unwrap();
    let before = ledger.config_stats(0, None).unwrap();
    ledger.run(0, 20.0, Some(1)).unwrap();
    assert_eq!(ledger.config_stats(0, None).unwrap(), before);
}
