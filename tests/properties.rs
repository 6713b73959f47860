//! Property-based tests: the engine's `count_*`/`callback_*` surface checked against plain
//! trial division over small, randomly generated ranges (proptest), rather than against any
//! single hand-picked reference value.

use proptest::prelude::*;

fn trial_division_count(start: u64, stop: u64) -> u64 {
    if start > stop {
        return 0;
    }
    (start.max(2)..=stop).filter(|&n| (2..n).all(|d| n % d != 0)).count() as u64
}

fn is_prime_trivial(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    (2..n).all(|d| n % d != 0)
}

fn trial_division_twins(start: u64, stop: u64) -> u64 {
    if start > stop {
        return 0;
    }
    (start.max(0)..=stop).filter(|&p| is_prime_trivial(p) && is_prime_trivial(p + 2)).count() as u64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn count_primes_matches_trial_division(start in 0u64..5_000, len in 0u64..5_000) {
        let stop = start + len;
        prop_assert_eq!(primesieve::count_primes(start, stop), trial_division_count(start, stop));
    }

    #[test]
    fn count_twins_matches_trial_division(start in 0u64..3_000, len in 0u64..3_000) {
        let stop = start + len;
        prop_assert_eq!(primesieve::count_twins(start, stop), trial_division_twins(start, stop));
    }

    #[test]
    fn callback_primes_matches_count_primes(start in 0u64..5_000, len in 0u64..5_000) {
        let stop = start + len;
        let mut n = 0u64;
        primesieve::callback_primes(start, stop, |_| n += 1);
        prop_assert_eq!(n, primesieve::count_primes(start, stop));
    }

    #[test]
    fn callback_primes_yields_only_actual_primes_ascending(start in 0u64..5_000, len in 0u64..5_000) {
        let stop = start + len;
        let mut prev = None;
        let mut all_prime = true;
        let mut ascending = true;
        primesieve::callback_primes(start, stop, |p| {
            all_prime &= is_prime_trivial(p);
            if let Some(prev_p) = prev {
                ascending &= prev_p < p;
            }
            prev = Some(p);
        });
        prop_assert!(all_prime);
        prop_assert!(ascending);
    }

    #[test]
    fn counting_is_additive_across_a_random_midpoint(a in 0u64..3_000, b in 0u64..3_000, c in 0u64..3_000) {
        let mut bounds = [a, b, c];
        bounds.sort_unstable();
        let (lo, mid, hi) = (bounds[0], bounds[1], bounds[2]);
        let whole = primesieve::count_primes(lo, hi);
        let lower = primesieve::count_primes(lo, mid);
        let upper = primesieve::count_primes(mid + 1, hi);
        prop_assert_eq!(whole, lower + upper);
    }

    #[test]
    fn parallel_count_matches_serial_count(start in 0u64..20_000, len in 0u64..20_000, threads in 1usize..6) {
        let stop = start + len;
        prop_assert_eq!(primesieve::parallel_count_primes(start, stop, threads), primesieve::count_primes(start, stop));
    }

    #[test]
    fn empty_range_always_counts_zero(start in 1u64..10_000, gap_ratio in 1u64..1_000) {
        let stop = start - (start.min(gap_ratio));
        prop_assert!(stop < start);
        prop_assert_eq!(primesieve::count_primes(start, stop), 0);
        prop_assert_eq!(primesieve::count_twins(start, stop), 0);
    }
}
