//! NthPrimeLocator (C9): finds the n-th prime at or after (or, for negative `n`, at or before)
//! a starting point, without materializing every prime up to it. Uses the classical
//! `p_n ~ n * (ln n + ln ln n)` approximation (Rosser/Dusart-style bound used by primesieve's own
//! `nth_prime` implementation) to pick a first window, then widens geometrically until the
//! window actually contains `n` primes.

use crate::config::SieveConfig;
use crate::error::max_stop;
use crate::presieve::PreSieve;
use crate::prime_finder::PrimeFinder;

/// A rough upper bound on the gap from `start` needed to contain `k` more primes, never smaller
/// than a handful of wheel-30 spans so tiny `k` still gets a workable first window.
fn window_estimate(k: u64) -> u64 {
    if k < 6 {
        return 30;
    }
    let f = k as f64;
    ((f * (f.ln() + f.ln().ln())) as u64).saturating_add(30)
}

/// Forward search: the `n`-th prime `>= start` (1-indexed). Returns `None` only if the search
/// would have to cross [`max_stop`] without finding it.
fn nth_prime_forward(n: u64, start: u64, config: &SieveConfig) -> Option<u64> {
    let presieve = PreSieve::new(config.presieve_limit);
    let mut window = window_estimate(n);
    loop {
        let stop = start.saturating_add(window).min(max_stop());
        let pf = PrimeFinder::new(start, stop, config.segment_bytes, &presieve);
        let mut found: Vec<u64> = Vec::with_capacity(n as usize);
        pf.callback_primes(|p| {
            if (found.len() as u64) < n {
                found.push(p);
            }
        });
        if found.len() as u64 >= n {
            return Some(found[(n - 1) as usize]);
        }
        if stop >= max_stop() {
            return None;
        }
        window = window.saturating_mul(2);
    }
}

/// Backward search: the `n`-th prime `< start` counting down (so `n=1` is the prime immediately
/// below `start`). Returns `None` if fewer than `n` primes exist below `start`.
fn nth_prime_backward(n: u64, start: u64, config: &SieveConfig) -> Option<u64> {
    if start == 0 {
        return None;
    }
    let presieve = PreSieve::new(config.presieve_limit);
    let mut window = window_estimate(n);
    loop {
        let lo = start.saturating_sub(window);
        let pf = PrimeFinder::new(lo, start - 1, config.segment_bytes, &presieve);
        let mut found = Vec::new();
        pf.callback_primes(|p| found.push(p));
        if found.len() as u64 >= n {
            return Some(found[found.len() - n as usize]);
        }
        if lo == 0 {
            return None;
        }
        window = window.saturating_mul(2);
    }
}

/// `n > 0` searches forward from `start` (inclusive); `n < 0` searches backward, strictly below
/// `start`. `n == 0` has no defined meaning and is rejected by the caller before this is reached.
pub fn nth_prime(n: i64, start: u64, config: &SieveConfig) -> Option<u64> {
    if n > 0 {
        nth_prime_forward(n as u64, start, config)
    } else if n < 0 {
        nth_prime_backward(n.unsigned_abs(), start, config)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_few_primes_from_zero() {
        let config = SieveConfig::default();
        assert_eq!(nth_prime(1, 0, &config), Some(2));
        assert_eq!(nth_prime(2, 0, &config), Some(3));
        assert_eq!(nth_prime(3, 0, &config), Some(5));
        assert_eq!(nth_prime(6, 0, &config), Some(13));
    }

    #[test]
    fn matches_known_large_value() {
        let config = SieveConfig::default();
        assert_eq!(nth_prime(25, 0, &config), Some(97));
        assert_eq!(nth_prime(1_000, 0, &config), Some(7919));
    }

    #[test]
    fn forward_search_honors_a_nonzero_start() {
        let config = SieveConfig::default();
        // the 1st prime >= 100 is 101.
        assert_eq!(nth_prime(1, 100, &config), Some(101));
    }

    #[test]
    fn backward_search_finds_the_prime_below_start() {
        let config = SieveConfig::default();
        // the 1st prime below 100 is 97, the 2nd is 89.
        assert_eq!(nth_prime(-1, 100, &config), Some(97));
        assert_eq!(nth_prime(-2, 100, &config), Some(89));
    }

    #[test]
    fn zero_is_rejected() {
        let config = SieveConfig::default();
        assert_eq!(nth_prime(0, 0, &config), None);
    }

    #[test]
    fn backward_search_below_the_first_prime_fails() {
        let config = SieveConfig::default();
        assert_eq!(nth_prime(-1, 2, &config), None);
    }
}
