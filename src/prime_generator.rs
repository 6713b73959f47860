//! PrimeGenerator (C6): computes the sieving primes up to a limit, bootstrapping itself by
//! recursively generating the (much smaller) set of primes up to that limit's square root and
//! feeding them into its own `SieveOfEratosthenes` instance as sieving primes — the same
//! self-bootstrap cycle section 9 describes between C5 and C6, just unrolled as recursion
//! instead of interleaved incremental handoff (see DESIGN.md).

use crate::bits::for_each_prime_in_segment;
use crate::isqrt::isqrt;
use crate::presieve::PreSieve;
use crate::sieve_of_eratosthenes::SieveOfEratosthenes;

/// Below this limit, primes are found by plain trial division — the recursion's base case.
/// `23*23 = 529` keeps this comfortably above the presieve limit's candidate primes.
const TRIAL_DIVISION_LIMIT: u64 = 1_000;

fn trial_division_primes(limit: u64) -> Vec<u64> {
    let mut primes = Vec::new();
    let mut n = 2u64;
    while n <= limit {
        if primes.iter().take_while(|&&p| p * p <= n).all(|&p| n % p != 0) {
            primes.push(n);
        }
        n += 1;
    }
    primes
}

/// Returns every prime `p <= limit`, recursing on `isqrt(limit)` to obtain the sieving primes
/// it needs. `presieve` is shared (not rebuilt) across the whole recursion.
pub fn primes_up_to(limit: u64, segment_bytes: u64, presieve: &PreSieve) -> Vec<u64> {
    if limit < TRIAL_DIVISION_LIMIT {
        return trial_division_primes(limit);
    }

    let sqrt_limit = isqrt(limit);
    let sieving_primes = primes_up_to(sqrt_limit, segment_bytes, presieve);

    let mut sieve = SieveOfEratosthenes::new(0, limit, segment_bytes, presieve);
    for &p in &sieving_primes {
        // 2, 3 and 5 are not representable in the wheel-30 byte layout (every one of their
        // multiples shares a factor with 30), so they can never be scheduled as sieving primes;
        // the presieve/small-primes path handles them instead.
        if p >= 7 && p * p <= limit {
            sieve.add_sieving_prime(p);
        }
    }

    let mut out = vec![2, 3, 5];
    sieve.run(|segment, seg_lo| {
        for_each_prime_in_segment(segment, seg_lo, |p| {
            if p <= limit {
                out.push(p);
            }
        });
    });
    out
}
