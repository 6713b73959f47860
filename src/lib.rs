//! A segmented, wheel-factorized sieve of Eratosthenes for counting, printing and enumerating
//! primes and prime k-tuplets, from a single range up to `2^64 - 1 - (2^32 - 1) * 10`.
//!
//! The engine underneath ([`SieveConfig`], the segment drivers, the three-tier bucketed
//! cross-off structures) is private; callers reach it through the functions re-exported here.
//!
//! # Examples
//!
//! ```
//! assert_eq!(primesieve::count_primes(1, 100), 25);
//! assert_eq!(primesieve::count_twins(1, 1_000_000), 8169);
//! assert_eq!(primesieve::nth_prime(1_000, 0), 7919);
//! ```

mod api;
mod bits;
mod bucket;
mod config;
mod dispatcher;
mod erat_big;
mod erat_medium;
mod erat_small;
mod error;
mod isqrt;
mod ktuplet;
mod nth_prime;
mod presieve;
mod prime_finder;
mod prime_generator;
mod segment;
mod sieve_of_eratosthenes;
mod wheel;

pub use config::SieveConfig;
pub use error::{PrimesieveError, Result};
pub use ktuplet::Tuplet;

pub use api::{
    callback_primes, callback_primes_checked, callback_primes_with_config,
    count_primes, count_primes_checked, count_primes_with_config,
    count_quadruplets, count_quadruplets_checked, count_quadruplets_with_config,
    count_quintuplets, count_quintuplets_checked, count_quintuplets_with_config,
    count_septuplets, count_septuplets_checked, count_septuplets_with_config,
    count_sextuplets, count_sextuplets_checked, count_sextuplets_with_config,
    count_triplets, count_triplets_checked, count_triplets_with_config,
    count_twins, count_twins_checked, count_twins_with_config,
    max_stop,
    nth_prime, nth_prime_checked, nth_prime_with_config, nth_prime_with_config_checked,
    parallel_callback_primes, parallel_callback_primes_checked,
    parallel_count_primes, parallel_count_primes_checked, parallel_count_primes_with_config,
    parallel_count_quadruplets, parallel_count_quadruplets_checked, parallel_count_quadruplets_with_config,
    parallel_count_quintuplets, parallel_count_quintuplets_checked, parallel_count_quintuplets_with_config,
    parallel_count_septuplets, parallel_count_septuplets_checked, parallel_count_septuplets_with_config,
    parallel_count_sextuplets, parallel_count_sextuplets_checked, parallel_count_sextuplets_with_config,
    parallel_count_triplets, parallel_count_triplets_checked, parallel_count_triplets_with_config,
    parallel_count_twins, parallel_count_twins_checked, parallel_count_twins_with_config,
    parallel_nth_prime,
    print_primes, print_primes_checked, print_primes_with_config,
    print_quadruplets, print_quadruplets_checked, print_quadruplets_with_config,
    print_quintuplets, print_quintuplets_checked, print_quintuplets_with_config,
    print_septuplets, print_septuplets_checked, print_septuplets_with_config,
    print_sextuplets, print_sextuplets_checked, print_sextuplets_with_config,
    print_triplets, print_triplets_checked, print_triplets_with_config,
    print_twins, print_twins_checked, print_twins_with_config,
};
