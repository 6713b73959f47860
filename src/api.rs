//! Public operation surface (section 6): every entry point the rest of the crate (and, via
//! `lib.rs`'s re-exports, external callers) uses. Each family follows the same shape —
//! `foo`, a sentinel-returning convenience wrapper; `foo_checked`, returning a `Result`; and
//! `foo_with_config`, taking an explicit [`SieveConfig`] — mirroring the `*_with_config`/
//! `*_checked` siblings called out in section 6/7.

use std::io::Write;

use crate::config::SieveConfig;
use crate::dispatcher;
use crate::error::{self, validate_range, PrimesieveError, Result, SENTINEL};
use crate::ktuplet::Tuplet;
use crate::nth_prime;
use crate::presieve::PreSieve;
use crate::prime_finder::PrimeFinder;

/// The largest `stop` any operation in this crate will accept.
pub fn max_stop() -> u64 {
    error::max_stop()
}

fn count_checked(start: u64, stop: u64, tuplet: Tuplet, config: &SieveConfig) -> Result<u64> {
    validate_range(start, stop)?;
    if start > stop {
        return Ok(0);
    }
    let presieve = PreSieve::new(config.presieve_limit);
    Ok(PrimeFinder::new(start, stop, config.segment_bytes, &presieve).count_ktuplets(tuplet))
}

fn parallel_count_checked(start: u64, stop: u64, tuplet: Tuplet, threads: usize, config: &SieveConfig) -> Result<u64> {
    validate_range(start, stop)?;
    if start > stop {
        return Ok(0);
    }
    let config = config.with_threads(threads);
    Ok(dispatcher::parallel_count(start, stop, tuplet, &config))
}

fn print_checked<W: Write>(start: u64, stop: u64, tuplet: Tuplet, config: &SieveConfig, out: &mut W) -> Result<()> {
    validate_range(start, stop)?;
    if start > stop {
        return Ok(());
    }
    let presieve = PreSieve::new(config.presieve_limit);
    PrimeFinder::new(start, stop, config.segment_bytes, &presieve)
        .print(tuplet, out)
        .map_err(|_| PrimesieveError::OutOfMemory)
}

/// Generates the six `count_*`/`*_checked`/`*_with_config` functions and their `parallel_*`
/// counterparts for one [`Tuplet`] variant — the repetitive half of section 6's surface.
macro_rules! count_api {
    ($count:ident, $count_checked:ident, $count_with_config:ident,
     $parallel:ident, $parallel_checked:ident, $parallel_with_config:ident,
     $tuplet:expr) => {
        pub fn $count(start: u64, stop: u64) -> u64 {
            $count_with_config(start, stop, &SieveConfig::default())
        }
        pub fn $count_checked(start: u64, stop: u64) -> Result<u64> {
            count_checked(start, stop, $tuplet, &SieveConfig::default())
        }
        pub fn $count_with_config(start: u64, stop: u64, config: &SieveConfig) -> u64 {
            count_checked(start, stop, $tuplet, config).unwrap_or(SENTINEL)
        }
        pub fn $parallel(start: u64, stop: u64, threads: usize) -> u64 {
            $parallel_with_config(start, stop, threads, &SieveConfig::default())
        }
        pub fn $parallel_checked(start: u64, stop: u64, threads: usize) -> Result<u64> {
            parallel_count_checked(start, stop, $tuplet, threads, &SieveConfig::default())
        }
        pub fn $parallel_with_config(start: u64, stop: u64, threads: usize, config: &SieveConfig) -> u64 {
            parallel_count_checked(start, stop, $tuplet, threads, config).unwrap_or(SENTINEL)
        }
    };
}

count_api!(
    count_primes, count_primes_checked, count_primes_with_config,
    parallel_count_primes, parallel_count_primes_checked, parallel_count_primes_with_config,
    Tuplet::None
);
count_api!(
    count_twins, count_twins_checked, count_twins_with_config,
    parallel_count_twins, parallel_count_twins_checked, parallel_count_twins_with_config,
    Tuplet::Twin
);
count_api!(
    count_triplets, count_triplets_checked, count_triplets_with_config,
    parallel_count_triplets, parallel_count_triplets_checked, parallel_count_triplets_with_config,
    Tuplet::Triplet
);
count_api!(
    count_quadruplets, count_quadruplets_checked, count_quadruplets_with_config,
    parallel_count_quadruplets, parallel_count_quadruplets_checked, parallel_count_quadruplets_with_config,
    Tuplet::Quadruplet
);
count_api!(
    count_quintuplets, count_quintuplets_checked, count_quintuplets_with_config,
    parallel_count_quintuplets, parallel_count_quintuplets_checked, parallel_count_quintuplets_with_config,
    Tuplet::Quintuplet
);
count_api!(
    count_sextuplets, count_sextuplets_checked, count_sextuplets_with_config,
    parallel_count_sextuplets, parallel_count_sextuplets_checked, parallel_count_sextuplets_with_config,
    Tuplet::Sextuplet
);
count_api!(
    count_septuplets, count_septuplets_checked, count_septuplets_with_config,
    parallel_count_septuplets, parallel_count_septuplets_checked, parallel_count_septuplets_with_config,
    Tuplet::Septuplet
);

/// Generates the `print_*` family. Always serial (section 4.10): printing is never dispatched
/// across threads, so there is no `parallel_print_*`.
macro_rules! print_api {
    ($print:ident, $print_checked:ident, $print_with_config:ident, $tuplet:expr) => {
        pub fn $print(start: u64, stop: u64) {
            let _ = $print_with_config(start, stop, &SieveConfig::default());
        }
        pub fn $print_checked(start: u64, stop: u64) -> Result<()> {
            print_checked(start, stop, $tuplet, &SieveConfig::default(), &mut std::io::stdout().lock())
        }
        pub fn $print_with_config(start: u64, stop: u64, config: &SieveConfig) -> Result<()> {
            print_checked(start, stop, $tuplet, config, &mut std::io::stdout().lock())
        }
    };
}

print_api!(print_primes, print_primes_checked, print_primes_with_config, Tuplet::None);
print_api!(print_twins, print_twins_checked, print_twins_with_config, Tuplet::Twin);
print_api!(print_triplets, print_triplets_checked, print_triplets_with_config, Tuplet::Triplet);
print_api!(print_quadruplets, print_quadruplets_checked, print_quadruplets_with_config, Tuplet::Quadruplet);
print_api!(print_quintuplets, print_quintuplets_checked, print_quintuplets_with_config, Tuplet::Quintuplet);
print_api!(print_sextuplets, print_sextuplets_checked, print_sextuplets_with_config, Tuplet::Sextuplet);
print_api!(print_septuplets, print_septuplets_checked, print_septuplets_with_config, Tuplet::Septuplet);

/// CALLBACK_PRIMES: a user panic inside `f` is caught and turned into
/// [`PrimesieveError::UserCallbackTrap`] rather than unwinding across the FFI-adjacent boundary
/// this surface is meant to support (section 7).
pub fn callback_primes_checked<F: FnMut(u64)>(start: u64, stop: u64, mut f: F) -> Result<()> {
    validate_range(start, stop)?;
    if start > stop {
        return Ok(());
    }
    let config = SieveConfig::default();
    let presieve = PreSieve::new(config.presieve_limit);
    let pf = PrimeFinder::new(start, stop, config.segment_bytes, &presieve);
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| pf.callback_primes(&mut f)))
        .map_err(|_| PrimesieveError::UserCallbackTrap)
}

pub fn callback_primes<F: FnMut(u64)>(start: u64, stop: u64, f: F) {
    let _ = callback_primes_checked(start, stop, f);
}

pub fn callback_primes_with_config<F: FnMut(u64)>(start: u64, stop: u64, config: &SieveConfig, mut f: F) -> Result<()> {
    validate_range(start, stop)?;
    if start > stop {
        return Ok(());
    }
    let presieve = PreSieve::new(config.presieve_limit);
    let pf = PrimeFinder::new(start, stop, config.segment_bytes, &presieve);
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| pf.callback_primes(&mut f)))
        .map_err(|_| PrimesieveError::UserCallbackTrap)
}

/// `parallel_callback_primes`: `f` receives `(prime, thread_id)` and must be `Sync`, since chunks
/// run concurrently (section 5/9) — the primes within one chunk still arrive ascending, but the
/// overall stream interleaves across chunks.
pub fn parallel_callback_primes_checked<F: Fn(u64, usize) + Sync>(start: u64, stop: u64, threads: usize, f: F) -> Result<()> {
    validate_range(start, stop)?;
    if start > stop {
        return Ok(());
    }
    let config = SieveConfig::default().with_threads(threads);
    dispatcher::parallel_callback(start, stop, &f, &config);
    Ok(())
}

pub fn parallel_callback_primes<F: Fn(u64, usize) + Sync>(start: u64, stop: u64, threads: usize, f: F) {
    let _ = parallel_callback_primes_checked(start, stop, threads, f);
}

/// `nth_prime`: `n > 0` searches forward from `start`; `n < 0` searches backward. `n == 0` is
/// rejected (Open Question, resolved in DESIGN.md).
pub fn nth_prime_checked(n: i64, start: u64) -> Result<u64> {
    nth_prime_with_config_checked(n, start, &SieveConfig::default())
}

pub fn nth_prime_with_config_checked(n: i64, start: u64, config: &SieveConfig) -> Result<u64> {
    nth_prime::nth_prime(n, start, config).ok_or(PrimesieveError::InvalidRange { start, stop: start })
}

pub fn nth_prime(n: i64, start: u64) -> u64 {
    nth_prime_checked(n, start).unwrap_or(SENTINEL)
}

pub fn nth_prime_with_config(n: i64, start: u64, config: &SieveConfig) -> u64 {
    nth_prime_with_config_checked(n, start, config).unwrap_or(SENTINEL)
}

/// `parallel_nth_prime`: the locator's search is inherently sequential (each window's count
/// gates the next), so this resolves `threads` only for logging/consistency with the rest of the
/// parallel surface — the result is always identical to the serial search (see DESIGN.md).
pub fn parallel_nth_prime(n: i64, start: u64, threads: usize) -> u64 {
    nth_prime_with_config(n, start, &SieveConfig::default().with_threads(threads))
}
