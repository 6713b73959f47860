//! ParallelDispatcher (C8): splits `[start, stop]` into wheel-aligned, thread-sized chunks and
//! runs one `PrimeFinder` per chunk. Uses `rayon` for the worker pool (the closest idiomatic
//! equivalent, in this crate's stack, to "OS threads or equivalent work-stealing pool" from
//! section 5). Each chunk gets its own sieve and buckets; nothing mutable crosses threads.

use rayon::prelude::*;

use crate::config::{SieveConfig, MIN_THREAD_INTERVAL};
use crate::ktuplet::Tuplet;
use crate::presieve::PreSieve;
use crate::prime_finder::PrimeFinder;

/// Splits `[start, stop]` into sub-intervals of length `>= MIN_THREAD_INTERVAL`, each boundary
/// aligned to a multiple of 30 so every chunk begins a fresh wheel-30 segment, with the
/// remainder folded into the final chunk. Falls back to a single chunk (serial) when the whole
/// range is below `MIN_THREAD_INTERVAL`, when `threads <= 1`, or when the range is empty.
pub fn split_range(start: u64, stop: u64, threads: usize) -> Vec<(u64, u64)> {
    if start > stop || threads <= 1 {
        return vec![(start, stop)];
    }
    let interval = stop - start + 1;
    if interval < MIN_THREAD_INTERVAL {
        return vec![(start, stop)];
    }

    let max_chunks = interval.div_ceil(MIN_THREAD_INTERVAL);
    let n_threads = (threads as u64).min(max_chunks).max(1) as usize;
    let raw_chunk = interval / n_threads as u64;

    let mut chunks = Vec::with_capacity(n_threads);
    let mut lo = start;
    for i in 0..n_threads {
        if i + 1 == n_threads {
            chunks.push((lo, stop));
            break;
        }
        let mut boundary = lo + raw_chunk;
        boundary -= boundary % 30;
        if boundary <= lo {
            boundary = lo + 30;
        }
        chunks.push((lo, boundary - 1));
        lo = boundary;
    }
    chunks
}

fn in_pool<R: Send>(n_threads: usize, f: impl FnOnce() -> R + Send) -> R {
    match rayon::ThreadPoolBuilder::new().num_threads(n_threads.max(1)).build() {
        Ok(pool) => pool.install(f),
        Err(_) => f(),
    }
}

/// Reduces per-chunk `count_ktuplets` results by summation (COUNT modes need no other
/// coordination since order is irrelevant, section 4.10).
pub fn parallel_count(start: u64, stop: u64, tuplet: Tuplet, config: &SieveConfig) -> u64 {
    if start > stop {
        return 0;
    }
    let threads = config.resolved_threads();
    let chunks = split_range(start, stop, threads);
    let presieve = PreSieve::new(config.presieve_limit);
    tracing::debug!(chunks = chunks.len(), threads, "dispatching parallel count");

    if chunks.len() <= 1 {
        let (lo, hi) = chunks[0];
        return PrimeFinder::new(lo, hi, config.segment_bytes, &presieve).count_ktuplets(tuplet);
    }

    in_pool(chunks.len(), || {
        chunks
            .into_par_iter()
            .map(|(lo, hi)| PrimeFinder::new(lo, hi, config.segment_bytes, &presieve).count_ktuplets(tuplet))
            .sum()
    })
}

/// CALLBACK_PRIMES in parallel mode: every chunk's primes are delivered ascending *within* that
/// chunk, but chunks themselves run concurrently, so the overall stream is unordered across
/// threads (section 4.10/9) — this is a documented relaxation of `callback_primes`'s ordering
/// guarantee, not a bug. `f` must be `Sync`: the caller's obligation per section 5.
pub fn parallel_callback<F: Fn(u64, usize) + Sync>(start: u64, stop: u64, f: &F, config: &SieveConfig) {
    if start > stop {
        return;
    }
    let threads = config.resolved_threads();
    let chunks = split_range(start, stop, threads);
    let presieve = PreSieve::new(config.presieve_limit);

    if chunks.len() <= 1 {
        let (lo, hi) = chunks[0];
        PrimeFinder::new(lo, hi, config.segment_bytes, &presieve).callback_primes(|p| f(p, 0));
        return;
    }

    in_pool(chunks.len(), || {
        chunks.into_par_iter().enumerate().for_each(|(thread_id, (lo, hi))| {
            PrimeFinder::new(lo, hi, config.segment_bytes, &presieve).callback_primes(|p| f(p, thread_id));
        });
    });
}
