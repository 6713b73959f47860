//! Tunable constants (section 6 of the spec) and the [`SieveConfig`] builder that resolves
//! their defaults, autodetecting cache sizes the way `cache-size`-consuming sieves in this space
//! typically do (see the `prime_shield_analyzer` crate's `--segment-size-kb` flag).

use cache_size::l1_cache_size;

/// `PRIMESIEVE_SIEVESIZE`: default segment size in KiB, used when L1 autodetection fails.
pub const DEFAULT_SIEVESIZE_KB: u64 = 32;
/// Lower bound on segment size, in KiB.
pub const MIN_SIEVESIZE_KB: u64 = 1;
/// Upper bound on segment size, in KiB.
pub const MAX_SIEVESIZE_KB: u64 = 8192;

/// `PRIMESIEVE_PRESIEVE_LIMIT` default and bounds.
pub const DEFAULT_PRESIEVE_LIMIT: u64 = 19;
pub const MIN_PRESIEVE_LIMIT: u64 = 11;
pub const MAX_PRESIEVE_LIMIT: u64 = 23;

/// `MIN_THREAD_INTERVAL`: below this, `ParallelDispatcher` runs serially.
pub const MIN_THREAD_INTERVAL: u64 = 100_000_000;

/// Sieving-prime size thresholds, expressed as a multiple of `segment_bytes`.
pub const ERATSMALL_FACTOR: f64 = 1.5;
pub const ERATMEDIUM_FACTOR: u64 = 9;

/// Bucket capacities (number of `WheelPrime` records per bucket).
pub const ERATBASE_BUCKETSIZE: usize = 4096;
pub const ERATBIG_BUCKETSIZE: usize = 1024;
/// Size of a single slab the bucket arena carves buckets out of.
pub const ERATBIG_MEMORY_PER_ALLOC: usize = 4 * 1024 * 1024;

/// Resolved, validated tunables for a single sieving run.
///
/// Every public `count_*`/`print_*`/`callback_*`/`nth_prime` function uses
/// [`SieveConfig::default`] internally; a `*_with_config` sibling exists for callers (and tests
/// exercising segment-size/presieve-limit invariance) that need to override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SieveConfig {
    /// Bytes per sieve segment, each byte covering 30 consecutive integers. Always a multiple
    /// of 8 so the presieve buffer (byte-granular) tiles cleanly against it.
    pub segment_bytes: u64,
    /// Presieve the multiples of all primes in `[7, presieve_limit]`.
    pub presieve_limit: u64,
    /// 0 means "use all available cores" (resolved via `rayon::current_num_threads`).
    pub threads: usize,
}

impl Default for SieveConfig {
    fn default() -> Self {
        let detected_kb = l1_cache_size()
            .map(|bytes| (bytes as u64 / 1024).max(1))
            .unwrap_or(DEFAULT_SIEVESIZE_KB);
        let kb = detected_kb.clamp(MIN_SIEVESIZE_KB, MAX_SIEVESIZE_KB);
        SieveConfig {
            segment_bytes: kb * 1024,
            presieve_limit: DEFAULT_PRESIEVE_LIMIT,
            threads: 0,
        }
    }
}

impl SieveConfig {
    /// Builds a config from an explicit segment size in KiB, clamped to the supported range.
    pub fn with_segment_size_kb(mut self, kb: u64) -> Self {
        self.segment_bytes = kb.clamp(MIN_SIEVESIZE_KB, MAX_SIEVESIZE_KB) * 1024;
        self
    }

    /// Builds a config from an explicit presieve limit, clamped to `[11, 23]`.
    pub fn with_presieve_limit(mut self, limit: u64) -> Self {
        self.presieve_limit = limit.clamp(MIN_PRESIEVE_LIMIT, MAX_PRESIEVE_LIMIT);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Asserts the tunables are within the bounds documented in section 6. Violating a tunable
    /// precondition is a programming error (asserted at init), not a runtime error.
    pub(crate) fn assert_valid(&self) {
        debug_assert!(self.segment_bytes % 8 == 0, "segment_bytes must be a multiple of 8");
        debug_assert!(
            self.segment_bytes / 1024 >= MIN_SIEVESIZE_KB
                && self.segment_bytes / 1024 <= MAX_SIEVESIZE_KB,
            "segment_bytes out of range"
        );
        debug_assert!(
            self.presieve_limit >= MIN_PRESIEVE_LIMIT && self.presieve_limit <= MAX_PRESIEVE_LIMIT,
            "presieve_limit out of range"
        );
    }

    pub(crate) fn resolved_threads(&self) -> usize {
        if self.threads == 0 {
            rayon::current_num_threads()
        } else {
            self.threads
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SieveConfig::default();
        cfg.assert_valid();
        assert!(cfg.segment_bytes % 8 == 0);
    }

    #[test]
    fn builders_clamp_out_of_range_values() {
        let cfg = SieveConfig::default()
            .with_segment_size_kb(1_000_000)
            .with_presieve_limit(1000);
        cfg.assert_valid();
        assert_eq!(cfg.segment_bytes / 1024, MAX_SIEVESIZE_KB);
        assert_eq!(cfg.presieve_limit, MAX_PRESIEVE_LIMIT);
    }
}
