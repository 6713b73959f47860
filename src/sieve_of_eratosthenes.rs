//! SieveOfEratosthenes (C5): the per-segment driver. Owns the sieve byte buffer and one each of
//! the three cross-off engines (C4), applies the presieve template (C2) at the start of each
//! segment, and hands the finished segment to a caller-supplied consumer.
//!
//! This implementation resolves the "self-bootstrap" design note (section 9) by sieving all of
//! a range's sieving primes up front (via `PrimeGenerator`, C6) rather than interleaving
//! generation with the outer sieve; see DESIGN.md for the trade-off.

use crate::config::{ERATMEDIUM_FACTOR, ERATSMALL_FACTOR};
use crate::erat_big::EratBig;
use crate::erat_medium::EratMedium;
use crate::erat_small::EratSmall;
use crate::presieve::PreSieve;
use crate::segment;
use crate::wheel::first_multiple;

pub struct SieveOfEratosthenes<'a> {
    start: u64,
    stop: u64,
    segment_bytes: u64,
    /// Integers spanned by one segment (`segment_bytes * 30`).
    segment_span: u64,
    /// The low bound of the very first segment (`floor(start / 30) * 30`); sieving primes are
    /// added with their cross-off offset measured from here.
    first_seg_lo: u64,
    presieve: &'a PreSieve,
    small: EratSmall,
    medium: EratMedium,
    big: EratBig,
}

impl<'a> SieveOfEratosthenes<'a> {
    pub fn new(start: u64, stop: u64, segment_bytes: u64, presieve: &'a PreSieve) -> Self {
        let first_seg_lo = (start / 30) * 30;
        let segment_span = segment_bytes * 30;
        // No cross-off is ever scheduled past `stop` (the run never sieves beyond its last
        // segment), so that bounds how many segments ahead of `first_seg_lo` a sieving
        // prime's first hit can land — and therefore how many ring slots `EratBig` needs.
        let segments_ahead = stop.saturating_sub(first_seg_lo) / segment_span.max(1) + 1;
        SieveOfEratosthenes {
            start,
            stop,
            segment_bytes,
            segment_span,
            first_seg_lo,
            presieve,
            small: EratSmall::new(),
            medium: EratMedium::new(),
            big: EratBig::new(segment_bytes, segments_ahead),
        }
    }

    /// Classifies a sieving prime `p` (section 3) and schedules its first cross-off, which must
    /// land at or after `p*p` and at or after the first segment's low bound.
    pub fn add_sieving_prime(&mut self, p: u64) {
        debug_assert!(p >= 7, "2, 3 and 5 are not representable in the wheel-30 layout");
        let from = (p.saturating_mul(p)).max(self.first_seg_lo.max(7));
        let (multiple, wheel) = first_multiple(p, from);
        let index = multiple - self.first_seg_lo;

        let small_bound = (self.segment_bytes as f64 * ERATSMALL_FACTOR) as u64;
        let medium_bound = self.segment_bytes * ERATMEDIUM_FACTOR;
        if p <= small_bound {
            self.small.add(p, index, wheel);
        } else if p <= medium_bound {
            self.medium.add(p, index, wheel);
        } else {
            self.big.add(p, index, wheel);
        }
    }

    /// Runs every segment in `[start, stop]`, calling `consumer(segment, seg_lo)` once per
    /// segment with the finished "possibly prime" bitmap. `seg_lo` is always a multiple of 30.
    pub fn run<F: FnMut(&[u8], u64)>(&mut self, mut consumer: F) {
        if self.start > self.stop {
            return;
        }
        let mut buffer = vec![0u8; self.segment_bytes as usize];
        let mut seg_lo = self.first_seg_lo;
        loop {
            let seg_hi_excl = seg_lo + self.segment_span;
            self.presieve.apply(&mut buffer, seg_lo);

            let clear_below = self.start.max(7);
            if seg_lo < clear_below {
                let upto = clear_below.min(seg_hi_excl);
                for n in seg_lo..upto {
                    segment::set_off(&mut buffer, n - seg_lo);
                }
            }

            self.small.crossoff(&mut buffer, self.segment_span);
            self.medium.crossoff(&mut buffer, self.segment_span);
            self.big.crossoff(&mut buffer);

            let is_last = seg_hi_excl > self.stop;
            if is_last {
                for n in (self.stop + 1)..seg_hi_excl {
                    segment::set_off(&mut buffer, n - seg_lo);
                }
            }

            tracing::trace!(seg_lo, seg_hi_excl, "segment sieved");
            consumer(&buffer, seg_lo);

            if is_last {
                break;
            }
            seg_lo = seg_hi_excl;
        }
    }
}

/// The three small primes (2, 3, 5) the wheel-30 layout cannot represent; callers special-case
/// them per section 4.7's "first segment" edge policy.
pub const SMALL_PRIMES: [u64; 3] = [2, 3, 5];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::for_each_prime_in_segment;

    fn primes_via_sieve(start: u64, stop: u64, segment_bytes: u64, sieving_primes: &[u64]) -> Vec<u64> {
        let presieve = PreSieve::new(19);
        let mut sieve = SieveOfEratosthenes::new(start, stop, segment_bytes, &presieve);
        for &p in sieving_primes {
            sieve.add_sieving_prime(p);
        }
        let mut out = Vec::new();
        sieve.run(|seg, seg_lo| for_each_prime_in_segment(seg, seg_lo, |p| out.push(p)));
        out.retain(|&p| p >= start && p <= stop);
        out
    }

    #[test]
    fn finds_primes_in_a_small_range_matching_trial_division() {
        let found = primes_via_sieve(0, 200, 32, &[7, 11, 13]);
        let trial: Vec<u64> = (7..=200u64).filter(|&n| (2..n).all(|d| n % d != 0)).collect();
        assert_eq!(found, trial);
    }

    #[test]
    fn respects_start_boundary_inside_first_segment() {
        let found = primes_via_sieve(50, 100, 32, &[7]);
        assert_eq!(found, vec![53, 59, 61, 67, 71, 73, 79, 83, 89, 97]);
    }

    #[test]
    fn handles_multi_segment_ranges() {
        // sieving primes must be >= 7: 2, 3 and 5 are not representable in the wheel-30 layout.
        let found = primes_via_sieve(0, 10_000, 8, &(7u64..=100).filter(|&n| (2..n).all(|d| n % d != 0)).collect::<Vec<_>>());
        let trial: Vec<u64> = (7..=10_000u64).filter(|&n| (2..n).all(|d| n % d != 0)).collect();
        assert_eq!(found, trial);
    }
}
