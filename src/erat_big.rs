//! EratBig (C4c): sieving primes so large they cross off less than once per segment. Storing
//! them in a flat list (as `EratSmall`/`EratMedium` do) would waste a full scan every segment
//! for primes that do not hit it. Instead a ring of bucket lists indexes each prime by the
//! segment in which it will next fire: `crossoff` only ever walks the list at the current slot.

use crate::bucket::{BucketArena, BucketList, WheelPrime};
use crate::config::ERATBIG_BUCKETSIZE;
use crate::segment;
use crate::wheel::Wheel30;

pub struct EratBig {
    arena: BucketArena,
    ring: Vec<BucketList>,
    /// Number of ring slots, one per segment a prime could still be waiting to hit.
    ring_size: u64,
    current_slot: u64,
    /// Number of integers spanned by one segment (`segment_bytes * 30`), the modulus used to
    /// translate a global multiple-index into `(slot, local index)`.
    segment_span: u64,
}

impl EratBig {
    /// `segment_bytes` is the per-segment byte count. `max_segments_ahead` bounds how many
    /// segments past the one currently being processed a prime's first cross-off can land
    /// (section 3's `segment_span + 1`, generalized to this crate's up-front bootstrap: see
    /// DESIGN.md for why the ring here is sized off the run's segment count rather than off
    /// `max_sieving_prime` alone).
    pub fn new(segment_bytes: u64, max_segments_ahead: u64) -> Self {
        let segment_span = segment_bytes * 30;
        let ring_size = (max_segments_ahead + 2).max(2);
        EratBig {
            arena: BucketArena::new(ERATBIG_BUCKETSIZE),
            ring: (0..ring_size).map(|_| BucketList::new()).collect(),
            ring_size,
            current_slot: 0,
            segment_span,
        }
    }

    /// `multiple_index` is the offset (in integers) of the prime's first cross-off, measured
    /// from the start of the segment currently being processed (may be many segments ahead).
    pub fn add(&mut self, prime: u64, multiple_index: u64, wheel: Wheel30) {
        self.insert(multiple_index, WheelPrime { prime, multiple_index: 0, wheel });
    }

    fn insert(&mut self, index_from_current: u64, mut wp: WheelPrime) {
        let slot_delta = index_from_current / self.segment_span;
        let local_index = index_from_current % self.segment_span;
        let slot = (self.current_slot + slot_delta) % self.ring_size;
        wp.multiple_index = local_index;
        self.ring[slot as usize].add(wp, &mut self.arena);
    }

    /// Crosses off every prime parked in the current ring slot, re-inserting each into the
    /// slot for its next hit, then advances to the next slot.
    pub fn crossoff(&mut self, segment: &mut [u8]) {
        let slot = (self.current_slot % self.ring_size) as usize;
        let list = std::mem::take(&mut self.ring[slot]);
        for mut wp in list.drain(&mut self.arena) {
            segment::set_off(segment, wp.multiple_index);
            let next = wp.multiple_index + wp.wheel.next_diff();
            self.insert(next, wp);
        }
        self.current_slot = (self.current_slot + 1) % self.ring_size;
    }

    pub fn is_empty(&self) -> bool {
        self.ring.iter().all(|l| l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::first_multiple;

    #[test]
    fn crosses_off_its_prime_in_the_segment_it_lands_in() {
        // segment_bytes small enough that a prime of 10007 lands several segments out.
        let segment_bytes = 32u64;
        let span = segment_bytes * 30;
        let prime = 10007u64;
        let (first_mult, wheel) = first_multiple(prime, prime * prime);
        let segments_ahead = first_mult / span + 1;
        let mut big = EratBig::new(segment_bytes, segments_ahead);

        big.add(prime, first_mult, wheel);

        let mut crossed_off_at = None;
        for seg in 0..(segments_ahead + 2) {
            let mut segment = vec![0xFFu8; segment_bytes as usize];
            big.crossoff(&mut segment);
            if segment.iter().any(|&b| b != 0xFF) {
                crossed_off_at = Some(seg);
                break;
            }
        }
        assert!(crossed_off_at.is_some(), "prime was never crossed off");
    }

    #[test]
    fn empty_ring_reports_is_empty() {
        let big = EratBig::new(64, 10);
        assert!(big.is_empty());
    }
}
