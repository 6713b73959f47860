//! EratMedium (C4b): same record layout as EratSmall, but these primes fire only a handful of
//! times per segment, so the inner loop is a plain table-driven step rather than unrolled.

use crate::bucket::{BucketArena, BucketList, WheelPrime};
use crate::config::ERATBASE_BUCKETSIZE;
use crate::segment;
use crate::wheel::Wheel30;

pub struct EratMedium {
    arena: BucketArena,
    list: BucketList,
}

impl EratMedium {
    pub fn new() -> Self {
        EratMedium { arena: BucketArena::new(ERATBASE_BUCKETSIZE), list: BucketList::new() }
    }

    pub fn add(&mut self, prime: u64, multiple_index: u64, wheel: Wheel30) {
        self.list.add(WheelPrime { prime, multiple_index, wheel }, &mut self.arena);
    }

    pub fn crossoff(&mut self, segment: &mut [u8], segment_span: u64) {
        for wp in self.list.iter_mut() {
            let mut idx = wp.multiple_index;
            while idx < segment_span {
                segment::set_off(segment, idx);
                idx += wp.wheel.next_diff();
            }
            wp.multiple_index = idx - segment_span;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crosses_off_a_handful_of_multiples_per_segment() {
        let mut medium = EratMedium::new();
        let span = 3000u64;
        medium.add(101, 0, Wheel30::new(101, 101));
        let mut segment = vec![0xFFu8; (span / 30) as usize];
        medium.crossoff(&mut segment, span);
        for n in (101..span).step_by(1) {
            if n % 101 == 0 {
                assert!(!segment::get(&segment, n));
            }
        }
    }
}
