//! PrimeFinder (C7): a `SieveOfEratosthenes` run whose consumer counts, prints or calls back
//! with primes or prime k-tuplets, per the closed set of modes in `FinderMode` (the "tagged
//! variant per mode" polymorphic-consumer design in section 9, rather than virtual dispatch per
//! emitted prime).
//!
//! Tuplet counting sieves 20 integers past `stop` (the widest possible tuplet span) so that a
//! tuplet whose smallest member is `<= stop` is never missed just because one of its other
//! members happens to fall past the requested range — `count_twins(a, b)` is defined purely in
//! terms of `p` and `p+2` both being prime, not in terms of `p+2 <= b`.

use crate::bits::for_each_prime_in_segment;
use crate::isqrt::isqrt;
use crate::ktuplet::{small_member_tuplet, Tuplet, TupletScanner};
use crate::presieve::PreSieve;
use crate::prime_generator;
use crate::sieve_of_eratosthenes::{SieveOfEratosthenes, SMALL_PRIMES};

/// Widest possible gap between a tuplet's smallest and largest member (the septuplet's 20).
const MAX_TUPLET_SPAN: u64 = 20;

pub struct PrimeFinder<'a> {
    start: u64,
    stop: u64,
    segment_bytes: u64,
    presieve: &'a PreSieve,
    sieving_primes: Vec<u64>,
}

impl<'a> PrimeFinder<'a> {
    pub fn new(start: u64, stop: u64, segment_bytes: u64, presieve: &'a PreSieve) -> Self {
        let sieving_primes = if start > stop {
            Vec::new()
        } else {
            let sqrt_bound = isqrt(stop.saturating_add(MAX_TUPLET_SPAN));
            prime_generator::primes_up_to(sqrt_bound, segment_bytes, presieve)
        };
        PrimeFinder { start, stop, segment_bytes, presieve, sieving_primes }
    }

    fn build_sieve(&self, extra: u64) -> SieveOfEratosthenes<'a> {
        let sieve_stop = self.stop.saturating_add(extra);
        let mut sieve = SieveOfEratosthenes::new(self.start, sieve_stop, self.segment_bytes, self.presieve);
        for &p in &self.sieving_primes {
            // 2, 3 and 5 cannot be wheel-30 sieving primes (see prime_generator::primes_up_to).
            if p >= 7 && p.saturating_mul(p) <= sieve_stop {
                sieve.add_sieving_prime(p);
            }
        }
        sieve
    }

    fn small_primes_in_range(&self) -> impl Iterator<Item = u64> + '_ {
        SMALL_PRIMES.into_iter().filter(move |&p| p >= self.start && p <= self.stop)
    }

    /// C7 COUNT_PRIMES.
    pub fn count_primes(&self) -> u64 {
        if self.start > self.stop {
            return 0;
        }
        let mut count = self.small_primes_in_range().count() as u64;
        let mut sieve = self.build_sieve(0);
        sieve.run(|segment, _seg_lo| {
            count += segment.iter().map(|b| b.count_ones() as u64).sum::<u64>();
        });
        count
    }

    /// C7 COUNT_KTUPLETS(k).
    pub fn count_ktuplets(&self, tuplet: Tuplet) -> u64 {
        if matches!(tuplet, Tuplet::None) {
            return self.count_primes();
        }
        if self.start > self.stop {
            return 0;
        }
        let mut count = 0u64;
        for p in self.small_primes_in_range() {
            if small_member_tuplet(tuplet, p).is_some() {
                count += 1;
            }
        }
        let (start, stop) = (self.start, self.stop);
        let mut sieve = self.build_sieve(MAX_TUPLET_SPAN);
        let mut scanner = TupletScanner::new();
        sieve.run(|segment, seg_lo| {
            scanner.feed(tuplet, segment, seg_lo, |smallest, _members| {
                if smallest >= start && smallest <= stop {
                    count += 1;
                }
            });
        });
        scanner.finish(tuplet, |smallest, _members| {
            if smallest >= start && smallest <= stop {
                count += 1;
            }
        });
        count
    }

    /// C7 PRINT_PRIMES / PRINT_KTUPLETS: one decimal number (or parenthesized tuplet) per line,
    /// written to `out`. Always serial, matching section 4.10.
    pub fn print<W: std::io::Write>(&self, tuplet: Tuplet, out: &mut W) -> std::io::Result<()> {
        if self.start > self.stop {
            return Ok(());
        }
        if matches!(tuplet, Tuplet::None) {
            for p in self.small_primes_in_range() {
                writeln!(out, "{p}")?;
            }
            let mut sieve = self.build_sieve(0);
            let mut result = Ok(());
            sieve.run(|segment, seg_lo| {
                if result.is_err() {
                    return;
                }
                for_each_prime_in_segment(segment, seg_lo, |p| {
                    if result.is_ok() {
                        result = writeln!(out, "{p}");
                    }
                });
            });
            return result;
        }

        for p in self.small_primes_in_range() {
            if let Some(members) = small_member_tuplet(tuplet, p) {
                writeln!(out, "{}", format_tuplet(&members))?;
            }
        }
        let (start, stop) = (self.start, self.stop);
        let mut sieve = self.build_sieve(MAX_TUPLET_SPAN);
        let mut scanner = TupletScanner::new();
        let mut result = Ok(());
        sieve.run(|segment, seg_lo| {
            if result.is_err() {
                return;
            }
            scanner.feed(tuplet, segment, seg_lo, |smallest, members| {
                if result.is_ok() && smallest >= start && smallest <= stop {
                    result = writeln!(out, "{}", format_tuplet(members));
                }
            });
        });
        if result.is_ok() {
            scanner.finish(tuplet, |smallest, members| {
                if result.is_ok() && smallest >= start && smallest <= stop {
                    result = writeln!(out, "{}", format_tuplet(members));
                }
            });
        }
        result
    }

    /// C7 CALLBACK_PRIMES: synchronous, single-threaded, strictly ascending (section 4.10/9).
    pub fn callback_primes<F: FnMut(u64)>(&self, mut f: F) {
        if self.start > self.stop {
            return;
        }
        for p in self.small_primes_in_range() {
            f(p);
        }
        let mut sieve = self.build_sieve(0);
        sieve.run(|segment, seg_lo| {
            for_each_prime_in_segment(segment, seg_lo, &mut f);
        });
    }
}

fn format_tuplet(members: &[u64]) -> String {
    if members.len() == 1 {
        return members[0].to_string();
    }
    let joined = members.iter().map(u64::to_string).collect::<Vec<_>>().join(", ");
    format!("({joined})")
}
