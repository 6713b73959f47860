//! Prime k-tuplet patterns (supplement to C7): the admissible offset patterns for twins through
//! septuplets (GLOSSARY), turned into per-residue lookup so a tuplet starting at a given wheel-30
//! bit can be confirmed or refuted by testing a handful of companion bits instead of doing trial
//! division on every candidate.
//!
//! A tuplet's members can straddle the 30-integer boundary between two adjacent sieve bytes (the
//! widest offset here is 20), so detection reads the *current* byte together with the *next*
//! byte, exactly the "current byte + next byte" window described in section 4.9.

use std::sync::OnceLock;

use crate::segment::BIT_VALUES;

/// Which k-tuplet (or plain primes) a `PrimeFinder` consumer is reconstructing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tuplet {
    None,
    Twin,
    Triplet,
    Quadruplet,
    Quintuplet,
    Sextuplet,
    Septuplet,
}

impl Tuplet {
    pub fn k(self) -> usize {
        match self {
            Tuplet::None => 1,
            Tuplet::Twin => 2,
            Tuplet::Triplet => 3,
            Tuplet::Quadruplet => 4,
            Tuplet::Quintuplet => 5,
            Tuplet::Sextuplet => 6,
            Tuplet::Septuplet => 7,
        }
    }

    /// The admissible offset patterns for this tuplet, smallest member first (offset 0).
    pub(crate) fn variants(self) -> &'static [&'static [u64]] {
        match self {
            Tuplet::None => &[],
            Tuplet::Twin => &[&[0, 2]],
            Tuplet::Triplet => &[&[0, 2, 6], &[0, 4, 6]],
            Tuplet::Quadruplet => &[&[0, 2, 6, 8]],
            Tuplet::Quintuplet => &[&[0, 2, 6, 8, 12], &[0, 4, 6, 10, 12]],
            Tuplet::Sextuplet => &[&[0, 4, 6, 10, 12, 16]],
            Tuplet::Septuplet => &[&[0, 2, 6, 8, 12, 18, 20], &[0, 2, 8, 12, 14, 18, 20]],
        }
    }

    fn table_index(self) -> usize {
        match self {
            Tuplet::None => 0,
            Tuplet::Twin => 1,
            Tuplet::Triplet => 2,
            Tuplet::Quadruplet => 3,
            Tuplet::Quintuplet => 4,
            Tuplet::Sextuplet => 5,
            Tuplet::Septuplet => 6,
        }
    }

    /// The single admissible variant for a tuplet to start at wheel-30 bit `base_bit`, if any
    /// (most residues admit at most one of the listed alternatives; some admit none).
    fn variant_at(self, base_bit: usize) -> Option<&'static [u64]> {
        tables()[self.table_index()][base_bit]
    }
}

#[inline]
fn bit_for_residue(r: u64) -> Option<usize> {
    BIT_VALUES.iter().position(|&v| v == r)
}

type CompanionRow = [Option<&'static [u64]>; 8];

fn build_table(variants: &'static [&'static [u64]]) -> CompanionRow {
    std::array::from_fn(|b0| {
        let r0 = BIT_VALUES[b0];
        variants
            .iter()
            .copied()
            .find(|variant| variant[1..].iter().all(|&off| bit_for_residue((r0 + off) % 30).is_some()))
    })
}

fn tables() -> &'static [CompanionRow; 7] {
    static TABLES: OnceLock<[CompanionRow; 7]> = OnceLock::new();
    TABLES.get_or_init(|| {
        [
            build_table(Tuplet::None.variants()),
            build_table(Tuplet::Twin.variants()),
            build_table(Tuplet::Triplet.variants()),
            build_table(Tuplet::Quadruplet.variants()),
            build_table(Tuplet::Quintuplet.variants()),
            build_table(Tuplet::Sextuplet.variants()),
            build_table(Tuplet::Septuplet.variants()),
        ]
    })
}

/// Tests whether a tuplet starts at `base_bit` of `byte`, given `hi` as the byte immediately
/// following it in the sieve (the companion bits for offsets that spill past 30). Returns the
/// matched offset pattern (smallest member first) so the caller can reconstruct every member.
fn matches_at(tuplet: Tuplet, base_bit: usize, byte: u8, hi: u8) -> Option<&'static [u64]> {
    let variant = tuplet.variant_at(base_bit)?;
    let r0 = BIT_VALUES[base_bit];
    for &off in &variant[1..] {
        let abs = r0 + off;
        let bit = bit_for_residue(abs % 30)?;
        let src = if abs < 30 { byte } else { hi };
        if src & (1 << bit) == 0 {
            return None;
        }
    }
    Some(variant)
}

/// Streams tuplet starts across segment boundaries: each sieve byte's last bit may need the
/// first bit of the *next* segment's buffer to confirm, so the final byte of a segment is held
/// back (`carry`) until the following segment (or end of range) supplies its successor.
#[derive(Default)]
pub struct TupletScanner {
    carry: Option<(u64, u8)>,
}

impl TupletScanner {
    pub fn new() -> Self {
        TupletScanner { carry: None }
    }

    /// Visits every confirmed tuplet start in `segment` (whose first byte covers `seg_lo..seg_lo+29`)
    /// that can be confirmed with the bytes seen so far, calling `f(smallest_member, members)`.
    pub fn feed<F: FnMut(u64, &[u64])>(&mut self, tuplet: Tuplet, segment: &[u8], seg_lo: u64, mut f: F) {
        if let Some((base, byte)) = self.carry.take() {
            let hi = segment.first().copied().unwrap_or(0);
            Self::scan_byte(tuplet, base, byte, hi, &mut f);
        }
        if segment.is_empty() {
            return;
        }
        for i in 0..segment.len() - 1 {
            let base = seg_lo + (i as u64) * 30;
            Self::scan_byte(tuplet, base, segment[i], segment[i + 1], &mut f);
        }
        let last = segment.len() - 1;
        self.carry = Some((seg_lo + (last as u64) * 30, segment[last]));
    }

    /// Flushes the final held-back byte, treating "no further segment" as all-zero (matching
    /// the driver already having cleared every bit beyond `stop`).
    pub fn finish<F: FnMut(u64, &[u64])>(&mut self, tuplet: Tuplet, mut f: F) {
        if let Some((base, byte)) = self.carry.take() {
            Self::scan_byte(tuplet, base, byte, 0, &mut f);
        }
    }

    fn scan_byte<F: FnMut(u64, &[u64])>(tuplet: Tuplet, base: u64, byte: u8, hi: u8, f: &mut F) {
        if byte == 0 {
            return;
        }
        let mut b = byte;
        while b != 0 {
            let bit = b.trailing_zeros() as usize;
            if let Some(variant) = matches_at(tuplet, bit, byte, hi) {
                let smallest = base + BIT_VALUES[bit];
                let members: Vec<u64> = variant.iter().map(|&off| smallest + off).collect();
                f(smallest, &members);
            }
            b &= b - 1;
        }
    }
}

/// Brute-force tuplet check for the wheel-30 layout's blind spot: the primes 2, 3 and 5
/// themselves cannot appear as a `base_bit` in any sieve byte, so a tuplet whose smallest
/// member is one of them (e.g. the twin pairs (3,5) and (5,7)) would otherwise be missed
/// entirely. Every member here stays `<= 31`, so plain trial division is cheap and exact.
pub fn small_member_tuplet(tuplet: Tuplet, p: u64) -> Option<Vec<u64>> {
    if p != 2 && p != 3 && p != 5 {
        return None;
    }
    fn is_prime_trivial(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        if n % 2 == 0 {
            return n == 2;
        }
        let mut d = 3;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 2;
        }
        true
    }
    tuplet
        .variants()
        .iter()
        .find(|variant| variant.iter().all(|&off| is_prime_trivial(p + off)))
        .map(|variant| variant.iter().map(|&off| p + off).collect())
}

/// Counts tuplets over a whole range by driving a `TupletScanner` to completion; used by the
/// unit tests below and by `PrimeFinder`'s `CountKTuplet` mode via the same scanner type.
#[cfg(test)]
fn count_tuplets_naive(tuplet: Tuplet, values: &[u64]) -> u64 {
    use std::collections::HashSet;
    let set: HashSet<u64> = values.iter().copied().collect();
    let mut count = 0;
    for &p in values {
        for variant in tuplet.variants() {
            if variant.iter().all(|&off| set.contains(&(p + off))) {
                count += 1;
                break;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment;

    fn primes_up_to(n: u64) -> Vec<u64> {
        (2..=n).filter(|&x| (2..x).all(|d| x % d != 0)).collect()
    }

    fn segment_from_primes(primes: &[u64], seg_lo: u64, bytes: usize) -> Vec<u8> {
        let mut seg = vec![0u8; bytes];
        for &p in primes {
            if p >= seg_lo && p < seg_lo + (bytes as u64) * 30 {
                segment::set_on(&mut seg, p - seg_lo);
            }
        }
        seg
    }

    #[test]
    fn twin_count_matches_known_small_value() {
        let primes = primes_up_to(1000);
        let naive = count_tuplets_naive(Tuplet::Twin, &primes);
        // there are 35 twin prime pairs with smaller member <= 1000.
        assert_eq!(naive, 35);

        let seg_lo = 0;
        let bytes = 1000 / 30 + 2;
        let seg = segment_from_primes(&primes, seg_lo, bytes);
        let mut scanner = TupletScanner::new();
        let mut found = 0u64;
        scanner.feed(Tuplet::Twin, &seg, seg_lo, |p, _| {
            if p <= 1000 {
                found += 1;
            }
        });
        scanner.finish(Tuplet::Twin, |p, _| {
            if p <= 1000 {
                found += 1;
            }
        });
        assert_eq!(found, naive);
    }

    #[test]
    fn triplet_members_reconstruct_correctly() {
        let primes = primes_up_to(200);
        let seg = segment_from_primes(&primes, 0, 10);
        let mut scanner = TupletScanner::new();
        let mut results = Vec::new();
        scanner.feed(Tuplet::Triplet, &seg, 0, |p, members| {
            results.push((p, members.to_vec()));
        });
        scanner.finish(Tuplet::Triplet, |p, members| {
            results.push((p, members.to_vec()));
        });
        // (5,7,11) is a known triplet (ignoring the wheel's exclusion of 5 itself, 7 starts
        // the (0,4,6) pattern at 7,11,13).
        assert!(results.iter().any(|(p, m)| *p == 7 && m == &[7, 11, 13]));
        assert!(results.iter().any(|(p, m)| *p == 11 && m == &[11, 13, 17]));
    }

    #[test]
    fn no_tuplet_reported_when_a_member_is_composite() {
        let primes: Vec<u64> = primes_up_to(50).into_iter().filter(|&p| p != 13).collect();
        let seg = segment_from_primes(&primes, 0, 5);
        let mut scanner = TupletScanner::new();
        let mut results = Vec::new();
        scanner.feed(Tuplet::Triplet, &seg, 0, |p, m| results.push((p, m.to_vec())));
        scanner.finish(Tuplet::Triplet, |p, m| results.push((p, m.to_vec())));
        assert!(!results.iter().any(|(p, _)| *p == 7 || *p == 11));
    }
}
