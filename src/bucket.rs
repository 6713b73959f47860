//! Bucket arena (C3): a recycling pool of fixed-capacity `WheelPrime` buckets, shared by the
//! EratSmall/Medium/Big engines (C4) so they never pay a per-prime heap allocation cost.
//!
//! The spec describes slabs of `ERATBIG_MEMORY_PER_ALLOC` bytes chopped into buckets; here the
//! slab is a batch of `Vec<Bucket>` pushed onto the free-list at once instead of a raw byte slab
//! sliced by pointer arithmetic — same recycling behavior (buckets are never individually freed,
//! only returned to the arena) and the same "allocate in `ERATBIG_MEMORY_PER_ALLOC`-sized
//! batches, not one bucket at a time" amortization, expressed without `unsafe`. See DESIGN.md.

use std::mem::size_of;

use crate::config::ERATBIG_MEMORY_PER_ALLOC;
use crate::wheel::Wheel30;

/// A sieving prime plus its running cross-off state.
#[derive(Clone, Copy, Debug)]
pub struct WheelPrime {
    /// The sieving prime itself.
    pub prime: u64,
    /// Offset (in integers, relative to the start of the segment currently being processed) of
    /// the next multiple to cross off.
    pub multiple_index: u64,
    /// Wheel-30 state used to step from one multiple to the next.
    pub wheel: Wheel30,
}

/// A fixed-capacity container of `WheelPrime`s, owned by a [`BucketArena`].
pub struct Bucket {
    items: Vec<WheelPrime>,
    capacity: usize,
}

impl Bucket {
    fn new(capacity: usize) -> Self {
        Bucket { items: Vec::with_capacity(capacity), capacity }
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn items(&self) -> &[WheelPrime] {
        &self.items
    }

    pub fn into_items(self) -> Vec<WheelPrime> {
        self.items
    }
}

/// Owns all bucket storage for one engine; buckets are recycled across segments rather than
/// freed. Dropped (and its storage released) when the containing `SieveOfEratosthenes` ends.
pub struct BucketArena {
    capacity: usize,
    /// How many empty buckets to mint at once when the free list runs dry, sized so one batch
    /// costs roughly `ERATBIG_MEMORY_PER_ALLOC` bytes of `WheelPrime` storage — the same
    /// amortize-the-allocation-cost idea as the spec's byte-slab arena, just batching whole
    /// `Bucket`s instead of carving one slab into many.
    slab_buckets: usize,
    free: Vec<Bucket>,
}

impl BucketArena {
    pub fn new(capacity: usize) -> Self {
        let bucket_bytes = capacity.max(1) * size_of::<WheelPrime>();
        let slab_buckets = (ERATBIG_MEMORY_PER_ALLOC / bucket_bytes).max(1);
        BucketArena { capacity, slab_buckets, free: Vec::new() }
    }

    pub fn alloc(&mut self) -> Bucket {
        if self.free.is_empty() {
            self.free.extend((0..self.slab_buckets).map(|_| Bucket::new(self.capacity)));
        }
        self.free.pop().expect("just refilled the free list")
    }

    pub fn recycle(&mut self, mut bucket: Bucket) {
        bucket.items.clear();
        self.free.push(bucket);
    }
}

/// A non-owning list of buckets belonging to one engine (or one ring slot of `EratBig`).
#[derive(Default)]
pub struct BucketList {
    pub buckets: Vec<Bucket>,
}

impl BucketList {
    pub fn new() -> Self {
        BucketList { buckets: Vec::new() }
    }

    pub fn add(&mut self, wp: WheelPrime, arena: &mut BucketArena) {
        if self.buckets.last().map_or(true, |b| b.is_full()) {
            self.buckets.push(arena.alloc());
        }
        self.buckets.last_mut().unwrap().items.push(wp);
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WheelPrime> {
        self.buckets.iter_mut().flat_map(|b| b.items.iter_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.items.is_empty())
    }

    /// Empties the list, returning all its `WheelPrime`s and recycling every bucket it held
    /// back into `arena`. Used by `EratBig` (C4c) to walk one ring slot per segment.
    pub fn drain(self, arena: &mut BucketArena) -> Vec<WheelPrime> {
        let mut out = Vec::new();
        for bucket in self.buckets {
            out.extend_from_slice(bucket.items());
            arena.recycle(bucket);
        }
        out
    }
}
