//! Seed derivation and the pseudo-random stream behind the mock feed.
//!
//! Both pieces are fixed bit-for-bit so a browser can recompute the same feed from the
//! same context key: FNV-1a over UTF-16 code units (what `charCodeAt` yields) and mulberry32
//! (which only relies on 32-bit `Math.imul` semantics).

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Unit hash values are scaled by this factor into the integer seed.
const SEED_SCALE: f64 = 1_000_000_000.0;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// 32-bit FNV-1a over the UTF-16 code units of `key`.
pub fn fnv1a_utf16(key: &str) -> u32 {
    key.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Hash of `key` normalized to `[0, 1)`.
pub fn unit_hash(key: &str) -> f64 {
    f64::from(fnv1a_utf16(key)) / TWO_POW_32
}

/// Integer seed for a context key.
pub fn seed_for(context_key: &str) -> u32 {
    // unit_hash < 1.0, so the product stays below SEED_SCALE and fits in u32
    (unit_hash(context_key) * SEED_SCALE).floor() as u32
}

/// mulberry32: a 32-bit state generator yielding values in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_unit(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / TWO_POW_32
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64).floor() as usize;
        idx.min(len - 1)
    }
}
