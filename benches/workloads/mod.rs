pub mod access;
pub mod boundary;
pub mod growth;

/// Deterministic generator so every allocator sees the same index sequence.
pub struct XorShift64 {
    a: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { a: if seed == 0 { 1 } else { seed } }
    }

    pub fn next(&mut self) -> u64 {
        let mut x = self.a;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.a = x;
        x
    }

    pub fn below(&mut self, bound: usize) -> usize {
        (self.next() as usize) % bound
    }
}
