use std::ops::{Range, RangeInclusive};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Row seeds are drawn from here.
pub const ROW_SEED_RANGE: RangeInclusive<u32> = 1..=10_000;
/// Column seeds are drawn from here, disjoint from rows except at 10000.
pub const COL_SEED_RANGE: Range<u32> = 10_000..20_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedVectors {
    pub row_seeds: Vec<u32>,
    pub col_seeds: Vec<u32>,
}

/// Draws the row/column seeds of a style-mix grid.
///
/// No uniqueness is enforced; a repeated seed just renders the same face twice.
#[derive(Debug)]
pub struct SeedAllocator<R = StdRng> {
    rng: R,
}

impl SeedAllocator<StdRng> {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Reproducible allocator, used by tests.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for SeedAllocator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SeedAllocator<R> {
    pub fn allocate(&mut self, rows: usize, cols: usize) -> SeedVectors {
        let row_seeds = (0..rows)
            .map(|_| self.rng.random_range(ROW_SEED_RANGE))
            .collect();
        let col_seeds = (0..cols)
            .map(|_| self.rng.random_range(COL_SEED_RANGE))
            .collect();

        SeedVectors { row_seeds, col_seeds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths_and_ranges() {
        let mut allocator = SeedAllocator::seeded(7);

        for rows in 1..=5 {
            for cols in 1..=5 {
                let seeds = allocator.allocate(rows, cols);
                assert_eq!(seeds.row_seeds.len(), rows);
                assert_eq!(seeds.col_seeds.len(), cols);
                assert!(seeds.row_seeds.iter().all(|s| (1..=10_000).contains(s)));
                assert!(seeds.col_seeds.iter().all(|s| (10_000..=20_000).contains(s)));
            }
        }
    }

    #[test]
    fn test_same_seed_same_vectors() {
        let a = SeedAllocator::seeded(99).allocate(3, 4);
        let b = SeedAllocator::seeded(99).allocate(3, 4);
        assert_eq!(a, b);
    }
}
