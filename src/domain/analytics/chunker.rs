use crate::domain::errors::ChunkError;
use crate::domain::market::OiRecord;

/// Validated group size. Construction rejects non-positive sizes so `chunk`
/// never has to deal with a zero step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkSize(usize);

impl ChunkSize {
    pub const DEFAULT: usize = 10;
    pub const MIN: usize = 1;
    pub const MAX: usize = 100;

    pub fn new(size: i64) -> Result<Self, ChunkError> {
        if size <= 0 {
            return Err(ChunkError::NonPositive { size });
        }
        Ok(Self(size as usize))
    }

    /// Clamps any requested size into the adjustable range `MIN..=MAX`.
    pub fn clamped(size: i64) -> Self {
        Self(size.clamp(Self::MIN as i64, Self::MAX as i64) as usize)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Positional, contiguous slice of the filtered sequence.
#[derive(Debug, PartialEq)]
pub struct Group<'a, T = OiRecord> {
    pub index: usize,
    pub records: &'a [T],
}

impl<T> Clone for Group<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Group<'_, T> {}

impl<'a, T> Group<'a, T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Splits `items` into groups of `size`; the last group holds the remainder.
/// Empty input yields no groups.
pub fn chunk<T>(items: &[T], size: ChunkSize) -> Vec<Group<'_, T>> {
    items
        .chunks(size.get())
        .enumerate()
        .map(|(index, records)| Group { index, records })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes<T>(groups: &[Group<'_, T>]) -> Vec<usize> {
        groups.iter().map(|g| g.len()).collect()
    }

    #[test]
    fn test_rejects_non_positive_size() {
        assert_eq!(ChunkSize::new(0), Err(ChunkError::NonPositive { size: 0 }));
        assert_eq!(ChunkSize::new(-5), Err(ChunkError::NonPositive { size: -5 }));
        assert_eq!(ChunkSize::new(7).map(|s| s.get()), Ok(7));
    }

    #[test]
    fn test_clamped_range() {
        assert_eq!(ChunkSize::clamped(0).get(), 1);
        assert_eq!(ChunkSize::clamped(-20).get(), 1);
        assert_eq!(ChunkSize::clamped(250).get(), 100);
        assert_eq!(ChunkSize::clamped(25).get(), 25);
        assert_eq!(ChunkSize::default().get(), 10);
    }

    #[test]
    fn test_remainder_lands_in_last_group() {
        let items: Vec<u32> = (0..25).collect();
        let groups = chunk(&items, ChunkSize::new(10).unwrap());
        assert_eq!(sizes(&groups), vec![10, 10, 5]);
        assert_eq!(groups[2].records, &[20, 21, 22, 23, 24]);
        assert_eq!(groups[2].index, 2);
    }

    #[test]
    fn test_evenly_divisible_has_full_last_group() {
        let items: Vec<u32> = (0..30).collect();
        let groups = chunk(&items, ChunkSize::new(10).unwrap());
        assert_eq!(sizes(&groups), vec![10, 10, 10]);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let items: Vec<u32> = Vec::new();
        for size in [1, 10, 100] {
            assert!(chunk(&items, ChunkSize::new(size).unwrap()).is_empty());
        }
    }

    #[test]
    fn test_concatenation_is_lossless() {
        let items: Vec<u32> = (0..37).collect();
        for size in 1..=40 {
            let size = ChunkSize::new(size).unwrap();
            let groups = chunk(&items, size);
            let flattened: Vec<u32> = groups
                .iter()
                .flat_map(|g| g.records.iter().copied())
                .collect();
            assert_eq!(flattened, items);

            let (last, full) = groups.split_last().unwrap();
            assert!(full.iter().all(|g| g.len() == size.get()));
            assert!(last.len() >= 1 && last.len() <= size.get());
        }
    }
}
