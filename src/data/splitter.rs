// ============================================================
// Layer 4 - Train/Validation Splitter
// ============================================================
// Divides the ordered example store into two slices:
//   - Training set:   the first floor(N * train_fraction) records
//   - Validation set: everything after that
//
// No shuffling happens here. The same store and fraction always
// give the same partition, so the validation set of one run never
// leaks into the training set of another. The flip side is that
// the partition follows upstream ordering: no stratification.
//
// Shuffling, when wanted, is a property of the batch loader and is
// applied within one side of the partition only.
//
// Example: N = 10, train_fraction = 0.7
//   train      = indices 0..7   (7 records)
//   validation = indices 7..10  (3 records)
//
// Reference: Rust Book §8 (Vectors)

use std::ops::Range;

use anyhow::{ensure, Result};

use crate::domain::split::Split;

/// Default share of the store used for training.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.7;

/// Reject fractions outside the open interval (0, 1).
pub fn validate_train_fraction(train_fraction: f64) -> Result<()> {
    ensure!(
        train_fraction > 0.0 && train_fraction < 1.0,
        "train_fraction must be in (0, 1), got {train_fraction}"
    );
    Ok(())
}

/// Index ranges of the two sides of a split over `len` records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub train:      Range<usize>,
    pub validation: Range<usize>,
}

impl Partition {
    pub fn new(len: usize, train_fraction: f64) -> Result<Self> {
        validate_train_fraction(train_fraction)?;

        // floor(N * f), the boundary the data has always been cut at
        let split_at = ((len as f64) * train_fraction).floor() as usize;
        let split_at = split_at.min(len);

        tracing::debug!(
            "Partition of {} records: {} training, {} validation",
            len,
            split_at,
            len - split_at,
        );

        Ok(Self {
            train:      0..split_at,
            validation: split_at..len,
        })
    }

    /// The index range backing one side of the partition
    pub fn range(&self, split: Split) -> Range<usize> {
        match split {
            Split::Train      => self.train.clone(),
            Split::Validation => self.validation.clone(),
        }
    }
}

/// Split `samples` into (train, validation) without reordering.
pub fn split_train_val<T>(mut samples: Vec<T>, train_fraction: f64) -> Result<(Vec<T>, Vec<T>)> {
    let partition = Partition::new(samples.len(), train_fraction)?;

    // split_off(n) leaves [0..n) in `samples` and returns [n..)
    let val = samples.split_off(partition.validation.start);
    Ok((samples, val))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ten_records_seventy_percent() {
        let p = Partition::new(10, 0.7).unwrap();
        assert_eq!(p.train, 0..7);
        assert_eq!(p.validation, 7..10);
    }

    #[test]
    fn test_boundary_is_floored() {
        // 9 * 0.7 = 6.3 → 6, and 3 * 0.5 = 1.5 → 1
        assert_eq!(Partition::new(9, 0.7).unwrap().train.len(), 6);
        assert_eq!(Partition::new(3, 0.5).unwrap().train.len(), 1);
    }

    #[test]
    fn test_boundary_follows_float_product() {
        // 100 * 0.29 = 28.999999999999996 and 100 * 0.57 = 56.99999999999999
        assert_eq!(Partition::new(100, 0.29).unwrap().train, 0..28);
        assert_eq!(Partition::new(100, 0.57).unwrap().train, 0..56);
        // 10 * 0.7 rounds to exactly 7.0
        assert_eq!(Partition::new(10, 0.7).unwrap().validation, 7..10);
        assert_eq!(Partition::new(4, 0.7).unwrap().train, 0..2);
    }

    #[test]
    fn test_order_is_preserved() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 0.7).unwrap();
        assert_eq!(train, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(val,   vec![7, 8, 9]);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, 0.8).unwrap();
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_fraction_out_of_range_is_rejected() {
        assert!(Partition::new(10, 0.0).is_err());
        assert!(Partition::new(10, 1.0).is_err());
        assert!(Partition::new(10, -0.2).is_err());
        assert!(Partition::new(10, f64::NAN).is_err());
    }

    #[test]
    fn test_range_selects_side() {
        let p = Partition::new(10, 0.7).unwrap();
        assert_eq!(p.range(Split::Train), 0..7);
        assert_eq!(p.range(Split::Validation), 7..10);
    }

    proptest! {
        #[test]
        fn prop_split_sizes_and_order(n in 0usize..500, f in 0.01f64..0.99) {
            let items: Vec<usize> = (0..n).collect();
            let (train, val)      = split_train_val(items, f).unwrap();

            prop_assert_eq!(train.len(), ((n as f64) * f).floor() as usize);
            prop_assert_eq!(val.len(), n - train.len());

            let joined: Vec<usize> = train.into_iter().chain(val).collect();
            prop_assert_eq!(joined, (0..n).collect::<Vec<_>>());
        }
    }
}
