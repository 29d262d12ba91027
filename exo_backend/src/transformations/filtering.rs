//! Positional mask filtering and record filters.
//!
//! The inclusion mask is an externally supplied 0/1 sequence positionally
//! aligned to a record batch (for instance, the output of a classification
//! model run elsewhere). It is always passed in as an explicit value; there
//! is no ambient mask state anywhere in the crate.

use crate::core::domain::{Disposition, EnrichedRecord, SizeClass};

/// What to do with positions beyond the end of the mask.
///
/// The two historical call sites disagreed on this default, so it is a
/// per-call-site parameter: selection for expensive enrichment should use
/// [`MaskPolicy::ExcludeMissing`]; permissive presentation paths may opt
/// into [`MaskPolicy::IncludeMissing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPolicy {
    /// Positions past the end of the mask are excluded.
    ExcludeMissing,
    /// Positions past the end of the mask are included.
    IncludeMissing,
}

/// Keep `items[i]` iff `mask[i] == 1`, preserving relative order.
///
/// A present entry with any value other than 1 always excludes; positions
/// the mask does not cover follow `policy`.
pub fn apply_mask<T: Clone>(items: &[T], mask: &[u8], policy: MaskPolicy) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| match mask.get(*i) {
            Some(bit) => *bit == 1,
            None => matches!(policy, MaskPolicy::IncludeMissing),
        })
        .map(|(_, item)| item.clone())
        .collect()
}

/// Filter enriched records down to one size class.
pub fn filter_by_size_class(records: &[EnrichedRecord], class: SizeClass) -> Vec<EnrichedRecord> {
    records
        .iter()
        .filter(|r| r.canonical.size_class == Some(class))
        .cloned()
        .collect()
}

/// Filter enriched records by disposition label.
pub fn filter_by_disposition(
    records: &[EnrichedRecord],
    disposition: Disposition,
) -> Vec<EnrichedRecord> {
    records
        .iter()
        .filter(|r| r.canonical.disposition == disposition)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_mask_keeps_aligned_ones() {
        let items = vec!["a", "b", "c", "d", "e"];
        let mask = [1u8, 0, 1, 0, 1];
        let kept = apply_mask(&items, &mask, MaskPolicy::ExcludeMissing);
        assert_eq!(kept, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_apply_mask_alignment_count() {
        let items: Vec<u32> = (0..10).collect();
        let mask = [1u8, 1, 0, 1, 0, 0, 1, 1, 0, 1];
        let kept = apply_mask(&items, &mask, MaskPolicy::ExcludeMissing);
        let ones = mask.iter().filter(|b| **b == 1).count();
        assert_eq!(kept.len(), ones);
        // Relative order preserved.
        assert!(kept.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_apply_mask_short_mask_policies() {
        let items = vec![1, 2, 3, 4];
        let mask = [1u8, 0];

        let excluded = apply_mask(&items, &mask, MaskPolicy::ExcludeMissing);
        assert_eq!(excluded, vec![1]);

        let included = apply_mask(&items, &mask, MaskPolicy::IncludeMissing);
        assert_eq!(included, vec![1, 3, 4]);
    }

    #[test]
    fn test_apply_mask_non_one_entries_exclude() {
        let items = vec![1, 2, 3];
        let mask = [2u8, 1, 0];
        let kept = apply_mask(&items, &mask, MaskPolicy::IncludeMissing);
        assert_eq!(kept, vec![2]);
    }

    #[test]
    fn test_apply_mask_empty_inputs() {
        let none: Vec<u32> = vec![];
        assert!(apply_mask(&none, &[1, 1], MaskPolicy::IncludeMissing).is_empty());

        let items = vec![1, 2];
        assert!(apply_mask(&items, &[], MaskPolicy::ExcludeMissing).is_empty());
        assert_eq!(apply_mask(&items, &[], MaskPolicy::IncludeMissing), items);
    }
}
