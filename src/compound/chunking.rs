//! Volume chunking.

use crate::core::VOLUME_EPSILON;

/// Most aspirations a single volume may be split into.
pub const MAX_CHUNKS: usize = 10_000;

/// Split `total` into aspirate-sized chunks of at most `capacity`.
///
/// Chunk count is `ceil(total / capacity)`; every chunk but the last equals
/// `capacity`. When a remainder would fall below `min_volume`, the last two
/// chunks are replaced by two equal halves of their combined volume.
/// Volumes needing more than [`MAX_CHUNKS`] chunks yield nothing.
///
/// ```rust
/// use stepgen::compound::split_volume;
///
/// assert_eq!(split_volume(350.0, 300.0, 30.0), vec![300.0, 50.0]);
/// assert_eq!(split_volume(629.0, 300.0, 30.0), vec![300.0, 164.5, 164.5]);
/// ```
pub fn split_volume(total: f64, capacity: f64, min_volume: f64) -> Vec<f64> {
    if total.is_nan() || capacity.is_nan() || total <= 0.0 || capacity <= 0.0 {
        return Vec::new();
    }

    let count = ((total - VOLUME_EPSILON) / capacity).ceil().max(1.0);
    if count > MAX_CHUNKS as f64 {
        tracing::debug!(total, capacity, "volume exceeds chunk limit");
        return Vec::new();
    }
    let count = count as usize;
    let mut chunks = vec![capacity; count - 1];
    let remainder = total - capacity * (count - 1) as f64;

    if count > 1 && remainder < min_volume {
        let half = (capacity + remainder) / 2.0;
        chunks.pop();
        chunks.push(half);
        chunks.push(half);
    } else {
        chunks.push(remainder);
    }

    tracing::trace!(total, capacity, min_volume, chunks = chunks.len(), "planned chunks");
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_within_capacity_is_one_chunk() {
        assert_eq!(split_volume(30.0, 300.0, 30.0), vec![30.0]);
        assert_eq!(split_volume(300.0, 300.0, 30.0), vec![300.0]);
    }

    #[test]
    fn exact_multiple_has_no_remainder_chunk() {
        assert_eq!(split_volume(600.0, 300.0, 30.0), vec![300.0, 300.0]);
    }

    #[test]
    fn remainder_at_minimum_is_kept() {
        assert_eq!(split_volume(330.0, 300.0, 30.0), vec![300.0, 30.0]);
    }

    #[test]
    fn under_minimum_remainder_is_balanced() {
        assert_eq!(split_volume(629.0, 300.0, 30.0), vec![300.0, 164.5, 164.5]);
        assert_eq!(split_volume(310.0, 300.0, 30.0), vec![155.0, 155.0]);
    }

    #[test]
    fn small_volume_below_minimum_still_moves() {
        assert_eq!(split_volume(5.0, 300.0, 30.0), vec![5.0]);
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        assert!(split_volume(0.0, 300.0, 30.0).is_empty());
        assert!(split_volume(100.0, 0.0, 30.0).is_empty());
        assert!(split_volume(f64::NAN, 300.0, 30.0).is_empty());
    }

    #[test]
    fn volumes_past_the_chunk_limit_yield_nothing() {
        assert!(split_volume(1e20, 300.0, 30.0).is_empty());
        assert_eq!(split_volume(300.0 * MAX_CHUNKS as f64, 300.0, 30.0).len(), MAX_CHUNKS);
    }
}
