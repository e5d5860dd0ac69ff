// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles items and splits them into a training set and a
// held-out test set (default 80% / 20%).
//
// The shuffle is driven by a seeded StdRng, so the same seed
// and the same input give the same split on every run.
//
// Reference: rand crate documentation (SliceRandom, SeedableRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `items` with `seed` and split off the last `test_ratio` share.
///
/// Returns `(train, test)`. The ratio is clamped to `[0, 1]`.
pub fn split_train_test<T>(mut items: Vec<T>, test_ratio: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);

    let total      = items.len();
    let test_count = ((total as f64) * test_ratio.clamp(0.0, 1.0)).round() as usize;
    let split_at   = total - test_count.min(total);

    let test = items.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        items.len(),
        test.len(),
        seed,
    );

    (items, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test) = split_train_test(items, 0.2, 7);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test) = split_train_test(items, 0.3, 7);
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_test((0..30).collect::<Vec<u32>>(), 0.2, 42);
        let b = split_train_test((0..30).collect::<Vec<u32>>(), 0.2, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_dataset() {
        let (train, test) = split_train_test(Vec::<usize>::new(), 0.2, 1);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_zero_ratio_keeps_everything_for_training() {
        let (train, test) = split_train_test((0..10).collect::<Vec<usize>>(), 0.0, 1);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }
}
