//! Uniform in-place shuffling.

use rand::Rng;

/// Reorders `items` into a uniformly random permutation.
///
/// Walks indices from last down to 1, swapping each with a uniformly drawn
/// index in `[0, i]`. Slices shorter than two elements are left untouched.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::shuffle_in_place;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn short_slices_are_untouched() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut empty: Vec<u8> = Vec::new();
        shuffle_in_place(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle_in_place(&mut single, &mut rng);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn result_is_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle_in_place(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn every_permutation_of_three_appears_evenly() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = std::collections::HashMap::new();
        let rounds = 60_000;
        for _ in 0..rounds {
            let mut items = [0u8, 1, 2];
            shuffle_in_place(&mut items, &mut rng);
            *counts.entry(items).or_insert(0usize) += 1;
        }
        assert_eq!(counts.len(), 6);
        let expected = rounds / 6;
        for count in counts.values() {
            let deviation = (*count as f64 - expected as f64).abs() / expected as f64;
            assert!(deviation < 0.05, "permutation count {count} too far from {expected}");
        }
    }
}
