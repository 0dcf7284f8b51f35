//! Distractor selection for quiz questions

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Item;

/// Build the option list for one question.
///
/// Returns `option_count` items: `correct` plus `option_count - 1` distinct
/// distractors drawn uniformly from the rest of `catalog`, shuffled together.
/// When the catalog is too small every other item is used and the list is
/// shorter. The correct item appears exactly once.
pub fn build_options<R>(
    catalog: &[Item],
    correct: &Item,
    option_count: usize,
    rng: &mut R,
) -> Vec<Item>
where
    R: Rng + ?Sized,
{
    let mut pool: Vec<&Item> = catalog.iter().filter(|i| i.id != correct.id).collect();
    let wanted = option_count.saturating_sub(1).min(pool.len());

    let (distractors, _) = pool.partial_shuffle(rng, wanted);

    let mut options: Vec<Item> = distractors.iter().map(|i| (*i).clone()).collect();
    options.push(correct.clone());
    options.shuffle(rng);

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog(size: i64) -> Vec<Item> {
        (1..=size)
            .map(|id| Item::new(id, format!("item {}", id), Category::Wind, "Han"))
            .collect()
    }

    #[test]
    fn test_options_contain_correct_once_without_duplicates() {
        let items = catalog(12);

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let correct = &items[(seed % 12) as usize];
            let options = build_options(&items, correct, 3, &mut rng);

            assert_eq!(options.len(), 3);
            assert_eq!(options.iter().filter(|o| o.id == correct.id).count(), 1);

            let ids: HashSet<_> = options.iter().map(|o| o.id).collect();
            assert_eq!(ids.len(), options.len());
        }
    }

    #[test]
    fn test_small_catalog_degrades_to_all_items() {
        let items = catalog(2);
        let mut rng = StdRng::seed_from_u64(1);

        let options = build_options(&items, &items[0], 4, &mut rng);
        let ids: HashSet<_> = options.iter().map(|o| o.id).collect();

        assert_eq!(options.len(), 2);
        assert_eq!(ids, HashSet::from([1, 2]));
    }

    #[test]
    fn test_catalog_exactly_option_count() {
        let items = catalog(3);
        let mut rng = StdRng::seed_from_u64(9);

        let options = build_options(&items, &items[2], 3, &mut rng);
        let ids: HashSet<_> = options.iter().map(|o| o.id).collect();

        assert_eq!(ids, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_correct_position_is_not_fixed() {
        let items = catalog(12);
        let correct = &items[4];
        let mut positions = HashSet::new();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = build_options(&items, correct, 3, &mut rng);
            let pos = options.iter().position(|o| o.id == correct.id).unwrap();
            positions.insert(pos);
        }

        assert_eq!(positions, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn test_every_distractor_can_be_drawn() {
        let items = catalog(6);
        let correct = &items[0];
        let mut seen = HashSet::new();

        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            for option in build_options(&items, correct, 2, &mut rng) {
                seen.insert(option.id);
            }
        }

        assert_eq!(seen, (1..=6).collect::<HashSet<_>>());
    }
}
