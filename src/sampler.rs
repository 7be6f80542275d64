//! Choosing the next pair of items to compare.
//!
//! Items are drawn with probability proportional to
//! [`selection_weight()`], which grows with the rating deviation, so that
//! uncertain items are compared more often while every item keeps a chance
//! of being picked.

use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};
use tracing::trace;

use crate::{
    error::{Error, Result},
    rating::{Rating, RatingDifference},
};

/// An item eligible for the next comparison, as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry<Id> {
    pub id: Id,
    pub deviation: RatingDifference,
}

impl<Id> PoolEntry<Id> {
    pub fn new(id: Id, deviation: f64) -> PoolEntry<Id> {
        PoolEntry {
            id,
            deviation: RatingDifference(deviation),
        }
    }

    pub fn from_rating(id: Id, rating: &Rating) -> PoolEntry<Id> {
        PoolEntry {
            id,
            deviation: rating.deviation,
        }
    }
}

#[inline]
pub fn selection_weight(RatingDifference(deviation): RatingDifference) -> f64 {
    1.0 + deviation / 100.0
}

/// Weight used for drawing, `0.0` for entries that can never be drawn.
fn drawable_weight(deviation: RatingDifference) -> f64 {
    let weight = selection_weight(deviation);
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Picks two distinct items from `pool`, biased towards items with a high
/// rating deviation. Returns `None` if fewer than two items are available.
///
/// The first item is drawn from the whole pool, the second from the entries
/// with a different id, both with the original weights. Entries sharing an
/// id are never paired with each other.
pub fn select_pair<Id, R>(pool: &[PoolEntry<Id>], rng: &mut R) -> Option<(Id, Id)>
where
    Id: Clone + PartialEq,
    R: Rng + ?Sized,
{
    try_select_pair(pool, rng).ok()
}

/// Like [`select_pair()`], but reports [`Error::InsufficientItems`] instead
/// of `None`.
pub fn try_select_pair<Id, R>(pool: &[PoolEntry<Id>], rng: &mut R) -> Result<(Id, Id)>
where
    Id: Clone + PartialEq,
    R: Rng + ?Sized,
{
    let weights: Vec<f64> = pool
        .iter()
        .map(|entry| drawable_weight(entry.deviation))
        .collect();

    let available = weights.iter().filter(|&&weight| weight > 0.0).count();
    if available < 2 {
        return Err(Error::InsufficientItems { available });
    }

    let insufficient = |_| Error::InsufficientItems { available };

    let first = WeightedIndex::new(&weights)
        .map_err(insufficient)?
        .sample(rng);

    let rest: Vec<usize> = (0..pool.len())
        .filter(|&i| pool[i].id != pool[first].id && weights[i] > 0.0)
        .collect();
    if rest.is_empty() {
        // Every drawable entry carries the id of the first draw.
        return Err(Error::InsufficientItems { available: 1 });
    }

    let second = rest[WeightedIndex::new(rest.iter().map(|&i| weights[i]))
        .map_err(insufficient)?
        .sample(rng)];

    trace!(first, second, pool = pool.len(), "selected pair");
    Ok((pool[first].id.clone(), pool[second].id.clone()))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_selection_weight() {
        assert_eq!(selection_weight(RatingDifference(350.0)), 4.5);
        assert_eq!(selection_weight(RatingDifference(50.0)), 1.5);
        assert!(selection_weight(RatingDifference(0.1)) > 1.0);
    }

    #[test]
    fn test_too_small_pools() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(select_pair::<u32, _>(&[], &mut rng), None);
        assert_eq!(select_pair(&[PoolEntry::new(1, 350.0)], &mut rng), None);
        assert_eq!(
            try_select_pair(&[PoolEntry::new(1, 350.0)], &mut rng),
            Err(Error::InsufficientItems { available: 1 })
        );
    }

    #[test]
    fn test_undrawable_entries_do_not_count() {
        let mut rng = StdRng::seed_from_u64(0);
        let pool = [PoolEntry::new("a", 350.0), PoolEntry::new("b", f64::NAN)];
        assert_eq!(
            try_select_pair(&pool, &mut rng),
            Err(Error::InsufficientItems { available: 1 })
        );
    }

    #[test]
    fn test_pair_is_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool: Vec<_> = (0..5)
            .map(|id| PoolEntry::new(id, 50.0 + 60.0 * f64::from(id)))
            .collect();
        for _ in 0..1000 {
            let (first, second) = select_pair(&pool, &mut rng).unwrap();
            assert_ne!(first, second);
            assert!(first < 5 && second < 5);
        }
    }

    #[test]
    fn test_repeated_id_is_not_paired_with_itself() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = [PoolEntry::new("a", 350.0), PoolEntry::new("a", 50.0)];
        assert_eq!(select_pair(&pool, &mut rng), None);
        assert_eq!(
            try_select_pair(&pool, &mut rng),
            Err(Error::InsufficientItems { available: 1 })
        );

        let pool = [
            PoolEntry::new("a", 350.0),
            PoolEntry::new("a", 50.0),
            PoolEntry::new("b", 50.0),
        ];
        for _ in 0..1000 {
            let (first, second) = select_pair(&pool, &mut rng).unwrap();
            assert_ne!(first, second);
        }
    }

    #[test]
    fn test_same_seed_same_pairs() {
        let pool: Vec<_> = (0..10).map(|id| PoolEntry::new(id, 350.0)).collect();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| select_pair(&pool, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(7), draw(7));
    }
}
