use crate::rating::{Rating, RatingScalar};

/// A ranked item.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing<Id> {
    /// 1-based position.
    pub rank: usize,
    pub id: Id,
    pub rating: Rating,
    /// See [`Rating::confidence_interval()`].
    pub interval: (RatingScalar, RatingScalar),
}

/// Orders items by rating, best first. Ties are broken in favour of the
/// lower deviation, then by input order.
pub fn leaderboard<Id, I>(entries: I) -> Vec<Standing<Id>>
where
    I: IntoIterator<Item = (Id, Rating)>,
{
    let mut entries: Vec<(Id, Rating)> = entries.into_iter().collect();
    entries.sort_by(|(_, a), (_, b)| {
        f64::from(b.rating)
            .total_cmp(&f64::from(a.rating))
            .then_with(|| f64::from(a.deviation).total_cmp(&f64::from(b.deviation)))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (id, rating))| Standing {
            rank: i + 1,
            id,
            interval: rating.confidence_interval(),
            rating,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaderboard_order() {
        let standings = leaderboard([
            ("uncertain", Rating::new(1600.0, 300.0, 0.06)),
            ("low", Rating::new(1400.0, 50.0, 0.06)),
            ("certain", Rating::new(1600.0, 40.0, 0.06)),
            ("top", Rating::new(1700.0, 100.0, 0.06)),
        ]);

        let order: Vec<_> = standings.iter().map(|s| (s.rank, s.id)).collect();
        assert_eq!(
            order,
            [(1, "top"), (2, "certain"), (3, "uncertain"), (4, "low")]
        );
        assert_eq!(
            standings[0].interval,
            (RatingScalar(1500.0), RatingScalar(1900.0))
        );
    }

    #[test]
    fn test_empty_leaderboard() {
        assert!(leaderboard(Vec::<(u32, Rating)>::new()).is_empty());
    }
}
