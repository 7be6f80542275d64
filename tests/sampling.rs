use std::collections::HashSet;

use pairwise_glicko2::{select_pair, try_select_pair, Error, PoolEntry};
use rand::{rngs::StdRng, SeedableRng};

const DRAWS: usize = 100_000;

#[test]
fn test_pool_of_two_always_pairs_both() {
    let mut rng = StdRng::seed_from_u64(1);
    let pool = [PoolEntry::new("uncertain", 350.0), PoolEntry::new("settled", 50.0)];
    let expected: HashSet<_> = ["uncertain", "settled"].into();

    for _ in 0..1000 {
        let (first, second) = select_pair(&pool, &mut rng).unwrap();
        assert_eq!(HashSet::from([first, second]), expected);
    }
}

#[test]
fn test_pools_below_two_yield_nothing() {
    let mut rng = StdRng::seed_from_u64(1);
    let empty: [PoolEntry<&str>; 0] = [];
    assert_eq!(select_pair(&empty, &mut rng), None);
    assert_eq!(select_pair(&[PoolEntry::new("alone", 120.0)], &mut rng), None);
    assert_eq!(
        try_select_pair(&empty, &mut rng),
        Err(Error::InsufficientItems { available: 0 })
    );
}

#[test]
fn test_uncertain_item_is_drawn_first_more_often() {
    let mut rng = StdRng::seed_from_u64(2024);
    let pool = [PoolEntry::new("uncertain", 350.0), PoolEntry::new("settled", 50.0)];

    let uncertain_first = (0..DRAWS)
        .filter(|_| select_pair(&pool, &mut rng).unwrap().0 == "uncertain")
        .count();

    // Weights 4.5 and 1.5, so the uncertain item goes first 3 times in 4.
    let share = uncertain_first as f64 / DRAWS as f64;
    assert!((share - 0.75).abs() < 0.01, "share {share}");
}

#[test]
fn test_uncertain_item_is_selected_more_often() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut pool = vec![PoolEntry::new(0, 350.0), PoolEntry::new(1, 50.0)];
    pool.extend((2..10).map(|id| PoolEntry::new(id, 200.0)));

    let mut selected = [0usize; 10];
    for _ in 0..DRAWS {
        let (first, second) = select_pair(&pool, &mut rng).unwrap();
        assert_ne!(first, second);
        selected[first] += 1;
        selected[second] += 1;
    }

    assert!(selected[0] > selected[1]);
    assert!(selected[0] > selected[2]);
    assert!(selected[1] < selected[2]);
    assert!(selected[1] > 0);
}
