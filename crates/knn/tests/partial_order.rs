//! Partial-order correctness of neighbour selection on random point sets.

use std::collections::HashSet;

use kgrid_knn::{pairwise_distances, select_k_nearest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_coords(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n)
        .flat_map(|_| {
            [
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(1..=8) as f64,
            ]
        })
        .collect()
}

#[test]
fn selected_distances_bound_unselected() {
    let mut rng = StdRng::seed_from_u64(7);
    for &(n_queries, n_refs, k) in &[(1, 1, 1), (5, 10, 3), (20, 50, 4), (13, 200, 17), (3, 30, 30)] {
        let queries = random_coords(&mut rng, n_queries);
        let reference = random_coords(&mut rng, n_refs);
        let d = pairwise_distances(&queries, &reference).unwrap();
        let nn = select_k_nearest(&d, k).unwrap();

        assert_eq!(nn.n_queries(), n_queries);
        for q in 0..n_queries {
            let row = nn.row(q);
            assert_eq!(row.len(), k);

            let chosen: HashSet<usize> = row.iter().copied().collect();
            assert_eq!(chosen.len(), k, "indices must be distinct");
            assert!(chosen.iter().all(|&i| i < n_refs));

            let worst_chosen = row
                .iter()
                .map(|&i| d.get(i, q))
                .fold(f64::NEG_INFINITY, f64::max);
            for r in (0..n_refs).filter(|r| !chosen.contains(r)) {
                assert!(
                    worst_chosen <= d.get(r, q),
                    "query {q}: chosen {worst_chosen} > unchosen {}",
                    d.get(r, q)
                );
            }
        }
    }
}

#[test]
fn matches_full_sort_on_distinct_distances() {
    let mut rng = StdRng::seed_from_u64(99);
    let queries = random_coords(&mut rng, 8);
    let reference = random_coords(&mut rng, 64);
    let d = pairwise_distances(&queries, &reference).unwrap();
    let k = 6;
    let nn = select_k_nearest(&d, k).unwrap();

    for q in 0..8 {
        let mut order: Vec<usize> = (0..64).collect();
        order.sort_by(|&a, &b| d.get(a, q).total_cmp(&d.get(b, q)));
        let expected: HashSet<usize> = order[..k].iter().copied().collect();
        let got: HashSet<usize> = nn.row(q).iter().copied().collect();
        assert_eq!(got, expected);
    }
}
