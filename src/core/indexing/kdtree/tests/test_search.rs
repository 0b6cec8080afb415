// src/core/indexing/kdtree/tests/test_search.rs

#[cfg(test)]
mod search_tests {
    use crate::core::indexing::kdtree::geometry::distance_squared;
    use crate::core::indexing::kdtree::{
        build_kdtree, find_neighbors_within_radius, find_within_radius, KdTree, SplitPolicy,
    };
    use crate::core::types::{Coordinates, Product};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn product(id: &str, coordinates: Coordinates) -> Product {
        Product::new(id, format!("Product {}", id), coordinates)
    }

    fn scenario_tree(policy: SplitPolicy) -> KdTree {
        build_kdtree(
            vec![
                product("A", [0.0, 0.0, 0.0]),
                product("B", [1.0, 0.0, 0.0]),
                product("C", [0.0, 2.0, 0.0]),
                product("D", [5.0, 5.0, 5.0]),
            ],
            policy,
        )
    }

    fn ids(results: &[&Product]) -> Vec<String> {
        let mut ids: Vec<String> = results.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids
    }

    fn brute_force<'a>(products: &'a [Product], target: &Coordinates, radius: f64) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|p| distance_squared(target, &p.coordinates) <= radius * radius)
            .collect()
    }

    const POLICIES: [SplitPolicy; 2] = [SplitPolicy::Variance, SplitPolicy::RoundRobin];

    #[test]
    fn test_scenario_small_radius() {
        for policy in POLICIES {
            let tree = scenario_tree(policy);
            let results = find_within_radius(&tree, &[0.0, 0.0, 0.0], 1.5);
            assert_eq!(ids(&results), vec!["A", "B"]);
        }
    }

    #[test]
    fn test_scenario_large_radius_returns_everything() {
        for policy in POLICIES {
            let tree = scenario_tree(policy);
            let results = find_within_radius(&tree, &[0.0, 0.0, 0.0], 10.0);
            assert_eq!(ids(&results), vec!["A", "B", "C", "D"]);
        }
    }

    #[test]
    fn test_scenario_zero_radius() {
        for policy in POLICIES {
            let tree = scenario_tree(policy);
            let results = find_within_radius(&tree, &[5.0, 5.0, 5.0], 0.0);
            assert_eq!(ids(&results), vec!["D"]);

            // Nothing sits exactly at (1, 1, 1)
            assert!(find_within_radius(&tree, &[1.0, 1.0, 1.0], 0.0).is_empty());
        }
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let tree = scenario_tree(SplitPolicy::Variance);
        let results = find_within_radius(&tree, &[0.0, 0.0, 0.0], 2.0);
        assert_eq!(ids(&results), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_tree() {
        let tree = build_kdtree(Vec::new(), SplitPolicy::Variance);
        assert!(find_within_radius(&tree, &[0.0, 0.0, 0.0], 100.0).is_empty());
        assert!(find_within_radius(&tree, &[0.0, 0.0, 0.0], 0.0).is_empty());
    }

    #[test]
    fn test_negative_and_nan_radius_yield_nothing() {
        let tree = scenario_tree(SplitPolicy::Variance);
        assert!(find_within_radius(&tree, &[0.0, 0.0, 0.0], -1.0).is_empty());
        assert!(find_within_radius(&tree, &[0.0, 0.0, 0.0], f64::NAN).is_empty());
    }

    #[test]
    fn test_infinite_radius_returns_everything() {
        let tree = scenario_tree(SplitPolicy::RoundRobin);
        assert_eq!(find_within_radius(&tree, &[-3.0, 8.0, 1.0], f64::INFINITY).len(), 4);
    }

    #[test]
    fn test_duplicates_appear_once_per_occurrence() {
        let tree = build_kdtree(
            vec![
                product("twin", [1.0, 1.0, 1.0]),
                product("twin", [1.0, 1.0, 1.0]),
                product("solo", [9.0, 9.0, 9.0]),
            ],
            SplitPolicy::Variance,
        );
        let results = find_within_radius(&tree, &[1.0, 1.0, 1.0], 0.0);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.id == "twin"));
    }

    #[test]
    fn test_neighbors_carry_distances() {
        let tree = scenario_tree(SplitPolicy::Variance);
        let mut neighbors = find_neighbors_within_radius(&tree, &[0.0, 0.0, 0.0], 3.0);
        neighbors.sort_by(|a, b| a.distance_sq.total_cmp(&b.distance_sq));

        let found: Vec<&str> = neighbors.iter().map(|n| n.product.id.as_str()).collect();
        assert_eq!(found, vec!["A", "B", "C"]);
        assert_relative_eq!(neighbors[0].distance(), 0.0);
        assert_relative_eq!(neighbors[1].distance(), 1.0);
        assert_relative_eq!(neighbors[2].distance(), 2.0);
    }

    #[test]
    fn test_query_is_idempotent() {
        let tree = scenario_tree(SplitPolicy::Variance);
        let first = find_within_radius(&tree, &[0.5, 0.5, 0.0], 1.2);
        let second = find_within_radius(&tree, &[0.5, 0.5, 0.0], 1.2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_brute_force_on_random_sets() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for round in 0..40 {
            let count = rng.gen_range(0..300);
            let products: Vec<Product> = (0..count)
                .map(|i| {
                    // Mix continuous values with a coarse grid so ties on every axis show up.
                    let coordinates = if i % 3 == 0 {
                        [
                            rng.gen_range(0..5) as f64,
                            rng.gen_range(0..5) as f64,
                            rng.gen_range(0..5) as f64,
                        ]
                    } else {
                        [
                            rng.gen_range(-10.0..10.0),
                            rng.gen_range(-1.0..1.0),
                            rng.gen_range(-4.0..4.0),
                        ]
                    };
                    product(&format!("r{}-{}", round, i), coordinates)
                })
                .collect();

            for policy in POLICIES {
                let tree = build_kdtree(products.clone(), policy);
                for _ in 0..10 {
                    let target = [
                        rng.gen_range(-12.0..12.0),
                        rng.gen_range(-2.0..2.0),
                        rng.gen_range(-5.0..5.0),
                    ];
                    let radius = rng.gen_range(0.0..6.0);
                    let expected = brute_force(&products, &target, radius);
                    let actual = find_within_radius(&tree, &target, radius);
                    assert_eq!(
                        ids(&actual),
                        ids(&expected),
                        "mismatch for target {:?} radius {} ({:?})",
                        target,
                        radius,
                        policy
                    );
                }

                // Querying from an indexed product always finds at least itself.
                if let Some(first) = products.first() {
                    let results = find_within_radius(&tree, &first.coordinates, 0.0);
                    assert!(results.iter().any(|p| p.id == first.id));
                }
            }
        }
    }

    #[test]
    fn test_concurrent_queries_share_the_tree() {
        let mut rng = StdRng::seed_from_u64(99);
        let products: Vec<Product> = (0..500)
            .map(|i| {
                product(
                    &format!("p{}", i),
                    [
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                    ],
                )
            })
            .collect();
        let tree = build_kdtree(products.clone(), SplitPolicy::Variance);
        let targets: Vec<Coordinates> = products.iter().take(8).map(|p| p.coordinates).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = targets
                .iter()
                .map(|target| {
                    let tree = &tree;
                    scope.spawn(move || ids(&find_within_radius(tree, target, 0.4)))
                })
                .collect();

            for (target, handle) in targets.iter().zip(handles) {
                let concurrent = handle.join().unwrap();
                assert_eq!(concurrent, ids(&brute_force(&products, target, 0.4)));
            }
        });
    }
}
