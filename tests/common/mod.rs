use groupfinder::{
    DistanceMetric, FofParams, GroupFinder, GroupingError, NnAlgorithm,
};

type ClusterFn = fn(&GroupFinder<f32>) -> Result<Vec<Vec<usize>>, GroupingError>;

pub(crate) fn test_cluster(cluster_fn: ClusterFn) {
    let data = cluster_test_data();
    let finder = GroupFinder::with_linking_length(&data, 1.5);
    let groups = cluster_fn(&finder).unwrap();
    assert_eq!(vec![vec![0, 1, 2], vec![3, 4]], groups);
}

pub(crate) fn test_kd_tree_matches_brute_force(cluster_fn: ClusterFn) {
    let data = scattered_test_data();
    for metric in [DistanceMetric::Euclidean, DistanceMetric::Manhattan] {
        let brute = FofParams::builder(0.9)
            .dist_metric(metric)
            .nn_algorithm(NnAlgorithm::BruteForce)
            .build();
        let kd = FofParams::builder(0.9)
            .dist_metric(metric)
            .nn_algorithm(NnAlgorithm::KdTree)
            .build();
        let brute_groups = cluster_fn(&GroupFinder::new(&data, brute)).unwrap();
        let kd_groups = cluster_fn(&GroupFinder::new(&data, kd)).unwrap();
        assert_eq!(brute_groups, kd_groups);
    }
}

pub(crate) fn test_three_dimensions(cluster_fn: ClusterFn) {
    let data = vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.9],
        vec![0.0, 0.9, 0.9],
        vec![5.0, 5.0, 5.0],
    ];
    let finder = GroupFinder::with_linking_length(&data, 1.0);
    assert_eq!(vec![vec![0, 1, 2]], cluster_fn(&finder).unwrap());
}

pub(crate) fn test_no_groups(cluster_fn: ClusterFn) {
    let data = vec![vec![0.0, 0.0], vec![5.0, 0.0], vec![10.0, 0.0]];
    let finder = GroupFinder::with_linking_length(&data, 1.0);
    assert!(cluster_fn(&finder).unwrap().is_empty());
}

pub(crate) fn test_empty_data(cluster_fn: ClusterFn) {
    let data: Vec<Vec<f32>> = Vec::new();
    let finder = GroupFinder::with_linking_length(&data, 1.0);
    assert!(cluster_fn(&finder).unwrap().is_empty());
}

pub(crate) fn test_mismatched_dimensions(cluster_fn: ClusterFn) {
    let data = vec![vec![1.5, 2.2], vec![1.0, 1.1], vec![1.2]];
    let finder = GroupFinder::with_linking_length(&data, 1.0);
    let result = cluster_fn(&finder);
    assert!(matches!(result, Err(GroupingError::WrongDimension(..))));
}

pub(crate) fn test_non_finite_coordinate(cluster_fn: ClusterFn) {
    let data = vec![vec![1.5, f32::INFINITY]];
    let finder = GroupFinder::with_linking_length(&data, 1.0);
    let result = cluster_fn(&finder);
    assert!(matches!(result, Err(GroupingError::NonFiniteCoordinate(..))));
}

pub(crate) fn test_non_finite_linking_length(cluster_fn: ClusterFn) {
    let data = cluster_test_data();
    let finder = GroupFinder::with_linking_length(&data, f64::NAN);
    let result = cluster_fn(&finder);
    assert!(matches!(result, Err(GroupingError::InvalidLinkingLength(..))));
}

fn cluster_test_data() -> Vec<Vec<f32>> {
    vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![2.0, 0.0],
        vec![10.0, 0.0],
        vec![11.0, 0.0],
    ]
}

fn scattered_test_data() -> Vec<Vec<f32>> {
    // A deterministic scatter dense enough for several multi-point groups
    (0..300)
        .map(|i| {
            let i = i as f32;
            vec![(i * 7.3) % 20.0, (i * 3.1) % 15.0]
        })
        .collect()
}
