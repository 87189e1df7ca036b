use super::{finish_friends_list, kd_tree_error, NnAlgorithm};
use crate::distance::{get_dist_func, DistanceMetric};
use crate::GroupingError;
use num_traits::Float;

pub(crate) struct RadiusNeighbours<'a, T> {
    data: &'a [Vec<T>],
    nn_algo: NnAlgorithm,
    dist_metric: DistanceMetric,
    radius: T,
}

impl<'a, T: Float> RadiusNeighbours<'a, T> {
    pub(crate) fn new(
        data: &'a [Vec<T>],
        nn_algo: &NnAlgorithm,
        dist_metric: DistanceMetric,
        radius: T,
    ) -> Self {
        Self {
            data,
            nn_algo: nn_algo.resolve(data.len()),
            dist_metric,
            radius,
        }
    }

    /// Per point, the sorted indices of every other point within the radius.
    pub(crate) fn find_friends(&self) -> Result<Vec<Vec<usize>>, GroupingError> {
        if self.data.is_empty() {
            return Ok(Vec::new());
        }
        match self.nn_algo {
            NnAlgorithm::KdTree => KdTree::find_friends(self.data, self.radius, self.dist_metric),
            _ => Ok(BruteForce::find_friends(self.data, self.radius, self.dist_metric)),
        }
    }
}

pub(crate) struct BruteForce;

impl BruteForce {
    fn find_friends<T: Float>(
        data: &[Vec<T>],
        radius: T,
        dist_metric: DistanceMetric,
    ) -> Vec<Vec<usize>> {
        data.iter()
            .enumerate()
            .map(|(i, point)| {
                let neighbours = data
                    .iter()
                    .enumerate()
                    .filter(|(j, other)| *j != i && dist_metric.links(point, other, radius))
                    .map(|(j, _)| j)
                    .collect();
                finish_friends_list(i, neighbours)
            })
            .collect()
    }
}

pub(crate) struct KdTree;

impl KdTree {
    fn find_friends<T: Float>(
        data: &[Vec<T>],
        radius: T,
        dist_metric: DistanceMetric,
    ) -> Result<Vec<Vec<usize>>, GroupingError> {
        let mut tree: kdtree::KdTree<T, usize, &Vec<T>> = kdtree::KdTree::new(data[0].len());
        for (n, datapoint) in data.iter().enumerate() {
            tree.add(datapoint, n).map_err(kd_tree_error)?;
        }

        let dist_func = get_dist_func(&dist_metric);
        data.iter()
            .enumerate()
            .map(|(i, datapoint)| {
                let within = tree
                    .within(datapoint, radius, &dist_func)
                    .map_err(kd_tree_error)?;
                let neighbours = within.into_iter().map(|(_dist, idx)| *idx).collect();
                Ok(finish_friends_list(i, neighbours))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_data() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
            vec![10.0, 0.0],
            vec![11.0, 0.0],
        ]
    }

    #[test]
    fn brute_force_and_kd_tree_agree() {
        let data = line_data();
        let brute = RadiusNeighbours::new(&data, &NnAlgorithm::BruteForce, DistanceMetric::Euclidean, 1.5)
            .find_friends()
            .unwrap();
        let kd = RadiusNeighbours::new(&data, &NnAlgorithm::KdTree, DistanceMetric::Euclidean, 1.5)
            .find_friends()
            .unwrap();
        assert_eq!(brute, kd);
        assert_eq!(vec![vec![1], vec![0, 2], vec![1], vec![4], vec![3]], brute);
    }

    #[test]
    fn radius_is_inclusive() {
        let data = line_data();
        let friends = RadiusNeighbours::new(&data, &NnAlgorithm::KdTree, DistanceMetric::Euclidean, 1.0)
            .find_friends()
            .unwrap();
        assert_eq!(vec![0, 2], friends[1]);
    }

    #[test]
    fn duplicate_points_are_friends_at_zero_radius() {
        let data = vec![vec![1.0_f32, 1.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let friends = RadiusNeighbours::new(&data, &NnAlgorithm::BruteForce, DistanceMetric::Manhattan, 0.0)
            .find_friends()
            .unwrap();
        assert_eq!(vec![vec![1], vec![0], vec![]], friends);
    }
}
