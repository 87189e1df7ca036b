#![cfg(feature = "parallel")]
use super::{finish_friends_list, kd_tree_error, NnAlgorithm};
use crate::distance::{get_dist_func, DistanceMetric};
use crate::GroupingError;
use num_traits::Float;
use rayon::prelude::*;

pub(crate) struct RadiusNeighboursPar<'a, T> {
    data: &'a [Vec<T>],
    nn_algo: NnAlgorithm,
    dist_metric: DistanceMetric,
    radius: T,
}

impl<'a, T: Float + Send + Sync> RadiusNeighboursPar<'a, T> {
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
    fn find_friends<T: Float + Send + Sync>(
        data: &[Vec<T>],
        radius: T,
        dist_metric: DistanceMetric,
    ) -> Vec<Vec<usize>> {
        data.par_iter()
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
    fn find_friends<T: Float + Send + Sync>(
        data: &[Vec<T>],
        radius: T,
        dist_metric: DistanceMetric,
    ) -> Result<Vec<Vec<usize>>, GroupingError> {
        let mut tree: kdtree::KdTree<T, usize, &Vec<T>> = kdtree::KdTree::new(data[0].len());
        for (n, datapoint) in data.iter().enumerate() {
            tree.add(datapoint, n).map_err(kd_tree_error)?;
        }

        let dist_func = get_dist_func(&dist_metric);
        data.par_iter()
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
