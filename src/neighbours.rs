//! Radius neighbour queries: for every point, the other points that lie within
//! a linking length of it.

use crate::GroupingError;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
pub(super) mod parallel;
pub(super) mod serial;

/// Below this many samples `NnAlgorithm::Auto` scans all pairs rather than
/// building a kd-tree.
const BRUTE_FORCE_N_SAMPLES_LIMIT: usize = 250;

/// The radius neighbour algorithm options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NnAlgorithm {
    /// The algorithm is selected internally based on the size of the input data
    Auto,
    /// Computes the distance between each point and all others
    BruteForce,
    /// K-dimensional tree algorithm.
    KdTree,
}

impl NnAlgorithm {
    fn resolve(&self, n_samples: usize) -> NnAlgorithm {
        match (self, n_samples) {
            (NnAlgorithm::Auto, usize::MIN..=BRUTE_FORCE_N_SAMPLES_LIMIT) => NnAlgorithm::BruteForce,
            (NnAlgorithm::Auto, _) => NnAlgorithm::KdTree,
            (algo, _) => algo.clone(),
        }
    }
}

/// Sorts a raw neighbour list and drops the query point itself.
fn finish_friends_list(point: usize, mut neighbours: Vec<usize>) -> Vec<usize> {
    neighbours.retain(|&other| other != point);
    neighbours.sort_unstable();
    neighbours.dedup();
    neighbours
}

fn kd_tree_error(err: kdtree::ErrorKind) -> GroupingError {
    match err {
        kdtree::ErrorKind::WrongDimension => {
            GroupingError::WrongDimension(String::from("kd-tree rejected a point's dimensionality"))
        }
        kdtree::ErrorKind::NonFiniteCoordinate => {
            GroupingError::NonFiniteCoordinate(String::from("kd-tree rejected a coordinate"))
        }
        kdtree::ErrorKind::ZeroCapacity => {
            GroupingError::NeighbourIndex(String::from("kd-tree capacity must be non-zero"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_resolves_on_size() {
        assert_eq!(NnAlgorithm::BruteForce, NnAlgorithm::Auto.resolve(10));
        assert_eq!(NnAlgorithm::KdTree, NnAlgorithm::Auto.resolve(10_000));
        assert_eq!(NnAlgorithm::KdTree, NnAlgorithm::KdTree.resolve(10));
    }

    #[test]
    fn kd_tree_errors_keep_their_meaning() {
        assert!(matches!(
            kd_tree_error(kdtree::ErrorKind::ZeroCapacity),
            GroupingError::NeighbourIndex(..)
        ));
        assert!(matches!(
            kd_tree_error(kdtree::ErrorKind::WrongDimension),
            GroupingError::WrongDimension(..)
        ));
        assert!(matches!(
            kd_tree_error(kdtree::ErrorKind::NonFiniteCoordinate),
            GroupingError::NonFiniteCoordinate(..)
        ));
    }

    #[test]
    fn finish_drops_self_and_sorts() {
        assert_eq!(vec![1, 4, 7], finish_friends_list(3, vec![7, 3, 1, 4, 4]));
    }
}
