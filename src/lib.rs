//! Friends-of-friends grouping and tree fragmentation for spatial point sets in Rust.
//! Generic over floating point numeric types.
//!
//! Two families of grouping are provided:
//!  1. Friends-of-friends: points closer than a linking length are "friends", and groups
//!     are the sets of points connected through chains of friends. Points with no
//!     friends belong to no group. The same closure can be run over an explicit edge
//!     list, e.g. the edges of a spanning tree; and
//!  2. Tree fragmentation: the edges of a tree are linked in ascending length order
//!     between a minimum and maximum linking length, splitting the tree into
//!     fragments. The resulting labels can be fed back in to continue with a wider
//!     window.
//!
//! Group ids are always dense, starting at 0. Points or edges outside every group are
//! labelled -1.
//!
//! # Examples
//! ```
//!use groupfinder::{cluster_by_radius, group_statistic};
//!
//!let data: Vec<Vec<f64>> = vec![
//!    vec![0.0, 0.0],
//!    vec![1.0, 0.0],
//!    vec![2.0, 0.0],
//!    vec![10.0, 0.0],
//!    vec![11.0, 0.0],
//!];
//!let groups = cluster_by_radius(&data, 1.5).unwrap();
//!assert_eq!(groups, vec![vec![0, 1, 2], vec![3, 4]]);
//!
//!let x: Vec<f64> = data.iter().map(|point| point[0]).collect();
//!assert_eq!(group_statistic(&groups, &x, None).unwrap(), vec![1.0, 10.5]);
//! ```
//!
//! ```
//!use groupfinder::{LinkingWindow, TreeFragmenter};
//!
//!// A path 0 - 1 - 2 - 3 with edge lengths 1, 2 and 5
//!let lengths = vec![1.0, 2.0, 5.0];
//!let (ends1, ends2): (Vec<usize>, Vec<usize>) = (vec![0, 1, 2], vec![1, 2, 3]);
//!let fragmenter = TreeFragmenter::new(4, &lengths, (&ends1, &ends2)).unwrap();
//!
//!let short = fragmenter.fragment(&LinkingWindow::new(0.0, 1.5).unwrap(), None).unwrap();
//!assert_eq!(short.group_id(), &[0, 0, -1, -1]);
//!
//!let wider = fragmenter
//!    .fragment(&LinkingWindow::new(1.5, 3.0).unwrap(), Some(&short))
//!    .unwrap();
//!assert_eq!(wider.group_id(), &[0, 0, 0, -1]);
//!assert_eq!(wider.edge_id(), &[0, 0, -1]);
//! ```

use num_traits::Float;

pub use crate::distance::DistanceMetric;
pub use crate::error::{ErrorKind, GroupingError};
pub use crate::fof::{
    friends_to_groups, grouped_points, labels_from_groups, ungrouped_points, Catalogue,
    GroupFinder,
};
pub use crate::fragment::{
    fragment_tree, ClusteringState, FragmentStats, LinkingWindow, TreeFragmenter,
};
pub use crate::friends::Friends;
pub use crate::graph::{cluster_by_edges, friends_in_groups, group_edges, GroupEdges};
pub use crate::neighbours::NnAlgorithm;
pub use crate::params::{FofParamBuilder, FofParams};
pub use crate::statistics::{group_centroids, group_statistic};

mod distance;
mod error;
mod fof;
mod fragment;
mod friends;
mod graph;
mod neighbours;
mod params;
mod statistics;
mod union_find;
mod validation;

/// The label of a point or edge that belongs to no group.
pub const NOISE: i32 = -1;

/// Groups positions by friends-of-friends with the given linking length, using the
/// Euclidean distance and the default neighbour search.
///
/// # Parameters
/// * `coords` - the positions, one vector of coordinates per point.
/// * `linking_length` - points within this distance of each other are friends.
///
/// # Returns
/// * The sorted member indices of each group, ordered by lowest member. Points with no
///   friends are in no group.
pub fn cluster_by_radius<T: Float + Send + Sync>(
    coords: &[Vec<T>],
    linking_length: f64,
) -> Result<Vec<Vec<usize>>, GroupingError> {
    GroupFinder::with_linking_length(coords, linking_length).cluster()
}
