#[cfg(feature = "parallel")]
use crate::neighbours::parallel::RadiusNeighboursPar;
use crate::neighbours::serial::RadiusNeighbours;
use crate::statistics::group_centroids;
use crate::validation::{validate_members, DataValidator};
use crate::{FofParams, Friends, GroupingError, NOISE};
use num_traits::Float;
use std::collections::VecDeque;
use tracing::debug;

/// Friends-of-friends group finding over a set of positions. Generic over floating
/// point numeric types.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFinder<'a, T> {
    data: &'a [Vec<T>],
    params: FofParams,
}

/// Group mean positions followed by the positions of every ungrouped point.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue<T> {
    pub group_positions: Vec<Vec<T>>,
    pub ungrouped_positions: Vec<Vec<T>>,
}

impl<T> Catalogue<T> {
    /// Concatenates group and ungrouped positions into one list.
    pub fn into_positions(self) -> Vec<Vec<T>> {
        let mut positions = self.group_positions;
        positions.extend(self.ungrouped_positions);
        positions
    }
}

impl<'a, T: Float + Send + Sync> GroupFinder<'a, T> {
    /// Creates a group finder using a custom parameter configuration.
    ///
    /// # Parameters
    /// * `data` - a reference to the positions to group, a collection of vectors of
    ///            floating point numbers. The vectors must all be of the same
    ///            dimensionality and contain only finite values.
    /// * `params` - the parameter configuration.
    ///
    /// # Examples
    /// ```
    ///use groupfinder::{DistanceMetric, FofParams, GroupFinder, NnAlgorithm};
    ///
    ///let data: Vec<Vec<f32>> = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]];
    ///let params = FofParams::builder(2.0)
    ///    .dist_metric(DistanceMetric::Manhattan)
    ///    .nn_algorithm(NnAlgorithm::KdTree)
    ///    .build();
    ///let finder = GroupFinder::new(&data, params);
    ///assert_eq!(vec![vec![0, 1]], finder.cluster().unwrap());
    /// ```
    pub fn new(data: &'a [Vec<T>], params: FofParams) -> Self {
        GroupFinder { data, params }
    }

    /// Creates a group finder with the given linking length and default parameters
    /// otherwise.
    pub fn with_linking_length(data: &'a [Vec<T>], linking_length: f64) -> Self {
        GroupFinder::new(data, FofParams::new(linking_length))
    }

    /// Finds the friends of every point: the other points within the linking length.
    pub fn find_friends(&self) -> Result<Friends, GroupingError> {
        let radius = self.validated_radius()?;
        let lists = RadiusNeighbours::new(
            self.data,
            &self.params.nn_algo,
            self.params.dist_metric,
            radius,
        )
        .find_friends()?;
        Ok(Friends::from_radius_query(lists))
    }

    /// Finds the friends of every point with a parallel radius query.
    #[cfg(feature = "parallel")]
    pub fn find_friends_par(&self) -> Result<Friends, GroupingError> {
        let radius = self.validated_radius()?;
        let lists = RadiusNeighboursPar::new(
            self.data,
            &self.params.nn_algo,
            self.params.dist_metric,
            radius,
        )
        .find_friends()?;
        Ok(Friends::from_radius_query(lists))
    }

    /// Groups the positions passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains the sorted member indices of each group,
    ///   ordered by their lowest member. Points with no friends are not in any group.
    ///   An error is returned if the dimensionality of the input vectors is mismatched,
    ///   if any vector contains non-finite coordinates, or if the linking length is not
    ///   finite.
    ///
    /// # Examples
    /// ```
    ///use groupfinder::GroupFinder;
    ///
    ///let data: Vec<Vec<f64>> = vec![
    ///    vec![0.0, 0.0],
    ///    vec![1.0, 0.0],
    ///    vec![2.0, 0.0],
    ///    vec![10.0, 0.0],
    ///    vec![11.0, 0.0],
    ///    vec![30.0, 0.0],
    ///];
    ///let finder = GroupFinder::with_linking_length(&data, 1.5);
    ///assert_eq!(vec![vec![0, 1, 2], vec![3, 4]], finder.cluster().unwrap());
    /// ```
    pub fn cluster(&self) -> Result<Vec<Vec<usize>>, GroupingError> {
        let friends = self.find_friends()?;
        Ok(friends_to_groups(&friends))
    }

    /// Groups the positions passed to the constructor, running the radius query in
    /// parallel. Not recommended for small datasets.
    #[cfg(feature = "parallel")]
    pub fn cluster_par(&self) -> Result<Vec<Vec<usize>>, GroupingError> {
        let friends = self.find_friends_par()?;
        Ok(friends_to_groups(&friends))
    }

    /// Calculates the mean position of each group.
    pub fn group_centroids(&self, groups: &[Vec<usize>]) -> Result<Vec<Vec<T>>, GroupingError> {
        group_centroids(self.data, groups)
    }

    /// Summarises the positions as one entry per group (its mean position) followed by
    /// every point that is not in a group.
    ///
    /// # Parameters
    /// * `groups` - the groups found by `GroupFinder::cluster`.
    /// * `friends` - the relation the groups were found from.
    pub fn catalogue(
        &self,
        groups: &[Vec<usize>],
        friends: &Friends,
    ) -> Result<Catalogue<T>, GroupingError> {
        if friends.n_points() != self.data.len() {
            return Err(GroupingError::LengthMismatch(format!(
                "friends cover {} points, but the dataset has {}",
                friends.n_points(),
                self.data.len()
            )));
        }
        let group_positions = self.group_centroids(groups)?;
        let ungrouped_positions = ungrouped_points(friends)
            .into_iter()
            .map(|point| self.data[point].clone())
            .collect();
        Ok(Catalogue { group_positions, ungrouped_positions })
    }

    fn validated_radius(&self) -> Result<T, GroupingError> {
        DataValidator::new(self.data, &self.params).validate_input_data()?;
        T::from(self.params.linking_length).ok_or_else(|| {
            GroupingError::InvalidLinkingLength(format!(
                "linking length {} is not representable in the coordinate type",
                self.params.linking_length
            ))
        })
    }
}

/// Splits a friends relation into its connected groups.
///
/// Points are scanned in ascending order; the first unvisited point with at least one
/// friend seeds a new group, which is grown breadth first through the friends lists
/// until no new members are found. Groups therefore come out ordered by their lowest
/// member, and each group's members are sorted. Points with no friends are left out.
pub fn friends_to_groups(friends: &Friends) -> Vec<Vec<usize>> {
    let n_points = friends.n_points();
    let mut visited = vec![false; n_points];
    let mut process_queue = VecDeque::new();
    let mut groups = Vec::new();

    for seed in 0..n_points {
        if visited[seed] || friends.of(seed).is_empty() {
            continue;
        }
        visited[seed] = true;
        process_queue.push_back(seed);
        let mut group = Vec::new();

        while let Some(point) = process_queue.pop_front() {
            group.push(point);
            for &friend in friends.of(point) {
                if !visited[friend] {
                    visited[friend] = true;
                    process_queue.push_back(friend);
                }
            }
        }
        group.sort_unstable();
        groups.push(group);
    }
    debug!(n_points, n_groups = groups.len(), "friends-of-friends grouping complete");
    groups
}

/// The points that have at least one friend and so belong to a group.
pub fn grouped_points(friends: &Friends) -> Vec<usize> {
    (0..friends.n_points())
        .filter(|&point| !friends.of(point).is_empty())
        .collect()
}

/// The points that have no friends and so belong to no group.
pub fn ungrouped_points(friends: &Friends) -> Vec<usize> {
    (0..friends.n_points())
        .filter(|&point| friends.of(point).is_empty())
        .collect()
}

/// Converts a list of groups into a label per point. Points outside every group are
/// labelled -1.
pub fn labels_from_groups(
    n_points: usize,
    groups: &[Vec<usize>],
) -> Result<Vec<i32>, GroupingError> {
    validate_members(groups, n_points, "dataset")?;
    let mut labels = vec![NOISE; n_points];
    for (group, members) in groups.iter().enumerate() {
        let label = i32::try_from(group).map_err(|_| {
            GroupingError::InvalidState(format!("group id {group} does not fit in a label"))
        })?;
        for &member in members {
            if labels[member] != NOISE {
                return Err(GroupingError::InvalidState(format!(
                    "point {member} is a member of groups {} and {group}",
                    labels[member]
                )));
            }
            labels[member] = label;
        }
    }
    Ok(labels)
}
