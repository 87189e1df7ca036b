//! The symmetric "friends" relation between points: who lies within a linking
//! length of whom, or who shares an edge with whom.

use crate::GroupingError;

/// Per point, the sorted indices of the other points it is directly linked to.
///
/// The relation is always symmetric and never contains a point in its own list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Friends {
    lists: Vec<Vec<usize>>,
}

impl Friends {
    /// Builds a relation from caller supplied neighbour lists.
    ///
    /// # Parameters
    /// * `lists` - for each point, the indices of its friends. The lists are sorted and
    ///             de-duplicated here, so any order is accepted.
    ///
    /// # Returns
    /// * The validated relation, or an error if an index is out of range, a point lists
    ///   itself, or the relation is not symmetric.
    pub fn new(mut lists: Vec<Vec<usize>>) -> Result<Self, GroupingError> {
        let n_points = lists.len();
        for (point, list) in lists.iter_mut().enumerate() {
            list.sort_unstable();
            list.dedup();
            if list.binary_search(&point).is_ok() {
                return Err(GroupingError::SelfFriend(point));
            }
            if let Some(&friend) = list.last().filter(|&&friend| friend >= n_points) {
                return Err(GroupingError::IndexOutOfRange(format!(
                    "point {point} lists friend {friend}, but there are only {n_points} points"
                )));
            }
        }
        let friends = Friends { lists };
        if let Some((a, b)) = friends.find_asymmetry() {
            return Err(GroupingError::AsymmetricFriends(format!(
                "{b} is a friend of {a}, but {a} is not a friend of {b}"
            )));
        }
        Ok(friends)
    }

    /// Lists produced by the radius query are sorted, self-free and symmetric by
    /// construction.
    pub(crate) fn from_radius_query(lists: Vec<Vec<usize>>) -> Self {
        Friends { lists }
    }

    /// Builds an undirected relation from an explicit edge list, adding each endpoint
    /// to the other's friends.
    ///
    /// # Parameters
    /// * `n_points` - the number of points the edges connect.
    /// * `edge_ends` - the two endpoint arrays; edge `e` joins `edge_ends.0[e]` and
    ///                 `edge_ends.1[e]`. Repeated edges collapse into one link.
    pub fn from_edges(
        n_points: usize,
        edge_ends: (&[usize], &[usize]),
    ) -> Result<Self, GroupingError> {
        let (ends1, ends2) = edge_ends;
        if ends1.len() != ends2.len() {
            return Err(GroupingError::LengthMismatch(format!(
                "edge end arrays have lengths {} and {}",
                ends1.len(),
                ends2.len()
            )));
        }
        let mut lists = vec![Vec::new(); n_points];
        for (edge, (&a, &b)) in ends1.iter().zip(ends2).enumerate() {
            if a >= n_points || b >= n_points {
                return Err(GroupingError::IndexOutOfRange(format!(
                    "edge {edge} joins points {a} and {b}, but there are only {n_points} points"
                )));
            }
            if a == b {
                return Err(GroupingError::SelfFriend(a));
            }
            lists[a].push(b);
            lists[b].push(a);
        }
        for list in lists.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Ok(Friends { lists })
    }

    /// The number of points covered by the relation.
    pub fn n_points(&self) -> usize {
        self.lists.len()
    }

    /// The friends of `point`, sorted ascending. Out of range points have no friends.
    pub fn of(&self, point: usize) -> &[usize] {
        self.lists.get(point).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The number of friends of each point.
    pub fn counts(&self) -> Vec<usize> {
        self.lists.iter().map(Vec::len).collect()
    }

    pub fn is_symmetric(&self) -> bool {
        self.find_asymmetry().is_none()
    }

    pub fn as_lists(&self) -> &[Vec<usize>] {
        &self.lists
    }

    pub fn into_lists(self) -> Vec<Vec<usize>> {
        self.lists
    }

    fn find_asymmetry(&self) -> Option<(usize, usize)> {
        self.lists.iter().enumerate().find_map(|(a, list)| {
            list.iter()
                .find(|&&b| self.of(b).binary_search(&a).is_err())
                .map(|&b| (a, b))
        })
    }
}
