//! Grouping over an explicit edge list, e.g. the edges of a (fragmented) spanning
//! tree, plus the per-group edge listings derived from it.

use crate::fof::friends_to_groups;
use crate::validation::validate_members;
use crate::{Friends, GroupingError};

/// The edges of one group, listed per starting member.
///
/// `edge_end1[k]` is a member with at least one higher-index neighbour and
/// `edge_end2[k]` holds those neighbours, so every undirected edge appears once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupEdges {
    pub edge_end1: Vec<usize>,
    pub edge_end2: Vec<Vec<usize>>,
}

impl GroupEdges {
    /// Flattens the listing into `(lower, higher)` endpoint pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edge_end1
            .iter()
            .zip(&self.edge_end2)
            .flat_map(|(&start, ends)| ends.iter().map(move |&end| (start, end)))
    }

    pub fn n_edges(&self) -> usize {
        self.edge_end2.iter().map(Vec::len).sum()
    }
}

/// Groups points connected by an explicit edge list.
///
/// # Parameters
/// * `n_points` - the number of points.
/// * `edge_ends` - the two endpoint arrays of the edges.
///
/// # Returns
/// * The connected groups, in the same order and form as friends-of-friends grouping.
///   Points not touched by any edge are not in a group.
///
/// # Examples
/// ```
///use groupfinder::cluster_by_edges;
///
///let groups = cluster_by_edges(6, (&[0, 4, 1], &[1, 5, 2])).unwrap();
///assert_eq!(vec![vec![0, 1, 2], vec![4, 5]], groups);
/// ```
pub fn cluster_by_edges(
    n_points: usize,
    edge_ends: (&[usize], &[usize]),
) -> Result<Vec<Vec<usize>>, GroupingError> {
    let friends = Friends::from_edges(n_points, edge_ends)?;
    Ok(friends_to_groups(&friends))
}

/// For every member of every group, the member's friends with a higher index than
/// its own.
pub fn friends_in_groups(
    friends: &Friends,
    groups: &[Vec<usize>],
) -> Result<Vec<Vec<Vec<usize>>>, GroupingError> {
    validate_members(groups, friends.n_points(), "friends relation")?;
    Ok(groups
        .iter()
        .map(|members| {
            members
                .iter()
                .map(|&member| {
                    friends
                        .of(member)
                        .iter()
                        .copied()
                        .filter(|&friend| friend > member)
                        .collect()
                })
                .collect()
        })
        .collect())
}

/// Lists the edges inside each group.
///
/// # Parameters
/// * `groups` - the groups, typically from `cluster_by_edges`.
/// * `friends` - the adjacency the groups were built from.
///
/// # Examples
/// ```
///use groupfinder::{cluster_by_edges, group_edges, Friends};
///
///let ends = (&[0_usize, 1, 1][..], &[1_usize, 2, 3][..]);
///let friends = Friends::from_edges(4, ends).unwrap();
///let groups = cluster_by_edges(4, ends).unwrap();
///let edges = group_edges(&groups, &friends).unwrap();
///assert_eq!(vec![0, 1], edges[0].edge_end1);
///assert_eq!(vec![vec![1], vec![2, 3]], edges[0].edge_end2);
/// ```
pub fn group_edges(
    groups: &[Vec<usize>],
    friends: &Friends,
) -> Result<Vec<GroupEdges>, GroupingError> {
    let higher_friends = friends_in_groups(friends, groups)?;
    Ok(groups
        .iter()
        .zip(higher_friends)
        .map(|(members, higher)| {
            let mut edges = GroupEdges::default();
            for (&member, ends) in members.iter().zip(higher) {
                if !ends.is_empty() {
                    edges.edge_end1.push(member);
                    edges.edge_end2.push(ends);
                }
            }
            edges
        })
        .collect())
}
