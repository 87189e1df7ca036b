//! Fragmenting a tree into groups by linking its edges in ascending length order,
//! between a minimum and maximum linking length.
//!
//! Fragmentation is resumable: the [`ClusteringState`] returned by one call can be
//! passed to a later call with a wider window, and gives the same result as a single
//! call over the combined window.

use crate::union_find::UnionFind;
use crate::{GroupingError, NOISE};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, trace};

/// The half-open range of edge lengths `[min_length, max_length)` to link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawLinkingWindow<T>",
    bound(deserialize = "T: Float + Deserialize<'de>")
)]
pub struct LinkingWindow<T> {
    min_length: T,
    max_length: T,
}

/// Unchecked window bounds; deserialised windows pass through `LinkingWindow::new`.
#[derive(Deserialize)]
struct RawLinkingWindow<T> {
    min_length: T,
    max_length: T,
}

impl<T: Float> TryFrom<RawLinkingWindow<T>> for LinkingWindow<T> {
    type Error = GroupingError;

    fn try_from(raw: RawLinkingWindow<T>) -> Result<Self, Self::Error> {
        LinkingWindow::new(raw.min_length, raw.max_length)
    }
}

impl<T: Float> LinkingWindow<T> {
    /// Creates a window, failing unless `min_length < max_length`.
    pub fn new(min_length: T, max_length: T) -> Result<Self, GroupingError> {
        if min_length < max_length {
            Ok(LinkingWindow { min_length, max_length })
        } else {
            Err(GroupingError::InvalidWindow)
        }
    }

    pub fn min_length(&self) -> T {
        self.min_length
    }

    pub fn max_length(&self) -> T {
        self.max_length
    }
}

/// Group labels for every point and edge of a tree. -1 means ungrouped; the used
/// group ids are always exactly `0..n_groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteringState {
    group_id: Vec<i32>,
    edge_id: Vec<i32>,
    n_groups: usize,
}

impl ClusteringState {
    /// Rebuilds a state from point and edge labels, e.g. those returned by an earlier
    /// call to `fragment_tree`.
    pub fn from_labels(group_id: Vec<i32>, edge_id: Vec<i32>) -> Result<Self, GroupingError> {
        let n_groups = group_id
            .iter()
            .max()
            .map_or(0, |&max| usize::try_from(i64::from(max) + 1).unwrap_or(0));
        let state = ClusteringState { group_id, edge_id, n_groups };
        state.validate()?;
        Ok(state)
    }

    pub fn group_id(&self) -> &[i32] {
        &self.group_id
    }

    pub fn edge_id(&self) -> &[i32] {
        &self.edge_id
    }

    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    pub fn into_parts(self) -> (Vec<i32>, Vec<i32>) {
        (self.group_id, self.edge_id)
    }

    /// The member points of each group, and the ungrouped points.
    pub fn groups(&self) -> (Vec<Vec<usize>>, Vec<usize>) {
        labels_to_groups(&self.group_id, self.n_groups)
    }

    /// The member edges of each group, and the ungrouped edges.
    pub fn edge_groups(&self) -> (Vec<Vec<usize>>, Vec<usize>) {
        labels_to_groups(&self.edge_id, self.n_groups)
    }

    fn validate(&self) -> Result<(), GroupingError> {
        let mut used = vec![false; self.n_groups];
        for (point, &label) in self.group_id.iter().enumerate() {
            match self.slot_of(label) {
                Some(slot) => used[slot] = true,
                None if label == NOISE => {}
                None => {
                    return Err(GroupingError::InvalidState(format!(
                        "point {point} has label {label}, outside -1..{}",
                        self.n_groups
                    )))
                }
            }
        }
        if let Some(missing) = used.iter().position(|&is_used| !is_used) {
            return Err(GroupingError::InvalidState(format!(
                "group ids are not densely packed: no point has label {missing}"
            )));
        }
        for (edge, &label) in self.edge_id.iter().enumerate() {
            if label != NOISE && self.slot_of(label).is_none() {
                return Err(GroupingError::InvalidState(format!(
                    "edge {edge} has label {label}, outside -1..{}",
                    self.n_groups
                )));
            }
        }
        Ok(())
    }

    fn slot_of(&self, label: i32) -> Option<usize> {
        usize::try_from(label).ok().filter(|&slot| slot < self.n_groups)
    }
}

/// Counters describing a single fragmentation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FragmentStats {
    /// Edges whose length fell inside the window.
    pub edges_processed: usize,
    /// Groups started from two ungrouped points.
    pub groups_created: usize,
    /// Pairs of groups joined into one.
    pub merges: usize,
    /// The largest number of groups alive at any point during the call.
    pub peak_groups: usize,
}

/// A tree prepared for fragmentation: validated, with its edges sorted by length.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeFragmenter<'a, T> {
    n_points: usize,
    lengths: &'a [T],
    ends1: &'a [usize],
    ends2: &'a [usize],
    sorted_edges: Vec<usize>,
    min_edge_length: T,
    max_edge_length: T,
}

impl<'a, T: Float> TreeFragmenter<'a, T> {
    /// Prepares a tree for fragmentation.
    ///
    /// # Parameters
    /// * `n_points` - the number of points (nodes) in the tree.
    /// * `lengths` - the length of each edge; finite and non-negative.
    /// * `edge_ends` - the two endpoint arrays; edge `e` joins `edge_ends.0[e]` and
    ///                 `edge_ends.1[e]`.
    ///
    /// # Returns
    /// * The fragmenter, or an error if the arrays differ in length, the tree has no
    ///   edges, an endpoint is out of range, or a length is negative or non-finite.
    pub fn new(
        n_points: usize,
        lengths: &'a [T],
        edge_ends: (&'a [usize], &'a [usize]),
    ) -> Result<Self, GroupingError> {
        let (ends1, ends2) = edge_ends;
        if lengths.len() != ends1.len() || lengths.len() != ends2.len() {
            return Err(GroupingError::LengthMismatch(format!(
                "{} edge lengths were given for edge end arrays of lengths {} and {}",
                lengths.len(),
                ends1.len(),
                ends2.len()
            )));
        }
        if lengths.is_empty() {
            return Err(GroupingError::EmptyDataset);
        }
        if i32::try_from(n_points).is_err() {
            return Err(GroupingError::IndexOutOfRange(format!(
                "{n_points} points cannot be labelled with 32 bit group ids"
            )));
        }
        for (edge, (&a, &b)) in ends1.iter().zip(ends2).enumerate() {
            if a >= n_points || b >= n_points {
                return Err(GroupingError::IndexOutOfRange(format!(
                    "edge {edge} joins points {a} and {b}, but the tree has {n_points} points"
                )));
            }
        }
        if let Some(edge) = lengths
            .iter()
            .position(|&length| !length.is_finite() || length < T::zero())
        {
            return Err(GroupingError::InvalidEdgeLength(format!(
                "edge {edge} must have a finite, non-negative length"
            )));
        }

        let sorted_edges = sort_edges_by_length(lengths);
        let min_edge_length = lengths[sorted_edges[0]];
        let max_edge_length = lengths[sorted_edges[sorted_edges.len() - 1]];
        Ok(TreeFragmenter {
            n_points,
            lengths,
            ends1,
            ends2,
            sorted_edges,
            min_edge_length,
            max_edge_length,
        })
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn n_edges(&self) -> usize {
        self.lengths.len()
    }

    pub fn min_edge_length(&self) -> T {
        self.min_edge_length
    }

    pub fn max_edge_length(&self) -> T {
        self.max_edge_length
    }

    /// Edge indices in processing order: ascending length, ties broken by ascending
    /// edge index.
    pub fn sorted_edges(&self) -> &[usize] {
        &self.sorted_edges
    }

    /// Groups the points linked by edges with lengths inside `window`.
    ///
    /// # Parameters
    /// * `window` - the range of edge lengths to link.
    /// * `prior` - the state returned by an earlier call, to continue from. It is read,
    ///             never modified.
    ///
    /// # Returns
    /// * A new clustering state. Without a prior state, a window starting below the
    ///   shortest edge must end below the longest edge, or an error is returned since
    ///   the whole tree would form one group.
    pub fn fragment(
        &self,
        window: &LinkingWindow<T>,
        prior: Option<&ClusteringState>,
    ) -> Result<ClusteringState, GroupingError> {
        self.fragment_with_stats(window, prior).map(|(state, _stats)| state)
    }

    /// As `fragment`, also returning counters describing the call.
    pub fn fragment_with_stats(
        &self,
        window: &LinkingWindow<T>,
        prior: Option<&ClusteringState>,
    ) -> Result<(ClusteringState, FragmentStats), GroupingError> {
        match prior {
            Some(state) => self.validate_prior(state)?,
            None => self.validate_window(window)?,
        }

        let n_prior_groups = prior.map_or(0, ClusteringState::n_groups);
        let mut union_find = UnionFind::new(n_prior_groups);
        let mut point_slots: Vec<Option<usize>> = match prior {
            Some(state) => state.group_id.iter().map(|&g| state.slot_of(g)).collect(),
            None => vec![None; self.n_points],
        };
        let mut edge_slots: Vec<Option<usize>> = match prior {
            Some(state) => state.edge_id.iter().map(|&g| state.slot_of(g)).collect(),
            None => vec![None; self.n_edges()],
        };

        let mut stats = FragmentStats { peak_groups: n_prior_groups, ..FragmentStats::default() };
        let mut n_live_groups = n_prior_groups;

        for &edge in &self.sorted_edges[self.edge_range(window)] {
            let (a, b) = (self.ends1[edge], self.ends2[edge]);
            let slot_a = point_slots[a].map(|slot| union_find.find(slot));
            let slot_b = point_slots[b].map(|slot| union_find.find(slot));

            let slot = match (slot_a, slot_b) {
                (None, None) => {
                    let slot = union_find.make_set();
                    point_slots[a] = Some(slot);
                    point_slots[b] = Some(slot);
                    n_live_groups += 1;
                    stats.groups_created += 1;
                    stats.peak_groups = stats.peak_groups.max(n_live_groups);
                    slot
                }
                (Some(slot), None) => {
                    point_slots[b] = Some(slot);
                    slot
                }
                (None, Some(slot)) => {
                    point_slots[a] = Some(slot);
                    slot
                }
                (Some(slot_a), Some(slot_b)) if slot_a == slot_b => slot_a,
                (Some(slot_a), Some(slot_b)) => {
                    trace!(edge, slot_a, slot_b, "merging groups");
                    n_live_groups -= 1;
                    stats.merges += 1;
                    union_find.union(slot_a, slot_b)
                }
            };
            edge_slots[edge] = Some(slot);
            stats.edges_processed += 1;
        }

        let dense_ids = compact_group_ids(&mut union_find)?;
        let mut resolve = |slot: Option<usize>| match slot {
            Some(slot) => dense_ids[union_find.find(slot)],
            None => NOISE,
        };
        let group_id = point_slots.into_iter().map(&mut resolve).collect();
        let edge_id = edge_slots.into_iter().map(&mut resolve).collect();

        debug!(
            n_groups = n_live_groups,
            edges_processed = stats.edges_processed,
            groups_created = stats.groups_created,
            merges = stats.merges,
            "tree fragmentation complete"
        );
        let state = ClusteringState { group_id, edge_id, n_groups: n_live_groups };
        Ok((state, stats))
    }

    fn validate_window(&self, window: &LinkingWindow<T>) -> Result<(), GroupingError> {
        if window.min_length < self.min_edge_length && window.max_length >= self.max_edge_length {
            return Err(GroupingError::DegenerateWindow(String::from(
                "the window covers every edge of the tree",
            )));
        }
        Ok(())
    }

    fn validate_prior(&self, prior: &ClusteringState) -> Result<(), GroupingError> {
        if prior.group_id.len() != self.n_points {
            return Err(GroupingError::LengthMismatch(format!(
                "prior state labels {} points, but the tree has {}",
                prior.group_id.len(),
                self.n_points
            )));
        }
        if prior.edge_id.len() != self.n_edges() {
            return Err(GroupingError::LengthMismatch(format!(
                "prior state labels {} edges, but the tree has {}",
                prior.edge_id.len(),
                self.n_edges()
            )));
        }
        prior.validate()
    }

    fn edge_range(&self, window: &LinkingWindow<T>) -> Range<usize> {
        let start = self
            .sorted_edges
            .partition_point(|&edge| self.lengths[edge] < window.min_length);
        let end = self
            .sorted_edges
            .partition_point(|&edge| self.lengths[edge] < window.max_length);
        start..end
    }
}

/// Fragments a tree, optionally continuing from labels returned by an earlier call.
///
/// # Parameters
/// * `n_points` - the number of points in the tree.
/// * `lengths` - the length of each edge.
/// * `edge_ends` - the two endpoint arrays of the edges.
/// * `min_length`, `max_length` - edges with lengths in `[min_length, max_length)` are
///                                linked.
/// * `prior_group_id`, `prior_edge_id` - labels from an earlier call. Either both or
///                                       neither must be given.
///
/// # Returns
/// * The group label of every point and of every edge, -1 meaning ungrouped.
///
/// # Examples
/// ```
///use groupfinder::fragment_tree;
///
///let lengths = vec![1.0, 2.0, 5.0];
///let (ends1, ends2): (Vec<usize>, Vec<usize>) = (vec![0, 1, 2], vec![1, 2, 3]);
///let (group_id, edge_id) =
///    fragment_tree(4, &lengths, (&ends1, &ends2), 0.0, 3.0, None, None).unwrap();
///assert_eq!(vec![0, 0, 0, -1], group_id);
///assert_eq!(vec![0, 0, -1], edge_id);
/// ```
pub fn fragment_tree<T: Float>(
    n_points: usize,
    lengths: &[T],
    edge_ends: (&[usize], &[usize]),
    min_length: T,
    max_length: T,
    prior_group_id: Option<&[i32]>,
    prior_edge_id: Option<&[i32]>,
) -> Result<(Vec<i32>, Vec<i32>), GroupingError> {
    let fragmenter = TreeFragmenter::new(n_points, lengths, edge_ends)?;
    let window = LinkingWindow::new(min_length, max_length)?;
    let prior = match (prior_group_id, prior_edge_id) {
        (Some(group_id), Some(edge_id)) => Some(ClusteringState::from_labels(
            group_id.to_vec(),
            edge_id.to_vec(),
        )?),
        (None, None) => None,
        _ => return Err(GroupingError::IncompleteState),
    };
    let state = fragmenter.fragment(&window, prior.as_ref())?;
    Ok(state.into_parts())
}

fn sort_edges_by_length<T: Float>(lengths: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..lengths.len()).collect();
    // Lengths are validated finite, so the comparison is total
    order.sort_by(|&a, &b| {
        lengths[a]
            .partial_cmp(&lengths[b])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    order
}

/// Maps every root slot to a dense id, ordered by the root's birth.
fn compact_group_ids(union_find: &mut UnionFind) -> Result<Vec<i32>, GroupingError> {
    let mut roots: Vec<(usize, usize)> = Vec::new();
    for slot in 0..union_find.len() {
        if union_find.find(slot) == slot {
            roots.push((union_find.birth_of(slot), slot));
        }
    }
    roots.sort_unstable();

    let mut dense_ids = vec![NOISE; union_find.len()];
    for (id, &(_birth, root)) in roots.iter().enumerate() {
        dense_ids[root] = i32::try_from(id).map_err(|_| {
            GroupingError::InvalidState(format!("group id {id} does not fit in a label"))
        })?;
    }
    Ok(dense_ids)
}

fn labels_to_groups(labels: &[i32], n_groups: usize) -> (Vec<Vec<usize>>, Vec<usize>) {
    let mut groups = vec![Vec::new(); n_groups];
    let mut ungrouped = Vec::new();
    for (i, &label) in labels.iter().enumerate() {
        match usize::try_from(label).ok().and_then(|g| groups.get_mut(g)) {
            Some(group) => group.push(i),
            None => ungrouped.push(i),
        }
    }
    (groups, ungrouped)
}
