use crate::validation::validate_members;
use crate::GroupingError;
use num_traits::Float;

/// Calculates the mean of a per-point attribute over the members of each group.
///
/// # Parameters
/// * `groups` - the member indices of each group, as returned by the clusterers.
/// * `attribute` - the attribute value of every point, indexed by point.
/// * `weights` - optional per-point weights. When given, each group value is the
///               weighted mean `sum(attr * w) / sum(w)`.
///
/// # Returns
/// * One value per group, in group order. An error is returned if a member index lies
///   outside `attribute`, if `weights` and `attribute` differ in length, if a group is
///   empty, or if the weights of a group sum to zero.
///
/// # Examples
/// ```
///use groupfinder::group_statistic;
///
///let groups = vec![vec![0, 1], vec![2, 3, 4]];
///let mass = vec![1.0, 3.0, 2.0, 4.0, 6.0];
///assert_eq!(vec![2.0, 4.0], group_statistic(&groups, &mass, None).unwrap());
///
///let weights = vec![3.0, 1.0, 1.0, 1.0, 2.0];
///assert_eq!(vec![1.5, 4.5], group_statistic(&groups, &mass, Some(weights.as_slice())).unwrap());
/// ```
pub fn group_statistic<T: Float>(
    groups: &[Vec<usize>],
    attribute: &[T],
    weights: Option<&[T]>,
) -> Result<Vec<T>, GroupingError> {
    if let Some(weights) = weights {
        if weights.len() != attribute.len() {
            return Err(GroupingError::LengthMismatch(format!(
                "{} weights were given for {} attribute values",
                weights.len(),
                attribute.len()
            )));
        }
    }
    validate_members(groups, attribute.len(), "attribute array")?;

    groups
        .iter()
        .enumerate()
        .map(|(group, members)| {
            if members.is_empty() {
                return Err(GroupingError::EmptyGroup { group });
            }
            match weights {
                None => Ok(mean(members.iter().map(|&i| attribute[i]), members.len())),
                Some(weights) => weighted_mean(group, members, attribute, weights),
            }
        })
        .collect()
}

/// Calculates the element-wise mean position of each group. The output is not
/// guaranteed to be an observed data point.
///
/// # Parameters
/// * `data` - the coordinates of every point.
/// * `groups` - the member indices of each group.
///
/// # Returns
/// * A vector of centroids, of shape num groups by num dimensions. The index of the
///   centroid is the group id.
pub fn group_centroids<T: Float>(
    data: &[Vec<T>],
    groups: &[Vec<usize>],
) -> Result<Vec<Vec<T>>, GroupingError> {
    validate_members(groups, data.len(), "dataset")?;
    let n_dims = data.first().map_or(0, Vec::len);

    let mut centroids = Vec::with_capacity(groups.len());
    for (group, members) in groups.iter().enumerate() {
        if members.is_empty() {
            return Err(GroupingError::EmptyGroup { group });
        }
        let centroid = (0..n_dims)
            .map(|dim| mean(members.iter().map(|&i| data[i][dim]), members.len()))
            .collect();
        centroids.push(centroid);
    }
    Ok(centroids)
}

fn mean<T: Float>(values: impl Iterator<Item = T>, count: usize) -> T {
    let sum = values.fold(T::zero(), std::ops::Add::add);
    // Group sizes are always representable in a float
    sum / T::from(count).unwrap_or_else(T::one)
}

fn weighted_mean<T: Float>(
    group: usize,
    members: &[usize],
    attribute: &[T],
    weights: &[T],
) -> Result<T, GroupingError> {
    let (weighted_sum, weight_sum) = members.iter().fold(
        (T::zero(), T::zero()),
        |(weighted_sum, weight_sum), &i| {
            (weighted_sum + attribute[i] * weights[i], weight_sum + weights[i])
        },
    );
    if weight_sum == T::zero() {
        return Err(GroupingError::ZeroWeightSum { group });
    }
    Ok(weighted_sum / weight_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn unweighted_mean() {
        let groups = vec![vec![0, 2], vec![1]];
        let values = vec![1.0_f32, 5.0, 3.0];
        assert_eq!(vec![2.0, 5.0], group_statistic(&groups, &values, None).unwrap());
    }

    #[test]
    fn zero_weight_sum_is_a_numeric_hazard() {
        let groups = vec![vec![0, 1], vec![2, 3]];
        let values = vec![1.0, 2.0, 3.0, 4.0];
        let weights = vec![1.0, 1.0, 1.0, -1.0];
        let err = group_statistic(&groups, &values, Some(weights.as_slice())).unwrap_err();
        assert_eq!(GroupingError::ZeroWeightSum { group: 1 }, err);
        assert_eq!(ErrorKind::NumericHazard, err.kind());
    }

    #[test]
    fn empty_group() {
        let groups = vec![vec![0], vec![]];
        let values = vec![1.0_f64];
        let err = group_statistic(&groups, &values, None).unwrap_err();
        assert_eq!(GroupingError::EmptyGroup { group: 1 }, err);
    }

    #[test]
    fn mismatched_weights() {
        let groups = vec![vec![0]];
        let values = vec![1.0_f64, 2.0];
        let weights = vec![1.0_f64];
        let result = group_statistic(&groups, &values, Some(weights.as_slice()));
        assert!(matches!(result, Err(GroupingError::LengthMismatch(..))));
    }

    #[test]
    fn member_outside_attribute() {
        let groups = vec![vec![0, 4]];
        let values = vec![1.0_f64, 2.0];
        let result = group_statistic(&groups, &values, None);
        assert!(matches!(result, Err(GroupingError::IndexOutOfRange(..))));
    }

    #[test]
    fn centroids() {
        let data = vec![
            vec![0.0, 0.0],
            vec![2.0, 0.0],
            vec![1.0, 3.0],
            vec![10.0, 10.0],
            vec![12.0, 10.0],
        ];
        let groups = vec![vec![0, 1, 2], vec![3, 4]];
        let centroids = group_centroids(&data, &groups).unwrap();
        assert_eq!(vec![vec![1.0, 1.0], vec![11.0, 10.0]], centroids);
    }
}
