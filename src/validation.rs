use crate::{FofParams, GroupingError};
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DataValidator<'a, T> {
    data: &'a [Vec<T>],
    params: &'a FofParams,
}

impl<'a, T: Float> DataValidator<'a, T> {
    pub(crate) fn new(data: &'a [Vec<T>], params: &'a FofParams) -> Self {
        Self { data, params }
    }

    /// An empty dataset is valid and simply yields no groups.
    pub(crate) fn validate_input_data(&self) -> Result<(), GroupingError> {
        self.validate_linking_length()?;
        validate_coordinates(self.data)
    }

    fn validate_linking_length(&self) -> Result<(), GroupingError> {
        let linking_length = self.params.linking_length;
        if !linking_length.is_finite() {
            return Err(GroupingError::InvalidLinkingLength(format!(
                "linking length must be finite, got {linking_length}"
            )));
        }
        if T::from(linking_length).is_none() {
            return Err(GroupingError::InvalidLinkingLength(format!(
                "linking length {linking_length} is not representable in the coordinate type"
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_coordinates<T: Float>(data: &[Vec<T>]) -> Result<(), GroupingError> {
    let Some(first) = data.first() else {
        return Ok(());
    };
    let dims_0th = first.len();
    if dims_0th == 0 {
        return Err(GroupingError::WrongDimension(String::from(
            "data points must have at least one dimension",
        )));
    }
    for (n, datapoint) in data.iter().enumerate() {
        if datapoint.iter().any(|element| !element.is_finite()) {
            return Err(GroupingError::NonFiniteCoordinate(format!(
                "{n}th vector contains non-finite element(s)"
            )));
        }
        let dims_nth = datapoint.len();
        if dims_nth != dims_0th {
            return Err(GroupingError::WrongDimension(format!(
                "0th data point has {dims_0th} dimensions, but {n}th has {dims_nth}"
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_members(
    groups: &[Vec<usize>],
    n_points: usize,
    what: &str,
) -> Result<(), GroupingError> {
    for (g, group) in groups.iter().enumerate() {
        if let Some(member) = group.iter().find(|&&member| member >= n_points) {
            return Err(GroupingError::IndexOutOfRange(format!(
                "group {g} contains point {member}, but the {what} only has {n_points} entries"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_is_valid() {
        let params = FofParams::new(1.0);
        let data: Vec<Vec<f64>> = Vec::new();
        assert!(DataValidator::new(&data, &params).validate_input_data().is_ok());
    }

    #[test]
    fn nan_coordinate() {
        let params = FofParams::new(1.0);
        let data = vec![vec![0.0, 1.0], vec![f64::NAN, 1.0]];
        let result = DataValidator::new(&data, &params).validate_input_data();
        assert!(matches!(result, Err(GroupingError::NonFiniteCoordinate(..))));
    }

    #[test]
    fn zero_dimensions() {
        let data: Vec<Vec<f32>> = vec![vec![], vec![]];
        assert!(matches!(
            validate_coordinates(&data),
            Err(GroupingError::WrongDimension(..))
        ));
    }

    #[test]
    fn infinite_linking_length() {
        let params = FofParams::new(f64::INFINITY);
        let data = vec![vec![0.0_f32, 1.0]];
        let result = DataValidator::new(&data, &params).validate_input_data();
        assert!(matches!(result, Err(GroupingError::InvalidLinkingLength(..))));
    }

    #[test]
    fn member_out_of_range() {
        let groups = vec![vec![0, 1], vec![2, 5]];
        let result = validate_members(&groups, 4, "attribute array");
        assert!(matches!(result, Err(GroupingError::IndexOutOfRange(..))));
        assert!(validate_members(&groups, 6, "attribute array").is_ok());
    }
}
