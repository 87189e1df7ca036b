use thiserror::Error;

/// Broad classification of a [`GroupingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied malformed or inconsistent input.
    Validation,
    /// The input was well formed but the requested quantity is numerically undefined.
    NumericHazard,
}

/// Possible errors that arise due to issues with grouping input data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroupingError {
    #[error("The dataset provided is empty")]
    EmptyDataset,
    #[error("Input vectors have mismatched dimensions: {0}")]
    WrongDimension(String),
    #[error("Non finite coordinate: {0}")]
    NonFiniteCoordinate(String),
    #[error("Mismatched input lengths: {0}")]
    LengthMismatch(String),
    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),
    #[error("Invalid linking length: {0}")]
    InvalidLinkingLength(String),
    #[error("Invalid edge length: {0}")]
    InvalidEdgeLength(String),
    #[error("Minimum linking length must be smaller than the maximum linking length")]
    InvalidWindow,
    #[error("Linking length window leaves the tree unchanged: {0}")]
    DegenerateWindow(String),
    #[error("Both group ids and edge ids must be supplied to resume fragmentation")]
    IncompleteState,
    #[error("Invalid clustering state: {0}")]
    InvalidState(String),
    #[error("Friends relation is not symmetric: {0}")]
    AsymmetricFriends(String),
    #[error("Neighbour index error: {0}")]
    NeighbourIndex(String),
    #[error("Point {0} lists itself as a friend")]
    SelfFriend(usize),
    #[error("Weights of group {group} sum to zero")]
    ZeroWeightSum { group: usize },
    #[error("Group {group} has no members")]
    EmptyGroup { group: usize },
}

impl GroupingError {
    /// Whether the error is a caller input defect or a numerically undefined result.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GroupingError::ZeroWeightSum { .. } | GroupingError::EmptyGroup { .. } => {
                ErrorKind::NumericHazard
            }
            _ => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(ErrorKind::NumericHazard, GroupingError::ZeroWeightSum { group: 0 }.kind());
        assert_eq!(ErrorKind::NumericHazard, GroupingError::EmptyGroup { group: 3 }.kind());
        assert_eq!(ErrorKind::Validation, GroupingError::InvalidWindow.kind());
        assert_eq!(ErrorKind::Validation, GroupingError::SelfFriend(1).kind());
    }

    #[test]
    fn messages() {
        let err = GroupingError::ZeroWeightSum { group: 2 };
        assert_eq!("Weights of group 2 sum to zero", err.to_string());
        let err = GroupingError::WrongDimension(String::from("0th has 2, 1st has 3"));
        assert_eq!(
            "Input vectors have mismatched dimensions: 0th has 2, 1st has 3",
            err.to_string()
        );
    }
}
