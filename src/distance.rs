use num_traits::Float;
use serde::{Deserialize, Serialize};

/// How the separation of two points is measured when testing them against the
/// linking length. Two points are friends when their distance is at most the
/// linking length, whichever metric is used.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Straight line separation.
    Euclidean,
    /// Sum of the absolute coordinate differences. Linking under this metric links
    /// more pairs along the axes than along the diagonals.
    Manhattan,
}

impl DistanceMetric {
    /// Whether `a` and `b` lie within `linking_length` of each other.
    pub(crate) fn links<T: Float>(&self, a: &[T], b: &[T], linking_length: T) -> bool {
        get_dist_func(self)(a, b) <= linking_length
    }
}

/// The metric as a plain function, in the form the kd-tree radius query takes.
pub(crate) fn get_dist_func<T: Float>(metric: &DistanceMetric) -> fn(&[T], &[T]) -> T {
    match metric {
        DistanceMetric::Euclidean => euclidean_distance,
        DistanceMetric::Manhattan => manhattan_distance,
    }
}

fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |sum, (&x, &y)| sum + (x - y).powi(2))
        .sqrt()
}

fn manhattan_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |sum, (&x, &y)| sum + (x - y).abs())
}
