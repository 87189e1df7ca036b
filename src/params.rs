use crate::distance::DistanceMetric;
use crate::neighbours::NnAlgorithm;
use serde::{Deserialize, Serialize};
use tracing::warn;

// Defaults for parameters
const DISTANCE_METRIC_DEFAULT: DistanceMetric = DistanceMetric::Euclidean;
const NN_ALGORITHM_DEFAULT: NnAlgorithm = NnAlgorithm::Auto;

// Valid minimums/left bounds of parameters
const LINKING_LENGTH_MINIMUM: f64 = 0.0;

/// A wrapper around the parameters used in friends-of-friends grouping.
/// The linking length is the only required parameter; use `FofParams::new` to
/// accept the defaults for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FofParams {
    pub(crate) linking_length: f64,
    pub(crate) dist_metric: DistanceMetric,
    pub(crate) nn_algo: NnAlgorithm,
}

/// Builder object to set custom parameters.
#[derive(Debug, Clone)]
pub struct FofParamBuilder {
    linking_length: f64,
    dist_metric: Option<DistanceMetric>,
    nn_algo: Option<NnAlgorithm>,
}

impl FofParams {
    /// Creates a parameter set with the given linking length and default settings
    /// for everything else.
    ///
    /// # Parameters
    /// * `linking_length` - the maximum distance at which two points are direct friends
    pub fn new(linking_length: f64) -> Self {
        Self::builder(linking_length).build()
    }

    /// Enters the builder pattern, allowing custom parameters to be set using
    /// various setter methods.
    ///
    /// # Parameters
    /// * `linking_length` - the maximum distance at which two points are direct friends
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn builder(linking_length: f64) -> FofParamBuilder {
        FofParamBuilder {
            linking_length: FofParamBuilder::validate_input_left_bound(
                linking_length,
                LINKING_LENGTH_MINIMUM,
                "linking_length",
            ),
            dist_metric: None,
            nn_algo: None,
        }
    }

    /// The configured linking length.
    pub fn linking_length(&self) -> f64 {
        self.linking_length
    }

    /// The configured distance metric.
    pub fn dist_metric(&self) -> DistanceMetric {
        self.dist_metric
    }

    /// The configured nearest neighbour algorithm.
    pub fn nn_algorithm(&self) -> &NnAlgorithm {
        &self.nn_algo
    }
}

impl FofParamBuilder {
    /// Overrides the linking length given to `FofParams::builder`.
    ///
    /// # Parameters
    /// * linking_length - the maximum distance at which two points are direct friends
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn linking_length(mut self, linking_length: f64) -> FofParamBuilder {
        self.linking_length =
            Self::validate_input_left_bound(linking_length, LINKING_LENGTH_MINIMUM, "linking_length");
        self
    }

    /// Sets the distance metric used to decide whether two points are within a
    /// linking length of each other. Defaults to Euclidean.
    ///
    /// # Parameters
    /// * dist_metric - the distance metric
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn dist_metric(mut self, dist_metric: DistanceMetric) -> FofParamBuilder {
        self.dist_metric = Some(dist_metric);
        self
    }

    /// Sets the algorithm used for the radius neighbour query. The results are
    /// identical across algorithms, so the main reason to change this is performance.
    /// BruteForce compares every pair of points, which is fine for small datasets
    /// but scales poorly. Defaults to Auto, whereby the algorithm is chosen based on
    /// the size of the input data.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn nn_algorithm(mut self, nn_algorithm: NnAlgorithm) -> FofParamBuilder {
        self.nn_algo = Some(nn_algorithm);
        self
    }

    /// Finishes the building of the parameter configuration.
    ///
    /// # Returns
    /// * The completed friends-of-friends parameter configuration.
    pub fn build(self) -> FofParams {
        FofParams {
            linking_length: self.linking_length,
            dist_metric: self.dist_metric.unwrap_or(DISTANCE_METRIC_DEFAULT),
            nn_algo: self.nn_algo.unwrap_or(NN_ALGORITHM_DEFAULT),
        }
    }

    fn validate_input_left_bound(input_param: f64, left_bound: f64, param: &str) -> f64 {
        if input_param < left_bound {
            warn!(
                "{param} ({input_param}) cannot be lower than {left_bound}. Set to {left_bound}."
            );
            left_bound
        } else {
            input_param
        }
    }
}
