//! Errors raised by the classifier core.

use thiserror::Error;

/// Errors that can occur while configuring, training or querying a classifier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BayesError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("samples must have at least one feature")]
    NoFeatures,

    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("unknown label: {0}")]
    UnknownLabel(String),

    #[error("feature {feature} has an empty domain")]
    ZeroDomainCardinality { feature: usize },

    #[error("value {value:?} is not in the declared domain of feature {feature}")]
    ValueOutsideDomain { feature: usize, value: String },

    #[error("sample {index} has no label")]
    MissingLabel { index: usize },

    #[error("classifier has not been trained")]
    NotTrained,

    #[error("cannot evaluate against an empty test set")]
    EmptyTestSet,

    #[error("train ratio {0} must be in (0, 1]")]
    InvalidRatio(f64),
}

pub type Result<T> = std::result::Result<T, BayesError>;
