//! Turns raw counts into smoothed probabilities.

use crate::{
    counts::CountStore,
    domain::FeatureDomains,
    error::{BayesError, Result},
};

/// Additive (Laplace) smoothing constant.
pub const LAPLACE_K: f64 = 1.0;

/// Read-only view over a trained [`CountStore`] and its domain configuration.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    counts: &'a CountStore,
    domains: &'a FeatureDomains,
}

impl<'a> Estimator<'a> {
    pub fn new(counts: &'a CountStore, domains: &'a FeatureDomains) -> Self {
        Estimator { counts, domains }
    }

    /// Domain cardinality `V` used to smooth the given feature.
    ///
    /// Closed-world domains use the declared size. Open-world domains use the
    /// number of distinct values seen during training, frozen at that point:
    /// values that only show up at prediction time never change it.
    pub fn cardinality(&self, feature: usize) -> usize {
        self.domains
            .cardinality(feature)
            .unwrap_or_else(|| self.counts.observed_cardinality(feature))
    }

    /// Training-set frequency of a label.
    ///
    /// A label that was declared but never observed has a prior of zero; any
    /// other unobserved label is an error.
    pub fn prior(&self, label: &str) -> Result<f64> {
        match self.counts.label_index(label) {
            Some(label) => Ok(self.prior_of(label)),
            None if self.is_declared(label) => Ok(0.0),
            None => Err(BayesError::UnknownLabel(label.to_string())),
        }
    }

    /// Smoothed probability of seeing `value` at position `feature` given `label`.
    pub fn conditional(&self, feature: usize, value: &str, label: &str) -> Result<f64> {
        let arity = self.counts.arity();
        if feature >= arity {
            return Err(BayesError::DimensionMismatch {
                expected: arity,
                actual: feature.saturating_add(1),
            });
        }
        let label = self
            .counts
            .label_index(label)
            .ok_or_else(|| BayesError::UnknownLabel(label.to_string()))?;

        Ok(self.conditional_of(feature, value, label))
    }

    /// Natural log of [`Estimator::prior`]; negative infinity for a declared but unseen label.
    pub fn log_prior(&self, label: &str) -> Result<f64> {
        self.prior(label).map(f64::ln)
    }

    /// Natural log of [`Estimator::conditional`]. Always finite.
    pub fn log_conditional(&self, feature: usize, value: &str, label: &str) -> Result<f64> {
        self.conditional(feature, value, label).map(f64::ln)
    }

    pub(crate) fn log_prior_of(&self, label: usize) -> f64 {
        self.prior_of(label).ln()
    }

    pub(crate) fn log_conditional_of(&self, feature: usize, value: &str, label: usize) -> f64 {
        self.conditional_of(feature, value, label).ln()
    }

    pub(crate) fn prior_of(&self, label: usize) -> f64 {
        self.counts.class_count(label) as f64 / self.counts.total_samples() as f64
    }

    // The denominator base is the class count, which equals the per-feature
    // total for that class since every sample counts once per feature.
    pub(crate) fn conditional_of(&self, feature: usize, value: &str, label: usize) -> f64 {
        let count = self.counts.count(feature, value, label) as f64;
        let class_total = self.counts.class_count(label) as f64;
        let v = self.cardinality(feature) as f64;

        (count + LAPLACE_K) / (class_total + LAPLACE_K * v)
    }

    fn is_declared(&self, label: &str) -> bool {
        self.domains
            .declared_labels()
            .is_some_and(|labels| labels.contains(label))
    }
}
