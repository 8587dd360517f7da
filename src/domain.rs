//! Feature domain registry.
//!
//! A classifier is either closed-world, where every feature position has a
//! declared set of legal values fixed at construction, or open-world, where the
//! domain of each feature is whatever the training set contains. The domain is
//! only used to size the Laplace smoothing denominator.

use std::collections::BTreeSet;

use crate::error::{BayesError, Result};

/// The declared values of a single feature position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDomain {
    name: String,
    values: BTreeSet<String>,
}

impl FeatureDomain {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FeatureDomain {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }
}

/// Domain configuration handed to a classifier at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureDomains {
    declared: Option<Vec<FeatureDomain>>,
    labels: Option<BTreeSet<String>>,
}

impl FeatureDomains {
    /// Domains are discovered from the training data and frozen once training ends.
    pub fn open() -> Self {
        FeatureDomains::default()
    }

    /// Domains are declared up front. Every feature must allow at least one value.
    pub fn closed(domains: Vec<FeatureDomain>) -> Result<Self> {
        if let Some(feature) = domains.iter().position(|d| d.cardinality() == 0) {
            return Err(BayesError::ZeroDomainCardinality { feature });
        }

        Ok(FeatureDomains {
            declared: Some(domains),
            labels: None,
        })
    }

    /// Restricts training to the given label set.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_closed(&self) -> bool {
        self.declared.is_some()
    }

    /// Number of declared features, or `None` when open-world.
    pub fn arity(&self) -> Option<usize> {
        self.declared.as_ref().map(Vec::len)
    }

    pub fn feature(&self, feature: usize) -> Option<&FeatureDomain> {
        self.declared.as_ref().and_then(|d| d.get(feature))
    }

    pub fn feature_name(&self, feature: usize) -> Option<&str> {
        self.feature(feature).map(FeatureDomain::name)
    }

    /// Declared cardinality `V` of a feature; `None` when open-world.
    pub fn cardinality(&self, feature: usize) -> Option<usize> {
        self.feature(feature).map(FeatureDomain::cardinality)
    }

    pub fn declared_labels(&self) -> Option<&BTreeSet<String>> {
        self.labels.as_ref()
    }

    /// Checks that a training sample fits the declared domains.
    pub(crate) fn check_training_sample(&self, features: &[String], label: &str) -> Result<()> {
        if let Some(labels) = &self.labels {
            if !labels.contains(label) {
                return Err(BayesError::UnknownLabel(label.to_string()));
            }
        }

        if let Some(declared) = &self.declared {
            if declared.len() != features.len() {
                return Err(BayesError::DimensionMismatch {
                    expected: declared.len(),
                    actual: features.len(),
                });
            }
            for (feature, (domain, value)) in declared.iter().zip(features).enumerate() {
                if !domain.contains(value) {
                    return Err(BayesError::ValueOutsideDomain {
                        feature,
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn robot_domains() -> Vec<FeatureDomain> {
        vec![
            FeatureDomain::new("eye_color", ["red", "blue", "yellow"]),
            FeatureDomain::new("mode", ["truck", "car", "jet", "animal"]),
            FeatureDomain::new("skill", ["repair", "scout", "supply", "attack"]),
        ]
    }

    #[test]
    fn test_closed_domains_report_cardinality() {
        let domains = FeatureDomains::closed(robot_domains()).unwrap();
        assert!(domains.is_closed());
        assert_eq!(domains.arity(), Some(3));
        assert_eq!(domains.cardinality(0), Some(3));
        assert_eq!(domains.cardinality(2), Some(4));
        assert_eq!(domains.cardinality(3), None);
        assert_eq!(domains.feature_name(1), Some("mode"));
    }

    #[test]
    fn test_duplicate_values_collapse() {
        let domain = FeatureDomain::new("eye_color", ["red", "red", "blue"]);
        assert_eq!(domain.cardinality(), 2);
    }

    #[test]
    fn test_zero_cardinality_rejected() {
        let mut domains = robot_domains();
        domains.push(FeatureDomain::new("armor", Vec::<String>::new()));
        assert_eq!(
            FeatureDomains::closed(domains),
            Err(BayesError::ZeroDomainCardinality { feature: 3 })
        );
    }

    #[test]
    fn test_open_domains_have_no_cardinality() {
        let domains = FeatureDomains::open();
        assert!(!domains.is_closed());
        assert_eq!(domains.arity(), None);
        assert_eq!(domains.cardinality(0), None);
    }

    #[test]
    fn test_training_sample_checks() {
        let domains = FeatureDomains::closed(robot_domains())
            .unwrap()
            .with_labels(["good", "evil"]);
        let ok: Vec<String> = ["red", "jet", "scout"].map(String::from).to_vec();
        assert!(domains.check_training_sample(&ok, "good").is_ok());

        assert_eq!(
            domains.check_training_sample(&ok, "neutral"),
            Err(BayesError::UnknownLabel("neutral".into()))
        );

        let bad: Vec<String> = ["red", "boat", "scout"].map(String::from).to_vec();
        assert_eq!(
            domains.check_training_sample(&bad, "evil"),
            Err(BayesError::ValueOutsideDomain {
                feature: 1,
                value: "boat".into()
            })
        );

        let short: Vec<String> = ["red", "jet"].map(String::from).to_vec();
        assert_eq!(
            domains.check_training_sample(&short, "evil"),
            Err(BayesError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }
}
