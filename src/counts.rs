//! Occurrence counts gathered from a training set.
//!
//! Feature values are interned per feature position, and counts are stored under
//! a flat `(feature, value, label)` key. Reads never insert: a pair that was not
//! observed during training simply reads as zero.

use std::collections::{hash_map::Entry, BTreeSet, HashMap};

use tracing::debug;

use crate::{
    domain::FeatureDomains,
    error::{BayesError, Result},
    sample::Sample,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CountKey {
    feature: usize,
    value: usize,
    label: usize,
}

/// Class and per-feature counts of one training run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountStore {
    arity: usize,
    total_samples: u64,
    // Sorted ascending; a label's id is its position here.
    labels: Vec<String>,
    class_counts: Vec<u64>,
    vocab: Vec<HashMap<String, usize>>,
    feature_counts: HashMap<CountKey, u64>,
}

impl CountStore {
    /// Counts a whole training set. Nothing is built unless every sample is valid.
    pub fn from_samples(samples: &[Sample], domains: &FeatureDomains) -> Result<Self> {
        let first = samples.first().ok_or(BayesError::EmptyDataset)?;
        let arity = domains.arity().unwrap_or_else(|| first.arity());
        if arity == 0 {
            return Err(BayesError::NoFeatures);
        }

        // Validate everything before counting anything:
        let mut label_set = BTreeSet::new();
        for (index, sample) in samples.iter().enumerate() {
            if sample.arity() != arity {
                return Err(BayesError::DimensionMismatch {
                    expected: arity,
                    actual: sample.arity(),
                });
            }
            let label = sample
                .label
                .as_deref()
                .ok_or(BayesError::MissingLabel { index })?;
            domains.check_training_sample(&sample.features, label)?;
            label_set.insert(label);
        }

        let labels: Vec<String> = label_set.into_iter().map(str::to_string).collect();
        let mut store = CountStore {
            arity,
            total_samples: samples.len() as u64,
            class_counts: vec![0; labels.len()],
            labels,
            vocab: vec![HashMap::new(); arity],
            feature_counts: HashMap::new(),
        };

        for sample in samples {
            // Validated above.
            let Some(label) = sample.label.as_deref().and_then(|l| store.label_index(l)) else {
                continue;
            };
            store.class_counts[label] += 1;

            for (feature, value) in sample.features.iter().enumerate() {
                let vocab = &mut store.vocab[feature];
                let next_id = vocab.len();
                let value = match vocab.entry(value.clone()) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => *entry.insert(next_id),
                };

                *store
                    .feature_counts
                    .entry(CountKey {
                        feature,
                        value,
                        label,
                    })
                    .or_insert(0) += 1;
            }
        }

        debug!(
            samples = store.total_samples,
            labels = store.labels.len(),
            arity,
            "counted training set"
        );

        Ok(store)
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Trained labels in ascending order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()
    }

    /// Number of training samples carrying the label with the given id.
    pub fn class_count(&self, label: usize) -> u64 {
        self.class_counts.get(label).copied().unwrap_or(0)
    }

    /// Number of training samples with `value` at position `feature` and the given label id.
    pub fn count(&self, feature: usize, value: &str, label: usize) -> u64 {
        self.vocab
            .get(feature)
            .and_then(|vocab| vocab.get(value))
            .and_then(|&value| {
                self.feature_counts.get(&CountKey {
                    feature,
                    value,
                    label,
                })
            })
            .copied()
            .unwrap_or(0)
    }

    /// Sum of the counts of every observed value of a feature for one label.
    #[cfg(test)]
    fn feature_total(&self, feature: usize, label: usize) -> u64 {
        self.feature_counts
            .iter()
            .filter(|(key, _)| key.feature == feature && key.label == label)
            .map(|(_, &count)| count)
            .sum()
    }

    /// Number of distinct values seen for a feature during training.
    pub fn observed_cardinality(&self, feature: usize) -> usize {
        self.vocab.get(feature).map_or(0, HashMap::len)
    }

    pub fn observed_values(&self, feature: usize) -> Vec<&str> {
        let mut values: Vec<&str> = self
            .vocab
            .get(feature)
            .map(|vocab| vocab.keys().map(String::as_str).collect())
            .unwrap_or_default();
        values.sort_unstable();
        values
    }
}
