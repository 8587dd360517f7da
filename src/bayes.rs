use tracing::{debug, info};

use crate::{
    counts::CountStore,
    domain::FeatureDomains,
    error::{BayesError, Result},
    estimate::Estimator,
    sample::Sample,
};

/// Categorical Naive Bayes classifier with Laplace smoothing.
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesClassifier {
    domains: FeatureDomains,
    counts: Option<CountStore>,
}

impl NaiveBayesClassifier {
    /// Creates an untrained classifier over the given domains.
    pub fn new(domains: FeatureDomains) -> Self {
        NaiveBayesClassifier {
            domains,
            counts: None,
        }
    }

    /// Replaces all trained state with counts gathered from `samples`.
    ///
    /// On error the previously trained state, if any, is kept as is.
    pub fn train(&mut self, samples: &[Sample]) -> Result<()> {
        let counts = CountStore::from_samples(samples, &self.domains)?;

        info!(
            samples = counts.total_samples(),
            labels = counts.labels().len(),
            "trained classifier"
        );
        self.counts = Some(counts);

        Ok(())
    }

    pub fn is_trained(&self) -> bool {
        self.counts.is_some()
    }

    pub fn domains(&self) -> &FeatureDomains {
        &self.domains
    }

    pub fn counts(&self) -> Option<&CountStore> {
        self.counts.as_ref()
    }

    /// Feature arity fixed by the last successful training run.
    pub fn arity(&self) -> Option<usize> {
        self.counts.as_ref().map(CountStore::arity)
    }

    /// Candidate labels, in the order they are scored.
    pub fn labels(&self) -> &[String] {
        self.counts.as_ref().map_or(&[][..], CountStore::labels)
    }

    pub fn estimator(&self) -> Result<Estimator<'_>> {
        let counts = self.counts.as_ref().ok_or(BayesError::NotTrained)?;
        Ok(Estimator::new(counts, &self.domains))
    }

    /// Log-space posterior score of every trained label, in ascending label order.
    pub fn scores<S: AsRef<str>>(&self, features: &[S]) -> Result<Vec<(&str, f64)>> {
        let counts = self.counts.as_ref().ok_or(BayesError::NotTrained)?;
        if features.len() != counts.arity() {
            return Err(BayesError::DimensionMismatch {
                expected: counts.arity(),
                actual: features.len(),
            });
        }

        let estimator = Estimator::new(counts, &self.domains);
        let scores = counts
            .labels()
            .iter()
            .enumerate()
            .map(|(label, name)| {
                let likelihood = features
                    .iter()
                    .enumerate()
                    .fold(0.0, |acc, (feature, value)| {
                        acc + estimator.log_conditional_of(feature, value.as_ref(), label)
                    });
                (name.as_str(), estimator.log_prior_of(label) + likelihood)
            })
            .collect();

        Ok(scores)
    }

    /// Picks the label with the highest posterior score.
    ///
    /// Labels are scored in ascending order and a later label only wins with a
    /// strictly greater score, so exact ties go to the earliest label.
    pub fn predict<S: AsRef<str>>(&self, features: &[S]) -> Result<&str> {
        let scores = self.scores(features)?;

        let mut best: Option<(&str, f64)> = None;
        for (label, score) in scores {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((label, score)),
            }
        }

        let (label, score) = best.ok_or(BayesError::NotTrained)?;
        debug!(label, score, "prediction");

        Ok(label)
    }

    /// Predicts the label of a sample, ignoring any label it already carries.
    pub fn predict_sample(&self, sample: &Sample) -> Result<&str> {
        self.predict(&sample.features)
    }
}
