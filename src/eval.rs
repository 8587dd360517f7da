//! Accuracy evaluation and train/test splitting.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::info;

use crate::{
    bayes::NaiveBayesClassifier,
    error::{BayesError, Result},
    sample::Sample,
};

/// One prediction compared against the ground truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub predicted: String,
    pub actual: String,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        self.predicted == self.actual
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcomes: Vec<Outcome>,
    pub correct: usize,
}

impl Evaluation {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Fraction of correct predictions. Never computed over an empty test set.
    pub fn accuracy(&self) -> f64 {
        self.correct as f64 / self.total() as f64
    }

    pub fn error_rate(&self) -> f64 {
        1.0 - self.accuracy()
    }
}

/// Predicts every test sample and compares against its label.
pub fn evaluate(classifier: &NaiveBayesClassifier, test: &[Sample]) -> Result<Evaluation> {
    if test.is_empty() {
        return Err(BayesError::EmptyTestSet);
    }

    let mut outcomes = Vec::with_capacity(test.len());
    for (index, sample) in test.iter().enumerate() {
        let actual = sample
            .label
            .as_ref()
            .ok_or(BayesError::MissingLabel { index })?;
        let predicted = classifier.predict(&sample.features)?;

        outcomes.push(Outcome {
            predicted: predicted.to_string(),
            actual: actual.clone(),
        });
    }

    let correct = outcomes.iter().filter(|o| o.is_correct()).count();
    let evaluation = Evaluation { outcomes, correct };
    info!(
        correct,
        total = evaluation.total(),
        accuracy = evaluation.accuracy(),
        "evaluated test set"
    );

    Ok(evaluation)
}

fn check_ratio(ratio: f64) -> Result<()> {
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(())
    } else {
        Err(BayesError::InvalidRatio(ratio))
    }
}

/// The first `floor(len * ratio)` samples.
pub fn train_prefix(samples: &[Sample], ratio: f64) -> Result<&[Sample]> {
    check_ratio(ratio)?;
    let size = (samples.len() as f64 * ratio) as usize;
    Ok(&samples[..size])
}

/// Shuffles with a seeded generator, then cuts into `(train, test)` at `ratio`.
pub fn shuffle_split(samples: &[Sample], ratio: f64, seed: u64) -> Result<(Vec<Sample>, Vec<Sample>)> {
    check_ratio(ratio)?;

    let mut shuffled = samples.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let size = (shuffled.len() as f64 * ratio) as usize;
    let test = shuffled.split_off(size);

    Ok((shuffled, test))
}
