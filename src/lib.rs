//! Categorical Naive Bayes classification.
//!
//! Training counts how often each class and each `(feature, value, class)`
//! combination occurs. Prediction scores every trained class in log space from
//! its prior and Laplace-smoothed conditionals, and returns the best one.
//!
//! ```
//! use categorical_bayes::{NaiveBayesClassifier, Sample};
//!
//! let mut classifier = NaiveBayesClassifier::default();
//! classifier.train(&[
//!     Sample::labeled(["sunny", "hot"], "beach"),
//!     Sample::labeled(["rainy", "cold"], "stay_home"),
//! ])?;
//! assert_eq!(classifier.predict(&["sunny", "hot"])?, "beach");
//! # Ok::<(), categorical_bayes::BayesError>(())
//! ```

pub mod bayes;
pub mod counts;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod eval;
pub mod interactive;
pub mod loader;
pub mod sample;

pub use bayes::NaiveBayesClassifier;
pub use counts::CountStore;
pub use domain::{FeatureDomain, FeatureDomains};
pub use error::{BayesError, Result};
pub use estimate::{Estimator, LAPLACE_K};
pub use eval::{evaluate, shuffle_split, train_prefix, Evaluation, Outcome};
pub use sample::Sample;
