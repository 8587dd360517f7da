//! Prompt-driven classification of samples typed in by a user.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::bayes::NaiveBayesClassifier;

/// Prompts for every feature in turn and prints the predicted label.
///
/// With declared domains, a value outside the feature's domain is rejected and
/// prompted for again. Stops on end of input or when a `quit`/`exit` is entered. Returns how many
/// samples were classified.
pub fn run<R, W>(classifier: &NaiveBayesClassifier, mut input: R, mut output: W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let arity = classifier
        .arity()
        .context("classifier must be trained before prompting")?;
    let domains = classifier.domains();

    let mut classified = 0;
    loop {
        let mut features = Vec::with_capacity(arity);
        while features.len() < arity {
            let feature = features.len();
            match domains.feature(feature) {
                Some(domain) => {
                    let values: Vec<&str> = domain.values().collect();
                    write!(output, "{} ({}): ", domain.name(), values.join("/"))?;
                }
                None => write!(output, "feature {}: ", feature + 1)?,
            }
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(classified);
            }

            let token = line.trim();
            if matches!(token, "quit" | "exit") {
                return Ok(classified);
            }
            if token.is_empty() {
                continue;
            }
            if let Some(domain) = domains.feature(feature) {
                if !domain.contains(token) {
                    writeln!(output, "{:?} is not a declared {} value", token, domain.name())?;
                    continue;
                }
            }
            features.push(token.to_string());
        }

        let label = classifier.predict(&features)?;
        writeln!(output, "{} => {}", features.join(","), label)?;
        classified += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{FeatureDomain, FeatureDomains},
        sample::Sample,
    };

    fn weather() -> Vec<Sample> {
        vec![
            Sample::labeled(["sunny", "hot"], "beach"),
            Sample::labeled(["rainy", "cold"], "stay_home"),
            Sample::labeled(["cloudy", "cold"], "stay_home"),
        ]
    }

    #[test]
    fn test_prompts_until_eof() {
        let mut classifier = NaiveBayesClassifier::default();
        classifier.train(&weather()).unwrap();

        let mut out = Vec::new();
        let n = run(&classifier, "sunny\nhot\n\nrainy\ncold\nsunny\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(n, 2);
        assert!(out.contains("sunny,hot => beach"));
        assert!(out.contains("rainy,cold => stay_home"));
        assert!(out.starts_with("feature 1: feature 2: "));
    }

    #[test]
    fn test_quit_and_named_prompts() {
        let domains = FeatureDomains::closed(vec![
            FeatureDomain::new("sky", ["sunny", "rainy", "cloudy"]),
            FeatureDomain::new("temperature", ["hot", "cold"]),
        ])
        .unwrap();
        let mut classifier = NaiveBayesClassifier::new(domains);
        classifier.train(&weather()).unwrap();

        let mut out = Vec::new();
        let n = run(&classifier, "quit\nsunny\nhot\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(n, 0);
        assert_eq!(out, "sky (cloudy/rainy/sunny): ");
    }

    #[test]
    fn test_undeclared_value_is_prompted_again() {
        let domains = FeatureDomains::closed(vec![
            FeatureDomain::new("sky", ["sunny", "rainy", "cloudy"]),
            FeatureDomain::new("temperature", ["hot", "cold"]),
        ])
        .unwrap();
        let mut classifier = NaiveBayesClassifier::new(domains);
        classifier.train(&weather()).unwrap();

        let mut out = Vec::new();
        let n = run(&classifier, "suny\nsunny\nhot\n".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(n, 1);
        assert!(out.contains("\"suny\" is not a declared sky value"));
        assert_eq!(out.matches("sky (cloudy/rainy/sunny): ").count(), 3);
        assert!(out.contains("sunny,hot => beach"));
    }

    #[test]
    fn test_untrained_classifier() {
        let classifier = NaiveBayesClassifier::default();
        assert!(run(&classifier, "".as_bytes(), Vec::new()).is_err());
    }
}
