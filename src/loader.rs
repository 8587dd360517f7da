//! Reading samples and domain declarations from comma separated files.

use std::{io, path::Path};

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::warn;

use crate::{
    domain::{FeatureDomain, FeatureDomains},
    sample::Sample,
};

fn reader<R: io::Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

/// Reads labeled samples, one per row: the feature values followed by the label.
///
/// With a known `arity`, rows with another field count are skipped. Otherwise
/// the first row fixes the field count, and any later row disagreeing with it
/// is an error rather than silently dropped.
pub fn read_labeled<R: io::Read>(input: R, arity: Option<usize>) -> Result<Vec<Sample>> {
    let declared = arity.is_some();
    let mut arity = arity;
    let mut samples = Vec::new();

    for (line, record) in reader(input).records().enumerate() {
        let record = record.with_context(|| format!("failed to read row {}", line + 1))?;

        let features = match arity {
            Some(features) => features,
            None => {
                if record.len() < 2 {
                    bail!(
                        "row {} has {} field(s); expected at least one feature and a label",
                        line + 1,
                        record.len()
                    );
                }
                *arity.insert(record.len() - 1)
            }
        };

        if record.len() != features + 1 {
            if !declared {
                bail!(
                    "row {} has {} fields but the first row has {}",
                    line + 1,
                    record.len(),
                    features + 1
                );
            }
            warn!(
                row = line + 1,
                fields = record.len(),
                expected = features + 1,
                "skipping labeled row with wrong field count"
            );
            continue;
        }

        match parse_record(&record, features, true) {
            Some(sample) => samples.push(sample),
            None => warn!(row = line + 1, "skipping labeled row with empty field"),
        }
    }

    Ok(samples)
}

/// Reads samples whose trailing label is optional.
pub fn read_samples<R: io::Read>(input: R, arity: usize) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for (line, record) in reader(input).records().enumerate() {
        let record = record.with_context(|| format!("failed to read row {}", line + 1))?;
        let labeled = match record.len() {
            n if n == arity => false,
            n if n == arity + 1 => true,
            n => {
                warn!(row = line + 1, fields = n, arity, "skipping row with wrong field count");
                continue;
            }
        };

        match parse_record(&record, arity, labeled) {
            Some(sample) => samples.push(sample),
            None => warn!(row = line + 1, "skipping row with empty field"),
        }
    }

    Ok(samples)
}

fn parse_record(record: &StringRecord, arity: usize, labeled: bool) -> Option<Sample> {
    let features: Vec<String> = record.iter().take(arity).map(str::to_string).collect();
    if features.iter().any(String::is_empty) {
        return None;
    }

    let label = match record.get(arity) {
        Some(label) if labeled => {
            if label.is_empty() {
                return None;
            }
            Some(label.to_string())
        }
        _ => None,
    };

    Some(Sample { features, label })
}

/// Reads a domain declaration: one row per feature, `name,value,value,...`.
pub fn read_domains<R: io::Read>(input: R) -> Result<FeatureDomains> {
    let mut domains = Vec::new();

    for (line, record) in reader(input).records().enumerate() {
        let record = record.with_context(|| format!("failed to read domain row {}", line + 1))?;
        let name = record
            .get(0)
            .filter(|name| !name.is_empty())
            .with_context(|| format!("domain row {} is missing a feature name", line + 1))?;

        let values = record.iter().skip(1).filter(|value| !value.is_empty());
        domains.push(FeatureDomain::new(name, values));
    }

    if domains.is_empty() {
        bail!("domain declaration has no features");
    }

    Ok(FeatureDomains::closed(domains)?)
}

pub fn load_labeled<P: AsRef<Path>>(path: P, arity: Option<usize>) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open {}", path.display()))?;
    read_labeled(file, arity).with_context(|| format!("could not load {}", path.display()))
}

pub fn load_samples<P: AsRef<Path>>(path: P, arity: usize) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open {}", path.display()))?;
    read_samples(file, arity).with_context(|| format!("could not load {}", path.display()))
}

pub fn load_domains<P: AsRef<Path>>(path: P) -> Result<FeatureDomains> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open {}", path.display()))?;
    read_domains(file).with_context(|| format!("could not load {}", path.display()))
}

/// Writes predictions as `ID,Label` rows with 1-based ids.
pub fn write_predictions<W, S>(output: W, predictions: &[S]) -> Result<()>
where
    W: io::Write,
    S: AsRef<str>,
{
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["ID", "Label"])?;
    for (i, prediction) in predictions.iter().enumerate() {
        writer.write_record([(i + 1).to_string().as_str(), prediction.as_ref()])?;
    }
    writer.flush()?;

    Ok(())
}

pub fn save_predictions<P, S>(path: P, predictions: &[S]) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("could not create {}", path.display()))?;
    write_predictions(file, predictions)
}
