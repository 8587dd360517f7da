//! Command line definitions and handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use categorical_bayes::{
    evaluate, interactive, loader, shuffle_split, train_prefix, Evaluation, FeatureDomains,
    NaiveBayesClassifier, Sample,
};

/// Categorical Naive Bayes classifier with Laplace smoothing
#[derive(Parser, Debug)]
#[command(name = "categorical-bayes", version)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Domain declaration, one `name,value,...` row per feature (closed world)
    #[arg(long)]
    domains: Option<PathBuf>,

    /// Comma separated set of allowed labels
    #[arg(long, value_delimiter = ',')]
    labels: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Labeled training data
    #[arg(long)]
    train: PathBuf,

    #[command(flatten)]
    model: ModelArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train, then report predictions and accuracy on a labeled test set
    Evaluate {
        #[command(flatten)]
        train: TrainArgs,

        /// Labeled test data
        #[arg(long)]
        test: PathBuf,

        /// Only print the accuracy summary
        #[arg(long, short)]
        quiet: bool,
    },

    /// Train, then classify every row of an input file
    Predict {
        #[command(flatten)]
        train: TrainArgs,

        /// Rows to classify; a trailing label is ignored
        #[arg(long)]
        input: PathBuf,

        /// Write `ID,Label` rows here instead of printing
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Train on growing prefixes of the training data and evaluate each
    Curve {
        #[command(flatten)]
        train: TrainArgs,

        /// Labeled test data
        #[arg(long)]
        test: PathBuf,

        /// Fractions of the training data to use
        #[arg(long, value_delimiter = ',', default_value = "0.4,0.6,0.8,1.0")]
        ratios: Vec<f64>,
    },

    /// Shuffle one labeled dataset, split it into train and test, and evaluate
    Split {
        /// Labeled data to split
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        model: ModelArgs,

        /// Fraction of the shuffled data used for training
        #[arg(long, default_value = "0.8")]
        ratio: f64,

        /// Seed for the shuffle
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Train, then classify samples typed in at a prompt
    Interactive {
        #[command(flatten)]
        train: TrainArgs,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Evaluate { train, test, quiet } => {
            let classifier = train_from_file(&train)?;
            let test = load_test(&test, &classifier)?;
            let evaluation = evaluate(&classifier, &test).context("evaluation failed")?;

            if !quiet {
                println!("=== Predictions ===");
                for outcome in &evaluation.outcomes {
                    println!("Predicted: {}, Actual: {}", outcome.predicted, outcome.actual);
                }
                println!();
            }
            print_summary(&evaluation);
        }

        Commands::Predict {
            train,
            input,
            output,
        } => {
            let classifier = train_from_file(&train)?;
            let samples = load_test(&input, &classifier)?;

            let mut predictions = Vec::with_capacity(samples.len());
            for sample in &samples {
                predictions.push(classifier.predict_sample(sample)?);
            }

            match output {
                Some(path) => {
                    loader::save_predictions(&path, &predictions)?;
                    info!(path = %path.display(), count = predictions.len(), "wrote predictions");
                }
                None => {
                    for (sample, prediction) in samples.iter().zip(&predictions) {
                        println!("{} => {}", sample.features.join(","), prediction);
                    }
                }
            }
        }

        Commands::Curve {
            train,
            test,
            ratios,
        } => {
            let domains = load_model(&train.model)?;
            let samples = loader::load_labeled(&train.train, domains.arity())?;
            let arity = samples
                .first()
                .map(Sample::arity)
                .with_context(|| format!("{} has no samples", train.train.display()))?;
            let test = loader::load_samples(&test, arity)?;

            let mut classifier = NaiveBayesClassifier::new(domains);
            for ratio in ratios {
                let subset = train_prefix(&samples, ratio)?;
                println!(
                    "Using {:.0}% of the training data ({} samples)",
                    ratio * 100.0,
                    subset.len()
                );
                classifier
                    .train(subset)
                    .with_context(|| format!("training on {:.0}% of the data failed", ratio * 100.0))?;
                print_summary(&evaluate(&classifier, &test)?);
            }
        }

        Commands::Split {
            data,
            model,
            ratio,
            seed,
        } => {
            let domains = load_model(&model)?;
            let samples = loader::load_labeled(&data, domains.arity())?;
            let (train, test) = shuffle_split(&samples, ratio, seed)?;

            println!(
                "Using {:.0}% of the data for training ({} samples, seed {})",
                ratio * 100.0,
                train.len(),
                seed
            );
            let mut classifier = NaiveBayesClassifier::new(domains);
            classifier.train(&train).context("training failed")?;
            print_summary(&evaluate(&classifier, &test)?);
        }

        Commands::Interactive { train } => {
            let classifier = train_from_file(&train)?;
            let stdin = std::io::stdin();
            let count = interactive::run(&classifier, stdin.lock(), std::io::stdout())?;
            info!(count, "interactive session finished");
        }
    }

    Ok(())
}

fn load_model(args: &ModelArgs) -> Result<FeatureDomains> {
    let domains = match &args.domains {
        Some(path) => loader::load_domains(path)?,
        None => FeatureDomains::open(),
    };

    Ok(if args.labels.is_empty() {
        domains
    } else {
        domains.with_labels(args.labels.iter().map(|l| l.trim()))
    })
}

fn train_from_file(args: &TrainArgs) -> Result<NaiveBayesClassifier> {
    let domains = load_model(&args.model)?;
    let samples = loader::load_labeled(&args.train, domains.arity())?;

    let mut classifier = NaiveBayesClassifier::new(domains);
    classifier
        .train(&samples)
        .with_context(|| format!("training on {} failed", args.train.display()))?;

    Ok(classifier)
}

fn load_test(path: &Path, classifier: &NaiveBayesClassifier) -> Result<Vec<Sample>> {
    let arity = classifier
        .arity()
        .context("classifier must be trained before loading test data")?;
    let samples = loader::load_samples(path, arity)?;
    info!(path = %path.display(), count = samples.len(), "loaded samples");

    Ok(samples)
}

fn print_summary(evaluation: &Evaluation) {
    println!(
        "Accuracy: {:.2}% ({}/{})",
        evaluation.accuracy() * 100.0,
        evaluation.correct,
        evaluation.total()
    );
    println!("Error Rate: {:.2}%", evaluation.error_rate() * 100.0);
}
