//! Runs the binary against temporary data files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_categorical-bayes")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const WEATHER: &str = "sunny,hot,beach\n\
                       rainy,cold,stay_home\n\
                       cloudy,mild,park\n\
                       sunny,mild,hike\n\
                       rainy,mild,museum\n\
                       cloudy,cold,stay_home\n\
                       sunny,cold,skiing\n";

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run categorical-bayes")
}

#[test]
fn test_predict_prints_labels() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(dir.path(), "train.txt", WEATHER);
    let input = write(dir.path(), "input.txt", "sunny, hot\nrainy,cold,whatever\n");

    let output = run(&[
        "predict",
        "--train",
        train.to_str().unwrap(),
        "--input",
        input.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "sunny,hot => beach\nrainy,cold => stay_home\n");
}

#[test]
fn test_predict_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(dir.path(), "train.txt", WEATHER);
    let input = write(dir.path(), "input.txt", "sunny,hot\ncloudy,cold\n");
    let result = dir.path().join("result.csv");

    let output = run(&[
        "predict",
        "--train",
        train.to_str().unwrap(),
        "--input",
        input.to_str().unwrap(),
        "--output",
        result.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(&result).unwrap();
    assert_eq!(written, "ID,Label\n1,beach\n2,stay_home\n");
}

#[test]
fn test_evaluate_reports_accuracy() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(dir.path(), "train.txt", WEATHER);

    let output = run(&[
        "evaluate",
        "--train",
        train.to_str().unwrap(),
        "--test",
        train.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Predicted: beach, Actual: beach"));
    assert!(stdout.contains("Accuracy: 100.00% (7/7)"));
    assert!(stdout.contains("Error Rate: 0.00%"));
}

#[test]
fn test_evaluate_empty_test_set_fails() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(dir.path(), "train.txt", WEATHER);
    let test = write(dir.path(), "test.txt", "");

    let output = run(&[
        "evaluate",
        "--train",
        train.to_str().unwrap(),
        "--test",
        test.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty test set"));
}

#[test]
fn test_closed_world_rejects_undeclared_value() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(dir.path(), "train.txt", "sunny,hot,beach\nsnowy,cold,skiing\n");
    let domains = write(dir.path(), "domains.csv", "sky,sunny,rainy\ntemperature,hot,cold\n");

    let output = run(&[
        "evaluate",
        "--train",
        train.to_str().unwrap(),
        "--test",
        train.to_str().unwrap(),
        "--domains",
        domains.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not in the declared domain"));
}

#[test]
fn test_curve_runs_every_ratio() {
    let dir = tempfile::tempdir().unwrap();
    let train = write(dir.path(), "train.txt", WEATHER);

    let output = run(&[
        "curve",
        "--train",
        train.to_str().unwrap(),
        "--test",
        train.to_str().unwrap(),
        "--ratios",
        "0.5,1.0",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Using 50% of the training data (3 samples)"));
    assert!(stdout.contains("Using 100% of the training data (7 samples)"));
    assert_eq!(stdout.matches("Accuracy:").count(), 2);
}

#[test]
fn test_split_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let data = write(dir.path(), "data.txt", WEATHER);
    let args = [
        "split",
        "--data",
        data.to_str().unwrap(),
        "--ratio",
        "0.6",
        "--seed",
        "11",
    ];

    let first = run(&args);
    let second = run(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(String::from_utf8_lossy(&first.stdout).contains("(4 samples, seed 11)"));
}
