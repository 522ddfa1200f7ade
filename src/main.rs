//! Command-line driver: trains a network on MNIST or iris and reports
//! test-set accuracy.
//!
//! Per-sample predictions are logged at debug level:
//!   RUST_LOG=backprop_net=debug backprop-net iris --train ... --test ... --results ...

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backprop_net::data::delimited::{first_column_labels, read_delimited_file, samples_from_rows};
use backprop_net::data::idx::read_idx_pair;
use backprop_net::data::lines::write_line_streams;
use backprop_net::{argmax, Network, NetworkConfig, Sample, TrainConfig, Trainer};

#[derive(Parser)]
#[command(name = "backprop-net")]
#[command(version)]
#[command(about = "Train a two-layer sigmoid network and report test accuracy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Handwritten digits in IDX format (28x28 images, 10 classes)
    Mnist(MnistArgs),
    /// Iris measurements in comma-delimited text (4 features, 3 classes)
    Iris(IrisArgs),
}

#[derive(Args)]
struct Hyper {
    /// Neurons in the hidden layer
    #[arg(long)]
    hidden: Option<usize>,

    /// Number of epochs
    #[arg(long)]
    iterations: Option<usize>,

    /// Step size of every weight update
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Seed for weight initialization
    #[arg(long, default_value_t = backprop_net::network::config::DEFAULT_SEED)]
    seed: u64,

    /// Seed for the once-per-run shuffle (random if omitted)
    #[arg(long)]
    shuffle_seed: Option<u64>,

    /// JSON `TrainConfig`; its values take precedence over the flags above
    #[arg(long)]
    train_config: Option<PathBuf>,
}

#[derive(Args)]
struct MnistArgs {
    #[arg(long)]
    train_images: PathBuf,
    #[arg(long)]
    train_labels: PathBuf,
    #[arg(long)]
    test_images: PathBuf,
    #[arg(long)]
    test_labels: PathBuf,

    /// Feed the first epoch through the line-stream trainer
    #[arg(long, default_value_t = false)]
    streaming: bool,

    #[command(flatten)]
    hyper: Hyper,
}

#[derive(Args)]
struct IrisArgs {
    /// Training rows: `f1,f2,f3,f4,class` with 0-based classes
    #[arg(long)]
    train: PathBuf,
    /// Test rows: `f1,f2,f3,f4`
    #[arg(long)]
    test: PathBuf,
    /// Expected class of each test row, first column
    #[arg(long)]
    results: PathBuf,
    /// Number the results file counts classes from
    #[arg(long, default_value_t = 1)]
    label_base: usize,

    #[command(flatten)]
    hyper: Hyper,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backprop_net=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Mnist(args) => run_mnist(args),
        Command::Iris(args) => run_iris(args),
    }
}

fn run_mnist(args: MnistArgs) -> Result<()> {
    let start = Instant::now();
    let mut train = read_idx_pair(&args.train_images, &args.train_labels)
        .with_context(|| format!("reading training set {}", args.train_images.display()))?;
    let test = read_idx_pair(&args.test_images, &args.test_labels)
        .with_context(|| format!("reading test set {}", args.test_images.display()))?;

    let input_size = match train.first() {
        Some(sample) => sample.features.len(),
        None => bail!("training set {} is empty", args.train_images.display()),
    };
    let net_config = NetworkConfig::new(input_size, 10, args.hyper.hidden.unwrap_or(300))
        .with_seed(args.hyper.seed);
    let mut network = Network::new(&net_config)?;
    let mut trainer = Trainer::new(train_config(&args.hyper, 2, 0.5)?)?;

    if args.streaming {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        write_line_streams(&train, &mut features, &mut labels)?;
        trainer.fit_streaming(&mut network, Cursor::new(features), Cursor::new(labels))?;
    } else {
        trainer.fit(&mut network, &mut train)?;
    }

    report(&mut network, &test, 0, start)
}

fn run_iris(args: IrisArgs) -> Result<()> {
    let start = Instant::now();
    let train_rows = read_delimited_file(&args.train, ',')
        .with_context(|| format!("reading {}", args.train.display()))?;
    let mut train = samples_from_rows(&train_rows)?;
    let test_rows = read_delimited_file(&args.test, ',')
        .with_context(|| format!("reading {}", args.test.display()))?;
    let result_rows = read_delimited_file(&args.results, ',')
        .with_context(|| format!("reading {}", args.results.display()))?;
    let expected = first_column_labels(&result_rows, args.label_base)?;

    if test_rows.len() != expected.len() {
        bail!(
            "{} test rows but {} expected results",
            test_rows.len(),
            expected.len()
        );
    }
    let test: Vec<Sample> = test_rows.into_iter().zip(expected).map(|(f, l)| Sample::new(f, l)).collect();

    let net_config = NetworkConfig::new(4, 3, args.hyper.hidden.unwrap_or(20)).with_seed(args.hyper.seed);
    let mut network = Network::new(&net_config)?;
    Trainer::new(train_config(&args.hyper, 500, 0.1)?)?.fit(&mut network, &mut train)?;

    report(&mut network, &test, args.label_base, start)
}

fn train_config(hyper: &Hyper, iterations: usize, learning_rate: f64) -> Result<TrainConfig> {
    if let Some(path) = &hyper.train_config {
        let config = TrainConfig::load_json(&path.to_string_lossy())
            .with_context(|| format!("loading {}", path.display()))?;
        return Ok(config);
    }
    let mut config = TrainConfig::new(
        hyper.iterations.unwrap_or(iterations),
        hyper.learning_rate.unwrap_or(learning_rate),
    );
    config.shuffle_seed = hyper.shuffle_seed;
    Ok(config)
}

/// Classifies `test`, logs each prediction and prints the summary.
/// `label_base` only shifts the printed class numbers.
fn report(network: &mut Network, test: &[Sample], label_base: usize, start: Instant) -> Result<()> {
    let batch: Vec<Vec<f64>> = test.iter().map(|s| s.features.clone()).collect();
    let outputs = network.classify(&batch)?;

    let mut correct = 0usize;
    for (sample, output) in test.iter().zip(&outputs) {
        let predicted = argmax(output);
        let confidence = predicted.map_or(0.0, |i| output[i]);
        debug!(
            expected = sample.label + label_base,
            actual = ?predicted.map(|i| i + label_base),
            output = confidence,
            "prediction"
        );
        if predicted == Some(sample.label) {
            correct += 1;
        }
    }

    let elapsed = start.elapsed();
    info!(elapsed_s = elapsed.as_secs_f64(), "run complete");
    println!("Execution time: {}m {}s", elapsed.as_secs() / 60, elapsed.as_secs() % 60);
    println!("Test samples: {}", test.len());
    println!("Successful tests: {correct}");
    if test.is_empty() {
        println!("Success rate: n/a (empty test set)");
    } else {
        println!("Success rate: {:.4}", correct as f64 / test.len() as f64);
    }
    Ok(())
}
