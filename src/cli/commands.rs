// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands and all their flags:
//   train   — corpus → RNN checkpoint
//   predict — checkpoint + texts → labels
//   argmax  — linear argmax exercise
//   encode  — corpus → encoded matrix summary
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::{argmax_use_case::ArgmaxConfig, train_use_case::TrainConfig};
use crate::data::loader::ValidationMode;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the character RNN classifier on a labelled corpus
    Train(TrainArgs),

    /// Classify texts with a trained output directory
    Predict(PredictArgs),

    /// Train a linear layer to find the largest coordinate of random vectors
    Argmax(ArgmaxArgs),

    /// Encode a corpus and report the matrix and vocabulary it produces
    Encode(EncodeArgs),
}

/// What to do with corpus lines that are not valid samples.
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum Validation {
    /// Abort on the first invalid line
    Strict,
    /// Skip invalid lines and report how many were dropped
    #[default]
    Lenient,
}

impl From<Validation> for ValidationMode {
    fn from(v: Validation) -> Self {
        match v {
            Validation::Strict  => ValidationMode::Strict,
            Validation::Lenient => ValidationMode::Lenient,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Corpus file: one "<label> <category> <tokens...>" sample per line
    #[arg(long, default_value = "data/train.txt")]
    pub corpus: String,

    /// Directory for weights, configs, vocabulary, labels and metrics
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    #[arg(long, value_enum, default_value_t = Validation::Lenient)]
    pub validation: Validation,

    /// Share of samples held out for testing
    #[arg(long, default_value_t = 0.2)]
    pub test_ratio: f64,

    #[arg(long, default_value_t = 20)]
    pub epochs: usize,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Character embedding size; the LSTM hidden size is twice this
    #[arg(long, default_value_t = 20)]
    pub embedding_dim: usize,

    #[arg(long, default_value_t = 0.01)]
    pub lr: f64,

    /// Seed for the train/test split and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus_path:   a.corpus,
            output_dir:    a.output_dir,
            validation:    a.validation.into(),
            test_ratio:    a.test_ratio,
            epochs:        a.epochs,
            batch_size:    a.batch_size,
            embedding_dim: a.embedding_dim,
            lr:            a.lr,
            seed:          a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Texts to classify
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Directory written by `train`
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    /// Print predictions as JSON lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ArgmaxArgs {
    #[arg(long, default_value = "output")]
    pub output_dir: String,

    #[arg(long, default_value_t = 20)]
    pub epochs: usize,

    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 5000)]
    pub train_samples: usize,

    /// Fresh vectors scored after every epoch
    #[arg(long, default_value_t = 100)]
    pub eval_samples: usize,

    /// Length of each random vector (and number of classes)
    #[arg(long, default_value_t = 5)]
    pub size: usize,

    #[arg(long, default_value_t = 0.001)]
    pub lr: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<ArgmaxArgs> for ArgmaxConfig {
    fn from(a: ArgmaxArgs) -> Self {
        ArgmaxConfig {
            output_dir:    a.output_dir,
            epochs:        a.epochs,
            batch_size:    a.batch_size,
            train_samples: a.train_samples,
            eval_samples:  a.eval_samples,
            input_size:    a.size,
            output_size:   a.size,
            lr:            a.lr,
            seed:          a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Corpus file to encode
    pub corpus: String,

    #[arg(long, value_enum, default_value_t = Validation::Lenient)]
    pub validation: Validation,

    /// Also write the vocabulary JSON to this path
    #[arg(long)]
    pub vocab_out: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn train_flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "char-rnn-classifier", "train",
            "--corpus", "c.txt", "--validation", "strict", "--embedding-dim", "8",
        ])
        .unwrap();

        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.corpus_path, "c.txt");
        assert_eq!(cfg.validation, ValidationMode::Strict);
        assert_eq!(cfg.embedding_dim, 8);
        assert_eq!(cfg.batch_size, 64);
        assert_eq!(cfg.test_ratio, 0.2);
    }

    #[test]
    fn predict_requires_at_least_one_text() {
        assert!(Cli::try_parse_from(["char-rnn-classifier", "predict"]).is_err());

        let cli = Cli::try_parse_from(["char-rnn-classifier", "predict", "你好", "篮球"]).unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        assert_eq!(args.texts, vec!["你好", "篮球"]);
        assert_eq!(args.output_dir, "output");
    }

    #[test]
    fn argmax_size_sets_both_dimensions() {
        let cli = Cli::try_parse_from(["char-rnn-classifier", "argmax", "--size", "7"]).unwrap();
        let Commands::Argmax(args) = cli.command else { panic!("expected argmax") };
        let cfg: ArgmaxConfig = args.into();
        assert_eq!((cfg.input_size, cfg.output_size), (7, 7));
        assert_eq!(cfg.train_samples, 5000);
    }
}
