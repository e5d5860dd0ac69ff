// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with `clap` and prints results.
// All real work is delegated to Layer 2 (application).
//
//   train   — train the RNN classifier on a corpus file
//   predict — classify texts with a trained output directory
//   argmax  — the linear argmax exercise
//   encode  — encode a corpus and report what came out
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ArgmaxArgs, Commands, EncodeArgs, PredictArgs, TrainArgs};

use crate::domain::traits::TextClassifier;

#[derive(Parser, Debug)]
#[command(
    name = "char-rnn-classifier",
    version,
    about = "Character-level RNN text classifier: encode a corpus, train, predict."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the matching use case; nothing is computed here.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Argmax(args)  => run_argmax(args),
            Commands::Encode(args)  => run_encode(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on corpus: {}", args.corpus);
    let output_dir = args.output_dir.clone();

    let history = TrainUseCase::new(args.into()).execute()?;

    if let Some(last) = history.last() {
        println!(
            "Training complete: test_acc={:.1}% after {} epochs. Output saved to '{}'.",
            last.test_acc * 100.0,
            last.epoch,
            output_dir
        );
    }
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case = PredictUseCase::new(&args.output_dir)?;
    let predictions = use_case.classify(&args.texts)?;

    for p in &predictions {
        if args.json {
            println!("{}", serde_json::to_string(p)?);
        } else {
            println!(
                "{}\t{}\t{}\t{:.4}",
                p.text,
                p.label,
                p.category.as_deref().unwrap_or("?"),
                p.probability
            );
        }
    }
    Ok(())
}

fn run_argmax(args: ArgmaxArgs) -> Result<()> {
    use crate::application::argmax_use_case::ArgmaxUseCase;

    let history = ArgmaxUseCase::new(args.into()).execute()?;

    if let Some(last) = history.last() {
        println!("Argmax exercise complete: final accuracy {:.1}%", last.test_acc * 100.0);
    }
    Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    use crate::application::encode_use_case::EncodeUseCase;

    let encoded = EncodeUseCase::new(args.corpus, args.validation.into(), args.vocab_out).execute()?;

    println!("rows:       {}", encoded.rows());
    println!("width:      {}", encoded.width());
    println!("vocabulary: {}", encoded.vocabulary.len());
    println!("dropped:    {}", encoded.dropped);
    for (label, category) in &encoded.label_categories {
        println!("label {label:>4} → {category}");
    }
    Ok(())
}
