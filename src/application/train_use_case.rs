// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the corpus            (Layer 4 - data)
//   Step 2: Encode into a matrix       (Layer 4 - data)
//   Step 3: Build class-indexed items  (Layer 4 - data)
//   Step 4: Split train/test           (Layer 4 - data)
//   Step 5: Run training loop          (Layer 5 - ml)
//   Step 6: Save configs, vocabulary   (Layer 6 - infra)
//           and labels
//
// Side files are written only after the weights exist.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::Result;
use burn::tensor::backend::AutodiffBackend;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{class_count, text_items, TextDataset},
    encoder::encode_corpus,
    loader::{CorpusLoader, ValidationMode},
    splitter::split_train_test,
};
use crate::domain::traits::CorpusSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
    vocab_store::VocabStore,
};
use crate::ml::model::RnnClassifierConfig;
use crate::ml::trainer::{train_classifier, TrainBackend};

pub const METRICS_FILE: &str = "metrics.csv";

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Saved next to the weights as train_config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub corpus_path:   String,
    pub output_dir:    String,
    pub validation:    ValidationMode,
    /// Share of samples held out for evaluation
    pub test_ratio:    f64,
    pub epochs:        usize,
    pub batch_size:    usize,
    /// LSTM hidden size is twice this
    pub embedding_dim: usize,
    pub lr:            f64,
    /// Drives the split and the batch shuffling
    pub seed:          u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus_path:   "data/train.txt".to_string(),
            output_dir:    "output".to_string(),
            validation:    ValidationMode::Lenient,
            test_ratio:    0.2,
            epochs:        20,
            batch_size:    64,
            embedding_dim: 20,
            lr:            0.01,
            seed:          42,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Train on the default GPU backend.
    pub fn execute(&self) -> Result<Vec<EpochMetrics>> {
        self.execute_on::<TrainBackend>(Default::default())
    }

    /// Execute the full training pipeline on any autodiff backend.
    pub fn execute_on<B: AutodiffBackend>(&self, device: B::Device) -> Result<Vec<EpochMetrics>> {
        let cfg = &self.config;
        B::seed(cfg.seed);

        // ── Step 1: Load the corpus ───────────────────────────────────────────
        let corpus = CorpusLoader::new(&cfg.corpus_path, cfg.validation).load()?;
        if corpus.dropped > 0 {
            tracing::warn!("Skipped {} invalid lines in '{}'", corpus.dropped, cfg.corpus_path);
        }

        // ── Step 2: Encode ────────────────────────────────────────────────────
        let encoded = encode_corpus(&corpus)?;
        tracing::info!(
            "Encoded {} samples, width {}, vocabulary {}",
            encoded.rows(),
            encoded.width(),
            encoded.vocabulary.len()
        );

        // ── Step 3: Class indices ─────────────────────────────────────────────
        // Fails on an empty corpus, a negative label, or a label
        // beyond MAX_CLASSES.
        let num_classes = class_count(&encoded.labels)?;
        let items = text_items(&encoded)?;

        // ── Step 4: Train / test split ────────────────────────────────────────
        let (train_items, test_items) = split_train_test(items, cfg.test_ratio, cfg.seed);
        tracing::info!("Split: {} train, {} test", train_items.len(), test_items.len());

        // ── Step 5: Train ─────────────────────────────────────────────────────
        let model_cfg = RnnClassifierConfig::new(
            encoded.vocabulary.len(),
            cfg.embedding_dim,
            cfg.embedding_dim * 2,
            num_classes,
        );
        let ckpt_manager = CheckpointManager::new(&cfg.output_dir);
        let metrics = MetricsLogger::new(&cfg.output_dir, METRICS_FILE)?;
        let history = train_classifier::<B>(
            cfg,
            &model_cfg,
            TextDataset::new(train_items),
            TextDataset::new(test_items),
            &ckpt_manager,
            &metrics,
            device,
        )?;

        // ── Step 6: Configs, vocabulary and label map ─────────────────────────
        ckpt_manager.save_train_config(cfg)?;
        ckpt_manager.save_model_config(&model_cfg)?;
        VocabStore::new(&cfg.output_dir).save(&encoded.vocabulary)?;
        ckpt_manager.save_labels(&encoded.label_categories)?;

        Ok(history)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use std::fs;

    type TestAutodiff = Autodiff<NdArray>;

    const CORPUS: &str = "\
0 sports 篮球 比赛
1 finance 股票 上涨
0 sports 足球 比赛 精彩
1 finance 基金 下跌
bad line
0 sports 球队 赢了
1 finance 银行 利率
";

    fn config(dir: &std::path::Path) -> TrainConfig {
        let corpus = dir.join("train.txt");
        fs::write(&corpus, CORPUS).unwrap();
        TrainConfig {
            corpus_path:   corpus.display().to_string(),
            output_dir:    dir.join("out").display().to_string(),
            epochs:        2,
            batch_size:    2,
            embedding_dim: 4,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn training_leaves_every_artifact_behind() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());

        let history = TrainUseCase::new(cfg.clone())
            .execute_on::<TestAutodiff>(Default::default())
            .unwrap();
        assert_eq!(history.len(), 2);

        let out = dir.path().join("out");
        for file in ["model.mpk.gz", "vocab.json", "labels.json", "model_config.json",
                     "train_config.json", "metrics.csv"] {
            assert!(out.join(file).exists(), "missing {file}");
        }

        let ckpt = CheckpointManager::new(&out);
        let model_cfg = ckpt.load_model_config().unwrap();
        assert_eq!(model_cfg.num_classes, 2);
        assert_eq!(model_cfg.hidden_dim, 8);

        let labels = ckpt.load_labels().unwrap();
        assert_eq!(labels.get(&0).map(String::as_str), Some("sports"));
        assert_eq!(labels.get(&1).map(String::as_str), Some("finance"));

        let saved = ckpt.load_train_config().unwrap();
        assert_eq!(saved.epochs, 2);
        assert_eq!(saved.validation, ValidationMode::Lenient);
    }

    #[test]
    fn failed_training_writes_no_side_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path());
        let out = dir.path().join("out");
        // A directory in place of the CSV makes the first metrics row fail
        fs::create_dir_all(out.join(METRICS_FILE)).unwrap();

        let result = TrainUseCase::new(cfg).execute_on::<TestAutodiff>(Default::default());

        assert!(result.is_err());
        for file in ["model_config.json", "train_config.json", "vocab.json", "labels.json"] {
            assert!(!out.join(file).exists(), "unexpected {file}");
        }
    }

    #[test]
    fn strict_mode_rejects_the_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { validation: ValidationMode::Strict, ..config(dir.path()) };

        let err = TrainUseCase::new(cfg)
            .execute_on::<TestAutodiff>(Default::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("line 5"));
    }

    #[test]
    fn empty_corpus_fails_before_training() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("empty.txt");
        fs::write(&corpus, "\n\n").unwrap();
        let cfg = TrainConfig {
            corpus_path: corpus.display().to_string(),
            output_dir:  dir.path().join("out").display().to_string(),
            ..TrainConfig::default()
        };

        assert!(TrainUseCase::new(cfg).execute_on::<TestAutodiff>(Default::default()).is_err());
        assert!(!dir.path().join("out").join("model.mpk.gz").exists());
    }
}
