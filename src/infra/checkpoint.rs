// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Persists everything a trained run leaves behind, except the
// vocabulary (see vocab_store.rs).
//
// File layout of an output directory:
//   output/
//     model.mpk.gz          ← RNN weights (CompactRecorder)
//     model_config.json     ← architecture needed to rebuild it
//     train_config.json     ← hyperparameters of the run
//     labels.json           ← label → category name
//     argmax_model.mpk.gz   ← weights of the argmax exercise
//
// Weights are written once, after the last epoch, under a fixed
// name. CompactRecorder stores them as gzip'd MessagePack and
// appends the extension itself.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::train_use_case::TrainConfig;
use crate::domain::sample::LabelCategoryMap;
use crate::ml::model::RnnClassifierConfig;

/// Record name of the RNN classifier weights.
pub const MODEL_NAME: &str = "model";

/// Record name of the argmax exercise weights.
pub const ARGMAX_MODEL_NAME: &str = "argmax_model";

const MODEL_CONFIG_FILE: &str = "model_config.json";
const TRAIN_CONFIG_FILE: &str = "train_config.json";
const LABELS_FILE: &str = "labels.json";

/// Reads and writes the artifacts of one output directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// The directory is created lazily, on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a module's weights as `{dir}/{name}.mpk.gz`.
    pub fn save_model<B: Backend, M: Module<B>>(&self, model: &M, name: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(name);

        Recorder::<B>::record(&CompactRecorder::new(), model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))?;

        tracing::info!("Saved weights to '{}.mpk.gz'", path.display());
        Ok(())
    }

    /// Load weights saved by `save_model` into a freshly built module
    /// of the same architecture.
    pub fn load_model<B: Backend, M: Module<B>>(
        &self,
        model:  M,
        name:   &str,
        device: &B::Device,
    ) -> Result<M> {
        let path = self.dir.join(name);

        let record: <M as Module<B>>::Record =
            Recorder::<B>::load(&CompactRecorder::new(), path.clone(), device).with_context(|| {
                format!(
                    "Cannot load weights '{}'. Have you trained the model first?",
                    path.display()
                )
            })?;

        tracing::debug!("Loaded weights from '{}'", path.display());
        Ok(model.load_record(record))
    }

    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.write_json(TRAIN_CONFIG_FILE, cfg)
    }

    #[cfg(test)]
    pub fn load_train_config(&self) -> Result<TrainConfig> {
        self.read_json(TRAIN_CONFIG_FILE)
    }

    pub fn save_model_config(&self, cfg: &RnnClassifierConfig) -> Result<()> {
        self.write_json(MODEL_CONFIG_FILE, cfg)
    }

    pub fn load_model_config(&self) -> Result<RnnClassifierConfig> {
        self.read_json(MODEL_CONFIG_FILE)
    }

    pub fn save_labels(&self, labels: &LabelCategoryMap) -> Result<()> {
        self.write_json(LABELS_FILE, labels)
    }

    pub fn load_labels(&self) -> Result<LabelCategoryMap> {
        self.read_json(LABELS_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create output directory '{}'", self.dir.display()))
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Wrote '{}'", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.dir.join(file);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read '{}'. Make sure you have run 'train' first.",
                path.display()
            )
        })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse '{}'", path.display()))
    }
}
