// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records one CSV row per training epoch, so learning curves
// can be plotted from the file afterwards.
//
// Columns:
//   epoch      — 1-based epoch number
//   train_loss — mean cross-entropy over the training batches
//   test_loss  — mean cross-entropy over the held-out batches
//   test_acc   — fraction of held-out samples predicted correctly
//
// Example:
//   epoch,train_loss,test_loss,test_acc
//   1,2.512301,2.498822,0.171000
//   2,2.143385,2.201947,0.342000
//
// The header is written only when the file is created; later
// runs append to the same file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

const HEADER: &str = "epoch,train_loss,test_loss,test_acc";

/// Metrics of a single epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:      usize,
    pub train_loss: f64,
    pub test_loss:  f64,
    /// Range: [0.0, 1.0]
    pub test_acc:   f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, test_loss: f64, test_acc: f64) -> Self {
        Self { epoch, train_loss, test_loss, test_acc }
    }
}

/// Appends epoch metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Open (or create) `{dir}/{file_name}`.
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join(file_name);

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6}",
            m.epoch, m.train_loss, m.test_loss, m.test_acc,
        )?;

        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_once_then_rows() {
        let dir = tempfile::tempdir().unwrap();

        let logger = MetricsLogger::new(dir.path(), "metrics.csv").unwrap();
        logger.log(&EpochMetrics::new(1, 2.5, 2.25, 0.125)).unwrap();

        // Reopening must not write a second header
        let logger = MetricsLogger::new(dir.path(), "metrics.csv").unwrap();
        logger.log(&EpochMetrics::new(2, 1.5, 1.75, 0.5)).unwrap();

        let content = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                HEADER,
                "1,2.500000,2.250000,0.125000",
                "2,1.500000,1.750000,0.500000",
            ]
        );
    }
}
