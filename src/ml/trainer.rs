// ============================================================
// Layer 5 — Training Loops
// ============================================================
// Train + evaluate loops on Burn's DataLoader and Adam.
//
//   train_classifier — RNN text classifier on the encoded corpus,
//                      evaluated on the held-out split each epoch
//   train_argmax     — linear argmax classifier on random vectors,
//                      evaluated on freshly generated vectors
//
// Both are generic over the autodiff backend; the application
// layer picks TrainBackend (Wgpu) and tests pick NdArray.
//
// Burn notes:
//   - model.valid() returns the module on B::InnerBackend, so the
//     evaluation batcher is built for the inner backend too
//   - argmax(1) returns [batch, 1]; flatten before .equal()
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::{batcher::Batcher, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::Rng;

use crate::application::argmax_use_case::ArgmaxConfig;
use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::{TextBatch, TextBatcher, VectorBatch, VectorBatcher},
    dataset::{TextDataset, VectorDataset},
    synthetic::build_dataset,
};
use crate::infra::checkpoint::{CheckpointManager, ARGMAX_MODEL_NAME, MODEL_NAME};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{LinearClassifier, LinearClassifierConfig, RnnClassifier, RnnClassifierConfig};

pub type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

/// Mean loss and accuracy over a set of evaluation batches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub loss:     f64,
    pub accuracy: f64,
    pub correct:  usize,
    pub samples:  usize,
}

/// Number of rows in `labels` whose argmax over `scores` matches.
fn count_correct<B: Backend>(scores: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> usize {
    let predicted = scores.argmax(1).flatten::<1>(0, 1);
    predicted
        .equal(labels)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>() as usize
}

fn summarize(loss_sum: f64, batches: usize, correct: usize, samples: usize) -> Evaluation {
    Evaluation {
        loss:     if batches > 0 { loss_sum / batches as f64 } else { f64::NAN },
        accuracy: if samples > 0 { correct as f64 / samples as f64 } else { 0.0 },
        correct,
        samples,
    }
}

/// Evaluate the RNN classifier on already batched data.
pub fn evaluate_classifier<B: Backend>(
    model:   &RnnClassifier<B>,
    batches: impl Iterator<Item = TextBatch<B>>,
) -> Evaluation {
    let (mut loss_sum, mut n_batches, mut correct, mut samples) = (0.0f64, 0usize, 0usize, 0usize);

    for batch in batches {
        samples += batch.labels.dims()[0];
        let (loss, logits) = model.forward_loss(batch.token_ids, batch.labels.clone());
        loss_sum  += loss.into_scalar().elem::<f64>();
        n_batches += 1;
        correct   += count_correct(logits, batch.labels);
    }

    summarize(loss_sum, n_batches, correct, samples)
}

/// Evaluate the argmax classifier on already batched data.
pub fn evaluate_argmax<B: Backend>(
    model:   &LinearClassifier<B>,
    batches: impl Iterator<Item = VectorBatch<B>>,
) -> Evaluation {
    let (mut loss_sum, mut n_batches, mut correct, mut samples) = (0.0f64, 0usize, 0usize, 0usize);

    for batch in batches {
        samples += batch.labels.dims()[0];
        let (loss, scores) = model.forward_loss(batch.features, batch.labels.clone());
        loss_sum  += loss.into_scalar().elem::<f64>();
        n_batches += 1;
        correct   += count_correct(scores, batch.labels);
    }

    summarize(loss_sum, n_batches, correct, samples)
}

/// Train the RNN classifier, log one metrics row per epoch, and save
/// the final weights under `MODEL_NAME`.
pub fn train_classifier<B: AutodiffBackend>(
    cfg:          &TrainConfig,
    model_cfg:    &RnnClassifierConfig,
    train_set:    TextDataset,
    test_set:     TextDataset,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
    device:       B::Device,
) -> Result<Vec<EpochMetrics>> {
    let mut model: RnnClassifier<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: vocab={}, embedding={}, hidden={}, classes={}",
        model_cfg.vocab_size, model_cfg.embedding_dim, model_cfg.hidden_dim, model_cfg.num_classes,
    );

    let mut optim = AdamConfig::new().init();

    let train_loader = DataLoaderBuilder::new(TextBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_set);

    let test_loader = DataLoaderBuilder::new(TextBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(test_set);

    let mut history = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.token_ids, batch.labels);
            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        let eval = evaluate_classifier(&model.valid(), test_loader.iter());

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | test_loss={:.4} | test_acc={:.1}%",
            epoch, cfg.epochs, train_loss, eval.loss, eval.accuracy * 100.0,
        );

        let row = EpochMetrics::new(epoch, train_loss, eval.loss, eval.accuracy);
        metrics.log(&row)?;
        history.push(row);
    }

    ckpt_manager.save_model::<B, _>(&model, MODEL_NAME)?;
    tracing::info!("Metrics written to '{}'", metrics.csv_path().display());
    Ok(history)
}

/// Train the argmax classifier on `cfg.train_samples` random vectors.
///
/// Batches are taken in order (no shuffling); after every epoch the
/// model is scored on `cfg.eval_samples` newly generated vectors.
pub fn train_argmax<B: AutodiffBackend, R: Rng>(
    cfg:          &ArgmaxConfig,
    rng:          &mut R,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
    device:       B::Device,
) -> Result<Vec<EpochMetrics>> {
    let model_cfg = LinearClassifierConfig::new(cfg.input_size, cfg.output_size);
    let mut model: LinearClassifier<B> = model_cfg.init(&device);
    let mut optim = AdamConfig::new().init();

    let train_set = VectorDataset::new(build_dataset(rng, cfg.train_samples, cfg.input_size));
    let train_loader = DataLoaderBuilder::new(VectorBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(train_set);

    let eval_batcher = VectorBatcher::<B::InnerBackend>::new(device.clone());
    let mut history = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.features, batch.labels);
            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };

        let eval_items = build_dataset(rng, cfg.eval_samples, cfg.input_size);
        let eval = if eval_items.is_empty() {
            summarize(0.0, 0, 0, 0)
        } else {
            let batch = eval_batcher.batch(eval_items);
            evaluate_argmax(&model.valid(), std::iter::once(batch))
        };

        println!(
            "Epoch {:>3}/{} | loss={:.4} | correct={}/{} | acc={:.1}%",
            epoch, cfg.epochs, train_loss,
            eval.correct, eval.samples,
            eval.accuracy * 100.0,
        );

        let row = EpochMetrics::new(epoch, train_loss, eval.loss, eval.accuracy);
        metrics.log(&row)?;
        history.push(row);
    }

    ckpt_manager.save_model::<B, _>(&model, ARGMAX_MODEL_NAME)?;
    tracing::info!("Metrics written to '{}'", metrics.csv_path().display());
    Ok(history)
}
