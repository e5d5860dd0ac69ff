use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        lstm::{Lstm, LstmConfig},
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::sigmoid,
};

// #[derive(Config)] already generates Clone and Serialize/Deserialize;
// deriving them again gives conflicting impls.
#[derive(Config, Debug)]
pub struct RnnClassifierConfig {
    pub vocab_size:    usize,
    pub embedding_dim: usize,
    pub hidden_dim:    usize,
    pub num_classes:   usize,
}

impl RnnClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> RnnClassifier<B> {
        let embedding  = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let rnn        = LstmConfig::new(self.embedding_dim, self.hidden_dim, false).init(device);
        let classifier = LinearConfig::new(self.hidden_dim, self.num_classes).init(device);
        RnnClassifier { embedding, rnn, classifier }
    }
}

/// Embedding → LSTM → last time step → linear head.
#[derive(Module, Debug)]
pub struct RnnClassifier<B: Backend> {
    pub embedding:  Embedding<B>,
    pub rnn:        Lstm<B>,
    pub classifier: Linear<B>,
}

impl<B: Backend> RnnClassifier<B> {
    /// token_ids: [batch, seq_len] → logits: [batch, num_classes]
    pub fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(token_ids); // [batch, seq_len, embedding_dim]
        let (hidden, _state) = self.rnn.forward(x, None);

        // Sequences are left-padded, so the last step always holds real content.
        let [batch_size, seq_len, d_hidden] = hidden.dims();
        let last = hidden
            .slice([0..batch_size, seq_len - 1..seq_len, 0..d_hidden])
            .reshape([batch_size, d_hidden]);

        self.classifier.forward(last)
    }

    pub fn forward_loss(
        &self,
        token_ids: Tensor<B, 2, Int>,
        labels:    Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(token_ids);
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), labels);
        (loss, logits)
    }
}

#[derive(Config, Debug)]
pub struct LinearClassifierConfig {
    pub input_size:  usize,
    pub output_size: usize,
}

impl LinearClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LinearClassifier<B> {
        LinearClassifier {
            linear: LinearConfig::new(self.input_size, self.output_size).init(device),
        }
    }
}

/// Single linear layer with a sigmoid on every output score.
#[derive(Module, Debug)]
pub struct LinearClassifier<B: Backend> {
    pub linear: Linear<B>,
}

impl<B: Backend> LinearClassifier<B> {
    /// features: [batch, input_size] → scores in (0, 1): [batch, output_size]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        sigmoid(self.linear.forward(features))
    }

    /// Cross-entropy over the sigmoid scores.
    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        labels:   Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let scores = self.forward(features);
        let loss = CrossEntropyLossConfig::new()
            .init(&scores.device())
            .forward(scores.clone(), labels);
        (loss, scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn rnn_logits_have_one_column_per_class() {
        let device = Default::default();
        let model = RnnClassifierConfig::new(12, 4, 8, 3).init::<TestBackend>(&device);

        let ids = Tensor::<TestBackend, 1, Int>::from_ints([0, 0, 5, 1, 2, 3].as_slice(), &device)
            .reshape([2, 3]);
        let logits = model.forward(ids);

        assert_eq!(logits.dims(), [2, 3]);
    }

    #[test]
    fn rnn_loss_is_a_finite_scalar() {
        let device = Default::default();
        let model = RnnClassifierConfig::new(6, 3, 6, 2).init::<TestBackend>(&device);

        let ids = Tensor::<TestBackend, 1, Int>::from_ints([1, 2, 0, 4].as_slice(), &device)
            .reshape([2, 2]);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([0, 1].as_slice(), &device);
        let (loss, _) = model.forward_loss(ids, labels);

        assert_eq!(loss.dims(), [1]);
        let value: f32 = loss.into_scalar().elem::<f32>();
        assert!(value.is_finite() && value > 0.0);
    }

    #[test]
    fn linear_scores_are_squashed() {
        let device = Default::default();
        let model = LinearClassifierConfig::new(5, 5).init::<TestBackend>(&device);

        let x = Tensor::<TestBackend, 1>::from_floats([0.5; 10].as_slice(), &device)
            .reshape([2, 5]);
        let scores: Vec<f32> = model.forward(x).into_data().to_vec().unwrap();

        assert_eq!(scores.len(), 10);
        assert!(scores.iter().all(|&s| s > 0.0 && s < 1.0));
    }
}
