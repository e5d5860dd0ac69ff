use serde::{Deserialize, Serialize};

/// The classifier's answer for one input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub text:        String,
    pub label:       i64,
    /// Category name recorded for `label` at training time, if any
    pub category:    Option<String>,
    /// Softmax probability of `label`
    pub probability: f32,
}
