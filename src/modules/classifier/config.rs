use burn::nn::Initializer;
use serde::Deserialize;
use serde_json::Value;

use super::{ClassifierError, Strategy};

/// Hyperparameters for an encoder-backed classifier
#[derive(burn::config::Config, Debug)]
pub struct ClassifierConfig {
    /// Number of classes. If greater than 0, a linear layer projects the aggregated encoder
    /// features onto the classes. Otherwise the encoder's own output size is the class count.
    #[config(default = 2)]
    pub num_classes: i64,

    /// Options for the logit linear layer (`bias`, `initializer`). Ignored without a logit layer.
    pub logit_layer_kwargs: Option<Value>,

    /// One of `cls_time`, `all_time` or `time_wise`
    #[config(default = "\"cls_time\".to_string()")]
    pub clas_strategy: String,

    /// Maximum possible length of input sequences. Required by `all_time`.
    pub max_seq_length: Option<usize>,

    /// Dropout rate applied to the encoder output before the logit layer
    #[config(default = 0.1)]
    pub dropout: f64,

    /// Name of the classifier
    #[config(default = "\"bert_classifier\".to_string()")]
    pub name: String,
}

/// Whether the classifier appends its own logit layer
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Classes {
    /// A linear layer projects features onto this many classes
    Fixed(usize),

    /// No logit layer; the aggregated features are the logits
    InferredFromEncoder,
}

/// Options for the logit linear layer
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogitLayerKwargs {
    /// Whether the layer has a bias term
    #[serde(default = "default_bias")]
    pub bias: bool,

    /// Weight initializer, if not the layer default
    #[serde(default)]
    pub initializer: Option<Initializer>,
}

fn default_bias() -> bool {
    true
}

impl Default for LogitLayerKwargs {
    fn default() -> Self {
        Self {
            bias: default_bias(),
            initializer: None,
        }
    }
}

/// Validated, immutable classifier hyperparameters
#[derive(Debug, Clone)]
pub struct Hyperparams {
    /// How encoder outputs are aggregated
    pub strategy: Strategy,

    /// Class count handling
    pub classes: Classes,

    /// Dropout rate before the logit layer
    pub dropout: f64,

    /// Logit layer options
    pub logit_layer: LogitLayerKwargs,

    /// Name of the classifier
    pub name: String,
}

impl ClassifierConfig {
    /// Check every hyperparameter and resolve it into its typed form
    pub fn validate(&self) -> Result<Hyperparams, ClassifierError> {
        let strategy = Strategy::from_config(&self.clas_strategy, self.max_seq_length)?;

        let classes = if self.num_classes > 0 {
            Classes::Fixed(self.num_classes as usize)
        } else {
            Classes::InferredFromEncoder
        };

        if !(0.0..1.0).contains(&self.dropout) {
            return Err(ClassifierError::InvalidDropout(self.dropout));
        }

        let logit_layer = match &self.logit_layer_kwargs {
            None | Some(Value::Null) => LogitLayerKwargs::default(),
            Some(kwargs @ Value::Object(_)) => serde_json::from_value(kwargs.clone())
                .map_err(|e| ClassifierError::InvalidLogitLayerKwargs(e.to_string()))?,
            Some(other) => {
                return Err(ClassifierError::InvalidLogitLayerKwargs(format!(
                    "got {}",
                    other
                )))
            }
        };

        Ok(Hyperparams {
            strategy,
            classes,
            dropout: self.dropout,
            logit_layer,
            name: self.name.clone(),
        })
    }
}
