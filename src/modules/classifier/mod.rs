use burn::{
    module::Module,
    nn::{Dropout, DropoutConfig, Linear, LinearConfig},
    tensor::{backend::Backend, Int, Tensor},
};
use derive_new::new;

use super::Encoder;

/// Classifier hyperparameters
pub mod config;

/// Encoder output aggregation strategies
pub mod strategy;

/// Logits and predictions
pub mod output;

/// Classifier errors
pub mod error;

pub use config::{Classes, ClassifierConfig, Hyperparams, LogitLayerKwargs};
pub use error::ClassifierError;
pub use output::{ClassifierOutput, Logits, Predictions};
pub use strategy::Strategy;

/// Dropout followed by the optional logit projection
#[derive(Module, Debug, new)]
pub struct Head<B: Backend> {
    /// Dropout on the aggregated features
    pub dropout: Dropout,

    /// Linear layer onto the classes, absent when the class count is inferred from the encoder
    pub output: Option<Linear<B>>,
}

impl<B: Backend> Head<B> {
    /// Project features of shape `[batch_size, steps, features]` onto the classes
    pub fn forward(&self, features: Tensor<B, 3>) -> Tensor<B, 3> {
        match &self.output {
            Some(output) => output.forward(self.dropout.forward(features)),
            None => features,
        }
    }
}

/// An encoder combined with a classification head.
///
/// Both step-wise and sequence-level classification are supported, selected by
/// [`ClassifierConfig::clas_strategy`].
#[derive(Module, Debug)]
pub struct Classifier<B: Backend, E> {
    /// The feature extractor
    pub encoder: E,

    /// Dropout and logit layer
    pub head: Head<B>,

    /// Name of the classifier
    name: String,

    /// Whether every time step is classified on its own
    time_wise: bool,

    /// Length the time axis is padded to, set for `all_time` only
    max_seq_length: Option<usize>,

    /// Whether predictions are a threshold on a single logit
    binary: bool,

    /// Trailing dimension of the logits, unless it depends on the input
    output_size: Option<usize>,
}

impl ClassifierConfig {
    /// Validate the hyperparameters and build a classifier on top of the given encoder
    pub fn init<B: Backend, E: Encoder<B>>(
        &self,
        encoder: E,
        device: &B::Device,
    ) -> Result<Classifier<B, E>, ClassifierError> {
        let hparams = self.validate()?;
        let features = hparams.strategy.feature_size(encoder.output_size());

        let output = match hparams.classes {
            Classes::Fixed(num_classes) => {
                let mut config =
                    LinearConfig::new(features, num_classes).with_bias(hparams.logit_layer.bias);
                if let Some(initializer) = &hparams.logit_layer.initializer {
                    config = config.with_initializer(initializer.clone());
                }

                Some(config.init(device))
            }
            Classes::InferredFromEncoder => None,
        };

        let (binary, output_size) = match hparams.classes {
            Classes::Fixed(1) => (true, None),
            Classes::Fixed(num_classes) => (false, Some(num_classes)),
            Classes::InferredFromEncoder => (features == 1, Some(features)),
        };

        let max_seq_length = match hparams.strategy {
            Strategy::AllTime { max_seq_length } => Some(max_seq_length),
            Strategy::TimeWise | Strategy::ClsTime => None,
        };

        let head = Head::new(DropoutConfig::new(hparams.dropout).init(), output);

        Ok(Classifier {
            encoder,
            head,
            name: hparams.name,
            time_wise: hparams.strategy.is_time_wise(),
            max_seq_length,
            binary,
            output_size,
        })
    }
}

impl<B: Backend, E: Encoder<B>> Classifier<B, E> {
    /// Name of the classifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How encoder outputs are aggregated
    pub fn strategy(&self) -> Strategy {
        match (self.time_wise, self.max_seq_length) {
            (true, _) => Strategy::TimeWise,
            (false, Some(max_seq_length)) => Strategy::AllTime { max_seq_length },
            (false, None) => Strategy::ClsTime,
        }
    }

    /// Whether predictions are a threshold on a single logit
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// The trailing dimension of the logits.
    ///
    /// `None` when the logits of a single-output classifier have no class dimension, so their
    /// size depends only on the input.
    pub fn output_size(&self) -> Option<usize> {
        self.output_size
    }

    /// Encode `inputs` (`[batch_size, max_time]` token ids) and classify them.
    ///
    /// For `cls_time` and `all_time`, logits are `[batch_size, num_classes]` (or `[batch_size]`
    /// when binary) and predictions `[batch_size]`. For `time_wise`, logits are
    /// `[batch_size, max_time, num_classes]` (or `[batch_size, max_time]`) and predictions
    /// `[batch_size, max_time]`.
    pub fn forward(
        &self,
        inputs: Tensor<B, 2, Int>,
        sequence_length: Option<Tensor<B, 1, Int>>,
    ) -> Result<ClassifierOutput<B>, ClassifierError> {
        let [_, time] = inputs.dims();
        if time == 0 {
            return Err(ClassifierError::EmptySequence);
        }

        let enc_outputs = self.encoder.forward(inputs, sequence_length.clone());

        let features = self.strategy().aggregate(enc_outputs, sequence_length)?;

        Ok(self.classify(self.head.forward(features)))
    }

    /// Derive predictions from logits of shape `[batch_size, steps, num_classes]`
    fn classify(&self, logits: Tensor<B, 3>) -> ClassifierOutput<B> {
        let [batch_size, steps, num_classes] = logits.dims();
        let time_wise = self.time_wise;

        if self.binary {
            let logits = logits.reshape([batch_size, steps]);
            let preds = logits.clone().greater_elem(0.0).int();

            if time_wise {
                ClassifierOutput {
                    logits: Logits::BinarySteps(logits),
                    preds: Predictions::Steps(preds),
                }
            } else {
                ClassifierOutput {
                    logits: Logits::BinarySequences(logits.reshape([batch_size])),
                    preds: Predictions::Sequences(preds.reshape([batch_size])),
                }
            }
        } else {
            let preds = logits.clone().argmax(2).reshape([batch_size, steps]);

            if time_wise {
                ClassifierOutput {
                    logits: Logits::Steps(logits),
                    preds: Predictions::Steps(preds),
                }
            } else {
                ClassifierOutput {
                    logits: Logits::Sequences(logits.reshape([batch_size, num_classes])),
                    preds: Predictions::Sequences(preds.reshape([batch_size])),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    type TestBackend = NdArray;

    /// Returns the same features for every input, cropped to the input's time dimension
    #[derive(Module, Debug)]
    struct FixedEncoder<B: Backend> {
        features: Tensor<B, 3>,
    }

    impl FixedEncoder<TestBackend> {
        /// [2, 4, 2] where the two features of every step cancel out
        fn new() -> Self {
            let device = Default::default();
            let features = Tensor::from_floats(
                [
                    [[1.0, -1.0], [-1.0, 1.0], [2.0, -2.0], [-3.0, 3.0]],
                    [[1.0, -1.0], [-2.0, 2.0], [3.0, -3.0], [-4.0, 4.0]],
                ],
                &device,
            );

            Self { features }
        }

        /// [2, 4, 1], the first feature of [`FixedEncoder::new`]
        fn single() -> Self {
            let features = Self::new().features.slice([0..2, 0..4, 0..1]);

            Self { features }
        }
    }

    impl Encoder<TestBackend> for FixedEncoder<TestBackend> {
        fn output_size(&self) -> usize {
            self.features.dims()[2]
        }

        fn forward(
            &self,
            inputs: Tensor<TestBackend, 2, Int>,
            _sequence_length: Option<Tensor<TestBackend, 1, Int>>,
        ) -> Tensor<TestBackend, 3> {
            let [batch_size, time] = inputs.dims();
            let [_, _, width] = self.features.dims();

            self.features.clone().slice([0..batch_size, 0..time, 0..width])
        }
    }

    fn inputs(time: usize) -> Tensor<TestBackend, 2, Int> {
        Tensor::zeros([2, time], &Default::default())
    }

    /// Logit layer whose every weight is 1, so each logit is the sum of the features
    fn summing_kwargs() -> Option<serde_json::Value> {
        Some(json!({ "bias": false, "initializer": { "Constant": { "value": 1.0 } } }))
    }

    fn init(config: ClassifierConfig) -> Classifier<TestBackend, FixedEncoder<TestBackend>> {
        config
            .with_dropout(0.0)
            .init(FixedEncoder::new(), &Default::default())
            .unwrap()
    }

    #[test]
    fn cls_time_without_logit_layer() {
        let classifier = init(ClassifierConfig::new().with_num_classes(0));

        let output = classifier.forward(inputs(4), None).unwrap();

        assert!(!classifier.is_binary());
        assert_eq!(classifier.output_size(), Some(2));
        assert_eq!(output.logits.dims(), vec![2, 2]);
        assert_eq!(output.logits.to_vec(), vec![-3.0, 3.0, -4.0, 4.0]);
        assert_eq!(output.preds.dims(), vec![2]);
        assert_eq!(output.preds.to_vec(), vec![1, 1]);
    }

    #[test]
    fn cls_time_with_lengths() {
        let classifier = init(ClassifierConfig::new().with_num_classes(0));
        let lengths = Tensor::from_ints([3, 1], &Default::default());

        let output = classifier.forward(inputs(4), Some(lengths)).unwrap();

        assert_eq!(output.logits.to_vec(), vec![2.0, -2.0, 1.0, -1.0]);
        assert_eq!(output.preds.to_vec(), vec![0, 0]);
    }

    #[test]
    fn time_wise_classifies_each_step() {
        let classifier = init(
            ClassifierConfig::new()
                .with_num_classes(0)
                .with_clas_strategy("time_wise".to_string()),
        );

        let output = classifier.forward(inputs(3), None).unwrap();

        assert_eq!(output.logits.dims(), vec![2, 3, 2]);
        assert_eq!(output.preds.dims(), vec![2, 3]);
        assert_eq!(output.preds.to_vec(), vec![0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn fixed_classes_project_features() {
        let classifier = init(
            ClassifierConfig::new()
                .with_num_classes(3)
                .with_logit_layer_kwargs(summing_kwargs()),
        );

        let output = classifier.forward(inputs(4), None).unwrap();

        assert_eq!(classifier.output_size(), Some(3));
        assert_eq!(output.logits.dims(), vec![2, 3]);
        assert_eq!(output.preds.dims(), vec![2]);
    }

    #[test]
    fn binary_predictions_threshold_logits() {
        for strategy in ["cls_time", "time_wise", "all_time"] {
            let classifier = init(
                ClassifierConfig::new()
                    .with_num_classes(1)
                    .with_clas_strategy(strategy.to_string())
                    .with_max_seq_length(Some(6)),
            );

            let output = classifier.forward(inputs(4), None).unwrap();

            assert!(classifier.is_binary());
            assert_eq!(classifier.output_size(), None);

            let logits = output.logits.to_vec();
            let preds = output.preds.to_vec();
            assert_eq!(logits.len(), preds.len());
            assert!(preds.iter().all(|p| *p == 0 || *p == 1));

            let expected = logits.iter().map(|l| i64::from(*l > 0.0)).collect::<Vec<_>>();
            assert_eq!(preds, expected);
        }
    }

    #[test]
    fn binary_shapes_drop_the_class_dimension() {
        let time_wise = init(
            ClassifierConfig::new()
                .with_num_classes(1)
                .with_clas_strategy("time_wise".to_string()),
        );
        let output = time_wise.forward(inputs(4), None).unwrap();
        assert!(matches!(output.logits, Logits::BinarySteps(_)));
        assert_eq!(output.logits.dims(), vec![2, 4]);
        assert_eq!(output.preds.dims(), vec![2, 4]);

        let cls_time = init(ClassifierConfig::new().with_num_classes(1));
        let output = cls_time.forward(inputs(4), None).unwrap();
        assert!(matches!(output.logits, Logits::BinarySequences(_)));
        assert_eq!(output.logits.dims(), vec![2]);
        assert_eq!(output.preds.dims(), vec![2]);
    }

    #[test]
    fn all_time_pads_before_projecting() {
        let classifier = init(
            ClassifierConfig::new()
                .with_num_classes(2)
                .with_clas_strategy("all_time".to_string())
                .with_max_seq_length(Some(10))
                .with_logit_layer_kwargs(summing_kwargs()),
        );

        let output = classifier.forward(inputs(3), None).unwrap();

        assert_eq!(classifier.output_size(), Some(2));
        assert_eq!(output.logits.dims(), vec![2, 2]);
        // Each step sums to zero, and so do the padded ones
        assert_eq!(output.logits.to_vec(), vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn all_time_inferred_output_size() {
        let classifier = init(
            ClassifierConfig::new()
                .with_num_classes(0)
                .with_clas_strategy("all_time".to_string())
                .with_max_seq_length(Some(5)),
        );

        let output = classifier.forward(inputs(4), None).unwrap();

        assert_eq!(classifier.output_size(), Some(10));
        assert_eq!(output.logits.dims(), vec![2, 10]);
        assert_eq!(output.preds.dims(), vec![2]);
    }

    #[test]
    fn all_time_without_max_seq_length_is_rejected() {
        let result = ClassifierConfig::new()
            .with_clas_strategy("all_time".to_string())
            .init::<TestBackend, _>(FixedEncoder::new(), &Default::default());

        assert_eq!(result.err(), Some(ClassifierError::MissingMaxSeqLength));
    }

    #[test]
    fn all_time_rejects_inputs_past_max_seq_length() {
        let classifier = init(
            ClassifierConfig::new()
                .with_clas_strategy("all_time".to_string())
                .with_max_seq_length(Some(2)),
        );

        let result = classifier.forward(inputs(4), None);

        assert!(matches!(
            result,
            Err(ClassifierError::SequenceTooLong {
                time: 4,
                max_seq_length: 2
            })
        ));
    }

    #[test]
    fn single_feature_encoder_is_binary_when_inferred() {
        let config = ClassifierConfig::new().with_num_classes(0).with_dropout(0.0);

        let cls_time = config
            .init(FixedEncoder::single(), &Default::default())
            .unwrap();
        assert!(cls_time.is_binary());
        assert_eq!(cls_time.output_size(), Some(1));

        let output = cls_time.forward(inputs(4), None).unwrap();
        assert!(matches!(output.logits, Logits::BinarySequences(_)));
        assert_eq!(output.logits.to_vec(), vec![-3.0, -4.0]);
        assert_eq!(output.preds.to_vec(), vec![0, 0]);

        let lengths = Tensor::from_ints([3, 1], &Default::default());
        let output = cls_time.forward(inputs(4), Some(lengths)).unwrap();
        assert_eq!(output.logits.to_vec(), vec![2.0, 1.0]);
        assert_eq!(output.preds.to_vec(), vec![1, 1]);

        let time_wise = config
            .with_clas_strategy("time_wise".to_string())
            .init(FixedEncoder::single(), &Default::default())
            .unwrap();
        assert!(time_wise.is_binary());

        let output = time_wise.forward(inputs(3), None).unwrap();
        assert!(matches!(output.logits, Logits::BinarySteps(_)));
        assert_eq!(output.logits.dims(), vec![2, 3]);
        assert_eq!(output.logits.to_vec(), vec![1.0, -1.0, 2.0, 1.0, -2.0, 3.0]);
        assert_eq!(output.preds.dims(), vec![2, 3]);
        assert_eq!(output.preds.to_vec(), vec![1, 0, 1, 1, 0, 1]);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let classifier = init(ClassifierConfig::new());

        let result = classifier.forward(inputs(0), None);

        assert!(matches!(result, Err(ClassifierError::EmptySequence)));
    }

    #[test]
    fn strategy_is_kept_after_init() {
        let classifier = init(
            ClassifierConfig::new()
                .with_clas_strategy("all_time".to_string())
                .with_max_seq_length(Some(6)),
        );
        assert_eq!(classifier.strategy(), Strategy::AllTime { max_seq_length: 6 });
        assert_eq!(classifier.name(), "bert_classifier");

        // Only all_time keeps the maximum length
        let classifier = init(ClassifierConfig::new().with_max_seq_length(Some(6)));
        assert_eq!(classifier.strategy(), Strategy::ClsTime);
    }

    #[test]
    fn records_restore_the_logit_layer() {
        let config = ClassifierConfig::new().with_num_classes(3);
        let trained = init(config.clone());
        let expected = trained.forward(inputs(4), None).unwrap().logits.to_vec();

        let zeros = json!({ "initializer": { "Constant": { "value": 0.0 } } });
        let fresh = init(config.with_logit_layer_kwargs(Some(zeros)));
        assert_eq!(
            fresh.forward(inputs(4), None).unwrap().logits.to_vec(),
            vec![0.0; 6]
        );

        let restored = fresh.load_record(trained.into_record());

        assert!(!restored.is_binary());
        assert_eq!(restored.output_size(), Some(3));
        assert_eq!(
            restored.forward(inputs(4), None).unwrap().logits.to_vec(),
            expected
        );
    }
}
