use std::fmt::Display;

use burn::tensor::{backend::Backend, Int, Tensor};

use super::ClassifierError;

/// The unique string token for step-wise classification
pub static TIME_WISE: &str = "time_wise";

/// The unique string token for classification on the last valid step
pub static CLS_TIME: &str = "cls_time";

/// The unique string token for classification on all steps flattened together
pub static ALL_TIME: &str = "all_time";

/// How encoder outputs are turned into classifier features
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Classify every time step on its own output
    TimeWise,

    /// Classify each sequence on the output of its last valid time step
    ClsTime,

    /// Classify each sequence on the outputs of all time steps, zero padded to a fixed length
    AllTime {
        /// Length the time axis is padded to before flattening
        max_seq_length: usize,
    },
}

impl Strategy {
    /// Resolve a strategy from its name and the configured maximum sequence length
    pub fn from_config(name: &str, max_seq_length: Option<usize>) -> Result<Self, ClassifierError> {
        if name == TIME_WISE {
            Ok(Strategy::TimeWise)
        } else if name == CLS_TIME {
            Ok(Strategy::ClsTime)
        } else if name == ALL_TIME {
            match max_seq_length {
                Some(max_seq_length) if max_seq_length > 0 => {
                    Ok(Strategy::AllTime { max_seq_length })
                }
                _ => Err(ClassifierError::MissingMaxSeqLength),
            }
        } else {
            Err(ClassifierError::UnknownStrategy(name.to_string()))
        }
    }

    /// Whether each time step gets its own prediction
    pub fn is_time_wise(&self) -> bool {
        matches!(self, Strategy::TimeWise)
    }

    /// The size of the aggregated feature vector for a given encoder output size
    pub fn feature_size(&self, encoder_output_size: usize) -> usize {
        match self {
            Strategy::AllTime { max_seq_length } => encoder_output_size * max_seq_length,
            Strategy::TimeWise | Strategy::ClsTime => encoder_output_size,
        }
    }

    /// Aggregate encoder outputs of shape `[batch_size, max_time, hidden_size]`.
    ///
    /// The result is always `[batch_size, steps, features]`, where `steps` is `max_time` for
    /// [`Strategy::TimeWise`] and 1 for the sequence-level strategies.
    pub fn aggregate<B: Backend>(
        &self,
        enc_outputs: Tensor<B, 3>,
        sequence_length: Option<Tensor<B, 1, Int>>,
    ) -> Result<Tensor<B, 3>, ClassifierError> {
        let [batch_size, time, hidden_size] = enc_outputs.dims();
        if time == 0 {
            return Err(ClassifierError::EmptySequence);
        }

        match self {
            Strategy::TimeWise => Ok(enc_outputs),
            Strategy::ClsTime => Ok(match sequence_length {
                None => enc_outputs.slice([0..batch_size, time - 1..time, 0..hidden_size]),
                Some(sequence_length) => {
                    let last = last_step_index(sequence_length, time)
                        .reshape([batch_size, 1, 1])
                        .repeat(2, hidden_size);

                    enc_outputs.gather(1, last)
                }
            }),
            Strategy::AllTime { max_seq_length } => {
                let max_seq_length = *max_seq_length;
                if time > max_seq_length {
                    return Err(ClassifierError::SequenceTooLong {
                        time,
                        max_seq_length,
                    });
                }

                let padded = if time < max_seq_length {
                    let device = enc_outputs.device();
                    let padding =
                        Tensor::zeros([batch_size, max_seq_length - time, hidden_size], &device);

                    Tensor::cat(vec![enc_outputs, padding], 1)
                } else {
                    enc_outputs
                };

                Ok(padded.reshape([batch_size, 1, hidden_size * max_seq_length]))
            }
        }
    }
}

/// Index of the step right after the last real token of each sequence.
///
/// Empty sequences fall back to the final step, and lengths past the end are clamped.
fn last_step_index<B: Backend>(sequence_length: Tensor<B, 1, Int>, time: usize) -> Tensor<B, 1, Int> {
    let index = sequence_length.clamp_max(time as i64).sub_scalar(1);
    let empty = index.clone().lower_elem(0);

    index.mask_fill(empty, time as i64 - 1)
}

impl TryFrom<&str> for Strategy {
    type Error = ClassifierError;

    /// Resolve a strategy that does not depend on a maximum sequence length
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Strategy::from_config(value, None)
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::TimeWise => TIME_WISE,
            Strategy::ClsTime => CLS_TIME,
            Strategy::AllTime { .. } => ALL_TIME,
        };

        write!(f, "{}", name)
    }
}
