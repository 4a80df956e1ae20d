use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

/// Right-pad token id lists to `seq_length` with `pad_token`, as a `[batch_size, seq_length]`
/// tensor. Lists longer than `seq_length` are truncated.
pub fn pad_to<B: Backend>(
    pad_token: usize,
    tokens_list: Vec<Vec<usize>>,
    seq_length: usize,
    device: &B::Device,
) -> Tensor<B, 2, Int> {
    let batch_size = tokens_list.len();

    let mut values = Vec::with_capacity(batch_size * seq_length);

    for tokens in tokens_list {
        let padding = seq_length.saturating_sub(tokens.len());

        values.extend(
            tokens
                .into_iter()
                .take(seq_length)
                .chain(std::iter::repeat(pad_token).take(padding))
                .map(|e| (e as i64).elem::<B::IntElem>()),
        );
    }

    Tensor::from_data(
        Data::new(values, Shape::new([batch_size, seq_length])),
        device,
    )
}

/// Build a 1D integer tensor from a list of sizes, such as sequence lengths or class ids
pub fn to_int_tensor<B: Backend>(values: &[usize], device: &B::Device) -> Tensor<B, 1, Int> {
    let len = values.len();
    let values = values
        .iter()
        .map(|e| (*e as i64).elem::<B::IntElem>())
        .collect();

    Tensor::from_data(Data::new(values, Shape::new([len])), device)
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;

    use super::*;

    type TestBackend = NdArray;

    #[test]
    fn pads_and_truncates() {
        let device = Default::default();

        let tensor = pad_to::<TestBackend>(0, vec![vec![4, 5], vec![6, 7, 8, 9]], 3, &device);

        assert_eq!(tensor.dims(), [2, 3]);
        assert_eq!(
            tensor.into_data().convert::<i64>().value,
            vec![4, 5, 0, 6, 7, 8]
        );
    }

    #[test]
    fn builds_int_tensors() {
        let device = Default::default();

        let tensor = to_int_tensor::<TestBackend>(&[3, 1, 4], &device);

        assert_eq!(tensor.dims(), [3]);
        assert_eq!(tensor.into_data().convert::<i64>().value, vec![3, 1, 4]);
    }
}
