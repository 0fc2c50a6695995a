use burn::tensor::{backend::Backend, Tensor};

/// The highest-scoring class id along the last axis, flattened in row-major order
pub fn argmax_ids<B: Backend, const D: usize>(scores: Tensor<B, D>) -> Vec<usize> {
    scores
        .argmax(D - 1)
        .into_data()
        .convert::<i64>()
        .value
        .into_iter()
        .map(|index| index as usize)
        .collect()
}
