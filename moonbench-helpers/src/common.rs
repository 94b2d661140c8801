use crate::Float;
use ndarray::{Array1, Array2};
use std::fmt::Debug;

/// Represents a single data point with features and a label.
///
/// L: The type of the label (e.g., String, usize, enum).
/// F: The float type for the features (e.g., f32, f64).
#[derive(Debug, Clone)]
pub struct DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub features: Array1<F>,
    pub label: L,
}

impl<L, F> DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub fn new(features: Array1<F>, label: L) -> Self {
        DataPoint { features, label }
    }
}

/// Stacks the feature vectors of a dataset slice into one matrix,
/// one row per data point, preserving order.
pub fn features_matrix<L, F>(data: &[DataPoint<L, F>]) -> Array2<F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    if data.is_empty() {
        return Array2::zeros((0, 0));
    }
    let n_features = data[0].features.len();
    let mut out = Array2::zeros((data.len(), n_features));
    for (i, dp) in data.iter().enumerate() {
        out.row_mut(i).assign(&dp.features);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_features_matrix_preserves_order() {
        let data = vec![
            DataPoint::new(array![1.0, 2.0], 0usize),
            DataPoint::new(array![3.0, 4.0], 1usize),
        ];
        let m = features_matrix(&data);
        assert_eq!(m.shape(), &[2, 2]);
        assert_eq!(m[[0, 1]], 2.0);
        assert_eq!(m[[1, 0]], 3.0);
    }

    #[test]
    fn test_features_matrix_empty() {
        let data: Vec<DataPoint<usize, f64>> = vec![];
        let m = features_matrix(&data);
        assert_eq!(m.shape(), &[0, 0]);
    }
}
