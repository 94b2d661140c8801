use crate::Float;
use ndarray::{Array2, ArrayView2};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors that can occur when querying a model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The input batch's feature dimension does not match the model's input dimension.
    DimensionMismatch { expected: usize, found: usize },
    /// A label referenced a class index outside the model's output range.
    LabelOutOfRange { label: usize, n_classes: usize },
    /// A layer was configured with zero units.
    InvalidLayerSize,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DimensionMismatch { expected, found } => write!(
                f,
                "Input dimension mismatch: model expects {}, batch has {}",
                expected, found
            ),
            ModelError::LabelOutOfRange { label, n_classes } => write!(
                f,
                "Label {} is out of range for a model with {} classes",
                label, n_classes
            ),
            ModelError::InvalidLayerSize => write!(f, "Layer sizes must be greater than zero"),
        }
    }
}

impl Error for ModelError {}

/// The capability shared by all trainable classifiers: score a batch of points.
///
/// `predict` takes one row per point and returns one row per point, with one
/// real-valued score per class. Consumers that only need a scalar field (the
/// decision-boundary evaluator) read the first score column.
pub trait Classifier<F: Float> {
    /// Number of input features each point must have.
    fn input_dim(&self) -> usize;

    /// Number of classes, i.e. the width of each output score row.
    fn n_classes(&self) -> usize;

    /// Scores every row of `inputs`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::DimensionMismatch` if `inputs` does not have
    /// `input_dim()` columns.
    fn predict(&self, inputs: ArrayView2<F>) -> Result<Array2<F>, ModelError>;
}
