pub mod boundary;

pub use boundary::{
    decision_boundary, BoundaryError, BoundaryField, DEFAULT_GRID_RESOLUTION, GRID_MARGIN,
};
pub use dense_net::{
    fit, Adam, DenseNet, EpochRecord, Gradients, TrainConfig, TrainError, DEFAULT_HIDDEN_DIM,
};
pub use moonbench_helpers::{
    features_matrix, Batch, BatchLoader, Classifier, DataPoint, Float, LoaderError, ModelError,
    Pass,
};
pub use moons::{
    reference_moons, transform, MoonsError, MoonsGenerator, REFERENCE_POINTS_PER_CLASS,
};
