use crate::{Adam, DenseNet};
use moonbench_helpers::{BatchLoader, DataPoint, Float, LoaderError, ModelError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors that can occur during training.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainError {
    /// The learning rate was not strictly positive.
    InvalidLearningRate,
    /// `max_epochs` was zero.
    InvalidMaxEpochs,
    /// `batch_size` was zero.
    InvalidBatchSize,
    /// The accuracy stop threshold was outside [0, 1].
    InvalidStopThreshold,
    /// A training or test dataset was empty.
    EmptyDataSet,
    /// A batch or label shape did not match the model.
    Model(ModelError),
    /// The batch loss became NaN or infinite during the given epoch. The
    /// model's parameters are rolled back to the last completed epoch.
    NonFiniteLoss { epoch: usize },
}

impl Display for TrainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainError::InvalidLearningRate => {
                write!(f, "Learning rate must be strictly positive")
            }
            TrainError::InvalidMaxEpochs => write!(f, "max_epochs must be at least 1"),
            TrainError::InvalidBatchSize => write!(f, "batch_size must be at least 1"),
            TrainError::InvalidStopThreshold => {
                write!(f, "accuracy_stop_threshold must lie in [0, 1]")
            }
            TrainError::EmptyDataSet => write!(f, "Training and test datasets must not be empty"),
            TrainError::Model(e) => write!(f, "{}", e),
            TrainError::NonFiniteLoss { epoch } => {
                write!(f, "Loss became non-finite during epoch {}", epoch)
            }
        }
    }
}

impl Error for TrainError {}

impl From<ModelError> for TrainError {
    fn from(e: ModelError) -> Self {
        TrainError::Model(e)
    }
}

impl From<LoaderError> for TrainError {
    fn from(e: LoaderError) -> Self {
        match e {
            LoaderError::EmptyDataSet => TrainError::EmptyDataSet,
            LoaderError::InvalidBatchSize => TrainError::InvalidBatchSize,
        }
    }
}

/// Hyperparameters for one training run.
#[derive(Debug, Clone)]
pub struct TrainConfig<F: Float> {
    pub learning_rate: F,
    pub max_epochs: usize,
    pub batch_size: usize,
    /// Training stops early once test accuracy exceeds this threshold.
    pub accuracy_stop_threshold: F,
    /// Seed for the mini-batch shuffle stream.
    pub seed: u64,
}

impl<F: Float> TrainConfig<F> {
    /// Creates a config with the default 0.90 early-stop threshold.
    pub fn new(learning_rate: F, max_epochs: usize, batch_size: usize, seed: u64) -> Self {
        Self {
            learning_rate,
            max_epochs,
            batch_size,
            accuracy_stop_threshold: F::cast(0.9).unwrap(),
            seed,
        }
    }

    fn validate(&self) -> Result<(), TrainError> {
        if !(self.learning_rate > F::zero()) {
            return Err(TrainError::InvalidLearningRate);
        }
        if self.max_epochs == 0 {
            return Err(TrainError::InvalidMaxEpochs);
        }
        if self.batch_size == 0 {
            return Err(TrainError::InvalidBatchSize);
        }
        if self.accuracy_stop_threshold < F::zero() || self.accuracy_stop_threshold > F::one() {
            return Err(TrainError::InvalidStopThreshold);
        }
        Ok(())
    }
}

/// Metrics of one completed epoch. Records are immutable once appended to the
/// history returned by [`fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct EpochRecord<F: Float> {
    /// 1-based epoch number.
    pub epoch: usize,
    pub train_loss: F,
    pub train_accuracy: F,
    pub test_loss: F,
    pub test_accuracy: F,
    /// True iff this epoch crossed the accuracy threshold and ended the run.
    pub stopped_early: bool,
}

/// Accumulates evaluation metrics across a full pass and divides exactly
/// once at the end, so uneven final-batch sizes cannot bias the result.
#[derive(Debug, Clone, Default)]
struct MetricAccumulator<F: Float> {
    loss_sum: F,
    correct: usize,
    total: usize,
}

impl<F: Float> MetricAccumulator<F> {
    fn add(&mut self, batch_loss_sum: F, batch_correct: usize, batch_size: usize) {
        self.loss_sum += &batch_loss_sum;
        self.correct += batch_correct;
        self.total += batch_size;
    }

    /// Per-example mean loss and accuracy.
    fn finish(&self) -> (F, F) {
        let total = F::cast(self.total).unwrap();
        (
            self.loss_sum / total,
            F::cast(self.correct).unwrap() / total,
        )
    }
}

/// Trains `net` on `train_data`, evaluating against both sets after every
/// epoch, and returns the full per-epoch history.
///
/// Each epoch runs one shuffled mini-batch pass with an Adam update per
/// batch, then a full unshuffled evaluation pass over each dataset. The run
/// ends early as soon as test accuracy exceeds
/// `config.accuracy_stop_threshold`; otherwise it runs `max_epochs` epochs.
///
/// # Errors
///
/// Invalid hyperparameters and shape mismatches are reported before any
/// parameter is touched. If a batch loss turns NaN/infinite mid-epoch,
/// `TrainError::NonFiniteLoss` is returned and `net` is restored to the state
/// it had after the last completed epoch.
pub fn fit<F: Float>(
    net: &mut DenseNet<F>,
    train_data: &[DataPoint<usize, F>],
    test_data: &[DataPoint<usize, F>],
    config: &TrainConfig<F>,
) -> Result<Vec<EpochRecord<F>>, TrainError> {
    config.validate()?;
    if train_data.is_empty() || test_data.is_empty() {
        return Err(TrainError::EmptyDataSet);
    }

    let mut loader = BatchLoader::new(train_data, config.batch_size, true, config.seed)?;
    let mut adam = Adam::new(config.learning_rate, net);
    let mut history = Vec::new();

    for epoch in 1..=config.max_epochs {
        let snapshot = net.clone();

        for batch in loader.pass() {
            let (loss, grads) = net.loss_and_gradients(batch.inputs.view(), &batch.labels)?;
            if !loss.is_finite() {
                *net = snapshot;
                return Err(TrainError::NonFiniteLoss { epoch });
            }
            adam.step(net, &grads);
        }

        let (train_loss, train_accuracy) = evaluate(net, train_data, config.batch_size)?;
        let (test_loss, test_accuracy) = evaluate(net, test_data, config.batch_size)?;

        let stopped_early = test_accuracy > config.accuracy_stop_threshold;
        history.push(EpochRecord {
            epoch,
            train_loss,
            train_accuracy,
            test_loss,
            test_accuracy,
            stopped_early,
        });
        if stopped_early {
            break;
        }
    }

    Ok(history)
}

/// One full unshuffled evaluation pass: per-example mean loss and accuracy.
fn evaluate<F: Float>(
    net: &DenseNet<F>,
    data: &[DataPoint<usize, F>],
    batch_size: usize,
) -> Result<(F, F), TrainError> {
    let mut loader = BatchLoader::new(data, batch_size, false, 0)?;
    let mut metrics = MetricAccumulator::default();
    for batch in loader.pass() {
        let (loss_sum, correct) = net.loss_and_correct(batch.inputs.view(), &batch.labels)?;
        metrics.add(loss_sum, correct, batch.labels.len());
    }
    debug_assert_eq!(metrics.total, data.len());
    Ok(metrics.finish())
}
