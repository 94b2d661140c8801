use crate::{DataPoint, Float};
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Errors that can occur when constructing a batch loader.
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// The dataset is empty.
    EmptyDataSet,
    /// `batch_size` was zero.
    InvalidBatchSize,
}

impl Display for LoaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::EmptyDataSet => write!(f, "Cannot batch an empty dataset"),
            LoaderError::InvalidBatchSize => write!(f, "batch_size must be at least 1"),
        }
    }
}

impl Error for LoaderError {}

/// One materialized mini-batch: a features matrix (one row per point), the
/// matching labels, and the dataset indices the batch was drawn from.
#[derive(Debug, Clone)]
pub struct Batch<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub inputs: Array2<F>,
    pub labels: Vec<L>,
    pub indices: Vec<usize>,
}

/// Slices a dataset into mini-batches, re-permuting on every pass.
///
/// The loader owns its RNG stream: with `shuffle` enabled, each call to
/// [`BatchLoader::pass`] draws a fresh permutation from the seeded
/// Xoshiro256++ stream, so a loader constructed with the same seed replays
/// the same sequence of passes.
#[derive(Debug, Clone)]
pub struct BatchLoader<'a, L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    data: &'a [DataPoint<L, F>],
    batch_size: usize,
    shuffle: bool,
    rng: Xoshiro256PlusPlus,
}

impl<'a, L, F> BatchLoader<'a, L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    /// Creates a loader over `data`.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::EmptyDataSet` if `data` is empty and
    /// `LoaderError::InvalidBatchSize` if `batch_size` is zero.
    pub fn new(
        data: &'a [DataPoint<L, F>],
        batch_size: usize,
        shuffle: bool,
        seed: u64,
    ) -> Result<Self, LoaderError> {
        if data.is_empty() {
            return Err(LoaderError::EmptyDataSet);
        }
        if batch_size == 0 {
            return Err(LoaderError::InvalidBatchSize);
        }
        Ok(Self {
            data,
            batch_size,
            shuffle,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }

    /// Starts a new pass over the whole dataset.
    ///
    /// Every index appears exactly once per pass. With shuffling enabled the
    /// order is a fresh permutation; otherwise it is the dataset order.
    pub fn pass(&mut self) -> Pass<'a, L, F> {
        let mut order: Vec<usize> = (0..self.data.len()).collect();
        if self.shuffle {
            order.shuffle(&mut self.rng);
        }
        Pass {
            data: self.data,
            order,
            batch_size: self.batch_size,
            cursor: 0,
        }
    }
}

/// A single finite pass over the dataset, yielding [`Batch`]es.
///
/// All batches hold `batch_size` points except possibly the last, which holds
/// the remainder; an empty trailing batch is never produced.
#[derive(Debug)]
pub struct Pass<'a, L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    data: &'a [DataPoint<L, F>],
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl<L, F> Iterator for Pass<'_, L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    type Item = Batch<L, F>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());
        let indices: Vec<usize> = self.order[self.cursor..end].to_vec();
        self.cursor = end;

        let n_features = self.data[0].features.len();
        let mut inputs = Array2::zeros((indices.len(), n_features));
        let mut labels = Vec::with_capacity(indices.len());
        for (row, &i) in indices.iter().enumerate() {
            inputs.row_mut(row).assign(&self.data[i].features);
            labels.push(self.data[i].label.clone());
        }

        Some(Batch {
            inputs,
            labels,
            indices,
        })
    }
}
