use moonbench_helpers::{Classifier, Float, ModelError};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::f64::consts::PI;

mod optim;
mod train;

pub use optim::Adam;
pub use train::{fit, EpochRecord, TrainConfig, TrainError};

/// Hidden width used by the stock two-moons classifier.
pub const DEFAULT_HIDDEN_DIM: usize = 500;

/// Epsilon added inside log() so that cross-entropy never hits log(0).
const LOG_EPS: f64 = 1e-12;

/// A two-layer fully-connected classifier: dense(input → hidden) with a
/// rectified-linear nonlinearity, then dense(hidden → classes) producing raw
/// logits.
///
/// The four parameter arrays are owned exclusively by the network and are
/// only mutated through the optimizer step during [`fit`].
#[derive(Debug, Clone)]
pub struct DenseNet<F: Float> {
    pub(crate) w1: Array2<F>,
    pub(crate) b1: Array1<F>,
    pub(crate) w2: Array2<F>,
    pub(crate) b2: Array1<F>,
}

/// Parameter gradients mirroring [`DenseNet`]'s shapes, produced by one
/// backward pass over a batch (gradients of the *summed* batch loss).
#[derive(Debug, Clone)]
pub struct Gradients<F: Float> {
    pub w1: Array2<F>,
    pub b1: Array1<F>,
    pub w2: Array2<F>,
    pub b2: Array1<F>,
}

impl<F: Float> DenseNet<F> {
    /// Creates a network with He-initialized hidden weights (ReLU fan-in
    /// variance) and Xavier-initialized output weights; biases start at zero.
    /// All draws come from the seeded Xoshiro256++ stream.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidLayerSize` if any dimension is zero.
    pub fn new(
        input_dim: usize,
        hidden_dim: usize,
        n_classes: usize,
        seed: u64,
    ) -> Result<Self, ModelError> {
        if input_dim == 0 || hidden_dim == 0 || n_classes == 0 {
            return Err(ModelError::InvalidLayerSize);
        }
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let he = (2.0 / input_dim as f64).sqrt();
        let xavier = (1.0 / hidden_dim as f64).sqrt();
        let w1 = random_normal_matrix(input_dim, hidden_dim, he, &mut rng);
        let w2 = random_normal_matrix(hidden_dim, n_classes, xavier, &mut rng);

        Ok(Self {
            w1,
            b1: Array1::zeros(hidden_dim),
            w2,
            b2: Array1::zeros(n_classes),
        })
    }

    /// The stock two-moons classifier: 2 inputs, 500 hidden units, 2 classes.
    pub fn moons(seed: u64) -> Self {
        // Dimensions are non-zero constants, so construction cannot fail.
        match Self::new(2, DEFAULT_HIDDEN_DIM, 2, seed) {
            Ok(net) => net,
            Err(_) => unreachable!(),
        }
    }

    /// Total number of trainable parameters.
    pub fn parameter_count(&self) -> usize {
        self.w1.len() + self.b1.len() + self.w2.len() + self.b2.len()
    }

    fn check_input(&self, inputs: &ArrayView2<F>) -> Result<(), ModelError> {
        if inputs.ncols() != self.input_dim() {
            return Err(ModelError::DimensionMismatch {
                expected: self.input_dim(),
                found: inputs.ncols(),
            });
        }
        Ok(())
    }

    /// Forward pass returning the hidden activations and the logits.
    fn forward(&self, inputs: ArrayView2<F>) -> (Array2<F>, Array2<F>) {
        let mut z1 = inputs.dot(&self.w1);
        z1 += &self.b1;
        let a1 = z1.mapv(|v| if v > F::zero() { v } else { F::zero() });
        let mut logits = a1.dot(&self.w2);
        logits += &self.b2;
        (a1, logits)
    }

    /// Summed cross-entropy loss and correct-prediction count over a batch,
    /// without any gradient work (evaluation mode).
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` for a malformed batch or a labels/rows length
    /// mismatch; `LabelOutOfRange` for a label outside the class range.
    pub fn loss_and_correct(
        &self,
        inputs: ArrayView2<F>,
        labels: &[usize],
    ) -> Result<(F, usize), ModelError> {
        self.check_input(&inputs)?;
        let (_, logits) = self.forward(inputs);
        let probs = softmax(&logits);
        let loss = cross_entropy_sum(&probs, labels, self.n_classes())?;
        let correct = count_correct(&probs, labels);
        Ok((loss, correct))
    }

    /// Summed cross-entropy loss and its gradients w.r.t. every parameter,
    /// over one batch.
    pub fn loss_and_gradients(
        &self,
        inputs: ArrayView2<F>,
        labels: &[usize],
    ) -> Result<(F, Gradients<F>), ModelError> {
        self.check_input(&inputs)?;
        let (a1, logits) = self.forward(inputs);
        let probs = softmax(&logits);
        let loss = cross_entropy_sum(&probs, labels, self.n_classes())?;

        // Softmax composed with cross-entropy: ∂L/∂logits = probs − one-hot.
        let mut delta2 = probs;
        for (row, &label) in labels.iter().enumerate() {
            delta2[[row, label]] -= &F::one();
        }

        let grad_w2 = a1.t().dot(&delta2);
        let grad_b2 = delta2.sum_axis(Axis(0));

        // Backprop through the ReLU: pass gradient only where a1 > 0.
        let mut delta1 = delta2.dot(&self.w2.t());
        delta1.zip_mut_with(&a1, |d, &a| {
            if a <= F::zero() {
                *d = F::zero();
            }
        });

        let grad_w1 = inputs.t().dot(&delta1);
        let grad_b1 = delta1.sum_axis(Axis(0));

        Ok((
            loss,
            Gradients {
                w1: grad_w1,
                b1: grad_b1,
                w2: grad_w2,
                b2: grad_b2,
            },
        ))
    }
}

impl<F: Float> Classifier<F> for DenseNet<F> {
    fn input_dim(&self) -> usize {
        self.w1.nrows()
    }

    fn n_classes(&self) -> usize {
        self.w2.ncols()
    }

    fn predict(&self, inputs: ArrayView2<F>) -> Result<Array2<F>, ModelError> {
        self.check_input(&inputs)?;
        let (_, logits) = self.forward(inputs);
        Ok(logits)
    }
}

/// Row-wise softmax with the max-subtraction trick for stability.
pub(crate) fn softmax<F: Float>(logits: &Array2<F>) -> Array2<F> {
    let mut probs = logits.clone();
    for mut row in probs.rows_mut() {
        let max = row.iter().cloned().fold(F::neg_infinity(), F::max);
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    probs
}

/// Summed (not averaged) cross-entropy of softmax probabilities against
/// one-hot labels.
fn cross_entropy_sum<F: Float>(
    probs: &Array2<F>,
    labels: &[usize],
    n_classes: usize,
) -> Result<F, ModelError> {
    if labels.len() != probs.nrows() {
        return Err(ModelError::DimensionMismatch {
            expected: probs.nrows(),
            found: labels.len(),
        });
    }
    let eps = F::cast(LOG_EPS).unwrap();
    let mut loss = F::zero();
    for (row, &label) in labels.iter().enumerate() {
        if label >= n_classes {
            return Err(ModelError::LabelOutOfRange { label, n_classes });
        }
        loss -= &(probs[[row, label]] + eps).ln();
    }
    Ok(loss)
}

/// Number of rows whose arg-max probability matches the label.
fn count_correct<F: Float>(probs: &Array2<F>, labels: &[usize]) -> usize {
    probs
        .rows()
        .into_iter()
        .zip(labels.iter())
        .filter(|(row, label)| argmax(row.iter().cloned()) == **label)
        .count()
}

/// Index of the maximum element.
fn argmax<F: Float>(values: impl Iterator<Item = F>) -> usize {
    let mut best = 0;
    let mut best_value = F::neg_infinity();
    for (i, v) in values.enumerate() {
        if v > best_value {
            best_value = v;
            best = i;
        }
    }
    best
}

/// Fills a matrix with N(0, std_dev²) samples via the Box-Muller transform.
fn random_normal_matrix<F: Float, R: Rng>(
    rows: usize,
    cols: usize,
    std_dev: f64,
    rng: &mut R,
) -> Array2<F> {
    let mut out = Array2::zeros((rows, cols));
    for v in out.iter_mut() {
        let u1 = 1.0 - rng.random::<f64>();
        let u2 = 1.0 - rng.random::<f64>();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        *v = F::cast(z * std_dev).unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_predict_shape_and_determinism() {
        let net = DenseNet::<f64>::new(2, 16, 2, 42).unwrap();
        let inputs = array![[0.5, -0.5], [1.0, 2.0], [0.0, 0.0]];
        let a = net.predict(inputs.view()).unwrap();
        let b = DenseNet::<f64>::new(2, 16, 2, 42)
            .unwrap()
            .predict(inputs.view())
            .unwrap();
        assert_eq!(a.shape(), &[3, 2]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_error_on_wrong_input_dimension() {
        let net = DenseNet::<f64>::new(2, 8, 2, 0).unwrap();
        let inputs = array![[1.0, 2.0, 3.0]];
        let result = net.predict(inputs.view());
        assert!(matches!(
            result,
            Err(ModelError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_error_on_zero_layer_size() {
        assert!(matches!(
            DenseNet::<f64>::new(2, 0, 2, 0),
            Err(ModelError::InvalidLayerSize)
        ));
    }

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let logits: Array2<f64> =
            array![[1.0, 2.0, 3.0], [-10.0, 0.0, 10.0], [500.0, 500.0, 500.0]];
        let probs = softmax(&logits);
        for row in probs.rows() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
            assert!(row.iter().all(|p| p.is_finite()));
        }
    }

    #[test]
    fn test_error_on_label_out_of_range() {
        let net = DenseNet::<f64>::new(2, 8, 2, 0).unwrap();
        let inputs = array![[1.0, 2.0]];
        let result = net.loss_and_correct(inputs.view(), &[2]);
        assert!(matches!(result, Err(ModelError::LabelOutOfRange { .. })));
    }

    #[test]
    fn test_error_on_labels_length_mismatch() {
        let net = DenseNet::<f64>::new(2, 8, 2, 0).unwrap();
        let inputs = array![[1.0, 2.0], [3.0, 4.0]];
        let result = net.loss_and_correct(inputs.view(), &[0]);
        assert!(matches!(result, Err(ModelError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_gradients_match_finite_differences() {
        let net = DenseNet::<f64>::new(2, 4, 2, 7).unwrap();
        let inputs = array![[0.4, -1.1], [-0.3, 0.8], [1.5, 0.2]];
        let labels = [0usize, 1, 1];
        let (_, grads) = net.loss_and_gradients(inputs.view(), &labels).unwrap();

        let h = 1e-6;
        for (r, c) in [(0, 0), (0, 3), (1, 2)] {
            let mut plus = net.clone();
            plus.w1[[r, c]] += h;
            let (lp, _) = plus.loss_and_correct(inputs.view(), &labels).unwrap();
            let mut minus = net.clone();
            minus.w1[[r, c]] -= h;
            let (lm, _) = minus.loss_and_correct(inputs.view(), &labels).unwrap();
            let numeric = (lp - lm) / (2.0 * h);
            assert_abs_diff_eq!(grads.w1[[r, c]], numeric, epsilon = 1e-4);
        }
        for c in 0..2 {
            let mut plus = net.clone();
            plus.b2[c] += h;
            let (lp, _) = plus.loss_and_correct(inputs.view(), &labels).unwrap();
            let mut minus = net.clone();
            minus.b2[c] -= h;
            let (lm, _) = minus.loss_and_correct(inputs.view(), &labels).unwrap();
            let numeric = (lp - lm) / (2.0 * h);
            assert_abs_diff_eq!(grads.b2[c], numeric, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_parameter_count() {
        let net = DenseNet::<f64>::new(2, 10, 2, 0).unwrap();
        // 2*10 weights + 10 biases + 10*2 weights + 2 biases
        assert_eq!(net.parameter_count(), 52);
    }
}
