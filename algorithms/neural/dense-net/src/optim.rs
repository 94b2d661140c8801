use crate::{DenseNet, Gradients};
use moonbench_helpers::Float;
use ndarray::{Array, Array1, Array2, Dimension, Zip};

/// Adaptive moment estimation (Adam) over a [`DenseNet`]'s parameters.
///
/// Keeps one first-moment and one second-moment accumulator per parameter
/// tensor, with the standard bias correction applied at every step.
#[derive(Debug, Clone)]
pub struct Adam<F: Float> {
    pub learning_rate: F,
    pub beta1: F,
    pub beta2: F,
    pub epsilon: F,
    t: i32,
    m_w1: Array2<F>,
    v_w1: Array2<F>,
    m_b1: Array1<F>,
    v_b1: Array1<F>,
    m_w2: Array2<F>,
    v_w2: Array2<F>,
    m_b2: Array1<F>,
    v_b2: Array1<F>,
}

impl<F: Float> Adam<F> {
    /// Creates an optimizer with zeroed moment state shaped like `net`'s
    /// parameters, using the conventional β1=0.9, β2=0.999, ε=1e-8.
    pub fn new(learning_rate: F, net: &DenseNet<F>) -> Self {
        Self {
            learning_rate,
            beta1: F::cast(0.9).unwrap(),
            beta2: F::cast(0.999).unwrap(),
            epsilon: F::cast(1e-8).unwrap(),
            t: 0,
            m_w1: Array2::zeros(net.w1.raw_dim()),
            v_w1: Array2::zeros(net.w1.raw_dim()),
            m_b1: Array1::zeros(net.b1.raw_dim()),
            v_b1: Array1::zeros(net.b1.raw_dim()),
            m_w2: Array2::zeros(net.w2.raw_dim()),
            v_w2: Array2::zeros(net.w2.raw_dim()),
            m_b2: Array1::zeros(net.b2.raw_dim()),
            v_b2: Array1::zeros(net.b2.raw_dim()),
        }
    }

    /// Applies one Adam update to every parameter tensor.
    pub fn step(&mut self, net: &mut DenseNet<F>, grads: &Gradients<F>) {
        self.t += 1;
        let bc1 = F::one() - self.beta1.powi(self.t);
        let bc2 = F::one() - self.beta2.powi(self.t);

        update_tensor(
            &mut net.w1,
            &mut self.m_w1,
            &mut self.v_w1,
            &grads.w1,
            self.learning_rate,
            self.beta1,
            self.beta2,
            self.epsilon,
            bc1,
            bc2,
        );
        update_tensor(
            &mut net.b1,
            &mut self.m_b1,
            &mut self.v_b1,
            &grads.b1,
            self.learning_rate,
            self.beta1,
            self.beta2,
            self.epsilon,
            bc1,
            bc2,
        );
        update_tensor(
            &mut net.w2,
            &mut self.m_w2,
            &mut self.v_w2,
            &grads.w2,
            self.learning_rate,
            self.beta1,
            self.beta2,
            self.epsilon,
            bc1,
            bc2,
        );
        update_tensor(
            &mut net.b2,
            &mut self.m_b2,
            &mut self.v_b2,
            &grads.b2,
            self.learning_rate,
            self.beta1,
            self.beta2,
            self.epsilon,
            bc1,
            bc2,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn update_tensor<F: Float, D: Dimension>(
    param: &mut Array<F, D>,
    m: &mut Array<F, D>,
    v: &mut Array<F, D>,
    grad: &Array<F, D>,
    lr: F,
    beta1: F,
    beta2: F,
    epsilon: F,
    bc1: F,
    bc2: F,
) {
    Zip::from(param)
        .and(m)
        .and(v)
        .and(grad)
        .for_each(|p, m, v, &g| {
            *m = beta1 * *m + (F::one() - beta1) * g;
            *v = beta2 * *v + (F::one() - beta2) * g * g;
            let m_hat = *m / bc1;
            let v_hat = *v / bc2;
            *p -= lr * m_hat / (v_hat.sqrt() + epsilon);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_step_moves_parameters_against_the_gradient() {
        let mut net = DenseNet::<f64>::new(2, 4, 2, 1).unwrap();
        let before = net.w1.clone();
        let mut adam = Adam::new(0.01, &net);

        let grads = Gradients {
            w1: Array2::from_elem(net.w1.raw_dim(), 1.0),
            b1: Array1::zeros(net.b1.raw_dim()),
            w2: Array2::zeros(net.w2.raw_dim()),
            b2: Array1::zeros(net.b2.raw_dim()),
        };
        adam.step(&mut net, &grads);

        // Positive gradient everywhere, so every w1 entry decreases; first
        // step size is exactly lr after bias correction.
        for (new, old) in net.w1.iter().zip(before.iter()) {
            assert!(new < old);
            assert!((old - new - 0.01).abs() < 1e-6);
        }
        // Zero gradient leaves the other tensors untouched.
        assert_eq!(net.b1, Array1::zeros(net.b1.raw_dim()));
    }

    #[test]
    fn test_repeated_steps_are_finite() {
        let mut net = DenseNet::<f64>::new(2, 4, 2, 1).unwrap();
        let mut adam = Adam::new(0.1, &net);
        let inputs = array![[1.0, -1.0], [0.5, 0.5]];
        let labels = [0usize, 1];
        for _ in 0..50 {
            let (_, grads) = net.loss_and_gradients(inputs.view(), &labels).unwrap();
            adam.step(&mut net, &grads);
        }
        assert!(net.w1.iter().all(|v| v.is_finite()));
        assert!(net.w2.iter().all(|v| v.is_finite()));
    }
}
