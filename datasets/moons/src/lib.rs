use moonbench_helpers::{DataPoint, Float};
use ndarray::array;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::error::Error;
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};

mod reference;
pub mod transform;

pub use reference::{reference_moons, REFERENCE_POINTS_PER_CLASS};

/// Errors that can occur during dataset synthesis.
#[derive(Debug, Clone, PartialEq)]
pub enum MoonsError {
    /// The requested sample count was zero.
    InvalidSampleCount,
    /// The noise standard deviation was negative.
    NegativeNoise,
    /// A noise, offset, rotation, or downscale parameter was NaN or infinite.
    NonFiniteParameter,
    /// The reference-dataset coordinate divisor was zero.
    ZeroDownscale,
}

impl Display for MoonsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MoonsError::InvalidSampleCount => write!(f, "Sample count must be greater than zero"),
            MoonsError::NegativeNoise => {
                write!(f, "Noise standard deviation must not be negative")
            }
            MoonsError::NonFiniteParameter => {
                write!(f, "Generator parameters must be finite")
            }
            MoonsError::ZeroDownscale => write!(f, "Coordinate downscale divisor must not be zero"),
        }
    }
}

impl Error for MoonsError {}

/// Synthesizes a labeled two-moons dataset: two interleaving crescents with
/// Gaussian-perturbed coordinates, optionally separated vertically and
/// rotated.
///
/// The transform order is fixed: raw arcs and noise first, then the vertical
/// class separation, then the rotation (with a `+offset/2` re-centering along
/// y when both are active). All randomness comes from the seeded Xoshiro256++
/// stream, so identical parameters always reproduce the identical dataset.
#[derive(Debug, Clone)]
pub struct MoonsGenerator<F: Float> {
    /// Total number of points across both classes.
    pub n: usize,
    /// Standard deviation of the per-coordinate Gaussian noise.
    pub noise: F,
    /// Vertical distance by which the two classes are pushed apart.
    pub offset: F,
    /// Counter-clockwise rotation applied to the whole point set.
    pub rotation_degrees: F,
    /// Seed for the random number generator.
    pub seed: u64,
}

impl<F: Float> MoonsGenerator<F> {
    /// Creates a generator with no separation offset and the default 90°
    /// rotation. Both fields are public and may be adjusted before
    /// [`generate`](Self::generate) is called.
    pub fn new(n: usize, noise: F, seed: u64) -> Self {
        Self {
            n,
            noise,
            offset: F::zero(),
            rotation_degrees: F::cast(90).unwrap(),
            seed,
        }
    }

    /// Produces the dataset.
    ///
    /// # Errors
    ///
    /// Returns `MoonsError::InvalidSampleCount` if `n` is zero,
    /// `MoonsError::NonFiniteParameter` if `noise`, `offset`, or
    /// `rotation_degrees` is NaN or infinite, and `MoonsError::NegativeNoise`
    /// if `noise` is negative.
    pub fn generate(&self) -> Result<Vec<DataPoint<usize, F>>, MoonsError> {
        if self.n == 0 {
            return Err(MoonsError::InvalidSampleCount);
        }
        if !self.noise.is_finite() || !self.offset.is_finite() || !self.rotation_degrees.is_finite()
        {
            return Err(MoonsError::NonFiniteParameter);
        }
        if self.noise < F::zero() {
            return Err(MoonsError::NegativeNoise);
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);

        // Upper arc takes the extra point when n is odd.
        let n_upper = self.n / 2 + self.n % 2;
        let n_lower = self.n / 2;

        let mut data = Vec::with_capacity(self.n);
        for i in 0..n_upper {
            let t = arc_parameter(i, n_upper);
            data.push(DataPoint::new(
                array![F::cast(t.cos()).unwrap(), F::cast(t.sin()).unwrap()],
                0,
            ));
        }
        for i in 0..n_lower {
            let t = arc_parameter(i, n_lower);
            data.push(DataPoint::new(
                array![
                    F::cast(1.0 - t.cos()).unwrap(),
                    F::cast(0.5 - t.sin()).unwrap()
                ],
                1,
            ));
        }

        for dp in data.iter_mut() {
            for k in 0..2 {
                let eps = self.noise * F::cast(sample_standard_normal(&mut rng)).unwrap();
                dp.features[k] += &eps;
            }
        }

        if self.offset != F::zero() {
            transform::separate_vertically(&mut data, self.offset);
        }
        if self.rotation_degrees != F::zero() {
            transform::rotate_degrees(&mut data, self.rotation_degrees);
            // Rotating moves the separated clusters away from the origin;
            // compensate so the cloud stays centered.
            if self.offset != F::zero() {
                transform::translate_y(&mut data, self.offset / F::cast(2).unwrap());
            }
        }

        Ok(data)
    }
}

/// Arc parameter for point `i` of `count`, spaced uniformly over [0, π].
fn arc_parameter(i: usize, count: usize) -> f64 {
    if count > 1 {
        PI * i as f64 / (count - 1) as f64
    } else {
        0.0
    }
}

/// Samples a single value from N(0, 1) using the Box-Muller transform.
/// Both uniforms are drawn on (0, 1] to avoid log(0).
fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = 1.0 - rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn class_ys(data: &[DataPoint<usize, f64>], label: usize) -> Vec<f64> {
        data.iter()
            .filter(|dp| dp.label == label)
            .map(|dp| dp.features[1])
            .collect()
    }

    /// Vertical gap between the class clouds: lowest point of the upper
    /// cloud minus highest point of the lower cloud.
    fn vertical_gap(data: &[DataPoint<usize, f64>]) -> f64 {
        let mean = |ys: &[f64]| ys.iter().sum::<f64>() / ys.len() as f64;
        let ys0 = class_ys(data, 0);
        let ys1 = class_ys(data, 1);
        let (upper, lower) = if mean(&ys0) > mean(&ys1) {
            (ys0, ys1)
        } else {
            (ys1, ys0)
        };
        let min_upper = upper.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_lower = lower.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        min_upper - max_lower
    }

    #[test]
    fn test_counts_and_labels() {
        let data = MoonsGenerator::<f64>::new(101, 0.1, 5).generate().unwrap();
        assert_eq!(data.len(), 101);
        assert_eq!(data.iter().filter(|dp| dp.label == 0).count(), 51);
        assert_eq!(data.iter().filter(|dp| dp.label == 1).count(), 50);
        assert!(data.iter().all(|dp| dp.label <= 1));
        assert!(data
            .iter()
            .all(|dp| dp.features.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let mut generator = MoonsGenerator::<f64>::new(64, 0.2, 42);
        generator.offset = 0.7;
        generator.rotation_degrees = 33.0;
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.label, pb.label);
            assert_eq!(pa.features[0], pb.features[0]);
            assert_eq!(pa.features[1], pb.features[1]);
        }
    }

    #[test]
    fn test_offset_monotonically_widens_the_gap() {
        let mut previous = f64::NEG_INFINITY;
        for offset in [0.0, 0.5, 1.0, 2.0] {
            let mut generator = MoonsGenerator::<f64>::new(200, 0.05, 11);
            generator.offset = offset;
            generator.rotation_degrees = 0.0;
            let gap = vertical_gap(&generator.generate().unwrap());
            assert!(
                gap >= previous - 1e-9,
                "gap shrank at offset {}: {} < {}",
                offset,
                gap,
                previous
            );
            previous = gap;
        }
    }

    #[test]
    fn test_rotation_is_rigid() {
        let mut flat = MoonsGenerator::<f64>::new(40, 0.1, 9);
        flat.rotation_degrees = 0.0;
        let mut turned = flat.clone();
        turned.rotation_degrees = 60.0;

        let a = flat.generate().unwrap();
        let b = turned.generate().unwrap();
        for i in 0..a.len() {
            for j in (i + 1)..a.len() {
                let d = |p: &DataPoint<usize, f64>, q: &DataPoint<usize, f64>| {
                    let dx = p.features[0] - q.features[0];
                    let dy = p.features[1] - q.features[1];
                    (dx * dx + dy * dy).sqrt()
                };
                assert_abs_diff_eq!(d(&a[i], &a[j]), d(&b[i], &b[j]), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_rotation_recenters_after_offset() {
        let mut unrotated = MoonsGenerator::<f64>::new(30, 0.1, 21);
        unrotated.offset = 1.0;
        unrotated.rotation_degrees = 0.0;
        let mut expected = unrotated.generate().unwrap();
        transform::rotate_degrees(&mut expected, 90.0);
        transform::translate_y(&mut expected, 0.5);

        let mut rotated = unrotated;
        rotated.rotation_degrees = 90.0;
        let actual = rotated.generate().unwrap();

        for (e, a) in expected.iter().zip(actual.iter()) {
            assert_abs_diff_eq!(e.features[0], a.features[0], epsilon = 1e-12);
            assert_abs_diff_eq!(e.features[1], a.features[1], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_error_on_zero_samples() {
        let result = MoonsGenerator::<f64>::new(0, 0.1, 0).generate();
        assert!(matches!(result, Err(MoonsError::InvalidSampleCount)));
    }

    #[test]
    fn test_error_on_negative_noise() {
        let result = MoonsGenerator::<f64>::new(10, -0.1, 0).generate();
        assert!(matches!(result, Err(MoonsError::NegativeNoise)));
    }

    #[test]
    fn test_error_on_non_finite_parameters() {
        let result = MoonsGenerator::<f64>::new(10, f64::INFINITY, 0).generate();
        assert!(matches!(result, Err(MoonsError::NonFiniteParameter)));

        let result = MoonsGenerator::<f64>::new(10, f64::NAN, 0).generate();
        assert!(matches!(result, Err(MoonsError::NonFiniteParameter)));

        let mut generator = MoonsGenerator::<f64>::new(10, 0.1, 0);
        generator.offset = f64::NAN;
        assert!(matches!(
            generator.generate(),
            Err(MoonsError::NonFiniteParameter)
        ));

        let mut generator = MoonsGenerator::<f64>::new(10, 0.1, 0);
        generator.rotation_degrees = f64::INFINITY;
        assert!(matches!(
            generator.generate(),
            Err(MoonsError::NonFiniteParameter)
        ));
    }
}
