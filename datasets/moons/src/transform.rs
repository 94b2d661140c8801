//! Pure geometric transforms over labeled 2D point sets.

use moonbench_helpers::{DataPoint, Float};

/// Pushes the two classes apart vertically by `offset` in total.
///
/// The class whose point cloud reaches the larger maximum y is shifted up by
/// `offset / 2`, the other down by the same amount. When the maxima are
/// equal, class 0 takes the downward shift. Points with labels other than
/// 0 and 1 are left untouched.
pub fn separate_vertically<F: Float>(data: &mut [DataPoint<usize, F>], offset: F) {
    let mut max_y = [F::neg_infinity(), F::neg_infinity()];
    for dp in data.iter() {
        if let Some(max) = max_y.get_mut(dp.label) {
            if dp.features[1] > *max {
                *max = dp.features[1];
            }
        }
    }
    let up_label = if max_y[0] > max_y[1] { 0 } else { 1 };

    let half = offset / F::cast(2).unwrap();
    for dp in data.iter_mut() {
        match dp.label {
            label if label == up_label => dp.features[1] += &half,
            0 | 1 => dp.features[1] -= &half,
            _ => {}
        }
    }
}

/// Rotates every point counter-clockwise around the origin by `degrees`.
pub fn rotate_degrees<F: Float>(data: &mut [DataPoint<usize, F>], degrees: F) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin(), theta.cos());
    for dp in data.iter_mut() {
        let (x, y) = (dp.features[0], dp.features[1]);
        dp.features[0] = cos * x - sin * y;
        dp.features[1] = sin * x + cos * y;
    }
}

/// Translates every point by `dy` along the y axis.
pub fn translate_y<F: Float>(data: &mut [DataPoint<usize, F>], dy: F) {
    for dp in data.iter_mut() {
        dp.features[1] += &dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn point(x: f64, y: f64, label: usize) -> DataPoint<usize, f64> {
        DataPoint::new(array![x, y], label)
    }

    #[test]
    fn test_separation_shifts_higher_class_up() {
        let mut data = vec![point(0.0, 1.0, 0), point(0.0, -1.0, 1)];
        separate_vertically(&mut data, 2.0);
        assert_abs_diff_eq!(data[0].features[1], 2.0);
        assert_abs_diff_eq!(data[1].features[1], -2.0);
    }

    #[test]
    fn test_separation_tie_break_shifts_class_zero_down() {
        let mut data = vec![point(0.0, 1.0, 0), point(5.0, 1.0, 1)];
        separate_vertically(&mut data, 1.0);
        assert_abs_diff_eq!(data[0].features[1], 0.5);
        assert_abs_diff_eq!(data[1].features[1], 1.5);
    }

    #[test]
    fn test_separation_leaves_extra_labels_in_place() {
        let mut data = vec![
            point(0.0, 1.0, 0),
            point(0.0, -1.0, 1),
            point(3.0, 0.25, 2),
        ];
        separate_vertically(&mut data, 2.0);
        assert_abs_diff_eq!(data[0].features[1], 2.0);
        assert_abs_diff_eq!(data[1].features[1], -2.0);
        assert_abs_diff_eq!(data[2].features[1], 0.25);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let mut data = vec![point(1.0, 0.0, 0)];
        rotate_degrees(&mut data, 90.0);
        assert_abs_diff_eq!(data[0].features[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(data[0].features[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_preserves_pairwise_distances() {
        let mut data = vec![point(0.3, -1.2, 0), point(2.0, 0.7, 1), point(-0.5, 0.1, 0)];
        let before: Vec<f64> = pairwise_distances(&data);
        rotate_degrees(&mut data, 37.5);
        let after: Vec<f64> = pairwise_distances(&data);
        for (a, b) in before.iter().zip(after.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    fn pairwise_distances(data: &[DataPoint<usize, f64>]) -> Vec<f64> {
        let mut out = Vec::new();
        for i in 0..data.len() {
            for j in (i + 1)..data.len() {
                let dx = data[i].features[0] - data[j].features[0];
                let dy = data[i].features[1] - data[j].features[1];
                out.push((dx * dx + dy * dy).sqrt());
            }
        }
        out
    }
}
