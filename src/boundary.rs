use moonbench_helpers::{Classifier, DataPoint, Float, ModelError};
use ndarray::{Array1, Array2};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Padding added on every side of the data's bounding box before the grid
/// is laid out.
pub const GRID_MARGIN: f64 = 0.25;

/// Grid points per axis used by [`decision_boundary`] when no resolution is
/// given.
pub const DEFAULT_GRID_RESOLUTION: usize = 100;

/// Errors that can occur while scanning a decision boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// No data points to derive the grid extent from.
    EmptyDataSet,
    /// The grid resolution was below 2, so no cell can be formed.
    InvalidResolution,
    /// A data point carried a NaN or infinite coordinate.
    NonFiniteCoordinate,
    /// The classifier rejected the grid batch.
    Model(ModelError),
}

impl Display for BoundaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryError::EmptyDataSet => {
                write!(f, "Cannot derive a grid extent from an empty dataset")
            }
            BoundaryError::InvalidResolution => {
                write!(f, "Grid resolution must be at least 2")
            }
            BoundaryError::NonFiniteCoordinate => {
                write!(f, "Data points must have finite coordinates")
            }
            BoundaryError::Model(e) => write!(f, "{}", e),
        }
    }
}

impl Error for BoundaryError {}

impl From<ModelError> for BoundaryError {
    fn from(e: ModelError) -> Self {
        BoundaryError::Model(e)
    }
}

/// A classifier's score field sampled over a regular grid, together with the
/// polyline segments where the score crosses zero.
///
/// `scores[[i, j]]` is the first logit at `(x_coords[i], y_coords[j])`.
#[derive(Debug, Clone)]
pub struct BoundaryField<F: Float> {
    pub x_coords: Array1<F>,
    pub y_coords: Array1<F>,
    pub scores: Array2<F>,
    /// Line segments tracing the zero level set, in data coordinates.
    pub segments: Vec<[(F, F); 2]>,
}

/// Samples `classifier` over a `resolution` × `resolution` grid covering the
/// dataset's bounding box (padded by [`GRID_MARGIN`] on each side) and traces
/// where the first logit changes sign.
///
/// The whole grid goes through `predict` as a single batch.
///
/// # Errors
///
/// Fails on an empty dataset, a resolution below 2, non-finite data
/// coordinates, or any shape error raised by the classifier.
pub fn decision_boundary<L, F, C>(
    data: &[DataPoint<L, F>],
    classifier: &C,
    resolution: usize,
) -> Result<BoundaryField<F>, BoundaryError>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
    C: Classifier<F>,
{
    if data.is_empty() {
        return Err(BoundaryError::EmptyDataSet);
    }
    if resolution < 2 {
        return Err(BoundaryError::InvalidResolution);
    }

    let (mut x_min, mut x_max) = (F::infinity(), F::neg_infinity());
    let (mut y_min, mut y_max) = (F::infinity(), F::neg_infinity());
    for dp in data {
        let (x, y) = (dp.features[0], dp.features[1]);
        if !x.is_finite() || !y.is_finite() {
            return Err(BoundaryError::NonFiniteCoordinate);
        }
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let margin = F::cast(GRID_MARGIN).unwrap();
    let x_coords = Array1::linspace(x_min - margin, x_max + margin, resolution);
    let y_coords = Array1::linspace(y_min - margin, y_max + margin, resolution);

    // x-major flattening: row i*resolution + j holds (x_coords[i], y_coords[j]).
    let mut grid = Array2::zeros((resolution * resolution, 2));
    for (i, &x) in x_coords.iter().enumerate() {
        for (j, &y) in y_coords.iter().enumerate() {
            let row = i * resolution + j;
            grid[[row, 0]] = x;
            grid[[row, 1]] = y;
        }
    }

    let logits = classifier.predict(grid.view())?;
    let flat: Vec<F> = logits.column(0).to_vec();
    let scores = match Array2::from_shape_vec((resolution, resolution), flat) {
        Ok(scores) => scores,
        Err(_) => unreachable!(),
    };

    let segments = trace_zero_level(&x_coords, &y_coords, &scores);

    Ok(BoundaryField {
        x_coords,
        y_coords,
        scores,
        segments,
    })
}

/// Marching squares over the score field: each grid cell contributes line
/// segments connecting the zero crossings interpolated along its edges.
fn trace_zero_level<F: Float>(
    x_coords: &Array1<F>,
    y_coords: &Array1<F>,
    scores: &Array2<F>,
) -> Vec<[(F, F); 2]> {
    let n = x_coords.len();
    let mut segments = Vec::new();

    for i in 0..n - 1 {
        for j in 0..n - 1 {
            // Cell corners: (i,j), (i+1,j), (i+1,j+1), (i,j+1), walked
            // counter-clockwise so the four edges form a closed loop.
            let corners = [
                (x_coords[i], y_coords[j], scores[[i, j]]),
                (x_coords[i + 1], y_coords[j], scores[[i + 1, j]]),
                (x_coords[i + 1], y_coords[j + 1], scores[[i + 1, j + 1]]),
                (x_coords[i], y_coords[j + 1], scores[[i, j + 1]]),
            ];

            let mut crossings = Vec::new();
            for k in 0..4 {
                let (xa, ya, fa) = corners[k];
                let (xb, yb, fb) = corners[(k + 1) % 4];
                if (fa > F::zero()) != (fb > F::zero()) {
                    let t = fa / (fa - fb);
                    crossings.push((xa + t * (xb - xa), ya + t * (yb - ya)));
                }
            }

            // 0 or 2 crossings in the common cases; the saddle case yields 4,
            // which becomes two disjoint segments.
            for pair in crossings.chunks_exact(2) {
                segments.push([pair[0], pair[1]]);
            }
        }
    }

    segments
}
