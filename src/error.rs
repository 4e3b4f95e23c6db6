use std::fmt;

/// Rejected input to one of the numeric routines.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    EmptyGrid,
    DegenerateGrid {
        rows: usize,
        cols: usize,
    },
    InvalidBbox(String),
    InvalidTime {
        index: usize,
        value: f64,
    },
    InvalidReferenceDate {
        year: i32,
        month: u32,
        day: u32,
    },
    TimeOverflow {
        index: usize,
    },
    AxisOutOfBounds {
        axis: usize,
        ndim: usize,
    },
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInputError::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {:?}, found {:?}", expected, found)
            }
            InvalidInputError::EmptyGrid => write!(f, "grid has no cells"),
            InvalidInputError::DegenerateGrid { rows, cols } => write!(
                f,
                "grid of {}x{} cells cannot anchor an affine transform",
                rows, cols
            ),
            InvalidInputError::InvalidBbox(msg) => write!(f, "invalid bbox: {}", msg),
            InvalidInputError::InvalidTime { index, value } => write!(
                f,
                "elapsed time at index {} must be finite and non-negative, got {}",
                index, value
            ),
            InvalidInputError::InvalidReferenceDate { year, month, day } => {
                write!(f, "invalid reference date {:04}-{:02}-{:02}", year, month, day)
            }
            InvalidInputError::TimeOverflow { index } => {
                write!(f, "timestamp at index {} is out of range", index)
            }
            InvalidInputError::AxisOutOfBounds { axis, ndim } => write!(
                f,
                "axis {} is out of bounds for an array of {} dimensions",
                axis, ndim
            ),
        }
    }
}

impl std::error::Error for InvalidInputError {}

/// Checks that two arrays share a shape.
pub(crate) fn ensure_same_shape(
    expected: &[usize],
    found: &[usize],
) -> Result<(), InvalidInputError> {
    if expected != found {
        return Err(InvalidInputError::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        });
    }
    Ok(())
}
