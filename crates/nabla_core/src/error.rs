use crate::dtype::DType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Shape mismatch ({op}): expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        op: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Gradient shape mismatch in {op} backward: input has shape {expected:?}, gradient has shape {got:?}")]
    GradientShape {
        op: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("DType mismatch: expected {expected:?}, got {got:?}")]
    DTypeMismatch { expected: DType, got: DType },

    #[error("Dimension out of bounds: dimension {dim} is not valid for tensor with {ndim} dimensions")]
    DimensionOutOfBounds { dim: i64, ndim: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Grad is locked")]
    Lock,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
