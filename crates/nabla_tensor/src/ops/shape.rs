use crate::{graph::apply, op::Op, Tensor};
use nabla_core::{
    error::{Error, Result},
    layout::pad_shape,
    scalar::Scalar,
};

/// Resolves a possibly negative axis against `ndim`.
pub(crate) fn normalize_dim(dim: impl Into<Scalar>, ndim: usize) -> Result<usize> {
    let dim = dim.into().as_i64();
    let resolved = if dim < 0 { dim + ndim as i64 } else { dim };
    if resolved < 0 || resolved >= ndim as i64 {
        return Err(Error::DimensionOutOfBounds { dim, ndim });
    }
    Ok(resolved as usize)
}

/// Sums `grad` down to `shape`, the inverse of broadcasting `shape` up to
/// `grad.shape()`.
///
/// Leading axes that `shape` lacks and axes where `shape` has size 1 are
/// summed, then the result is reshaped to `shape`.
pub(crate) fn reduce_to_shape(grad: &Tensor, shape: &[usize]) -> Result<Tensor> {
    if grad.shape() == shape {
        return Ok(grad.clone());
    }
    if grad.ndim() < shape.len() {
        return Err(Error::ShapeMismatch {
            op: "reduce_to_shape",
            expected: shape.to_vec(),
            got: grad.shape().to_vec(),
        });
    }

    let padded = pad_shape(shape, grad.ndim());
    let axes: Vec<usize> = padded
        .iter()
        .zip(grad.shape())
        .enumerate()
        .filter(|(_, (p, g))| p != g)
        .map(|(i, _)| i)
        .collect();

    let summed = if axes.is_empty() { grad.clone() } else { grad.summation(axes)? };
    summed.reshape(shape)
}

impl Tensor {
    /// Same elements, new shape. The element count must not change.
    pub fn reshape(&self, shape: &[usize]) -> Result<Tensor> {
        apply(Op::Reshape(shape.to_vec()), &[self])
    }

    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Tensor> {
        apply(Op::BroadcastTo(shape.to_vec()), &[self])
    }

    /// Swaps two axes. Negative axes count from the end.
    pub fn transpose(&self, dim0: impl Into<Scalar>, dim1: impl Into<Scalar>) -> Result<Tensor> {
        let dim0 = normalize_dim(dim0, self.ndim())?;
        let dim1 = normalize_dim(dim1, self.ndim())?;
        apply(Op::Transpose(dim0, dim1), &[self])
    }

    /// Swaps the last two axes.
    pub fn t(&self) -> Result<Tensor> {
        if self.ndim() < 2 {
            return Err(Error::InvalidArgument(format!(
                "t() needs at least 2 dimensions, got shape {:?}",
                self.shape()
            )));
        }
        self.transpose(-2, -1)
    }
}
