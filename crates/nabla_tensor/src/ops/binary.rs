use crate::{graph::apply, op::Op, Tensor};
use nabla_core::{
    error::{Error, Result},
    layout::broadcast_shape,
};

/// Brings both operands to their common broadcast shape, inserting
/// `BroadcastTo` nodes only for the operands whose shape changes.
fn broadcast_pair(lhs: &Tensor, rhs: &Tensor) -> Result<(Tensor, Tensor)> {
    if lhs.dtype() != rhs.dtype() {
        return Err(Error::DTypeMismatch {
            expected: lhs.dtype(),
            got: rhs.dtype(),
        });
    }
    if lhs.shape() == rhs.shape() {
        return Ok((lhs.clone(), rhs.clone()));
    }

    let shape = broadcast_shape(lhs.shape(), rhs.shape())?;
    let expand = |t: &Tensor| -> Result<Tensor> {
        if t.shape() == shape.as_slice() {
            Ok(t.clone())
        } else {
            t.broadcast_to(&shape)
        }
    };

    Ok((expand(lhs)?, expand(rhs)?))
}

impl Tensor {
    pub fn add(&self, rhs: &Tensor) -> Result<Tensor> {
        let (lhs, rhs) = broadcast_pair(self, rhs)?;
        apply(Op::EWiseAdd, &[&lhs, &rhs])
    }

    /// `self + (-rhs)`.
    pub fn sub(&self, rhs: &Tensor) -> Result<Tensor> {
        self.add(&rhs.neg()?)
    }

    pub fn mul(&self, rhs: &Tensor) -> Result<Tensor> {
        let (lhs, rhs) = broadcast_pair(self, rhs)?;
        apply(Op::EWiseMul, &[&lhs, &rhs])
    }

    pub fn div(&self, rhs: &Tensor) -> Result<Tensor> {
        let (lhs, rhs) = broadcast_pair(self, rhs)?;
        apply(Op::EWiseDiv, &[&lhs, &rhs])
    }
}
