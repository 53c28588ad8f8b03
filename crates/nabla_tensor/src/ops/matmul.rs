use crate::{graph::apply, op::Op, Tensor};
use nabla_core::error::{Error, Result};

impl Tensor {
    /// Matrix product over the last two axes.
    ///
    /// Both operands need at least two dimensions. Leading (batch) axes
    /// broadcast against each other; the gradient of an operand that was
    /// broadcast is summed back to its own shape.
    pub fn matmul(&self, rhs: &Tensor) -> Result<Tensor> {
        if self.dtype() != rhs.dtype() {
            return Err(Error::DTypeMismatch {
                expected: self.dtype(),
                got: rhs.dtype(),
            });
        }
        apply(Op::MatMul, &[self, rhs])
    }
}
