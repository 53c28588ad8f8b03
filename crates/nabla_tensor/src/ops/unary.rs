use crate::{graph::apply, op::Op, Tensor};
use nabla_core::error::Result;

impl Tensor {
    pub fn neg(&self) -> Result<Tensor> {
        apply(Op::Negate, &[self])
    }

    pub fn exp(&self) -> Result<Tensor> {
        apply(Op::Exp, &[self])
    }

    /// Natural logarithm.
    pub fn log(&self) -> Result<Tensor> {
        apply(Op::Log, &[self])
    }

    pub fn relu(&self) -> Result<Tensor> {
        apply(Op::ReLU, &[self])
    }
}
