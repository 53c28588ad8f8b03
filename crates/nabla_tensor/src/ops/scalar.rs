use crate::{graph::apply, op::Op, Tensor};
use nabla_core::{error::Result, scalar::Scalar};

impl Tensor {
    pub fn add_scalar(&self, scalar: impl Into<Scalar>) -> Result<Tensor> {
        apply(Op::AddScalar(scalar.into()), &[self])
    }

    /// Recorded as `AddScalar(-scalar)`.
    pub fn sub_scalar(&self, scalar: impl Into<Scalar>) -> Result<Tensor> {
        let scalar: Scalar = scalar.into();
        apply(Op::AddScalar(Scalar::F64(-scalar.as_f64())), &[self])
    }

    pub fn mul_scalar(&self, scalar: impl Into<Scalar>) -> Result<Tensor> {
        apply(Op::MulScalar(scalar.into()), &[self])
    }

    pub fn div_scalar(&self, scalar: impl Into<Scalar>) -> Result<Tensor> {
        apply(Op::DivScalar(scalar.into()), &[self])
    }

    /// Raises every element to a scalar power.
    pub fn pow(&self, exponent: impl Into<Scalar>) -> Result<Tensor> {
        apply(Op::PowerScalar(exponent.into()), &[self])
    }
}
