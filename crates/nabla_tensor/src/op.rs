use crate::{ops::shape::reduce_to_shape, Tensor};
use nabla_core::{
    array::NDArray,
    error::{Error, Result},
    scalar::Scalar,
};

/// The closed set of differentiable operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    EWiseAdd,
    EWiseMul,
    EWiseDiv,
    AddScalar(Scalar),
    MulScalar(Scalar),
    DivScalar(Scalar),
    PowerScalar(Scalar),
    Negate,
    Log,
    Exp,
    ReLU,
    Reshape(Vec<usize>),
    BroadcastTo(Vec<usize>),
    /// Sorted, unique axes to reduce; `None` reduces every axis.
    Summation(Option<Vec<usize>>),
    MatMul,
    Transpose(usize, usize),
}

impl Op {
    pub fn name(&self) -> &'static str {
        match self {
            Op::EWiseAdd => "add",
            Op::EWiseMul => "mul",
            Op::EWiseDiv => "div",
            Op::AddScalar(_) => "add_scalar",
            Op::MulScalar(_) => "mul_scalar",
            Op::DivScalar(_) => "div_scalar",
            Op::PowerScalar(_) => "pow",
            Op::Negate => "neg",
            Op::Log => "log",
            Op::Exp => "exp",
            Op::ReLU => "relu",
            Op::Reshape(_) => "reshape",
            Op::BroadcastTo(_) => "broadcast_to",
            Op::Summation(_) => "summation",
            Op::MatMul => "matmul",
            Op::Transpose(..) => "transpose",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Op::EWiseAdd | Op::EWiseMul | Op::EWiseDiv | Op::MatMul => 2,
            _ => 1,
        }
    }

    fn check_arity(&self, got: usize) -> Result<()> {
        if got != self.arity() {
            return Err(Error::Internal {
                message: format!("{} takes {} inputs, got {}", self.name(), self.arity(), got),
            });
        }
        Ok(())
    }

    /// Forward evaluation.
    pub fn compute(&self, inputs: &[&NDArray]) -> Result<NDArray> {
        self.check_arity(inputs.len())?;
        let a = inputs[0];

        match self {
            Op::EWiseAdd => a.add(inputs[1]),
            Op::EWiseMul => a.mul(inputs[1]),
            Op::EWiseDiv => a.div(inputs[1]),
            Op::AddScalar(s) => Ok(a.add_scalar(*s)),
            Op::MulScalar(s) => Ok(a.mul_scalar(*s)),
            Op::DivScalar(s) => Ok(a.div_scalar(*s)),
            Op::PowerScalar(s) => Ok(a.pow_scalar(*s)),
            Op::Negate => Ok(a.neg()),
            Op::Log => Ok(a.log()),
            Op::Exp => Ok(a.exp()),
            Op::ReLU => Ok(a.relu()),
            Op::Reshape(shape) => a.reshape(shape),
            Op::BroadcastTo(shape) => a.broadcast_to(shape),
            Op::Summation(axes) => a.sum(axes.as_deref()),
            Op::MatMul => a.matmul(inputs[1]),
            Op::Transpose(dim0, dim1) => a.transpose(*dim0, *dim1),
        }
    }

    /// Backward rule: one contribution per input of `node`, each shaped like
    /// that input. Expected to run with gradient tracking disabled.
    pub fn gradient(&self, out_grad: &Tensor, node: &Tensor) -> Result<Vec<Tensor>> {
        let inputs = node.inputs();
        self.check_arity(inputs.len())?;
        let a = &inputs[0];

        match self {
            Op::EWiseAdd => Ok(vec![out_grad.clone(), out_grad.clone()]),
            Op::EWiseMul => {
                let b = &inputs[1];
                Ok(vec![out_grad.mul(b)?, out_grad.mul(a)?])
            }
            Op::EWiseDiv => {
                let b = &inputs[1];
                let grad_a = out_grad.div(b)?;
                let grad_b = out_grad.mul(a)?.div(&b.mul(b)?)?.neg()?;
                Ok(vec![grad_a, grad_b])
            }
            Op::AddScalar(_) => Ok(vec![out_grad.clone()]),
            Op::MulScalar(s) => Ok(vec![out_grad.mul_scalar(*s)?]),
            Op::DivScalar(s) => Ok(vec![out_grad.div_scalar(*s)?]),
            Op::PowerScalar(s) => {
                let exponent = s.as_f64();
                let local = a.pow(exponent - 1.0)?.mul_scalar(exponent)?;
                Ok(vec![out_grad.mul(&local)?])
            }
            Op::Negate => Ok(vec![out_grad.neg()?]),
            Op::Log => Ok(vec![out_grad.div(a)?]),
            Op::Exp => Ok(vec![out_grad.mul(&node.detach())?]),
            Op::ReLU => {
                let mask = Tensor::from_array(a.value().positive_mask());
                Ok(vec![out_grad.mul(&mask)?])
            }
            Op::Reshape(_) => Ok(vec![out_grad.reshape(a.shape())?]),
            Op::BroadcastTo(_) => Ok(vec![reduce_to_shape(out_grad, a.shape())?]),
            Op::Summation(axes) => {
                let mut kept = a.shape().to_vec();
                match axes {
                    Some(axes) => axes.iter().for_each(|&axis| kept[axis] = 1),
                    None => kept.iter_mut().for_each(|d| *d = 1),
                }
                Ok(vec![out_grad.reshape(&kept)?.broadcast_to(a.shape())?])
            }
            Op::MatMul => {
                let b = &inputs[1];
                let grad_a = out_grad.matmul(&b.t()?)?;
                let grad_b = a.t()?.matmul(out_grad)?;
                Ok(vec![
                    reduce_to_shape(&grad_a, a.shape())?,
                    reduce_to_shape(&grad_b, b.shape())?,
                ])
            }
            Op::Transpose(dim0, dim1) => Ok(vec![out_grad.transpose(*dim0, *dim1)?]),
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::AddScalar(s) | Op::MulScalar(s) | Op::DivScalar(s) | Op::PowerScalar(s) => {
                write!(f, "{}({})", self.name(), s)
            }
            Op::Reshape(shape) | Op::BroadcastTo(shape) => write!(f, "{}({:?})", self.name(), shape),
            Op::Summation(Some(axes)) => write!(f, "summation({:?})", axes),
            Op::Transpose(dim0, dim1) => write!(f, "transpose({}, {})", dim0, dim1),
            _ => f.write_str(self.name()),
        }
    }
}
