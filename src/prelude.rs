pub use crate::core::{
    dtype::*,
    error::{Error, Result},
    scalar::Scalar,
};
pub use crate::tensor::{no_grad, no_grad_mode, Axes, Op, Tensor};
pub use half::{bf16, f16};
