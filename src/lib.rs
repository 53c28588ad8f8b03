pub mod prelude;

pub use nabla_core as core;
pub use nabla_tensor as tensor;

pub use nabla_core::dtype::{bfloat16, float16, float32, float64, half};
pub use nabla_tensor::{grad_mode, is_grad_enabled, no_grad, no_grad_mode, with_grad, GradModeGuard};
