//! Slice-level kernels for the nabla value backend.
//!
//! Every kernel works on contiguous row-major buffers (or on an explicit
//! `dims`/`strides` description of a view) and is generated once per
//! floating point element type: `bf16`, `f16`, `f32` and `f64`.

pub mod ops;
pub mod utils;
