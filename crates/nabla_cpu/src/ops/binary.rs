use half::{bf16, f16};
use rayon::prelude::*;

macro_rules! binary_op {
    ($name:ident, $op:expr, [$($type:ident),* $(,)?]) => {
        paste::paste! {
            $(
                /// Elementwise kernel over two contiguous buffers of equal length.
                pub fn [<$name _ $type>](lhs: &[$type], rhs: &[$type], out: &mut [$type]) {
                    debug_assert_eq!(lhs.len(), rhs.len());
                    debug_assert_eq!(lhs.len(), out.len());
                    let op: fn($type, $type) -> $type = $op;
                    out.par_iter_mut()
                        .zip(lhs.par_iter().zip(rhs.par_iter()))
                        .for_each(|(o, (&a, &b))| *o = op(a, b));
                }
            )*
        }
    };
}

binary_op!(add, |a, b| a + b, [bf16, f16, f32, f64]);
binary_op!(sub, |a, b| a - b, [bf16, f16, f32, f64]);
binary_op!(mul, |a, b| a * b, [bf16, f16, f32, f64]);
binary_op!(div, |a, b| a / b, [bf16, f16, f32, f64]);
