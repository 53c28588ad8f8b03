use half::{bf16, f16};
use rayon::prelude::*;

macro_rules! unary_op {
    ($name:ident, $op:expr, [$($type:ident),* $(,)?]) => {
        paste::paste! {
            $(
                pub fn [<$name _ $type>](inp: &[$type], out: &mut [$type]) {
                    debug_assert_eq!(inp.len(), out.len());
                    let op: fn($type) -> $type = $op;
                    out.par_iter_mut().zip(inp.par_iter()).for_each(|(o, &x)| *o = op(x));
                }
            )*
        }
    };
}

// Half precision types have no transcendental functions of their own; they
// round-trip through f32.
macro_rules! unary_op_half {
    ($name:ident, $op:expr) => {
        unary_op_half!(@impl $name, $op, bf16);
        unary_op_half!(@impl $name, $op, f16);
    };
    (@impl $name:ident, $op:expr, $type:ident) => {
        paste::paste! {
            pub fn [<$name _ $type>](inp: &[$type], out: &mut [$type]) {
                debug_assert_eq!(inp.len(), out.len());
                let op: fn(f32) -> f32 = $op;
                out.par_iter_mut()
                    .zip(inp.par_iter())
                    .for_each(|(o, &x)| *o = $type::from_f32(op(x.to_f32())));
            }
        }
    };
}

macro_rules! unary_scalar_op {
    ($name:ident, $op:expr, [$($type:ident),* $(,)?]) => {
        paste::paste! {
            $(
                pub fn [<$name _ $type>](inp: &[$type], scalar: $type, out: &mut [$type]) {
                    debug_assert_eq!(inp.len(), out.len());
                    let op: fn($type, $type) -> $type = $op;
                    out.par_iter_mut().zip(inp.par_iter()).for_each(|(o, &x)| *o = op(x, scalar));
                }
            )*
        }
    };
}

macro_rules! unary_scalar_op_half {
    ($name:ident, $op:expr) => {
        unary_scalar_op_half!(@impl $name, $op, bf16);
        unary_scalar_op_half!(@impl $name, $op, f16);
    };
    (@impl $name:ident, $op:expr, $type:ident) => {
        paste::paste! {
            pub fn [<$name _ $type>](inp: &[$type], scalar: $type, out: &mut [$type]) {
                debug_assert_eq!(inp.len(), out.len());
                let op: fn(f32, f32) -> f32 = $op;
                let scalar = scalar.to_f32();
                out.par_iter_mut()
                    .zip(inp.par_iter())
                    .for_each(|(o, &x)| *o = $type::from_f32(op(x.to_f32(), scalar)));
            }
        }
    };
}

unary_op!(neg, |x| -x, [bf16, f16, f32, f64]);

unary_op!(exp, |x| x.exp(), [f32, f64]);
unary_op_half!(exp, |x| x.exp());

unary_op!(log, |x| x.ln(), [f32, f64]);
unary_op_half!(log, |x| x.ln());

unary_op!(relu, |x| if x > 0.0 { x } else { 0.0 }, [f32, f64]);
unary_op_half!(relu, |x| if x > 0.0 { x } else { 0.0 });

// 1 where the input is strictly positive, 0 elsewhere (including exactly 0).
unary_op!(positive_mask, |x| if x > 0.0 { 1.0 } else { 0.0 }, [f32, f64]);
unary_op_half!(positive_mask, |x| if x > 0.0 { 1.0 } else { 0.0 });

unary_scalar_op!(add_scalar, |x, s| x + s, [bf16, f16, f32, f64]);
unary_scalar_op!(mul_scalar, |x, s| x * s, [bf16, f16, f32, f64]);
unary_scalar_op!(div_scalar, |x, s| x / s, [bf16, f16, f32, f64]);

unary_scalar_op!(pow_scalar, |x, s| x.powf(s), [f32, f64]);
unary_scalar_op_half!(pow_scalar, |x, s| x.powf(s));
