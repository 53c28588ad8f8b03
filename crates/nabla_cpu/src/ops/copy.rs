use crate::utils::{get_strided_index, is_contiguous};
use half::{bf16, f16};
use rayon::prelude::*;

macro_rules! copy_strided_op {
    ([$($type:ident),* $(,)?]) => {
        paste::paste! {
            $(
                /// Gathers the view described by `dims`, `strides` and `offset` over `inp`
                /// into the contiguous buffer `out`.
                ///
                /// A stride of 0 repeats the same source element along that axis, which is
                /// how broadcast views are materialized.
                pub fn [<copy_strided_ $type>](dims: &[usize], strides: &[usize], offset: usize, inp: &[$type], out: &mut [$type]) {
                    if is_contiguous(dims, strides) {
                        let num_els = out.len();
                        out.copy_from_slice(&inp[offset..offset + num_els]);
                        return;
                    }

                    out.par_iter_mut().enumerate().for_each(|(i, o)| {
                        *o = inp[offset + get_strided_index(i, dims, strides)];
                    });
                }
            )*
        }
    };
}

copy_strided_op!([bf16, f16, f32, f64]);
