use crate::utils::{contiguous_strides, get_strided_index};
use half::{bf16, f16};
use rayon::prelude::*;

macro_rules! sum_op {
    ([$($type:ident),* $(,)?]) => {
        paste::paste! {
            $(
                /// Sums the contiguous buffer `inp` of shape `dims` over every axis flagged in
                /// `reduce`.
                ///
                /// `out` holds one element per combination of the kept axes, in row-major
                /// order, so its length is the product of the kept dimensions.
                pub fn [<sum_ $type>](dims: &[usize], reduce: &[bool], inp: &[$type], out: &mut [$type]) {
                    debug_assert_eq!(dims.len(), reduce.len());
                    let strides = contiguous_strides(dims);

                    let (mut kept_dims, mut kept_strides) = (Vec::new(), Vec::new());
                    let (mut summed_dims, mut summed_strides) = (Vec::new(), Vec::new());
                    for d in 0..dims.len() {
                        if reduce[d] {
                            summed_dims.push(dims[d]);
                            summed_strides.push(strides[d]);
                        } else {
                            kept_dims.push(dims[d]);
                            kept_strides.push(strides[d]);
                        }
                    }
                    let inner: usize = summed_dims.iter().product();

                    out.par_iter_mut().enumerate().for_each(|(o, dst)| {
                        let base = get_strided_index(o, &kept_dims, &kept_strides);
                        let mut acc = $type::default();
                        for j in 0..inner {
                            acc += inp[base + get_strided_index(j, &summed_dims, &summed_strides)];
                        }
                        *dst = acc;
                    });
                }
            )*
        }
    };
}

sum_op!([bf16, f16, f32, f64]);
