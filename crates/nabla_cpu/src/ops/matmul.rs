use half::{bf16, f16};
use rayon::prelude::*;

macro_rules! matmul_op {
    ([$($type:ident),* $(,)?]) => {
        paste::paste! {
            $(
                /// Batched matrix product of contiguous buffers.
                ///
                /// * `a` is `[batch, m, k]`
                /// * `b` is `[batch, k, n]`
                /// * `out` is `[batch, m, n]`
                pub fn [<matmul_ $type>](batch: usize, m: usize, k: usize, n: usize, a: &[$type], b: &[$type], out: &mut [$type]) {
                    debug_assert_eq!(a.len(), batch * m * k);
                    debug_assert_eq!(b.len(), batch * k * n);
                    debug_assert_eq!(out.len(), batch * m * n);
                    if n == 0 || m == 0 {
                        return;
                    }

                    out.par_chunks_mut(n).enumerate().for_each(|(row, c_row)| {
                        let batch_idx = row / m;
                        let m_idx = row % m;
                        let a_base = batch_idx * m * k + m_idx * k;
                        let b_base = batch_idx * k * n;
                        let a_row = &a[a_base..a_base + k];

                        for (n_idx, c) in c_row.iter_mut().enumerate() {
                            let mut acc = $type::default();
                            for (k_idx, &a_val) in a_row.iter().enumerate() {
                                acc += a_val * b[b_base + k_idx * n + n_idx];
                            }
                            *c = acc;
                        }
                    });
                }
            )*
        }
    };
}

matmul_op!([bf16, f16, f32, f64]);
