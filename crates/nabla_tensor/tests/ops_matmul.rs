mod utils;

use nabla_core::{
    dtype::DType,
    error::{Error, Result},
};
use nabla_tensor::Tensor;
use utils::{grad_vec, setup_grad_tensor, setup_grad_tensor_with_shape, setup_tensor};

mod test_functions {
    use super::*;

    pub fn matrix_matrix_test(dtype: DType) -> Result<()> {
        let a = setup_grad_tensor(vec![vec![1.0f32, 2.0], vec![3.0, 4.0]], dtype)?;
        let b = setup_grad_tensor(vec![vec![5.0f32, 6.0], vec![7.0, 8.0]], dtype)?;
        let c = a.matmul(&b)?;
        c.backward()?;

        assert_eq!(c.shape(), &[2, 2]);
        assert_eq!(c.to_flatten_vec::<f32>()?, vec![19.0, 22.0, 43.0, 50.0]);
        // ones @ b^T
        assert_eq!(grad_vec(&a)?, vec![11.0, 15.0, 11.0, 15.0]);
        // a^T @ ones
        assert_eq!(grad_vec(&b)?, vec![4.0, 4.0, 6.0, 6.0]);

        Ok(())
    }

    pub fn rectangular_test(dtype: DType) -> Result<()> {
        let a = setup_grad_tensor(vec![vec![1.0f32, 2.0, 3.0], vec![4.0, 5.0, 6.0]], dtype)?;
        let b = setup_grad_tensor(vec![vec![1.0f32], vec![0.0], vec![-1.0]], dtype)?;
        let c = a.matmul(&b)?;
        c.backward()?;

        assert_eq!(c.shape(), &[2, 1]);
        assert_eq!(c.to_flatten_vec::<f32>()?, vec![-2.0, -2.0]);
        assert_eq!(grad_vec(&a)?, vec![1.0, 0.0, -1.0, 1.0, 0.0, -1.0]);
        assert_eq!(grad_vec(&b)?, vec![5.0, 7.0, 9.0]);

        Ok(())
    }

    pub fn batched_broadcast_rhs_test(dtype: DType) -> Result<()> {
        let a_data: Vec<f64> = (0..24).map(|v| (v % 5) as f64).collect();
        let a = setup_grad_tensor_with_shape(a_data, dtype, &[2, 3, 4])?;
        let b = setup_grad_tensor_with_shape(vec![1.0; 20], dtype, &[4, 5])?;
        let c = a.matmul(&b)?;
        c.backward()?;

        assert_eq!(c.shape(), &[2, 3, 5]);
        let a_grad = a.grad()?.map(|g| g.shape().to_vec());
        let b_grad = b.grad()?.map(|g| g.shape().to_vec());
        assert_eq!(a_grad, Some(vec![2, 3, 4]));
        assert_eq!(b_grad, Some(vec![4, 5]));

        // every row of b sums to 5
        assert_eq!(grad_vec(&a)?, vec![5.0; 24]);
        // column k of b collects a[.., .., k] over both batches and all rows
        let a_vals: Vec<f32> = a.to_flatten_vec()?;
        let mut expected = vec![0.0f32; 20];
        for (i, v) in a_vals.iter().enumerate() {
            let k = i % 4;
            for n in 0..5 {
                expected[k * 5 + n] += v;
            }
        }
        assert_eq!(grad_vec(&b)?, expected);

        Ok(())
    }

    pub fn batched_both_sides_test(dtype: DType) -> Result<()> {
        let a = setup_grad_tensor_with_shape(vec![1.0; 12], dtype, &[3, 1, 2, 2])?;
        let b = setup_grad_tensor_with_shape(vec![2.0; 16], dtype, &[4, 2, 2])?;
        let c = a.matmul(&b)?;
        c.backward()?;

        assert_eq!(c.shape(), &[3, 4, 2, 2]);
        assert_eq!(c.to_flatten_vec::<f32>()?, vec![4.0; 48]);
        assert_eq!(a.grad()?.map(|g| g.shape().to_vec()), Some(vec![3, 1, 2, 2]));
        assert_eq!(b.grad()?.map(|g| g.shape().to_vec()), Some(vec![4, 2, 2]));
        // each a element meets 4 batches of b, 2 columns each with value 2
        assert_eq!(grad_vec(&a)?, vec![16.0; 12]);
        // each b element meets 3 batches of a, 2 rows each with value 1
        assert_eq!(grad_vec(&b)?, vec![6.0; 16]);

        Ok(())
    }

    pub fn invalid_shapes_test(dtype: DType) -> Result<()> {
        let a = setup_tensor(vec![vec![1.0f32, 2.0, 3.0]], dtype)?;
        let b = setup_tensor(vec![vec![1.0f32, 2.0]], dtype)?;
        let v = setup_tensor(vec![1.0f32, 2.0, 3.0], dtype)?;

        assert!(matches!(a.matmul(&b), Err(Error::ShapeMismatch { op: "matmul", .. })));
        assert!(matches!(a.matmul(&v), Err(Error::InvalidArgument(_))));

        Ok(())
    }
}

test_ops!([
    matrix_matrix,
    rectangular,
    batched_broadcast_rhs,
    batched_both_sides,
    invalid_shapes
]);

#[test]
fn linear_layer_chain() -> Result<()> {
    let x = Tensor::new_with_dtype(vec![vec![1.0f64, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]], DType::F64)?;
    let w = Tensor::new_with_dtype(vec![vec![0.5f64, -1.0, 0.0], vec![1.0, 0.5, -0.5]], DType::F64)?;
    let bias = Tensor::new_with_dtype(vec![0.1f64, 0.2, 0.3], DType::F64)?;
    w.with_grad()?;
    bias.with_grad()?;

    let out = x.matmul(&w)?.add(&bias)?.relu()?.sum_all()?;
    out.backward()?;

    // pre-activation rows: [2.6, 0.2, -0.7], [5.6, -0.8, -1.7], [8.6, -1.8, -2.7]
    assert!((out.item::<f64>()? - 17.0).abs() < 1e-12);
    let w_grad: Vec<f64> = w.grad()?.map(|g| g.to_flatten_vec()).transpose()?.unwrap_or_default();
    assert_eq!(w_grad, vec![9.0, 1.0, 0.0, 12.0, 2.0, 0.0]);
    let b_grad: Vec<f64> = bias.grad()?.map(|g| g.to_flatten_vec()).transpose()?.unwrap_or_default();
    assert_eq!(b_grad, vec![3.0, 1.0, 0.0]);

    Ok(())
}
