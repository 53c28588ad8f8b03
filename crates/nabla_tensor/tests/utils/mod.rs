#![allow(dead_code)]

use nabla_core::{dtype::DType, error::Result};
use nabla_tensor::{adapter::TensorAdapter, Tensor};

// Helper functions
pub fn setup_tensor<T>(data: T, dtype: DType) -> Result<Tensor>
where
    T: TensorAdapter,
{
    Tensor::new_with_dtype(data, dtype)
}

pub fn setup_grad_tensor<T>(data: T, dtype: DType) -> Result<Tensor>
where
    T: TensorAdapter,
{
    let tensor = setup_tensor(data, dtype)?;
    tensor.with_grad()?;
    Ok(tensor)
}

pub fn setup_grad_tensor_with_shape(data: Vec<f64>, dtype: DType, shape: &[usize]) -> Result<Tensor> {
    let tensor = Tensor::from_vec(data, shape)?.to_dtype(dtype);
    tensor.with_grad()?;
    Ok(tensor)
}

pub fn grad_vec(tensor: &Tensor) -> Result<Vec<f32>> {
    match tensor.grad()? {
        Some(g) => g.to_flatten_vec::<f32>(),
        None => panic!("{:?} has no grad", tensor),
    }
}

/// Loose comparison that tolerates the rounding of half precision dtypes.
pub fn assert_close(actual: &[f32], expected: &[f32], dtype: DType) {
    let tol = match dtype {
        DType::BF16 => 2e-2,
        DType::F16 => 2e-3,
        DType::F32 => 1e-5,
        DType::F64 => 1e-9,
    };
    assert_eq!(actual.len(), expected.len(), "length mismatch: {:?} vs {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a - e).abs() <= tol * (1.0 + e.abs()),
            "{:?} is not close to {:?} ({})",
            actual,
            expected,
            dtype
        );
    }
}

/// Central-difference estimate of d(sum f(x))/dx, evaluated in f64.
pub fn numerical_grad<F>(f: F, x: &[f64], shape: &[usize], eps: f64) -> Result<Vec<f64>>
where
    F: Fn(&Tensor) -> Result<Tensor>,
{
    let mut grads = Vec::with_capacity(x.len());
    for i in 0..x.len() {
        let mut plus = x.to_vec();
        let mut minus = x.to_vec();
        plus[i] += eps;
        minus[i] -= eps;

        let f_plus = f(&Tensor::from_vec(plus, shape)?)?.sum_all()?.item::<f64>()?;
        let f_minus = f(&Tensor::from_vec(minus, shape)?)?.sum_all()?.item::<f64>()?;
        grads.push((f_plus - f_minus) / (2.0 * eps));
    }
    Ok(grads)
}

#[macro_export]
macro_rules! test_ops {
    ([$($op:ident),*]) => {
        $(
            mod $op {
                use super::*;
                use paste::paste;

                paste! {
                    #[test]
                    fn bf16() -> Result<()> {
                        test_functions::[<$op _test>](DType::BF16)
                    }

                    #[test]
                    fn f16() -> Result<()> {
                        test_functions::[<$op _test>](DType::F16)
                    }

                    #[test]
                    fn f32() -> Result<()> {
                        test_functions::[<$op _test>](DType::F32)
                    }

                    #[test]
                    fn f64() -> Result<()> {
                        test_functions::[<$op _test>](DType::F64)
                    }
                }
            }
        )*
    };
}
