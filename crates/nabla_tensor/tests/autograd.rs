mod utils;

use nabla_core::{
    dtype::DType,
    error::{Error, Result},
};
use nabla_tensor::Tensor;
use utils::{grad_vec, setup_grad_tensor, setup_tensor};

#[test]
fn fan_out_accumulates() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0f32, 2.0, 3.0], DType::F32)?;
    let y = x.add(&x)?;
    y.backward()?;

    assert_eq!(y.to_flatten_vec::<f32>()?, vec![2.0, 4.0, 6.0]);
    assert_eq!(grad_vec(&x)?, vec![2.0, 2.0, 2.0]);

    Ok(())
}

#[test]
fn diamond_sums_both_paths() -> Result<()> {
    // y = (x * 3) * (x + 1), dy/dx = 3 * (x + 1) + 3 * x = 6x + 3
    let x = setup_grad_tensor(vec![1.0f64, 2.0], DType::F64)?;
    let a = x.mul_scalar(3)?;
    let b = x.add_scalar(1)?;
    let y = a.mul(&b)?;
    y.backward()?;

    assert_eq!(grad_vec(&x)?, vec![9.0, 15.0]);
    assert_eq!(grad_vec(&a)?, vec![2.0, 3.0]);
    assert_eq!(grad_vec(&b)?, vec![3.0, 6.0]);
    assert_eq!(grad_vec(&y)?, vec![1.0, 1.0]);

    Ok(())
}

#[test]
fn scalar_graph() -> Result<()> {
    let x = setup_grad_tensor(2.0f32, DType::F32)?;
    let y = setup_grad_tensor(3.0f32, DType::F32)?;

    let z1 = x.mul(&y)?;
    let z2 = x.sub(&y)?;
    let z3 = x.add(&y)?;
    let z4 = x.pow(2)?.add(&y.pow(3)?)?;
    let result = z1.add(&z2)?.add(&z3)?.add(&z4)?;
    result.backward()?;

    assert_eq!(result.item::<f32>()?, 41.0);
    // y + 1 + 1 + 2x
    assert_eq!(x.grad()?.map(|g| g.item::<f32>()).transpose()?, Some(9.0));
    // x - 1 + 1 + 3y^2
    assert_eq!(y.grad()?.map(|g| g.item::<f32>()).transpose()?, Some(29.0));

    Ok(())
}

#[test]
fn untracked_inputs_get_no_grad() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0f32, 2.0], DType::F32)?;
    let c = setup_tensor(vec![5.0f32, 6.0], DType::F32)?;
    let y = x.mul(&c)?;
    y.backward()?;

    assert_eq!(grad_vec(&x)?, vec![5.0, 6.0]);
    assert!(c.grad()?.is_none());

    // no input requires grad, so nothing is recorded
    let z = c.mul(&c)?;
    assert!(z.is_leaf());
    assert!(!z.requires_grad());

    Ok(())
}

#[test]
fn backward_on_untracked_tensor_sets_only_its_own_grad() -> Result<()> {
    let c = setup_tensor(vec![1.0f32, 2.0, 3.0], DType::F32)?;
    c.backward()?;

    assert_eq!(grad_vec(&c)?, vec![1.0, 1.0, 1.0]);

    Ok(())
}

#[test]
fn repeated_backward_assigns() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0f32, 2.0], DType::F32)?;
    let y = x.mul_scalar(4)?;

    y.backward()?;
    y.backward()?;
    assert_eq!(grad_vec(&x)?, vec![4.0, 4.0]);

    x.zero_grad()?;
    assert!(x.grad()?.is_none());

    Ok(())
}

#[test]
fn stored_grads_are_leaves() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0f32, 2.0], DType::F32)?;
    let y = x.mul(&x)?.sum_all()?;
    y.backward()?;

    let grad = x.grad()?.expect("x has a grad");
    assert!(grad.is_leaf());
    assert!(!grad.requires_grad());
    assert_eq!(grad.shape(), x.shape());
    assert_eq!(grad.dtype(), x.dtype());

    Ok(())
}

#[test]
fn detach_cuts_the_graph() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0f32, 2.0], DType::F32)?;
    let h = x.mul_scalar(2)?;
    let d = h.detach();

    assert!(d.is_leaf());
    assert!(d.op().is_none());
    assert!(!d.requires_grad());
    assert!(d.value().shares_storage(h.value()));
    assert_ne!(d.id(), h.id());

    let w = setup_grad_tensor(vec![3.0f32, 4.0], DType::F32)?;
    let y = d.mul(&w)?;
    y.backward()?;

    assert_eq!(grad_vec(&w)?, vec![2.0, 4.0]);
    assert!(h.grad()?.is_none());
    assert!(x.grad()?.is_none());

    Ok(())
}

#[test]
fn deep_chain() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0f64], DType::F64)?;
    let mut y = x.clone();
    for _ in 0..200 {
        y = y.add_scalar(1)?;
    }
    y.backward()?;

    assert_eq!(y.item::<f64>()?, 201.0);
    assert_eq!(grad_vec(&x)?, vec![1.0]);

    Ok(())
}

#[test]
fn very_deep_chain_is_dropped_without_recursion() -> Result<()> {
    let x = setup_grad_tensor(vec![0.0f64], DType::F64)?;
    let mut y = x.clone();
    for _ in 0..100_000 {
        y = y.add_scalar(1)?;
    }
    y.backward()?;
    assert_eq!(grad_vec(&x)?, vec![1.0]);

    drop(y);
    assert!(x.is_leaf());
    assert_eq!(x.to_flatten_vec::<f64>()?, vec![0.0]);

    Ok(())
}

#[test]
fn requires_grad_is_fixed_on_interior_nodes() -> Result<()> {
    let x = setup_grad_tensor(vec![1.0f32], DType::F32)?;
    let y = x.neg()?;

    assert!(matches!(y.set_requires_grad(false), Err(Error::InvalidArgument(_))));
    x.set_requires_grad(false)?;
    assert!(!x.requires_grad());

    Ok(())
}

#[test]
fn ids_are_unique() {
    let a = Tensor::zeros(&[1]);
    let b = a.clone();
    let c = Tensor::zeros(&[1]);

    assert_eq!(a.id(), b.id());
    assert!(a.ptr_eq(&b));
    assert_ne!(a.id(), c.id());
}
