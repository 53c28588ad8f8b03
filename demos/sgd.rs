//! Fits a two-layer network to `y = 3x - 1` with plain gradient descent.
//!
//! The parameters are leaves; every step builds a fresh graph, runs
//! `backward`, then replaces each parameter with its updated value computed
//! without tracking.

use nabla::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

const STEPS: usize = 300;
const LEARNING_RATE: f64 = 0.05;

fn sgd_step(param: &Tensor, lr: f64) -> Result<Tensor> {
    let grad = param.grad()?.ok_or_else(|| Error::InvalidArgument("parameter has no grad".into()))?;
    let updated = no_grad(|| param.sub(&grad.mul_scalar(lr)?))?;
    updated.with_grad()?;
    Ok(updated)
}

fn main() -> Result<()> {
    set_default_dtype(DType::F64);
    let mut rng = StdRng::seed_from_u64(0);

    let xs: Vec<f64> = (0..32).map(|i| i as f64 / 16.0 - 1.0).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x - 1.0).collect();
    let x = Tensor::from_vec(xs, &[32, 1])?;
    let y = Tensor::from_vec(ys, &[32, 1])?;

    let mut params = vec![
        Tensor::randn_with(&[1, 16], DType::F64, &mut rng)?.mul_scalar(0.5)?,
        Tensor::zeros(&[16]),
        Tensor::randn_with(&[16, 1], DType::F64, &mut rng)?.mul_scalar(0.25)?,
        Tensor::zeros(&[1]),
    ];
    for p in &params {
        p.with_grad()?;
    }

    for step in 0..STEPS {
        let hidden = x.matmul(&params[0])?.add(&params[1])?.relu()?;
        let pred = hidden.matmul(&params[2])?.add(&params[3])?;
        let loss = pred.sub(&y)?.pow(2)?.sum_all()?.div_scalar(32)?;

        loss.backward()?;
        params = params
            .iter()
            .map(|p| sgd_step(p, LEARNING_RATE))
            .collect::<Result<Vec<_>>>()?;

        if step % 50 == 0 || step == STEPS - 1 {
            println!("step {:>3}  loss {:.6}", step, loss.item::<f64>()?);
        }
    }

    let probe = Tensor::from_vec(vec![0.5f64], &[1, 1])?;
    let out = no_grad(|| -> Result<Tensor> {
        let hidden = probe.matmul(&params[0])?.add(&params[1])?.relu()?;
        hidden.matmul(&params[2])?.add(&params[3])
    })?;
    println!("f(0.5) = {:.4} (target 0.5)", out.item::<f64>()?);

    Ok(())
}
