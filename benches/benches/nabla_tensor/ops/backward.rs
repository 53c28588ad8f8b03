use criterion::{black_box, Criterion};
use nabla_core::dtype::DType;
use nabla_tensor::Tensor;
use rand::{rngs::StdRng, SeedableRng};

const SIZES: [(usize, &str); 3] = [(16, "small"), (64, "medium"), (256, "large")];

// Two dense layers with a relu in between, reduced to a scalar.
fn mlp_loss(x: &Tensor, w1: &Tensor, w2: &Tensor) -> Tensor {
    x.matmul(w1)
        .and_then(|h| h.relu())
        .and_then(|h| h.matmul(w2))
        .and_then(|o| o.pow(2))
        .and_then(|o| o.sum_all())
        .unwrap()
}

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("backward/mlp");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(30);

    for &(n, size_name) in SIZES.iter() {
        let mut rng = StdRng::seed_from_u64(0);
        let x = Tensor::randn_with(&[n, n], DType::F32, &mut rng).unwrap();
        let w1 = Tensor::randn_with(&[n, n], DType::F32, &mut rng).unwrap();
        let w2 = Tensor::randn_with(&[n, n], DType::F32, &mut rng).unwrap();
        w1.with_grad().unwrap();
        w2.with_grad().unwrap();

        group.bench_function(format!("forward_backward/{}", size_name), |b| {
            b.iter(|| {
                let loss = mlp_loss(&x, &w1, &w2);
                loss.backward().unwrap();
                black_box(loss)
            })
        });
    }

    group.finish();
}
