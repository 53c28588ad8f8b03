use criterion::{black_box, Criterion};
use nabla_core::{dtype::DType, error::Result};
use nabla_tensor::{no_grad_mode, Tensor};
use rand::{rngs::StdRng, SeedableRng};

// Constants for benchmark data sizes
const SIZES: [(usize, &str); 3] = [(16, "small"), (64, "medium"), (256, "large")];

fn bench_op<F>(b: &mut criterion::Bencher, dtype: DType, n: usize, op_fn: F)
where
    F: Fn(&Tensor, &Tensor) -> Result<Tensor>,
{
    let mut rng = StdRng::seed_from_u64(0);
    let x = Tensor::randn_with(&[n, n], dtype, &mut rng).unwrap();
    let w = Tensor::randn_with(&[n, n], dtype, &mut rng).unwrap();

    b.iter(|| black_box(op_fn(&x, &w)).unwrap())
}

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("forward/basic");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(50);

    let operations: Vec<(&str, Box<dyn Fn(&Tensor, &Tensor) -> Result<Tensor>>)> = vec![
        ("add", Box::new(|x, w| x.add(w))),
        ("mul_broadcast", Box::new(|x, w| x.mul(&w.summation(0)?))),
        ("relu", Box::new(|x, _| x.relu())),
        ("exp", Box::new(|x, _| x.exp())),
        ("sum_axis", Box::new(|x, _| x.summation(1))),
        ("transpose", Box::new(|x, _| x.t())),
        ("matmul", Box::new(|x, w| x.matmul(w))),
    ];

    // untracked: only the kernels and the array plumbing are measured
    let _guard = no_grad_mode();
    for (op_name, op_fn) in operations.iter() {
        for &(n, size_name) in SIZES.iter() {
            for dtype in [DType::F32, DType::F64] {
                let bench_name = format!("{}/{}/{}", op_name, size_name, dtype);
                group.bench_function(&bench_name, |b| bench_op(b, dtype, n, op_fn));
            }
        }
    }

    group.finish();
}
