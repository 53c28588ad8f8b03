use crate::{adapter::TensorAdapter, Tensor};
use nabla_core::{
    array::NDArray,
    dtype::{get_default_dtype, DType},
    error::Result,
    layout::Layout,
    scalar::Scalar,
    storage::{Element, Storage},
};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

impl Tensor {
    /// Builds a leaf from a scalar or nested `Vec`s/arrays, converted to the
    /// thread's default dtype.
    pub fn new<T>(data: T) -> Result<Self>
    where
        T: TensorAdapter,
    {
        Self::new_with_dtype(data, get_default_dtype())
    }

    pub fn new_with_dtype<T>(data: T, dtype: DType) -> Result<Self>
    where
        T: TensorAdapter,
    {
        let shape = data.get_shape();
        let flat = data.to_flatten_vec()?;
        let array = NDArray::from_vec(flat, &shape)?;

        Ok(Self::from_array(array.cast(dtype)))
    }

    /// Builds a leaf of `T`'s own dtype from flat row-major data.
    pub fn from_vec<T: Element>(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        Ok(Self::from_array(NDArray::from_vec(data, shape)?))
    }

    pub fn full(shape: &[usize], value: impl Into<Scalar>) -> Self {
        Self::full_with_dtype(shape, value, get_default_dtype())
    }

    pub fn full_with_dtype(shape: &[usize], value: impl Into<Scalar>, dtype: DType) -> Self {
        Self::from_array(NDArray::full(shape, value.into().as_f64(), dtype))
    }

    pub fn full_like(src: &Tensor, value: impl Into<Scalar>) -> Self {
        Self::full_with_dtype(src.shape(), value, src.dtype())
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::zeros_with_dtype(shape, get_default_dtype())
    }

    pub fn zeros_with_dtype(shape: &[usize], dtype: DType) -> Self {
        Self::from_array(NDArray::zeros(shape, dtype))
    }

    pub fn zeros_like(src: &Tensor) -> Self {
        Self::zeros_with_dtype(src.shape(), src.dtype())
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::ones_with_dtype(shape, get_default_dtype())
    }

    pub fn ones_with_dtype(shape: &[usize], dtype: DType) -> Self {
        Self::from_array(NDArray::ones(shape, dtype))
    }

    pub fn ones_like(src: &Tensor) -> Self {
        Self::ones_with_dtype(src.shape(), src.dtype())
    }

    /// Uniform samples in `[0, 1)`.
    pub fn rand(shape: &[usize]) -> Result<Self> {
        Self::rand_with(shape, get_default_dtype(), &mut rand::thread_rng())
    }

    pub fn rand_like(src: &Tensor) -> Result<Self> {
        Self::rand_with(src.shape(), src.dtype(), &mut rand::thread_rng())
    }

    pub fn rand_with<R: Rng + ?Sized>(shape: &[usize], dtype: DType, rng: &mut R) -> Result<Self> {
        let uniform = Uniform::new(0.0f64, 1.0);
        Self::sample(shape, dtype, rng, uniform)
    }

    /// Standard normal samples.
    pub fn randn(shape: &[usize]) -> Result<Self> {
        Self::randn_with(shape, get_default_dtype(), &mut rand::thread_rng())
    }

    pub fn randn_like(src: &Tensor) -> Result<Self> {
        Self::randn_with(src.shape(), src.dtype(), &mut rand::thread_rng())
    }

    pub fn randn_with<R: Rng + ?Sized>(shape: &[usize], dtype: DType, rng: &mut R) -> Result<Self> {
        Self::sample(shape, dtype, rng, StandardNormal)
    }

    fn sample<R, D>(shape: &[usize], dtype: DType, rng: &mut R, distribution: D) -> Result<Self>
    where
        R: Rng + ?Sized,
        D: Distribution<f64>,
    {
        let size = Layout::compute_size(shape);
        let data: Vec<f64> = (0..size).map(|_| distribution.sample(rng)).collect();
        let array = NDArray::from_storage(Storage::from_f64_vec(&data, dtype), shape)?;

        Ok(Self::from_array(array))
    }
}
