use crate::{
    dtype::DType,
    error::{Error, Result},
    layout::{broadcast_shape, Layout},
    scalar::Scalar,
    storage::{Element, Storage},
};
use half::{bf16, f16};
use nabla_cpu::ops;
use std::sync::Arc;

// Runs a kernel that reads one buffer and writes a fresh one of `len` elements.
macro_rules! dispatch_single {
    ($module:ident::$kernel:ident($($arg:expr),*) on $storage:expr, len = $len:expr) => {
        paste::paste! {
            match $storage {
                Storage::BF16(x) => {
                    let mut out = vec![bf16::default(); $len];
                    ops::$module::[<$kernel _bf16>]($($arg,)* x, &mut out);
                    Storage::BF16(out)
                }
                Storage::F16(x) => {
                    let mut out = vec![f16::default(); $len];
                    ops::$module::[<$kernel _f16>]($($arg,)* x, &mut out);
                    Storage::F16(out)
                }
                Storage::F32(x) => {
                    let mut out = vec![f32::default(); $len];
                    ops::$module::[<$kernel _f32>]($($arg,)* x, &mut out);
                    Storage::F32(out)
                }
                Storage::F64(x) => {
                    let mut out = vec![f64::default(); $len];
                    ops::$module::[<$kernel _f64>]($($arg,)* x, &mut out);
                    Storage::F64(out)
                }
            }
        }
    };
}

// Runs a kernel that reads one buffer plus a scalar converted to its dtype.
macro_rules! dispatch_scalar {
    ($kernel:ident on $storage:expr, $scalar:expr) => {
        paste::paste! {
            match $storage {
                Storage::BF16(x) => {
                    let mut out = vec![bf16::default(); x.len()];
                    ops::unary::[<$kernel _bf16>](x, $scalar.as_bf16(), &mut out);
                    Storage::BF16(out)
                }
                Storage::F16(x) => {
                    let mut out = vec![f16::default(); x.len()];
                    ops::unary::[<$kernel _f16>](x, $scalar.as_f16(), &mut out);
                    Storage::F16(out)
                }
                Storage::F32(x) => {
                    let mut out = vec![f32::default(); x.len()];
                    ops::unary::[<$kernel _f32>](x, $scalar.as_f32(), &mut out);
                    Storage::F32(out)
                }
                Storage::F64(x) => {
                    let mut out = vec![f64::default(); x.len()];
                    ops::unary::[<$kernel _f64>](x, $scalar.as_f64(), &mut out);
                    Storage::F64(out)
                }
            }
        }
    };
}

// Runs a kernel over two buffers of the same dtype.
macro_rules! dispatch_pair {
    ($module:ident::$kernel:ident($($arg:expr),*) on ($lhs:expr, $rhs:expr), len = $len:expr) => {
        paste::paste! {
            match ($lhs, $rhs) {
                (Storage::BF16(a), Storage::BF16(b)) => {
                    let mut out = vec![bf16::default(); $len];
                    ops::$module::[<$kernel _bf16>]($($arg,)* a, b, &mut out);
                    Storage::BF16(out)
                }
                (Storage::F16(a), Storage::F16(b)) => {
                    let mut out = vec![f16::default(); $len];
                    ops::$module::[<$kernel _f16>]($($arg,)* a, b, &mut out);
                    Storage::F16(out)
                }
                (Storage::F32(a), Storage::F32(b)) => {
                    let mut out = vec![f32::default(); $len];
                    ops::$module::[<$kernel _f32>]($($arg,)* a, b, &mut out);
                    Storage::F32(out)
                }
                (Storage::F64(a), Storage::F64(b)) => {
                    let mut out = vec![f64::default(); $len];
                    ops::$module::[<$kernel _f64>]($($arg,)* a, b, &mut out);
                    Storage::F64(out)
                }
                (a, b) => {
                    return Err(Error::DTypeMismatch {
                        expected: a.dtype(),
                        got: b.dtype(),
                    })
                }
            }
        }
    };
}

/// Dense, immutable, row-major array.
///
/// The storage is always contiguous and starts at offset 0. Clones share the
/// storage; every operation produces a new array.
#[derive(Debug, Clone, PartialEq)]
pub struct NDArray {
    storage: Arc<Storage>,
    layout: Layout,
}

impl NDArray {
    pub fn from_storage(storage: Storage, shape: &[usize]) -> Result<Self> {
        let layout = Layout::from_shape(shape);
        if storage.len() != layout.size() {
            return Err(Error::ShapeMismatch {
                op: "from_storage",
                expected: shape.to_vec(),
                got: vec![storage.len()],
            });
        }

        Ok(Self {
            storage: Arc::new(storage),
            layout,
        })
    }

    pub fn from_vec<T: Element>(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        Self::from_storage(T::into_storage(data), shape)
    }

    pub fn full(shape: &[usize], value: f64, dtype: DType) -> Self {
        let size = Layout::compute_size(shape);
        Self {
            storage: Arc::new(Storage::from_f64_vec(&vec![value; size], dtype)),
            layout: Layout::from_shape(shape),
        }
    }

    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        Self::full(shape, 0.0, dtype)
    }

    pub fn ones(shape: &[usize], dtype: DType) -> Self {
        Self::full(shape, 1.0, dtype)
    }

    fn with_storage(&self, storage: Storage) -> Self {
        Self {
            storage: Arc::new(storage),
            layout: Layout::from_shape(self.shape()),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// True when both arrays are backed by the same allocation.
    pub fn shares_storage(&self, other: &NDArray) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.storage.to_vec()
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.storage.to_f64_vec()
    }

    pub fn cast(&self, dtype: DType) -> Self {
        if self.dtype() == dtype {
            return self.clone();
        }
        self.with_storage(self.storage.cast(dtype))
    }

    /// Elementwise `|a - b| <= atol + rtol * |b|` over arrays of equal shape.
    pub fn allclose(&self, other: &NDArray, rtol: f64, atol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .to_f64_vec()
                .iter()
                .zip(other.to_f64_vec().iter())
                .all(|(a, b)| (a - b).abs() <= atol + rtol * b.abs())
    }

    // ==== movement ====

    fn gather(&self, layout: &Layout) -> Self {
        let storage = dispatch_single!(
            copy::copy_strided(layout.shape(), layout.strides(), layout.offset()) on self.storage.as_ref(),
            len = layout.size()
        );
        Self {
            storage: Arc::new(storage),
            layout: Layout::from_shape(layout.shape()),
        }
    }

    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        let mut layout = self.layout.clone();
        layout.view(shape)?;
        Ok(Self {
            storage: Arc::clone(&self.storage),
            layout,
        })
    }

    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Self> {
        if self.shape() == shape {
            return Ok(self.clone());
        }
        let layout = self.layout.broadcast_to(shape)?;
        Ok(self.gather(&layout))
    }

    pub fn transpose(&self, dim0: usize, dim1: usize) -> Result<Self> {
        let mut layout = self.layout.clone();
        layout.transpose(dim0, dim1)?;
        Ok(self.gather(&layout))
    }

    // ==== elementwise ====

    fn check_same_shape(&self, rhs: &NDArray, op: &'static str) -> Result<()> {
        if self.shape() != rhs.shape() {
            return Err(Error::ShapeMismatch {
                op,
                expected: self.shape().to_vec(),
                got: rhs.shape().to_vec(),
            });
        }
        Ok(())
    }

    pub fn add(&self, rhs: &NDArray) -> Result<Self> {
        self.check_same_shape(rhs, "add")?;
        let storage = dispatch_pair!(binary::add() on (self.storage.as_ref(), rhs.storage.as_ref()), len = self.size());
        Ok(self.with_storage(storage))
    }

    pub fn sub(&self, rhs: &NDArray) -> Result<Self> {
        self.check_same_shape(rhs, "sub")?;
        let storage = dispatch_pair!(binary::sub() on (self.storage.as_ref(), rhs.storage.as_ref()), len = self.size());
        Ok(self.with_storage(storage))
    }

    pub fn mul(&self, rhs: &NDArray) -> Result<Self> {
        self.check_same_shape(rhs, "mul")?;
        let storage = dispatch_pair!(binary::mul() on (self.storage.as_ref(), rhs.storage.as_ref()), len = self.size());
        Ok(self.with_storage(storage))
    }

    pub fn div(&self, rhs: &NDArray) -> Result<Self> {
        self.check_same_shape(rhs, "div")?;
        let storage = dispatch_pair!(binary::div() on (self.storage.as_ref(), rhs.storage.as_ref()), len = self.size());
        Ok(self.with_storage(storage))
    }

    pub fn neg(&self) -> Self {
        self.with_storage(dispatch_single!(unary::neg() on self.storage.as_ref(), len = self.size()))
    }

    pub fn exp(&self) -> Self {
        self.with_storage(dispatch_single!(unary::exp() on self.storage.as_ref(), len = self.size()))
    }

    pub fn log(&self) -> Self {
        self.with_storage(dispatch_single!(unary::log() on self.storage.as_ref(), len = self.size()))
    }

    pub fn relu(&self) -> Self {
        self.with_storage(dispatch_single!(unary::relu() on self.storage.as_ref(), len = self.size()))
    }

    /// 1 where the element is strictly positive, 0 elsewhere.
    pub fn positive_mask(&self) -> Self {
        self.with_storage(dispatch_single!(unary::positive_mask() on self.storage.as_ref(), len = self.size()))
    }

    pub fn add_scalar(&self, scalar: Scalar) -> Self {
        self.with_storage(dispatch_scalar!(add_scalar on self.storage.as_ref(), scalar))
    }

    pub fn mul_scalar(&self, scalar: Scalar) -> Self {
        self.with_storage(dispatch_scalar!(mul_scalar on self.storage.as_ref(), scalar))
    }

    pub fn div_scalar(&self, scalar: Scalar) -> Self {
        self.with_storage(dispatch_scalar!(div_scalar on self.storage.as_ref(), scalar))
    }

    pub fn pow_scalar(&self, scalar: Scalar) -> Self {
        self.with_storage(dispatch_scalar!(pow_scalar on self.storage.as_ref(), scalar))
    }

    // ==== reduction ====

    /// Sums over `axes` (every axis when `None`), dropping the reduced dimensions.
    pub fn sum(&self, axes: Option<&[usize]>) -> Result<Self> {
        let ndim = self.ndim();
        let mut reduce = vec![axes.is_none(); ndim];
        for &axis in axes.unwrap_or(&[]) {
            if axis >= ndim {
                return Err(Error::DimensionOutOfBounds { dim: axis as i64, ndim });
            }
            if reduce[axis] {
                return Err(Error::InvalidArgument(format!("axis {} is reduced twice", axis)));
            }
            reduce[axis] = true;
        }

        let out_shape: Vec<usize> = self
            .shape()
            .iter()
            .zip(reduce.iter())
            .filter(|(_, &r)| !r)
            .map(|(&d, _)| d)
            .collect();
        let storage = dispatch_single!(
            reduction::sum(self.shape(), &reduce) on self.storage.as_ref(),
            len = Layout::compute_size(&out_shape)
        );

        Self::from_storage(storage, &out_shape)
    }

    // ==== matmul ====

    /// Matrix product over the last two axes. Leading (batch) axes broadcast.
    pub fn matmul(&self, rhs: &NDArray) -> Result<Self> {
        let (a_shape, b_shape) = (self.shape(), rhs.shape());
        let (a_nd, b_nd) = (a_shape.len(), b_shape.len());
        if a_nd < 2 || b_nd < 2 {
            return Err(Error::InvalidArgument(format!(
                "matmul needs operands with at least 2 dimensions, got {:?} and {:?}",
                a_shape, b_shape
            )));
        }

        let (m, k) = (a_shape[a_nd - 2], a_shape[a_nd - 1]);
        let (kb, n) = (b_shape[b_nd - 2], b_shape[b_nd - 1]);
        if k != kb {
            return Err(Error::ShapeMismatch {
                op: "matmul",
                expected: a_shape.to_vec(),
                got: b_shape.to_vec(),
            });
        }

        let batch_shape =
            broadcast_shape(&a_shape[..a_nd - 2], &b_shape[..b_nd - 2]).map_err(|_| Error::ShapeMismatch {
                op: "matmul",
                expected: a_shape.to_vec(),
                got: b_shape.to_vec(),
            })?;
        let batch = Layout::compute_size(&batch_shape);

        let a = self.broadcast_to(&[batch_shape.as_slice(), &[m, k]].concat())?;
        let b = rhs.broadcast_to(&[batch_shape.as_slice(), &[k, n]].concat())?;

        let storage = dispatch_pair!(
            matmul::matmul(batch, m, k, n) on (a.storage.as_ref(), b.storage.as_ref()),
            len = batch * m * n
        );

        Self::from_storage(storage, &[batch_shape.as_slice(), &[m, n]].concat())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::NDArray;
    use crate::storage::Storage;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct SerializedArray {
        shape: Vec<usize>,
        storage: Storage,
    }

    impl Serialize for NDArray {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            SerializedArray {
                shape: self.shape().to_vec(),
                storage: self.storage().clone(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for NDArray {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let serialized = SerializedArray::deserialize(deserializer)?;
            NDArray::from_storage(serialized.storage, &serialized.shape).map_err(de::Error::custom)
        }
    }
}
