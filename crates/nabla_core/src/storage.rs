use crate::dtype::DType;
use half::{bf16, f16};

/// Flat, contiguous element buffer of one dtype.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Storage {
    BF16(Vec<bf16>),
    F16(Vec<f16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Rust element types that can back a [`Storage`].
pub trait Element: Copy + Default + PartialOrd + Send + Sync + std::fmt::Debug + 'static {
    const DTYPE: DType;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
    fn into_storage(data: Vec<Self>) -> Storage;
}

macro_rules! impl_element {
    ($type:ty, $variant:ident, |$v:ident| $from:expr, |$s:ident| $to:expr) => {
        impl Element for $type {
            const DTYPE: DType = DType::$variant;

            #[inline]
            fn from_f64($v: f64) -> Self {
                $from
            }
            #[inline]
            fn to_f64(self) -> f64 {
                let $s = self;
                $to
            }
            fn into_storage(data: Vec<Self>) -> Storage {
                Storage::$variant(data)
            }
        }
    };
}

impl_element!(bf16, BF16, |v| bf16::from_f64(v), |s| s.to_f64());
impl_element!(f16, F16, |v| f16::from_f64(v), |s| s.to_f64());
impl_element!(f32, F32, |v| v as f32, |s| s as f64);
impl_element!(f64, F64, |v| v, |s| s);

impl Storage {
    pub fn dtype(&self) -> DType {
        match self {
            Self::BF16(_) => DType::BF16,
            Self::F16(_) => DType::F16,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::BF16(v) => v.len(),
            Self::F16(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_f64_vec(data: &[f64], dtype: DType) -> Self {
        match dtype {
            DType::BF16 => Self::BF16(data.iter().map(|&v| bf16::from_f64(v)).collect()),
            DType::F16 => Self::F16(data.iter().map(|&v| f16::from_f64(v)).collect()),
            DType::F32 => Self::F32(data.iter().map(|&v| v as f32).collect()),
            DType::F64 => Self::F64(data.to_vec()),
        }
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::BF16(v) => v.iter().map(|x| x.to_f64()).collect(),
            Self::F16(v) => v.iter().map(|x| x.to_f64()).collect(),
            Self::F32(v) => v.iter().map(|&x| x as f64).collect(),
            Self::F64(v) => v.clone(),
        }
    }

    /// Copies the elements out as `T`, converting through `f64` when the
    /// dtypes differ. Every supported dtype is exactly representable in `f64`.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.to_f64_vec().into_iter().map(T::from_f64).collect()
    }

    pub fn cast(&self, dtype: DType) -> Self {
        if self.dtype() == dtype {
            return self.clone();
        }
        Self::from_f64_vec(&self.to_f64_vec(), dtype)
    }
}
