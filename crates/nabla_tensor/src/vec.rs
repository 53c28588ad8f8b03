use crate::Tensor;
use nabla_core::{
    dtype::DType,
    error::{Error, Result},
    storage::Element,
};

impl Tensor {
    /// Copies the elements out in row-major order, converted to `T`.
    pub fn to_flatten_vec<T: Element>(&self) -> Result<Vec<T>> {
        Ok(self.value().to_vec::<T>())
    }

    /// Reads the single element of a tensor holding exactly one value.
    pub fn item<T: Element>(&self) -> Result<T> {
        if self.size() != 1 {
            return Err(Error::InvalidArgument(format!(
                "item() needs a tensor with one element, got shape {:?}",
                self.shape()
            )));
        }
        Ok(self.value().to_vec::<T>()[0])
    }

    /// An untracked copy converted to `dtype`.
    pub fn to_dtype(&self, dtype: DType) -> Tensor {
        Tensor::from_array(self.value().cast(dtype))
    }
}
