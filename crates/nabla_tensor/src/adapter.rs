use half::{bf16, f16};
use nabla_core::{
    error::{Error, Result},
    storage::Element,
};

/// Host data a tensor can be built from: a scalar, or `Vec`s and arrays
/// nested to any depth with rectangular rows.
pub trait TensorAdapter: Sized {
    type Elem: Element;

    fn to_flatten_vec(self) -> Result<Vec<Self::Elem>>;
    fn get_shape(&self) -> Vec<usize>;
}

macro_rules! impl_tensor_adapter {
    ($($t:ty),*) => {
        $(
            // Scalar (Item Tensor)
            impl TensorAdapter for $t {
                type Elem = $t;

                fn to_flatten_vec(self) -> Result<Vec<$t>> {
                    Ok(vec![self])
                }
                fn get_shape(&self) -> Vec<usize> {
                    vec![]
                }
            }
        )*
    };
}

impl_tensor_adapter!(bf16, f16, f32, f64);

fn flatten_rows<T: TensorAdapter>(rows: impl IntoIterator<Item = T>, row_shape: &[usize]) -> Result<Vec<T::Elem>> {
    let mut flat = Vec::new();
    for row in rows {
        let shape = row.get_shape();
        if shape != row_shape {
            return Err(Error::ShapeMismatch {
                op: "new",
                expected: row_shape.to_vec(),
                got: shape,
            });
        }
        flat.extend(row.to_flatten_vec()?);
    }
    Ok(flat)
}

impl<T: TensorAdapter> TensorAdapter for Vec<T> {
    type Elem = T::Elem;

    fn to_flatten_vec(self) -> Result<Vec<T::Elem>> {
        let row_shape = self.first().map(TensorAdapter::get_shape).unwrap_or_default();
        flatten_rows(self, &row_shape)
    }
    fn get_shape(&self) -> Vec<usize> {
        let mut shape = vec![self.len()];
        if let Some(first) = self.first() {
            shape.extend(first.get_shape());
        }
        shape
    }
}

impl<T: TensorAdapter, const N: usize> TensorAdapter for [T; N] {
    type Elem = T::Elem;

    fn to_flatten_vec(self) -> Result<Vec<T::Elem>> {
        let row_shape = self.first().map(TensorAdapter::get_shape).unwrap_or_default();
        flatten_rows(self, &row_shape)
    }
    fn get_shape(&self) -> Vec<usize> {
        let mut shape = vec![N];
        if let Some(first) = self.first() {
            shape.extend(first.get_shape());
        }
        shape
    }
}
