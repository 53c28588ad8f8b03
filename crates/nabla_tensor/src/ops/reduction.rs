use crate::{graph::apply, op::Op, ops::shape::normalize_dim, Tensor};
use nabla_core::error::{Error, Result};

/// Axes argument of a reduction.
///
/// Converts from a single axis, a slice, a `Vec` or an array of axes. Negative
/// axes count from the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Axes {
    All,
    Dims(Vec<i64>),
}

// Axes past `i64::MAX` stay out of bounds instead of wrapping negative.
fn saturating_axis<T: TryInto<i64>>(axis: T) -> i64 {
    axis.try_into().unwrap_or(i64::MAX)
}

macro_rules! impl_axes_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Axes {
                fn from(axis: $t) -> Self {
                    Axes::Dims(vec![saturating_axis(axis)])
                }
            }

            impl From<Vec<$t>> for Axes {
                fn from(axes: Vec<$t>) -> Self {
                    Axes::Dims(axes.into_iter().map(saturating_axis).collect())
                }
            }

            impl From<&[$t]> for Axes {
                fn from(axes: &[$t]) -> Self {
                    Axes::Dims(axes.iter().map(|&a| saturating_axis(a)).collect())
                }
            }

            impl<const N: usize> From<[$t; N]> for Axes {
                fn from(axes: [$t; N]) -> Self {
                    Axes::Dims(axes.iter().map(|&a| saturating_axis(a)).collect())
                }
            }
        )*
    };
}

impl_axes_from!(i32, i64, isize, u32, usize);

impl<T: Into<Axes>> From<Option<T>> for Axes {
    fn from(axes: Option<T>) -> Self {
        axes.map_or(Axes::All, Into::into)
    }
}

impl Axes {
    /// Sorted, unique, non-negative axes; `None` for [`Axes::All`].
    pub fn normalize(&self, ndim: usize) -> Result<Option<Vec<usize>>> {
        let dims = match self {
            Axes::All => return Ok(None),
            Axes::Dims(dims) => dims,
        };

        let mut axes = dims
            .iter()
            .map(|&d| normalize_dim(d, ndim))
            .collect::<Result<Vec<usize>>>()?;
        axes.sort_unstable();
        if axes.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::InvalidArgument(format!("duplicate axes in {:?}", dims)));
        }

        Ok(Some(axes))
    }
}

impl Tensor {
    /// Sums over `axes`, dropping the reduced dimensions.
    pub fn summation(&self, axes: impl Into<Axes>) -> Result<Tensor> {
        let axes = axes.into().normalize(self.ndim())?;
        apply(Op::Summation(axes), &[self])
    }

    /// Sums every element into a scalar of shape `[]`.
    pub fn sum_all(&self) -> Result<Tensor> {
        self.summation(Axes::All)
    }
}
