use crate::error::{Error, Result};

/// Shape, strides and starting offset describing how an array's elements sit
/// in its storage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
    offset: usize,
}

impl Layout {
    pub fn new(shape: &[usize], strides: &[usize], offset: usize) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: strides.to_vec(),
            offset,
        }
    }

    pub fn from_shape(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            strides: Self::compute_strides(shape),
            offset: 0,
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
    pub fn dim_size(&self, dim: usize) -> Option<usize> {
        self.shape.get(dim).copied()
    }
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_contiguous(&self) -> bool {
        nabla_cpu::utils::is_contiguous(&self.shape, &self.strides)
    }

    /// Reinterprets a contiguous layout with a new shape of the same size.
    pub fn view(&mut self, new_shape: &[usize]) -> Result<()> {
        let new_size = Self::compute_size(new_shape);
        if self.size() != new_size {
            return Err(Error::ShapeMismatch {
                op: "reshape",
                expected: self.shape.clone(),
                got: new_shape.to_vec(),
            });
        }
        if !self.is_contiguous() {
            return Err(Error::InvalidArgument(format!(
                "cannot view non-contiguous layout {:?} with strides {:?}",
                self.shape, self.strides
            )));
        }

        self.shape = new_shape.to_vec();
        self.strides = Self::compute_strides(new_shape);

        Ok(())
    }

    pub fn transpose(&mut self, dim0: usize, dim1: usize) -> Result<()> {
        for dim in [dim0, dim1] {
            if dim >= self.ndim() {
                return Err(Error::DimensionOutOfBounds {
                    dim: dim as i64,
                    ndim: self.ndim(),
                });
            }
        }

        self.shape.swap(dim0, dim1);
        self.strides.swap(dim0, dim1);

        Ok(())
    }

    /// Returns a layout viewing this one as `target`.
    ///
    /// Shapes are aligned from the trailing dimension; a dimension of size 1,
    /// or one that is absent on the left, is stretched with a stride of 0.
    pub fn broadcast_to(&self, target: &[usize]) -> Result<Layout> {
        if target.len() < self.ndim() {
            return Err(Error::ShapeMismatch {
                op: "broadcast_to",
                expected: target.to_vec(),
                got: self.shape.clone(),
            });
        }

        let rank_diff = target.len() - self.ndim();
        let mut strides = vec![0; target.len()];
        for (i, &dim) in target.iter().enumerate() {
            if i < rank_diff {
                continue;
            }
            let src = i - rank_diff;
            if self.shape[src] == dim {
                strides[i] = self.strides[src];
            } else if self.shape[src] != 1 {
                return Err(Error::ShapeMismatch {
                    op: "broadcast_to",
                    expected: target.to_vec(),
                    got: self.shape.clone(),
                });
            }
        }

        Ok(Layout::new(target, &strides, self.offset))
    }

    // helper

    pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
        nabla_cpu::utils::contiguous_strides(shape)
    }

    pub fn compute_size(shape: &[usize]) -> usize {
        shape.iter().product()
    }
}

/// Result shape of broadcasting `lhs` against `rhs`.
pub fn broadcast_shape(lhs: &[usize], rhs: &[usize]) -> Result<Vec<usize>> {
    let max_rank = lhs.len().max(rhs.len());
    let padded_lhs = pad_shape(lhs, max_rank);
    let padded_rhs = pad_shape(rhs, max_rank);

    padded_lhs
        .iter()
        .zip(padded_rhs.iter())
        .map(|(&a, &b)| {
            if a == b || b == 1 {
                Ok(a)
            } else if a == 1 {
                Ok(b)
            } else {
                Err(Error::ShapeMismatch {
                    op: "broadcast",
                    expected: lhs.to_vec(),
                    got: rhs.to_vec(),
                })
            }
        })
        .collect()
}

/// Left-pads `shape` with ones up to `target_rank` dimensions.
pub fn pad_shape(shape: &[usize], target_rank: usize) -> Vec<usize> {
    let mut padded = vec![1; target_rank.saturating_sub(shape.len())];
    padded.extend(shape);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_checks_element_count() {
        let mut layout = Layout::from_shape(&[2, 3]);
        layout.view(&[3, 2]).unwrap();
        assert_eq!(layout.strides(), &[2, 1]);
        assert!(matches!(layout.view(&[4]), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn broadcast_to_uses_zero_strides() {
        let layout = Layout::from_shape(&[3, 1]);
        let bc = layout.broadcast_to(&[2, 3, 4]).unwrap();
        assert_eq!(bc.shape(), &[2, 3, 4]);
        assert_eq!(bc.strides(), &[0, 1, 0]);
        assert!(layout.broadcast_to(&[3, 2]).is_err());
        assert!(layout.broadcast_to(&[3]).is_err());
    }

    #[test]
    fn broadcast_shapes() {
        assert_eq!(broadcast_shape(&[3, 1], &[4]).unwrap(), vec![3, 4]);
        assert_eq!(broadcast_shape(&[], &[2, 2]).unwrap(), vec![2, 2]);
        assert_eq!(broadcast_shape(&[2, 1, 5], &[3, 1]).unwrap(), vec![2, 3, 5]);
        assert!(broadcast_shape(&[2, 3], &[4, 3]).is_err());
    }

    #[test]
    fn transpose_swaps_shape_and_strides() {
        let mut layout = Layout::from_shape(&[2, 3]);
        layout.transpose(0, 1).unwrap();
        assert_eq!(layout.shape(), &[3, 2]);
        assert_eq!(layout.strides(), &[1, 3]);
        assert!(layout.transpose(0, 2).is_err());
    }
}
