#[inline]
pub fn is_contiguous(dims: &[usize], strides: &[usize]) -> bool {
    let mut acc = 1;
    for d in (0..dims.len()).rev() {
        if dims[d] > 1 && acc != strides[d] {
            return false;
        }
        acc *= dims[d];
    }
    true
}

/// Maps a row-major position `idx` over `dims` to a buffer offset under `strides`.
#[inline]
pub fn get_strided_index(idx: usize, dims: &[usize], strides: &[usize]) -> usize {
    let mut strided_i = 0;
    let mut remaining_idx = idx;

    for d in (0..dims.len()).rev() {
        strided_i += (remaining_idx % dims[d]) * strides[d];
        remaining_idx /= dims[d];
    }

    strided_i
}

#[inline]
pub fn contiguous_strides(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    for d in (0..dims.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * dims[d + 1];
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_index_follows_transposed_strides() {
        // [2, 3] viewed as its transpose [3, 2]
        let dims = [3, 2];
        let strides = [1, 3];
        let offsets: Vec<usize> = (0..6).map(|i| get_strided_index(i, &dims, &strides)).collect();
        assert_eq!(offsets, vec![0, 3, 1, 4, 2, 5]);
        assert!(!is_contiguous(&dims, &strides));
    }

    #[test]
    fn broadcast_strides_are_not_contiguous() {
        assert!(!is_contiguous(&[3, 4], &[1, 0]));
        assert!(is_contiguous(&[1, 4], &[0, 1]));
        assert_eq!(contiguous_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert!(contiguous_strides(&[]).is_empty());
    }
}
