use crate::Tensor;
use std::fmt;

const MAX_ELEMENTS_PER_DIM: usize = 4;

fn display_tensor_data(f: &mut fmt::Formatter<'_>, data: &[f64], shape: &[usize], depth: usize) -> fmt::Result {
    if shape.is_empty() {
        return write!(f, "{:.6}", data[0]);
    }

    let len = shape[0];
    let stride = if len == 0 { 0 } else { data.len() / len };
    let (show_start, show_end) = if len <= MAX_ELEMENTS_PER_DIM * 2 {
        (len, 0)
    } else {
        (MAX_ELEMENTS_PER_DIM, MAX_ELEMENTS_PER_DIM)
    };
    let separator = if shape.len() == 1 {
        ", ".to_string()
    } else {
        format!(",\n{}", " ".repeat(depth + 1))
    };

    write!(f, "[")?;
    let indices = (0..show_start).chain(len - show_end..len);
    for (n, i) in indices.enumerate() {
        if n > 0 {
            f.write_str(&separator)?;
        }
        if show_end > 0 && n == show_start {
            write!(f, "...")?;
            f.write_str(&separator)?;
        }
        display_tensor_data(f, &data[i * stride..(i + 1) * stride], &shape[1..], depth + 1)?;
    }
    write!(f, "]")
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.value().to_f64_vec();
        if data.is_empty() {
            return write!(f, "[]");
        }
        display_tensor_data(f, &data, self.shape(), 0)
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({}, shape={:?}, dtype={}", self.id(), self.shape(), self.dtype())?;
        if let Some(op) = self.op() {
            write!(f, ", op={}", op)?;
        }
        if self.requires_grad() {
            write!(f, ", requires_grad=true")?;
        }
        write!(f, ", data={})", self)
    }
}
