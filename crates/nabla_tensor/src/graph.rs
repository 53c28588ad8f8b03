use crate::{mode::is_grad_enabled, op::Op, Tensor, TensorNode};
use nabla_core::{array::NDArray, error::Result};
use tracing::trace;

/// Evaluates `op` on the inputs' values and wraps the result.
///
/// The result records `op` and `inputs` only when tracking is enabled on this
/// thread and at least one input requires grad; otherwise it is a plain leaf.
pub(crate) fn apply(op: Op, inputs: &[&Tensor]) -> Result<Tensor> {
    let values: Vec<&NDArray> = inputs.iter().map(|t| t.value()).collect();
    let value = op.compute(&values)?;

    let tracked = is_grad_enabled() && inputs.iter().any(|t| t.requires_grad());
    trace!(op = op.name(), shape = ?value.shape(), tracked, "apply");

    if !tracked {
        return Ok(Tensor::from_array(value));
    }

    let node = TensorNode::new(op, inputs.iter().map(|&t| t.clone()).collect());
    Ok(Tensor::from_parts(value, true, Some(node)))
}
