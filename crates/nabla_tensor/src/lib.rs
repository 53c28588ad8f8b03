pub mod adapter;
mod autograd;
mod creation;
mod display;
pub(crate) mod graph;
pub mod mode;
pub mod op;
mod operators;
pub(crate) mod ops;
#[cfg(feature = "serde")]
mod serde;
mod vec;

pub use mode::{grad_mode, is_grad_enabled, no_grad, no_grad_mode, GradModeGuard};
pub use op::Op;
pub use ops::reduction::Axes;

use nabla_core::{
    array::NDArray,
    dtype::DType,
    error::{Error, Result},
    layout::Layout,
};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, RwLock,
};

/// Process-unique tensor identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorId(usize);

static TENSOR_COUNTER: AtomicUsize = AtomicUsize::new(1);

#[inline]
pub(crate) fn next_tensor_id() -> TensorId {
    TensorId(TENSOR_COUNTER.fetch_add(1, Ordering::Relaxed))
}

impl std::fmt::Display for TensorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The operation that produced a tensor and the tensors it consumed.
#[derive(Clone)]
pub struct TensorNode {
    op: Op,
    inputs: Vec<Tensor>,
}

impl TensorNode {
    pub(crate) fn new(op: Op, inputs: Vec<Tensor>) -> Self {
        Self { op, inputs }
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    pub fn inputs(&self) -> &[Tensor] {
        &self.inputs
    }
}

struct TensorInner {
    id: TensorId,
    value: NDArray,
    requires_grad: AtomicBool,
    grad: RwLock<Option<Tensor>>,
    node: Option<TensorNode>,
}

// Tears the graph down iteratively; the default drop recurses once per node.
impl Drop for TensorInner {
    fn drop(&mut self) {
        let Some(node) = self.node.take() else {
            return;
        };
        let mut stack = node.inputs;
        while let Some(tensor) = stack.pop() {
            if let Some(mut inner) = Arc::into_inner(tensor.0) {
                if let Some(node) = inner.node.take() {
                    stack.extend(node.inputs);
                }
            }
        }
    }
}

/// A node of the computation graph.
///
/// Cloning a `Tensor` clones the handle: both clones refer to the same node,
/// the same value and the same gradient slot. A node stays alive as long as a
/// handle or a downstream node refers to it.
#[derive(Clone)]
pub struct Tensor(Arc<TensorInner>);

impl Tensor {
    pub(crate) fn from_parts(value: NDArray, requires_grad: bool, node: Option<TensorNode>) -> Self {
        Self(Arc::new(TensorInner {
            id: next_tensor_id(),
            value,
            requires_grad: AtomicBool::new(requires_grad),
            grad: RwLock::new(None),
            node,
        }))
    }

    /// Wraps an array as a leaf that does not require grad.
    pub fn from_array(value: NDArray) -> Self {
        Self::from_parts(value, false, None)
    }

    // identity

    pub fn id(&self) -> TensorId {
        self.0.id
    }

    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // value

    pub fn value(&self) -> &NDArray {
        &self.0.value
    }

    pub fn layout(&self) -> &Layout {
        self.0.value.layout()
    }

    pub fn shape(&self) -> &[usize] {
        self.0.value.shape()
    }

    pub fn size(&self) -> usize {
        self.0.value.size()
    }

    pub fn ndim(&self) -> usize {
        self.0.value.ndim()
    }

    pub fn dim_size(&self, dim: usize) -> Option<usize> {
        self.layout().dim_size(dim)
    }

    pub fn dtype(&self) -> DType {
        self.0.value.dtype()
    }

    // graph

    pub fn node(&self) -> Option<&TensorNode> {
        self.0.node.as_ref()
    }

    pub fn op(&self) -> Option<&Op> {
        self.node().map(TensorNode::op)
    }

    pub fn inputs(&self) -> &[Tensor] {
        self.node().map(TensorNode::inputs).unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.0.node.is_none()
    }

    pub fn requires_grad(&self) -> bool {
        self.0.requires_grad.load(Ordering::Relaxed)
    }

    /// Marks a leaf as requiring grad.
    pub fn with_grad(&self) -> Result<()> {
        self.set_requires_grad(true)
    }

    /// Only leaves may change their flag; interior nodes always require grad.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<()> {
        if !self.is_leaf() {
            return Err(Error::InvalidArgument(format!(
                "requires_grad can only be changed on leaf tensors, {} was produced by {}",
                self.id(),
                self.op().map(Op::name).unwrap_or("unknown"),
            )));
        }
        self.0.requires_grad.store(requires_grad, Ordering::Relaxed);

        Ok(())
    }

    // grad

    pub fn grad(&self) -> Result<Option<Tensor>> {
        Ok(self.0.grad.read().map_err(|_| Error::Lock)?.clone())
    }

    pub(crate) fn set_grad(&self, grad: Option<Tensor>) -> Result<()> {
        *self.0.grad.write().map_err(|_| Error::Lock)? = grad;

        Ok(())
    }

    /// Clears the stored gradient.
    pub fn zero_grad(&self) -> Result<()> {
        self.set_grad(None)
    }

    /// A new leaf sharing this tensor's value, with no history and no grad
    /// tracking.
    pub fn detach(&self) -> Tensor {
        Self::from_array(self.0.value.clone())
    }
}
