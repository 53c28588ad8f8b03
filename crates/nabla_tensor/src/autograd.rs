use crate::{mode::no_grad_mode, Tensor, TensorId};
use nabla_core::{
    array::NDArray,
    error::{Error, Result},
};
use std::collections::{hash_map::Entry, HashMap, HashSet, VecDeque};
use tracing::{debug, instrument, warn};

impl Tensor {
    /// Reverse-mode differentiation from this tensor, seeded with ones.
    ///
    /// Every node in the grad-requiring sub-graph behind `self` gets its
    /// `.grad` assigned, replacing whatever a previous call left there. Stored
    /// gradients are leaves.
    #[instrument(level = "debug", name = "backward", skip(self), fields(id = %self.id(), shape = ?self.shape()))]
    pub fn backward(&self) -> Result<()> {
        let seed = Tensor::from_array(NDArray::ones(self.shape(), self.dtype()));

        if !self.requires_grad() {
            warn!("backward called on a tensor that does not require grad; only its own grad is set");
            return self.set_grad(Some(seed));
        }

        let mut pending = count_consumers(self);
        let mut grads: HashMap<TensorId, Tensor> = HashMap::from([(self.id(), seed)]);
        let mut ready = VecDeque::from([self.clone()]);
        let mut finished: Vec<(Tensor, Tensor)> = Vec::new();

        let _guard = no_grad_mode();
        while let Some(tensor) = ready.pop_front() {
            let grad = grads.remove(&tensor.id()).ok_or_else(|| Error::Internal {
                message: format!("no gradient accumulated for {}", tensor.id()),
            })?;
            let Some(node) = tensor.node() else {
                finished.push((tensor.clone(), grad));
                continue;
            };
            let op = node.op();
            debug!(op = op.name(), id = %tensor.id(), "gradient");

            let contributions = op.gradient(&grad, &tensor)?;
            if contributions.len() != node.inputs().len() {
                return Err(Error::Internal {
                    message: format!(
                        "{} returned {} gradients for {} inputs",
                        op.name(),
                        contributions.len(),
                        node.inputs().len()
                    ),
                });
            }

            for (input, contribution) in node.inputs().iter().zip(contributions) {
                if !input.requires_grad() {
                    continue;
                }
                if contribution.shape() != input.shape() {
                    return Err(Error::GradientShape {
                        op: op.name(),
                        expected: input.shape().to_vec(),
                        got: contribution.shape().to_vec(),
                    });
                }

                match grads.entry(input.id()) {
                    Entry::Occupied(mut entry) => {
                        let sum = entry.get().add(&contribution)?;
                        entry.insert(sum);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(contribution);
                    }
                }

                let remaining = pending.get_mut(&input.id()).ok_or_else(|| Error::Internal {
                    message: format!("{} was not discovered before propagation", input.id()),
                })?;
                *remaining -= 1;
                if *remaining == 0 {
                    ready.push_back(input.clone());
                }
            }
            finished.push((tensor.clone(), grad));
        }

        // Only a completed pass touches `.grad`.
        for (tensor, grad) in finished {
            tensor.set_grad(Some(grad))?;
        }
        Ok(())
    }
}

/// Walks the grad-requiring sub-graph behind `root` and counts, per node, the
/// edges coming from its consumers inside that sub-graph.
fn count_consumers(root: &Tensor) -> HashMap<TensorId, usize> {
    let mut pending: HashMap<TensorId, usize> = HashMap::new();
    let mut visited: HashSet<TensorId> = HashSet::from([root.id()]);
    let mut stack = vec![root.clone()];

    while let Some(tensor) = stack.pop() {
        for input in tensor.inputs() {
            if !input.requires_grad() {
                continue;
            }
            *pending.entry(input.id()).or_insert(0) += 1;
            if visited.insert(input.id()) {
                stack.push(input.clone());
            }
        }
    }

    debug!(nodes = visited.len(), "discovered");
    pending
}
