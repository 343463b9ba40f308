//! Shared helpers for planspace benchmark suites.

use planspace_kernel::operators::{Operator, OperatorCatalogue};
use planspace_kernel::state::{StateId, StateRegistry, Variable};
use planspace_search::SearchSpace;

/// A counter task: one variable `pos` over `0..=len`, one `step-<i>` operator
/// per position moving to `i + 1`.
pub struct ChainTask {
    /// Registry holding every position, ids in position order.
    pub registry: StateRegistry,
    /// The `step-<i>` operators, unit cost.
    pub catalogue: OperatorCatalogue,
    /// State ids `0..=len`.
    pub ids: Vec<StateId>,
}

/// Build a chain of `len` steps.
///
/// # Panics
///
/// Panics if `len` does not fit a `u32` domain. Benchmark setup failures are fatal.
#[must_use]
pub fn chain_task(len: u32) -> ChainTask {
    let mut registry = StateRegistry::new(vec![Variable::new("pos", len + 1)]);
    let ids = (0..=len)
        .map(|v| registry.insert_state(&[v]).expect("value within domain"))
        .collect();
    let catalogue = OperatorCatalogue::new(
        (0..len)
            .map(|i| {
                Operator::new(format!("step-{i}"), 1)
                    .with_precondition(0, i)
                    .with_effect(0, i + 1)
            })
            .collect(),
    )
    .expect("step names are unique");
    ChainTask {
        registry,
        catalogue,
        ids,
    }
}

/// Open and close every node of the chain in order, root first.
///
/// # Panics
///
/// Panics if any node of the chain was already touched in `space`.
pub fn expand_chain<'a>(space: &mut SearchSpace<'a>, task: &'a ChainTask) {
    let mut ids = task.ids.iter().copied();
    let Some(root) = ids.next() else {
        return;
    };
    let mut node = space.get_node(root);
    node.open_initial(0);
    node.close();
    let mut parent = node.as_parent();
    for (id, op) in ids.zip(task.catalogue.iter()) {
        let mut node = space.get_node(id);
        node.open(0, &parent, op);
        node.close();
        parent = node.as_parent();
    }
}
