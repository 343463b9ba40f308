//! Record-level invariants that must hold after any sequence of transitions.

use planspace_kernel::operators::CostPolicy;
use planspace_kernel::state::StateId;
use planspace_search::{NodeStatus, SearchNodeInfo, SearchSpace};

/// Assert the structural invariants of one record.
///
/// # Panics
///
/// Panics with a description of the first violated invariant.
pub fn assert_record(id: StateId, info: &SearchNodeInfo<'_>) {
    if info.status() == NodeStatus::New {
        return;
    }
    assert!(info.g() >= 0, "state {id}: negative g {}", info.g());
    assert!(info.real_g() >= 0, "state {id}: negative real_g {}", info.real_g());
    assert!(info.h() >= 0, "state {id}: negative h {}", info.h());

    let root_by_parent = info.parent_state_id().is_none();
    let root_by_op = info.creating_operator().is_none();
    let root_by_length = info.length() == 0;
    // Dead ends may never have been opened; their links stay default.
    if info.status() != NodeStatus::DeadEnd || !root_by_op {
        assert!(
            root_by_parent == root_by_op && root_by_op == root_by_length,
            "state {id}: parent {:?}, operator {:?}, length {} disagree about rootness",
            info.parent_state_id(),
            info.creating_operator().map(|op| op.name()),
            info.length()
        );
    }

    if let Some(steps) = info.steps() {
        let last = steps.last().expect("recorded steps are never empty");
        let creating = info
            .creating_operator()
            .expect("a node with steps has a creating operator");
        assert!(
            std::ptr::eq(*last, creating),
            "state {id}: last step is not the creating operator"
        );
        assert!(
            steps.len() <= info.length() as usize,
            "state {id}: {} steps exceed path length {}",
            steps.len(),
            info.length()
        );
    }
}

/// Assert [`assert_record`] for every recorded state of `space`.
///
/// # Panics
///
/// Panics on the first violating record.
pub fn assert_space<P: CostPolicy + ?Sized>(space: &SearchSpace<'_, P>) {
    for (id, info) in space.iter() {
        assert_record(id, info);
    }
}

/// Assert that every multi-step record spans exactly its steps:
/// `steps.len() == length - parent.length`.
///
/// Only meaningful while no ancestor has been re-parented, since
/// re-parenting changes a parent's length after its children were linked.
///
/// # Panics
///
/// Panics on the first record whose steps disagree with its parent's length.
pub fn assert_step_spans<P: CostPolicy + ?Sized>(space: &SearchSpace<'_, P>) {
    for (id, info) in space.iter() {
        let Some(steps) = info.steps() else {
            continue;
        };
        let parent_id = info
            .parent_state_id()
            .unwrap_or_else(|| panic!("state {id}: steps recorded without a parent"));
        let parent_length = space.info(parent_id).map_or(0, |parent| parent.length());
        assert_eq!(
            steps.len(),
            (info.length() - parent_length) as usize,
            "state {id}: {} steps but length {} over parent {parent_id} at length {parent_length}",
            steps.len(),
            info.length()
        );
    }
}
