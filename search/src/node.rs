//! `SearchNode`: the transient lifecycle view over one state's record.
//!
//! A search algorithm fetches a node from the [`SearchSpace`](crate::SearchSpace),
//! reads its status and costs, applies one transition, and drops it. The view
//! borrows the record mutably, so only one node can be live at a time; the
//! parent side of a transition is passed as a [`ParentNode`] snapshot taken
//! beforehand:
//!
//! ```ignore
//! let parent = space.get_node(s0).as_parent();
//! let mut child = space.get_node(s1);
//! if child.is_new() {
//!     child.open(h, &parent, op);
//! }
//! ```
//!
//! Transition preconditions are asserted. A violated precondition is a bug
//! in the calling search algorithm and panics.

use std::io::{self, Write};

use planspace_kernel::operators::{CostPolicy, OperatorCost, Operator};
use planspace_kernel::state::{State, StateId, StateRegistry};

use crate::node_info::{NodeStatus, SearchNodeInfo};

/// The values a child's transition reads from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentNode {
    /// The parent's state id. Never `NO_STATE` for a real parent.
    pub state_id: StateId,
    /// The parent's adjusted path cost.
    pub g: i64,
    /// The parent's native path cost.
    pub real_g: i64,
    /// Number of operators on the parent's path.
    pub length: u32,
}

/// Mutable view of one state's search record.
pub struct SearchNode<'s, 'a, P: ?Sized> {
    state_id: StateId,
    info: &'s mut SearchNodeInfo<'a>,
    costs: &'a P,
    cost_type: OperatorCost,
}

impl<'s, 'a, P: CostPolicy + ?Sized> SearchNode<'s, 'a, P> {
    pub(crate) fn new(
        state_id: StateId,
        info: &'s mut SearchNodeInfo<'a>,
        costs: &'a P,
        cost_type: OperatorCost,
    ) -> Self {
        assert!(!state_id.is_none(), "search node for NO_STATE");
        Self {
            state_id,
            info,
            costs,
            cost_type,
        }
    }

    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.state_id
    }

    /// Resolve this node's state in `registry`.
    #[must_use]
    pub fn get_state<'r>(&self, registry: &'r StateRegistry) -> State<'r> {
        registry.lookup_state(self.state_id)
    }

    /// Read-only access to the whole record.
    #[must_use]
    pub fn info(&self) -> &SearchNodeInfo<'a> {
        &*self.info
    }

    #[must_use]
    pub fn status(&self) -> NodeStatus {
        self.info.status
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.info.status == NodeStatus::New
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.info.status == NodeStatus::Open
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.info.status == NodeStatus::Closed
    }

    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        self.info.status == NodeStatus::DeadEnd
    }

    #[must_use]
    pub fn g(&self) -> i64 {
        self.info.g
    }

    #[must_use]
    pub fn real_g(&self) -> i64 {
        self.info.real_g
    }

    #[must_use]
    pub fn h(&self) -> i64 {
        self.info.h
    }

    /// `g + h`, saturating.
    #[must_use]
    pub fn f(&self) -> i64 {
        self.info.g.saturating_add(self.info.h)
    }

    #[must_use]
    pub fn length(&self) -> u32 {
        self.info.length
    }

    #[must_use]
    pub fn is_h_dirty(&self) -> bool {
        self.info.h_is_dirty
    }

    #[must_use]
    pub fn parent_state_id(&self) -> Option<StateId> {
        self.info.parent_state_id()
    }

    #[must_use]
    pub fn creating_operator(&self) -> Option<&'a Operator> {
        self.info.creating_operator
    }

    #[must_use]
    pub fn steps(&self) -> Option<&[&'a Operator]> {
        self.info.steps()
    }

    /// Snapshot of the fields a child transition reads from this node.
    #[must_use]
    pub fn as_parent(&self) -> ParentNode {
        ParentNode {
            state_id: self.state_id,
            g: self.info.g,
            real_g: self.info.real_g,
            length: self.info.length,
        }
    }

    pub fn set_h_dirty(&mut self) {
        self.info.h_is_dirty = true;
    }

    pub fn clear_h_dirty(&mut self) {
        self.info.h_is_dirty = false;
    }

    /// Open the initial state.
    ///
    /// # Panics
    ///
    /// Panics unless the node is new.
    pub fn open_initial(&mut self, h: i64) {
        self.expect_status(&[NodeStatus::New], "open_initial");
        debug_assert!(h >= 0, "open_initial on state {} with negative h {h}", self.state_id);
        let info = &mut *self.info;
        info.status = NodeStatus::Open;
        info.g = 0;
        info.real_g = 0;
        info.h = h;
        info.length = 0;
        info.parent_state_id = StateId::NO_STATE;
        info.creating_operator = None;
    }

    /// Open this node as the successor of `parent` via `op`.
    ///
    /// # Panics
    ///
    /// Panics unless the node is new.
    pub fn open(&mut self, h: i64, parent: &ParentNode, op: &'a Operator) {
        self.expect_status(&[NodeStatus::New], "open");
        debug_assert!(h >= 0, "open on state {} with negative h {h}", self.state_id);
        self.link(parent, op, "open");
        self.info.status = NodeStatus::Open;
        self.info.h = h;
    }

    /// Open this node as the result of applying the plan `steps` from `parent`.
    ///
    /// `g` grows by the sum of the steps' adjusted costs; `real_g` grows by
    /// the cost policy's plan cost for the whole sequence. The node keeps its
    /// own copy of `steps`.
    ///
    /// # Panics
    ///
    /// Panics unless the node is new, or if `steps` is empty.
    pub fn open_with_steps(&mut self, h: i64, parent: &ParentNode, steps: &[&'a Operator]) {
        self.expect_status(&[NodeStatus::New], "open_with_steps");
        self.expect_parent(parent, "open_with_steps");
        debug_assert!(h >= 0, "open_with_steps on state {} with negative h {h}", self.state_id);
        let Some(&last) = steps.last() else {
            panic!("open_with_steps on state {} with an empty plan", self.state_id);
        };
        let adjusted: i64 = steps
            .iter()
            .map(|op| self.costs.adjusted_cost(op, self.cost_type))
            .sum();
        let plan_cost = self.costs.plan_cost(steps);
        debug_assert!(
            adjusted >= 0 && plan_cost >= 0,
            "open_with_steps on state {} with negative plan cost",
            self.state_id
        );
        let length = u32::try_from(steps.len())
            .ok()
            .and_then(|added| parent.length.checked_add(added));
        let Some(length) = length else {
            panic!("open_with_steps on state {} overflows the path length", self.state_id);
        };

        let info = &mut *self.info;
        info.status = NodeStatus::Open;
        info.length = length;
        info.g = parent.g + adjusted;
        info.real_g = parent.real_g + plan_cost;
        info.h = h;
        info.parent_state_id = parent.state_id;
        info.creating_operator = Some(last);
        info.steps = Some(steps.into());
    }

    /// Re-parent this node to `parent` via `op` and put it back on the frontier.
    ///
    /// Used when a cheaper path to an open or closed node is found.
    ///
    /// # Panics
    ///
    /// Panics unless the node is open or closed.
    pub fn reopen(&mut self, parent: &ParentNode, op: &'a Operator) {
        self.update_parent(parent, op);
        self.info.status = NodeStatus::Open;
    }

    /// Re-parent this node to `parent` via `op` without changing its status.
    ///
    /// Any multi-step plan recorded by [`SearchNode::open_with_steps`] is
    /// dropped: the new parentage is always a single operator. On closed
    /// nodes this is a silent re-parent; most callers want
    /// [`SearchNode::reopen`].
    ///
    /// # Panics
    ///
    /// Panics unless the node is open or closed.
    pub fn update_parent(&mut self, parent: &ParentNode, op: &'a Operator) {
        // Closed is allowed for inconsistent heuristics.
        self.expect_status(&[NodeStatus::Open, NodeStatus::Closed], "update_parent");
        self.link(parent, op, "update_parent");
        self.info.steps = None;
    }

    /// Raise the stored heuristic value. Leaves the dirty flag alone.
    ///
    /// # Panics
    ///
    /// Panics if `h` is below the stored value.
    pub fn increase_h(&mut self, h: i64) {
        assert!(
            h >= self.info.h,
            "increase_h on state {} would lower h from {} to {h}",
            self.state_id,
            self.info.h
        );
        self.info.h = h;
    }

    /// # Panics
    ///
    /// Panics unless the node is open.
    pub fn close(&mut self) {
        self.expect_status(&[NodeStatus::Open], "close");
        self.info.status = NodeStatus::Closed;
    }

    /// Mark this node as a dead end. Allowed from any status.
    pub fn mark_as_dead_end(&mut self) {
        self.info.status = NodeStatus::DeadEnd;
    }

    /// Write this node's state and parent link.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn dump<W: Write + ?Sized>(&self, registry: &StateRegistry, out: &mut W) -> io::Result<()> {
        write_entry(self.state_id, self.info, registry, out)
    }

    fn link(&mut self, parent: &ParentNode, op: &'a Operator, transition: &str) {
        self.expect_parent(parent, transition);
        let Some(length) = parent.length.checked_add(1) else {
            panic!("{transition} on state {} overflows the path length", self.state_id);
        };
        let adjusted = self.costs.adjusted_cost(op, self.cost_type);
        let native = self.costs.native_cost(op);
        debug_assert!(
            adjusted >= 0 && native >= 0,
            "{transition} on state {} with negative cost for {}",
            self.state_id,
            op.name()
        );
        let info = &mut *self.info;
        info.length = length;
        info.g = parent.g + adjusted;
        info.real_g = parent.real_g + native;
        info.parent_state_id = parent.state_id;
        info.creating_operator = Some(op);
    }

    fn expect_parent(&self, parent: &ParentNode, transition: &str) {
        assert!(
            !parent.state_id.is_none(),
            "{transition} on state {} from NO_STATE parent",
            self.state_id
        );
    }

    fn expect_status(&self, allowed: &[NodeStatus], transition: &str) {
        assert!(
            allowed.contains(&self.info.status),
            "{transition} on state {} requires status {allowed:?}, found {}",
            self.state_id,
            self.info.status
        );
    }
}

/// Shared dump format for single nodes and whole spaces.
pub(crate) fn write_entry<W: Write + ?Sized>(
    state_id: StateId,
    info: &SearchNodeInfo<'_>,
    registry: &StateRegistry,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{state_id}:")?;
    registry.lookup_state(state_id).dump_fdr(out)?;
    match (info.creating_operator, info.parent_state_id()) {
        (Some(op), Some(parent)) => writeln!(out, "  created by {} from {parent}", op.name()),
        _ => writeln!(out, "  has no parent"),
    }
}
